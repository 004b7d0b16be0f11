// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines export.
//!
//! [`export`] writes each recorded [`Entry`] as one JSON object per line,
//! which keeps session logs greppable and streamable into tools such as
//! `jq`.

use std::io::{self, Write};

use serde_json::{Value, json};

use turnstile_core::audio::CueResult;

use crate::recorder::{Entry, RecordedEvent};

/// Writes `entries` as JSON lines.
///
/// Every object carries `seq` and `event`; the remaining fields depend on
/// the event.
pub fn export(entries: &[Entry], writer: &mut dyn Write) -> io::Result<()> {
    for entry in entries {
        let mut object = json!({
            "seq": entry.seq,
            "event": entry.event.name(),
        });
        if let (Value::Object(map), Value::Object(fields)) =
            (&mut object, event_fields(&entry.event))
        {
            map.extend(fields);
        }
        serde_json::to_writer(&mut *writer, &object)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

fn event_fields(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::LanguageChanged(e) => json!({
            "from": e.from.code(),
            "to": e.to.code(),
        }),
        RecordedEvent::CameraRequested(c) => json!({
            "facing": c.facing.as_str(),
            "width": { "ideal": c.width.ideal, "max": c.width.max },
            "height": { "ideal": c.height.ideal, "max": c.height.max },
            "audio": c.audio,
        }),
        RecordedEvent::CameraStarted | RecordedEvent::AudioArmed => json!({}),
        RecordedEvent::CameraFailed(error) => json!({ "error": error.to_string() }),
        RecordedEvent::CameraStopped { tracks_released }
        | RecordedEvent::StaleStream { tracks_released } => {
            json!({ "tracks_released": tracks_released })
        }
        RecordedEvent::ScanStarted(id) | RecordedEvent::ScanIgnored(id) => {
            json!({ "scan": id.0 })
        }
        RecordedEvent::ScanFinished(e) => json!({
            "scan": e.id.0,
            "sample": e.sample,
            "outcome": format!("{:?}", e.outcome),
        }),
        RecordedEvent::MessageShown(e) => json!({
            "message": e.id.0,
            "key": e.key.as_str(),
            "classification": e.classification.css_class(),
            "language": e.language.code(),
        }),
        RecordedEvent::MessageExpired(e) => json!({
            "message": e.id.0,
            "hidden": e.hidden,
        }),
        RecordedEvent::AudioUnavailable(error) => json!({ "error": error.to_string() }),
        RecordedEvent::Cue { outcome, result } => {
            let (status, error) = match result {
                CueResult::Played => ("played", None),
                CueResult::Skipped => ("skipped", None),
                CueResult::Failed(error) => ("failed", Some(error.to_string())),
            };
            json!({
                "outcome": format!("{outcome:?}"),
                "status": status,
                "error": error,
            })
        }
        RecordedEvent::VisibilityChanged { hidden } => json!({ "hidden": hidden }),
        RecordedEvent::PreviewRefit(fit) => match fit {
            Some(fit) => json!({
                "scale": fit.scale,
                "visible": [fit.visible.x0, fit.visible.y0, fit.visible.x1, fit.visible.y1],
            }),
            None => json!({ "scale": null }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::tests::record_session;

    fn lines(entries: &[Entry]) -> Vec<Value> {
        let mut buf = Vec::new();
        export(entries, &mut buf).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn one_object_per_entry() {
        let recording = record_session(5, 2);
        let entries = recording.entries();
        let lines = lines(&entries);
        assert_eq!(lines.len(), entries.len());
        for (line, entry) in lines.iter().zip(&entries) {
            assert_eq!(line["seq"], entry.seq);
            assert_eq!(line["event"], entry.event.name());
        }
    }

    #[test]
    fn scan_and_message_fields() {
        let recording = record_session(9, 1);
        let lines = lines(&recording.entries());

        let finished = lines
            .iter()
            .find(|l| l["event"] == "ScanFinished")
            .unwrap();
        let sample = finished["sample"].as_f64().unwrap();
        let expected = if sample < 0.75 { "Success" } else { "Failure" };
        assert_eq!(finished["outcome"], expected);

        let started = lines
            .iter()
            .find(|l| l["event"] == "MessageShown")
            .unwrap();
        assert_eq!(started["key"], "cameraStarted");
        assert_eq!(started["classification"], "success");
        assert_eq!(started["language"], "de");
    }

    #[test]
    fn camera_request_fields() {
        let recording = record_session(1, 0);
        let lines = lines(&recording.entries());
        let request = lines
            .iter()
            .find(|l| l["event"] == "CameraRequested")
            .unwrap();
        assert_eq!(request["facing"], "environment");
        assert_eq!(request["width"]["ideal"], 1280);
        assert_eq!(request["height"]["max"], 1080);
        assert_eq!(request["audio"], false);
    }

    #[test]
    fn empty_log_writes_nothing() {
        let mut buf = Vec::new();
        export(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
