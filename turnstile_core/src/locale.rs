// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed language set and the kiosk string catalog.
//!
//! Every [`Language`] maps to one static [`Strings`] record. Because the
//! record is a struct, all languages define exactly the same keys. Unknown
//! codes never fail: [`Language::from_code_or_default`] falls back to
//! [`Language::DEFAULT`].

use core::fmt;

/// A language the kiosk ships strings for.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Language {
    /// English (default and fallback).
    #[default]
    En,
    /// German.
    De,
    /// French.
    Fr,
}

impl Language {
    /// Every supported language, in selector order.
    pub const ALL: [Self; 3] = [Self::En, Self::De, Self::Fr];

    /// The baseline language used when a code is not in the catalog.
    pub const DEFAULT: Self = Self::En;

    /// Returns the two-letter code (`"en"`, `"de"`, `"fr"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Looks up a catalog code, ignoring ASCII case.
    ///
    /// Only exact codes match: `"fr-CH"` is not in the catalog and returns
    /// `None`. Use [`detect`](Self::detect) for browser language tags.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Looks up a catalog code, falling back to [`DEFAULT`](Self::DEFAULT).
    #[must_use]
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    /// Picks a language from a browser language tag such as `"fr-CH"`.
    ///
    /// Only the primary subtag is considered. Returns `None` when that
    /// subtag is not supported, so the caller keeps its current language.
    #[must_use]
    pub fn detect(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Self::from_code(primary)
    }

    /// Returns the string record for this language.
    #[must_use]
    pub const fn strings(self) -> &'static Strings {
        match self {
            Self::En => &EN,
            Self::De => &DE,
            Self::Fr => &FR,
        }
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Messages that can appear in the result panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// The simulated scan accepted the ticket.
    ScanSuccess,
    /// The simulated scan rejected the ticket.
    ScanFailure,
    /// The capture device could not be opened.
    CameraError,
    /// The capture device is streaming.
    CameraStarted,
    /// The capture device was released.
    CameraStopped,
}

impl MessageKey {
    /// Returns the catalog key name, as used by the reference page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScanSuccess => "scanSuccess",
            Self::ScanFailure => "scanFailure",
            Self::CameraError => "cameraError",
            Self::CameraStarted => "cameraStarted",
            Self::CameraStopped => "cameraStopped",
        }
    }
}

/// Display strings for one language.
#[derive(Debug, PartialEq, Eq)]
pub struct Strings {
    /// Page title.
    pub title: &'static str,
    /// Subtitle under the title.
    pub subtitle: &'static str,
    /// Instruction shown over the preview.
    pub instruction: &'static str,
    /// Camera toggle label while the camera is off.
    pub start_camera: &'static str,
    /// Camera toggle label while the camera is streaming.
    pub stop_camera: &'static str,
    /// Scan button label when idle.
    pub scan_ticket: &'static str,
    /// Scan button label while a scan is in flight.
    pub scanning: &'static str,
    /// Result text for an accepted ticket.
    pub scan_success: &'static str,
    /// Result text for a rejected ticket.
    pub scan_failure: &'static str,
    /// Result text when the camera could not be opened.
    pub camera_error: &'static str,
    /// Result text after the camera started.
    pub camera_started: &'static str,
    /// Result text after the camera stopped.
    pub camera_stopped: &'static str,
}

impl Strings {
    /// Resolves a result message.
    #[must_use]
    pub const fn message(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::ScanSuccess => self.scan_success,
            MessageKey::ScanFailure => self.scan_failure,
            MessageKey::CameraError => self.camera_error,
            MessageKey::CameraStarted => self.camera_started,
            MessageKey::CameraStopped => self.camera_stopped,
        }
    }
}

static EN: Strings = Strings {
    title: "Piscine de Horsdorf",
    subtitle: "Ticket Scanner",
    instruction: "Position ticket in the frame",
    start_camera: "Start Camera",
    stop_camera: "Stop Camera",
    scan_ticket: "Scan Ticket",
    scanning: "Scanning...",
    scan_success: "✅ Valid ticket! Welcome to the pool!",
    scan_failure: "❌ Invalid ticket! Please try again.",
    camera_error: "Camera access denied or not available",
    camera_started: "Camera started successfully",
    camera_stopped: "Camera stopped",
};

static DE: Strings = Strings {
    title: "Piscine de Horsdorf",
    subtitle: "Ticket Scanner",
    instruction: "Ticket im Rahmen positionieren",
    start_camera: "Kamera starten",
    stop_camera: "Kamera stoppen",
    scan_ticket: "Ticket scannen",
    scanning: "Scannen...",
    scan_success: "✅ Gültiges Ticket! Willkommen im Freibad!",
    scan_failure: "❌ Ungültiges Ticket! Bitte versuchen Sie es erneut.",
    camera_error: "Kamerazugriff verweigert oder nicht verfügbar",
    camera_started: "Kamera erfolgreich gestartet",
    camera_stopped: "Kamera gestoppt",
};

static FR: Strings = Strings {
    title: "Piscine de Horsdorf",
    subtitle: "Scanner de billets",
    instruction: "Positionnez le billet dans le cadre",
    start_camera: "Démarrer la caméra",
    stop_camera: "Arrêter la caméra",
    scan_ticket: "Scanner le billet",
    scanning: "Scan en cours...",
    scan_success: "✅ Billet valide! Bienvenue à la piscine!",
    scan_failure: "❌ Billet invalide! Veuillez réessayer.",
    camera_error: "Accès à la caméra refusé ou non disponible",
    camera_started: "Caméra démarrée avec succès",
    camera_stopped: "Caméra arrêtée",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_lookup() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("FR"), Some(Language::Fr));
        assert_eq!(Language::from_code(" de "), Some(Language::De));
    }

    #[test]
    fn unknown_code_falls_back_to_english() {
        assert_eq!(Language::from_code("fr-CH"), None);
        assert_eq!(Language::from_code_or_default("fr-CH"), Language::En);
        assert_eq!(Language::from_code_or_default("xx"), Language::En);
        assert_eq!(Language::from_code_or_default(""), Language::En);
    }

    #[test]
    fn french_is_in_the_catalog() {
        let lang = Language::from_code_or_default("fr");
        assert_eq!(lang.strings().subtitle, "Scanner de billets");
    }

    #[test]
    fn detect_uses_primary_subtag() {
        assert_eq!(Language::detect("fr-CH"), Some(Language::Fr));
        assert_eq!(Language::detect("de_AT"), Some(Language::De));
        assert_eq!(Language::detect("en"), Some(Language::En));
        assert_eq!(Language::detect("pt-BR"), None);
        assert_eq!(Language::detect(""), None);
    }

    #[test]
    fn every_record_resolves_every_message() {
        let keys = [
            MessageKey::ScanSuccess,
            MessageKey::ScanFailure,
            MessageKey::CameraError,
            MessageKey::CameraStarted,
            MessageKey::CameraStopped,
        ];
        for lang in Language::ALL {
            for key in keys {
                assert!(
                    !lang.strings().message(key).is_empty(),
                    "{lang} is missing {}",
                    key.as_str()
                );
            }
        }
        assert_eq!(
            Language::De.strings().message(MessageKey::CameraStopped),
            "Kamera gestoppt"
        );
    }
}
