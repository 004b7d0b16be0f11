// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON-lines export for Turnstile kiosk
//! traces.
//!
//! This crate provides [`TraceSink`](turnstile_core::trace::TraceSink)
//! implementations for development and for replaying a kiosk session:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording of typed events, read
//!   back through a [`recorder::Recording`] handle.
//! - [`jsonl::export`]: writes recorded events as JSON lines.

pub mod jsonl;
pub mod pretty;
pub mod recorder;
