// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform-free core of the Turnstile ticket-scanning kiosk.
//!
//! `turnstile_core` holds the scanner state machine and everything it needs
//! to decide what the kiosk shows and plays. It is `no_std` compatible (with
//! `alloc`) and performs no I/O: presentation goes through the [`View`]
//! seam, and every suspension (camera negotiation, scan delay, message
//! auto-hide) is handed to the host as an [`Effect`] to perform.
//!
//! # Architecture
//!
//! ```text
//!   user action ──► ScannerController ──► View (text, enabled, active, result)
//!                        │   ▲
//!               poll_effect  │ wake / camera_opened / camera_failed
//!                        ▼   │
//!                   Host driver (timers, capture device)
//! ```
//!
//! **[`controller`]**: [`ScannerController`], the kiosk state machine.
//!
//! **[`locale`]**: Closed language set and string catalog with fallback.
//!
//! **[`outcome`]**: Bernoulli scan-outcome simulator and injectable
//! uniform random sources.
//!
//! **[`audio`]**: Success/failure tone cues and the lazily armed audio
//! context.
//!
//! **[`message`]**: Result message classification and the identifier-based
//! auto-hide board.
//!
//! **[`camera`]**: Capture constraints, camera errors, and the stream
//! contract.
//!
//! **[`preview`]**: Cover fit of the live preview inside its container.
//!
//! **[`view`]**: The [`View`] trait hosts implement.
//!
//! **[`effect`]**: Deferred work the host performs for the controller.
//!
//! **[`config`]**: [`KioskConfig`] and its validation.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and the
//! feature-gated [`Tracer`](trace::Tracer).
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies.
//!
//! [`View`]: view::View
//! [`Effect`]: effect::Effect
//! [`ScannerController`]: controller::ScannerController
//! [`KioskConfig`]: config::KioskConfig

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod audio;
pub mod camera;
pub mod config;
pub mod controller;
pub mod effect;
pub mod locale;
pub mod message;
pub mod outcome;
pub mod preview;
pub mod trace;
pub mod view;
