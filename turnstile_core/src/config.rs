// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kiosk configuration.
//!
//! [`KioskConfig`] is plain data with a [`reference`](KioskConfig::reference)
//! constructor holding the stock kiosk timings and bias. Hosts may
//! adjust it with the `with_*` methods, then call
//! [`validate`](KioskConfig::validate) to obtain the [`ValidatedConfig`]
//! the controller requires.

use core::fmt;
use core::time::Duration;

use crate::camera::CaptureConstraints;
use crate::locale::Language;

/// Tunables for the scanner controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KioskConfig {
    /// Probability that a simulated scan succeeds. Must be in `(0, 1)`.
    pub success_bias: f64,
    /// Simulated processing time of one scan.
    pub scan_delay: Duration,
    /// How long a result message stays visible.
    pub message_timeout: Duration,
    /// Settling delay before refitting the preview after a viewport change.
    pub refit_delay: Duration,
    /// Language rendered before any detection runs.
    pub default_language: Language,
    /// Constraints sent with every camera request.
    pub constraints: CaptureConstraints,
}

impl KioskConfig {
    /// The reference kiosk: 3:1 success ratio, 1.5 s scans, 3 s messages.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            success_bias: 0.75,
            scan_delay: Duration::from_millis(1500),
            message_timeout: Duration::from_millis(3000),
            refit_delay: Duration::from_millis(500),
            default_language: Language::DEFAULT,
            constraints: CaptureConstraints::kiosk(),
        }
    }

    /// Sets [`success_bias`](Self::success_bias).
    #[must_use]
    pub const fn with_success_bias(mut self, bias: f64) -> Self {
        self.success_bias = bias;
        self
    }

    /// Sets [`scan_delay`](Self::scan_delay).
    #[must_use]
    pub const fn with_scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }

    /// Sets [`message_timeout`](Self::message_timeout).
    #[must_use]
    pub const fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    /// Sets [`default_language`](Self::default_language).
    #[must_use]
    pub const fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Checks the invariants the controller relies on.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if !(self.success_bias > 0.0 && self.success_bias < 1.0) {
            return Err(ConfigError::BiasOutOfRange(self.success_bias));
        }
        if self.scan_delay.is_zero() {
            return Err(ConfigError::ZeroDelay("scan_delay"));
        }
        if self.message_timeout.is_zero() {
            return Err(ConfigError::ZeroDelay("message_timeout"));
        }
        Ok(ValidatedConfig(self))
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// A [`KioskConfig`] that passed [`KioskConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedConfig(KioskConfig);

impl ValidatedConfig {
    /// The validated [`KioskConfig::reference`].
    #[must_use]
    pub const fn reference() -> Self {
        Self(KioskConfig::reference())
    }

    /// Returns the underlying configuration.
    #[must_use]
    pub const fn get(&self) -> &KioskConfig {
        &self.0
    }
}

/// A configuration value the controller cannot work with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `success_bias` was not strictly between 0 and 1.
    BiasOutOfRange(f64),
    /// A delay that must be positive was zero.
    ZeroDelay(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BiasOutOfRange(bias) => {
                write!(f, "success bias {bias} is outside the open interval (0, 1)")
            }
            Self::ZeroDelay(field) => write!(f, "{field} must be greater than zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_valid() {
        let validated = KioskConfig::reference().validate().unwrap();
        assert_eq!(validated, ValidatedConfig::reference());
        assert_eq!(validated.get().success_bias, 0.75);
        assert_eq!(validated.get().scan_delay, Duration::from_millis(1500));
        assert_eq!(validated.get().message_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bias_must_be_open_interval() {
        for bias in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = KioskConfig::reference()
                .with_success_bias(bias)
                .validate()
                .unwrap_err();
            assert!(matches!(err, ConfigError::BiasOutOfRange(_)), "{bias}");
        }
        assert!(
            KioskConfig::reference()
                .with_success_bias(0.01)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn delays_must_be_positive() {
        let err = KioskConfig::reference()
            .with_scan_delay(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDelay("scan_delay"));

        let err = KioskConfig::reference()
            .with_message_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDelay("message_timeout"));
    }
}
