// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scan-outcome simulation.
//!
//! No image data is inspected. Each scan is an independent Bernoulli trial:
//! one sample is drawn from a [`UniformSource`] and the scan succeeds iff the
//! sample is strictly below the configured bias.

use crate::audio::ToneCue;
use crate::config::ValidatedConfig;
use crate::locale::MessageKey;
use crate::message::Classification;

/// Produces uniform samples in `[0, 1)`.
pub trait UniformSource {
    /// Returns the next sample.
    fn next_unit(&mut self) -> f64;
}

/// Small deterministic linear congruential generator.
///
/// Uses Knuth's MMIX multiplier and takes the top 53 bits of state, so every
/// sample is an exactly representable `f64` in `[0, 1)`. Suitable for tests
/// and seeded demos, not for anything adversarial.
#[derive(Clone, Debug)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Creates a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl UniformSource for Lcg64 {
    fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.state >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

/// Identifies one scan from start to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanId(pub u64);

/// Result of a simulated scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanOutcome {
    /// Ticket accepted.
    Success,
    /// Ticket rejected.
    Failure,
}

impl ScanOutcome {
    /// Result message for this outcome.
    #[must_use]
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::Success => MessageKey::ScanSuccess,
            Self::Failure => MessageKey::ScanFailure,
        }
    }

    /// Result panel style for this outcome.
    #[must_use]
    pub const fn classification(self) -> Classification {
        match self {
            Self::Success => Classification::Success,
            Self::Failure => Classification::Failure,
        }
    }

    /// Audio cue for this outcome.
    #[must_use]
    pub const fn cue(self) -> ToneCue {
        match self {
            Self::Success => ToneCue::SUCCESS,
            Self::Failure => ToneCue::FAILURE,
        }
    }
}

/// One sample and the outcome it classified to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanDraw {
    /// The uniform sample.
    pub sample: f64,
    /// The resulting outcome.
    pub outcome: ScanOutcome,
}

/// Classifies uniform samples with a fixed success bias.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeSimulator {
    bias: f64,
}

impl OutcomeSimulator {
    /// Creates a simulator with the bias from a validated configuration.
    #[must_use]
    pub const fn new(config: &ValidatedConfig) -> Self {
        Self {
            bias: config.get().success_bias,
        }
    }

    /// Returns the success probability.
    #[must_use]
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// Success iff `sample < bias`.
    #[must_use]
    pub fn classify(&self, sample: f64) -> ScanOutcome {
        if sample < self.bias {
            ScanOutcome::Success
        } else {
            ScanOutcome::Failure
        }
    }

    /// Draws one sample from `source` and classifies it.
    pub fn draw(&self, source: &mut impl UniformSource) -> ScanDraw {
        let sample = source.next_unit();
        ScanDraw {
            sample,
            outcome: self.classify(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KioskConfig;

    fn simulator(bias: f64) -> OutcomeSimulator {
        OutcomeSimulator::new(
            &KioskConfig::reference()
                .with_success_bias(bias)
                .validate()
                .unwrap(),
        )
    }

    #[test]
    fn forced_samples_classify_against_bias() {
        let sim = simulator(0.75);
        assert_eq!(sim.classify(0.5), ScanOutcome::Success);
        assert_eq!(sim.classify(0.9), ScanOutcome::Failure);
        assert_eq!(sim.classify(0.0), ScanOutcome::Success);
        // Strictly less than: the boundary itself fails.
        assert_eq!(sim.classify(0.75), ScanOutcome::Failure);
    }

    #[test]
    fn lcg_samples_stay_in_unit_interval() {
        let mut rng = Lcg64::new(7);
        for _ in 0..10_000 {
            let s = rng.next_unit();
            assert!((0.0..1.0).contains(&s), "sample {s} out of range");
        }
    }

    #[test]
    fn empirical_rate_converges_to_bias() {
        let sim = simulator(0.75);
        let mut rng = Lcg64::new(0x8f2f_3d29_11ab_9121);
        let n = 10_000;
        let successes = (0..n)
            .filter(|_| sim.draw(&mut rng).outcome == ScanOutcome::Success)
            .count();
        let rate = successes as f64 / f64::from(n);
        assert!((0.73..=0.77).contains(&rate), "observed rate {rate}");
    }

    #[test]
    fn outcomes_map_to_feedback() {
        assert_eq!(ScanOutcome::Success.message_key(), MessageKey::ScanSuccess);
        assert_eq!(
            ScanOutcome::Failure.classification(),
            Classification::Failure
        );
        assert_eq!(ScanOutcome::Success.cue(), ToneCue::SUCCESS);
        assert_eq!(ScanOutcome::Failure.cue(), ToneCue::FAILURE);
    }
}
