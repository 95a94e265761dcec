// ABOUTME: Planner configuration with named thresholds and candidate sets
// ABOUTME: Unifies the historical basic and enhanced optimizer variants behind one struct
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Planner Configuration
//!
//! One configuration struct parameterizes the whole engine: convergence
//! tolerance, iteration cap, portion-scale candidate sets, snack gating, and
//! per-generator improvement thresholds. The historical "basic" and
//! "enhanced" optimizer codepaths differed only in these values, so they are
//! shipped as presets (`PlannerConfig::default()` is the enhanced preset,
//! `PlannerConfig::basic()` the conservative one) rather than as two engines.

use crate::constants::{convergence, plan, scaling, snacks, thresholds};
use crate::errors::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};

/// Minimum combined improvement per move generator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImprovementThresholds {
    /// Portion scaling moves below this combined score are discarded
    pub scale: f64,
    /// Swap and replacement moves below this combined score are discarded
    pub swap: f64,
    /// Snack addition moves below this combined score are discarded
    pub snack: f64,
}

/// Configuration for slot filling and the optimization loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Allowed deviation from 100% accuracy that counts as converged (0..1)
    pub tolerance: f64,
    /// Iteration cap for the optimization loop
    pub max_iterations: u32,
    /// Protect coach-forced slots from every move generator
    pub respect_forced: bool,
    /// Honor meal timing tags during smart-repeat filling
    pub respect_timing: bool,
    /// Weight of protein improvement in the combined move score
    pub protein_weight: f64,
    /// Discrete scale factors tried by the portion scaling generator
    pub scale_candidates: Vec<f64>,
    /// Scale candidates this close to the current scale are skipped as no-ops
    pub scale_noop_threshold: f64,
    /// Policy cap on snacks per day
    pub snack_cap_per_day: usize,
    /// Weekly calorie gap required before snack addition is considered
    pub snack_calorie_trigger: f64,
    /// Weekly protein gap (grams) required before snack addition is considered
    pub snack_protein_trigger: f64,
    /// Snack candidates above this calorie count are rejected
    pub snack_calorie_cap: f64,
    /// Snack candidates below this protein content (grams) are rejected
    pub snack_protein_min: f64,
    /// Distinct snack moves proposed per generator pass
    pub snack_moves_per_pass: usize,
    /// Per-generator minimum improvement scores
    pub improvement_thresholds: ImprovementThresholds,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tolerance: convergence::DEFAULT_TOLERANCE,
            max_iterations: convergence::DEFAULT_MAX_ITERATIONS,
            respect_forced: true,
            respect_timing: true,
            protein_weight: convergence::PROTEIN_IMPROVEMENT_WEIGHT,
            scale_candidates: scaling::ENHANCED_SCALE_CANDIDATES.to_vec(),
            scale_noop_threshold: scaling::SCALE_NOOP_THRESHOLD,
            snack_cap_per_day: plan::SNACK_CAP_PER_DAY,
            snack_calorie_trigger: snacks::TRIGGER_CALORIE_NEED,
            snack_protein_trigger: snacks::TRIGGER_PROTEIN_NEED,
            snack_calorie_cap: snacks::CALORIE_CAP,
            snack_protein_min: snacks::PROTEIN_MIN,
            snack_moves_per_pass: snacks::MOVES_PER_PASS,
            improvement_thresholds: ImprovementThresholds {
                scale: thresholds::SCALE_IMPROVEMENT_MIN,
                swap: thresholds::SWAP_IMPROVEMENT_MIN,
                snack: thresholds::SNACK_IMPROVEMENT_MIN,
            },
        }
    }
}

impl PlannerConfig {
    /// Conservative preset matching the original basic optimizer:
    /// narrower scale set, any positive scaling improvement qualifies,
    /// and snacks require a larger unmet need.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            scale_candidates: scaling::BASIC_SCALE_CANDIDATES.to_vec(),
            snack_calorie_trigger: snacks::BASIC_TRIGGER_CALORIE_NEED,
            snack_protein_trigger: snacks::BASIC_TRIGGER_PROTEIN_NEED,
            snack_calorie_cap: snacks::BASIC_CALORIE_CAP,
            snack_protein_min: snacks::BASIC_PROTEIN_MIN,
            improvement_thresholds: ImprovementThresholds {
                scale: thresholds::BASIC_SCALE_IMPROVEMENT_MIN,
                swap: thresholds::BASIC_SWAP_IMPROVEMENT_MIN,
                snack: thresholds::BASIC_SNACK_IMPROVEMENT_MIN,
            },
            ..Self::default()
        }
    }

    /// Validate configuration invariants before an optimization run
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidConfig` when any tunable is out of range.
    pub fn validate(&self) -> PlanResult<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(PlanError::invalid_config(
                "tolerance must be between 0 and 1 exclusive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(PlanError::invalid_config("max_iterations must be positive"));
        }
        if self.scale_candidates.is_empty() {
            return Err(PlanError::invalid_config(
                "scale_candidates must not be empty",
            ));
        }
        if self
            .scale_candidates
            .iter()
            .any(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(PlanError::invalid_config(
                "scale candidates must be positive finite numbers",
            ));
        }
        if self.protein_weight < 0.0 || !self.protein_weight.is_finite() {
            return Err(PlanError::invalid_config(
                "protein_weight must be a non-negative finite number",
            ));
        }
        if self.snack_cap_per_day == 0 {
            return Err(PlanError::invalid_config(
                "snack_cap_per_day must be positive",
            ));
        }
        if self.snack_calorie_cap <= 0.0 || self.snack_protein_min < 0.0 {
            return Err(PlanError::invalid_config(
                "snack candidate bounds must be positive",
            ));
        }
        let t = self.improvement_thresholds;
        if t.scale < 0.0 || t.swap < 0.0 || t.snack < 0.0 {
            return Err(PlanError::invalid_config(
                "improvement thresholds must be non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PlannerConfig::default().validate().unwrap();
    }

    #[test]
    fn basic_preset_is_valid_and_narrower() {
        let basic = PlannerConfig::basic();
        basic.validate().unwrap();
        assert!(basic.scale_candidates.len() < PlannerConfig::default().scale_candidates.len());
        assert!((basic.improvement_thresholds.scale - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_tolerance() {
        let config = PlannerConfig {
            tolerance: 1.5,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_scale_candidates() {
        let config = PlannerConfig {
            scale_candidates: vec![1.1, -0.5],
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
