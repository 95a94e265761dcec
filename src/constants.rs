// ABOUTME: Domain constants for the meal-plan engine organized by concern
// ABOUTME: Plan shape, convergence defaults, portion scaling sets, and snack policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! Application-wide constants, grouped by domain.
//!
//! These are the single source for `PlannerConfig::default()` and the
//! `basic()` preset; move generators never read them directly - tunables
//! always flow through the configuration struct.

/// Plan shape invariants
pub mod plan {
    /// A week plan always has exactly this many days
    pub const DAYS_PER_WEEK: usize = 7;

    /// Policy cap on snacks per day
    pub const SNACK_CAP_PER_DAY: usize = 2;

    /// Scale factor applied to a freshly assigned meal
    pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;
}

/// Convergence loop defaults
pub mod convergence {
    /// Allowed deviation from 100% accuracy that counts as converged (5%)
    pub const DEFAULT_TOLERANCE: f64 = 0.05;

    /// Safety valve against unbounded local search
    pub const DEFAULT_MAX_ITERATIONS: u32 = 12;

    /// Protein improvement weight in the combined move score.
    /// Domain policy: bias the optimizer toward protein adequacy.
    pub const PROTEIN_IMPROVEMENT_WEIGHT: f64 = 1.5;
}

/// Portion scaling candidate sets and thresholds
pub mod scaling {
    /// Wider candidate set used by the default (enhanced) preset
    pub const ENHANCED_SCALE_CANDIDATES: &[f64] = &[0.7, 0.8, 0.9, 1.1, 1.2, 1.3, 1.4];

    /// Smaller candidate set used by the basic preset
    pub const BASIC_SCALE_CANDIDATES: &[f64] = &[0.8, 0.9, 1.1, 1.2, 1.3];

    /// Candidates this close to the current scale are no-ops and skipped
    pub const SCALE_NOOP_THRESHOLD: f64 = 0.05;
}

/// Strategic snack addition policy
pub mod snacks {
    /// Weekly calorie gap that makes snack addition worth considering
    pub const TRIGGER_CALORIE_NEED: f64 = 250.0;

    /// Weekly protein gap (grams) that makes snack addition worth considering
    pub const TRIGGER_PROTEIN_NEED: f64 = 15.0;

    /// Snack candidates above this calorie count are rejected
    pub const CALORIE_CAP: f64 = 350.0;

    /// Snack candidates below this protein content (grams) are rejected
    pub const PROTEIN_MIN: f64 = 10.0;

    /// Distinct snack moves proposed per generator pass
    pub const MOVES_PER_PASS: usize = 3;

    /// Basic preset: higher gap required before snacks are considered
    pub const BASIC_TRIGGER_CALORIE_NEED: f64 = 300.0;

    /// Basic preset: protein gap trigger (grams)
    pub const BASIC_TRIGGER_PROTEIN_NEED: f64 = 20.0;

    /// Basic preset: calorie cap for snack candidates
    pub const BASIC_CALORIE_CAP: f64 = 400.0;

    /// Basic preset: minimum protein for snack candidates (grams)
    pub const BASIC_PROTEIN_MIN: f64 = 15.0;
}

/// Minimum combined improvement a generator must project before emitting a move
pub mod thresholds {
    /// Portion scaling (enhanced preset)
    pub const SCALE_IMPROVEMENT_MIN: f64 = 5.0;

    /// Meal swap and replacement (enhanced preset)
    pub const SWAP_IMPROVEMENT_MIN: f64 = 12.0;

    /// Snack addition (enhanced preset)
    pub const SNACK_IMPROVEMENT_MIN: f64 = 8.0;

    /// Basic preset: any positive improvement qualifies for scaling
    pub const BASIC_SCALE_IMPROVEMENT_MIN: f64 = 0.0;

    /// Basic preset: meal swap threshold
    pub const BASIC_SWAP_IMPROVEMENT_MIN: f64 = 10.0;

    /// Basic preset: snack addition threshold
    pub const BASIC_SNACK_IMPROVEMENT_MIN: f64 = 5.0;
}
