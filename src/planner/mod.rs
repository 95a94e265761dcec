// ABOUTME: Planner module tree and the MealPlanner facade
// ABOUTME: Slot filling plus macro-convergence optimization behind one configured entry point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Planner
//!
//! The engine proper: slot filling, move generation, the greedy
//! optimization loop, and accounting. `MealPlanner` is the configured
//! entry point; it clones the caller's plan so a failed or aborted run
//! never corrupts a plan still visible to other readers.

/// Totals and accuracy recomputation
pub mod accounting;

/// The four move generators
pub mod generators;

/// Move variants, scoring, and apply semantics
pub mod moves;

/// The greedy convergence loop
pub mod optimizer;

/// Fire-and-forget progress events
pub mod progress;

/// Slot filling strategies
pub mod slot_filler;

pub use accounting::AccuracySnapshot;
pub use moves::{Move, MoveProjection};
pub use optimizer::{LogEntry, OptimizationOutcome, OptimizationStats};
pub use progress::{NullProgress, ProgressEvent, ProgressReporter};
pub use slot_filler::{FillMode, FillReport};

use crate::config::PlannerConfig;
use crate::errors::PlanResult;
use crate::models::{MacroTargets, Meal, WeekPlan};
use serde::{Deserialize, Serialize};

/// Result of a fill pass: the populated plan and what the filler did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledPlan {
    /// The plan with empty slots populated where possible
    pub plan: WeekPlan,
    /// Fill statistics
    pub report: FillReport,
}

/// Result of an optimization run: the adjusted plan, stats, and log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// The optimized plan
    pub plan: WeekPlan,
    /// Run statistics including outcome and final accuracy
    pub stats: OptimizationStats,
    /// Human-readable record of every applied move
    pub log: Vec<LogEntry>,
}

/// Configured entry point for slot filling and optimization
#[derive(Debug, Clone, Default)]
pub struct MealPlanner {
    config: PlannerConfig,
}

impl MealPlanner {
    /// Planner with the default (enhanced) configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner with a custom configuration, validated up front.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidConfig` when the configuration fails
    /// validation.
    pub fn with_config(config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Fill every empty main slot of a copy of the given plan
    #[must_use]
    pub fn fill(
        &self,
        plan: &WeekPlan,
        forced_meals: &[Meal],
        candidate_meals: &[Meal],
        mode: FillMode,
    ) -> FilledPlan {
        self.fill_with_progress(
            plan,
            forced_meals,
            candidate_meals,
            mode,
            &progress::NullProgress,
        )
    }

    /// `fill` with progress events surfaced to the given reporter
    #[must_use]
    pub fn fill_with_progress(
        &self,
        plan: &WeekPlan,
        forced_meals: &[Meal],
        candidate_meals: &[Meal],
        mode: FillMode,
        reporter: &dyn ProgressReporter,
    ) -> FilledPlan {
        let mut working = plan.clone();
        let report = slot_filler::fill(
            &mut working,
            forced_meals,
            candidate_meals,
            mode,
            self.config.respect_timing,
            reporter,
        );
        FilledPlan {
            plan: working,
            report,
        }
    }

    /// Optimize a copy of the given plan toward the daily targets.
    ///
    /// # Errors
    ///
    /// Propagates contract violations (`PlanError`); non-convergence is a
    /// reportable outcome, not an error.
    pub fn optimize(
        &self,
        plan: &WeekPlan,
        daily_targets: &MacroTargets,
        candidate_meals: &[Meal],
    ) -> PlanResult<OptimizationReport> {
        self.optimize_with_progress(plan, daily_targets, candidate_meals, &progress::NullProgress)
    }

    /// `optimize` with progress events surfaced to the given reporter
    pub fn optimize_with_progress(
        &self,
        plan: &WeekPlan,
        daily_targets: &MacroTargets,
        candidate_meals: &[Meal],
        reporter: &dyn ProgressReporter,
    ) -> PlanResult<OptimizationReport> {
        self.config.validate()?;
        let mut working = plan.clone();
        let (stats, log) = optimizer::run(
            &mut working,
            daily_targets,
            candidate_meals,
            &self.config,
            reporter,
        )?;
        Ok(OptimizationReport {
            plan: working,
            stats,
            log,
        })
    }

    /// Full pipeline: fill empty slots, then converge toward the targets.
    ///
    /// # Errors
    ///
    /// Propagates contract violations (`PlanError`).
    pub fn plan(
        &self,
        plan: &WeekPlan,
        forced_meals: &[Meal],
        candidate_meals: &[Meal],
        mode: FillMode,
        daily_targets: &MacroTargets,
    ) -> PlanResult<OptimizationReport> {
        let filled = self.fill(plan, forced_meals, candidate_meals, mode);
        self.optimize(&filled.plan, daily_targets, candidate_meals)
    }
}
