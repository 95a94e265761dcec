// ABOUTME: Greedy macro-convergence loop over a filled week plan
// ABOUTME: Scores moves from all generators, applies the single best per iteration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Optimization Loop
//!
//! Drives iterative convergence: compute weekly totals and accuracy, stop
//! when calories and protein are within tolerance, otherwise collect moves
//! from every generator, apply the single highest-improvement move, and
//! repeat until convergence, exhaustion, or the iteration cap.
//!
//! Failing to converge is an expected, reportable outcome carried in the
//! stats record, never an error.

use crate::config::PlannerConfig;
use crate::errors::PlanResult;
use crate::models::{MacroTargets, Meal, WeekPlan};
use crate::planner::accounting::{self, AccuracySnapshot};
use crate::planner::generators::{self, MoveContext};
use crate::planner::progress::{ProgressEvent, ProgressReporter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Terminal state of one optimization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationOutcome {
    /// Calorie and protein accuracy reached the tolerance band
    Converged,
    /// No generator proposed a move; terminated with whatever accuracy was reached
    Exhausted,
    /// The iteration cap stopped the loop before convergence
    IterationCapReached,
}

/// Timestamped human-readable record of one applied move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the move was applied
    pub timestamp: DateTime<Utc>,
    /// What the move did
    pub message: String,
}

impl LogEntry {
    fn now(message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            message,
        }
    }
}

/// Statistics describing one optimization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Loop passes that proceeded past the convergence check
    pub iterations: u32,
    /// How the loop terminated
    pub outcome: OptimizationOutcome,
    /// Weekly accuracy after the final recomputation
    pub final_accuracy: AccuracySnapshot,
    /// Moves actually applied to the plan
    pub total_adjustments: u32,
    /// Forced assignments still present after the run (post-hoc check)
    pub forced_meals_preserved: usize,
    /// Whether every main slot is populated
    pub week_complete: bool,
}

/// Run the convergence loop over an already-filled plan.
///
/// The plan is mutated in place; the caller owns cloning semantics.
pub(crate) fn run(
    plan: &mut WeekPlan,
    daily_targets: &MacroTargets,
    candidate_meals: &[Meal],
    config: &PlannerConfig,
    reporter: &dyn ProgressReporter,
) -> PlanResult<(OptimizationStats, Vec<LogEntry>)> {
    let weekly_targets = daily_targets.weekly();
    let mut log = Vec::new();
    let mut iterations = 0_u32;
    let mut total_adjustments = 0_u32;
    let mut outcome = OptimizationOutcome::IterationCapReached;

    reporter.report(ProgressEvent::new("optimizing weekly macros", 0));

    for pass in 0..config.max_iterations {
        let current_totals = accounting::week_totals(plan);
        let current_accuracy = accounting::accuracy(&current_totals, &weekly_targets);
        tracing::debug!(
            pass,
            calories = current_accuracy.calories,
            protein = current_accuracy.protein,
            "accuracy check"
        );

        if current_accuracy.within_tolerance(config.tolerance) {
            outcome = OptimizationOutcome::Converged;
            break;
        }

        let adjustments = accounting::adjustments(&current_totals, &weekly_targets);
        let mut moves = generators::propose_all(&MoveContext {
            plan,
            adjustments: &adjustments,
            candidates: candidate_meals,
            config,
        });
        if moves.is_empty() {
            tracing::info!(pass, "no improving move proposed, stopping early");
            outcome = OptimizationOutcome::Exhausted;
            break;
        }
        moves.sort_by(|a, b| {
            b.improvement()
                .partial_cmp(&a.improvement())
                .unwrap_or(Ordering::Equal)
        });

        iterations += 1;
        // Single best move per iteration: this is what makes the loop a
        // greedy hill-climber rather than a batch rewrite.
        let best = moves.swap_remove(0);
        let applied = best.apply(plan, config)?;
        if applied {
            total_adjustments += 1;
            let message = best.describe();
            tracing::debug!(pass, %message, "applied move");
            log.push(LogEntry::now(message));
            accounting::recompute_day(&mut plan.days_mut()[best.day()], Some(daily_targets));
        }

        let percent = (pass + 1) * 100 / config.max_iterations;
        reporter.report(ProgressEvent::new(
            format!("optimization iteration {}", pass + 1),
            percent.min(100) as u8,
        ));
    }

    accounting::recompute_week(plan, Some(daily_targets));
    let final_totals = accounting::week_totals(plan);
    let final_accuracy = accounting::accuracy(&final_totals, &weekly_targets);

    // The cap may land exactly inside the tolerance band; report that as
    // convergence so callers can distinguish it from a genuine cap-out.
    if outcome == OptimizationOutcome::IterationCapReached
        && final_accuracy.within_tolerance(config.tolerance)
    {
        outcome = OptimizationOutcome::Converged;
    }

    let stats = OptimizationStats {
        iterations,
        outcome,
        final_accuracy,
        total_adjustments,
        forced_meals_preserved: plan.forced_meal_count(),
        week_complete: plan.is_complete(),
    };

    tracing::info!(
        outcome = ?stats.outcome,
        iterations = stats.iterations,
        calories = stats.final_accuracy.calories,
        protein = stats.final_accuracy.protein,
        "optimization run finished"
    );
    reporter.report(ProgressEvent::new("optimization complete", 100));

    Ok((stats, log))
}
