// ABOUTME: Integration tests for the greedy optimization loop and the full pipeline
// ABOUTME: Convergence, exhaustion, iteration cap, forced preservation, and progress
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! Optimization loop tests:
//! - an already-accurate plan converges immediately with an empty log
//! - a single well-chosen swap closes a deficit exactly
//! - a fully forced plan with no candidates exhausts without mutating anything
//! - the iteration cap stops a long climb and never worsens accuracy
//! - fill plus optimize works end to end from an empty week

mod common;

use common::{
    forced_snapshot, fully_forced_week, init_test_logging, meal, standard_targets,
    week_with_breakfasts, RecordingProgress,
};
use mealplan_engine::config::PlannerConfig;
use mealplan_engine::models::{PlannedMeal, WeekPlan};
use mealplan_engine::planner::{accounting, FillMode, MealPlanner, OptimizationOutcome};

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn accurate_plan_converges_without_iterating() {
    init_test_logging();
    let exact = meal("Full day plate", 2200.0, 165.0, 220.0, 73.0);
    let plan = week_with_breakfasts(&exact);
    let planner = MealPlanner::new();

    let report = planner
        .optimize(&plan, &standard_targets(), &[])
        .unwrap();

    assert_eq!(report.stats.outcome, OptimizationOutcome::Converged);
    assert_eq!(report.stats.iterations, 0);
    assert_eq!(report.stats.total_adjustments, 0);
    assert!(report.log.is_empty());
    assert_eq!(report.stats.final_accuracy.calories, 100);
    assert_eq!(report.stats.final_accuracy.protein, 100);
}

#[test]
fn one_swap_closes_a_deficit_exactly() {
    init_test_logging();
    let exact = meal("Full day plate", 2200.0, 165.0, 220.0, 73.0);
    let light = meal("Light plate", 1000.0, 60.0, 100.0, 30.0);
    let candidate = meal("Replacement plate", 2200.0, 165.0, 220.0, 73.0);

    let mut plan = WeekPlan::empty();
    plan.days_mut()[0].breakfast = Some(PlannedMeal::new(light));
    for day in plan.days_mut().iter_mut().skip(1) {
        day.breakfast = Some(PlannedMeal::forced(exact.clone()));
    }

    let planner = MealPlanner::new();
    let report = planner
        .optimize(&plan, &standard_targets(), &[candidate.clone()])
        .unwrap();

    assert_eq!(report.stats.outcome, OptimizationOutcome::Converged);
    assert_eq!(report.stats.iterations, 1);
    assert_eq!(report.stats.total_adjustments, 1);
    assert_eq!(report.log.len(), 1);
    assert!(report.log[0].message.contains("swapped"));
    assert_eq!(report.stats.final_accuracy.calories, 100);
    assert_eq!(report.stats.final_accuracy.protein, 100);
    assert_eq!(report.stats.forced_meals_preserved, 6);

    let day_zero = report.plan.days()[0].breakfast.as_ref().unwrap();
    assert_eq!(day_zero.meal.id, candidate.id);
    assert!(day_zero.swapped);
}

#[test]
fn repeated_swaps_converge_over_several_iterations() {
    init_test_logging();
    let light = meal("Light plate", 1000.0, 60.0, 100.0, 30.0);
    let candidate = meal("Replacement plate", 2200.0, 165.0, 220.0, 73.0);
    let plan = week_with_breakfasts(&light);
    let planner = MealPlanner::new();

    let report = planner
        .optimize(&plan, &standard_targets(), &[candidate])
        .unwrap();

    // Every day needs the same swap; the loop applies one per iteration
    assert_eq!(report.stats.outcome, OptimizationOutcome::Converged);
    assert_eq!(report.stats.iterations, 7);
    assert_eq!(report.stats.total_adjustments, 7);
    assert_eq!(report.log.len(), 7);
    assert!(report.log.iter().all(|entry| entry.message.contains("swapped")));
    assert_eq!(report.stats.final_accuracy.calories, 100);
}

// ============================================================================
// Exhaustion and the iteration cap
// ============================================================================

#[test]
fn forced_plan_with_no_candidates_exhausts_untouched() {
    init_test_logging();
    let plan = fully_forced_week(&meal("Coach plate", 500.0, 30.0, 50.0, 15.0));
    let before = forced_snapshot(&plan);
    let planner = MealPlanner::new();

    let report = planner.optimize(&plan, &standard_targets(), &[]).unwrap();

    assert_eq!(report.stats.outcome, OptimizationOutcome::Exhausted);
    assert_eq!(report.stats.iterations, 0);
    assert_eq!(report.stats.total_adjustments, 0);
    assert!(report.log.is_empty());
    assert_eq!(forced_snapshot(&report.plan), before);
    assert_eq!(report.stats.forced_meals_preserved, 21);
}

#[test]
fn iteration_cap_stops_the_loop_without_worsening_accuracy() {
    init_test_logging();
    let light = meal("Light plate", 1000.0, 60.0, 100.0, 30.0);
    let candidate = meal("Replacement plate", 2200.0, 165.0, 220.0, 73.0);
    let plan = week_with_breakfasts(&light);
    let targets = standard_targets();

    let initial_accuracy =
        accounting::accuracy(&accounting::week_totals(&plan), &targets.weekly());

    let config = PlannerConfig {
        max_iterations: 3,
        ..PlannerConfig::default()
    };
    let planner = MealPlanner::with_config(config).unwrap();
    let report = planner.optimize(&plan, &targets, &[candidate]).unwrap();

    assert_eq!(
        report.stats.outcome,
        OptimizationOutcome::IterationCapReached
    );
    assert_eq!(report.stats.iterations, 3);
    assert_eq!(report.stats.total_adjustments, 3);
    assert!(
        (100 - report.stats.final_accuracy.calories).abs()
            < (100 - initial_accuracy.calories).abs(),
        "each applied move must move accuracy toward 100"
    );
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn fill_then_optimize_from_an_empty_week() {
    init_test_logging();
    // 3 x 700 kcal / 55 g per day lands at 95% calories, 100% protein
    let ration = meal("Meal prep ration", 700.0, 55.0, 70.0, 20.0);
    let planner = MealPlanner::new();

    let report = planner
        .plan(
            &WeekPlan::empty(),
            &[ration],
            &[],
            FillMode::SmartRepeat,
            &standard_targets(),
        )
        .unwrap();

    assert_eq!(report.stats.outcome, OptimizationOutcome::Converged);
    assert_eq!(report.stats.total_adjustments, 0);
    assert!(report.stats.week_complete);
    assert_eq!(report.stats.forced_meals_preserved, 21);
    assert_eq!(report.stats.final_accuracy.calories, 95);
    assert_eq!(report.stats.final_accuracy.protein, 100);
    for day in report.plan.days() {
        let accuracy = day.accuracy.unwrap();
        assert_eq!(accuracy.protein_pct, 100);
    }
}

#[test]
fn optimize_reports_progress_from_start_to_finish() {
    init_test_logging();
    let reporter = RecordingProgress::default();
    let plan = week_with_breakfasts(&meal("Light plate", 1000.0, 60.0, 100.0, 30.0));
    let candidate = meal("Replacement plate", 2200.0, 165.0, 220.0, 73.0);
    let planner = MealPlanner::new();

    let _report = planner
        .optimize_with_progress(&plan, &standard_targets(), &[candidate], &reporter)
        .unwrap();

    let events = reporter.events();
    assert!(events.len() >= 2);
    assert_eq!(events[0].percent_complete, 0);
    let last = events.last().unwrap();
    assert_eq!(last.percent_complete, 100);
    assert_eq!(last.step_description, "optimization complete");
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    init_test_logging();
    let config = PlannerConfig {
        tolerance: 0.0,
        ..PlannerConfig::default()
    };

    assert!(MealPlanner::with_config(config).is_err());
}
