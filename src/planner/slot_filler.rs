// ABOUTME: Slot filling strategies that populate empty main slots before optimization
// ABOUTME: SmartRepeat rotation, AiFill candidate assignment, and the Mixed pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Slot Filler
//!
//! Produces a fully-populated week plan from a partially-specified one.
//! Only ever writes to currently-empty slots, so coach-forced assignments
//! are untouchable by construction; snacks are never added here (that is
//! the optimization loop's snack-addition move).
//!
//! Empty meal pools are not an error: slots simply remain empty and the
//! outcome is reported through the fill report's empty-slot count.

use crate::models::{Meal, MealSlot, PlannedMeal, WeekPlan};
use crate::planner::accounting;
use crate::planner::progress::{ProgressEvent, ProgressReporter};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Strategy used to populate empty slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Rotate coach-forced meals evenly across the week
    SmartRepeat,
    /// Assign pre-ranked candidates, deduplicated across the week
    AiFill,
    /// `AiFill` first for variety, then `SmartRepeat` over what remains
    Mixed,
}

/// Outcome of one fill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    /// Slots filled from the candidate pool (AI fill)
    pub ai_filled: usize,
    /// Slots filled from the forced-meal rotation (smart repeat)
    pub repeat_filled: usize,
    /// Main slots still empty after the pass
    pub still_empty: usize,
}

impl FillReport {
    /// Total slots populated by this pass
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.ai_filled + self.repeat_filled
    }
}

/// Fill every empty main slot in the plan using the given strategy.
///
/// Occupied slots are never rewritten and the day count never changes.
pub fn fill(
    plan: &mut WeekPlan,
    forced_meals: &[Meal],
    candidate_meals: &[Meal],
    mode: FillMode,
    respect_timing: bool,
    reporter: &dyn ProgressReporter,
) -> FillReport {
    reporter.report(ProgressEvent::new("filling empty meal slots", 0));
    warn_incomplete_meals(forced_meals.iter().chain(candidate_meals.iter()));

    let mut report = FillReport::default();
    match mode {
        FillMode::SmartRepeat => {
            report.repeat_filled = smart_repeat(plan, forced_meals, respect_timing);
        }
        FillMode::AiFill => {
            report.ai_filled = ai_fill(plan, candidate_meals);
        }
        FillMode::Mixed => {
            report.ai_filled = ai_fill(plan, candidate_meals);
            report.repeat_filled = smart_repeat(plan, forced_meals, respect_timing);
        }
    }
    report.still_empty = plan.empty_slot_count();

    // Keep derived totals consistent with the new slot contents
    accounting::recompute_week(plan, None);

    tracing::info!(
        mode = ?mode,
        filled = report.filled(),
        still_empty = report.still_empty,
        "slot fill pass complete"
    );
    reporter.report(ProgressEvent::new("meal slots filled", 100));
    report
}

/// Build the per-slot rotation for smart repeat: timing-eligible forced
/// meals, falling back to the full forced list when none are eligible.
fn rotation_for<'a>(forced_meals: &'a [Meal], slot: MealSlot, respect_timing: bool) -> Vec<&'a Meal> {
    let eligible: Vec<&Meal> = forced_meals
        .iter()
        .filter(|meal| meal.suits(slot, respect_timing))
        .collect();
    if eligible.is_empty() {
        forced_meals.iter().collect()
    } else {
        eligible
    }
}

/// Spread forced meals evenly: each empty slot takes the eligible meal with
/// the lowest usage count so far, ties broken by encounter order.
fn smart_repeat(plan: &mut WeekPlan, forced_meals: &[Meal], respect_timing: bool) -> usize {
    if forced_meals.is_empty() {
        return 0;
    }

    let mut usage: HashMap<Uuid, usize> = HashMap::new();
    let mut filled = 0;

    for day in plan.days_mut() {
        for slot in MealSlot::MAIN {
            let Some(slot_ref) = day.main_slot_mut(slot) else {
                continue;
            };
            if slot_ref.is_some() {
                continue;
            }
            let rotation = rotation_for(forced_meals, slot, respect_timing);
            // Lowest usage count wins; strict less-than keeps encounter order on ties
            let mut chosen: Option<&Meal> = None;
            let mut lowest = usize::MAX;
            for meal in rotation {
                let count = usage.get(&meal.id).copied().unwrap_or(0);
                if count < lowest {
                    lowest = count;
                    chosen = Some(meal);
                }
            }
            let Some(chosen) = chosen else {
                continue;
            };
            *usage.entry(chosen.id).or_insert(0) += 1;

            let mut planned = PlannedMeal::forced(chosen.clone());
            planned.repeated_from_original = true;
            *slot_ref = Some(planned);
            filled += 1;
        }
    }
    filled
}

/// Assign the first not-yet-used, timing-eligible candidate to each empty
/// slot. Candidates are assumed pre-ranked by the caller; identities are
/// tracked so no candidate appears twice in the week.
fn ai_fill(plan: &mut WeekPlan, candidate_meals: &[Meal]) -> usize {
    let mut used: HashSet<Uuid> = plan
        .days()
        .iter()
        .flat_map(|day| day.iter_planned().map(|planned| planned.meal.id))
        .collect();
    let mut filled = 0;

    for day in plan.days_mut() {
        for slot in MealSlot::MAIN {
            let Some(slot_ref) = day.main_slot_mut(slot) else {
                continue;
            };
            if slot_ref.is_some() {
                continue;
            }
            let Some(candidate) = candidate_meals
                .iter()
                .find(|meal| !used.contains(&meal.id) && meal.suits(slot, true))
            else {
                continue;
            };
            used.insert(candidate.id);

            let mut planned = PlannedMeal::new(candidate.clone());
            planned.ai_generated = true;
            *slot_ref = Some(planned);
            filled += 1;
        }
    }
    filled
}

/// Lenient-defaults policy: meals with missing nutrient fields read as zero
/// for the missing fields, but the condition is surfaced in the log.
fn warn_incomplete_meals<'a>(meals: impl Iterator<Item = &'a Meal>) {
    for meal in meals {
        if !meal.has_complete_macros() {
            tracing::warn!(
                meal = %meal.name,
                "meal has missing nutrient fields, treating them as zero"
            );
        }
    }
}
