// ABOUTME: Move variants, the shared scoring primitive, and atomic apply semantics
// ABOUTME: PortionScale, Swap, AddSnack, and Replace with forced-slot protection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Moves
//!
//! A move is a single proposed, scored mutation to one slot or snack list.
//! `Move` is an exhaustive enum so the apply step is a compile-time-checked
//! match rather than a string-keyed branch. Each variant carries a
//! projection of its macro impact and a scalar improvement score.
//!
//! Applying a move is atomic: either all of its field writes happen or none
//! do. Forced-slot protection is enforced here a second time, as defense in
//! depth behind the generators.

use crate::config::PlannerConfig;
use crate::constants::plan::DEFAULT_SCALE_FACTOR;
use crate::errors::{PlanError, PlanResult};
use crate::models::{DayPlan, MacroTotals, Meal, MealSlot, PlannedMeal, WeekPlan};
use serde::{Deserialize, Serialize};

/// Projected macro impact and score of a proposed move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveProjection {
    /// Expected change in weekly calories
    pub calorie_delta: f64,
    /// Expected change in weekly protein (grams)
    pub protein_delta: f64,
    /// Combined improvement score (calorie + weighted protein)
    pub improvement: f64,
}

/// One proposed mutation to the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Change the portion scale of a populated, unforced main slot
    PortionScale {
        /// Day index (0..6)
        day: usize,
        /// Target main slot
        slot: MealSlot,
        /// New scale factor from the validated candidate set
        new_scale: f64,
        /// Projected impact
        projection: MoveProjection,
    },
    /// Substitute a timing-eligible candidate into an unforced main slot
    Swap {
        /// Day index (0..6)
        day: usize,
        /// Target main slot
        slot: MealSlot,
        /// Replacement meal
        meal: Meal,
        /// Projected impact
        projection: MoveProjection,
    },
    /// Append a qualifying snack to a day with room under the snack cap
    AddSnack {
        /// Day index (0..6)
        day: usize,
        /// Snack to append
        meal: Meal,
        /// Projected impact
        projection: MoveProjection,
    },
    /// Re-pick an AI-filled main slot wholesale
    Replace {
        /// Day index (0..6)
        day: usize,
        /// Target main slot
        slot: MealSlot,
        /// Replacement meal
        meal: Meal,
        /// Projected impact
        projection: MoveProjection,
    },
}

impl Move {
    /// Day index this move targets
    #[must_use]
    pub const fn day(&self) -> usize {
        match self {
            Self::PortionScale { day, .. }
            | Self::Swap { day, .. }
            | Self::AddSnack { day, .. }
            | Self::Replace { day, .. } => *day,
        }
    }

    /// The projected impact of this move
    #[must_use]
    pub const fn projection(&self) -> &MoveProjection {
        match self {
            Self::PortionScale { projection, .. }
            | Self::Swap { projection, .. }
            | Self::AddSnack { projection, .. }
            | Self::Replace { projection, .. } => projection,
        }
    }

    /// Combined improvement score
    #[must_use]
    pub const fn improvement(&self) -> f64 {
        self.projection().improvement
    }

    /// Human-readable description for the optimization log
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::PortionScale {
                day,
                slot,
                new_scale,
                projection,
            } => format!(
                "scaled day {day} {slot} portion to {new_scale:.1}x ({:+.0} kcal, {:+.1}g protein)",
                projection.calorie_delta, projection.protein_delta
            ),
            Self::Swap {
                day,
                slot,
                meal,
                projection,
            } => format!(
                "swapped day {day} {slot} for '{}' ({:+.0} kcal, {:+.1}g protein)",
                meal.name, projection.calorie_delta, projection.protein_delta
            ),
            Self::AddSnack {
                day,
                meal,
                projection,
            } => format!(
                "added snack '{}' to day {day} ({:+.0} kcal, {:+.1}g protein)",
                meal.name, projection.calorie_delta, projection.protein_delta
            ),
            Self::Replace {
                day,
                slot,
                meal,
                projection,
            } => format!(
                "replaced day {day} {slot} with '{}' ({:+.0} kcal, {:+.1}g protein)",
                meal.name, projection.calorie_delta, projection.protein_delta
            ),
        }
    }

    /// Apply this move to the plan.
    ///
    /// Returns `Ok(true)` when the plan changed and `Ok(false)` when the
    /// re-checked snack cap made the move a safe no-op.
    ///
    /// # Errors
    ///
    /// `PlanError::ForcedSlotViolation` when the target slot is forced and
    /// protection is active, `PlanError::InvalidPlan` when the move targets
    /// an out-of-range day or an empty/unaddressable slot.
    pub fn apply(&self, plan: &mut WeekPlan, config: &PlannerConfig) -> PlanResult<bool> {
        let day_index = self.day();
        let day = plan
            .days_mut()
            .get_mut(day_index)
            .ok_or_else(|| PlanError::invalid_plan(format!("day index {day_index} out of range")))?;

        match self {
            Self::PortionScale {
                slot, new_scale, ..
            } => {
                let assignment = day
                    .main_slot_mut(*slot)
                    .and_then(Option::as_mut)
                    .ok_or_else(|| {
                        PlanError::invalid_plan(format!("cannot scale empty {slot} slot"))
                    })?;
                guard_unforced(assignment, day_index, *slot, config)?;
                assignment.set_scale(*new_scale);
                Ok(true)
            }
            Self::Swap { slot, meal, .. } => {
                substitute(day, day_index, *slot, meal, config, true)?;
                Ok(true)
            }
            Self::Replace { slot, meal, .. } => {
                substitute(day, day_index, *slot, meal, config, false)?;
                Ok(true)
            }
            Self::AddSnack { meal, .. } => {
                // Cap re-checked at apply time so a stale proposal is a no-op
                if day.snacks.len() >= config.snack_cap_per_day {
                    tracing::debug!(day = day_index, "snack cap reached, skipping stale move");
                    return Ok(false);
                }
                day.snacks.push(PlannedMeal::new(meal.clone()));
                Ok(true)
            }
        }
    }
}

fn guard_unforced(
    assignment: &PlannedMeal,
    day: usize,
    slot: MealSlot,
    config: &PlannerConfig,
) -> PlanResult<()> {
    if config.respect_forced && assignment.forced {
        return Err(PlanError::ForcedSlotViolation { day, slot });
    }
    Ok(())
}

/// Shared apply path for swap and replace: the candidate goes in at the
/// default scale with provenance cleared, `swapped` set only for swaps.
fn substitute(
    day: &mut DayPlan,
    day_index: usize,
    slot: MealSlot,
    meal: &Meal,
    config: &PlannerConfig,
    mark_swapped: bool,
) -> PlanResult<()> {
    let slot_ref = day
        .main_slot_mut(slot)
        .ok_or_else(|| PlanError::invalid_plan("snack list is not an addressable slot"))?;
    let incumbent = slot_ref
        .as_ref()
        .ok_or_else(|| PlanError::invalid_plan(format!("cannot substitute empty {slot} slot")))?;
    guard_unforced(incumbent, day_index, slot, config)?;

    let mut replacement = PlannedMeal::new(meal.clone());
    replacement.scale_factor = DEFAULT_SCALE_FACTOR;
    replacement.swapped = mark_swapped;
    *slot_ref = Some(replacement);
    Ok(())
}

/// Single-macro improvement: how much of the needed gap this delta closes,
/// as a percentage of the gap. Deltas in the wrong direction score zero.
#[must_use]
pub fn single_macro_improvement(needed: f64, delta: f64) -> f64 {
    if needed.abs() < f64::EPSILON {
        return 0.0;
    }
    if needed > 0.0 && delta > 0.0 {
        return needed.min(delta) / needed.abs() * 100.0;
    }
    if needed < 0.0 && delta < 0.0 {
        return needed.abs().min(delta.abs()) / needed.abs() * 100.0;
    }
    0.0
}

/// Combined improvement: calories plus weighted protein (domain policy:
/// protein weighted above calories to bias toward protein adequacy).
#[must_use]
pub fn combined_improvement(
    adjustments: &MacroTotals,
    calorie_delta: f64,
    protein_delta: f64,
    protein_weight: f64,
) -> f64 {
    single_macro_improvement(adjustments.calories, calorie_delta)
        + protein_weight * single_macro_improvement(adjustments.protein_g, protein_delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_need_scores_zero() {
        assert!((single_macro_improvement(0.0, 500.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aligned_surplus_is_capped_at_the_gap() {
        // Need 200 more, delta offers 500: only the needed 200 counts
        let score = single_macro_improvement(200.0, 500.0);
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_progress_scores_proportionally() {
        let score = single_macro_improvement(400.0, 100.0);
        assert!((score - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_need_rewards_reductions_only() {
        assert!(single_macro_improvement(-300.0, -150.0) > 0.0);
        assert!((single_macro_improvement(-300.0, 150.0) - 0.0).abs() < f64::EPSILON);
        assert!((single_macro_improvement(300.0, -150.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn combined_score_weights_protein() {
        let gap = MacroTotals {
            calories: 100.0,
            protein_g: 10.0,
            carbs_g: 0.0,
            fat_g: 0.0,
        };
        // Both macros fully closed: 100 + 1.5 * 100
        let score = combined_improvement(&gap, 100.0, 10.0, 1.5);
        assert!((score - 250.0).abs() < f64::EPSILON);
    }
}
