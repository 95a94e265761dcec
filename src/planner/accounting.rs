// ABOUTME: Totals and accuracy recomputation for day and week plans
// ABOUTME: Pure, idempotent accounting invoked after every structural mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Accounting
//!
//! Recomputes per-day and per-week nutrient totals (`field x scale_factor`
//! over every populated slot and snack) and the coarse accuracy readouts.
//! Derived fields are a pure function of the current slot contents: calling
//! these functions twice in a row yields identical results, and they carry
//! no side effects beyond the plan they are given.

use crate::constants::plan::DAYS_PER_WEEK;
use crate::models::{DayAccuracy, DayPlan, MacroTargets, MacroTotals, WeekPlan};
use serde::{Deserialize, Serialize};

/// Weekly accuracy per macro, as rounded percentages of target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracySnapshot {
    /// Calories as a percentage of the weekly target
    pub calories: i32,
    /// Protein as a percentage of the weekly target
    pub protein: i32,
    /// Carbohydrates as a percentage of the weekly target (tracked, not gating)
    pub carbs: i32,
    /// Fat as a percentage of the weekly target (tracked, not gating)
    pub fat: i32,
}

impl AccuracySnapshot {
    /// Convergence test: calories and protein within `tolerance x 100`
    /// percentage points of 100. Carbs and fat are informational only.
    #[must_use]
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        let allowed = tolerance * 100.0;
        f64::from((100 - self.calories).abs()) <= allowed
            && f64::from((100 - self.protein).abs()) <= allowed
    }
}

/// Percentage of target, rounded; 100 when the target is zero so that a
/// missing target never divides by zero or blocks convergence.
fn ratio_pct(current: f64, target: f64) -> i32 {
    if target.abs() < f64::EPSILON {
        return 100;
    }
    (current / target * 100.0).round() as i32
}

/// Weekly accuracy of the given totals against weekly targets
#[must_use]
pub fn accuracy(current: &MacroTotals, weekly_targets: &MacroTargets) -> AccuracySnapshot {
    AccuracySnapshot {
        calories: ratio_pct(current.calories, weekly_targets.calories),
        protein: ratio_pct(current.protein_g, weekly_targets.protein_g),
        carbs: ratio_pct(current.carbs_g, weekly_targets.carbs_g),
        fat: ratio_pct(current.fat_g, weekly_targets.fat_g),
    }
}

/// Signed gap from current totals to weekly targets (positive = need more)
#[must_use]
pub fn adjustments(current: &MacroTotals, weekly_targets: &MacroTargets) -> MacroTotals {
    MacroTotals {
        calories: weekly_targets.calories - current.calories,
        protein_g: weekly_targets.protein_g - current.protein_g,
        carbs_g: weekly_targets.carbs_g - current.carbs_g,
        fat_g: weekly_targets.fat_g - current.fat_g,
    }
}

/// Recompute one day's totals, and its accuracy readout when targets are known
pub fn recompute_day(day: &mut DayPlan, daily_targets: Option<&MacroTargets>) {
    let mut totals = MacroTotals::default();
    for planned in day.iter_planned() {
        totals.add_planned(planned);
    }
    day.totals = totals;
    day.accuracy = daily_targets.map(|targets| DayAccuracy {
        calories_pct: ratio_pct(totals.calories, targets.calories),
        protein_pct: ratio_pct(totals.protein_g, targets.protein_g),
        carbs_pct: ratio_pct(totals.carbs_g, targets.carbs_g),
        fat_pct: ratio_pct(totals.fat_g, targets.fat_g),
    });
}

/// Recompute every day in the plan
pub fn recompute_week(plan: &mut WeekPlan, daily_targets: Option<&MacroTargets>) {
    for day in plan.days_mut() {
        recompute_day(day, daily_targets);
    }
}

/// Sum scaled nutrient totals over all 7 days, from current slot contents
#[must_use]
pub fn week_totals(plan: &WeekPlan) -> MacroTotals {
    debug_assert_eq!(plan.days().len(), DAYS_PER_WEEK);
    let mut totals = MacroTotals::default();
    for day in plan.days() {
        for planned in day.iter_planned() {
            totals.add_planned(planned);
        }
    }
    totals
}
