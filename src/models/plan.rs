// ABOUTME: Day and week plan structures with derived totals and accuracy readouts
// ABOUTME: Defines DayPlan, WeekPlan, MacroTotals, MacroTargets, and DayAccuracy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

use crate::constants::plan::DAYS_PER_WEEK;
use crate::errors::{PlanError, PlanResult};
use crate::models::meal::{MealSlot, PlannedMeal};
use serde::{Deserialize, Serialize};

/// Summed nutrient totals, per day or per week
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Total calories
    pub calories: f64,
    /// Total protein (grams)
    pub protein_g: f64,
    /// Total carbohydrates (grams)
    pub carbs_g: f64,
    /// Total fat (grams)
    pub fat_g: f64,
}

impl MacroTotals {
    /// Accumulate one planned meal at its portion scale
    pub fn add_planned(&mut self, planned: &PlannedMeal) {
        self.calories += planned.scaled_calories();
        self.protein_g += planned.scaled_protein();
        self.carbs_g += planned.scaled_carbs();
        self.fat_g += planned.scaled_fat();
    }

    /// Accumulate another totals record
    pub fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }
}

/// Daily macro-nutrient targets
///
/// Weekly targets are always `daily x 7`; there is no independent weekly
/// target representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily calorie target
    pub calories: f64,
    /// Daily protein target (grams)
    pub protein_g: f64,
    /// Daily carbohydrate target (grams)
    pub carbs_g: f64,
    /// Daily fat target (grams)
    pub fat_g: f64,
}

impl MacroTargets {
    /// Create daily targets
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Weekly targets derived as daily x 7
    #[must_use]
    pub fn weekly(&self) -> Self {
        let days = DAYS_PER_WEEK as f64;
        Self {
            calories: self.calories * days,
            protein_g: self.protein_g * days,
            carbs_g: self.carbs_g * days,
            fat_g: self.fat_g * days,
        }
    }
}

/// Per-day accuracy readout against the even 1/7 share of weekly targets
///
/// Informational only; the convergence decision uses the weekly accuracy
/// snapshot, never this per-day estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAccuracy {
    /// Calories as a rounded percentage of the daily target
    pub calories_pct: i32,
    /// Protein as a rounded percentage of the daily target
    pub protein_pct: i32,
    /// Carbohydrates as a rounded percentage of the daily target
    pub carbs_pct: i32,
    /// Fat as a rounded percentage of the daily target
    pub fat_pct: i32,
}

/// One day of the plan: three main slots, a snack list, and derived totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Breakfast assignment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<PlannedMeal>,
    /// Lunch assignment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<PlannedMeal>,
    /// Dinner assignment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<PlannedMeal>,
    /// Snacks for the day (unordered semantically, capped by policy)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snacks: Vec<PlannedMeal>,
    /// Derived nutrient totals; recomputed after every structural change
    #[serde(default)]
    pub totals: MacroTotals,
    /// Derived per-day accuracy readout, present once targets are known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<DayAccuracy>,
}

impl DayPlan {
    /// Borrow the assignment in a main slot (`None` for the snack list)
    #[must_use]
    pub const fn main_slot(&self, slot: MealSlot) -> Option<&PlannedMeal> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
            MealSlot::Snack => None,
        }
    }

    /// Mutably borrow a main slot option (`None` for the snack list)
    pub fn main_slot_mut(&mut self, slot: MealSlot) -> Option<&mut Option<PlannedMeal>> {
        match slot {
            MealSlot::Breakfast => Some(&mut self.breakfast),
            MealSlot::Lunch => Some(&mut self.lunch),
            MealSlot::Dinner => Some(&mut self.dinner),
            MealSlot::Snack => None,
        }
    }

    /// Whether all three main slots are populated
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.breakfast.is_some() && self.lunch.is_some() && self.dinner.is_some()
    }

    /// Main slots currently empty, in day order
    #[must_use]
    pub fn empty_main_slots(&self) -> Vec<MealSlot> {
        MealSlot::MAIN
            .into_iter()
            .filter(|slot| self.main_slot(*slot).is_none())
            .collect()
    }

    /// Iterate every assignment in the day: main slots then snacks
    pub fn iter_planned(&self) -> impl Iterator<Item = &PlannedMeal> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.dinner.iter())
            .chain(self.snacks.iter())
    }
}

/// A full week: exactly 7 days, index 0..6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    days: Vec<DayPlan>,
}

impl Default for WeekPlan {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekPlan {
    /// A week of empty days
    #[must_use]
    pub fn empty() -> Self {
        Self {
            days: (0..DAYS_PER_WEEK).map(|_| DayPlan::default()).collect(),
        }
    }

    /// Construct from explicit days, validating the day-count contract.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidPlan` unless exactly 7 days are supplied;
    /// malformed input raises rather than being truncated or padded.
    pub fn new(days: Vec<DayPlan>) -> PlanResult<Self> {
        if days.len() != DAYS_PER_WEEK {
            return Err(PlanError::invalid_plan(format!(
                "expected {DAYS_PER_WEEK} days, got {}",
                days.len()
            )));
        }
        Ok(Self { days })
    }

    /// The 7 days in order
    #[must_use]
    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Mutable access to the 7 days
    pub fn days_mut(&mut self) -> &mut [DayPlan] {
        &mut self.days
    }

    /// Whether every day has all three main slots populated
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.days.iter().all(DayPlan::is_complete)
    }

    /// Count of main slots still empty across the week
    #[must_use]
    pub fn empty_slot_count(&self) -> usize {
        self.days
            .iter()
            .map(|day| day.empty_main_slots().len())
            .sum()
    }

    /// Count of coach-forced assignments across all slots and snacks
    #[must_use]
    pub fn forced_meal_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(DayPlan::iter_planned)
            .filter(|planned| planned.forced)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meal::Meal;

    #[test]
    fn week_plan_rejects_wrong_day_count() {
        let short: Vec<DayPlan> = (0..5).map(|_| DayPlan::default()).collect();
        assert!(matches!(
            WeekPlan::new(short),
            Err(PlanError::InvalidPlan(_))
        ));
        let long: Vec<DayPlan> = (0..9).map(|_| DayPlan::default()).collect();
        assert!(WeekPlan::new(long).is_err());
    }

    #[test]
    fn empty_week_has_seven_days_and_21_empty_slots() {
        let plan = WeekPlan::empty();
        assert_eq!(plan.days().len(), 7);
        assert_eq!(plan.empty_slot_count(), 21);
        assert!(!plan.is_complete());
    }

    #[test]
    fn weekly_targets_are_daily_times_seven() {
        let daily = MacroTargets::new(2200.0, 165.0, 220.0, 73.0);
        let weekly = daily.weekly();
        assert!((weekly.calories - 15400.0).abs() < f64::EPSILON);
        assert!((weekly.protein_g - 1155.0).abs() < f64::EPSILON);
    }

    #[test]
    fn forced_meal_count_spans_slots_and_snacks() {
        let mut plan = WeekPlan::empty();
        let meal = Meal::new("Chili").with_macros(500.0, 35.0, 40.0, 20.0);
        plan.days_mut()[0].lunch = Some(PlannedMeal::forced(meal.clone()));
        plan.days_mut()[2].snacks.push(PlannedMeal::forced(meal));
        assert_eq!(plan.forced_meal_count(), 2);
    }
}
