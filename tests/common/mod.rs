// ABOUTME: Shared fixtures and helpers for meal-plan engine integration tests
// ABOUTME: Meal builders, week plan builders, logging init, and a recording reporter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching
#![allow(dead_code, clippy::missing_panics_doc, clippy::must_use_candidate)]

//! Shared test utilities for `mealplan_engine` integration tests.

use mealplan_engine::models::{DayPlan, MacroTargets, Meal, MealSlot, PlannedMeal, WeekPlan};
use mealplan_engine::planner::{ProgressEvent, ProgressReporter};
use std::sync::{Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Catalog meal with full macros and no timing restriction
pub fn meal(name: &str, calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Meal {
    Meal::new(name).with_macros(calories, protein_g, carbs_g, fat_g)
}

/// Catalog meal restricted to a single slot
pub fn slot_meal(
    name: &str,
    slot: MealSlot,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
) -> Meal {
    meal(name, calories, protein_g, carbs_g, fat_g).with_slot(slot)
}

/// Snack-tagged candidate
pub fn snack(name: &str, calories: f64, protein_g: f64) -> Meal {
    Meal::new(name)
        .with_macros(calories, protein_g, 10.0, 5.0)
        .with_slot(MealSlot::Snack)
}

/// The standard daily targets used across scenarios
pub fn standard_targets() -> MacroTargets {
    MacroTargets::new(2200.0, 165.0, 220.0, 73.0)
}

/// Week with the given meal in every day's breakfast slot, unforced
pub fn week_with_breakfasts(template: &Meal) -> WeekPlan {
    let mut plan = WeekPlan::empty();
    for day in plan.days_mut() {
        day.breakfast = Some(PlannedMeal::new(template.clone()));
    }
    plan
}

/// Week with every main slot holding a forced copy of the given meal
pub fn fully_forced_week(template: &Meal) -> WeekPlan {
    let mut plan = WeekPlan::empty();
    for day in plan.days_mut() {
        day.breakfast = Some(PlannedMeal::forced(template.clone()));
        day.lunch = Some(PlannedMeal::forced(template.clone()));
        day.dinner = Some(PlannedMeal::forced(template.clone()));
    }
    plan
}

/// Snapshot of every forced assignment: (day, slot label, meal id, scale)
pub fn forced_snapshot(plan: &WeekPlan) -> Vec<(usize, &'static str, uuid::Uuid, f64)> {
    let mut snapshot = Vec::new();
    for (day_index, day) in plan.days().iter().enumerate() {
        for slot in MealSlot::MAIN {
            if let Some(planned) = day.main_slot(slot) {
                if planned.forced {
                    snapshot.push((day_index, slot.label(), planned.meal.id, planned.scale_factor));
                }
            }
        }
        for planned in &day.snacks {
            if planned.forced {
                snapshot.push((day_index, "snack", planned.meal.id, planned.scale_factor));
            }
        }
    }
    snapshot
}

/// Count how many main slots across the week hold the given meal identity
pub fn usage_count(plan: &WeekPlan, id: uuid::Uuid) -> usize {
    plan.days()
        .iter()
        .flat_map(DayPlan::iter_planned)
        .filter(|planned| planned.meal.id == id)
        .count()
}

/// Progress reporter that records every event for assertions
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
