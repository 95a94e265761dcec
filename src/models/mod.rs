// ABOUTME: Data models for the meal-plan engine
// ABOUTME: Meals, slot assignments, day and week plans, macro totals and targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! Plan, meal, and target data models.

/// Meal catalog records and per-slot assignments
pub mod meal;

/// Day and week plan structures with derived totals
pub mod plan;

pub use meal::{Meal, MealSlot, PlannedMeal};
pub use plan::{DayAccuracy, DayPlan, MacroTargets, MacroTotals, WeekPlan};
