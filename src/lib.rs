// ABOUTME: Weekly meal-plan optimization engine for the Macrofit coaching platform
// ABOUTME: Fills empty plan slots and converges weekly totals toward macro targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Mealplan Engine
//!
//! Library crate implementing the weekly meal-plan optimization engine:
//! slot filling over a 7-day plan followed by a greedy, scored local search
//! that converges weekly calorie and protein totals toward daily targets.
//!
//! The engine is synchronous and stateless between calls. Candidate meals,
//! targets, and the plan are passed in; an optimized plan plus a statistics
//! and log record is returned. Loading the candidate catalog and persisting
//! the result are caller concerns.
//!
//! ## Modules
//!
//! - **models**: `Meal`, `PlannedMeal`, `DayPlan`, `WeekPlan`, and macro targets
//! - **planner**: slot filler, move generators, optimization loop, accounting
//! - **config**: `PlannerConfig` with unified basic/enhanced presets
//! - **errors**: `PlanError` / `PlanResult` for contract violations
//! - **logging**: structured logging setup for host applications
//!
//! ## Example
//!
//! ```
//! use mealplan_engine::config::PlannerConfig;
//! use mealplan_engine::models::{MacroTargets, Meal, MealSlot, WeekPlan};
//! use mealplan_engine::planner::{FillMode, MealPlanner};
//!
//! let catalog = vec![
//!     Meal::new("Oats with whey").with_macros(520.0, 38.0, 62.0, 12.0),
//!     Meal::new("Chicken rice bowl").with_macros(680.0, 52.0, 70.0, 16.0),
//!     Meal::new("Salmon and potatoes").with_macros(710.0, 45.0, 55.0, 28.0),
//! ];
//! let targets = MacroTargets::new(2200.0, 165.0, 220.0, 73.0);
//!
//! let planner = MealPlanner::new();
//! let result = planner
//!     .plan(&WeekPlan::empty(), &[], &catalog, FillMode::AiFill, &targets)
//!     .unwrap();
//! assert_eq!(result.plan.days().len(), 7);
//! ```

/// Unified error handling with `PlanError` and the `PlanResult` alias
pub mod errors;

/// Domain constants organized by concern (plan shape, convergence, snacks)
pub mod constants;

/// Engine configuration with named thresholds and candidate sets
pub mod config;

/// Structured logging setup for host applications and tests
pub mod logging;

/// Plan, meal, and target data models
pub mod models;

/// Slot filler, move generators, optimization loop, and accounting
pub mod planner;

pub use config::PlannerConfig;
pub use errors::{PlanError, PlanResult};
pub use models::{MacroTargets, Meal, MealSlot, PlannedMeal, WeekPlan};
pub use planner::{FillMode, MealPlanner, OptimizationOutcome, OptimizationReport};
