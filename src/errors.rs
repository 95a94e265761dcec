// ABOUTME: Unified error handling for the meal-plan engine
// ABOUTME: PlanError taxonomy and the PlanResult alias used across all modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Engine Error Handling
//!
//! The engine never errors for "could not fully converge" - that is an
//! expected, reportable outcome carried in `OptimizationStats`. Errors are
//! reserved for contract violations: structurally invalid input plans,
//! invalid configuration, and attempted mutation of coach-forced slots
//! (a programming defect, never silently allowed).

use crate::models::MealSlot;
use thiserror::Error;

/// Unified error type for the meal-plan engine
#[derive(Debug, Error)]
pub enum PlanError {
    /// The input plan violates a structural contract (e.g. not exactly 7 days)
    #[error("invalid week plan: {0}")]
    InvalidPlan(String),

    /// The planner configuration fails validation
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    /// A move targeted a coach-forced slot while forced protection was active
    #[error("attempted to mutate forced {slot} slot on day {day}")]
    ForcedSlotViolation {
        /// Day index (0..6) of the protected slot
        day: usize,
        /// Which slot the move targeted
        slot: MealSlot,
    },
}

impl PlanError {
    /// Structurally invalid plan input
    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Self::InvalidPlan(message.into())
    }

    /// Invalid planner configuration
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias for engine operations
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_slot_violation_names_day_and_slot() {
        let err = PlanError::ForcedSlotViolation {
            day: 3,
            slot: MealSlot::Lunch,
        };
        assert_eq!(
            err.to_string(),
            "attempted to mutate forced lunch slot on day 3"
        );
    }

    #[test]
    fn invalid_plan_wraps_message() {
        let err = PlanError::invalid_plan("expected 7 days, got 5");
        assert!(err.to_string().contains("expected 7 days"));
    }
}
