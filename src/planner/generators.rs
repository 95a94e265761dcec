// ABOUTME: The four move generators feeding the optimization loop
// ABOUTME: Portion scaling, meal swap, strategic snack addition, and meal replacement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! # Move Generators
//!
//! Each generator is a pure function over the current plan, the signed
//! macro adjustments, and the candidate pool. Generators never emit a move
//! targeting a forced slot while forced protection is active - this is the
//! primary enforcement point for the forced-meal invariant (re-checked
//! again at apply time).
//!
//! Swap and replacement share mechanics but partition the slots they touch:
//! swap handles human-selected (non-AI) assignments, replacement re-picks
//! AI-filled slots wholesale.

use crate::config::PlannerConfig;
use crate::models::{MacroTotals, Meal, MealSlot, PlannedMeal, WeekPlan};
use crate::planner::moves::{combined_improvement, Move, MoveProjection};
use std::cmp::Ordering;

/// Shared inputs for one generator pass
#[derive(Clone, Copy)]
pub struct MoveContext<'a> {
    /// Current plan state
    pub plan: &'a WeekPlan,
    /// Signed weekly gap to target (positive = need more)
    pub adjustments: &'a MacroTotals,
    /// Caller-supplied candidate pool, pre-ranked
    pub candidates: &'a [Meal],
    /// Engine configuration
    pub config: &'a PlannerConfig,
}

/// Run all four generators and concatenate their proposals
#[must_use]
pub fn propose_all(ctx: &MoveContext<'_>) -> Vec<Move> {
    let mut moves = propose_portion_scaling(ctx);
    moves.extend(propose_swaps(ctx));
    moves.extend(propose_snack_additions(ctx));
    moves.extend(propose_replacements(ctx));
    tracing::debug!(proposed = moves.len(), "move generation pass complete");
    moves
}

/// True when the slot may be mutated under the current forced policy
fn mutable(planned: &PlannedMeal, config: &PlannerConfig) -> bool {
    !(config.respect_forced && planned.forced)
}

/// Portion scaling: try each configured scale factor on every unforced
/// populated slot, skipping near-identity candidates.
#[must_use]
pub fn propose_portion_scaling(ctx: &MoveContext<'_>) -> Vec<Move> {
    let threshold = ctx.config.improvement_thresholds.scale;
    let mut moves = Vec::new();

    for (day_index, day) in ctx.plan.days().iter().enumerate() {
        for slot in MealSlot::MAIN {
            let Some(planned) = day.main_slot(slot) else {
                continue;
            };
            if !mutable(planned, ctx.config) {
                continue;
            }
            for &new_scale in &ctx.config.scale_candidates {
                if (new_scale - planned.scale_factor).abs() < ctx.config.scale_noop_threshold {
                    continue;
                }
                let factor = new_scale - planned.scale_factor;
                let calorie_delta = planned.meal.calories_or_zero() * factor;
                let protein_delta = planned.meal.protein_or_zero() * factor;
                let improvement = combined_improvement(
                    ctx.adjustments,
                    calorie_delta,
                    protein_delta,
                    ctx.config.protein_weight,
                );
                if improvement > threshold && improvement > 0.0 {
                    moves.push(Move::PortionScale {
                        day: day_index,
                        slot,
                        new_scale,
                        projection: MoveProjection {
                            calorie_delta,
                            protein_delta,
                            improvement,
                        },
                    });
                }
            }
        }
    }
    moves
}

/// Candidate substitutions for one slot: timing-eligible candidates with a
/// different identity, scored by the nutrient difference to the incumbent.
fn substitution_moves(
    ctx: &MoveContext<'_>,
    day_index: usize,
    slot: MealSlot,
    incumbent: &PlannedMeal,
    threshold: f64,
    build: impl Fn(usize, MealSlot, Meal, MoveProjection) -> Move,
) -> Vec<Move> {
    let mut moves = Vec::new();
    for candidate in ctx.candidates {
        if candidate.id == incumbent.meal.id || !candidate.suits(slot, true) {
            continue;
        }
        let calorie_delta = candidate.calories_or_zero() - incumbent.scaled_calories();
        let protein_delta = candidate.protein_or_zero() - incumbent.scaled_protein();
        let improvement = combined_improvement(
            ctx.adjustments,
            calorie_delta,
            protein_delta,
            ctx.config.protein_weight,
        );
        if improvement > threshold && improvement > 0.0 {
            moves.push(build(
                day_index,
                slot,
                candidate.clone(),
                MoveProjection {
                    calorie_delta,
                    protein_delta,
                    improvement,
                },
            ));
        }
    }
    moves
}

/// Meal swap: substitutions for unforced, human-selected slots
#[must_use]
pub fn propose_swaps(ctx: &MoveContext<'_>) -> Vec<Move> {
    let threshold = ctx.config.improvement_thresholds.swap;
    let mut moves = Vec::new();
    for (day_index, day) in ctx.plan.days().iter().enumerate() {
        for slot in MealSlot::MAIN {
            let Some(planned) = day.main_slot(slot) else {
                continue;
            };
            if !mutable(planned, ctx.config) || planned.ai_generated {
                continue;
            }
            moves.extend(substitution_moves(
                ctx,
                day_index,
                slot,
                planned,
                threshold,
                |day, slot, meal, projection| Move::Swap {
                    day,
                    slot,
                    meal,
                    projection,
                },
            ));
        }
    }
    moves
}

/// Meal replacement: wholesale re-pick of AI-filled slots
#[must_use]
pub fn propose_replacements(ctx: &MoveContext<'_>) -> Vec<Move> {
    let threshold = ctx.config.improvement_thresholds.swap;
    let mut moves = Vec::new();
    for (day_index, day) in ctx.plan.days().iter().enumerate() {
        for slot in MealSlot::MAIN {
            let Some(planned) = day.main_slot(slot) else {
                continue;
            };
            if !mutable(planned, ctx.config) || !planned.ai_generated {
                continue;
            }
            moves.extend(substitution_moves(
                ctx,
                day_index,
                slot,
                planned,
                threshold,
                |day, slot, meal, projection| Move::Replace {
                    day,
                    slot,
                    meal,
                    projection,
                },
            ));
        }
    }
    moves
}

/// Strategic snack addition: only when the unmet need is large, only with
/// qualifying candidates, only to days with room under the snack cap, and
/// capped to a few proposals per pass.
#[must_use]
pub fn propose_snack_additions(ctx: &MoveContext<'_>) -> Vec<Move> {
    let config = ctx.config;
    if ctx.adjustments.calories <= config.snack_calorie_trigger
        && ctx.adjustments.protein_g <= config.snack_protein_trigger
    {
        return Vec::new();
    }

    let qualifying: Vec<&Meal> = ctx
        .candidates
        .iter()
        .filter(|meal| {
            meal.suits(MealSlot::Snack, true)
                && meal.calories_or_zero() < config.snack_calorie_cap
                && meal.protein_or_zero() > config.snack_protein_min
        })
        .collect();

    let mut moves = Vec::new();
    for (day_index, day) in ctx.plan.days().iter().enumerate() {
        if day.snacks.len() >= config.snack_cap_per_day {
            continue;
        }
        for candidate in &qualifying {
            let calorie_delta = candidate.calories_or_zero();
            let protein_delta = candidate.protein_or_zero();
            let improvement = combined_improvement(
                ctx.adjustments,
                calorie_delta,
                protein_delta,
                config.protein_weight,
            );
            if improvement > config.improvement_thresholds.snack && improvement > 0.0 {
                moves.push(Move::AddSnack {
                    day: day_index,
                    meal: (*candidate).clone(),
                    projection: MoveProjection {
                        calorie_delta,
                        protein_delta,
                        improvement,
                    },
                });
            }
        }
    }

    // Keep only the best few distinct proposals per pass
    moves.sort_by(|a, b| {
        b.improvement()
            .partial_cmp(&a.improvement())
            .unwrap_or(Ordering::Equal)
    });
    moves.truncate(config.snack_moves_per_pass);
    moves
}
