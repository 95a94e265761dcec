// ABOUTME: Meal catalog models shared by the slot filler and the optimizer
// ABOUTME: Defines Meal, MealSlot, and the PlannedMeal assignment with provenance flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

use crate::constants::plan::DEFAULT_SCALE_FACTOR;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One of the daily meal positions a meal can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals (unordered list, not an addressable slot)
    Snack,
}

impl MealSlot {
    /// The three addressable main slots in day order
    pub const MAIN: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Human-readable slot label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable meal template from the catalog
///
/// Nutrition fields are optional to stay resilient against partial catalog
/// data: a missing field reads as zero (lenient-defaults policy) and is
/// reported through a warning log at engine entry, never by raising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique catalog identity
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Calories per portion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein per portion (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates per portion (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    /// Fat per portion (grams)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Slots this meal suits; empty means appropriate for any slot
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timing: Vec<MealSlot>,
}

impl Meal {
    /// Create a new meal with a fresh identity and no nutrition facts
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories: None,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            timing: Vec::new(),
        }
    }

    /// Set all four macro-nutrient fields
    #[must_use]
    pub const fn with_macros(mut self, calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        self.calories = Some(calories);
        self.protein_g = Some(protein_g);
        self.carbs_g = Some(carbs_g);
        self.fat_g = Some(fat_g);
        self
    }

    /// Restrict this meal to a single slot
    #[must_use]
    pub fn with_slot(mut self, slot: MealSlot) -> Self {
        self.timing.push(slot);
        self
    }

    /// Restrict this meal to the given slots
    #[must_use]
    pub fn with_timing(mut self, slots: &[MealSlot]) -> Self {
        self.timing.extend_from_slice(slots);
        self
    }

    /// Whether this meal is appropriate for the given slot.
    ///
    /// An empty timing set means any slot; with `respect_timing` false the
    /// timing tags are ignored entirely.
    #[must_use]
    pub fn suits(&self, slot: MealSlot, respect_timing: bool) -> bool {
        !respect_timing || self.timing.is_empty() || self.timing.contains(&slot)
    }

    /// Calories with the lenient zero default
    #[must_use]
    pub fn calories_or_zero(&self) -> f64 {
        self.calories.unwrap_or_default()
    }

    /// Protein (grams) with the lenient zero default
    #[must_use]
    pub fn protein_or_zero(&self) -> f64 {
        self.protein_g.unwrap_or_default()
    }

    /// Carbohydrates (grams) with the lenient zero default
    #[must_use]
    pub fn carbs_or_zero(&self) -> f64 {
        self.carbs_g.unwrap_or_default()
    }

    /// Fat (grams) with the lenient zero default
    #[must_use]
    pub fn fat_or_zero(&self) -> f64 {
        self.fat_g.unwrap_or_default()
    }

    /// Whether all four nutrient fields are present
    #[must_use]
    pub const fn has_complete_macros(&self) -> bool {
        self.calories.is_some()
            && self.protein_g.is_some()
            && self.carbs_g.is_some()
            && self.fat_g.is_some()
    }
}

fn default_scale() -> f64 {
    DEFAULT_SCALE_FACTOR
}

/// A meal embedded into a plan slot, with portioning and provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// The embedded meal template
    pub meal: Meal,
    /// Coach-assigned; protected from every automated mutation
    #[serde(default)]
    pub forced: bool,
    /// Portion multiplier applied to all nutrient fields; always positive finite
    #[serde(default = "default_scale")]
    pub scale_factor: f64,
    /// Provenance: replaced by the swap generator
    #[serde(default)]
    pub swapped: bool,
    /// Provenance: assigned by the AI fill mode
    #[serde(default)]
    pub ai_generated: bool,
    /// Provenance: repeated from the coach's original selections
    #[serde(default)]
    pub repeated_from_original: bool,
}

impl PlannedMeal {
    /// Embed a meal at the default portion scale
    #[must_use]
    pub fn new(meal: Meal) -> Self {
        Self {
            meal,
            forced: false,
            scale_factor: DEFAULT_SCALE_FACTOR,
            swapped: false,
            ai_generated: false,
            repeated_from_original: false,
        }
    }

    /// Embed a coach-forced meal at the default portion scale
    #[must_use]
    pub fn forced(meal: Meal) -> Self {
        Self {
            forced: true,
            ..Self::new(meal)
        }
    }

    /// Set the portion scale, normalizing invalid values to the default.
    ///
    /// The scale factor invariant (positive finite) is enforced here by
    /// construction; move generators only ever propose values from the
    /// validated candidate set.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale_factor = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_SCALE_FACTOR
        };
    }

    /// Scaled calories for this assignment
    #[must_use]
    pub fn scaled_calories(&self) -> f64 {
        self.meal.calories_or_zero() * self.scale_factor
    }

    /// Scaled protein (grams) for this assignment
    #[must_use]
    pub fn scaled_protein(&self) -> f64 {
        self.meal.protein_or_zero() * self.scale_factor
    }

    /// Scaled carbohydrates (grams) for this assignment
    #[must_use]
    pub fn scaled_carbs(&self) -> f64 {
        self.meal.carbs_or_zero() * self.scale_factor
    }

    /// Scaled fat (grams) for this assignment
    #[must_use]
    pub fn scaled_fat(&self) -> f64 {
        self.meal.fat_or_zero() * self.scale_factor
    }
}
