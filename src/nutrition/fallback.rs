//! Built-in per-100g nutrition table used when the live lookup is unavailable
//!
//! Each record merges the Russian, Ukrainian and English spellings of one
//! food, so a text mentioning "eggs" and "яйца" counts one record twice
//! rather than two records once each.

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Reverse;
use tracing::trace;

use super::{MacroSum, NutritionTotals};

/// One food record of the fallback table
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackFoodEntry {
    /// Canonical English name
    pub name: &'static str,
    /// Lower-case substrings that identify the food in text
    pub aliases: &'static [&'static str],
    pub kcal_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    pub carbs_per_100g: f64,
    /// Typical weight of one piece, for counts without a unit
    pub piece_grams: Option<u32>,
}

impl FallbackFoodEntry {
    /// Macro contribution of `grams` of this food
    pub fn macros_for(&self, grams: f64) -> MacroSum {
        MacroSum {
            calories: self.kcal_per_100g,
            protein_g: self.protein_per_100g,
            fat_g: self.fat_per_100g,
            carbs_g: self.carbs_per_100g,
        }
        .scaled(grams / 100.0)
    }

    fn mentioned_in(&self, text: &str) -> bool {
        self.aliases.iter().any(|alias| text.contains(alias))
    }
}

const fn entry(
    name: &'static str,
    aliases: &'static [&'static str],
    per_100g: [f64; 4],
    piece_grams: Option<u32>,
) -> FallbackFoodEntry {
    FallbackFoodEntry {
        name,
        aliases,
        kcal_per_100g: per_100g[0],
        protein_per_100g: per_100g[1],
        fat_per_100g: per_100g[2],
        carbs_per_100g: per_100g[3],
        piece_grams,
    }
}

/// The fallback table: kcal, protein, fat, carbs per 100 g
pub const FALLBACK_FOODS: &[FallbackFoodEntry] = &[
    entry("milk", &["молок", "milk"], [60.0, 3.2, 3.2, 4.7], None),
    entry("banana", &["банан", "banana"], [89.0, 1.1, 0.3, 23.0], Some(120)),
    entry(
        "peanuts",
        &["арахис", "арахіс", "peanuts", "peanut"],
        [567.0, 26.0, 49.0, 16.0],
        None,
    ),
    entry(
        "buckwheat",
        &["гречк", "греч", "buckwheat"],
        [343.0, 13.3, 3.4, 71.5],
        None,
    ),
    entry("egg", &["eggs", "egg", "яйц"], [143.0, 13.0, 10.0, 1.1], Some(50)),
    entry("bread", &["хлеб", "хліб", "bread"], [250.0, 9.0, 3.0, 49.0], Some(30)),
    entry("cheese", &["cheese", "сыр", "сир"], [350.0, 26.0, 27.0, 3.0], Some(30)),
    entry("sausage", &["сосиск", "sausage"], [300.0, 12.0, 27.0, 2.0], Some(50)),
    entry(
        "chicken",
        &["chicken", "куриц", "курк"],
        [190.0, 29.0, 7.0, 0.0],
        Some(80),
    ),
    entry("pork", &["свинин"], [260.0, 26.0, 18.0, 0.0], None),
    entry("shashlik", &["шашлык"], [250.0, 22.0, 18.0, 0.0], None),
    entry("meat", &["мяс"], [230.0, 23.0, 15.0, 0.0], None),
];

struct QuantityRule {
    food: &'static FallbackFoodEntry,
    regex: Regex,
}

lazy_static! {
    static ref QUANTITY_RULES: Vec<QuantityRule> = FALLBACK_FOODS
        .iter()
        .map(|food| {
            let mut aliases: Vec<&str> = food.aliases.to_vec();
            aliases.sort_by_key(|alias| Reverse(alias.chars().count()));
            let names = aliases
                .iter()
                .map(|alias| regex::escape(alias))
                .collect::<Vec<_>>()
                .join("|");
            let source = format!(r"(\d+(?:[.,]\d+)?)\s*(гр|г|g|ml|мл)?\s*(?:{names})");
            QuantityRule {
                food,
                regex: Regex::new(&source).expect("fallback quantity pattern should be valid"),
            }
        })
        .collect();
}

/// Look up the fallback record whose aliases include `alias`
pub fn find_food(alias: &str) -> Option<&'static FallbackFoodEntry> {
    let alias = alias.to_lowercase();
    FALLBACK_FOODS
        .iter()
        .find(|food| food.aliases.contains(&alias.as_str()))
}

/// Unrounded sum of every recognized `<quantity><unit>? <food>` occurrence
///
/// `text` is expected to be lower-cased. Without a unit the quantity counts
/// pieces when the food has a piece weight, otherwise grams. A food that is
/// mentioned but never quantified counts as one piece.
pub fn fallback_sum(text: &str) -> MacroSum {
    let mut total = MacroSum::default();

    for rule in QUANTITY_RULES.iter() {
        let mut quantified = false;

        for captures in rule.regex.captures_iter(text) {
            let Some(quantity) = captures
                .get(1)
                .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
            else {
                continue;
            };
            quantified = true;

            let grams = match (captures.get(2), rule.food.piece_grams) {
                (Some(_), _) => quantity,
                (None, Some(piece)) => quantity * f64::from(piece),
                (None, None) => quantity,
            };
            trace!(food = rule.food.name, grams, "Fallback quantity matched");
            total += rule.food.macros_for(grams);
        }

        if !quantified {
            if let Some(piece) = rule.food.piece_grams {
                if rule.food.mentioned_in(text) {
                    trace!(food = rule.food.name, grams = piece, "Fallback assumed one piece");
                    total += rule.food.macros_for(f64::from(piece));
                }
            }
        }
    }

    total
}

/// Fallback totals for a meal description, rounded for display
///
/// ```rust
/// use journal_assistant::nutrition::fallback::fallback_totals;
///
/// let totals = fallback_totals("2 eggs");
/// assert_eq!(totals.kcal, 143);
/// assert_eq!(totals.protein_g, 13.0);
/// ```
pub fn fallback_totals(text: &str) -> NutritionTotals {
    fallback_sum(&text.to_lowercase()).rounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_record_has_aliases_and_a_rule() {
        assert_eq!(QUANTITY_RULES.len(), FALLBACK_FOODS.len());
        for food in FALLBACK_FOODS {
            assert!(!food.aliases.is_empty(), "{} has no aliases", food.name);
            for alias in food.aliases {
                assert_eq!(*alias, alias.to_lowercase());
            }
        }
    }

    #[test]
    fn test_find_food_by_any_alias() {
        assert_eq!(find_food("яйц").map(|f| f.name), Some("egg"));
        assert_eq!(find_food("EGGS").map(|f| f.name), Some("egg"));
        assert_eq!(find_food("хліб").map(|f| f.name), Some("bread"));
        assert!(find_food("pizza").is_none());
    }

    #[test]
    fn test_macros_for_scales_per_100g() {
        let milk = find_food("milk").unwrap();
        let sum = milk.macros_for(200.0);
        assert!((sum.calories - 120.0).abs() < 1e-9);
        assert!((sum.protein_g - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_longer_alias_wins_within_record() {
        // "eggs" must not be read as "egg" plus a stray "s"
        let sum = fallback_sum("3 eggs");
        assert!((sum.calories - 143.0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_unquantified_food_without_piece_weight_is_ignored() {
        let sum = fallback_sum("milk");
        assert_eq!(sum, MacroSum::default());
    }
}
