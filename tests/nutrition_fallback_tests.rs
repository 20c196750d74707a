//! # Nutrition Fallback Table Tests

use journal_assistant::nutrition::fallback::{fallback_totals, find_food, FALLBACK_FOODS};
use journal_assistant::nutrition::normalize::normalize_query;
use journal_assistant::NutritionTotals;

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(kcal: i64, protein_g: f64, fat_g: f64, carbs_g: f64) -> NutritionTotals {
        NutritionTotals {
            kcal,
            protein_g,
            fat_g,
            carbs_g,
        }
    }

    #[test]
    fn test_piece_count_and_grams_agree_for_eggs() {
        let by_count = fallback_totals("2 eggs");
        let by_weight = fallback_totals("100 g eggs");
        assert_eq!(by_count, totals(143, 13.0, 10.0, 1.1));
        assert_eq!(by_count, by_weight);
    }

    #[test]
    fn test_aliases_share_one_record() {
        assert_eq!(fallback_totals("2 яйца"), fallback_totals("2 eggs"));
        assert_eq!(fallback_totals("100 г гречки"), totals(343, 13.3, 3.4, 71.5));
        assert_eq!(fallback_totals("100 g buckwheat"), totals(343, 13.3, 3.4, 71.5));
    }

    #[test]
    fn test_unit_forms() {
        assert_eq!(fallback_totals("200 г курицы"), totals(380, 58.0, 14.0, 0.0));
        assert_eq!(fallback_totals("200г курицы"), totals(380, 58.0, 14.0, 0.0));
        assert_eq!(fallback_totals("200 ml milk"), totals(120, 6.4, 6.4, 9.4));
        assert_eq!(fallback_totals("200мл молока"), totals(120, 6.4, 6.4, 9.4));
    }

    #[test]
    fn test_decimal_comma_quantity() {
        assert_eq!(fallback_totals("0,5 banana"), fallback_totals("0.5 banana"));
        assert_eq!(fallback_totals("0.5 banana").kcal, 53);
    }

    #[test]
    fn test_bare_mention_counts_one_piece() {
        // One banana is 120 g
        assert_eq!(fallback_totals("banana"), totals(107, 1.3, 0.4, 27.6));
        // Foods without a piece weight contribute nothing when unquantified
        assert_eq!(fallback_totals("milk"), NutritionTotals::default());
    }

    #[test]
    fn test_count_without_piece_weight_reads_as_grams() {
        assert_eq!(fallback_totals("100 peanuts"), totals(567, 26.0, 49.0, 16.0));
    }

    #[test]
    fn test_multiple_foods_sum() {
        let text = normalize_query("2 яйца; 200 г курицы");
        assert_eq!(text, "2 eggs, 200 g курицы");
        assert_eq!(fallback_totals(&text), totals(523, 71.0, 24.0, 1.1));
    }

    #[test]
    fn test_unknown_text_is_all_zero() {
        let result = fallback_totals("pizza and coke");
        assert!(result.is_all_zero());
        assert!(fallback_totals("").is_all_zero());
    }

    #[test]
    fn test_table_contents() {
        assert_eq!(FALLBACK_FOODS.len(), 12);
        let egg = find_food("egg").unwrap();
        assert_eq!(egg.piece_grams, Some(50));
        assert_eq!(find_food("банан").unwrap().piece_grams, Some(120));
        assert_eq!(find_food("milk").unwrap().piece_grams, None);
    }
}
