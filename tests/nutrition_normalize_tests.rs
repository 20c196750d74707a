//! # Nutrition Query Normalization Tests

use journal_assistant::nutrition::normalize::{cache_key, has_cyrillic, normalize_query};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_letter_spacing_and_units() {
        assert_eq!(normalize_query("200г курицы"), "200 g курицы");
        assert_eq!(normalize_query("250мл молоко"), "250 ml milk");
        assert_eq!(normalize_query("40 ГР сыр"), "40 g cheese");
        assert_eq!(normalize_query("2eggs"), "2 eggs");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(
            normalize_query("  2 eggs;\n\n100 g rice ,, 1 banana  "),
            "2 eggs, 100 g rice, 1 banana"
        );
        assert_eq!(normalize_query("1,5 l milk"), "1.5 l milk");
    }

    #[test]
    fn test_cyrillic_food_names_translated() {
        assert_eq!(normalize_query("Молоко, банан, арахіс"), "milk, banana, peanuts");
        assert_eq!(normalize_query("2 яйца; хліб"), "2 eggs, bread");
        // Longest name first: the plural is not split into "pancake" + "и"
        assert_eq!(
            normalize_query("2 сырники"),
            "2 cottage cheese pancakes"
        );
        // Whole words only: inflected forms stay as they are
        assert_eq!(normalize_query("100 г курицей"), "100 g курицей");
    }

    #[test]
    fn test_latin_text_skips_translation() {
        assert!(!has_cyrillic("200 g chicken"));
        assert_eq!(normalize_query("200 g chicken"), "200 g chicken");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_query(""), "");
        assert_eq!(normalize_query("  \n "), "");
        assert_eq!(normalize_query(" ; , "), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = [
            "200г курица;\n250мл молоко",
            "2 яйца, 1 банан",
            "  1,5 l milk ;; 2eggs ",
            "сырники 2шт",
            "100 g rice, 1 apple",
            "Творог 5%, 200гр",
        ];
        for sample in samples {
            let once = normalize_query(sample);
            assert_eq!(normalize_query(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        assert_eq!(cache_key("2 ЯЙЦА"), cache_key("2 яйца"));
        assert_eq!(cache_key("200г Курица"), "200 g chicken");
        assert_eq!(cache_key(" ; "), ";");
        // Decimal commas share a key with the dotted form
        assert_eq!(cache_key("1,5 L Milk"), "1.5 l milk");
        assert_eq!(cache_key("1,5 l milk"), cache_key("1.5 l milk"));
    }
}
