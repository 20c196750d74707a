//! Query normalization for nutrition lookups
//!
//! Rewrites a free-text meal description into a canonical query string:
//!
//! 1. a space between a digit and a following letter (`200г` -> `200 г`)
//! 2. Cyrillic units to metric abbreviations (`мл` -> `ml`, `г`/`гр` -> `g`)
//! 3. separator cleanup: newlines and semicolons become commas, decimal
//!    commas become dots, comma runs collapse into a single `", "`,
//!    whitespace collapses and the ends are trimmed
//! 4. when Cyrillic is present, common food names are translated to English
//!    (longest name first, whole words, case-insensitive), then separators
//!    are cleaned once more
//!
//! Normalization is idempotent: `normalize_query(normalize_query(x)) == normalize_query(x)`.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::cmp::Reverse;

/// Cyrillic food names translated before querying the API
pub const FOOD_NAME_TRANSLATIONS: &[(&str, &str)] = &[
    ("молоко", "milk"),
    ("банан", "banana"),
    ("арахис", "peanuts"),
    ("арахіс", "peanuts"),
    ("гречка", "buckwheat"),
    ("рис", "rice"),
    ("курица", "chicken"),
    ("курка", "chicken"),
    ("яйцо", "egg"),
    ("яйца", "eggs"),
    ("хлеб", "bread"),
    ("хліб", "bread"),
    ("сыр", "cheese"),
    ("сир", "cheese"),
    ("творог", "cottage cheese"),
    ("йогурт", "yogurt"),
    ("овсянка", "oatmeal"),
    ("сырник", "cottage cheese pancake"),
    ("сырники", "cottage cheese pancakes"),
];

lazy_static! {
    static ref DIGIT_LETTER: Regex =
        Regex::new(r"(\d)([A-Za-zА-Яа-яЁёІіЇїЄє])").expect("digit-letter pattern should be valid");
    static ref UNIT_ML: Regex =
        Regex::new(r"(?i)(\d)\s*мл\b").expect("ml unit pattern should be valid");
    static ref UNIT_G: Regex =
        Regex::new(r"(?i)(\d)\s*(?:г|гр)\b").expect("gram unit pattern should be valid");
    static ref DECIMAL_COMMA: Regex =
        Regex::new(r"(\d),(\d)").expect("decimal comma pattern should be valid");
    static ref COMMA_RUN: Regex =
        Regex::new(r"\s*,(?:\s*,)*\s*").expect("comma run pattern should be valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern should be valid");
    static ref CYRILLIC: Regex =
        Regex::new(r"[А-Яа-яЁёІіЇїЄє]").expect("cyrillic pattern should be valid");
    static ref FOOD_NAME_RULES: Vec<(Regex, &'static str)> = {
        let mut pairs: Vec<(&str, &str)> = FOOD_NAME_TRANSLATIONS.to_vec();
        // Longest name first so "сырники" wins over "сырник"
        pairs.sort_by_key(|(name, _)| Reverse(name.chars().count()));
        pairs
            .into_iter()
            .map(|(name, english)| {
                let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name)))
                    .expect("food name pattern should be valid");
                (regex, english)
            })
            .collect()
    };
}

/// Normalize a meal description into the canonical query string
///
/// ```rust
/// use journal_assistant::nutrition::normalize::normalize_query;
///
/// assert_eq!(normalize_query("200г курица;\n250мл молоко"), "200 g chicken, 250 ml milk");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    let s = DIGIT_LETTER.replace_all(s, "${1} ${2}");
    let s = normalize_units(&s);
    let mut s = cleanup_separators(&s);

    if has_cyrillic(&s) {
        s = translate_food_names(&s);
        s = cleanup_separators(&s);
    }
    s
}

/// Cache key for a raw query: the lower-cased normalized form
pub fn cache_key(raw: &str) -> String {
    let normalized = normalize_query(raw);
    if normalized.is_empty() {
        raw.trim().to_lowercase()
    } else {
        normalized.to_lowercase()
    }
}

pub fn has_cyrillic(s: &str) -> bool {
    CYRILLIC.is_match(s)
}

fn normalize_units(s: &str) -> String {
    let s = UNIT_ML.replace_all(s, "${1} ml");
    UNIT_G.replace_all(&s, "${1} g").into_owned()
}

fn cleanup_separators(s: &str) -> String {
    let mut s = s.replace(['\n', '\r', ';'], ",");
    // Repeat until stable: "1,2,3" shares a digit between two matches
    while DECIMAL_COMMA.is_match(&s) {
        s = DECIMAL_COMMA.replace_all(&s, "${1}.${2}").into_owned();
    }
    let s = COMMA_RUN.replace_all(&s, ", ");
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn translate_food_names(s: &str) -> String {
    FOOD_NAME_RULES
        .iter()
        .fold(s.to_string(), |acc, (regex, english)| {
            regex.replace_all(&acc, NoExpand(english)).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_rules_sorted_longest_first() {
        let lengths: Vec<usize> = FOOD_NAME_RULES
            .iter()
            .map(|(regex, _)| regex.as_str().chars().count())
            .collect();
        let mut sorted = lengths.clone();
        sorted.sort_by_key(|len| Reverse(*len));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn test_cleanup_separators() {
        assert_eq!(cleanup_separators("a ;; b\n\nc"), "a, b, c");
        assert_eq!(cleanup_separators("  a ,  ,b  "), "a, b");
        assert_eq!(cleanup_separators(", a,"), "a");
        assert_eq!(cleanup_separators("1,5 l"), "1.5 l");
    }

    #[test]
    fn test_units_need_a_preceding_digit() {
        assert_eq!(normalize_units("200 г"), "200 g");
        assert_eq!(normalize_units("200гр"), "200 g");
        assert_eq!(normalize_units("250 МЛ"), "250 ml");
        // "грамм" is a word of its own, not the "г" unit
        assert_eq!(normalize_units("200 грамм"), "200 грамм");
        assert_eq!(normalize_units("г"), "г");
    }
}
