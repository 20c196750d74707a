//! UI Builder module for formatting bot replies

use crate::localization::{t_args_lang, t_lang, LocalizationManager};
use crate::nutrition::NutritionTotals;
use crate::reminder_phrase::ReminderPhrase;

/// Format nutrition totals as "kcal / P / F / C"
pub fn format_nutrition_totals(
    localization: &LocalizationManager,
    totals: &NutritionTotals,
    language_code: Option<&str>,
) -> String {
    let kcal = totals.kcal.to_string();
    let protein = format!("{:.1}", totals.protein_g);
    let fat = format!("{:.1}", totals.fat_g);
    let carbs = format!("{:.1}", totals.carbs_g);

    t_args_lang(
        localization,
        "calories-result",
        &[
            ("kcal", kcal.as_str()),
            ("p", protein.as_str()),
            ("f", fat.as_str()),
            ("c", carbs.as_str()),
        ],
        language_code,
    )
}

/// Confirmation echoing a recognized reminder request
pub fn format_reminder_confirmation(
    localization: &LocalizationManager,
    phrase: &ReminderPhrase,
    language_code: Option<&str>,
) -> String {
    t_args_lang(
        localization,
        "reminder-confirm",
        &[("what", phrase.what.as_str()), ("when", phrase.when.as_str())],
        language_code,
    )
}

pub fn format_welcome_message(
    localization: &LocalizationManager,
    language_code: Option<&str>,
) -> String {
    format!(
        "👋 {}\n\n{}\n\n{}\n{}\n{}\n{}\n\n{}",
        t_lang(localization, "welcome-title", language_code),
        t_lang(localization, "welcome-description", language_code),
        t_lang(localization, "welcome-commands", language_code),
        t_lang(localization, "welcome-calories", language_code),
        t_lang(localization, "welcome-kcal", language_code),
        t_lang(localization, "welcome-help", language_code),
        t_lang(localization, "welcome-reminder", language_code)
    )
}

pub fn format_help_message(
    localization: &LocalizationManager,
    language_code: Option<&str>,
) -> String {
    [
        "help-title",
        "help-calories",
        "help-units",
        "help-reminders",
    ]
    .iter()
    .map(|key| t_lang(localization, key, language_code))
    .collect::<Vec<_>>()
    .join("\n\n")
}
