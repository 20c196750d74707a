//! # Reminder Phrase Tests
//!
//! Recognition of reminder requests across the three supported languages,
//! pattern priority, and the quote/punctuation trimming step.

use journal_assistant::reminder_phrase::{
    classify_reminder_phrase, parse_reminder_phrase, PatternKind, ReminderPhrase,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> (String, String) {
        let phrase = parse_reminder_phrase(text)
            .unwrap_or_else(|| panic!("expected a reminder in {:?}", text));
        (phrase.what, phrase.when)
    }

    fn pair(what: &str, when: &str) -> (String, String) {
        (what.to_string(), when.to_string())
    }

    #[test]
    fn test_quoted_task_with_duration() {
        assert_eq!(
            parsed("напомни \"принять таблетки\" через 2 часа"),
            pair("принять таблетки", "2 часа")
        );
    }

    #[test]
    fn test_general_pattern_in_each_language() {
        assert_eq!(parsed("напомни купить хлеб в 18:00"), pair("купить хлеб", "18:00"));
        assert_eq!(parsed("нагадай купити хліб о 18:00"), pair("купити хліб", "18:00"));
        assert_eq!(parsed("remind me to call mom at 5pm"), pair("call mom", "5pm"));
    }

    #[test]
    fn test_duration_first() {
        let (kind, phrase) = classify_reminder_phrase("remind me in 2 hours to call mom").unwrap();
        assert_eq!(kind, PatternKind::DurationFirst);
        assert_eq!(
            phrase,
            ReminderPhrase {
                what: "call mom".to_string(),
                when: "2 hours".to_string(),
            }
        );
    }

    #[test]
    fn test_relative_day() {
        let (kind, phrase) = classify_reminder_phrase("напомни позвонить маме завтра в 9").unwrap();
        assert_eq!(kind, PatternKind::RelativeDay);
        assert_eq!(phrase.what, "позвонить маме");
        assert_eq!(phrase.when, "завтра в 9");
    }

    #[test]
    fn test_relative_day_in_english() {
        let (kind, phrase) =
            classify_reminder_phrase("remind me to call mom tomorrow at 9").unwrap();
        assert_eq!(kind, PatternKind::RelativeDay);
        assert_eq!(phrase.what, "call mom");
        assert_eq!(phrase.when, "tomorrow at 9");

        assert_eq!(
            parsed("remind me to call mom tomorrow"),
            pair("call mom", "tomorrow")
        );
        assert_eq!(
            parsed("remind me to pay rent the day after tomorrow"),
            pair("pay rent", "the day after tomorrow")
        );
        assert_eq!(
            parsed("нагадай подзвонити мамі завтра о 9"),
            pair("подзвонити мамі", "завтра о 9")
        );
    }

    #[test]
    fn test_bare_preposition_is_not_a_task() {
        for text in [
            "напомни в понедельник в 9 оплатить счёт",
            "нагадай в понеділок о 9 сплатити рахунок",
        ] {
            let (kind, phrase) = classify_reminder_phrase(text).unwrap();
            assert_eq!(kind, PatternKind::General, "{}", text);
            assert_ne!(phrase.what, "в", "{}", text);
        }

        assert_eq!(
            parsed("напомни в понедельник в 9 оплатить счёт"),
            pair("в понедельник", "9 оплатить счёт")
        );
        assert_eq!(
            parsed("нагадай в понеділок о 9 сплатити рахунок"),
            pair("в понеділок", "9 сплатити рахунок")
        );
    }

    #[test]
    fn test_held_back_match_is_used_when_nothing_else_matches() {
        let (kind, phrase) = classify_reminder_phrase("напомни завтра в 9 позвонить маме").unwrap();
        assert_eq!(kind, PatternKind::General);
        assert_eq!(phrase.what, "завтра");
        assert_eq!(phrase.when, "9 позвонить маме");
    }

    #[test]
    fn test_schedule_first_with_quoted_task() {
        let (kind, phrase) = classify_reminder_phrase("remind tomorrow at 7 \"call John\"").unwrap();
        assert_eq!(kind, PatternKind::ScheduleFirst);
        assert_eq!(phrase.what, "call John");
        assert_eq!(phrase.when, "tomorrow at 7");
    }

    #[test]
    fn test_recurring() {
        let (kind, phrase) = classify_reminder_phrase("нагадай \"звіт\" щосереди о 18:30").unwrap();
        assert_eq!(kind, PatternKind::Recurring);
        assert_eq!(phrase.what, "звіт");
        assert_eq!(phrase.when, "щосереди о 18:30");

        assert_eq!(
            parsed("remind me to drink water weekdays at 10"),
            pair("drink water", "weekdays at 10")
        );
    }

    #[test]
    fn test_weekday() {
        let (kind, phrase) = classify_reminder_phrase("напомни отчёт по будням в 10").unwrap();
        assert_eq!(kind, PatternKind::Weekday);
        assert_eq!(phrase.what, "отчёт");
        assert_eq!(phrase.when, "по будням в 10");
    }

    #[test]
    fn test_politeness_prefix_and_case() {
        assert_eq!(
            parsed("Пожалуйста, НАПОМНИ купить хлеб в 18:00"),
            pair("купить хлеб", "18:00")
        );
        assert_eq!(
            parsed("будь ласка нагадай полити квіти о 8"),
            pair("полити квіти", "8")
        );
    }

    #[test]
    fn test_leading_noise_is_ignored() {
        assert_eq!(
            parsed("ок, слушай: напомни купить хлеб в 18:00"),
            pair("купить хлеб", "18:00")
        );
    }

    #[test]
    fn test_quotes_and_trailing_punctuation_stripped() {
        assert_eq!(
            parsed("напомни «оплатить интернет» в 20:00!!"),
            pair("оплатить интернет", "20:00")
        );
    }

    #[test]
    fn test_not_a_reminder() {
        assert!(parse_reminder_phrase("купить молоко").is_none());
        assert!(parse_reminder_phrase("").is_none());
        assert!(parse_reminder_phrase("   ").is_none());
        // Trigger verb without a time expression
        assert!(parse_reminder_phrase("напомни купить молоко").is_none());
    }
}
