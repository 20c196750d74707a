//! # Reminder Phrase Module
//!
//! Recognizes "remind me to X at/on/in Y" requests written in Russian,
//! Ukrainian or English and splits them into a task (`what`) and a time
//! expression (`when`).
//!
//! ## Pattern table
//!
//! Recognition runs over an ordered table of regular expressions. Patterns
//! are tried in priority order and the first acceptable match wins:
//!
//! | # | Kind | Shape |
//! |---|------|-------|
//! | 1 | [`PatternKind::General`] | verb + WHAT + `в/о/через/at/on/in` + WHEN |
//! | 2 | [`PatternKind::DurationFirst`] | verb + `через/in` + WHEN + WHAT |
//! | 3 | [`PatternKind::RelativeDay`] | verb + WHAT + today/tomorrow/day after [+ time] |
//! | 4 | [`PatternKind::ScheduleFirst`] | verb + today/tomorrow/next X/on X/weekdays/daily [at T] + WHAT |
//! | 5 | [`PatternKind::Recurring`] | verb + WHAT + every/каждый/щодня/weekdays/daily [+ time] |
//! | 6 | [`PatternKind::Weekday`] | verb + WHAT + weekday name or "weekdays" [+ time] |
//!
//! Every pattern accepts an optional politeness prefix ("please",
//! "пожалуйста", "будь ласка") before the trigger verb. Matching is
//! case-insensitive and Unicode-aware, and it is a search: noise before the
//! trigger verb is ignored.
//!
//! ## Acceptance
//!
//! A regex match becomes a result only after both groups survive
//! [`strip_quotes_punct`] non-empty. Two further rules keep the general
//! pattern from swallowing phrasing that a later pattern splits better:
//!
//! - a WHAT that is only a leftover of the trigger ("me", "to") or a bare
//!   preposition ("в", "at") is rejected;
//! - a general-pattern WHAT that still carries a schedule word ("tomorrow",
//!   "weekdays", "четверг", ...) is held back while the later patterns are
//!   tried, and returned only if none of them matches.
//!
//! Parsing never fails; "not a reminder" is `None`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A recognized reminder request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPhrase {
    /// The task to be reminded about
    pub what: String,
    /// The time expression, left unparsed for the scheduler
    pub when: String,
}

/// Which entry of the pattern table produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    General,
    DurationFirst,
    RelativeDay,
    ScheduleFirst,
    Recurring,
    Weekday,
}

/// Characters accepted as quotes around WHAT/WHEN
pub const QUOTE_CHARS: [char; 6] = ['"', '\'', '“', '”', '«', '»'];

const TRAILING_PUNCT: [char; 6] = ['.', '!', '?', ',', ';', ' '];

// Trigger verb with optional politeness prefix
const VERB: &str = r"(?:please\s+|пожалуйста\s+|будь\s+ласка\s+)?(?:напомни(?:ть)?|поставь\s+напоминание|нагадай|нагадати|remind(?:\s+me)?(?:\s+to)?)";

// Optional opening quote, quote-free body, optional closing quote
const QUOTED_LAZY: &str = r#"["'“”«»]?[^"'“”«»]+?["'“”«»]?"#;
const QUOTED_GREEDY: &str = r#"["'“”«»]?[^"'“”«»]+["'“”«»]?"#;

const WEEKDAYS: &str = r"понедельник|вторник|среда|среду|четверг|пятница|пятницу|суббота|субботу|воскресенье|понеділок|вівторок|середа|середу|четвер|пʼятниця|п'ятниця|пʼятницю|п'ятницю|субота|суботу|неділя|неділю|monday|tuesday|wednesday|thursday|friday|saturday|sunday";

struct ReminderPattern {
    kind: PatternKind,
    regex: Regex,
    /// Hold the match back when WHAT still contains a schedule word
    defers_on_schedule_word: bool,
}

fn build_patterns() -> Vec<ReminderPattern> {
    let sources: [(PatternKind, String, bool); 6] = [
        (
            PatternKind::General,
            format!(r"(?i){VERB}\s+(?P<what>{QUOTED_LAZY})\s+(?:в|о|через|at|on|in)\s+(?P<when>.+)"),
            true,
        ),
        (
            PatternKind::DurationFirst,
            format!(
                r#"(?i){VERB}\s+(?:через|in)\s+(?P<when>(?:\d+(?:[.,]\d+)?\s*|(?:an?|one|a\s+few|пару|несколько|кілька)\s+)?[^"'“”«»\s]+)\s+(?:to\s+)?(?P<what>{QUOTED_GREEDY})"#
            ),
            false,
        ),
        (
            PatternKind::RelativeDay,
            format!(
                r"(?i){VERB}\s+(?P<what>{QUOTED_LAZY})\s+(?P<when>(?:сегодня|завтра|послезавтра|сьогодні|післязавтра|today|tomorrow|(?:the\s+)?day\s+after\s+tomorrow)(?:\s+(?:в|о|at)\s+.+)?)"
            ),
            false,
        ),
        (
            PatternKind::ScheduleFirst,
            format!(
                r#"(?i){VERB}\s+(?P<when>(?:today|tomorrow|next\s+\w+|on\s+\w+(?:day)?|weekdays|daily)(?:\s+at\s+[^"'“”«»]+?)?)\s+(?:to\s+)?(?P<what>{QUOTED_GREEDY})"#
            ),
            false,
        ),
        (
            PatternKind::Recurring,
            format!(
                r"(?i){VERB}\s+(?P<what>{QUOTED_LAZY})\s+(?P<when>(?:кажд\w+|щодня|щотижня|щос\w+|every|weekdays|daily)(?:\s+(?:в|о|at)\s+.+)?)"
            ),
            false,
        ),
        (
            PatternKind::Weekday,
            format!(
                r"(?i){VERB}\s+(?P<what>{QUOTED_LAZY})\s+(?P<when>(?:по\s+будням|будням|weekdays|{WEEKDAYS})(?:\s+(?:в|о|at)\s+.+)?)"
            ),
            false,
        ),
    ];

    sources
        .into_iter()
        .map(|(kind, source, defers_on_schedule_word)| ReminderPattern {
            kind,
            regex: Regex::new(&source).expect("reminder pattern should be valid"),
            defers_on_schedule_word,
        })
        .collect()
}

lazy_static! {
    static ref PATTERNS: Vec<ReminderPattern> = build_patterns();
    static ref SCHEDULE_WORD: Regex = Regex::new(&format!(
        r"(?i)\b(?:today|tomorrow|every|daily|weekdays|сегодня|завтра|послезавтра|сьогодні|післязавтра|кажд\w*|щодня|щотижня|щос\w+|будням|{WEEKDAYS})\b"
    ))
    .expect("schedule word pattern should be valid");
    static ref TRIGGER_LEFTOVER: Regex =
        Regex::new(r"(?i)^(?:me|to|me\s+to|в|о|на|через|at|on|in)$")
            .expect("trigger leftover pattern should be valid");
}

/// Strip one layer of surrounding quotes, then trailing punctuation and leading whitespace
///
/// ```rust
/// use journal_assistant::reminder_phrase::strip_quotes_punct;
///
/// assert_eq!(strip_quotes_punct("«звіт»"), "звіт");
/// assert_eq!(strip_quotes_punct("  18:30!! "), "18:30");
/// ```
pub fn strip_quotes_punct(value: &str) -> String {
    let mut s = value.trim();
    let mut chars = s.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if QUOTE_CHARS.contains(&first) && QUOTE_CHARS.contains(&last) {
            s = s[first.len_utf8()..s.len() - last.len_utf8()].trim();
        }
    }
    s.trim_end_matches(TRAILING_PUNCT).trim_start().to_string()
}

/// Parse a message into a reminder request
///
/// ```rust
/// use journal_assistant::reminder_phrase::parse_reminder_phrase;
///
/// let phrase = parse_reminder_phrase("напомни купить хлеб в 18:00").unwrap();
/// assert_eq!(phrase.what, "купить хлеб");
/// assert_eq!(phrase.when, "18:00");
///
/// assert!(parse_reminder_phrase("купить молоко").is_none());
/// ```
pub fn parse_reminder_phrase(text: &str) -> Option<ReminderPhrase> {
    classify_reminder_phrase(text).map(|(_, phrase)| phrase)
}

/// Parse a message and report which pattern recognized it
pub fn classify_reminder_phrase(text: &str) -> Option<(PatternKind, ReminderPhrase)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut deferred: Option<(PatternKind, ReminderPhrase)> = None;

    for pattern in PATTERNS.iter() {
        let Some(captures) = pattern.regex.captures(text) else {
            continue;
        };

        let what = captures
            .name("what")
            .map(|m| strip_quotes_punct(m.as_str()))
            .unwrap_or_default();
        let when = captures
            .name("when")
            .map(|m| strip_quotes_punct(m.as_str()))
            .unwrap_or_default();

        if what.is_empty() || when.is_empty() {
            trace!(kind = ?pattern.kind, "Reminder pattern matched with an empty field");
            continue;
        }

        if TRIGGER_LEFTOVER.is_match(&what) {
            trace!(kind = ?pattern.kind, what = %what, "Reminder pattern captured a trigger fragment");
            continue;
        }

        let phrase = ReminderPhrase { what, when };

        if pattern.defers_on_schedule_word && SCHEDULE_WORD.is_match(&phrase.what) {
            trace!(kind = ?pattern.kind, what = %phrase.what, "Holding back match with schedule word in task");
            if deferred.is_none() {
                deferred = Some((pattern.kind, phrase));
            }
            continue;
        }

        debug!(kind = ?pattern.kind, "Reminder phrase recognized");
        return Some((pattern.kind, phrase));
    }

    if let Some((kind, _)) = &deferred {
        debug!(kind = ?kind, "Reminder phrase recognized by held-back match");
    }
    deferred
}
