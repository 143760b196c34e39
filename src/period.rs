//! Month, season and date-range recognition.
//!
//! Three grammars live here, matching three shapes seen in the data:
//!   "Jul-Aug"          anchored month-or-season range at line start
//!   "Autumn"           anchored single token
//!   "June 29-July2"    free-form day range anchored at line end
//!
//! "Sept" is accepted only by the free-form grammar; the anchored
//! patterns use `Sep(?:tember)?`, which a trailing `\b` stops from
//! matching the four-letter form. Lines that spell "Sept" only do so in
//! trailing date text.

use regex::Regex;
use std::sync::LazyLock;

pub(crate) const MONTH_CORE: &str = "Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";
pub(crate) const SEASON_CORE: &str = "Winter|Spring|Summer|Fall|Autumn";

// Longest-first so "September" is not split as "Sep" + "tember".
const FREE_FORM_MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

static RE_MONTH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:{MONTH_CORE})\b")).unwrap());

static RE_SEASON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:{SEASON_CORE})\b")).unwrap());

static RE_SINGLE_AT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{MONTH_CORE}|{SEASON_CORE})\b")).unwrap()
});

static RE_RANGE_AT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{MONTH_CORE}|{SEASON_CORE})\s*-\s*(?:{MONTH_CORE}|{SEASON_CORE})\b"
    ))
    .unwrap()
});

// "July 1-30", "June 29-July2", "Sept 5", "Jun-Aug", "March", all
// anchored at the end of the text they trail.
static RE_FREE_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?xi)
        (?P<first_month>(?:{FREE_FORM_MONTHS}))
        (?:
            (?:
                \s+
                (?P<first_day>\d+)
                (?:
                    -
                    (?:(?P<second_month_with_day>(?:{FREE_FORM_MONTHS}))\s*)?
                    (?P<second_day>\d+)
                )?
            )|
            (?:
                -
                (?P<second_month_only>(?:{FREE_FORM_MONTHS}))
            )
        )?
        $"
    ))
    .unwrap()
});

/// Month or season token(s) at the start of `text`. Ranges win over
/// single tokens so "Jul-Aug" is not truncated to "Jul".
pub fn month_or_range(text: &str) -> Option<String> {
    if let Some(m) = RE_RANGE_AT_START.find(text) {
        return Some(m.as_str().trim().to_string());
    }
    RE_SINGLE_AT_START
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

pub fn contains_month_or_season(text: &str) -> bool {
    RE_MONTH_WORD.is_match(text) || RE_SEASON_WORD.is_match(text)
}

pub fn contains_month(text: &str) -> bool {
    RE_MONTH_WORD.is_match(text)
}

/// First month word anywhere in `text`, falling back to the first
/// season word. Months take priority regardless of position.
pub fn find_month_or_season_match(text: &str) -> Option<regex::Match<'_>> {
    RE_MONTH_WORD
        .find(text)
        .or_else(|| RE_SEASON_WORD.find(text))
}

/// Free-form date fragment anchored at the end of a larger string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeFormDate {
    pub first_month: String,
    pub first_day: Option<String>,
    pub second_month_with_day: Option<String>,
    pub second_month_only: Option<String>,
    pub second_day: Option<String>,
}

/// Last free-form date in `text`, if any.
pub fn free_form(text: &str) -> Option<FreeFormDate> {
    let caps = RE_FREE_FORM.captures_iter(text).last()?;
    let get = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    Some(FreeFormDate {
        first_month: caps.name("first_month")?.as_str().to_string(),
        first_day: get("first_day"),
        second_month_with_day: get("second_month_with_day"),
        second_month_only: get("second_month_only"),
        second_day: get("second_day"),
    })
}

// ── Month numbering ────────────────────────────────────────────────

static MONTH_NUMBERS: &[(&str, &str, u32)] = &[
    ("Jan", "January", 1),
    ("Feb", "February", 2),
    ("Mar", "March", 3),
    ("Apr", "April", 4),
    ("May", "May", 5),
    ("Jun", "June", 6),
    ("Jul", "July", 7),
    ("Aug", "August", 8),
    ("Sep", "September", 9),
    ("Oct", "October", 10),
    ("Nov", "November", 11),
    ("Dec", "December", 12),
];

/// Zero-padded month number for a month name, short or long form.
/// "Sept" is accepted as an alias of "Sep".
pub fn month_number(name: &str) -> Option<&'static str> {
    const PADDED: [&str; 12] = [
        "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
    ];
    let name = if name == "Sept" { "Sep" } else { name };
    MONTH_NUMBERS
        .iter()
        .find(|(short, long, _)| name == *short || name == *long)
        .map(|&(_, _, n)| PADDED[(n - 1) as usize])
}

/// Like `month_number` but passes non-month tokens through unchanged,
/// for text that may already carry a numeric month.
pub fn month_token_number(token: &str) -> String {
    month_number(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string())
}

/// Two-digit day-of-month.
pub fn pad_day(day: &str) -> String {
    format!("{:0>2}", day)
}

fn month_ord(name: &str) -> Option<u32> {
    MONTH_NUMBERS
        .iter()
        .find(|(short, long, _)| name == *short || name == *long)
        .map(|&(_, _, n)| n)
}

/// Season windows as (first month, last month); Winter wraps the year.
static SEASONS: &[(&str, (u32, u32))] = &[
    ("Spring", (3, 5)),
    ("Summer", (6, 8)),
    ("Autumn", (9, 11)),
    ("Fall", (9, 11)),
    ("Winter", (12, 2)),
];

fn season_window(name: &str) -> Option<(u32, u32)> {
    SEASONS.iter().find(|(s, _)| *s == name).map(|&(_, w)| w)
}

fn season_range(text: &str) -> (Option<u32>, Option<u32>) {
    match text.split_once('-') {
        Some((a, b)) => match (season_window(a), season_window(b)) {
            (Some(start), Some(end)) => (Some(start.0), Some(end.1)),
            _ => (None, None),
        },
        None => match season_window(text) {
            Some((a, b)) => (Some(a), Some(b)),
            None => (None, None),
        },
    }
}

fn month_range(text: &str) -> (Option<u32>, Option<u32>) {
    match text.split_once('-') {
        Some((a, b)) => (month_ord(a), month_ord(b)),
        None => (month_ord(text), None),
    }
}

/// Expand a parsed entry's date fields into ISO start/end dates.
///
/// Priority: a year range covers whole years; an explicit `MM/DD` pair
/// stays in the entry's year; a month or season token becomes a window
/// (end day pinned to 28, end year bumped when the window wraps, as
/// Winter does); otherwise the full year.
pub fn expand_dates(
    year: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
    month: Option<&str>,
) -> Option<(String, Option<String>)> {
    let (start_year, end_year) = match year.split_once('-') {
        Some((a, b)) => (a.trim().parse::<i32>().ok()?, b.trim().parse::<i32>().ok()),
        None => (year.trim().parse::<i32>().ok()?, None),
    };

    if let Some(end_year) = end_year {
        return Some((
            format!("{start_year}-01-01"),
            Some(format!("{end_year}-12-31")),
        ));
    }

    if let (Some(start), Some(end)) = (start_date, end_date) {
        let split = |s: &str| -> Option<(u32, u32)> {
            let (m, d) = s.split_once('/')?;
            Some((m.parse().ok()?, d.parse().ok()?))
        };
        if let (Some((sm, sd)), Some((em, ed))) = (split(start), split(end)) {
            return Some((
                format!("{start_year}-{sm:02}-{sd:02}"),
                Some(format!("{start_year}-{em:02}-{ed:02}")),
            ));
        }
    }

    if let Some(month) = month {
        let is_season = month
            .split('-')
            .all(|part| season_window(part).is_some());
        let (start_month, end_month) = if is_season {
            season_range(month)
        } else {
            month_range(month)
        };
        if let Some(start_month) = start_month {
            let start = format!("{start_year}-{start_month:02}-01");
            let end = end_month.map(|end_month| {
                let end_year = if end_month < start_month {
                    start_year + 1
                } else {
                    start_year
                };
                format!("{end_year}-{end_month:02}-28")
            });
            return Some((start, end));
        }
    }

    Some((
        format!("{start_year}-01-01"),
        Some(format!("{start_year}-12-31")),
    ))
}

// ── Tests ──────────────────────────────────────────────────────────
