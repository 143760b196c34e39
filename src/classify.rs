//! The ordered handler chain that turns one cleaned activity line into
//! a typed entry.
//!
//! Handlers run in a fixed order and the first one whose cue matches
//! claims the line: workers list, convention, special meeting, travel,
//! started work, photo, workers meeting, removed, guestbook, and
//! finally plain location. Each handler pulls the place fields through
//! [`resolver::resolve`] and packs the leftover text into the note.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::gazetteer::{self, COUNTRIES};
use crate::period;
use crate::resolver::{resolve, Resolution};

// ── Entry model ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "Workers List")]
    WorkersList,
    Convention,
    #[serde(rename = "Special Meeting")]
    SpecialMeeting,
    Travel,
    #[serde(rename = "Started Work")]
    StartedWork,
    Photo,
    #[serde(rename = "Workers Meeting")]
    WorkersMeeting,
    Removed,
    Guestbook,
    Location,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::WorkersList => "Workers List",
            EntryKind::Convention => "Convention",
            EntryKind::SpecialMeeting => "Special Meeting",
            EntryKind::Travel => "Travel",
            EntryKind::StartedWork => "Started Work",
            EntryKind::Photo => "Photo",
            EntryKind::WorkersMeeting => "Workers Meeting",
            EntryKind::Removed => "Removed",
            EntryKind::Guestbook => "Guestbook",
            EntryKind::Location => "Location",
        }
    }
}

/// One classified activity line. Dates are `MM/DD` within the entry's
/// year; `month` keeps the original token ("July", "Jul-Aug", "Winter").
#[derive(Debug, Clone, Serialize)]
pub struct ParsedEntry {
    pub kind: EntryKind,
    pub country: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub note: Option<String>,
    pub month: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ParsedEntry {
    fn new(kind: EntryKind) -> Self {
        ParsedEntry {
            kind,
            country: None,
            region: None,
            location: None,
            note: None,
            month: None,
            start_date: None,
            end_date: None,
        }
    }
}

fn fill_place(entry: &mut ParsedEntry, res: &Resolution) {
    if res.country.is_some() {
        entry.country = res.country.clone();
    }
    if res.region.is_some() {
        entry.region = res.region.clone();
    }
    if res.location.is_some() {
        entry.location = res.location.clone();
    }
}

// ── Shared regexes ─────────────────────────────────────────────────

static RE_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.*?)\)").unwrap());
static RE_PAREN_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// "Florida USA" → "Florida" (canonical spelling), for every US state
static RE_STATE_USA: LazyLock<Regex> = LazyLock::new(|| {
    let states = gazetteer::by_name("United States")
        .map(|c| c.regions)
        .unwrap_or_default();
    let alts = states
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alts})\s+USA\b")).unwrap()
});

static RE_QC_ATLANTIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Quebec|QC).*?Atlantic").unwrap());
static RE_OREGON_IDAHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)oregon\s*/\s*south\s+idaho\s+special\s+meeting").unwrap());
static RE_DOAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Doak.*?s").unwrap());
static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)").unwrap());

// "July 6" or bare "Oct" at the start of a line
static RE_LEADING_MONTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({})\s*\d*", period::MONTH_CORE)).unwrap()
});
static RE_MONTH_ABBREV_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)").unwrap()
});
static RE_MONTH_FULL_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(January|February|March|April|May|June|July|August|September|October|November|December)").unwrap()
});

static RE_STARTED_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\*+|\(|\s*,)?\s*Started\s+in\s+the\s+work\s*(?:\*+|\))?").unwrap()
});
static RE_WORKERS_MEETING_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[*(]?\s*Workers\s+Meeting\s*[*)]?").unwrap());
static RE_REMOVED_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)removed from.*$").unwrap());
static RE_GUESTBOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(guestbook\)|\(member guestbook\)|\(guest book entry\)").unwrap()
});

static RE_LEADING_WS_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s,]+").unwrap());
static RE_SK_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bSK\b").unwrap());
static RE_ASTERISK_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static RE_ASTERISK_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*.*?\*").unwrap());
static RE_WITH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(?:with|With|w/|w/\s+)(.+)$").unwrap());
static RE_W_WITH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:with|With|\bw/)\s*([^\s].+?(?:\s|$))").unwrap());
static RE_W_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bw/([A-Za-z]+ [A-Za-z]+)").unwrap());
// "with Judy" / "w/Judy" → "With Judy"; "w/ Judy" is left alone
static RE_WITH_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:with\b\s*|w/)([A-Z])").unwrap());
static RE_SLASH_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());

static TRAVEL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)^(?:Visiting|Visit\s+to)\s+([A-Za-z\s]+)$", "Visiting"),
        (r"(?i)^(?:Return|Returned)\s+to\s+([A-Za-z\s]+)$", "Return to"),
        (r"(?i)^Home\s+Visit\s+to\s+([A-Za-z\s]+)$", "Home Visit"),
        (
            r"(?i)^Return\s+to\s+([A-Za-z\s]+)\s+\(([^)]+)\)$",
            "Return to",
        ),
        (
            r"(?i)^([A-Za-z\s]+)\s+([A-Za-z\s]+)\s+\(Home\s+Visit\)$",
            "Home Visit",
        ),
    ]
    .iter()
    .map(|(pattern, cue)| (Regex::new(pattern).unwrap(), *cue))
    .collect()
});

// ── Note helpers ───────────────────────────────────────────────────

fn collapse_spaces(text: &str) -> String {
    RE_SPACES.replace_all(text, " ").trim().to_string()
}

fn upper_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append to a note. The bare "Workers List" header takes a colon, any
/// other non-empty note a comma.
fn add_to_note_list(current: &str, addition: &str) -> String {
    if current == "Workers List" {
        return format!("{current}: {addition}");
    }
    if current.is_empty() {
        addition.to_string()
    } else {
        format!("{current}, {addition}")
    }
}

/// Strip a leading role phrase ("to", "care of", "helping", ...) from
/// parenthesized text. Returns the phrase tag and what's left.
fn paren_text_patterns(in_parens: &str) -> (String, String) {
    let lower = in_parens.to_lowercase();
    let mut phrase = String::new();
    let mut rest = in_parens.to_string();

    if lower.starts_with("to ") {
        phrase = "to".to_string();
        rest = in_parens[3..].trim().to_string();
    }
    if rest.to_lowercase().contains("pro tem") {
        phrase = "to pro tem".to_string();
        rest = rest.replace("pro tem", "").trim().to_string();
    } else if lower.starts_with("care of") {
        phrase = "care of".to_string();
        rest = in_parens.get(8..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("helping") {
        phrase = "helping".to_string();
        rest = in_parens.get(7..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("return home") {
        phrase = "return home".to_string();
        rest = in_parens.get(11..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("return to ") {
        phrase = "return to".to_string();
        rest = in_parens.get(10..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("home visit") {
        phrase = "home visit".to_string();
        rest = in_parens.get(10..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("visiting ") {
        phrase = "visiting".to_string();
        rest = in_parens.get(8..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("home") {
        phrase = "home".to_string();
        rest = in_parens.get(4..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("field companion later") {
        phrase = "field companion later".to_string();
        rest = in_parens.get(21..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("companion later") {
        phrase = "companion later".to_string();
        rest = in_parens.get(21..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("new worker") {
        phrase = "new worker".to_string();
        rest = in_parens.get(10..).unwrap_or("").trim().to_string();
    } else if lower.starts_with("adjustments") {
        phrase = "adjustments".to_string();
        rest = in_parens.get(11..).unwrap_or("").trim().to_string();
    } else if lower.contains("and overseer") {
        phrase = "overseer".to_string();
        rest = rest.replace("and overseer", "").trim().to_string();
    }

    (phrase, rest)
}

const LABORING_PLACES: &[&str] = &[
    "West Africa",
    "Bolivia",
    "Peru",
    "Mexico",
    "Russia",
    "Ponape",
    "France",
    "Europe",
    "Ukraine",
    "Philippines",
    "Uruguay",
];

const PASS_THROUGH_NOTES: &[&str] = &[
    "Convention",
    "Address",
    "Companion Later",
    "Other Arrangements",
    "Changing Fields",
];

/// Turn a phrase-stripped paren text into (field, note, trailing text).
/// `field` is non-empty when the paren text looks like a plain place.
fn format_paren_note(phrase: &str, in_parens: &str, after: &str) -> (String, String, String) {
    let mut the_field = String::new();
    let the_note;
    let mut the_after = after.to_string();

    if !phrase.is_empty() {
        if phrase == "to pro tem" {
            the_note = format!("To {} pro tem", in_parens.trim());
        } else {
            let mut note = upper_words(phrase);
            if !in_parens.trim().is_empty() {
                note.push(' ');
                note.push_str(in_parens.trim());
            }
            the_note = note;
        }
    } else if LABORING_PLACES.iter().any(|p| in_parens.contains(p)) {
        the_note = format!("Laboring in {in_parens}");
    } else if PASS_THROUGH_NOTES.iter().any(|p| in_parens.contains(p)) {
        the_note = in_parens.to_string();
    } else if in_parens.contains("Adjustments") {
        the_note = format!("Adjustments: {in_parens}");
    } else {
        the_field = in_parens.to_string();
        the_note = in_parens.to_string();
    }

    if phrase == "overseer" && !the_after.to_lowercase().contains("overseer") {
        if the_after.is_empty() {
            the_after = "Overseer".to_string();
        } else {
            the_after.push_str(", Overseer");
        }
    }

    (the_field, the_note, the_after)
}

/// "July 6" at the start of `text` → (month token, MM/DD, match end).
fn leading_month_date(text: &str) -> Option<(String, Option<String>, usize)> {
    let caps = RE_LEADING_MONTH_DATE.captures(text)?;
    let whole = caps.get(0).unwrap();
    let month = caps[1].to_string();
    let pieces: Vec<&str> = whole.as_str().split_whitespace().collect();
    let start_date = if pieces.len() >= 2 {
        let month_num = period::month_token_number(pieces[0]);
        Some(format!("{month_num}/{}", period::pad_day(pieces[1])))
    } else {
        None
    };
    Some((month, start_date, whole.end()))
}

fn strip_state_usa(line: &str) -> String {
    let states = gazetteer::by_name("United States")
        .map(|c| c.regions)
        .unwrap_or_default();
    RE_STATE_USA
        .replace_all(line, |caps: &regex::Captures| {
            let matched = &caps[1];
            states
                .iter()
                .find(|state| state.eq_ignore_ascii_case(matched))
                .copied()
                .unwrap_or(matched)
                .to_string()
        })
        .into_owned()
}

// ── Classifier ─────────────────────────────────────────────────────

pub struct Classifier {
    home_country: String,
}

impl Classifier {
    pub fn new(home_country: &str) -> Self {
        Classifier {
            home_country: home_country.to_string(),
        }
    }

    /// Classify one normalized line. `None` means nothing recognizable
    /// was found and the caller should report the line unmatched.
    pub fn classify(&self, line: &str) -> Option<ParsedEntry> {
        self.handle_workers_list(line)
            .or_else(|| self.handle_convention(line))
            .or_else(|| self.handle_special_meeting(line))
            .or_else(|| self.handle_travel(line))
            .or_else(|| self.handle_started_work(line))
            .or_else(|| self.handle_photo(line))
            .or_else(|| self.handle_workers_meeting(line))
            .or_else(|| self.handle_removed(line))
            .or_else(|| self.handle_guestbook(line))
            .or_else(|| self.handle_location(line))
    }

    /// A line that names no country at all belongs to the subject's
    /// home field. Lines with a resolved country keep their region and
    /// location exactly as resolved.
    fn apply_home_fallback(&self, entry: &mut ParsedEntry) {
        if entry.country.is_none() {
            entry.country = Some(self.home_country.clone());
            if entry.region.is_none() {
                entry.region = entry.country.clone();
            }
            if entry.location.is_none() {
                entry.location = entry.region.clone();
            }
        }
    }

    // ── Workers list ───────────────────────────────────────────────

    fn handle_workers_list(&self, line: &str) -> Option<ParsedEntry> {
        let lower = line.to_lowercase();
        if !lower.contains("workers list")
            && (!lower.contains("staff") || lower.contains("staff photo"))
        {
            return None;
        }

        let line = workers_list_fixes(line);
        let mut entry = ParsedEntry::new(EntryKind::WorkersList);
        let mut note = "Workers List".to_string();

        let lower = line.to_lowercase();
        let (mut text_before, mut text_after) = match lower.find("workers list") {
            Some(pos) => (
                line[..pos].trim().to_string(),
                line[pos + "workers list".len()..].trim().to_string(),
            ),
            None => match lower.find("staff") {
                Some(pos) => (
                    line[..pos].trim().to_string(),
                    line[pos + "staff".len()..].trim().to_string(),
                ),
                None => (line.clone(), String::new()),
            },
        };

        if let Some(month) = period::month_or_range(&text_before) {
            text_before = text_before.replace(&month, "");
            note = add_to_note_list(&note, &format!("{month} List"));
            entry.month = Some(month);
        }

        text_after = RE_LEADING_WS_COMMA.replace(&text_after, "").into_owned();

        let mut the_location: Option<String> = None;
        if let Some(caps) = RE_PAREN.captures(&text_after.clone()) {
            let straggler = RE_PAREN_GROUP
                .replace_all(&text_after, "")
                .trim()
                .to_string();
            let mut paren_text = caps[1].trim().to_string();
            if paren_text.contains("Interlake MB") {
                paren_text = paren_text.replace("Interlake MB", "Interlake");
            }

            let (phrase, paren_text) = paren_text_patterns(&paren_text);
            let (field, note_from_parens, straggler) =
                format_paren_note(&phrase, &paren_text, &straggler);

            if !field.is_empty() {
                // slashes in a place read as comma-separated parts
                let loc = field.replace('/', ", ");
                let loc_result = resolve(&loc);
                if loc_result.location.is_some() && loc_result.line.is_empty() {
                    entry.location = loc_result.location.clone();
                    if entry.region.is_none() {
                        entry.region = loc_result.region.clone();
                    }
                    if entry.country.is_none() {
                        entry.country = loc_result.country.clone();
                    }
                } else {
                    text_after = paren_text.replace(&loc, "");
                    if !straggler.is_empty() {
                        if !straggler.contains('*') {
                            text_after.push_str(", ");
                        } else {
                            text_after.push(' ');
                        }
                        text_after.push_str(&straggler);
                    }
                }
                the_location = Some(loc);
            }

            if !note_from_parens.is_empty() {
                note = add_to_note_list(&note, &note_from_parens);
            }
            text_after = RE_PAREN_GROUP
                .replace_all(&text_after, "")
                .trim()
                .to_string();
        }

        // Plain text before any asterisked section is a companion note
        let asterisk_pos = text_after.find('*').unwrap_or(text_after.len());
        let mut text_before_asterisks = text_after[..asterisk_pos].trim().to_string();
        let cccc_text = if let Some(caps) = RE_WITH_SPLIT.captures(&text_before_asterisks) {
            let mut before = caps[1].trim().to_string();
            if let Some(stripped) = before.strip_prefix(',') {
                before = stripped.trim().to_string();
            }
            let after: String = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
            let comma = if !before.is_empty() && !before.ends_with(',') {
                ","
            } else {
                ""
            };
            format!("{before}{comma}With {after}")
        } else {
            if let Some(stripped) = text_before_asterisks.strip_prefix(',') {
                text_before_asterisks = stripped.trim().to_string();
            }
            text_before_asterisks
        };

        if !cccc_text.is_empty() {
            note = add_to_note_list(&note, &cccc_text);
            if let Some(month) = period::month_or_range(&cccc_text) {
                entry.month = Some(month);
            }
            text_after = text_after[asterisk_pos..].trim().to_string();
        }

        if let Some(caps) = RE_ASTERISK_PAIR.captures(&text_after.clone()) {
            let asterisk_text = caps[1].trim().to_string();
            note = add_to_note_list(&note, &asterisk_text);
            if period::month_or_range(&asterisk_text).is_some() {
                if asterisk_text.contains('/') {
                    let retried = asterisk_text.replace('/', "-");
                    if let Some(month) = period::month_or_range(&retried) {
                        entry.month = Some(month);
                    }
                } else {
                    entry.month = period::month_or_range(&asterisk_text);
                }
            }
            text_after = RE_ASTERISK_GROUP
                .replace_all(&text_after, "")
                .trim()
                .to_string();
        }

        if let Some(caps) = RE_W_WITH.captures(&text_after.clone()) {
            let with_text = caps[1].trim().to_string();
            note = add_to_note_list(&note, &format!("With {with_text}"));
            text_after = RE_W_NAME.replace_all(&text_after, "").trim().to_string();
        }

        if !text_after.is_empty() {
            if let Some(month) = period::month_or_range(&text_after) {
                note = add_to_note_list(&note, &month);
                entry.month = Some(month);
            }
        }

        let res = resolve(&text_before);
        fill_place(&mut entry, &res);

        let the_location = the_location.or_else(|| {
            if cccc_text.is_empty() {
                None
            } else {
                Some(cccc_text.clone())
            }
        });

        if entry.location.is_none() {
            if let Some(loc) = &the_location {
                let combined = resolve(&format!("{text_before} {loc}"));
                if combined.region.is_some() {
                    entry.region = combined.region.clone();
                }
                if combined.location.is_some() {
                    entry.location = combined.location.clone();
                } else if let Some(country) =
                    combined.country.as_deref().and_then(gazetteer::by_name)
                {
                    if let Some(city) = country.cities.iter().find(|c| c.name == loc.as_str()) {
                        if let Some(region) = entry.region.as_deref() {
                            if city.regions.iter().any(|r| *r == Some(region)) {
                                entry.location = Some(loc.clone());
                            }
                        }
                    }
                }
            }
        }

        self.apply_home_fallback(&mut entry);
        entry.note = Some(note);
        Some(entry)
    }

    // ── Convention ─────────────────────────────────────────────────

    fn handle_convention(&self, line: &str) -> Option<ParsedEntry> {
        let lower = line.to_lowercase();
        if !lower.contains("convention") || lower.contains("convention photo") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::Convention);

        if lower.starts_with("australian workers convention") {
            entry.note = Some("Workers Convention".to_string());
            entry.country = Some("Australia".to_string());
            entry.region = Some("Australia".to_string());
            entry.location = Some("Australia".to_string());
            return Some(entry);
        }

        let mut line = strip_state_usa(line);
        line = line.replace("Sk- ", "");

        let mut date_note: Option<String> = None;
        let mut visit_note: Option<String> = None;

        let parens: Vec<String> = RE_PAREN
            .captures_iter(&line)
            .map(|caps| caps[1].trim().to_string())
            .collect();
        if !parens.is_empty() {
            for text in &parens {
                let mut range_found = false;
                if let Some(first) = period::find_month_or_season_match(text) {
                    let remaining = &text[first.end()..];
                    if let Some(second) = period::find_month_or_season_match(remaining) {
                        entry.month = Some(format!("{}-{}", first.as_str(), second.as_str()));
                        date_note = Some(text.clone());
                        range_found = true;
                    }
                }
                if !range_found && date_note.is_none() && period::contains_month_or_season(text) {
                    date_note = Some(text.clone());
                    line = line.replace(text.as_str(), "");
                    let pieces: Vec<&str> = text.split_whitespace().collect();
                    entry.month = Some(pieces[0].to_string());
                    if pieces.len() > 1 {
                        let month = period::month_token_number(pieces[0]);
                        let mut days = pieces[1].split('-');
                        if let Some(day) = days.next() {
                            entry.start_date =
                                Some(format!("{month}/{}", period::pad_day(day)));
                            if let Some(end_day) = days.next() {
                                entry.end_date =
                                    Some(format!("{month}/{}", period::pad_day(end_day)));
                            }
                        }
                    }
                } else if !range_found {
                    visit_note = Some(text.replace("Visiting Worker", "").trim().to_string());
                    line = line.replace(text.as_str(), "");
                }
            }
        } else if let Some(date) = period::free_form(&line) {
            entry.month = Some(date.first_month.clone());
            if let Some(first_day) = &date.first_day {
                let mut month = period::month_token_number(&date.first_month);
                entry.start_date = Some(format!("{month}/{}", period::pad_day(first_day)));
                if let Some(second_day) = &date.second_day {
                    if let Some(second_month) = &date.second_month_with_day {
                        month = period::month_token_number(second_month);
                    }
                    entry.end_date = Some(format!("{month}/{}", period::pad_day(second_day)));
                }
            } else if let Some(second_month) = &date.second_month_only {
                entry.month = Some(format!("{}-{}", date.first_month, second_month));
            }
        }

        let res = resolve(&line);
        fill_place(&mut entry, &res);

        let mut line = collapse_spaces(&res.line);
        if !line.to_lowercase().contains("convention") {
            line = format!("{line} Convention");
        }
        line = line.replace(',', "");
        line = RE_PAREN_GROUP.replace_all(&line, "").trim().to_string();

        if let Some(date_note) = date_note {
            line = format!("{line} - {date_note}");
        }
        if let Some(visit_note) = visit_note {
            if visit_note == "sent back to South Africa from this convention" {
                line.push_str(
                    ". Visiting from South Africa. Sent back to S. Africa from this convention",
                );
            } else {
                let visit_note = if visit_note.chars().count() == 2 {
                    gazetteer::region_code(&visit_note)
                        .map(str::to_string)
                        .unwrap_or(visit_note)
                } else {
                    visit_note
                };
                line.push_str(". Visiting from ");
                line.push_str(&visit_note);
            }
        }
        entry.note = if line.is_empty() { None } else { Some(line) };

        self.apply_home_fallback(&mut entry);
        Some(entry)
    }

    // ── Special meeting ────────────────────────────────────────────

    fn handle_special_meeting(&self, line: &str) -> Option<ParsedEntry> {
        if !line.contains("Special Meeting") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::SpecialMeeting);
        let mut line = line.to_string();

        if (line.contains("Quebec") || line.contains("QC")) && line.contains("Atlantic") {
            line = RE_QC_ATLANTIC
                .replace_all(&line, "Quebec/Atlantic")
                .into_owned();
        }
        if RE_OREGON_IDAHO.is_match(&line) {
            line = line.replace("Oregon/ South Idaho", "Oregon/Southern Idaho");
        }
        if line.contains("Irishtown") {
            line = line.replace("(Irishtown)", "Irishtown");
        }

        let mut date_note: Option<String> = None;
        let mut visit_note: Option<String> = None;
        if let Some(caps) = RE_PAREN.captures(&line.clone()) {
            let text = caps[1].trim().to_string();
            if period::contains_month_or_season(&text) {
                date_note = Some(text.clone());
                let pieces: Vec<&str> = text.split_whitespace().collect();
                if pieces.len() == 1 {
                    entry.month = Some(pieces[0].to_string());
                } else {
                    // "Dec." and "19th" both appear in the data
                    let month = pieces[0].trim_end_matches('.').to_string();
                    let month_num = period::month_token_number(&month);
                    let day = RE_ORDINAL.replace_all(pieces[1], "$1");
                    entry.start_date = Some(format!("{month_num}/{}", period::pad_day(&day)));
                    entry.month = Some(month);
                }
            } else {
                visit_note = Some(text);
            }
            line = RE_PAREN_GROUP.replace_all(&line, "").trim().to_string();
        }

        line = strip_state_usa(&line);

        if let Some(m) = RE_DOAK.find(&line.clone()) {
            line = line.replace(m.as_str(), "Doak's");
        }

        // A bare country word with no region table can only be a country
        for word in line.split_whitespace() {
            for country in COUNTRIES {
                if word == country.name && country.regions.is_empty() {
                    entry.country = Some(country.name.to_string());
                }
            }
        }

        let res = resolve(&line);
        fill_place(&mut entry, &res);
        self.apply_home_fallback(&mut entry);

        let mut note = res.line;
        if let Some(date_note) = date_note {
            note = format!("{date_note} {note}");
        }
        if let Some(visit_note) = visit_note {
            note = format!("{note} Visiting from {visit_note}");
        }
        entry.note = if note.is_empty() { None } else { Some(note) };

        Some(entry)
    }

    // ── Travel ─────────────────────────────────────────────────────

    fn handle_travel(&self, line: &str) -> Option<ParsedEntry> {
        for (pattern, cue) in TRAVEL_PATTERNS.iter() {
            if !pattern.is_match(line) {
                continue;
            }
            let mut entry = ParsedEntry::new(EntryKind::Travel);
            let res = resolve(line);
            fill_place(&mut entry, &res);
            if entry.location.is_none() && res.region.is_some() {
                entry.location = res.region.clone();
            }
            self.apply_home_fallback(&mut entry);
            entry.note = Some(format!(
                "{cue} {}",
                entry.country.as_deref().unwrap_or_default()
            ));
            return Some(entry);
        }
        None
    }

    // ── Started work ───────────────────────────────────────────────

    fn handle_started_work(&self, line: &str) -> Option<ParsedEntry> {
        if !line.contains("Started in the work") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::StartedWork);
        let mut line = RE_STARTED_CUE.replace_all(line, "").trim().to_string();

        if let Some((month, start_date, end)) = leading_month_date(&line) {
            entry.month = Some(month);
            entry.start_date = start_date;
            line = line[end..].trim().to_string();
        }

        let res = resolve(&line);
        fill_place(&mut entry, &res);
        entry.note = if res.line.is_empty() {
            Some("Started in the work".to_string())
        } else {
            Some(format!("Started in the work: {}", res.line))
        };

        self.apply_home_fallback(&mut entry);
        Some(entry)
    }

    // ── Photo ──────────────────────────────────────────────────────

    fn handle_photo(&self, line: &str) -> Option<ParsedEntry> {
        let lower = line.to_lowercase();
        if !lower.contains("photo") && !lower.contains("picture") {
            return None;
        }
        if lower.contains("absent") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::Photo);
        let res = resolve(line);
        fill_place(&mut entry, &res);
        self.apply_home_fallback(&mut entry);

        let photo_types = [
            "Worker Staff Photo",
            "Workers Meeting Photo",
            "Staff Photo",
            "Workers Photo",
            "Special Meeting Photo",
            "Photo",
            "Workers Picture",
        ];
        let remaining = res.line.to_lowercase();
        for photo_type in photo_types {
            if remaining.contains(&photo_type.to_lowercase()) {
                entry.note = Some(photo_type.to_string());
                break;
            }
        }

        Some(entry)
    }

    // ── Workers meeting ────────────────────────────────────────────

    fn handle_workers_meeting(&self, line: &str) -> Option<ParsedEntry> {
        if !line.to_lowercase().contains("workers meeting") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::WorkersMeeting);
        let mut line = RE_WORKERS_MEETING_CUE
            .replace_all(line, " ")
            .trim()
            .to_string();

        let mut visiting_from: Option<String> = None;
        if let Some(caps) = RE_PAREN.captures(&line.clone()) {
            let state = caps[1].to_string();
            if state.chars().count() == 2 {
                visiting_from = gazetteer::region_code(&state).map(str::to_string);
            } else {
                visiting_from = Some(state);
            }
            line = RE_PAREN_GROUP.replace_all(&line, "").into_owned();
        }

        let res = resolve(&line);
        fill_place(&mut entry, &res);

        let mut note = if res.line.is_empty() {
            "Workers Meeting".to_string()
        } else {
            format!("{} Workers Meeting", res.line)
        };
        if let Some(visiting_from) = visiting_from {
            note = format!("{note} Visiting from {visiting_from}");
        }
        entry.note = Some(note);

        self.apply_home_fallback(&mut entry);
        Some(entry)
    }

    // ── Removed ────────────────────────────────────────────────────

    fn handle_removed(&self, line: &str) -> Option<ParsedEntry> {
        if !line.to_lowercase().contains("removed from") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::Removed);
        let mut line = line.to_string();
        if let Some(m) = RE_REMOVED_FROM.find(&line.clone()) {
            entry.note = Some(m.as_str().trim().to_string());
            line = line[..m.start()].trim().to_string();
        }

        let res = resolve(&line);
        if res.country.is_some() {
            entry.country = res.country.clone();
        }
        if res.region.is_some() {
            entry.region = res.region.clone();
        }
        self.apply_home_fallback(&mut entry);

        if !res.line.is_empty() {
            if let Some(caps) = RE_MONTH_ABBREV_START.captures(&res.line) {
                entry.month = Some(caps[1].to_string());
            }
        }

        Some(entry)
    }

    // ── Guestbook ──────────────────────────────────────────────────

    fn handle_guestbook(&self, line: &str) -> Option<ParsedEntry> {
        let lower = line.to_lowercase();
        if !lower.contains("guestbook") && !lower.contains("guest book") {
            return None;
        }

        let mut entry = ParsedEntry::new(EntryKind::Guestbook);
        let line = RE_GUESTBOOK.replace_all(line, "").trim().to_string();

        let res = resolve(&line);
        if res.country.is_some() {
            entry.country = res.country.clone();
        }
        if res.region.is_some() {
            entry.region = res.region.clone();
        }
        let mut line = res.line;

        if let Some(caps) = RE_MONTH_FULL_START.captures(&line.clone()) {
            entry.month = Some(caps[1].to_string());
            line = line[caps.get(0).unwrap().end()..].trim().to_string();
        }

        entry.note = if line.is_empty() {
            Some("Guestbook".to_string())
        } else {
            Some(format!("Guestbook: {line}"))
        };

        self.apply_home_fallback(&mut entry);
        Some(entry)
    }

    // ── Location only ──────────────────────────────────────────────

    fn handle_location(&self, line: &str) -> Option<ParsedEntry> {
        let mut entry = ParsedEntry::new(EntryKind::Location);
        let res = resolve(line);
        fill_place(&mut entry, &res);
        let mut line = res.line;

        let mut protem = false;
        if !line.is_empty() {
            if let Some(caps) = RE_PAREN.captures(&line.clone()) {
                let paren_text = caps[1].trim().to_string();
                let mut fixed = RE_SLASH_SEP
                    .split(&paren_text)
                    .collect::<Vec<_>>()
                    .join(", ");

                // A paren that names a known city of the resolved place
                // is the location, not a note
                if !fixed.is_empty() && entry.location.is_none() {
                    if let Some(country) = entry.country.as_deref().and_then(gazetteer::by_name) {
                        if let Some(city) = country.cities.iter().find(|c| c.name == fixed) {
                            if let Some(region) = entry.region.as_deref() {
                                if city.regions.iter().any(|r| *r == Some(region)) {
                                    entry.location = Some(fixed.clone());
                                    line = line.replace(&paren_text, "");
                                    line = RE_PAREN_GROUP
                                        .replace_all(&line, "")
                                        .trim()
                                        .to_string();
                                    fixed.clear();
                                }
                            }
                        }
                    }
                }

                if !fixed.is_empty() {
                    let lower = fixed.to_lowercase();
                    let mut the_note = String::new();
                    let mut special = false;
                    if lower.starts_with("return to ") {
                        special = true;
                        the_note = format!("Return To {}", fixed[10..].trim());
                    }
                    if lower.starts_with("to ") {
                        special = true;
                        the_note = format!("To {}", fixed[3..].trim());
                    }
                    if lower.ends_with("pro tem") {
                        protem = true;
                    }
                    let mut absent = false;
                    if fixed.contains("Absent") {
                        absent = true;
                        the_note = "Absent".to_string();
                    }
                    if special || protem || absent {
                        entry.note = if the_note.is_empty() {
                            None
                        } else {
                            Some(the_note)
                        };
                    } else if period::contains_month(&fixed) {
                        entry.note = Some(format!("Visiting in {fixed}"));
                    } else {
                        entry.note = Some(format!("Visiting from {fixed}"));
                    }
                    line = line.replace(&paren_text, "");
                    line = RE_PAREN_GROUP.replace_all(&line, "").trim().to_string();
                }
            }
        }

        if !line.is_empty() {
            if let Some((month, start_date, _)) = leading_month_date(&line) {
                entry.month = Some(month);
                entry.start_date = start_date;
            }
        }

        if !line.is_empty() {
            line = RE_WITH_CAP.replace_all(&line, "With $1").into_owned();
            let current = entry.note.clone().unwrap_or_default();
            let mut note = add_to_note_list(&current, &line);
            if protem {
                note = add_to_note_list(&note, "pro tem");
            }
            entry.note = Some(note);
        }

        if entry.country.is_none()
            && entry.region.is_none()
            && entry.location.is_none()
            && entry.note.is_none()
        {
            return None;
        }

        self.apply_home_fallback(&mut entry);
        Some(entry)
    }
}

// ── Workers list text repairs ──────────────────────────────────────

/// Misspellings, joined words and reorderings seen only on list lines.
fn workers_list_fixes(line: &str) -> String {
    let mut line = line.to_string();

    line = line.replace("AlbertaCanada", "Alberta Canada");
    line = line.replace("S.Africa", "South Africa");

    if line == "Jan-July Workers List (Prince Albert-Big River)" {
        line = "Jan-July Saskatchewan Canada Workers List (Prince Albert-Big River)".to_string();
    }

    let fixes: &[(&str, &str)] = &[
        ("PA/ NY/New England/NJ", "PA/NY/New England/NJ"),
        ("CanadaWorkers", "Canada Workers"),
        ("Canada Canada", "Canada"),
        ("Atlantic/Quebec", "Quebec/Atlantic"),
        ("N.W.", "Northwest"),
        ("NWOntario.", "Northwest Ontario"),
        (
            "Canada Workers List (Newfoundland and Labrador) East",
            "Canada Workers List Newfoundland and Labrador (East)",
        ),
        ("OHio", "Ohio"),
        ("Mid Island Field", "Mid Island"),
        ("Assinibboia", "Assiniboia"),
        ("Barhead", "Barrhead"),
        ("Freeedom", "Freedom"),
        ("North Falls Freedom", "North Falls, Freedom"),
        ("Charesholm", "Claresholm"),
        ("PIncher", "Pincher"),
        ("Beverdam", "Beaver Dam"),
        ("Monomonie", "Menomonie"),
        ("Cookville", "Cookeville"),
        ("New Port Richley", "New Port Richey"),
        ("Pentiction", "Penticton"),
        ("Pentcton", "Penticton"),
        ("\u{2026}", ""),
        ("Renfew", "Renfrew"),
        ("Surray", "Surrey"),
        ("Mcmurray", "McMurray"),
        ("Mccleary", "McCleary"),
    ];
    for (from, to) in fixes {
        if line.contains(from) {
            line = line.replace(from, to);
        }
    }

    line = RE_SK_WORD.replace_all(&line, "Saskatchewan").into_owned();

    if line.contains("*Winter/Spring") && !line.contains("*Winter/Spring*") {
        line = line.replace("*Winter/Spring", "*Winter/Spring*");
    }
    if line.contains("Manitoba and Northwest Ontario") {
        line = line.replace(
            "Manitoba and Northwest Ontario",
            "Manitoba/Northwest Ontario",
        );
    }
    if line.contains("Argentina/Paraguay/Uruguay, Rio Grande Do Sul") {
        line = line.replace(
            "Argentina/Paraguay/Uruguay, Rio Grande Do Sul",
            "Argentina/Paraguay/Uruguay/Brazil Rio Grande do Sul",
        );
    }

    // A bare "Canada Workers List <province>" reads better province-first
    if line.starts_with("Canada Workers List") {
        if let Some(canada) = gazetteer::by_name("Canada") {
            for province in canada.regions {
                if line.contains(province) {
                    line = line.replace(
                        "Canada Workers List",
                        &format!("{province} Canada Workers List"),
                    );
                    break;
                }
            }
        }
    }

    line
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn classify_us(line: &str) -> Option<ParsedEntry> {
        Classifier::new("United States").classify(&normalize(line))
    }

    fn classify_ca(line: &str) -> Option<ParsedEntry> {
        Classifier::new("Canada").classify(&normalize(line))
    }

    #[test]
    fn test_note_list_building() {
        assert_eq!(add_to_note_list("Workers List", "Jul List"), "Workers List: Jul List");
        assert_eq!(add_to_note_list("", "Visiting"), "Visiting");
        assert_eq!(add_to_note_list("A", "B"), "A, B");
    }

    #[test]
    fn test_paren_patterns() {
        assert_eq!(
            paren_text_patterns("helping Somewhere"),
            ("helping".to_string(), "Somewhere".to_string())
        );
        assert_eq!(
            paren_text_patterns("to Alberta pro tem"),
            ("to pro tem".to_string(), "Alberta".to_string())
        );
        assert_eq!(
            paren_text_patterns("Kamloops"),
            (String::new(), "Kamloops".to_string())
        );
    }

    #[test]
    fn test_format_paren_note() {
        let (field, note, _) = format_paren_note("", "West Africa", "");
        assert!(field.is_empty());
        assert_eq!(note, "Laboring in West Africa");

        let (field, note, _) = format_paren_note("", "Kamloops", "");
        assert_eq!(field, "Kamloops");
        assert_eq!(note, "Kamloops");

        let (_, note, _) = format_paren_note("to pro tem", "Alberta", "");
        assert_eq!(note, "To Alberta pro tem");

        let (_, _, after) = format_paren_note("overseer", "X", "tail");
        assert_eq!(after, "tail, Overseer");
    }

    #[test]
    fn test_convention_with_visiting_note() {
        let entry = classify_us("Apopka Florida Convention (West Africa)").unwrap();
        assert_eq!(entry.kind, EntryKind::Convention);
        assert_eq!(entry.country.as_deref(), Some("United States"));
        assert_eq!(entry.region.as_deref(), Some("Florida"));
        assert_eq!(entry.location, None);
        assert_eq!(
            entry.note.as_deref(),
            Some("Apopka Convention. Visiting from West Africa")
        );
    }

    #[test]
    fn test_convention_free_form_dates() {
        let entry = classify_us("Manhattan 2 Montana Convention June 29-July2").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Montana"));
        assert_eq!(entry.month.as_deref(), Some("June"));
        assert_eq!(entry.start_date.as_deref(), Some("06/29"));
        assert_eq!(entry.end_date.as_deref(), Some("07/02"));
    }

    #[test]
    fn test_convention_paren_date() {
        let entry = classify_us("Prince George Canada Convention (June 14-16)").unwrap();
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.region.as_deref(), Some("British Columbia"));
        assert_eq!(entry.location.as_deref(), Some("Prince George"));
        assert_eq!(entry.month.as_deref(), Some("June"));
        assert_eq!(entry.start_date.as_deref(), Some("06/14"));
        assert_eq!(entry.end_date.as_deref(), Some("06/16"));
    }

    #[test]
    fn test_convention_paren_month_range() {
        // a month range in parens stays in the note, dash-joined
        let entry = classify_us("Boring Convention (May-June)").unwrap();
        assert_eq!(entry.month.as_deref(), Some("May-June"));
        assert_eq!(entry.note.as_deref(), Some("Boring Convention - May-June"));
    }

    #[test]
    fn test_convention_visit_note_region_code() {
        let entry = classify_us("Apopka Florida Convention (MO)").unwrap();
        assert_eq!(
            entry.note.as_deref(),
            Some("Apopka Convention. Visiting from Missouri")
        );
    }

    #[test]
    fn test_australian_workers_convention() {
        let entry = classify_us("Australian Workers Convention").unwrap();
        assert_eq!(entry.country.as_deref(), Some("Australia"));
        assert_eq!(entry.region.as_deref(), Some("Australia"));
        assert_eq!(entry.location.as_deref(), Some("Australia"));
        assert_eq!(entry.note.as_deref(), Some("Workers Convention"));
    }

    #[test]
    fn test_state_usa_stripped() {
        let entry = classify_us("Apopka Florida USA Convention").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Florida"));
        assert_eq!(entry.note.as_deref(), Some("Apopka Convention"));
    }

    #[test]
    fn test_state_usa_strip_canonicalizes_case() {
        assert_eq!(strip_state_usa("florida USA"), "Florida");
        assert_eq!(strip_state_usa("Apopka Florida USA"), "Apopka Florida");
    }

    #[test]
    fn test_special_meeting_san_rafael() {
        let entry = classify_us("San Rafael Special Meeting Argentina (July 14)").unwrap();
        assert_eq!(entry.kind, EntryKind::SpecialMeeting);
        assert_eq!(entry.country.as_deref(), Some("Argentina"));
        assert_eq!(entry.region, None);
        assert_eq!(entry.location.as_deref(), Some("San Rafael"));
        assert_eq!(entry.note.as_deref(), Some("July 14 Special Meeting"));
        assert_eq!(entry.month.as_deref(), Some("July"));
        assert_eq!(entry.start_date.as_deref(), Some("07/14"));
    }

    #[test]
    fn test_special_meeting_season_note() {
        let entry = classify_us("South Dakota Special Meeting (Winter)").unwrap();
        assert_eq!(entry.region.as_deref(), Some("South Dakota"));
        assert_eq!(entry.month.as_deref(), Some("Winter"));
        assert_eq!(entry.note.as_deref(), Some("Winter Special Meeting"));
    }

    #[test]
    fn test_special_meeting_qc_atlantic() {
        let entry = classify_ca("QC/Atlantic Canada Special Meeting").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Quebec/Atlantic"));
        assert_eq!(entry.note.as_deref(), Some("Special Meeting"));
    }

    #[test]
    fn test_special_meeting_oregon_idaho() {
        let entry = classify_us("Oregon/ S. Idaho Special Meetings").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Oregon/Southern Idaho"));
        assert_eq!(entry.country.as_deref(), Some("United States"));
        assert_eq!(entry.note.as_deref(), Some("Special Meetings"));
    }

    #[test]
    fn test_special_meeting_irishtown() {
        let entry = classify_ca("Newfoundland (Irishtown) Special Meeting").unwrap();
        assert_eq!(
            entry.region.as_deref(),
            Some("Newfoundland and Labrador")
        );
        assert_eq!(entry.location.as_deref(), Some("Irishtown"));
        assert_eq!(entry.note.as_deref(), Some("Special Meeting"));
    }

    #[test]
    fn test_travel_return_to() {
        let entry = classify_us("Return to E. Canada").unwrap();
        assert_eq!(entry.kind, EntryKind::Travel);
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.note.as_deref(), Some("Return to Canada"));
    }

    #[test]
    fn test_started_work_with_date() {
        let entry = classify_us("July 6, Started in the work").unwrap();
        assert_eq!(entry.kind, EntryKind::StartedWork);
        assert_eq!(entry.month.as_deref(), Some("July"));
        assert_eq!(entry.start_date.as_deref(), Some("07/06"));
        assert_eq!(entry.note.as_deref(), Some("Started in the work"));
        // nothing resolved, so the whole entry falls back to home
        assert_eq!(entry.country.as_deref(), Some("United States"));
        assert_eq!(entry.region.as_deref(), Some("United States"));
    }

    #[test]
    fn test_started_work_with_place() {
        let entry = classify_ca("New Brunswick (Started in the work)").unwrap();
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.region.as_deref(), Some("New Brunswick"));
        assert_eq!(entry.location, None);
        assert_eq!(entry.note.as_deref(), Some("Started in the work"));
    }

    #[test]
    fn test_photo_compound_region() {
        let entry = classify_ca("Manitoba/NW Ontario Staff Photo").unwrap();
        assert_eq!(entry.kind, EntryKind::Photo);
        assert_eq!(entry.region.as_deref(), Some("Manitoba/Northwest Ontario"));
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.note.as_deref(), Some("Staff Photo"));
    }

    #[test]
    fn test_photo_with_city() {
        let entry = classify_us("Alma Michigan Workers Picture").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Michigan"));
        assert_eq!(entry.location.as_deref(), Some("Alma"));
        assert_eq!(entry.note.as_deref(), Some("Workers Picture"));
    }

    #[test]
    fn test_photo_absent_falls_through() {
        let entry = classify_us("Alberta Workers Photo absent").unwrap();
        assert_ne!(entry.kind, EntryKind::Photo);
    }

    #[test]
    fn test_workers_meeting_visiting_code() {
        let entry = classify_us("Minnesota Workers Meeting (MO)").unwrap();
        assert_eq!(entry.kind, EntryKind::WorkersMeeting);
        assert_eq!(entry.region.as_deref(), Some("Minnesota"));
        assert_eq!(
            entry.note.as_deref(),
            Some("Workers Meeting Visiting from Missouri")
        );
    }

    #[test]
    fn test_workers_meeting_with_city() {
        let entry = classify_ca("Portage Canada Workers Meeting").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Manitoba"));
        assert_eq!(entry.location.as_deref(), Some("Portage"));
        assert_eq!(entry.note.as_deref(), Some("Workers Meeting"));
    }

    #[test]
    fn test_workers_meeting_leftover_text() {
        let entry = classify_us("Nashville Tennessee Workers Meeting (Colorado)").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Tennessee"));
        assert_eq!(
            entry.note.as_deref(),
            Some("Nashville Workers Meeting Visiting from Colorado")
        );
    }

    #[test]
    fn test_removed() {
        let entry = classify_ca("Alberta Canada Removed from the work").unwrap();
        assert_eq!(entry.kind, EntryKind::Removed);
        assert_eq!(entry.region.as_deref(), Some("Alberta"));
        assert_eq!(entry.note.as_deref(), Some("Removed from the work"));
    }

    #[test]
    fn test_guestbook() {
        let entry = classify_us("June Paris France (Guestbook)").unwrap();
        assert_eq!(entry.kind, EntryKind::Guestbook);
        assert_eq!(entry.country.as_deref(), Some("France"));
        assert_eq!(entry.region.as_deref(), Some("Paris"));
        assert_eq!(entry.month.as_deref(), Some("June"));
        assert_eq!(entry.note.as_deref(), Some("Guestbook"));
    }

    #[test]
    fn test_workers_list_plain() {
        let entry = classify_ca("Quebec/Atlantic Canada Workers List").unwrap();
        assert_eq!(entry.kind, EntryKind::WorkersList);
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.region.as_deref(), Some("Quebec/Atlantic"));
        assert_eq!(entry.note.as_deref(), Some("Workers List"));
    }

    #[test]
    fn test_workers_list_with_month_and_parens() {
        let entry = classify_ca("Jan-July Workers List (Prince Albert-Big River)").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Saskatchewan"));
        assert_eq!(entry.month.as_deref(), Some("Jan-July"));
        assert_eq!(
            entry.note.as_deref(),
            Some("Workers List: Jan-July List, Prince Albert-Big River")
        );
    }

    #[test]
    fn test_workers_list_asterisk_month() {
        let entry = classify_ca("Alberta Staff *Jul/Aug*").unwrap();
        assert_eq!(entry.region.as_deref(), Some("Alberta"));
        assert_eq!(entry.month.as_deref(), Some("Jul-Aug"));
        assert_eq!(entry.note.as_deref(), Some("Workers List: Jul/Aug"));
    }

    #[test]
    fn test_workers_list_laboring_paren() {
        let entry = classify_us("Workers List (West Africa)").unwrap();
        assert_eq!(
            entry.note.as_deref(),
            Some("Workers List: Laboring in West Africa")
        );
    }

    #[test]
    fn test_location_visiting_note() {
        let entry = classify_us("Juarez Mexico (March 8)").unwrap();
        assert_eq!(entry.kind, EntryKind::Location);
        assert_eq!(entry.country.as_deref(), Some("Mexico"));
        assert_eq!(
            entry.note.as_deref(),
            Some("Visiting in March 8, Juarez")
        );
    }

    #[test]
    fn test_location_with_companion() {
        let entry = classify_us("Sacramento California with Judy").unwrap();
        assert_eq!(entry.region.as_deref(), Some("California"));
        assert_eq!(entry.note.as_deref(), Some("Sacramento With Judy"));
    }

    #[test]
    fn test_location_home_fallback() {
        let entry = classify_ca("Visited two weeks").unwrap();
        assert_eq!(entry.country.as_deref(), Some("Canada"));
        assert_eq!(entry.region.as_deref(), Some("Canada"));
        assert_eq!(entry.location.as_deref(), Some("Canada"));
        assert_eq!(entry.note.as_deref(), Some("Visited two weeks"));
    }

    #[test]
    fn test_nothing_to_classify() {
        assert!(classify_us("").is_none());
    }
}
