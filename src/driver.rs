//! Line driver: walks a transcript file, pulls the year off each line,
//! normalizes the remainder and hands it to the classifier.
//!
//! Lines look like:
//!   1987 Apopka Florida Convention (West Africa)
//!   1988-1990 Saskatchewan Canada Workers List
//! A line with an opening paren but no closing one continues on the
//! next line, unless that line starts its own year.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::{Classifier, EntryKind};
use crate::normalize::normalize;
use crate::period;

pub const HEADER: &str = "Status|Perp Name|Year|Type|Country|State|Location|Note|Start Date|End Date|Month|Original Text|Fixed Text";

static RE_YEAR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:-(\d{4}))?\s+.*").unwrap());
static RE_YEAR_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}").unwrap());
// Years echoed in the text after the year token has been consumed
static RE_DUP_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}\s*").unwrap());
static RE_DASH_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\s*\d{4}\s*").unwrap());

/// One matched line, ready for pipe-delimited or JSON output. The
/// `period_*` fields expand year + month/dates to ISO day bounds; they
/// appear only in the JSON dump.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub subject: String,
    pub year: String,
    pub kind: EntryKind,
    pub country: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub note: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<String>,
    pub original_text: String,
    pub fixed_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
}

impl Record {
    pub fn pipe_line(&self) -> String {
        let opt = |field: &Option<String>| field.clone().unwrap_or_default();
        [
            "MATCHED".to_string(),
            self.subject.clone(),
            self.year.clone(),
            self.kind.as_str().to_string(),
            opt(&self.country),
            opt(&self.region),
            opt(&self.location),
            opt(&self.note),
            opt(&self.start_date),
            opt(&self.end_date),
            opt(&self.month),
            self.original_text.clone(),
            self.fixed_text.clone(),
        ]
        .join("|")
    }
}

#[derive(Debug)]
pub enum LineOutcome {
    Matched(Box<Record>),
    NoMatch(String),
}

pub fn process_file(
    path: &Path,
    subject: &str,
    classifier: &Classifier,
) -> io::Result<Vec<LineOutcome>> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    Ok(process_lines(&lines, subject, classifier))
}

pub fn process_lines(lines: &[&str], subject: &str, classifier: &Classifier) -> Vec<LineOutcome> {
    let mut outcomes = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let mut line = lines[i].trim().to_string();
        if line.is_empty() {
            i += 1;
            continue;
        }

        // Re-join entries whose parenthetical wrapped onto the next line
        if line.contains('(') && !line.contains(')') && i + 1 < lines.len() {
            let next_line = lines[i + 1].trim();
            if !next_line.is_empty() && !RE_YEAR_START.is_match(next_line) {
                line = format!("{line} {next_line}");
                i += 1;
            }
        }

        if let Some(caps) = RE_YEAR_LINE.captures(&line) {
            let start_year = caps[1].to_string();
            let end_year = caps.get(2).map(|m| m.as_str().to_string());
            let year = match &end_year {
                Some(end) if *end != start_year => format!("{start_year}-{end}"),
                _ => start_year.clone(),
            };

            let mut text = match line.find(&start_year) {
                Some(pos) => line[pos + start_year.len()..].trim().to_string(),
                None => line.clone(),
            };
            if let Some(end) = &end_year {
                if *end != start_year {
                    if let Some(pos) = text.find(end.as_str()) {
                        text = text[pos + end.len()..].trim().to_string();
                    }
                }
            }
            text = RE_DUP_YEAR.replace(&text, "").into_owned();
            text = RE_DASH_YEAR.replace_all(&text, "").into_owned();

            let original_text = text;
            let fixed_text = normalize(&original_text);

            match classifier.classify(&fixed_text) {
                Some(entry) => {
                    let expanded = period::expand_dates(
                        &year,
                        entry.start_date.as_deref(),
                        entry.end_date.as_deref(),
                        entry.month.as_deref(),
                    );
                    let (period_start, period_end) = match expanded {
                        Some((start, end)) => (Some(start), end),
                        None => (None, None),
                    };
                    outcomes.push(LineOutcome::Matched(Box::new(Record {
                        subject: subject.to_string(),
                        year,
                        kind: entry.kind,
                        country: entry.country,
                        region: entry.region,
                        location: entry.location,
                        note: entry.note,
                        start_date: entry.start_date,
                        end_date: entry.end_date,
                        month: entry.month,
                        original_text,
                        fixed_text,
                        period_start,
                        period_end,
                    })));
                }
                None => outcomes.push(LineOutcome::NoMatch(line.clone())),
            }
        }
        i += 1;
    }
    outcomes
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Vec<LineOutcome> {
        let classifier = Classifier::new("Canada");
        process_lines(lines, "Marion Crawford", &classifier)
    }

    fn matched(outcome: &LineOutcome) -> &Record {
        match outcome {
            LineOutcome::Matched(record) => record,
            LineOutcome::NoMatch(line) => panic!("expected a match, got NOMATCH - {line}"),
        }
    }

    #[test]
    fn test_single_year_line() {
        let outcomes = run(&["1987 Apopka Florida Convention"]);
        assert_eq!(outcomes.len(), 1);
        let record = matched(&outcomes[0]);
        assert_eq!(record.year, "1987");
        assert_eq!(record.kind, EntryKind::Convention);
        assert_eq!(record.region.as_deref(), Some("Florida"));
        assert_eq!(record.original_text, "Apopka Florida Convention");
        assert_eq!(record.period_start.as_deref(), Some("1987-01-01"));
        assert_eq!(record.period_end.as_deref(), Some("1987-12-31"));
    }

    #[test]
    fn test_year_range_line() {
        let outcomes = run(&["1988-1990 Saskatchewan Canada Workers List"]);
        let record = matched(&outcomes[0]);
        assert_eq!(record.year, "1988-1990");
        assert_eq!(record.region.as_deref(), Some("Saskatchewan"));
        assert_eq!(record.period_start.as_deref(), Some("1988-01-01"));
        assert_eq!(record.period_end.as_deref(), Some("1990-12-31"));
    }

    #[test]
    fn test_duplicate_year_stripped() {
        let outcomes = run(&["1987 1987 Alberta Canada Workers List"]);
        let record = matched(&outcomes[0]);
        assert_eq!(record.original_text, "Alberta Canada Workers List");
    }

    #[test]
    fn test_split_paren_joined() {
        let outcomes = run(&[
            "1987 Kamloops British Columbia Canada (Started",
            "in the work)",
        ]);
        assert_eq!(outcomes.len(), 1);
        let record = matched(&outcomes[0]);
        assert_eq!(record.kind, EntryKind::StartedWork);
        assert_eq!(record.region.as_deref(), Some("British Columbia"));
        // Kamloops is not a gazetteer city, so it stays in the note
        assert_eq!(record.location.as_deref(), None);
        assert_eq!(record.note.as_deref(), Some("Started in the work: Kamloops"));
    }

    #[test]
    fn test_split_paren_not_joined_before_year() {
        // next line starts its own year, so no join happens
        let outcomes = run(&[
            "1987 Alberta Workers List (incomplete",
            "1988 Alberta Canada Workers List",
        ]);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(matched(&outcomes[1]).year, "1988");
    }

    #[test]
    fn test_blank_and_yearless_lines_skipped() {
        let outcomes = run(&["", "no year here", "1987 Alberta Canada Workers List"]);
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn test_pipe_line_format() {
        let outcomes = run(&["1987 Apopka Florida Convention"]);
        let record = matched(&outcomes[0]);
        let line = record.pipe_line();
        assert!(line.starts_with("MATCHED|Marion Crawford|1987|Convention|United States|Florida|"));
        assert_eq!(line.split('|').count(), HEADER.split('|').count());
    }

    #[test]
    fn test_month_expands_to_period() {
        let outcomes = run(&["1987 South Dakota Special Meeting (Winter)"]);
        let record = matched(&outcomes[0]);
        assert_eq!(record.month.as_deref(), Some("Winter"));
        assert_eq!(record.period_start.as_deref(), Some("1987-12-01"));
        assert_eq!(record.period_end.as_deref(), Some("1988-02-28"));
    }
}
