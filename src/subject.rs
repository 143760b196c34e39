//! Subject identity: who a transcript file is about, and where their
//! home country is when a line names no country at all.

use regex::Regex;
use std::sync::LazyLock;

// "Marion Crawford_from_pdf.txt" → "Marion Crawford"
static RE_SUBJECT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+?)_from_(?:pdf|txt)\.txt$").unwrap());

/// Subject name from an input file name, or `None` when the file does
/// not follow the transcript naming convention.
pub fn extract_subject_name(file_name: &str) -> Option<&str> {
    RE_SUBJECT_FILE
        .captures(file_name)
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Sentinel returned for subjects with no known home country. Kept
/// visibly wrong so it stands out in output rather than passing as a
/// real country.
pub const UNKNOWN_HOME: &str = "--United States--";

/// Per-subject home countries, used only when a line resolves to no
/// country of its own.
pub struct SubjectConfig {
    homes: Vec<(String, String)>,
}

impl SubjectConfig {
    pub fn new() -> Self {
        let homes = [
            ("Marion Crawford", "Canada"),
            ("Robert Flippo", "United States"),
            ("Leslie White", "United States"),
            ("Robert Corfield", "Canada"),
            ("John Van Den Berg", "United States"),
            ("Dean Bruer", "United States"),
            ("Luther Raine", "United States"),
            ("Mark Huddle", "United States"),
            ("Jack Reddekopp", "Canada"),
            ("Albert Clark", "Canada"),
            ("Brad Holman", "United States"),
            ("Michael Payne", "United States"),
        ]
        .into_iter()
        .map(|(name, home)| (name.to_string(), home.to_string()))
        .collect();
        Self { homes }
    }

    pub fn home_country(&self, subject: &str) -> &str {
        self.homes
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, home)| home.as_str())
            .unwrap_or(UNKNOWN_HOME)
    }
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subject_name() {
        assert_eq!(
            extract_subject_name("Marion Crawford_from_pdf.txt"),
            Some("Marion Crawford")
        );
        assert_eq!(
            extract_subject_name("Dean Bruer_from_txt.txt"),
            Some("Dean Bruer")
        );
        assert_eq!(extract_subject_name("notes.txt"), None);
        assert_eq!(extract_subject_name("X_from_pdf.txt.bak"), None);
    }

    #[test]
    fn test_home_country() {
        let config = SubjectConfig::new();
        assert_eq!(config.home_country("Marion Crawford"), "Canada");
        assert_eq!(config.home_country("Dean Bruer"), "United States");
        assert_eq!(config.home_country("Nobody Known"), UNKNOWN_HOME);
    }
}
