//! Text normalization applied to every activity line before classification.
//!
//! Real data examples of what this cleans up:
//!   "Apopka Florida Convvention"
//!   "Watt NSW Australia Convention"
//!   "Manitoba/N. Wyoming Workers List"
//!   "Doak’s Special Meeting Shed"
//!
//! `normalize` is idempotent: running it twice gives the same result.

use regex::Regex;
use std::sync::LazyLock;

/// Literal corrections for known-bad historical spellings.
///
/// Each entry is (trigger, from, to): when `trigger` appears in the line,
/// every occurrence of `from` is replaced with `to`. The trigger is wider
/// than the replacement where a short name is only wrong in one context
/// (e.g. "Roger" is only a typo when followed by "Arkansas"). Entries are
/// applied in listed order.
static FIXES: &[(&str, &str, &str)] = &[
    ("Convvention", "Convvention", "Convention"),
    ("Sart-Dames- Avelines", "Sart-Dames- Avelines", "Sart-Dames-Avelines"),
    ("Ducan Canada", "Ducan Canada", "Duncan Canada"),
    ("Greenshields", "Greenshields", "Greenshield"),
    ("Iron Bridges", "Iron Bridges", "Iron Bridge"),
    ("Seagraves", "Seagraves", "Seagrave"),
    ("Watt NSW Australia", "Watt NSW Australia", "Watta NSW Australia"),
    ("NSW", "NSW", "New South Wales"),
    ("Insurgents Mexico Convention", "Insurgents", "Insurgentes"),
    ("Insurgentes Baja", "Insurgentes Baja", "Insurgentes"),
    ("Almonte New York", "Almonte", "Altamont"),
    ("Dagar Montana", "Dagar", "Dagmar"),
    ("Miltown 2 Washington", "Miltown", "Milltown"),
    ("MIlltown 1 Washington", "MIlltown", "Milltown"),
    ("Mountain 1 Ranch", "Mountain 1 Ranch", "Mountain Ranch 1"),
    ("Mountain 2 Ranch", "Mountain 2 Ranch", "Mountain Ranch 2"),
    ("Perris Tennessee", "Perris", "Paris"),
    ("Roger Arkansas", "Roger", "Rogers"),
    ("Yellow Spring Ohio", "Yellow Spring", "Yellow Springs"),
    ("Post Falls,", "Post Falls,", "Post Falls"),
    ("Madisonville,", "Madisonville,", "Madisonville"),
    ("Dells,", "Dells,", "Dells"),
    ("Chaintreauville,", "Chaintreauville,", "Chaintreauville"),
    ("Ales,", "Ales,", "Ales"),
    ("Bonao,", "Bonao,", "Bonao"),
    ("Sart-Dames-Avelines,", "Sart-Dames-Avelines,", "Sart-Dames-Avelines"),
    // must precede directional expansion or the W. gets expanded alone
    ("N.W.", "N.W.", "Northwest"),
    ("Yorkton/Fort", "Yorkton/Fort", "Yorkton, Fort"),
    ("Brazil and Uruguay", "Brazil and Uruguay", "Brazil/Uruguay"),
    ("\u{2019}", "\u{2019}", "'"),
];

// "Glen Valley2", "GlenValley 2" etc. → "Glen Valley 2"
static RE_GLEN_VALLEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)glen\s*valley\s*(\d+)").unwrap());

// Compass-point abbreviations at a word boundary, with or without the dot:
// "N. Wyoming" → "North Wyoming", "NW Ontario" → "Northwest Ontario".
// Single-letter patterns run first; "NW " cannot be eaten by the "N" rule
// because that rule requires a dot or space right after the letter.
static DIRECTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("N", "North "),
        ("S", "South "),
        ("E", "East "),
        ("W", "West "),
        ("NW", "Northwest "),
        ("NE", "Northeast "),
        ("SW", "Southwest "),
        ("SE", "Southeast "),
    ]
    .iter()
    .map(|(abbr, full)| {
        (
            Regex::new(&format!(r"\b{abbr}\.?\s+")).expect("direction regex"),
            *full,
        )
    })
    .collect()
});

// Filler " for " between phrases carries no information.
static RE_FOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+for\s+").unwrap());

// Trailing comma after the event word.
static RE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)((?:Meeting|Convention))\s*,\s*$").unwrap());

/// Apply all literal and pattern corrections to one line.
pub fn normalize(line: &str) -> String {
    let mut line = line.to_string();

    // Unbalanced paren in one recurring entry
    if line.contains("(Escondido/Ramona") && !line.contains("(Escondido/Ramona)") {
        line = line.replace("(Escondido/Ramona", "(Escondido/Ramona)");
    }

    for (trigger, from, to) in FIXES {
        if line.contains(trigger) {
            line = line.replace(from, to);
        }
    }

    line = RE_GLEN_VALLEY.replace_all(&line, "Glen Valley $1").into_owned();

    for (re, full) in DIRECTIONS.iter() {
        line = re.replace_all(&line, *full).into_owned();
    }

    line = RE_FOR.replace_all(&line, " ").into_owned();
    line = RE_TRAILING_COMMA.replace(&line, "$1").into_owned();

    line
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_fixes() {
        assert_eq!(normalize("Apopka Florida Convvention"), "Apopka Florida Convention");
        assert_eq!(normalize("Ducan Canada Convention"), "Duncan Canada Convention");
        assert_eq!(
            normalize("Watt NSW Australia Convention"),
            "Watta New South Wales Australia Convention"
        );
    }

    #[test]
    fn test_context_sensitive_fixes() {
        assert_eq!(normalize("Roger Arkansas"), "Rogers Arkansas");
        // "Roger" alone is a valid name, not a typo
        assert_eq!(normalize("Roger Canada"), "Roger Canada");
        assert_eq!(normalize("Almonte New York"), "Altamont New York");
        assert_eq!(normalize("Almonte Ontario"), "Almonte Ontario");
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(
            normalize("Doak\u{2019}s Special Meeting Shed"),
            "Doak's Special Meeting Shed"
        );
    }

    #[test]
    fn test_glen_valley_number() {
        assert_eq!(normalize("glen valley2 BC"), "Glen Valley 2 BC");
        assert_eq!(normalize("GlenValley 2 BC"), "Glen Valley 2 BC");
    }

    #[test]
    fn test_direction_expansion() {
        assert_eq!(normalize("N. Wyoming"), "North Wyoming");
        assert_eq!(normalize("Manitoba/NW Ontario Staff Photo"), "Manitoba/Northwest Ontario Staff Photo");
        assert_eq!(normalize("Return to E. Canada"), "Return to East Canada");
        // no space after the letter: not a compass abbreviation
        assert_eq!(normalize("S.Africa Workers List"), "S.Africa Workers List");
    }

    #[test]
    fn test_for_and_trailing_comma() {
        assert_eq!(normalize("Visited for two weeks"), "Visited two weeks");
        assert_eq!(normalize("Alberta Convention, "), "Alberta Convention");
        assert_eq!(normalize("Special Meeting,"), "Special Meeting");
    }

    #[test]
    fn test_idempotent() {
        let lines = [
            "Watt NSW Australia Convention",
            "Doak\u{2019}s Special Meeting Shed",
            "Manitoba/N. Wyoming Workers List",
            "glen valley2 British Columbia",
            "Roger Arkansas Convention, ",
            "Brazil and Uruguay Convention",
        ];
        for line in lines {
            let once = normalize(line);
            assert_eq!(normalize(&once), once, "not idempotent for {line:?}");
        }
    }
}
