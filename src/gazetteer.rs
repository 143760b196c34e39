//! Country / region / city reference tables.
//!
//! The listing order of `COUNTRIES` (and of each `regions` slice) is part of
//! the matching contract: compound slash-joined regions are listed before
//! their components, and when two candidates match at the same position the
//! one listed first wins.

// ── Types ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub struct City {
    pub name: &'static str,
    /// Regions this city has appeared under. `None` marks a city of a
    /// country that tracks no regions at all.
    pub regions: &'static [Option<&'static str>],
}

#[derive(Clone, Copy)]
pub struct Country {
    pub name: &'static str,
    pub regions: &'static [&'static str],
    /// Abbreviation or known misspelling → canonical region name.
    pub region_variations: &'static [(&'static str, &'static str)],
    /// Alternate spellings of the country name itself.
    pub variations: &'static [&'static str],
    pub cities: &'static [City],
    /// Countries recorded in the source material as a single named site.
    pub special_location: Option<&'static str>,
}

const EMPTY: Country = Country {
    name: "",
    regions: &[],
    region_variations: &[],
    variations: &[],
    cities: &[],
    special_location: None,
};

// ── Data ───────────────────────────────────────────────────────────

pub static COUNTRIES: &[Country] = &[
    Country {
        name: "United States",
        regions: &[
            "Oregon/South Idaho",
            "Oregon/Southern Idaho",
            "Montana/North Wyoming",
            "New York/New England",
            "Ohio/West Virginia",
            "Pennsylvania/Ohio/West Virginia",
            "PA/NY/New England/NJ/OH",
            "PA/NY/New England/NJ",
            "Kentucky/Tennessee",
            "Tennessee/Kentucky",
            "Montana/Wyoming",
            "Alabama/Mississippi",
            "Kansas/Nebraska",
            "Maryland/Delaware",
            "Colorado/Utah",
            "Alabama",
            "Alaska",
            "Arizona",
            "Arkansas",
            "Chino California",
            "California",
            "Colorado",
            "Connecticut",
            "Delaware",
            "Florida",
            "Georgia",
            "Hawaii",
            "Idaho",
            "Illinois",
            "Indiana",
            "Iowa",
            "Kansas",
            "Kentucky",
            "Louisiana",
            "Maine",
            "Maryland",
            "Massachusetts",
            "Michigan",
            "Minnesota",
            "Mississippi",
            "Missouri",
            "Montana",
            "Nebraska",
            "Nevada",
            "New Hampshire",
            "New Jersey",
            "New Mexico",
            "New York",
            "North Carolina",
            "North Dakota",
            "Ohio",
            "Oklahoma",
            "Oregon",
            "Pennsylvania",
            "Rhode Island",
            "South Carolina",
            "South Dakota",
            "Tennessee",
            "Texas",
            "Utah",
            "Vermont",
            "Virginia",
            "Washington",
            "West Virginia",
            "Wisconsin",
            "Wyoming",
        ],
        region_variations: &[
            ("New Dakota", "North Dakota"),
            ("Virgina", "Virginia"),
            ("Washing", "Washington"),
            ("Kanasa", "Kansas"),
            ("AL", "Alabama"),
            ("AK", "Alaska"),
            ("AZ", "Arizona"),
            ("AR", "Arkansas"),
            ("CA", "California"),
            ("CO", "Colorado"),
            ("CT", "Connecticut"),
            ("DE", "Delaware"),
            ("FL", "Florida"),
            ("GA", "Georgia"),
            ("HI", "Hawaii"),
            ("ID", "Idaho"),
            ("IL", "Illinois"),
            ("IN", "Indiana"),
            ("IA", "Iowa"),
            ("KS", "Kansas"),
            ("KY", "Kentucky"),
            ("LA", "Louisiana"),
            ("ME", "Maine"),
            ("MD", "Maryland"),
            ("MA", "Massachusetts"),
            ("MI", "Michigan"),
            ("MN", "Minnesota"),
            ("MS", "Mississippi"),
            ("MO", "Missouri"),
            ("MT", "Montana"),
            ("NE", "Nebraska"),
            ("NV", "Nevada"),
            ("NH", "New Hampshire"),
            ("NJ", "New Jersey"),
            ("NM", "New Mexico"),
            ("NY", "New York"),
            ("NC", "North Carolina"),
            ("ND", "North Dakota"),
            ("OH", "Ohio"),
            ("OK", "Oklahoma"),
            ("OR", "Oregon"),
            ("PA", "Pennsylvania"),
            ("RI", "Rhode Island"),
            ("SC", "South Carolina"),
            ("SD", "South Dakota"),
            ("TN", "Tennessee"),
            ("TX", "Texas"),
            ("UT", "Utah"),
            ("VT", "Vermont"),
            ("VA", "Virginia"),
            ("WA", "Washington"),
            ("WV", "West Virginia"),
            ("WI", "Wisconsin"),
            ("WY", "Wyoming"),
        ],
        cities: &[
            City { name: "Picton", regions: &[Some("Oklahoma")] },
            City { name: "Anadarko", regions: &[Some("Oklahoma")] },
            City { name: "Buttonwillow", regions: &[Some("California")] },
            City { name: "Eagle Bend", regions: &[Some("Minnesota")] },
            City { name: "Eagle Bend 1", regions: &[Some("Minnesota")] },
            City { name: "Buttonwillow 2", regions: &[Some("California")] },
            City { name: "Knoxville", regions: &[Some("Tennessee")] },
            City { name: "Gilbert", regions: &[Some("Arizona")] },
            City { name: "Anchorage", regions: &[Some("Alaska")] },
            City { name: "Clover", regions: &[Some("South Carolina")] },
            City { name: "Alma", regions: &[Some("Michigan")] },
        ],
        ..EMPTY
    },
    Country {
        name: "Canada",
        regions: &[
            "Quebec and Atlantic",
            "Ontario/Quebec",
            "Manitoba/Northwest Ontario",
            "Manitoba/Ontario",
            "Saskatchewan/Manitoba/Northwest Ontario",
            "Saskatchewan/Manitoba",
            "Quebec/Atlantic",
            "Calgary",
            "Maritimes",
            "Alberta",
            "Atlantic",
            "British Columbia",
            "Manitoba",
            "New Brunswick",
            "Newfoundland and Labrador",
            "Nova Scotia",
            "Ontario",
            "Prince Edward Island",
            "Quebec",
            "Saskatchewan",
            "Northwest Territories",
            "Nunavut",
            "Yukon",
        ],
        region_variations: &[
            ("SK", "Saskatchewan"),
            ("BC", "British Columbia"),
            ("AB", "Alberta"),
            ("MB", "Manitoba"),
            ("ON", "Ontario"),
            ("QC", "Quebec"),
            ("NB", "New Brunswick"),
            ("NS", "Nova Scotia"),
            ("PE", "Prince Edward Island"),
            ("NL", "Newfoundland and Labrador"),
            ("Newfoundland", "Newfoundland and Labrador"),
            ("NT", "Northwest Territories"),
            ("NU", "Nunavut"),
            ("YT", "Yukon"),
        ],
        cities: &[
            City { name: "Salmon Arm", regions: &[Some("Saskatchewan")] },
            City { name: "Portage", regions: &[Some("Manitoba")] },
            City { name: "Prince George", regions: &[Some("British Columbia")] },
            City { name: "Irishtown", regions: &[Some("Newfoundland and Labrador")] },
            City { name: "Glen Valley 2", regions: &[Some("British Columbia")] },
            City { name: "Glen Valley", regions: &[Some("British Columbia")] },
        ],
        ..EMPTY
    },
    Country { name: "Austria", ..EMPTY },
    Country { name: "Germany", ..EMPTY },
    Country { name: "Orient", special_location: Some("Convention"), ..EMPTY },
    Country { name: "Nigeria", ..EMPTY },
    Country { name: "Belgium", ..EMPTY },
    Country { name: "Sri Lanka", special_location: Some("Convention"), ..EMPTY },
    Country { name: "Guam", special_location: Some("Convention"), ..EMPTY },
    Country {
        name: "Peru",
        regions: &["Olmos"],
        special_location: Some("Convention"),
        ..EMPTY
    },
    Country { name: "Bolivia", special_location: Some("Convention"), ..EMPTY },
    Country {
        name: "Australia/Papua New Guinea",
        regions: &["Tasmania"],
        ..EMPTY
    },
    Country {
        name: "Australia",
        regions: &[
            "Victoria",
            "Victoria and Tasmania",
            "Tasmania",
            "New South Wales",
            "Queensland",
            "South Australia",
            "Western Australia",
            "Northern Territory",
            "Australian Capital Territory",
        ],
        variations: &["Australian"],
        ..EMPTY
    },
    Country { name: "New Zealand", ..EMPTY },
    Country { name: "United Kingdom", variations: &["UK"], ..EMPTY },
    Country { name: "Ireland", ..EMPTY },
    Country {
        name: "South Africa",
        variations: &["S. Africa"],
        regions: &["Johannesburg"],
        ..EMPTY
    },
    Country { name: "West Africa", variations: &["W. Africa"], ..EMPTY },
    Country { name: "Africa", ..EMPTY },
    Country { name: "South America", ..EMPTY },
    Country { name: "Finland", ..EMPTY },
    Country { name: "Netherlands", ..EMPTY },
    Country { name: "Jamaica", ..EMPTY },
    Country { name: "Haiti", ..EMPTY },
    Country { name: "Korea", ..EMPTY },
    Country { name: "Philippines", ..EMPTY },
    Country { name: "Argentina/Paraguay/Uruguay", ..EMPTY },
    Country { name: "Argentina/Paraguay", ..EMPTY },
    Country { name: "Brazil and Uruguay", ..EMPTY },
    Country { name: "Brazil", ..EMPTY },
    Country { name: "Ecuador", regions: &["La Paz", "Galapagos"], ..EMPTY },
    Country { name: "India", regions: &["Bangalore"], ..EMPTY },
    Country { name: "Scotland", ..EMPTY },
    Country { name: "Trinidad", ..EMPTY },
    Country { name: "Japan", regions: &["Tokyo"], ..EMPTY },
    Country { name: "Guatemala", ..EMPTY },
    Country { name: "Denmark", ..EMPTY },
    Country { name: "Mexico", ..EMPTY },
    Country { name: "Spain", ..EMPTY },
    Country { name: "Greece", ..EMPTY },
    Country {
        name: "Argentina",
        cities: &[
            City { name: "Rio Cuarto", regions: &[None] },
            City { name: "San Rafael", regions: &[None] },
            City { name: "Cipolletti", regions: &[None] },
        ],
        ..EMPTY
    },
    Country { name: "Italy", ..EMPTY },
    Country { name: "France", regions: &["Paris"], ..EMPTY },
    Country { name: "Romania", ..EMPTY },
    Country { name: "Sweden", regions: &["Stockholm"], ..EMPTY },
    Country { name: "Norway", ..EMPTY },
    Country {
        name: "Venezuela",
        regions: &["Caracas", "Barquisimeto"],
        ..EMPTY
    },
    Country { name: "Taiwan", ..EMPTY },
    Country { name: "Poland", ..EMPTY },
    Country {
        name: "Columbia",
        variations: &["Colombia"],
        regions: &["Ipiales"],
        ..EMPTY
    },
    Country { name: "Grand Cayman", ..EMPTY },
    Country { name: "Barbados", ..EMPTY },
    Country { name: "Guyana", ..EMPTY },
    Country { name: "Hong Kong", ..EMPTY },
    Country { name: "China", ..EMPTY },
    Country { name: "Saipan", ..EMPTY },
    Country {
        name: "Dominican Republic",
        variations: &["Republica Dominicana"],
        ..EMPTY
    },
    Country { name: "Suriname", ..EMPTY },
    Country { name: "Nevis", ..EMPTY },
    Country { name: "St. Kitts", ..EMPTY },
    Country { name: "Antigua", ..EMPTY },
    Country {
        name: "Caribbean",
        regions: &[
            "Antigua",
            "Barbados",
            "Cayman Islands",
            "Dominican Republic",
            "Grenada",
            "Guadeloupe",
            "Haiti",
            "Jamaica",
            "St. Kitts",
            "St. Lucia",
            "St. Vincent",
            "Trinidad",
        ],
        ..EMPTY
    },
    Country { name: "Cayman Islands", variations: &["Cayman Brac"], ..EMPTY },
    Country { name: "Zimbabwe", regions: &["Serial"], ..EMPTY },
    Country { name: "Pakistan", regions: &["Mirpur Khas"], ..EMPTY },
];

// ── Lookup helpers ─────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Position of the first whole-word occurrence of `needle` in `haystack`.
///
/// A boundary is only required on a side where the needle itself starts or
/// ends with a word character, so needles like "S. Africa" behave the same
/// way a `\b`-delimited regex would.
pub fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let first_is_word = needle.chars().next().map(is_word_char).unwrap_or(false);
    let last_is_word = needle.chars().next_back().map(is_word_char).unwrap_or(false);

    for (pos, _) in haystack.match_indices(needle) {
        let before_ok = !first_is_word
            || haystack[..pos].chars().next_back().is_none_or(|c| !is_word_char(c));
        let after_ok = !last_is_word
            || haystack[pos + needle.len()..]
                .chars()
                .next()
                .is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return Some(pos);
        }
    }
    None
}

/// Remove every whole-word occurrence of `needle` from `haystack`.
pub fn remove_word(haystack: &str, needle: &str) -> String {
    let mut out = haystack.to_string();
    while let Some(pos) = find_word(&out, needle) {
        out.replace_range(pos..pos + needle.len(), "");
    }
    out
}

pub fn by_name(name: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.name == name)
}

/// Expand a two-letter region code (US state or Canadian province) to the
/// canonical region name.
pub fn region_code(code: &str) -> Option<&'static str> {
    for country in COUNTRIES {
        for (var, full) in country.region_variations {
            if *var == code {
                return Some(full);
            }
        }
    }
    None
}

// ── Tests ──────────────────────────────────────────────────────────
