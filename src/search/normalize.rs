//! Free-text normalization for county names and result classification

/// Lower-cased suffix checked before adding " County"
const COUNTY_SUFFIX_LOWER: &str = " county";

/// Values that mean "no data", after trimming and lower-casing
const MISSING_MARKERS: [&str; 9] = [
    "",
    "n/a",
    "na",
    "null",
    "none",
    "not found",
    "notfound",
    "no data",
    "missing",
];

/// C-locale whitespace: space, \t, \n, \v, \f, \r
fn is_c_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Strip leading and trailing C-locale whitespace
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_c_space)
}

/// ASCII case-insensitive suffix test
pub fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

/// Capitalize the first letter of each word and lower-case the rest
///
/// A word starts after a space, '-' or tab. Any other non-letter, such as a
/// digit or apostrophe, continues the current word.
pub fn title_case(s: &str) -> String {
    let mut new_word = true;
    s.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let out = if new_word {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                };
                new_word = false;
                out
            } else {
                new_word = matches!(c, ' ' | '-' | '\t');
                c
            }
        })
        .collect()
}

/// Spellings of a county to try, in order
///
/// `[raw, raw + " County", Title, Title + " County"]` with the suffixed forms
/// skipped when the name already ends in "county", and the title-cased pair
/// skipped when title-casing changes nothing. Duplicates are kept.
pub fn county_candidates(raw: &str) -> Vec<String> {
    let base = trim(raw).to_string();
    let titled = title_case(&base);
    let mut candidates = Vec::with_capacity(4);

    let with_suffix = |name: &str| {
        if ends_with_ignore_case(name, COUNTY_SUFFIX_LOWER) {
            None
        } else {
            Some(format!("{} County", name))
        }
    };

    let base_suffixed = with_suffix(&base);
    let titled_suffixed = with_suffix(&titled);
    let changed = titled != base;

    candidates.push(base);
    candidates.extend(base_suffixed);
    if changed {
        candidates.push(titled);
        candidates.extend(titled_suffixed);
    }
    candidates
}

/// Whether a lookup result stands for missing data
pub fn is_na(value: &str) -> bool {
    let normalized = trim(value).to_ascii_lowercase();
    MISSING_MARKERS.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_county_candidates_lowercase_input() {
        assert_eq!(
            county_candidates(" alachua "),
            vec!["alachua", "alachua County", "Alachua", "Alachua County"]
        );
    }

    #[test]
    fn test_county_candidates_already_title_case() {
        assert_eq!(county_candidates("Alachua"), vec!["Alachua", "Alachua County"]);
    }

    #[test]
    fn test_county_candidates_already_suffixed() {
        assert_eq!(county_candidates("Alachua County"), vec!["Alachua County"]);
        assert_eq!(
            county_candidates("alachua county"),
            vec!["alachua county", "Alachua County"]
        );
    }

    #[test]
    fn test_county_candidates_upper_case_input() {
        assert_eq!(
            county_candidates("DE KALB"),
            vec!["DE KALB", "DE KALB County", "De Kalb", "De Kalb County"]
        );
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("miami-dade"), "Miami-Dade");
        assert_eq!(title_case("st. lucie"), "St. Lucie");
        assert_eq!(title_case("o'brien"), "O'brien");
        assert_eq!(title_case("prince george's"), "Prince George's");
        assert_eq!(title_case("a\tb"), "A\tB");
        assert_eq!(title_case("1st district"), "1st District");
    }

    #[test]
    fn test_is_na() {
        assert!(is_na("N/A"));
        assert!(is_na("  none "));
        assert!(is_na("Not Found"));
        assert!(is_na(""));
        assert!(is_na("NULL"));
        assert!(is_na("\tmissing\n"));
        assert!(!is_na("0.00"));
        assert!(!is_na("3.50"));
        assert!(!is_na("nan"));
    }

    #[test]
    fn test_trim_c_whitespace() {
        assert_eq!(trim(" \t alachua \r\n"), "alachua");
        assert_eq!(trim("\x0bx\x0c"), "x");
    }

    #[test]
    fn test_ends_with_ignore_case() {
        assert!(ends_with_ignore_case("Alachua COUNTY", " county"));
        assert!(!ends_with_ignore_case("Alachua", " county"));
        assert!(!ends_with_ignore_case("ty", " county"));
    }
}
