use std::sync::OnceLock;

use regex::Regex;

fn outward_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{1,2}[0-9][A-Z0-9]?$").expect("valid outward regex"))
}

fn full_postcode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]{1,2}[0-9][A-Z0-9]?)\s*([0-9][A-Z]{2})$").expect("valid postcode regex")
    })
}

/// Reformat free text into UK postcode spacing: uppercase, collapse all
/// whitespace, then re-insert a single space before the final three
/// characters when more than an outward code remains. No grammar
/// validation happens here.
pub fn normalise_postcode(text: &str) -> String {
    let compact: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if compact.len() <= 3 {
        return compact.into_iter().collect();
    }

    let split = compact.len() - 3;
    let mut formatted = String::with_capacity(compact.len() + 1);
    formatted.extend(&compact[..split]);
    formatted.push(' ');
    formatted.extend(&compact[split..]);
    formatted
}

/// Pull the outward code (e.g. "CH5") from a postcode-shaped string.
/// Returns `None` when the leading token is not outward-shaped.
pub fn extract_outcode(text: &str) -> Option<String> {
    let normalised = normalise_postcode(text);
    let leading = normalised.split(' ').next().unwrap_or_default();

    if outward_pattern().is_match(leading) {
        Some(leading.to_string())
    } else {
        None
    }
}

/// Reduce either a bare outward code or a full postcode to its canonical
/// outward code. Bare codes are accepted verbatim; anything longer runs
/// through `extract_outcode` so "CH5 4HS" and "ch54hs" both become "CH5".
pub(crate) fn canonical_outcode(text: &str) -> Option<String> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if outward_pattern().is_match(&compact) {
        return Some(compact);
    }

    extract_outcode(text)
}

const ADDRESS_SCAN_WINDOW: usize = 4;

/// Best-effort postcode recovery from a free-text address.
///
/// Scans the last few comma/whitespace tokens from the end. Each position
/// is tried joined with its predecessor first (postcodes split across two
/// tokens, "CH7" "1AA"), then alone, against the strict full-postcode
/// pattern. The first full match wins. Failing that, the first
/// outward-shaped bare token found during the scan is returned, and an
/// empty string when nothing qualifies.
pub fn extract_postcode_from_address(address: &str) -> String {
    let tokens: Vec<String> = address
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_uppercase)
        .collect();

    let mut outward_fallback: Option<String> = None;
    let scan_start = tokens.len().saturating_sub(ADDRESS_SCAN_WINDOW);

    for index in (scan_start..tokens.len()).rev() {
        if index > 0 {
            let joined = format!("{}{}", tokens[index - 1], tokens[index]);
            if let Some(formatted) = format_full_postcode(&joined) {
                return formatted;
            }
        }

        if let Some(formatted) = format_full_postcode(&tokens[index]) {
            return formatted;
        }

        if outward_fallback.is_none() && outward_pattern().is_match(&tokens[index]) {
            outward_fallback = Some(tokens[index].clone());
        }
    }

    outward_fallback.unwrap_or_default()
}

fn format_full_postcode(candidate: &str) -> Option<String> {
    full_postcode_pattern()
        .captures(candidate)
        .map(|captures| format!("{} {}", &captures[1], &captures[2]))
}
