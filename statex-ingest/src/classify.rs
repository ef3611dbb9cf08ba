//! Line classifier: picks out the lines that look like transactions.
//!
//! A candidate line starts at column 0 with a day-month token:
//!   15Jan16Jan  COFFEE SHOP LIMA   PE CONSUMO  45.50

/// True when `line` begins with two digits followed by three letters.
pub fn is_candidate(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 5
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..5].iter().all(u8::is_ascii_alphabetic)
}

/// True when one of the whitespace-separated tokens equals an exclusion marker.
pub fn has_exclusion_marker(line: &str, markers: &[String]) -> bool {
    !markers.is_empty() && line.split_whitespace().any(|tok| markers.iter().any(|m| m == tok))
}

/// Keep candidate lines in source order, minus those carrying an exclusion marker.
///
/// Trailing whitespace is dropped; leading whitespace never reaches this
/// point since a candidate starts with a digit.
pub fn classify_lines<'a>(text: &'a str, exclusion_markers: &[String]) -> Vec<&'a str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| is_candidate(line))
        .filter(|line| !has_exclusion_marker(line, exclusion_markers))
        .collect()
}
