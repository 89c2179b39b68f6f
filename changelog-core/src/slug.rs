//! Anchor identifiers for releases, groups and headings

/// Punctuation that is folded into a single separator
const SEPARATORS: &[char] = &[
    '(', ')', ',', '?', '{', '}', '.', ':', '[', ']', '=', ';', '&', '$',
];

/// Create an anchor id from display text
///
/// Runs of separator punctuation and runs of spaces become a single hyphen,
/// hyphen runs collapse, hyphens at either end are dropped and the result is
/// lower-cased. Characters outside the separator set are kept as they are.
pub fn format_id(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        let c = if c == ' ' || SEPARATORS.contains(&c) {
            '-'
        } else {
            c
        };

        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('-').to_lowercase()
}
