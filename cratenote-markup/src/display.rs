//! Display helpers for entity names.

/// Strip a trailing disambiguation suffix from an artist display name.
///
/// Discogs appends `" (N)"` to distinguish same-named artists, as in
/// `"Salamanda (8)"`; the suffix is noise for display. Only a suffix of one
/// or more ASCII digits inside the final parentheses is removed; anything
/// else is returned unchanged. Release and master titles may legitimately
/// end in parenthesized numbers, so this is applied to artist names only.
///
/// # Examples
///
/// ```
/// use cratenote_markup::strip_disambiguation_suffix;
///
/// assert_eq!(strip_disambiguation_suffix("Salamanda (8)"), "Salamanda");
/// assert_eq!(strip_disambiguation_suffix("Artist (Band)"), "Artist (Band)");
/// assert_eq!(strip_disambiguation_suffix("Boards of Canada"), "Boards of Canada");
/// ```
pub fn strip_disambiguation_suffix(name: &str) -> &str {
    let Some(without_paren) = name.strip_suffix(')') else {
        return name;
    };
    let Some(open) = without_paren.rfind(" (") else {
        return name;
    };
    let digits = &without_paren[open + 2..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return name;
    }
    &name[..open]
}
