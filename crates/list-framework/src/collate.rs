//! Russian-friendly string ordering and matching.
//!
//! The CRM's data is mostly Cyrillic. Plain code-point ordering gets two things wrong for
//! it: upper case sorts before all lower case, and `ё` (U+0451) lands after `я`. The
//! comparison here folds case, places `ё` right after `е`, and only falls back to exact
//! code points to break ties, so distinct strings never compare equal.

use std::cmp::Ordering;

/// Primary weight of one character: lower-cased, with `ё` folded onto `е`.
fn primary(c: char) -> char {
    match c {
        'ё' | 'Ё' => 'е',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Secondary weight: distinguishes `ё` from `е` once everything else is equal.
fn secondary(c: char) -> u8 {
    matches!(c, 'ё' | 'Ё') as u8
}

/// Compare two strings the way a Russian-locale collator at base strength would, with a
/// deterministic tiebreak.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| a.chars().map(secondary).cmp(b.chars().map(secondary)))
        .then_with(|| a.cmp(b))
}

/// Lower-case `s` for case-insensitive matching.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive substring test. `needle` must already be folded.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || fold(haystack).contains(folded_needle)
}
