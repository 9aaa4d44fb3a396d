//! Divergence-point heuristic between two versions of a document.
//!
//! Not an edit-distance diff. Editors overwhelmingly either append after an
//! unchanged head or insert before an unchanged tail, so comparing the
//! longest common suffix first and falling back to the longest common
//! prefix finds the interesting boundary in O(min(n,m)) with no
//! allocation. False-positive placement is acceptable: this runs on every
//! save and only steers viewer auto-scroll.

/// Offset into `new` where it is believed to diverge from `old`.
///
/// Suffix-first: when a common suffix longer than one byte exists and does
/// not span the whole of `new`, the edit happened before that tail and the
/// divergence point is `new.len() - suffix`. Otherwise the edit happened
/// after the common head, at the common-prefix length. The result is
/// always on a UTF-8 character boundary of `new`.
pub fn divergence_offset(old: &str, new: &str) -> usize {
    let suffix = common_suffix_len(old, new);
    if suffix > 1 && suffix < new.len() {
        return floor_char_boundary(new, new.len() - suffix);
    }
    floor_char_boundary(new, common_prefix_len(old, new))
}

/// Length in bytes of the longest common prefix.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length in bytes of the longest common suffix.
fn common_suffix_len(a: &str, b: &str) -> usize {
    a.as_bytes()
        .iter()
        .rev()
        .zip(b.as_bytes().iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Largest char boundary of `s` that is <= `index`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
