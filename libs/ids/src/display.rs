//! Bounded diagnostic formatting shared by all collection types
//!
//! Downstream logging relies on collection output staying short: at most
//! [`DISPLAY_LIMIT`] elements are printed, after which the [`ELLIPSIS`]
//! marker is appended. Both values are part of the public contract; tests and
//! log parsers assert against them.

use std::fmt;

/// Maximum number of elements rendered by `Display` before truncation.
pub const DISPLAY_LIMIT: usize = 32;

/// Marker appended after [`DISPLAY_LIMIT`] elements.
pub const ELLIPSIS: &str = "...";

/// Write `[a, b, c, ...]`, truncating after [`DISPLAY_LIMIT`] elements.
///
/// `len` is the full element count, which for the bitmap representation is
/// cheaper to ask for than to count by exhausting the iterator.
pub(crate) fn fmt_bounded<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
    len: usize,
) -> fmt::Result {
    write!(f, "[")?;
    for (position, item) in items.take(DISPLAY_LIMIT).enumerate() {
        if position > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    if len > DISPLAY_LIMIT {
        write!(f, ", {ELLIPSIS}")?;
    }
    write!(f, "]")
}
