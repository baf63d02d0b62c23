#![allow(clippy::unwrap_used)]

mod tests_lookup;

use crate::base::{Position, Span};

/// Span on one line between two columns
pub(super) fn span(line: usize, start: usize, end: usize) -> Span {
    Span::new(
        Position::new(line, start, (line - 1) * 100 + start - 1),
        Position::new(line, end, (line - 1) * 100 + end - 1),
    )
}

pub(super) fn lines(first: usize, last: usize) -> Span {
    Span::new(
        Position::new(first, 1, (first - 1) * 100),
        Position::new(last, 99, (last - 1) * 100 + 98),
    )
}
