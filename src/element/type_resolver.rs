use crate::element::element_kind::ElementKind;
use crate::error::{NavigatorError, Result};

/// Map a locator to the element kind named by its final path segment.
///
/// The trailing `[...]` predicate is ignored, and matching against
/// [`ElementKind::ALL`] is case-insensitive:
///
/// ```text
/// /form/button[@id='ok']  -> Button
/// /table/CELL             -> Cell
/// ```
pub fn resolve_kind(locator: &str) -> Result<ElementKind> {
    let token = kind_token(locator);
    if token.is_empty() {
        return Err(NavigatorError::NoElement);
    }

    ElementKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.name().eq_ignore_ascii_case(token))
        .ok_or_else(|| NavigatorError::UnsupportedElement(token.to_string()))
}

/// The final segment of a locator with its predicate stripped.
///
/// Slashes inside a predicate (`[@path='a/b']`) do not start a new segment.
pub fn kind_token(locator: &str) -> &str {
    let mut depth = 0usize;
    let mut segment_start = 0;
    for (i, c) in locator.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => segment_start = i + 1,
            _ => {}
        }
    }

    let segment = &locator[segment_start..];
    match segment.find('[') {
        Some(i) => &segment[..i],
        None => segment,
    }
}
