//! Heading-level resolution from structural nesting depth.

use crate::error::{Error, Result};
use crate::model::{Element, ElementId, Page};

/// Compute the heading level for a sectioning node.
///
/// `<h1>` is reserved for the page title, so the level starts at 2 and grows
/// by one for every sectioning ancestor on the parent chain, regardless of
/// kind. Levels past `<h6>` cannot be represented in the heading vocabulary
/// and fail with [`Error::DepthExceeded`].
///
/// The walk is O(depth) and recomputed per node; document nesting is shallow
/// enough that caching buys nothing.
pub fn resolve_level(page: &Page, node: ElementId) -> Result<u8> {
    let mut level: u8 = 2;
    let mut parent = page.element(node).and_then(Element::parent);
    while let Some(id) = parent {
        let Some(ancestor) = page.element(id) else {
            break;
        };
        if ancestor.content.is_sectioning() {
            level = level.saturating_add(1);
        }
        parent = ancestor.parent();
    }
    if level > 6 {
        return Err(Error::DepthExceeded { level });
    }
    Ok(level)
}
