//! Page-unique anchor resolution.
//!
//! Anchor ids are unique within one page, but a combined view can render
//! many pages into a single document, where ids would collide. The anchor
//! index decides the final id string; the renderer only supplies the
//! requested id and an output position.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::model::{Page, PageKey};

/// Produces page-unique id strings for fragment navigation.
///
/// Implementations must be idempotent for the same `(page, id)` pair within
/// a render, so that the emitted anchor and every TOC link to it agree.
pub trait AnchorIndex {
    /// Write the page-unique form of `id` to `out`.
    fn append_unique_id(&self, page: &Page, id: &str, out: &mut dyn Write) -> io::Result<()>;
}

/// Single-page view: ids are already unique, write them unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectAnchors;

impl AnchorIndex for DirectAnchors {
    fn append_unique_id(&self, _page: &Page, id: &str, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(id.as_bytes())
    }
}

/// Combined many-page view.
///
/// Pages present in the index get their ids namespaced as `page{n}-{id}`,
/// where `n` is the page's 1-based position in the combined document. Pages
/// outside the index fall through to the direct form.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    positions: HashMap<PageKey, usize>,
}

impl PageIndex {
    pub fn new(pages: impl IntoIterator<Item = PageKey>) -> Self {
        let positions = pages
            .into_iter()
            .enumerate()
            .map(|(index, key)| (key, index + 1))
            .collect();
        Self { positions }
    }

    /// 1-based position of `page` in the combined document, if indexed.
    pub fn position(&self, page: PageKey) -> Option<usize> {
        self.positions.get(&page).copied()
    }
}

impl AnchorIndex for PageIndex {
    fn append_unique_id(&self, page: &Page, id: &str, out: &mut dyn Write) -> io::Result<()> {
        if let Some(position) = self.positions.get(&page.key()) {
            write!(out, "page{}-", position)?;
        }
        out.write_all(id.as_bytes())
    }
}
