//! Table-of-contents gating and the stock TOC fragment.
//!
//! The TOC belongs as high in document order as possible, but the renderer
//! only ever sees one sectioning node at a time. The gate solves this: the
//! first render call for a page emits the TOC fragment before its own
//! markup, and every later call for that page skips it.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use log::debug;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::anchor::AnchorIndex;
use crate::encode::{escape_attr_into, escape_text_into};
use crate::error::{Error, Result};
use crate::model::{ElementId, Page, PageKey};

/// Fragment identifier the gate asks the include mechanism for.
pub const TOC_FRAGMENT: &str = "semanticcms-section/toc";

/// Synchronous fragment-include mechanism.
///
/// The gate requests [`TOC_FRAGMENT`] with the page bound as a parameter;
/// an implementation may render through any templating machinery. Failures
/// are arbitrary and get wrapped into [`Error::TocRender`].
pub trait FragmentRenderer {
    fn include(
        &self,
        fragment: &str,
        page: &Page,
        out: &mut dyn Write,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Per-request record of pages whose TOC has been emitted.
#[derive(Debug, Default)]
pub(crate) struct TocState {
    done: Mutex<HashSet<PageKey>>,
}

impl TocState {
    /// Atomic insert-if-absent: true exactly once per page, even under
    /// re-entrant or concurrent calls within the request.
    fn first_visit(&self, page: PageKey) -> bool {
        self.done
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page)
    }
}

/// Emit the page's TOC fragment if this is the first call for the page.
///
/// The done flag is set before the include runs, so a failed TOC render is
/// not retried on later sectioning nodes of the same page.
pub(crate) fn ensure_toc_rendered(
    state: &TocState,
    fragments: &dyn FragmentRenderer,
    page: &Page,
    out: &mut dyn Write,
) -> Result<()> {
    if state.first_visit(page.key()) {
        debug!("rendering table of contents for {:?}", page.key());
        fragments
            .include(TOC_FRAGMENT, page, out)
            .map_err(Error::TocRender)?;
    }
    Ok(())
}

/// Bytes percent-encoded inside a fragment href.
const FRAGMENT_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'%');

/// Stock table-of-contents fragment.
///
/// Walks the page's sectioning tree in document order and renders a nested
/// list inside `<nav class="semanticcms-section-toc">`. Entries with an id
/// link to the same anchors the markup emitter writes — both resolve through
/// the same anchor index — and entries without one render as plain text. A
/// page with no sectioning content renders nothing at all.
pub struct PageToc<'a> {
    anchors: &'a dyn AnchorIndex,
}

impl<'a> PageToc<'a> {
    pub fn new(anchors: &'a dyn AnchorIndex) -> Self {
        Self { anchors }
    }

    fn write_list(
        &self,
        page: &Page,
        entries: &[TocEntry],
        out: &mut dyn Write,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        out.write_all(b"<ol>")?;
        for entry in entries {
            let Some(sectioning) = page
                .element(entry.element)
                .and_then(|element| element.content.sectioning())
            else {
                continue;
            };
            out.write_all(b"<li>")?;
            match &sectioning.id {
                Some(id) => {
                    let mut anchor = Vec::new();
                    self.anchors.append_unique_id(page, id, &mut anchor)?;
                    let anchor = String::from_utf8(anchor)?;
                    out.write_all(b"<a href=\"#")?;
                    for chunk in utf8_percent_encode(&anchor, FRAGMENT_ENCODE) {
                        escape_attr_into(out, chunk)?;
                    }
                    out.write_all(b"\">")?;
                    escape_text_into(out, &sectioning.label)?;
                    out.write_all(b"</a>")?;
                }
                None => escape_text_into(out, &sectioning.label)?,
            }
            if !entry.children.is_empty() {
                self.write_list(page, &entry.children, out)?;
            }
            out.write_all(b"</li>")?;
        }
        out.write_all(b"</ol>")?;
        Ok(())
    }
}

impl FragmentRenderer for PageToc<'_> {
    fn include(
        &self,
        fragment: &str,
        page: &Page,
        out: &mut dyn Write,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if fragment != TOC_FRAGMENT {
            return Err(format!("unknown fragment: {}", fragment).into());
        }
        let mut entries = Vec::new();
        collect_entries(page, page.top_level(), &mut entries);
        if entries.is_empty() {
            return Ok(());
        }
        out.write_all(b"<nav class=\"semanticcms-section-toc\">")?;
        self.write_list(page, &entries, out)?;
        out.write_all(b"</nav>")?;
        Ok(())
    }
}

struct TocEntry {
    element: ElementId,
    children: Vec<TocEntry>,
}

/// Collect sectioning elements in document order. Containers are
/// transparent: their sectioning descendants surface at the current depth.
fn collect_entries(page: &Page, ids: &[ElementId], entries: &mut Vec<TocEntry>) {
    for &id in ids {
        let Some(element) = page.element(id) else {
            continue;
        };
        if element.content.is_sectioning() {
            let mut children = Vec::new();
            collect_entries(page, element.children(), &mut children);
            entries.push(TocEntry {
                element: id,
                children,
            });
        } else {
            collect_entries(page, element.children(), entries);
        }
    }
}
