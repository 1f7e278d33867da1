//! Sectioning-content markup emission.
//!
//! The page-rendering walk calls one of the entry points once per sectioning
//! node it encounters, top-down. Each call streams, in order: the page's
//! table of contents (first call for the page only), the structural element
//! with its resolved anchor, a heading at the computed level, and the
//! captured body inside a level-tagged content wrapper:
//!
//! ```text
//! <section id="anchor" class="semanticcms-section">
//!   <h2>Label</h2>
//!   <div class="semanticcms-section-h2-content">…body…</div>
//! </section>
//! ```
//!
//! Output is forward-only; nothing is buffered beyond the captured bodies
//! the model already holds.

mod body;
mod level;
mod toc;

pub use body::{ElementContext, NoElements};
pub use level::resolve_level;
pub use toc::{FragmentRenderer, PageToc, TOC_FRAGMENT};

use std::io::Write;

use log::trace;

use crate::anchor::AnchorIndex;
use crate::encode::{AttrWriter, escape_text_into};
use crate::error::Result;
use crate::model::{ElementId, Page, SectioningKind};
use toc::TocState;

/// Request-scoped rendering context.
///
/// Constructed once per top-level render invocation and threaded explicitly
/// through the call chain — never ambient. Owns the per-request TOC state
/// and borrows the external collaborators that resolve includes.
pub struct RenderContext<'a> {
    toc: TocState,
    fragments: &'a dyn FragmentRenderer,
    elements: &'a dyn ElementContext,
}

impl<'a> RenderContext<'a> {
    pub fn new(fragments: &'a dyn FragmentRenderer, elements: &'a dyn ElementContext) -> Self {
        Self {
            toc: TocState::default(),
            fragments,
            elements,
        }
    }
}

/// Render a sectioning node as `<section>`.
pub fn render_section<W: Write>(
    ctx: &RenderContext<'_>,
    page: &Page,
    node: ElementId,
    out: &mut W,
    anchors: &dyn AnchorIndex,
) -> Result<()> {
    render_with_tag(ctx, page, node, SectioningKind::Section, out, anchors)
}

/// Render a sectioning node as `<aside>`.
pub fn render_aside<W: Write>(
    ctx: &RenderContext<'_>,
    page: &Page,
    node: ElementId,
    out: &mut W,
    anchors: &dyn AnchorIndex,
) -> Result<()> {
    render_with_tag(ctx, page, node, SectioningKind::Aside, out, anchors)
}

/// Render a sectioning node as `<nav>`.
pub fn render_nav<W: Write>(
    ctx: &RenderContext<'_>,
    page: &Page,
    node: ElementId,
    out: &mut W,
    anchors: &dyn AnchorIndex,
) -> Result<()> {
    render_with_tag(ctx, page, node, SectioningKind::Nav, out, anchors)
}

/// Render a sectioning node under its own kind's tag.
///
/// Non-sectioning nodes render nothing; the walk hands those to other
/// renderers.
pub fn render_sectioning_content<W: Write>(
    ctx: &RenderContext<'_>,
    page: &Page,
    node: ElementId,
    out: &mut W,
    anchors: &dyn AnchorIndex,
) -> Result<()> {
    let Some(kind) = page
        .element(node)
        .and_then(|element| element.content.sectioning())
        .map(|sectioning| sectioning.kind())
    else {
        return Ok(());
    };
    render_with_tag(ctx, page, node, kind, out, anchors)
}

fn render_with_tag<W: Write>(
    ctx: &RenderContext<'_>,
    page: &Page,
    node: ElementId,
    kind: SectioningKind,
    out: &mut W,
    anchors: &dyn AnchorIndex,
) -> Result<()> {
    let Some(element) = page.element(node) else {
        return Ok(());
    };
    let Some(sectioning) = element.content.sectioning() else {
        return Ok(());
    };

    // A node still under construction has no page association yet; it
    // renders, but cannot trigger the page's table of contents.
    if element.page().is_some() {
        toc::ensure_toc_rendered(&ctx.toc, ctx.fragments, page, out)?;
    }

    let level = level::resolve_level(page, node)?;
    trace!("rendering <{}> at h{}", kind.tag(), level);

    out.write_all(b"<")?;
    out.write_all(kind.tag().as_bytes())?;
    if let Some(id) = &sectioning.id {
        out.write_all(b" id=\"")?;
        anchors.append_unique_id(page, id, &mut AttrWriter::new(&mut *out))?;
        out.write_all(b"\"")?;
    }
    out.write_all(b" class=\"semanticcms-section\">")?;

    write!(out, "<h{}>", level)?;
    escape_text_into(out, &sectioning.label)?;
    write!(out, "</h{}>", level)?;

    if !sectioning.body.is_empty() {
        write!(out, "<div class=\"semanticcms-section-h{}-content\">", level)?;
        body::write_body(sectioning.body.as_bytes(), ctx.elements, out)?;
        out.write_all(b"</div>")?;
    }

    out.write_all(b"</")?;
    out.write_all(kind.tag().as_bytes())?;
    out.write_all(b">")?;
    Ok(())
}
