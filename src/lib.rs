//! # sectioning-html
//!
//! Renders a CMS page's sectioning content — sections, asides, and navs —
//! as nested XHTML, deriving heading levels from structural nesting depth
//! and inserting the page's table of contents exactly once, at the first
//! sectioning node rendered.
//!
//! ## Features
//!
//! - Heading levels computed from the parent chain: a top-level section is
//!   `<h2>` (the page title owns `<h1>`), each sectioning ancestor adds one,
//!   and nesting past `<h6>` is a hard error
//! - Once-per-page TOC gating that survives re-entrant render calls
//! - Page-unique anchors, directly or namespaced through a [`PageIndex`]
//!   for combined many-page views
//! - Captured bodies replayed with element-reference rewriting
//!
//! ## Quick Start
//!
//! ```
//! use sectioning_html::{
//!     Content, DirectAnchors, NoElements, Page, PageToc, RenderContext, Sectioning,
//!     render_section,
//! };
//!
//! let mut page = Page::new();
//! let intro = page.push(
//!     None,
//!     Content::Sectioning(
//!         Sectioning::section("Introduction")
//!             .with_id("intro")
//!             .with_body("<p>Welcome.</p>"),
//!     ),
//! );
//!
//! let anchors = DirectAnchors;
//! let toc = PageToc::new(&anchors);
//! let ctx = RenderContext::new(&toc, &NoElements);
//!
//! let mut out = Vec::new();
//! render_section(&ctx, &page, intro, &mut out, &anchors).unwrap();
//!
//! let html = String::from_utf8(out).unwrap();
//! assert!(html.starts_with("<nav class=\"semanticcms-section-toc\">"));
//! assert!(html.contains(
//!     "<section id=\"intro\" class=\"semanticcms-section\"><h2>Introduction</h2>"
//! ));
//! ```
//!
//! The model is built in memory (see [`Page::push`], or [`Page::alloc`] plus
//! [`Page::attach`] for two-phase construction); parsing pages into the
//! model is out of scope for this crate, as are the outer page chrome and
//! the transport that drives the walk.

pub mod anchor;
pub mod encode;
pub mod error;
pub mod model;
pub mod render;

pub use anchor::{AnchorIndex, DirectAnchors, PageIndex};
pub use error::{Error, Result};
pub use model::{Body, Content, Element, ElementId, Page, PageKey, Sectioning, SectioningKind};
pub use render::{
    ElementContext, FragmentRenderer, NoElements, PageToc, RenderContext, TOC_FRAGMENT,
    render_aside, render_nav, render_section, render_sectioning_content, resolve_level,
};
