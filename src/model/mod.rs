//! Content model for sectioning rendering.
//!
//! This module contains:
//! - Page identity and the element arena
//! - Element tree nodes with single-assignment parent links
//! - Sectioning content payloads (section, aside, nav)
//! - Captured body buffers with embedded element references

mod element;
mod page;

pub(crate) use element::ELEMENT_MARKER;

pub use element::{Body, Content, Element, ElementId, Sectioning, SectioningKind};
pub use page::{Page, PageKey};
