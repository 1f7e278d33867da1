//! Element tree nodes.

use super::page::PageKey;

/// Marker byte bracketing an element reference embedded in a captured body.
///
/// A reference is `0x1B` + decimal element id + `0x1B`; anything else
/// involving the marker byte is passed through verbatim on replay.
pub(crate) const ELEMENT_MARKER: u8 = 0x1B;

/// Unique identifier for an element within a [`super::Page`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// The sectioning element kinds.
///
/// Behavior differs only in the output element name; heading-level
/// computation and TOC gating treat all three identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectioningKind {
    Section,
    Aside,
    Nav,
}

impl SectioningKind {
    /// Output element name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Aside => "aside",
            Self::Nav => "nav",
        }
    }
}

/// Pre-rendered markup captured for a sectioning node's body.
///
/// Bodies are materialized elsewhere (by whatever captured the nested
/// content) and replayed byte-for-byte during rendering, except for embedded
/// element references, which the replay resolves through an
/// [`crate::render::ElementContext`].
#[derive(Debug, Clone, Default)]
pub struct Body(Vec<u8>);

impl Body {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Append already-rendered markup verbatim.
    pub fn push_markup(&mut self, markup: &str) {
        self.0.extend_from_slice(markup.as_bytes());
    }

    /// Append a reference to an element captured separately.
    ///
    /// The replay resolves it through the element context at render time.
    pub fn push_reference(&mut self, element: ElementId) {
        self.0.push(ELEMENT_MARKER);
        self.0.extend_from_slice(element.0.to_string().as_bytes());
        self.0.push(ELEMENT_MARKER);
    }
}

impl From<&str> for Body {
    fn from(markup: &str) -> Self {
        Self(markup.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Payload shared by all sectioning variants.
#[derive(Debug, Clone)]
pub struct Sectioning {
    /// Requested anchor id, page-unique once resolved through the anchor
    /// index. Optional.
    pub id: Option<String>,
    /// Heading text. Required, plain text.
    pub label: String,
    /// Captured body markup. An empty body suppresses the content wrapper.
    pub body: Body,
    kind: SectioningKind,
}

impl Sectioning {
    pub fn new(kind: SectioningKind, label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            body: Body::new(),
            kind,
        }
    }

    pub fn section(label: impl Into<String>) -> Self {
        Self::new(SectioningKind::Section, label)
    }

    pub fn aside(label: impl Into<String>) -> Self {
        Self::new(SectioningKind::Aside, label)
    }

    pub fn nav(label: impl Into<String>) -> Self {
        Self::new(SectioningKind::Nav, label)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn kind(&self) -> SectioningKind {
        self.kind
    }
}

/// Element content.
#[derive(Debug, Clone)]
pub enum Content {
    /// A section, aside, or nav: heading plus optional body wrapper.
    Sectioning(Sectioning),
    /// Any other grouping element. Counts as an ancestor but never
    /// contributes to heading depth.
    Container,
}

impl Content {
    pub fn sectioning(&self) -> Option<&Sectioning> {
        match self {
            Self::Sectioning(sectioning) => Some(sectioning),
            Self::Container => None,
        }
    }

    pub fn is_sectioning(&self) -> bool {
        matches!(self, Self::Sectioning(_))
    }
}

/// A node in a page's element tree.
///
/// The parent link is single-assignment: it is set exactly once when the
/// element is attached into the page tree, which is what makes the upward
/// walk in level resolution cycle-free.
#[derive(Debug, Clone)]
pub struct Element {
    pub content: Content,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) page: Option<PageKey>,
}

impl Element {
    pub(crate) fn new(content: Content) -> Self {
        Self {
            content,
            parent: None,
            children: Vec::new(),
            page: None,
        }
    }

    /// Owning element, or None for a top-level or detached element.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Page this element has been attached to. None while the element is
    /// still under construction.
    pub fn page(&self) -> Option<PageKey> {
        self.page
    }
}
