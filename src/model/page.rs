//! Page model: element arena and attachment.

use std::sync::atomic::{AtomicU64, Ordering};

use super::element::{Content, Element, ElementId};

/// Process-unique page identity.
///
/// Stands in for reference equality: two pages compare equal only if they
/// are the same page instance. Keys are allocated from a global counter and
/// never reused, so a key held after its page is dropped can never alias a
/// newer page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey(u64);

static NEXT_PAGE_KEY: AtomicU64 = AtomicU64::new(1);

impl PageKey {
    fn next() -> Self {
        Self(NEXT_PAGE_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Root of one rendered document.
///
/// Owns the element arena; elements never outlive their page. The rendering
/// walk treats the page as read-only.
#[derive(Debug)]
pub struct Page {
    key: PageKey,
    elements: Vec<Element>,
    top_level: Vec<ElementId>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            key: PageKey::next(),
            elements: Vec::new(),
            top_level: Vec::new(),
        }
    }

    /// This page's identity token.
    pub fn key(&self) -> PageKey {
        self.key
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    /// Top-level elements in document order.
    pub fn top_level(&self) -> &[ElementId] {
        &self.top_level
    }

    /// Allocate an element without attaching it into the page tree.
    ///
    /// The element has no parent and no page association until
    /// [`Page::attach`] is called; rendering such an element works but skips
    /// the table-of-contents step.
    pub fn alloc(&mut self, content: Content) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(content));
        id
    }

    /// Attach a previously allocated element under `parent`, or at the top
    /// level when `parent` is None.
    ///
    /// The parent link is single-assignment; attaching twice is a
    /// construction bug.
    pub fn attach(&mut self, id: ElementId, parent: Option<ElementId>) {
        let key = self.key;
        let element = &mut self.elements[id.0 as usize];
        assert!(
            element.parent.is_none() && element.page.is_none(),
            "element already attached"
        );
        element.parent = parent;
        element.page = Some(key);
        match parent {
            Some(parent) => self.elements[parent.0 as usize].children.push(id),
            None => self.top_level.push(id),
        }
    }

    /// Allocate and attach in one step.
    pub fn push(&mut self, parent: Option<ElementId>, content: Content) -> ElementId {
        let id = self.alloc(content);
        self.attach(id, parent);
        id
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
