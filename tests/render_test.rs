//! Integration tests over the full rendering protocol: markup shape,
//! heading levels, anchor resolution, and once-per-page TOC behavior.

use std::cell::Cell;
use std::io::Write;

use sectioning_html::{
    Content, DirectAnchors, ElementContext, ElementId, Error, FragmentRenderer, NoElements, Page,
    PageIndex, PageToc, RenderContext, Sectioning, render_aside, render_nav, render_section,
    render_sectioning_content,
};

const TOC_OPEN: &str = "<nav class=\"semanticcms-section-toc\">";

fn section(label: &str) -> Content {
    Content::Sectioning(Sectioning::section(label))
}

fn render_to_string(
    ctx: &RenderContext<'_>,
    page: &Page,
    nodes: &[ElementId],
    anchors: &dyn sectioning_html::AnchorIndex,
) -> String {
    let mut out = Vec::new();
    for &node in nodes {
        render_sectioning_content(ctx, page, node, &mut out, anchors).unwrap();
    }
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Markup shape
// ============================================================================

#[test]
fn test_section_markup_shape() {
    let mut page = Page::new();
    let node = page.push(
        None,
        Content::Sectioning(
            Sectioning::section("Overview")
                .with_id("overview")
                .with_body("<p>Body.</p>"),
        ),
    );

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    let expected_tail = "<section id=\"overview\" class=\"semanticcms-section\">\
                         <h2>Overview</h2>\
                         <div class=\"semanticcms-section-h2-content\"><p>Body.</p></div>\
                         </section>";
    assert!(html.ends_with(expected_tail), "got: {}", html);
}

#[test]
fn test_empty_body_has_no_content_div() {
    let mut page = Page::new();
    let node = page.push(None, section("Bare"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    assert!(html.contains("<h2>Bare</h2></section>"));
    assert!(!html.contains("<div"));
}

#[test]
fn test_content_div_class_tracks_heading_level() {
    let mut page = Page::new();
    let outer = page.push(None, section("Outer"));
    let inner = page.push(
        Some(outer),
        Content::Sectioning(Sectioning::section("Inner").with_body("<p>x</p>")),
    );

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[inner], &anchors);

    assert!(html.contains("<h3>Inner</h3>"));
    assert_eq!(
        html.matches("<div class=\"semanticcms-section-h3-content\">").count(),
        1
    );
}

#[test]
fn test_id_goes_on_structural_tag_not_heading() {
    let mut page = Page::new();
    let node = page.push(
        None,
        Content::Sectioning(Sectioning::section("Intro").with_id("intro")),
    );

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    assert!(html.contains("<section id=\"intro\" class=\"semanticcms-section\">"));
    assert!(html.contains("<h2>Intro</h2>"));
    assert!(!html.contains("<h2 id"));
}

#[test]
fn test_aside_and_nav_tags() {
    let mut page = Page::new();
    let aside = page.push(None, Content::Sectioning(Sectioning::aside("Notes")));
    let nav = page.push(None, Content::Sectioning(Sectioning::nav("Links")));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);

    let mut out = Vec::new();
    render_aside(&ctx, &page, aside, &mut out, &anchors).unwrap();
    render_nav(&ctx, &page, nav, &mut out, &anchors).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(html.contains("<aside class=\"semanticcms-section\"><h2>Notes</h2></aside>"));
    assert!(html.contains("<nav class=\"semanticcms-section\"><h2>Links</h2></nav>"));
}

#[test]
fn test_label_is_text_escaped() {
    let mut page = Page::new();
    let node = page.push(None, section("Q&A <FAQ>"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    assert!(html.contains("<h2>Q&amp;A &lt;FAQ&gt;</h2>"));
}

// ============================================================================
// Heading levels
// ============================================================================

#[test]
fn test_five_levels_deep_renders_h6() {
    let mut page = Page::new();
    let mut parent = None;
    let mut nodes = Vec::new();
    for i in 0..5 {
        let id = page.push(parent, section(&format!("Level {}", i)));
        nodes.push(id);
        parent = Some(id);
    }

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[nodes[4]], &anchors);

    assert!(html.contains("<h6>Level 4</h6>"));
}

#[test]
fn test_six_levels_deep_fails() {
    let mut page = Page::new();
    let mut parent = None;
    let mut deepest = None;
    for i in 0..6 {
        let id = page.push(parent, section(&format!("Level {}", i)));
        parent = Some(id);
        deepest = Some(id);
    }

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);

    let mut out = Vec::new();
    let result = render_section(&ctx, &page, deepest.unwrap(), &mut out, &anchors);
    match result {
        Err(Error::DepthExceeded { level }) => assert_eq!(level, 7),
        other => panic!("expected DepthExceeded, got {:?}", other),
    }
}

// ============================================================================
// Table of contents
// ============================================================================

#[test]
fn test_toc_renders_once_before_first_node() {
    let mut page = Page::new();
    let a = page.push(None, section("A"));
    let b = page.push(None, section("B"));
    let c = page.push(None, section("C"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[a, b, c], &anchors);

    assert_eq!(html.matches(TOC_OPEN).count(), 1);
    let toc_at = html.find(TOC_OPEN).unwrap();
    let first_section_at = html.find("<section").unwrap();
    assert!(toc_at < first_section_at);
}

#[test]
fn test_revisiting_a_node_never_repeats_toc() {
    let mut page = Page::new();
    let a = page.push(None, section("A"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[a, a, a], &anchors);

    assert_eq!(html.matches(TOC_OPEN).count(), 1);
}

#[test]
fn test_separate_pages_each_get_a_toc() {
    let mut first = Page::new();
    let a = first.push(None, section("A"));
    let mut second = Page::new();
    let b = second.push(None, section("B"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);

    let mut out = Vec::new();
    render_section(&ctx, &first, a, &mut out, &anchors).unwrap();
    render_section(&ctx, &second, b, &mut out, &anchors).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert_eq!(html.matches(TOC_OPEN).count(), 2);
}

#[test]
fn test_detached_node_skips_toc() {
    let mut page = Page::new();
    let draft = page.alloc(section("Draft"));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);

    let mut out = Vec::new();
    render_section(&ctx, &page, draft, &mut out, &anchors).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(!html.contains(TOC_OPEN));
    assert!(html.contains("<h2>Draft</h2>"));
}

/// Fails every include, counting the attempts.
struct FailingFragments {
    calls: Cell<u32>,
}

impl FragmentRenderer for FailingFragments {
    fn include(
        &self,
        _fragment: &str,
        _page: &Page,
        _out: &mut dyn Write,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.calls.set(self.calls.get() + 1);
        Err("template engine unavailable".into())
    }
}

#[test]
fn test_failed_toc_is_wrapped_and_not_retried() {
    let mut page = Page::new();
    let a = page.push(None, section("A"));
    let b = page.push(None, section("B"));

    let anchors = DirectAnchors;
    let fragments = FailingFragments { calls: Cell::new(0) };
    let ctx = RenderContext::new(&fragments, &NoElements);

    let mut out = Vec::new();
    let first = render_section(&ctx, &page, a, &mut out, &anchors);
    assert!(matches!(first, Err(Error::TocRender(_))));
    assert_eq!(fragments.calls.get(), 1);

    // The done flag is already set; the next node renders cleanly.
    let mut out = Vec::new();
    render_section(&ctx, &page, b, &mut out, &anchors).unwrap();
    assert_eq!(fragments.calls.get(), 1);
    assert!(String::from_utf8(out).unwrap().contains("<h2>B</h2>"));
}

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_page_index_namespaces_anchors_and_toc_links() {
    let mut first = Page::new();
    let a = first.push(
        None,
        Content::Sectioning(Sectioning::section("A").with_id("intro")),
    );
    let mut second = Page::new();
    let b = second.push(
        None,
        Content::Sectioning(Sectioning::section("B").with_id("intro")),
    );

    let anchors = PageIndex::new([first.key(), second.key()]);
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);

    let mut out = Vec::new();
    render_section(&ctx, &first, a, &mut out, &anchors).unwrap();
    render_section(&ctx, &second, b, &mut out, &anchors).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(html.contains("<section id=\"page1-intro\""));
    assert!(html.contains("<section id=\"page2-intro\""));
    assert!(html.contains("<a href=\"#page1-intro\">A</a>"));
    assert!(html.contains("<a href=\"#page2-intro\">B</a>"));
}

#[test]
fn test_anchor_id_is_attribute_escaped() {
    let mut page = Page::new();
    let node = page.push(
        None,
        Content::Sectioning(Sectioning::section("Odd").with_id("a\"b")),
    );

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    assert!(html.contains("<section id=\"a&quot;b\""));
}

// ============================================================================
// Body replay
// ============================================================================

/// Renders every referenced element as a static placeholder.
struct StubElements;

impl ElementContext for StubElements {
    fn include(&self, element: ElementId, out: &mut dyn Write) -> std::io::Result<()> {
        write!(out, "<span>element {}</span>", element.0)
    }
}

#[test]
fn test_body_references_resolve_through_element_context() {
    let mut page = Page::new();
    let captured = page.push(None, Content::Container);

    let mut body = sectioning_html::Body::new();
    body.push_markup("<p>before</p>");
    body.push_reference(captured);
    body.push_markup("<p>after</p>");

    let node = page.push(
        None,
        Content::Sectioning(Sectioning::section("Host").with_body(body)),
    );

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &StubElements);
    let html = render_to_string(&ctx, &page, &[node], &anchors);

    assert!(html.contains(&format!(
        "<p>before</p><span>element {}</span><p>after</p>",
        captured.0
    )));
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_render_sectioning_content_uses_node_kind() {
    let mut page = Page::new();
    let aside = page.push(None, Content::Sectioning(Sectioning::aside("Margin")));

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[aside], &anchors);

    assert!(html.contains("<aside class=\"semanticcms-section\"><h2>Margin</h2></aside>"));
}

#[test]
fn test_non_sectioning_node_renders_nothing() {
    let mut page = Page::new();
    let container = page.push(None, Content::Container);

    let anchors = DirectAnchors;
    let toc = PageToc::new(&anchors);
    let ctx = RenderContext::new(&toc, &NoElements);
    let html = render_to_string(&ctx, &page, &[container], &anchors);

    assert!(html.is_empty());
}
