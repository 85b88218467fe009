use super::*;
use crate::ir::{AdmonitionKind, FontSize, Rgb, SectionLevel};
use crate::model::{Chapter, ImageRef, LabelKey};

// ============================================================================
// Helpers
// ============================================================================

fn page(title: &str, markup: &str) -> Page {
    Page::from_storage(title, format!("id-{}", title.to_lowercase()), markup).unwrap()
}

/// Format a single page registered as the document's only chapter.
fn format_page(markup: &str) -> Result<(Vec<Element>, Document, FormatOutput)> {
    format_page_with(page("Page", markup), Document::new("Test"), &FormatOptions::default())
}

fn format_page_with(
    page: Page,
    mut document: Document,
    options: &FormatOptions,
) -> Result<(Vec<Element>, Document, FormatOutput)> {
    let title = page.title().to_string();
    let chapter = document.add_chapter(None, title, false);
    let pages: PageStore = std::iter::once(page).collect();
    let output = format(&pages, &mut document, options)?;
    let elements = document.chapter(chapter).elements.clone();
    Ok((elements, document, output))
}

fn text(raw: &str) -> Element {
    Element::text(raw)
}

const CODE_MACRO: &str = r#"<ac:structured-macro ac:name="code"><ac:plain-text-body><![CDATA[BODY]]></ac:plain-text-body></ac:structured-macro>"#;

fn code_macro(body: &str) -> String {
    CODE_MACRO.replace("BODY", body)
}

// ============================================================================
// Text and inline formatting
// ============================================================================

#[test]
fn test_text_is_escaped() {
    let (elements, _, _) =
        format_page("<p>50% &amp; café\\coffee</p><p>heat \u{2192} cold</p>").unwrap();
    assert_eq!(
        elements,
        vec![
            Element::Paragraph(vec![Element::Text(
                "50\\% \\& café\\localBackslash{}coffee".to_string()
            )]),
            Element::Paragraph(vec![Element::Text("heat $\\rightarrow$ cold".to_string())]),
        ]
    );
}

#[test]
fn test_inline_formatting() {
    let (elements, _, _) =
        format_page("<p><strong>a</strong><em>b</em><code>c</code><sub>d</sub><br /></p>").unwrap();
    assert_eq!(
        elements,
        vec![Element::Paragraph(vec![
            Element::Bold(vec![text("a")]),
            Element::Emph(vec![text("b")]),
            Element::Typewriter(vec![text("c")]),
            Element::Subscript(vec![text("d")]),
            Element::Newline,
        ])]
    );
}

#[test]
fn test_hyperlink() {
    let (elements, _, _) = format_page(r#"<a href="https://example.com/a_b">site</a>"#).unwrap();
    assert_eq!(
        elements,
        vec![Element::Href {
            url: "https://example.com/a_b".to_string(),
            children: vec![text("site")],
        }]
    );
}

#[test]
fn test_span_styles_nest_in_order() {
    let (elements, _, output) = format_page(
        r#"<span style="color: rgb(255, 0, 0); text-decoration: line-through;">x</span>"#,
    )
    .unwrap();
    assert_eq!(
        elements,
        vec![Element::Color {
            color: Rgb::new(255, 0, 0),
            children: vec![Element::Strikethrough(vec![text("x")])],
        }]
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_span_unsupported_style_keeps_content() {
    let (elements, _, output) = format_page(r#"<span style="font-size: 10pt">y</span>"#).unwrap();
    assert_eq!(elements, vec![text("y")]);
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.starts_with("Unsupported style ignored"));
    assert_eq!(output.diagnostics[0].page, "Page");
}

// ============================================================================
// Blocks
// ============================================================================

#[test]
fn test_headings_outside_table() {
    let (elements, _, _) = format_page("<h1>One</h1><h3>Three</h3><h5>Five</h5><h6>Six</h6>").unwrap();
    assert_eq!(
        elements,
        vec![
            Element::Section {
                level: SectionLevel::Section,
                children: vec![text("One")],
            },
            Element::Section {
                level: SectionLevel::Subsubsection,
                children: vec![text("Three")],
            },
            Element::Section {
                level: SectionLevel::Paragraph,
                children: vec![text("Five")],
            },
            Element::Bold(vec![text("Six")]),
        ]
    );
}

#[test]
fn test_h2_with_leading_image_is_spliced() {
    let image_markup = r#"<ac:image><ri:attachment ri:filename="a.png" /></ac:image>"#;
    let page = page("Page", &format!("<h2>{image_markup}Title</h2>"))
        .with_image(ImageRef::from_markup("42", "a.png", image_markup).unwrap());
    let options = FormatOptions::default().with_image_root("images");

    let (elements, _, output) = format_page_with(page, Document::new("Test"), &options).unwrap();
    assert_eq!(
        elements,
        vec![
            Element::Image {
                path: "images/42/a.png".to_string(),
            },
            text("Title"),
        ]
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_missing_image_is_recovered() {
    let (elements, _, output) =
        format_page(r#"<p><ac:image><ri:attachment ri:filename="gone.png" /></ac:image></p>"#)
            .unwrap();
    assert_eq!(elements, vec![Element::Paragraph(vec![])]);
    assert!(output.diagnostics[0].message.starts_with("Image not found"));
}

#[test]
fn test_image_found_by_attachment() {
    let stored = r#"<ac:image ac:width="300"><ri:attachment ri:filename="a.png" /></ac:image>"#;
    let page = page(
        "Page",
        r#"<ac:image ac:width="200"><ri:attachment ri:filename="a.png" /></ac:image>"#,
    )
    .with_image(ImageRef::from_markup("7", "a.png", stored).unwrap());

    let (elements, _, _) =
        format_page_with(page, Document::new("Test"), &FormatOptions::default()).unwrap();
    assert_eq!(
        elements,
        vec![Element::Image {
            path: "./7/a.png".to_string(),
        }]
    );
}

#[test]
fn test_lists() {
    let (elements, _, _) = format_page("<ol><li>a</li></ol><ul><li>b</li></ul>").unwrap();
    assert_eq!(
        elements,
        vec![
            Element::OrderedList(vec![Element::ListItem {
                tabular: false,
                children: vec![text("a")],
            }]),
            Element::UnorderedList(vec![Element::ListItem {
                tabular: false,
                children: vec![text("b")],
            }]),
        ]
    );
}

#[test]
fn test_splice_rule_and_quote() {
    let (elements, _, _) =
        format_page("<div><p>a</p></div><hr /><blockquote>q</blockquote>").unwrap();
    assert_eq!(
        elements,
        vec![
            Element::Paragraph(vec![text("a")]),
            Element::Rule,
            Element::Blockquote(vec![text("q")]),
        ]
    );
}

#[test]
fn test_unsupported_node_is_fatal() {
    let err = format_page("<p><blink>x</blink></p>").unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedNode { ref page, ref node } if page == "Page" && node == "<blink>"
    ));

    let err = format_page(r#"<ac:structured-macro ac:name="jira" />"#).unwrap_err();
    assert!(matches!(err, Error::UnsupportedNode { ref node, .. } if node == "macro \"jira\""));
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_table_structure() {
    let (elements, _, _) = format_page(
        "<table><tbody><tr><th>A</th><th>B</th></tr>\
         <tr><td>1</td><td><ul><li>x</li></ul></td></tr></tbody></table>",
    )
    .unwrap();

    let [Element::Table(table)] = elements.as_slice() else {
        panic!("expected a single table, got {elements:?}");
    };
    assert_eq!(table.preamble, "|X[-1]|X[-1]|");
    assert_eq!(table.rows.len(), 2);
    assert!(table.rows[0].cells.iter().all(|cell| cell.header));
    assert!(!table.rows[1].cells[0].header);
    assert_eq!(
        table.rows[1].cells[1].children,
        vec![Element::ListItem {
            tabular: true,
            children: vec![text("x")],
        }]
    );
}

#[test]
fn test_heading_in_table_is_sized() {
    let (elements, _, _) =
        format_page("<table><tbody><tr><td><h1>T</h1><h4>U</h4></td></tr></tbody></table>")
            .unwrap();
    let [Element::Table(table)] = elements.as_slice() else {
        panic!("expected a table");
    };
    assert_eq!(
        table.rows[0].cells[0].children,
        vec![
            Element::Sized {
                size: FontSize::Huge2,
                children: vec![text("T")],
            },
            Element::Sized {
                size: FontSize::Large2,
                children: vec![text("U")],
            },
        ]
    );
}

#[test]
fn test_table_mode_is_scoped() {
    let (elements, _, _) = format_page(
        "<table><tbody><tr><td>a</td></tr></tbody></table><h1>After</h1><ul><li>b</li></ul>",
    )
    .unwrap();
    assert_eq!(
        elements[1],
        Element::Section {
            level: SectionLevel::Section,
            children: vec![text("After")],
        }
    );
    assert_eq!(
        elements[2],
        Element::UnorderedList(vec![Element::ListItem {
            tabular: false,
            children: vec![text("b")],
        }])
    );
}

#[test]
fn test_nested_table_is_fatal() {
    let err = format_page(
        "<table><tbody><tr><td><table><tbody><tr><td>x</td></tr></tbody></table></td></tr></tbody></table>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::NestedTable { ref page } if page == "Page"));
}

#[test]
fn test_nested_list_in_table_is_fatal() {
    let err = format_page(
        "<table><tbody><tr><td><ul><li>a<ul><li>b</li></ul></li></ul></td></tr></tbody></table>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::NestedListInTable { .. }));
}

// ============================================================================
// Verbatim
// ============================================================================

#[test]
fn test_verbatim_blocks_are_deduplicated() {
    let markup = [
        code_macro("x = 1\ny = 2"),
        code_macro("x = 1\ny = 2"),
        code_macro("z = 3"),
    ]
    .concat();
    let (elements, document, _) = format_page(&markup).unwrap();

    let keys: Vec<&str> = elements
        .iter()
        .map(|element| match element {
            Element::VerbatimUse(key) => key.as_str(),
            other => panic!("unexpected element {other:?}"),
        })
        .collect();
    assert_eq!(keys, ["verbatimA", "verbatimA", "verbatimB"]);
    assert_eq!(document.verbatim.len(), 2);
}

#[test]
fn test_code_block_text_is_literal() {
    let (elements, document, _) = format_page(&code_macro("if (a & b) { return 50%; }")).unwrap();
    let Element::VerbatimUse(key) = &elements[0] else {
        panic!("expected a verbatim use");
    };
    assert_eq!(document.verbatim.get(key), Some("if (a & b) { return 50%; }"));
}

#[test]
fn test_preformatted() {
    let (elements, document, _) = format_page("<pre>a<br />b<span>c</span></pre>").unwrap();
    let Element::VerbatimUse(key) = &elements[0] else {
        panic!("expected a verbatim use");
    };
    assert_eq!(document.verbatim.get(key), Some("a\nbc"));

    let err = format_page("<pre><p>x</p></pre>").unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedInPreformatted { ref node, .. } if node == "<p>"
    ));
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_admonition_with_title() {
    let (elements, _, _) = format_page(
        r#"<ac:structured-macro ac:name="note"><ac:parameter ac:name="title">Heads up</ac:parameter><ac:rich-text-body><p>Body</p></ac:rich-text-body></ac:structured-macro>"#,
    )
    .unwrap();
    assert_eq!(
        elements,
        vec![Element::Admonition {
            kind: AdmonitionKind::Info,
            children: vec![
                Element::Sized {
                    size: FontSize::Large,
                    children: vec![text("Heads up")],
                },
                Element::Newline,
                Element::Paragraph(vec![text("Body")]),
            ],
        }]
    );
}

#[test]
fn test_admonition_kinds() {
    let (elements, _, _) = format_page(
        r#"<ac:structured-macro ac:name="tip"><ac:rich-text-body>a</ac:rich-text-body></ac:structured-macro><ac:structured-macro ac:name="warning"><ac:rich-text-body>b</ac:rich-text-body></ac:structured-macro>"#,
    )
    .unwrap();
    assert!(matches!(
        elements[0],
        Element::Admonition {
            kind: AdmonitionKind::Tip,
            ..
        }
    ));
    assert!(matches!(
        elements[1],
        Element::Admonition {
            kind: AdmonitionKind::Warning,
            ..
        }
    ));
}

#[test]
fn test_admonition_without_body_is_reported() {
    let (elements, _, output) = format_page(
        r#"<ac:structured-macro ac:name="warning"><ac:parameter ac:name="icon">true</ac:parameter><p>Careful</p></ac:structured-macro>"#,
    )
    .unwrap();
    assert_eq!(
        elements,
        vec![Element::Admonition {
            kind: AdmonitionKind::Warning,
            children: vec![Element::Paragraph(vec![text("Careful")])],
        }]
    );
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].message,
        "warning macro without rich text body"
    );
}

#[test]
fn test_section_keeps_first_column() {
    let (elements, _, _) = format_page(
        r#"<ac:structured-macro ac:name="section"><ac:rich-text-body><ac:structured-macro ac:name="column"><ac:rich-text-body><p>left</p></ac:rich-text-body></ac:structured-macro><ac:structured-macro ac:name="column"><ac:rich-text-body><p>right</p></ac:rich-text-body></ac:structured-macro></ac:rich-text-body></ac:structured-macro>"#,
    )
    .unwrap();
    assert_eq!(elements, vec![Element::Paragraph(vec![text("left")])]);
}

#[test]
fn test_silent_macros() {
    let (elements, _, output) = format_page(
        r#"<ac:structured-macro ac:name="toc" /><ac:structured-macro ac:name="unmigrated-wiki-markup"><ac:plain-text-body><![CDATA[h1. x]]></ac:plain-text-body></ac:structured-macro>"#,
    )
    .unwrap();
    assert!(elements.is_empty());
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn test_emoticons() {
    let (elements, _, output) =
        format_page(r#"<ac:emoticon ac:name="tick" /><ac:emoticon ac:name="sad" />"#).unwrap();
    assert_eq!(elements, vec![Element::Emoticon(crate::ir::Emoticon::Tick)]);
    assert!(output.diagnostics[0].message.contains("sad"));
}

// ============================================================================
// Chapters and links
// ============================================================================

#[test]
fn test_unregistered_page_goes_to_appendix() {
    let pages: PageStore = std::iter::once(page("Intro", "<p>Hello</p>")).collect();
    let mut document = Document::new("Guide");
    format(&pages, &mut document, &FormatOptions::default()).unwrap();

    let appendix = document.appendix().unwrap();
    assert_eq!(appendix.title, "Appendix");
    let chapters: Vec<&Chapter> = document.chapters_of(appendix).collect();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].title, "Intro");
    assert_eq!(chapters[0].number, Some(1));
    assert_eq!(chapters[0].elements, vec![Element::Paragraph(vec![text("Hello")])]);
}

#[test]
fn test_unregistered_page_skipped_without_create() {
    let pages: PageStore = std::iter::once(page("Intro", "<p>Hello</p>")).collect();
    let mut document = Document::new("Guide");
    let options = FormatOptions::default().with_create_missing_chapters(false);
    let output = format(&pages, &mut document, &options).unwrap();

    assert!(document.appendix().is_none());
    assert_eq!(document.chapter_count(), 0);
    assert_eq!(output.unreferenced_pages, ["Intro"]);
}

#[test]
fn test_forward_chapter_reference() {
    let options = FormatOptions::default().with_create_missing_chapters(false);
    let (elements, mut document, output) = format_page_with(
        page("Guide", r#"<p><ac:link><ri:page ri:content-title="Setup" /></ac:link></p>"#),
        Document::new("Test"),
        &options,
    )
    .unwrap();

    let key = LabelKey::for_anchor("Setup", "");
    assert_eq!(
        elements,
        vec![Element::Paragraph(vec![Element::Link {
            label: key.clone(),
            children: vec![text("Setup")],
        }])]
    );
    let label = output.labels.get(&key).unwrap();
    assert!(!label.defined);
    assert!(label.referenced);
    assert!(output.diagnostics[0].message.contains("missing page: Setup"));

    let setup = document.get_chapter("Setup", true).unwrap();
    assert!(output.labels.is_defined(&LabelKey::for_chapter(document.chapter(setup))));
}

#[test]
fn test_link_to_chapter_uses_chapter_key() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Intro", false);
    document.add_chapter(None, "Setup", false);
    let pages: PageStore = [
        page("Intro", r#"<ac:link><ri:page ri:content-title="Setup" /></ac:link>"#),
        page("Setup", "<p>steps</p>"),
    ]
    .into_iter()
    .collect();

    let output = format(&pages, &mut document, &FormatOptions::default()).unwrap();
    let intro = document.find_chapter("Intro").unwrap();
    match &intro.elements[0] {
        Element::Link { label, children } => {
            assert_eq!(label.as_str(), "chapter.2");
            assert_eq!(children, &vec![text("Setup")]);
            assert!(output.labels.get(label).unwrap().defined);
        }
        other => panic!("expected a link, got {other:?}"),
    }
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_link_to_inline_chapter() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Intro", false);
    document.add_chapter(None, "Legal", true);
    let pages: PageStore = std::iter::once(page(
        "Intro",
        r#"<ac:link><ri:page ri:content-title="Legal" /></ac:link>"#,
    ))
    .collect();

    format(&pages, &mut document, &FormatOptions::default()).unwrap();
    let intro = document.find_chapter("Intro").unwrap();
    assert!(matches!(
        &intro.elements[0],
        Element::Link { label, .. } if label.as_str() == "inline-chapter-Legal"
    ));
}

#[test]
fn test_anchor_and_link_converge() {
    let (elements, _, output) = format_page_with(
        page(
            "Guide",
            r#"<p><ac:link ac:anchor="faq"><ac:plain-text-link-body><![CDATA[FAQ]]></ac:plain-text-link-body></ac:link></p><ac:structured-macro ac:name="anchor"><ac:parameter ac:name="">faq</ac:parameter></ac:structured-macro>"#,
        ),
        Document::new("Test"),
        &FormatOptions::default(),
    )
    .unwrap();

    let key = LabelKey::for_anchor("Guide", "faq");
    assert_eq!(
        elements,
        vec![
            Element::Paragraph(vec![Element::Link {
                label: key.clone(),
                children: vec![text("FAQ")],
            }]),
            Element::Label(key.clone()),
        ]
    );
    assert_eq!(output.labels.len(), 1);
    let label = output.labels.get(&key).unwrap();
    assert!(label.defined && label.referenced);
}

#[test]
fn test_duplicate_anchor_dropped() {
    let anchor = r#"<ac:structured-macro ac:name="anchor"><ac:parameter ac:name="">top</ac:parameter></ac:structured-macro>"#;
    let (elements, _, output) = format_page(&anchor.repeat(2)).unwrap();
    assert_eq!(elements, vec![Element::Label(LabelKey::for_anchor("Page", "top"))]);
    assert!(output.diagnostics[0].message.starts_with("Duplicate anchor"));
}

#[test]
fn test_link_with_rich_body() {
    let (elements, _, _) = format_page(
        r#"<ac:link><ri:page ri:content-title="Page" /><ac:link-body><strong>here</strong></ac:link-body></ac:link>"#,
    )
    .unwrap();
    assert!(matches!(
        &elements[0],
        Element::Link { children, .. } if children == &vec![Element::Bold(vec![text("here")])]
    ));
}

#[test]
fn test_navigation_links_dropped() {
    let (elements, _, output) = format_page(
        r#"<ac:link><ri:page ri:content-title="Other" /><ac:plain-text-link-body><![CDATA[Next]]></ac:plain-text-link-body></ac:link>"#,
    )
    .unwrap();
    assert!(elements.is_empty());
    assert!(output.labels.is_empty());
}

#[test]
fn test_cross_space_link() {
    let document = Document::new("Test")
        .with_base_url("https://wiki.example.com/display")
        .with_space("DOC");
    let (elements, _, output) = format_page_with(
        page(
            "Page",
            r#"<ac:link><ri:page ri:space-key="OPS" ri:content-title="Run Book" /></ac:link><ac:link><ri:page ri:space-key="DOC" ri:content-title="Page" /></ac:link>"#,
        ),
        document,
        &FormatOptions::default(),
    )
    .unwrap();

    assert_eq!(
        elements[0],
        Element::Href {
            url: "https://wiki.example.com/display/OPS/Run+Book".to_string(),
            children: vec![text("Run Book")],
        }
    );
    assert!(matches!(elements[1], Element::Link { .. }));
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_ignored_space_is_treated_as_local() {
    let options = FormatOptions::default().with_ignored_space_prefix("MPSD");
    let (elements, _, output) = format_page_with(
        page(
            "Page",
            r#"<ac:link><ri:page ri:space-key="MPSD2" ri:content-title="Page" /></ac:link>"#,
        ),
        Document::new("Test"),
        &options,
    )
    .unwrap();
    assert!(matches!(elements[0], Element::Link { .. }));
    assert!(output.diagnostics[0].message.contains("MPSD2"));
}

// ============================================================================
// Includes
// ============================================================================

fn include(title: &str) -> String {
    format!(
        r#"<ac:structured-macro ac:name="include"><ac:parameter ac:name=""><ac:link><ri:page ri:content-title="{title}" /></ac:link></ac:parameter></ac:structured-macro>"#
    )
}

#[test]
fn test_include_splices_page() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Main", false);
    let pages: PageStore = [
        page("Main", &format!("<p>before</p>{}", include("Shared"))),
        page("Shared", "<p>shared</p>"),
    ]
    .into_iter()
    .collect();
    let options = FormatOptions::default().with_create_missing_chapters(false);

    let output = format(&pages, &mut document, &options).unwrap();
    assert_eq!(
        document.find_chapter("Main").unwrap().elements,
        vec![
            Element::Paragraph(vec![text("before")]),
            Element::Paragraph(vec![text("shared")]),
        ]
    );
    assert!(pages.get("Shared").unwrap().already_included());
    assert!(output.unreferenced_pages.is_empty());
}

#[test]
fn test_legacy_include_macro() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Main", false);
    let pages: PageStore = [
        page(
            "Main",
            r#"<ac:macro ac:name="include"><ac:default-parameter>Shared</ac:default-parameter></ac:macro>"#,
        ),
        page("Shared", "<p>shared</p>"),
    ]
    .into_iter()
    .collect();
    let options = FormatOptions::default().with_create_missing_chapters(false);

    format(&pages, &mut document, &options).unwrap();
    assert_eq!(
        document.find_chapter("Main").unwrap().elements,
        vec![Element::Paragraph(vec![text("shared")])]
    );
}

#[test]
fn test_include_absent_or_excluded_page() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Main", false);
    let pages: PageStore = [
        page("Main", &(include("Gone") + &include("Hidden"))),
        page("Hidden", "<p>hidden</p>"),
    ]
    .into_iter()
    .collect();
    assert!(pages.exclude("Hidden"));

    let output = format(&pages, &mut document, &FormatOptions::default()).unwrap();
    assert!(document.find_chapter("Main").unwrap().elements.is_empty());
    assert!(document.find_chapter("Hidden").is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.contains("Gone"));
}

#[test]
fn test_include_cycle_is_fatal() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "A", false);
    let pages: PageStore = [page("A", &include("B")), page("B", &include("A"))]
        .into_iter()
        .collect();

    let err = format(&pages, &mut document, &FormatOptions::default()).unwrap_err();
    assert!(matches!(err, Error::IncludeCycle { ref chain } if chain == "A -> B -> A"));
}

#[test]
fn test_page_included_twice_is_reported() {
    let mut document = Document::new("Guide");
    document.add_chapter(None, "Main", false);
    let pages: PageStore = [
        page("Main", &include("Shared").repeat(2)),
        page("Shared", "x"),
    ]
    .into_iter()
    .collect();
    let options = FormatOptions::default().with_create_missing_chapters(false);

    let output = format(&pages, &mut document, &options).unwrap();
    assert_eq!(
        document.find_chapter("Main").unwrap().elements,
        vec![text("x"), text("x")]
    );
    assert!(output.diagnostics[0].message.contains("already included: Shared"));
}
