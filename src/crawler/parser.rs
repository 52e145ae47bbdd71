//! HTML scanner for page sections
//!
//! This module extracts from a fetched page, per section element:
//! - The raw `href` values of its anchors, in markup order
//! - Its visible text, for keyword scanning

use crate::config::SiteConfig;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Elements whose text is never visible
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line of text when rendered
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

/// Logical region of a page, identified by an element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Site-wide navigation; scanned on the root page only
    Header,
    /// Per-page content; scanned on every page
    Main,
    /// Site-wide footer; scanned on the root page only
    Footer,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Main => "main",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps sections to the element ids that mark them in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionIds {
    pub header: String,
    pub main: String,
    pub footer: String,
}

impl SectionIds {
    pub fn from_config(site: &SiteConfig) -> Self {
        Self {
            header: site.header_section.clone(),
            main: site.main_section.clone(),
            footer: site.footer_section.clone(),
        }
    }

    pub fn id(&self, section: Section) -> &str {
        match section {
            Section::Header => &self.header,
            Section::Main => &self.main,
            Section::Footer => &self.footer,
        }
    }
}

/// What a section of a page contains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedSection {
    /// Raw href attribute values, in markup order
    pub hrefs: Vec<String>,

    /// Visible text of the section
    pub text: String,
}

/// Scans several sections of one page, parsing the document once
///
/// Each result is `None` when the page has no element with that id.
///
/// # Example
///
/// ```
/// use site_sweep::crawler::scan_sections;
///
/// let html = r#"<div id="main"><p>Apply by March.</p><a href="/apply">Apply</a></div>"#;
/// let scanned = scan_sections(html, &["main", "footer_site"]);
/// let main = scanned[0].as_ref().unwrap();
/// assert_eq!(main.hrefs, vec!["/apply"]);
/// assert!(scanned[1].is_none());
/// ```
pub fn scan_sections(html: &str, section_ids: &[&str]) -> Vec<Option<ScannedSection>> {
    let document = Html::parse_document(html);

    section_ids
        .iter()
        .map(|id| find_by_id(&document, id).map(scan_element))
        .collect()
}

/// Scans a single section of a page
pub fn scan_section(html: &str, section_id: &str) -> Option<ScannedSection> {
    scan_sections(html, &[section_id]).pop().flatten()
}

/// Finds the first element carrying the given id
fn find_by_id<'a>(document: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("[id]").ok()?;
    document
        .select(&selector)
        .find(|element| element.value().id() == Some(id))
}

/// Extracts anchors and visible text from a section element
fn scan_element(element: ElementRef<'_>) -> ScannedSection {
    ScannedSection {
        hrefs: extract_hrefs(element),
        text: extract_text(element),
    }
}

/// Collects non-empty href values of anchors below `element`
fn extract_hrefs(element: ElementRef<'_>) -> Vec<String> {
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for anchor in element.select(&a_selector) {
            if let Some(href) = anchor.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() {
                    hrefs.push(href.to_string());
                }
            }
        }
    }

    hrefs
}

/// Collects the visible text below `element`
///
/// Inline text is joined as-is so words split across tags stay intact. A
/// space is inserted at block element boundaries so adjacent blocks stay
/// separate sentences.
fn extract_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_text(element, &mut text);
    text
}

fn collect_text(element: ElementRef<'_>, text: &mut String) {
    for child in element.children() {
        if let Some(fragment) = child.value().as_text() {
            text.push_str(fragment);
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if INVISIBLE_ELEMENTS.contains(&name) {
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            push_break(text);
        }
        collect_text(child, text);
        if block {
            push_break(text);
        }
    }
}

fn push_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}
