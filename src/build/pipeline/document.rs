//! Document types for pipeline processing.

use crate::build::document::Document;
use crate::build::paths::category_url;
use crate::build::render::{CategoryLink, PageInfo, RenderError};

/// A document being processed through the pipeline.
///
/// Wraps the loaded `Document` with mutable state that evolves
/// through pipeline stages:
///
/// 1. Initially: `markdown` = body, nothing rendered
/// 2. After markdown: `content_html` and `excerpt` populated
/// 3. After layout: `output_html` = final page HTML
///
/// Once `error` is set the document is failed and later stages skip it.
#[derive(Debug)]
pub struct ProcessingDocument<'a> {
    /// The loaded document (read-only)
    pub doc: &'a Document,

    /// Markdown source; stages before `markdown` may rewrite it.
    pub markdown: String,

    /// Body rendered to HTML (no page wrapper).
    pub content_html: Option<String>,

    /// First paragraph of the body as HTML.
    pub excerpt: String,

    /// Final HTML output after layout rendering.
    pub output_html: Option<String>,

    /// Why this document's page could not be rendered.
    pub error: Option<RenderError>,
}

impl<'a> ProcessingDocument<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            markdown: doc.body.clone(),
            content_html: None,
            excerpt: String::new(),
            output_html: None,
            error: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Mark the document failed. The first error wins.
    pub fn fail(&mut self, err: RenderError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Template view of this document.
    pub fn page_info(&self, category_dir: &str) -> PageInfo {
        PageInfo {
            path: self.doc.path.clone(),
            title: self.doc.title.clone(),
            url: self.doc.url.clone(),
            date: self.doc.date.format("%Y-%m-%d").to_string(),
            datetime: self.doc.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            categories: self
                .doc
                .categories
                .iter()
                .map(|name| CategoryLink {
                    name: name.clone(),
                    url: category_url(category_dir, name),
                    count: None,
                })
                .collect(),
            excerpt: self.excerpt.clone(),
            extra: PageInfo::extra_without_reserved(&self.doc.extra),
        }
    }
}
