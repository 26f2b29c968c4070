//! Markdown rendering with heading ids and excerpt extraction.
//!
//! Code blocks are passed through untouched: pulldown-cmark escapes them and
//! tags fenced blocks with `language-<lang>`.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::config::MarkdownConfig;
use crate::util::slugify;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Result of rendering markdown.
pub struct MarkdownOutput {
    pub html: String,
    /// HTML of the first paragraph, empty when there is none
    pub excerpt: String,
}

/// Translate configured extension names to pulldown-cmark options.
pub fn options_from_config(markdown_config: &MarkdownConfig) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

/// Render markdown to HTML.
///
/// Headings without an explicit `{#id}` get a unique id slugified from
/// their text, so posts can be deep-linked.
pub fn render_markdown(markdown: &str, options: Options) -> MarkdownOutput {
    let mut events: Vec<Event> = Parser::new_ext(markdown, options).collect();

    let mut used_heading_ids: HashSet<String> = HashSet::new();
    for i in 0..events.len() {
        let needs_id = match &events[i] {
            Event::Start(Tag::Heading { id: Some(existing), .. }) => {
                used_heading_ids.insert(existing.to_string());
                false
            }
            Event::Start(Tag::Heading { id: None, .. }) => true,
            _ => false,
        };
        if !needs_id {
            continue;
        }

        let base_id = match slugify(&heading_text(&events[i + 1..])) {
            s if s.is_empty() => "section".to_string(),
            s => s,
        };
        let mut id = base_id.clone();
        let mut suffix = 1;
        while used_heading_ids.contains(&id) {
            id = format!("{}-{}", base_id, suffix);
            suffix += 1;
        }
        used_heading_ids.insert(id.clone());

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
            *slot = Some(CowStr::from(id));
        }
    }

    let excerpt = first_paragraph(&events)
        .map(|paragraph| {
            let mut out = String::new();
            html::push_html(&mut out, paragraph.iter().cloned());
            out
        })
        .unwrap_or_default();

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());

    MarkdownOutput {
        html: html_output,
        excerpt,
    }
}

/// Collect the plain text of a heading, given the events following its start tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// The events of the first paragraph, start and end tags included.
fn first_paragraph<'a, 'e>(events: &'a [Event<'e>]) -> Option<&'a [Event<'e>]> {
    let start = events
        .iter()
        .position(|e| matches!(e, Event::Start(Tag::Paragraph)))?;
    let len = events[start..]
        .iter()
        .position(|e| matches!(e, Event::End(TagEnd::Paragraph)))?;
    Some(&events[start..=start + len])
}
