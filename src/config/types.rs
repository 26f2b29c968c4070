//! Configuration type definitions.
//!
//! This module contains all the data structures used in quire configuration files.
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

/// Site-wide metadata, exposed to templates as `site.*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Base URL of the published site (e.g. "https://example.com")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Output directory (relative to the config file)
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_title() -> String {
    "My Blog".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: None,
            description: None,
            author: None,
            output: default_output(),
        }
    }
}

// =============================================================================
// Content configuration
// =============================================================================

/// Where posts and layouts live, and how their URLs are formed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the `YYYY-MM-DD-slug.md` sources
    #[serde(default = "default_posts")]
    pub posts: PathBuf,
    /// Directory holding Tera layouts (`<name>.html`)
    #[serde(default = "default_layouts")]
    pub layouts: PathBuf,
    /// Layout used when a post's front matter has no `layout`
    #[serde(default = "default_layout")]
    pub default_layout: String,
    /// Permalink pattern; supports :year :month :day :slug :title :categories
    #[serde(default = "default_permalink")]
    pub permalink: String,
    /// URL directory that category listings are written under
    #[serde(default = "default_category_dir")]
    pub category_dir: String,
    /// Render posts marked `published: false`
    #[serde(default)]
    pub drafts: bool,
}

fn default_posts() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_layouts() -> PathBuf {
    PathBuf::from("_layouts")
}

fn default_layout() -> String {
    "post".to_string()
}

fn default_permalink() -> String {
    "/:year/:month/:day/:slug/".to_string()
}

fn default_category_dir() -> String {
    "categories".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts: default_posts(),
            layouts: default_layouts(),
            default_layout: default_layout(),
            permalink: default_permalink(),
            category_dir: default_category_dir(),
            drafts: false,
        }
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}
