//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Post metadata and permalinks (the URL at which a post is served)
//! - Category names and their listing URLs
//! - URL paths and output file paths (where pages are written)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};

use crate::util::slugify;

/// The values a permalink pattern can refer to.
pub struct PermalinkParts<'a> {
    pub date: NaiveDateTime,
    pub slug: &'a str,
    pub categories: &'a BTreeSet<String>,
}

/// Expand a permalink pattern.
///
/// Placeholders: `:year`, `:month`, `:day` (zero padded), `:slug`, `:title`
/// (both the post slug) and `:categories` (each category slugified, joined
/// with `/`, empty when there are none). Empty segments are collapsed.
///
/// # Examples
/// ```ignore
/// expand_permalink("/:year/:month/:day/:slug/", parts) => "/2015/02/13/blocks/"
/// expand_permalink("/:categories/:slug.html", parts) => "/ruby/blocks.html"
/// ```
pub fn expand_permalink(pattern: &str, parts: &PermalinkParts<'_>) -> String {
    let categories = parts
        .categories
        .iter()
        .map(|c| slugify(c))
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let expanded = pattern
        .replace(":categories", &categories)
        .replace(":year", &format!("{:04}", parts.date.year()))
        .replace(":month", &format!("{:02}", parts.date.month()))
        .replace(":day", &format!("{:02}", parts.date.day()))
        .replace(":title", parts.slug)
        .replace(":slug", parts.slug);

    let trailing_slash = expanded.ends_with('/');
    let mut url = String::from("/");
    url.push_str(
        &expanded
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/"),
    );
    if trailing_slash && url.len() > 1 {
        url.push('/');
    }
    url
}

/// URL of the listing page for a category.
///
/// "ruby", "categories" -> "/categories/ruby/"
pub fn category_url(category_dir: &str, name: &str) -> String {
    let slug = slugify(name);
    let slug = if slug.is_empty() { "uncategorized".to_string() } else { slug };
    format!("/{}/{}/", category_dir.trim_matches('/'), slug)
}

/// Convert a URL path to an output file path.
///
/// Directory URLs (trailing slash or no extension) become `path/index.html`.
/// URLs ending in a file name keep their path.
///
/// # Examples
/// ```ignore
/// url_to_output_path("/2015/02/13/blocks/", output_dir) => output_dir/2015/02/13/blocks/index.html
/// url_to_output_path("/", output_dir) => output_dir/index.html
/// url_to_output_path("/ruby/blocks.html", output_dir) => output_dir/ruby/blocks.html
/// ```
pub fn url_to_output_path(url_path: &str, output_dir: &Path) -> PathBuf {
    let trimmed = url_path.trim_start_matches('/');

    if trimmed.is_empty() {
        // Root path
        output_dir.join("index.html")
    } else if !trimmed.ends_with('/') && Path::new(trimmed).extension().is_some() {
        // Already names a file
        output_dir.join(trimmed)
    } else {
        // Directory - create index.html inside it
        output_dir.join(trimmed.trim_end_matches('/')).join("index.html")
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a configured path against the base path.
pub fn resolve_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}
