//! Document fixtures for unit tests that do not go through the loader.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::config::ContentConfig;
use crate::util::title_case;

use super::date::split_filename;
use super::document::Document;
use super::paths::{PermalinkParts, expand_permalink};

/// A published document named like `YYYY-MM-DD-slug.md`, dated from its name.
pub fn document(path: &str, body: &str, categories: &[&str]) -> Document {
    let stem = path.trim_end_matches(".md");
    let (date, slug) = split_filename(stem).expect("fixture path must start with a date");
    build(path, date, slug, body, categories)
}

/// A published document dated `ymd`, whatever its name.
pub fn document_on(path: &str, ymd: (i32, u32, u32), categories: &[&str]) -> Document {
    let stem = path.trim_end_matches(".md");
    let slug = split_filename(stem).map_or(stem, |(_, slug)| slug);
    let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid fixture date");
    build(path, date, slug, "", categories)
}

fn build(
    path: &str,
    date: chrono::NaiveDateTime,
    slug: &str,
    body: &str,
    categories: &[&str],
) -> Document {
    let categories: BTreeSet<String> = categories.iter().map(|c| c.to_string()).collect();
    let url = expand_permalink(
        &ContentConfig::default().permalink,
        &PermalinkParts {
            date,
            slug,
            categories: &categories,
        },
    );
    Document {
        path: path.to_string(),
        title: title_case(slug),
        slug: slug.to_string(),
        date,
        categories,
        layout: None,
        published: true,
        url,
        extra: BTreeMap::new(),
        body: body.to_string(),
    }
}
