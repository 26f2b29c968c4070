//! Post discovery and parsing.
//!
//! The loader walks the posts directory in sorted file-name order and turns
//! each Markdown file into a [`Document`]. Walking is lazy and restartable:
//! every call to [`Loader::documents`] starts a fresh walk.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ContentConfig;
use crate::util::{slugify, title_case};

use super::date::{parse_date, split_filename};
use super::document::{Document, FrontMatterError, parse_front_matter};
use super::paths::{PermalinkParts, expand_permalink};

// =============================================================================
// Errors
// =============================================================================

/// A source file that could not be turned into a document.
///
/// Every variant names the offending file so the error can be located.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },

    #[error("{path}: invalid date '{value}'")]
    InvalidDate { path: PathBuf, value: String },

    #[error("{path}: no date in front matter and the filename has no YYYY-MM-DD- prefix")]
    MissingDate { path: PathBuf },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl ParseError {
    /// The source path this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ParseError::Read { path, .. }
            | ParseError::FrontMatter { path, .. }
            | ParseError::InvalidDate { path, .. }
            | ParseError::MissingDate { path }
            | ParseError::Walk { path, .. } => path,
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Loads documents from a posts directory.
#[derive(Debug, Clone)]
pub struct Loader {
    posts_dir: PathBuf,
    permalink: String,
}

/// Every document and every failure from one loader pass.
#[derive(Debug, Default)]
pub struct LoadOutput {
    pub documents: Vec<Document>,
    pub errors: Vec<ParseError>,
}

impl Loader {
    pub fn new(posts_dir: impl Into<PathBuf>, content: &ContentConfig) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            permalink: content.permalink.clone(),
        }
    }

    /// Lazily walk the posts directory, yielding one result per Markdown file.
    pub fn documents(&self) -> Documents<'_> {
        let walker = WalkDir::new(&self.posts_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);

        Documents {
            loader: self,
            walker,
        }
    }

    /// Run a full pass, separating documents from failures.
    pub fn load_all(&self) -> LoadOutput {
        let mut output = LoadOutput::default();
        for result in self.documents() {
            match result {
                Ok(doc) => output.documents.push(doc),
                Err(err) => output.errors.push(err),
            }
        }
        output
    }

    /// Parse a single source file into a document.
    pub fn load_file(&self, full_path: &Path) -> Result<Document, ParseError> {
        let rel_path = full_path
            .strip_prefix(&self.posts_dir)
            .unwrap_or(full_path)
            .to_string_lossy()
            .replace('\\', "/");
        let err_path = || PathBuf::from(&rel_path);

        let raw = std::fs::read_to_string(full_path).map_err(|source| ParseError::Read {
            path: err_path(),
            source,
        })?;

        let parsed = parse_front_matter(&raw).map_err(|source| ParseError::FrontMatter {
            path: err_path(),
            source,
        })?;
        let front_matter = parsed.front_matter;

        let stem = full_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let from_filename = split_filename(stem);

        // An explicit date always wins; a bad one is an error, never a fallback
        let date = match front_matter.date.as_deref() {
            Some(value) => parse_date(value).ok_or_else(|| ParseError::InvalidDate {
                path: err_path(),
                value: value.to_string(),
            })?,
            None => from_filename
                .map(|(date, _)| date)
                .ok_or_else(|| ParseError::MissingDate { path: err_path() })?,
        };

        let slug = front_matter
            .slug
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                let name = from_filename.map(|(_, slug)| slug).unwrap_or(stem);
                slugify(name)
            });

        let title = front_matter
            .title
            .clone()
            .unwrap_or_else(|| title_case(&slug));

        let categories = front_matter.category_set();

        let url = expand_permalink(
            &self.permalink,
            &PermalinkParts {
                date,
                slug: &slug,
                categories: &categories,
            },
        );

        debug!(path = %rel_path, %url, "loaded document");

        Ok(Document {
            path: rel_path,
            title,
            slug,
            date,
            categories,
            layout: front_matter.layout,
            published: front_matter.published,
            url,
            extra: front_matter.extra,
            body: parsed.body,
        })
    }
}

/// Iterator over the documents of one loader pass.
pub struct Documents<'a> {
    loader: &'a Loader,
    walker: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl Iterator for Documents<'_> {
    type Item = Result<Document, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.loader.posts_dir.clone());
                    return Some(Err(ParseError::Walk { path, source }));
                }
            };

            if entry.file_type().is_file() && is_markdown(entry.path()) {
                return Some(self.loader.load_file(entry.path()));
            }
        }
    }
}

/// Skip hidden files and directories (but never the root itself).
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "md" | "markdown"))
        .unwrap_or(false)
}
