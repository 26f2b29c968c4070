use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;

use super::loader::{Loader, ParseError};
use super::paths::{resolve_path, url_to_output_path};
use super::pipeline::PipelineError;
use super::render::{RenderError, RenderedPage, Renderer};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("posts directory not found: {0}")]
    PostsNotFound(PathBuf),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a build produced, including the files it could not handle.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Documents loaded and selected for rendering (drafts excluded)
    pub documents: usize,
    pub pages_written: usize,
    pub parse_errors: Vec<ParseError>,
    pub render_errors: Vec<RenderError>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.parse_errors.is_empty() && self.render_errors.is_empty()
    }
}

pub struct Builder {
    config: Config,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
    drafts: bool,
}

impl Builder {
    pub fn new(config: Config, base_path: PathBuf) -> Self {
        let drafts = config.content.drafts;
        Self {
            config,
            base_path,
            drafts,
        }
    }

    /// Include posts marked `published: false`.
    pub fn with_drafts(mut self, drafts: bool) -> Self {
        self.drafts = self.drafts || drafts;
        self
    }

    pub fn posts_dir(&self) -> PathBuf {
        resolve_path(&self.base_path, &self.config.content.posts)
    }

    pub fn layouts_dir(&self) -> PathBuf {
        resolve_path(&self.base_path, &self.config.content.layouts)
    }

    pub fn output_dir(&self) -> PathBuf {
        resolve_path(&self.base_path, &self.config.site.output)
    }

    /// Load, render and write the whole blog.
    ///
    /// Files that fail to parse and pages that fail to render are collected
    /// in the report; everything else is still written. `Err` means nothing
    /// useful could be produced (missing posts, broken layouts, IO failure).
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        // Build pipeline:
        // 1. Load documents from the posts directory
        // 2. Drop drafts unless asked for
        // 3. Load renderer (layouts)
        // 4. Render posts, index and category pages
        // 5. Write each page

        let posts_dir = self.posts_dir();
        if !posts_dir.is_dir() {
            return Err(BuildError::PostsNotFound(posts_dir));
        }

        // Step 1: Load
        let loaded = Loader::new(&posts_dir, &self.config.content).load_all();
        for err in &loaded.errors {
            warn!(path = %err.path().display(), "skipping post: {err}");
        }

        // Step 2: Drafts
        let total = loaded.documents.len();
        let documents: Vec<_> = loaded
            .documents
            .into_iter()
            .filter(|doc| self.drafts || doc.published)
            .collect();
        if documents.len() < total {
            debug!(drafts = total - documents.len(), "excluded unpublished posts");
        }
        info!(
            "Loaded {} post(s) from {}",
            documents.len(),
            posts_dir.display()
        );

        // Step 3: Renderer
        let renderer = Renderer::new(&self.layouts_dir(), &self.config)?;

        // Step 4: Render
        let output = renderer.render(&documents)?;
        for err in &output.errors {
            warn!("{err}");
        }

        // Step 5: Write
        let output_dir = self.output_dir();
        std::fs::create_dir_all(&output_dir)?;
        for page in &output.pages {
            write_page(page, &output_dir)?;
        }

        let display_output = output_dir.canonicalize().unwrap_or(output_dir.clone());
        info!(
            "Wrote {} page(s) to {}",
            output.pages.len(),
            display_output.display()
        );

        Ok(BuildReport {
            output_dir,
            documents: documents.len(),
            pages_written: output.pages.len(),
            parse_errors: loaded.errors,
            render_errors: output.errors,
        })
    }
}

fn write_page(page: &RenderedPage, output_dir: &Path) -> Result<(), BuildError> {
    let output_path = url_to_output_path(&page.url, output_dir);
    let write_err = |source| BuildError::Write {
        path: output_path.clone(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(&output_path, &page.html).map_err(write_err)?;
    debug!(url = %page.url, path = %output_path.display(), "wrote page");
    Ok(())
}
