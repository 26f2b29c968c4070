//! Pipeline context for sharing state across stages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::build::paths::url_to_output_path;
use crate::build::render::{RenderError, RenderedPage, Renderer};

/// Shared context for pipeline stages.
///
/// Holds the renderer (layouts and site settings) plus the state one render
/// pass accumulates: claimed URLs, listing pages and listing errors.
pub struct PipelineContext<'a> {
    /// Template renderer and site-wide settings
    pub renderer: &'a Renderer,

    /// Output file (relative to the output directory) -> what claimed it
    /// (a document path, "index", a category)
    claimed: BTreeMap<PathBuf, String>,

    /// Pages produced by finalize stages
    pages: Vec<RenderedPage>,

    /// Errors for pages that are not tied to a single document
    errors: Vec<RenderError>,
}

impl<'a> PipelineContext<'a> {
    /// Create a new pipeline context.
    pub fn new(renderer: &'a Renderer) -> Self {
        Self {
            renderer,
            claimed: BTreeMap::new(),
            pages: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Claim an output URL for `owner`.
    ///
    /// URLs are compared by the file they are written to, so `/`,
    /// `/index.html` and `/a` vs `/a/` clash. Fails with a `DuplicateUrl`
    /// error naming the earlier owner if the file is taken.
    pub fn claim_url(&mut self, url: &str, owner: &str) -> Result<(), RenderError> {
        let output = url_to_output_path(url, Path::new(""));
        match self.claimed.get(&output) {
            Some(existing) => Err(RenderError::DuplicateUrl {
                path: owner.to_string(),
                url: url.to_string(),
                existing: existing.clone(),
            }),
            None => {
                self.claimed.insert(output, owner.to_string());
                Ok(())
            }
        }
    }

    /// Record a listing page.
    pub fn emit_page(&mut self, page: RenderedPage) {
        self.pages.push(page);
    }

    /// Record a listing page failure.
    pub fn emit_error(&mut self, err: RenderError) {
        self.errors.push(err);
    }

    /// Consume the context, returning listing pages and errors.
    pub fn into_parts(self) -> (Vec<RenderedPage>, Vec<RenderError>) {
        (self.pages, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_claim_url_reports_first_owner() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default()).unwrap();
        let mut ctx = PipelineContext::new(&renderer);

        assert!(ctx.claim_url("/a/", "2015-02-13-a.md").is_ok());
        let err = ctx.claim_url("/a/", "2016-01-01-a.md").unwrap_err();
        assert_eq!(
            err.to_string(),
            "2016-01-01-a.md: url /a/ is already used by 2015-02-13-a.md"
        );
    }

    #[test]
    fn test_urls_writing_the_same_file_clash() {
        let dir = tempfile::TempDir::new().unwrap();
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default()).unwrap();
        let mut ctx = PipelineContext::new(&renderer);

        ctx.claim_url("/", "index").unwrap();
        let err = ctx.claim_url("/index.html", "2015-02-13-index.md").unwrap_err();
        assert!(matches!(err, RenderError::DuplicateUrl { existing, .. } if existing == "index"));

        ctx.claim_url("/categories/ruby", "2015-02-13-ruby.md").unwrap();
        let err = ctx
            .claim_url("/categories/ruby/", "category 'ruby'")
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::DuplicateUrl { existing, .. } if existing == "2015-02-13-ruby.md"
        ));

        assert!(ctx.claim_url("/categories/ruby.html", "2015-02-14-x.md").is_ok());
    }
}
