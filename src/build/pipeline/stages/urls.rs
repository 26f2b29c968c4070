//! Permalink claiming stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Owner recorded for the index page URL.
pub const INDEX_OWNER: &str = "index";

/// Stage that reserves every post's output URL.
///
/// The index URL (`/`) is reserved first. Posts then claim their permalinks
/// in path order, so when two posts resolve to the same URL the one with the
/// smaller path keeps it and the other fails with `DuplicateUrl`.
pub struct UrlStage;

impl Stage for UrlStage {
    fn name(&self) -> &'static str {
        "urls"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        ctx.claim_url("/", INDEX_OWNER)
            .map_err(|e| PipelineError::stage("urls", e.to_string()))?;

        let mut by_path: Vec<usize> = (0..docs.len()).collect();
        by_path.sort_by(|&a, &b| docs[a].doc.path.cmp(&docs[b].doc.path));

        for i in by_path {
            let doc = &mut docs[i];
            if doc.is_failed() {
                continue;
            }
            if let Err(err) = ctx.claim_url(&doc.doc.url, &doc.doc.path) {
                doc.fail(err);
            }
        }

        Ok(())
    }
}
