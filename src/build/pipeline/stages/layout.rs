//! Layout rendering stage.
//!
//! Wraps rendered HTML content in the document's layout template.

use tracing::debug;

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::{PostContext, RenderError};

/// Stage that applies each document's layout to its rendered content.
///
/// A document naming a layout that does not exist, is broken, or fails to
/// evaluate is marked failed; the remaining documents still render.
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct LayoutStage;

impl Stage for LayoutStage {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let renderer = ctx.renderer;

        for doc in docs.iter_mut().filter(|d| !d.is_failed()) {
            let document = doc.doc;
            let layout = document.layout_or(renderer.default_layout());
            if let Err(err) = renderer.check_layout(&document.path, layout) {
                doc.fail(err);
                continue;
            }

            let content = doc.content_html.clone().ok_or_else(|| {
                PipelineError::stage(
                    "layout",
                    format!(
                        "document '{}' has no rendered content (was the markdown stage run?)",
                        document.path
                    ),
                )
            })?;

            let context = PostContext {
                site: renderer.site().clone(),
                page: doc.page_info(renderer.category_dir()),
                content,
            };

            match renderer.render_post(layout, &context) {
                Ok(html) => {
                    debug!(path = %document.path, layout, "rendered post");
                    doc.output_html = Some(html);
                }
                Err(err) => doc.fail(RenderError::template(document.path.clone(), &err)),
            }
        }

        Ok(())
    }
}
