//! Markdown rendering stage.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that renders each document's markdown to HTML.
///
/// Fenced code blocks pass through as escaped `<pre><code>` blocks; they are
/// never interpreted. After this stage `content_html` and `excerpt` are set.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let options = ctx.renderer.markdown_options();

        for doc in docs.iter_mut() {
            let output = render_markdown(&doc.markdown, options);
            doc.content_html = Some(output.html);
            doc.excerpt = output.excerpt;
        }

        Ok(())
    }
}
