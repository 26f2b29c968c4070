//! Render pipeline for document processing.
//!
//! The pipeline transforms documents through a series of stages:
//! 1. Url claiming (detect permalink clashes)
//! 2. Markdown rendering (body to HTML, excerpt)
//! 3. Layout rendering (wrap the body in its layout template)
//!
//! Finalize stages then build the listing pages (index, categories).
//!
//! A failure for one document marks only that document as failed; later
//! stages skip it and the rest of the run continues.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{CategoryStage, IndexStage, LayoutStage, MarkdownStage, UrlStage};

/// A stage in the document processing pipeline.
///
/// Stages transform documents sequentially. Each stage receives all documents
/// and can modify them in place before passing to the next stage.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used for insertion points).
    fn name(&self) -> &'static str;

    /// Process documents through this stage.
    ///
    /// Per-document failures are recorded with [`ProcessingDocument::fail`];
    /// returning `Err` aborts the whole render.
    fn process(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError>;
}

/// A stage that runs once after all documents are processed.
///
/// Listing pages are produced here, from the full (sorted) document set.
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run finalization after all documents are processed.
    fn finalize(
        &self,
        docs: &[ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError>;
}

/// The document processing pipeline.
///
/// The default pipeline is: urls → markdown → layout, then index and
/// categories as finalize stages.
///
/// # Extension Points
///
/// Insert custom stages using `insert_before` or `insert_after`:
///
/// ```ignore
/// pipeline.insert_after("markdown", MyCustomStage);
/// ```
pub struct Pipeline {
    /// Document processing stages (run in order over all documents)
    stages: Vec<Box<dyn Stage>>,
    /// Build-wide stages (run once after all documents)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(UrlStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(LayoutStage);
        pipeline.add_finalize_stage(IndexStage);
        pipeline.add_finalize_stage(CategoryStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Insert a stage before the named stage.
    ///
    /// # Panics
    ///
    /// Panics if no stage with the given name exists.
    #[allow(dead_code)]
    pub fn insert_before<S: Stage + 'static>(&mut self, name: &str, stage: S) -> &mut Self {
        let pos = self
            .stages
            .iter()
            .position(|s| s.name() == name)
            .unwrap_or_else(|| panic!("stage '{}' not found in pipeline", name));
        self.stages.insert(pos, Box::new(stage));
        self
    }

    /// Insert a stage after the named stage.
    ///
    /// # Panics
    ///
    /// Panics if no stage with the given name exists.
    #[allow(dead_code)]
    pub fn insert_after<S: Stage + 'static>(&mut self, name: &str, stage: S) -> &mut Self {
        let pos = self
            .stages
            .iter()
            .position(|s| s.name() == name)
            .unwrap_or_else(|| panic!("stage '{}' not found in pipeline", name));
        self.stages.insert(pos + 1, Box::new(stage));
        self
    }

    /// Add a finalize stage (runs after all documents are processed).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a set of documents.
    pub fn run(
        &self,
        docs: &mut [ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        // Run each stage in sequence
        for stage in &self.stages {
            stage.process(docs, ctx)?;
        }

        // Run finalize stages
        for stage in &self.finalize_stages {
            stage.finalize(docs, ctx)?;
        }

        Ok(())
    }

    /// Get the names of all stages in order.
    #[allow(dead_code)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::render::{PageSource, Renderer};
    use crate::build::test_support::document;
    use crate::config::Config;

    /// Uppercases every body before the markdown stage sees it.
    struct ShoutStage;

    impl Stage for ShoutStage {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn process(
            &self,
            docs: &mut [ProcessingDocument<'_>],
            _ctx: &mut PipelineContext<'_>,
        ) -> Result<(), PipelineError> {
            for doc in docs.iter_mut().filter(|d| !d.is_failed()) {
                doc.markdown = doc.markdown.to_uppercase();
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_stage_order() {
        let pipeline = Pipeline::default();
        assert_eq!(pipeline.stage_names(), vec!["urls", "markdown", "layout"]);
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut pipeline = Pipeline::default();
        pipeline.insert_before("markdown", ShoutStage);
        assert_eq!(
            pipeline.stage_names(),
            vec!["urls", "shout", "markdown", "layout"]
        );

        let mut pipeline = Pipeline::default();
        pipeline.insert_after("layout", ShoutStage);
        assert_eq!(
            pipeline.stage_names(),
            vec!["urls", "markdown", "layout", "shout"]
        );
    }

    #[test]
    #[should_panic(expected = "stage 'missing' not found")]
    fn test_insert_before_unknown_stage_panics() {
        Pipeline::default().insert_before("missing", ShoutStage);
    }

    #[test]
    fn test_custom_stage_runs_in_render() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut pipeline = Pipeline::default();
        pipeline.insert_before("markdown", ShoutStage);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default())
            .unwrap()
            .with_pipeline(pipeline);

        let docs = vec![document("2015-02-13-a.md", "whisper", &["ruby"])];
        let output = renderer.render(&docs).unwrap();

        let post = output
            .pages
            .iter()
            .find(|p| p.source == PageSource::Post("2015-02-13-a.md".into()))
            .unwrap();
        assert!(post.html.contains("<p>WHISPER</p>"));
    }

    #[test]
    fn test_layout_without_markdown_is_a_pipeline_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(stages::LayoutStage);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default())
            .unwrap()
            .with_pipeline(pipeline);

        let docs = vec![document("2015-02-13-a.md", "body", &[])];
        let err = renderer.render(&docs).unwrap_err();
        assert!(err.to_string().contains("stage 'layout' failed"));
    }
}
