use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pulldown_cmark::Options;
use serde::Serialize;
use tera::{Context, Tera, Template};
use tracing::warn;
use walkdir::WalkDir;

use crate::config::{Config, SiteConfig};

use super::document::Document;
use super::markdown::{MarkdownError, options_from_config};
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingDocument};

/// Layouts registered when the layouts directory does not provide them.
pub(crate) const BUILTIN_LAYOUTS: &[(&str, &str)] = &[
    ("default.html", include_str!("layouts/default.html")),
    ("post.html", include_str!("layouts/post.html")),
    ("index.html", include_str!("layouts/index.html")),
    ("category.html", include_str!("layouts/category.html")),
];

/// Layout used for the index page.
pub const INDEX_LAYOUT: &str = "index";
/// Layout used for category listing pages.
pub const CATEGORY_LAYOUT: &str = "category";

/// Keys a post's extra front matter cannot shadow in `page.*`.
const RESERVED_PAGE_KEYS: &[&str] = &[
    "path",
    "title",
    "url",
    "date",
    "datetime",
    "categories",
    "excerpt",
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("{path}: layout '{layout}' not found")]
    UnknownLayout { path: String, layout: String },

    #[error("{path}: layout '{layout}' is broken: {message}")]
    BrokenLayout {
        path: String,
        layout: String,
        message: String,
    },

    #[error("{path}: failed to render: {message}")]
    Template { path: String, message: String },

    #[error("{path}: url {url} is already used by {existing}")]
    DuplicateUrl {
        path: String,
        url: String,
        existing: String,
    },

    #[error("failed to read layout {path}: {source}")]
    ReadLayout {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk layouts in {path}: {source}")]
    WalkLayouts {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] tera::Error),

    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),
}

impl RenderError {
    /// Wrap a template evaluation failure, keeping tera's cause chain in the message.
    pub fn template(path: impl Into<String>, err: &tera::Error) -> Self {
        Self::Template {
            path: path.into(),
            message: error_chain(err),
        }
    }
}

/// A tera error with its causes, joined by `: `.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// The site renderer: owns the layouts and turns documents into pages.
pub struct Renderer {
    tera: Tera,
    site: SiteContext,
    default_layout: String,
    category_dir: String,
    markdown_options: Options,
    /// Template name -> why it could not be registered
    broken_layouts: BTreeMap<String, String>,
    pipeline: Pipeline,
}

impl Renderer {
    /// Create a renderer with layouts loaded from `layouts_dir` (`**/*.html`).
    ///
    /// The directory is optional: built-in layouts fill in any of `default`,
    /// `post`, `index` and `category` it does not define.
    ///
    /// A layout that does not parse is skipped (with any layout built on it)
    /// and reported per page by [`Renderer::check_layout`].
    pub fn new(layouts_dir: &Path, config: &Config) -> Result<Self, RenderError> {
        let mut templates: BTreeMap<String, String> = BTreeMap::new();

        if layouts_dir.is_dir() {
            for entry in WalkDir::new(layouts_dir).sort_by_file_name() {
                let entry = entry.map_err(|source| RenderError::WalkLayouts {
                    path: layouts_dir.to_path_buf(),
                    source,
                })?;
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some("html")
                {
                    continue;
                }

                let name = path
                    .strip_prefix(layouts_dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");
                let source =
                    std::fs::read_to_string(path).map_err(|source| RenderError::ReadLayout {
                        path: path.to_path_buf(),
                        source,
                    })?;
                templates.insert(name, source);
            }
        }

        for (name, source) in BUILTIN_LAYOUTS {
            templates
                .entry(name.to_string())
                .or_insert_with(|| source.to_string());
        }

        let broken_layouts = broken_layouts(&templates);
        for (name, message) in &broken_layouts {
            warn!(layout = %name, "skipping layout: {message}");
        }

        // Registered in one batch so layouts can extend each other regardless of origin
        let mut tera = Tera::default();
        tera.add_raw_templates(
            templates
                .iter()
                .filter(|(name, _)| !broken_layouts.contains_key(*name))
                .map(|(name, source)| (name.as_str(), source.as_str())),
        )?;

        Ok(Self {
            tera,
            site: SiteContext::from(&config.site),
            default_layout: config.content.default_layout.clone(),
            category_dir: config.content.category_dir.clone(),
            markdown_options: options_from_config(&config.markdown)?,
            broken_layouts,
            pipeline: Pipeline::default(),
        })
    }

    /// Replace the stage pipeline (e.g. to insert custom stages).
    #[allow(dead_code)]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn site(&self) -> &SiteContext {
        &self.site
    }

    pub fn default_layout(&self) -> &str {
        &self.default_layout
    }

    pub fn category_dir(&self) -> &str {
        &self.category_dir
    }

    pub fn markdown_options(&self) -> Options {
        self.markdown_options
    }

    /// Whether a layout name resolves to a loaded template.
    pub fn has_layout(&self, layout: &str) -> bool {
        let template = layout_template(layout);
        self.tera.get_template_names().any(|name| name == template)
    }

    /// Check that `layout` can be rendered, naming `owner` in the error.
    pub fn check_layout(&self, owner: &str, layout: &str) -> Result<(), RenderError> {
        if let Some(message) = self.broken_layouts.get(&layout_template(layout)) {
            return Err(RenderError::BrokenLayout {
                path: owner.to_string(),
                layout: layout.to_string(),
                message: message.clone(),
            });
        }
        if !self.has_layout(layout) {
            return Err(RenderError::UnknownLayout {
                path: owner.to_string(),
                layout: layout.to_string(),
            });
        }
        Ok(())
    }

    /// Render a post body wrapped in its layout.
    pub fn render_post(&self, layout: &str, context: &PostContext) -> Result<String, tera::Error> {
        let tera_context = Context::from_serialize(context)?;
        self.tera.render(&layout_template(layout), &tera_context)
    }

    /// Render the index page.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, tera::Error> {
        let tera_context = Context::from_serialize(context)?;
        self.tera.render(&layout_template(INDEX_LAYOUT), &tera_context)
    }

    /// Render one category listing page.
    pub fn render_category(&self, context: &CategoryContext) -> Result<String, tera::Error> {
        let tera_context = Context::from_serialize(context)?;
        self.tera.render(&layout_template(CATEGORY_LAYOUT), &tera_context)
    }

    /// Render every document plus the index and category listings.
    ///
    /// A document that fails (unknown layout, template error, url clash) is
    /// reported in [`RenderOutput::errors`]; all other pages still render.
    /// Only a broken pipeline yields `Err`.
    pub fn render(&self, documents: &[Document]) -> Result<RenderOutput, PipelineError> {
        let mut docs: Vec<ProcessingDocument> = super::listing::sorted(documents)
            .into_iter()
            .map(ProcessingDocument::new)
            .collect();

        let mut ctx = PipelineContext::new(self);
        self.pipeline.run(&mut docs, &mut ctx)?;

        let mut output = RenderOutput::default();
        for doc in docs {
            let path = doc.doc.path.clone();
            let url = doc.doc.url.clone();
            match (doc.error, doc.output_html) {
                (Some(err), _) => output.errors.push(err),
                (None, Some(html)) => output.pages.push(RenderedPage {
                    url,
                    source: PageSource::Post(path),
                    html,
                }),
                (None, None) => {
                    return Err(PipelineError::stage(
                        "render",
                        format!("document '{path}' produced no output (was the layout stage run?)"),
                    ));
                }
            }
        }
        let (pages, errors) = ctx.into_parts();
        output.pages.extend(pages);
        output.errors.extend(errors);

        Ok(output)
    }
}

fn layout_template(layout: &str) -> String {
    format!("{layout}.html")
}

/// Templates that cannot be registered: those that fail to parse, and those
/// that extend or import one that is broken or missing.
fn broken_layouts(templates: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut broken = BTreeMap::new();
    let mut dependencies: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for (name, source) in templates {
        match Template::new(name, None, source) {
            Ok(template) => {
                let deps = template
                    .parent
                    .into_iter()
                    .chain(template.imported_macro_files.into_iter().map(|(file, _)| file))
                    .collect();
                dependencies.insert(name.as_str(), deps);
            }
            Err(err) => {
                broken.insert(name.clone(), error_chain(&err));
            }
        }
    }

    loop {
        let newly_broken: Vec<(String, String)> = dependencies
            .iter()
            .filter(|(name, _)| !broken.contains_key(**name))
            .filter_map(|(name, deps)| {
                let dep = deps
                    .iter()
                    .find(|dep| broken.contains_key(*dep) || !templates.contains_key(*dep))?;
                let reason = if templates.contains_key(dep) {
                    "is broken"
                } else {
                    "does not exist"
                };
                Some((name.to_string(), format!("depends on '{dep}', which {reason}")))
            })
            .collect();
        if newly_broken.is_empty() {
            return broken;
        }
        broken.extend(newly_broken);
    }
}

// =============================================================================
// Render output
// =============================================================================

/// Everything one render pass produced.
#[derive(Debug, Default)]
pub struct RenderOutput {
    /// Post pages in listing order, then the index, then category pages
    pub pages: Vec<RenderedPage>,
    pub errors: Vec<RenderError>,
}

/// A rendered page, not yet written to disk.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub source: PageSource,
    pub html: String,
}

/// What a rendered page was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Post(String),
    Index,
    Category(String),
}

// =============================================================================
// Template contexts
// =============================================================================

/// Site-level information, available to every template as `site.*`.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

impl From<&SiteConfig> for SiteContext {
    fn from(site: &SiteConfig) -> Self {
        Self {
            title: site.title.clone(),
            url: site.url.clone(),
            description: site.description.clone(),
            author: site.author.clone(),
        }
    }
}

/// A link to a category listing.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
    /// Number of posts in the category (only set on listing pages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Information about a post, as `page.*` on its own page and as an entry
/// of `posts` on listing pages.
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub path: String,
    pub title: String,
    pub url: String,
    /// "YYYY-MM-DD"
    pub date: String,
    /// "YYYY-MM-DDTHH:MM:SS", for `<time datetime>`
    pub datetime: String,
    pub categories: Vec<CategoryLink>,
    pub excerpt: String,
    /// Custom front matter fields (flattened to top level, e.g., `page.author`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PageInfo {
    /// Drop extra keys that would shadow the fixed fields.
    pub fn extra_without_reserved(
        extra: &BTreeMap<String, serde_yaml::Value>,
    ) -> BTreeMap<String, serde_yaml::Value> {
        extra
            .iter()
            .filter(|(key, _)| !RESERVED_PAGE_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Title and URL of a listing page, as `page.*`.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub title: String,
    pub url: String,
}

/// Context passed to post layouts.
#[derive(Debug, Serialize)]
pub struct PostContext {
    pub site: SiteContext,
    pub page: PageInfo,
    /// Rendered body HTML
    pub content: String,
}

/// Context passed to the index template.
#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub site: SiteContext,
    pub page: ListingPage,
    pub posts: Vec<PageInfo>,
    pub categories: Vec<CategoryLink>,
}

/// Context passed to the category template.
#[derive(Debug, Serialize)]
pub struct CategoryContext {
    pub site: SiteContext,
    pub page: ListingPage,
    pub category: CategoryLink,
    pub posts: Vec<PageInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::loader::Loader;
    use crate::build::test_support::document;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Load every post under `dir/_posts`, panicking on parse errors.
    fn load(dir: &Path, config: &Config) -> Vec<Document> {
        let output = Loader::new(dir.join("_posts"), &config.content).load_all();
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        output.documents
    }

    fn example_blog() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "_posts/2015-02-13-a.md",
            "---\ntitle: Post A\ncategories: [ruby]\n---\nAbout *blocks*.\n",
        );
        write(
            dir.path(),
            "_posts/2024-05-01-b.md",
            "---\ntitle: Post B\ncategories: [golang]\n---\nAbout channels.\n",
        );
        dir
    }

    fn page<'a>(output: &'a RenderOutput, source: &PageSource) -> &'a RenderedPage {
        output
            .pages
            .iter()
            .find(|p| &p.source == source)
            .unwrap_or_else(|| panic!("no page for {source:?}"))
    }

    #[test]
    fn test_builtin_layouts_are_available() {
        let dir = TempDir::new().unwrap();
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default()).unwrap();
        for layout in ["default", "post", "index", "category"] {
            assert!(renderer.has_layout(layout), "missing {layout}");
        }
        assert!(!renderer.has_layout("nonexistent"));
    }

    #[test]
    fn test_render_example_blog() {
        let dir = example_blog();
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert!(output.errors.is_empty(), "{:?}", output.errors);

        let urls: Vec<&str> = output.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/2024/05/01/b/",
                "/2015/02/13/a/",
                "/",
                "/categories/golang/",
                "/categories/ruby/",
            ]
        );

        let index = &page(&output, &PageSource::Index).html;
        let b = index.find("Post B").unwrap();
        let a = index.find("Post A").unwrap();
        assert!(b < a, "later post must be listed first");

        let ruby = &page(&output, &PageSource::Category("ruby".into())).html;
        assert!(ruby.contains("Post A"));
        assert!(!ruby.contains("Post B"));

        let golang = &page(&output, &PageSource::Category("golang".into())).html;
        assert!(golang.contains("Post B"));
        assert!(!golang.contains("Post A"));

        let post_a = &page(&output, &PageSource::Post("2015-02-13-a.md".into())).html;
        assert!(post_a.contains("<p>About <em>blocks</em>.</p>"));
        assert!(post_a.contains("href=\"/categories/ruby/\""));
    }

    #[test]
    fn test_unknown_layout_fails_only_that_document() {
        let dir = example_blog();
        write(
            dir.path(),
            "_posts/2020-01-01-c.md",
            "---\ntitle: Post C\nlayout: nonexistent\ncategories: [ruby]\n---\nBody\n",
        );
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(output.errors.len(), 1);
        assert!(matches!(
            &output.errors[0],
            RenderError::UnknownLayout { path, layout }
                if path == "2020-01-01-c.md" && layout == "nonexistent"
        ));

        let posts: Vec<&PageSource> = output
            .pages
            .iter()
            .map(|p| &p.source)
            .filter(|s| matches!(s, PageSource::Post(_)))
            .collect();
        assert_eq!(
            posts,
            vec![
                &PageSource::Post("2024-05-01-b.md".into()),
                &PageSource::Post("2015-02-13-a.md".into()),
            ]
        );
        assert!(output.pages.iter().any(|p| p.source == PageSource::Index));
    }

    #[test]
    fn test_custom_layout_extends_builtin() {
        let dir = example_blog();
        write(
            dir.path(),
            "_layouts/note.html",
            "{% extends \"default.html\" %}{% block content %}<aside>{{ page.title }}|{{ page.mood }}</aside>{{ content | safe }}{% endblock content %}",
        );
        write(
            dir.path(),
            "_posts/2020-01-01-c.md",
            "---\ntitle: Post C\nlayout: note\nmood: sunny\n---\nBody\n",
        );
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        let post = &page(&output, &PageSource::Post("2020-01-01-c.md".into())).html;
        assert!(post.contains("<aside>Post C|sunny</aside>"));
        assert!(post.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_user_layout_overrides_builtin() {
        let dir = example_blog();
        write(
            dir.path(),
            "_layouts/index.html",
            "{% for post in posts %}{{ post.path }};{% endfor %}",
        );
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(
            page(&output, &PageSource::Index).html,
            "2024-05-01-b.md;2015-02-13-a.md;"
        );
    }

    #[test]
    fn test_duplicate_url_keeps_first_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_posts/2015-02-13-same.md", "---\ntitle: First\n---\n");
        write(
            dir.path(),
            "_posts/2016-03-01-other.md",
            "---\ntitle: Second\ndate: 2015-02-13\nslug: same\n---\n",
        );
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(output.errors.len(), 1);
        assert!(matches!(
            &output.errors[0],
            RenderError::DuplicateUrl { path, existing, .. }
                if path == "2016-03-01-other.md" && existing == "2015-02-13-same.md"
        ));
        assert!(
            output
                .pages
                .iter()
                .any(|p| p.source == PageSource::Post("2015-02-13-same.md".into()))
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let dir = example_blog();
        let config = Config::default();
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let first = renderer.render(&load(dir.path(), &config)).unwrap();
        let second = renderer.render(&load(dir.path(), &config)).unwrap();

        let html = |o: &RenderOutput| -> Vec<(String, String)> {
            o.pages.iter().map(|p| (p.url.clone(), p.html.clone())).collect()
        };
        assert_eq!(html(&first), html(&second));
    }

    #[test]
    fn test_broken_template_is_reported_per_page() {
        let dir = example_blog();
        write(dir.path(), "_layouts/post.html", "{{ page.missing_field.deeper }}");
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(output.errors.len(), 2);
        assert!(
            output
                .errors
                .iter()
                .all(|e| matches!(e, RenderError::Template { .. }))
        );
        assert!(output.pages.iter().any(|p| p.source == PageSource::Index));
    }

    #[test]
    fn test_broken_layout_fails_only_its_documents() {
        let dir = example_blog();
        write(dir.path(), "_layouts/note.html", "{% if %}");
        write(
            dir.path(),
            "_layouts/aside.html",
            "{% extends \"note.html\" %}{% block content %}{% endblock content %}",
        );
        write(
            dir.path(),
            "_posts/2020-01-01-c.md",
            "---\ntitle: Post C\nlayout: note\n---\nBody\n",
        );
        write(
            dir.path(),
            "_posts/2020-01-02-d.md",
            "---\ntitle: Post D\nlayout: aside\n---\nBody\n",
        );
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(output.errors.len(), 2, "{:?}", output.errors);
        assert!(output.errors.iter().any(|e| matches!(
            e,
            RenderError::BrokenLayout { path, layout, .. }
                if path == "2020-01-01-c.md" && layout == "note"
        )));
        assert!(output.errors.iter().any(|e| matches!(
            e,
            RenderError::BrokenLayout { path, message, .. }
                if path == "2020-01-02-d.md" && message.contains("note.html")
        )));

        for source in [
            PageSource::Post("2015-02-13-a.md".into()),
            PageSource::Post("2024-05-01-b.md".into()),
            PageSource::Index,
            PageSource::Category("ruby".into()),
        ] {
            page(&output, &source);
        }
    }

    #[test]
    fn test_broken_index_layout_keeps_post_pages() {
        let dir = example_blog();
        write(dir.path(), "_layouts/index.html", "{% for %}");
        let config = Config::default();
        let docs = load(dir.path(), &config);
        let renderer = Renderer::new(&dir.path().join("_layouts"), &config).unwrap();

        let output = renderer.render(&docs).unwrap();
        assert_eq!(output.errors.len(), 1);
        assert!(matches!(
            &output.errors[0],
            RenderError::BrokenLayout { path, layout, .. } if path == "index" && layout == "index"
        ));
        assert!(!output.pages.iter().any(|p| p.source == PageSource::Index));
        page(&output, &PageSource::Post("2015-02-13-a.md".into()));
    }

    #[test]
    fn test_unserializable_extra_is_a_page_error() {
        let dir = TempDir::new().unwrap();
        let renderer = Renderer::new(&dir.path().join("_layouts"), &Config::default()).unwrap();

        let mut odd = serde_yaml::Mapping::new();
        odd.insert(
            serde_yaml::Value::Sequence(vec!["a".into(), "b".into()]),
            "c".into(),
        );
        let mut bad = document("2015-02-13-a.md", "Body", &[]);
        bad.extra.insert("meta".to_string(), serde_yaml::Value::Mapping(odd));
        let good = document("2016-01-01-b.md", "Body", &[]);

        let output = renderer.render(&[bad, good]).unwrap();
        assert!(output.errors.iter().any(|e| matches!(
            e,
            RenderError::Template { path, .. } if path == "2015-02-13-a.md"
        )));
        page(&output, &PageSource::Post("2016-01-01-b.md".into()));
    }

    #[test]
    fn test_extra_cannot_shadow_fixed_fields() {
        let extra = BTreeMap::from([
            ("url".to_string(), serde_yaml::Value::from("/elsewhere/")),
            ("author".to_string(), serde_yaml::Value::from("Jane")),
        ]);
        let kept = PageInfo::extra_without_reserved(&extra);
        assert!(!kept.contains_key("url"));
        assert!(kept.contains_key("author"));
    }
}
