//! Listing page stages: the index and one page per category.
//!
//! Both run after every document has been processed and see the documents
//! in listing order (most recent first, ties by path).

use tracing::debug;

use crate::build::listing::group_by_category;
use crate::build::paths::category_url;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError, ProcessingDocument};
use crate::build::render::{
    CATEGORY_LAYOUT, CategoryContext, CategoryLink, INDEX_LAYOUT, IndexContext, ListingPage,
    PageInfo, PageSource, RenderError, RenderedPage,
};

use super::urls::INDEX_OWNER;

/// Stage that renders the index page listing every post.
pub struct IndexStage;

impl FinalizeStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn finalize(
        &self,
        docs: &[ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let renderer = ctx.renderer;
        let category_dir = renderer.category_dir();

        if let Err(err) = renderer.check_layout(INDEX_OWNER, INDEX_LAYOUT) {
            ctx.emit_error(err);
            return Ok(());
        }

        let posts: Vec<PageInfo> = docs.iter().map(|d| d.page_info(category_dir)).collect();
        let categories: Vec<CategoryLink> = group_by_category(docs, |d| d.doc)
            .into_iter()
            .map(|(name, members)| CategoryLink {
                name: name.to_string(),
                url: category_url(category_dir, name),
                count: Some(members.len()),
            })
            .collect();

        let context = IndexContext {
            site: renderer.site().clone(),
            page: ListingPage {
                title: renderer.site().title.clone(),
                url: "/".to_string(),
            },
            posts,
            categories,
        };

        match renderer.render_index(&context) {
            Ok(html) => {
                debug!(posts = docs.len(), "rendered index");
                ctx.emit_page(RenderedPage {
                    url: "/".to_string(),
                    source: PageSource::Index,
                    html,
                });
            }
            Err(err) => ctx.emit_error(RenderError::template(INDEX_OWNER, &err)),
        }

        Ok(())
    }
}

/// Stage that renders one listing page per distinct category.
///
/// Categories are matched exactly (case-sensitive). Two categories whose
/// names slugify to the same URL clash: the first in byte order keeps it.
pub struct CategoryStage;

impl FinalizeStage for CategoryStage {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn finalize(
        &self,
        docs: &[ProcessingDocument<'_>],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let renderer = ctx.renderer;
        let category_dir = renderer.category_dir();

        for (name, members) in group_by_category(docs, |d| d.doc) {
            let url = category_url(category_dir, name);
            let owner = format!("category '{name}'");
            if let Err(err) = ctx.claim_url(&url, &owner) {
                ctx.emit_error(err);
                continue;
            }
            if let Err(err) = renderer.check_layout(&owner, CATEGORY_LAYOUT) {
                ctx.emit_error(err);
                continue;
            }

            let context = CategoryContext {
                site: renderer.site().clone(),
                page: ListingPage {
                    title: name.to_string(),
                    url: url.clone(),
                },
                category: CategoryLink {
                    name: name.to_string(),
                    url: url.clone(),
                    count: Some(members.len()),
                },
                posts: members.iter().map(|d| d.page_info(category_dir)).collect(),
            };

            match renderer.render_category(&context) {
                Ok(html) => {
                    debug!(category = name, posts = members.len(), "rendered category");
                    ctx.emit_page(RenderedPage {
                        url,
                        source: PageSource::Category(name.to_string()),
                        html,
                    });
                }
                Err(err) => ctx.emit_error(RenderError::template(owner, &err)),
            }
        }

        Ok(())
    }
}
