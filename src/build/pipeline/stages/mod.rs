//! Default pipeline stages.
//!
//! The standard render pipeline consists of:
//!
//! 1. **UrlStage** - Claim each post's permalink, failing clashes
//! 2. **MarkdownStage** - Convert markdown bodies to HTML, extract excerpts
//! 3. **LayoutStage** - Wrap content in the post's layout template
//!
//! followed by the finalize stages:
//!
//! - **IndexStage** - Render the index page
//! - **CategoryStage** - Render one listing page per category

mod layout;
mod listing;
mod markdown;
mod urls;

pub use layout::LayoutStage;
pub use listing::{CategoryStage, IndexStage};
pub use markdown::MarkdownStage;
pub use urls::UrlStage;
