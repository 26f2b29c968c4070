//! Ordering and grouping of documents for index and category listings.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::document::Document;

/// Listing order: most recent first, ties broken by ascending path.
pub fn listing_order(a: &Document, b: &Document) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path))
}

/// Documents sorted into listing order.
pub fn sorted<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Vec<&'a Document> {
    let mut docs: Vec<&Document> = docs.into_iter().collect();
    docs.sort_by(|a, b| listing_order(a, b));
    docs
}

/// Group documents by category, keeping the input order within each group.
///
/// Category names match exactly (case-sensitive). Groups are keyed by name
/// in byte order, so iteration is deterministic.
pub fn group_by_category<'a, T, F>(items: &'a [T], doc: F) -> BTreeMap<&'a str, Vec<&'a T>>
where
    F: Fn(&'a T) -> &'a Document,
{
    let mut groups: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for item in items {
        for category in &doc(item).categories {
            groups.entry(category.as_str()).or_default().push(item);
        }
    }
    groups
}
