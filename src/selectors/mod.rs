//! Selector catalog infrastructure.
//!
//! Selection rules are plain predicate functions over a DOM element. The
//! catalog modules define substring families grouped by intent: the main
//! body, comment sections, elements to discard, metadata carriers. For
//! selection operations the catalog is ordered and the first matching
//! family wins; for discard operations the union is removed.

use crate::dom::{self, Selection};

pub mod comments;
pub mod content;
pub mod discard;
pub mod meta;

/// A selector rule testing whether an element matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// The combined class and id of an element, lowercased.
#[must_use]
pub fn id_class(sel: &Selection) -> String {
    let id = dom::id(sel).unwrap_or_default();
    let class = dom::class_name(sel).unwrap_or_default();
    format!("{id} {class}").to_lowercase()
}

/// All attributes a substring family matches against: class, id, role,
/// itemprop. Lowercased and joined.
#[must_use]
pub fn match_surface(sel: &Selection) -> String {
    let role = dom::get_attribute(sel, "role").unwrap_or_default();
    let itemprop = dom::get_attribute(sel, "itemprop").unwrap_or_default();
    format!("{} {role} {itemprop}", id_class(sel)).to_lowercase()
}

/// True when any needle occurs in the element's match surface.
#[must_use]
pub fn matches_any(sel: &Selection, needles: &[&str]) -> bool {
    let surface = match_surface(sel);
    if surface.trim().is_empty() {
        return false;
    }
    needles.iter().any(|needle| surface.contains(needle))
}

/// Query for the first element matching the rule, in document order.
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}

/// Query for all elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            matches.push(sel);
        }
    }
    matches
}
