//! Catalog filtering.
//!
//! Three independent, conjunctive predicates over the fetched listing set:
//! a free-text query matched case-insensitively against title or author, a
//! category selector, and a course-tag selector (exact match, no
//! normalization). The filter is pure and is recomputed per request from
//! the unfiltered set -- no index, no cache.

use serde::Deserialize;

/// Sentinel selector value meaning "no filtering on this field".
pub const FILTER_ALL: &str = "all";

/// A catalog filter triple as submitted by the client.
///
/// Missing fields deserialize to their pass-through defaults (empty query,
/// `"all"` selectors), so an unfiltered request returns the set unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFilter {
    /// Free-text query against title or author. Empty matches everything.
    #[serde(default)]
    pub query: String,
    /// Category selector: `"all"` or one of the category values.
    #[serde(default = "default_all")]
    pub category: String,
    /// Course-tag selector: `"all"` or an exact course tag.
    #[serde(default = "default_all")]
    pub course: String,
}

fn default_all() -> String {
    FILTER_ALL.to_string()
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: default_all(),
            course: default_all(),
        }
    }
}

impl CatalogFilter {
    /// True when every field is at its pass-through default.
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.category == FILTER_ALL && self.course == FILTER_ALL
    }

    /// Evaluate the three conjunctive predicates against one listing.
    ///
    /// A listing with no course tag matches only when the course selector
    /// is `"all"` -- there is no "untagged" filter value.
    pub fn matches(
        &self,
        title: &str,
        author: &str,
        category: &str,
        course_tag: Option<&str>,
    ) -> bool {
        let matches_query = self.query.is_empty() || {
            let needle = self.query.to_lowercase();
            title.to_lowercase().contains(&needle) || author.to_lowercase().contains(&needle)
        };

        let matches_category = self.category == FILTER_ALL || self.category == category;

        let matches_course = self.course == FILTER_ALL || course_tag == Some(self.course.as_str());

        matches_query && matches_category && matches_course
    }
}
