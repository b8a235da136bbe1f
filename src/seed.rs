//! Deterministic test-post derivation and the merge into both documents.
//!
//! Everything here is pure: callers load the documents, hand them over with a
//! range, and decide themselves what to do with the result.
use crate::schema::{Entry, ManifestDocument, PageTypesDocument};
use serde_json::{json, Map, Value};

/// Content type recorded for every seeded slug.
pub const TEST_POST_PAGE_TYPE: &str = "post";

const TEST_POST_STATUS: &str = "published";
/// Indices up to this value are dated in the first year bucket.
const FIRST_YEAR_LAST_INDEX: i128 = 50;
const FIRST_YEAR: i64 = 2025;
const SECOND_YEAR: i64 = 2026;

/// Inclusive index range; empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
    pub start: i64,
    pub end: i64,
}

impl SeedRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn indices(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Fields derived for a single test-post index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPost {
    pub slug: String,
    pub title: String,
    pub year: i64,
    /// Month and day are widened so every `i64` index derives without overflow.
    pub month: i128,
    pub day: i128,
}

impl TestPost {
    pub fn for_index(index: i64) -> Self {
        let wide = i128::from(index);
        let (year, offset) = if wide <= FIRST_YEAR_LAST_INDEX {
            (FIRST_YEAR, wide - 1)
        } else {
            (SECOND_YEAR, wide - FIRST_YEAR_LAST_INDEX - 1)
        };
        Self {
            slug: test_post_slug(index),
            title: format!("Test Post Nummer {index}"),
            year,
            month: offset.div_euclid(10) + 1,
            day: offset.rem_euclid(10) + 1,
        }
    }

    /// Fixed noon UTC timestamp. Month is not clamped to the calendar.
    pub fn published_at(&self) -> String {
        format!(
            "{}-{:02}-{:02}T12:00:00+00:00",
            self.year, self.month, self.day
        )
    }

    pub fn has_calendar_date(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    pub fn to_entry(&self) -> Entry {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(TEST_POST_STATUS));
        fields.insert("hash".to_string(), json!([]));
        fields.insert("title".to_string(), json!(self.title));
        fields.insert("publishedAt".to_string(), json!(self.published_at()));
        Entry::new(self.slug.clone(), fields)
    }
}

pub fn test_post_slug(index: i64) -> String {
    format!("test-post-{index}")
}

/// Documents after a merge plus the number of manifest entries appended.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOutcome {
    pub manifest: ManifestDocument,
    pub page_types: PageTypesDocument,
    pub added: usize,
}

/// Insert every test post in `range` that is missing from either document.
///
/// Existing entries and page-type mappings are never touched, so reruns only
/// fill gaps.
pub fn apply_range(
    mut manifest: ManifestDocument,
    mut page_types: PageTypesDocument,
    range: SeedRange,
) -> SeedOutcome {
    let mut added = 0;
    let mut off_calendar = 0usize;

    for index in range.indices() {
        let post = TestPost::for_index(index);
        if !post.has_calendar_date() {
            off_calendar += 1;
        }

        if manifest.contains_slug(&post.slug) {
            tracing::debug!(slug = %post.slug, "manifest entry exists; leaving unchanged");
        } else {
            manifest.entries.push(post.to_entry());
            added += 1;
        }

        if !page_types.contains_slug(&post.slug) {
            page_types.types.insert(
                post.slug.clone(),
                Value::String(TEST_POST_PAGE_TYPE.to_string()),
            );
        }
    }

    if off_calendar > 0 {
        tracing::warn!(
            count = off_calendar,
            "range produces publishedAt months outside 1-12; dates are kept as synthetic values"
        );
    }
    tracing::debug!(
        start = range.start,
        end = range.end,
        added,
        "merged test posts"
    );

    SeedOutcome {
        manifest,
        page_types,
        added,
    }
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
