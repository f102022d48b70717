//! Normalized value records produced per call.
//!
//! Every record is owned by the call that produced it; nothing here is
//! cached or shared between invocations.

/// One full-text search match.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub title: String,
    pub page_id: u64,
    /// May contain HTML markup; strip before display.
    pub snippet: String,
    pub word_count: u64,
    /// Page size in bytes.
    pub size: u64,
    pub timestamp: String,
}

/// A page's current text plus metadata from its latest revision.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_id: u64,
    pub title: String,
    /// Wikitext of the latest revision; empty when the revision has no
    /// content.
    pub content: String,
    pub timestamp: String,
    pub user: String,
    pub comment: String,
    pub categories: Vec<String>,
    pub size: u64,
}

/// One historical edit.
#[derive(Debug, Clone)]
pub struct Revision {
    pub rev_id: u64,
    pub parent_id: u64,
    pub timestamp: String,
    pub user: String,
    pub comment: String,
    pub size: u64,
    pub minor: bool,
}

/// A category and its aggregate member counts.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub members: u64,
    pub pages: u64,
    pub files: u64,
    pub subcategories: u64,
}

/// A page, file, or subcategory inside a category.
#[derive(Debug, Clone)]
pub struct CategoryMember {
    pub page_id: u64,
    pub title: String,
    pub timestamp: String,
}

/// One logged wiki event from the recent-changes feed.
#[derive(Debug, Clone)]
pub struct RecentChange {
    /// `edit`, `new`, or `log`.
    pub kind: String,
    pub title: String,
    pub page_id: u64,
    pub rev_id: u64,
    pub old_rev_id: u64,
    pub rc_id: u64,
    pub user: String,
    pub timestamp: String,
    pub comment: String,
    /// Byte length before the change; equals `new_len` for log entries.
    pub old_len: u64,
    pub new_len: u64,
}
