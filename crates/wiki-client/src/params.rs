//! Per-operation request records.
//!
//! Each record serializes to exactly the query parameters its operation
//! needs; optional filters are omitted from the request entirely rather than
//! sent empty. The fixed `format=json&formatversion=2` pair is appended by
//! the client itself.

use serde::Serialize;

/// Title prefix of the category namespace.
pub const CATEGORY_PREFIX: &str = "Category:";

/// Prepends the category namespace prefix unless already present.
pub fn normalize_category_title(category: &str) -> String {
    if category.starts_with(CATEGORY_PREFIX) {
        category.to_string()
    } else {
        format!("{CATEGORY_PREFIX}{category}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery<'a> {
    pub action: &'static str,
    pub list: &'static str,
    pub srsearch: &'a str,
    pub srlimit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srnamespace: Option<u32>,
    pub srprop: &'static str,
}

impl<'a> SearchQuery<'a> {
    pub fn new(query: &'a str, limit: u32, namespace: Option<u32>) -> Self {
        Self {
            action: "query",
            list: "search",
            srsearch: query,
            srlimit: limit,
            srnamespace: namespace,
            srprop: "size|wordcount|timestamp|snippet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery<'a> {
    pub action: &'static str,
    pub prop: &'static str,
    pub titles: &'a str,
    pub rvprop: &'static str,
    pub rvslots: &'static str,
    pub rvlimit: u32,
    pub cllimit: &'static str,
}

impl<'a> PageQuery<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            action: "query",
            prop: "revisions|categories",
            titles: title,
            rvprop: "ids|timestamp|user|comment|size|content",
            rvslots: "main",
            rvlimit: 1,
            cllimit: "max",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseQuery<'a> {
    pub action: &'static str,
    pub page: &'a str,
    pub prop: &'static str,
}

impl<'a> ParseQuery<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            action: "parse",
            page: title,
            prop: "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryQuery<'a> {
    pub action: &'static str,
    pub prop: &'static str,
    pub titles: &'a str,
    pub rvlimit: u32,
    pub rvprop: &'static str,
}

impl<'a> HistoryQuery<'a> {
    pub fn new(title: &'a str, limit: u32) -> Self {
        Self {
            action: "query",
            prop: "revisions",
            titles: title,
            rvlimit: limit,
            rvprop: "ids|timestamp|user|comment|size|flags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllCategoriesQuery<'a> {
    pub action: &'static str,
    pub list: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acprefix: Option<&'a str>,
    pub aclimit: u32,
    pub acprop: &'static str,
}

impl<'a> AllCategoriesQuery<'a> {
    pub fn new(prefix: Option<&'a str>, limit: u32) -> Self {
        Self {
            action: "query",
            list: "allcategories",
            acprefix: prefix,
            aclimit: limit,
            acprop: "size",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMembersQuery {
    pub action: &'static str,
    pub list: &'static str,
    pub cmtitle: String,
    pub cmlimit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmtype: Option<String>,
    pub cmprop: &'static str,
}

impl CategoryMembersQuery {
    /// Normalizes the category title: the namespace prefix is prepended
    /// unless already present, so `Foo` and `Category:Foo` issue the
    /// identical request.
    pub fn new(category: &str, limit: u32, member_type: Option<&str>) -> Self {
        Self {
            action: "query",
            list: "categorymembers",
            cmtitle: normalize_category_title(category),
            cmlimit: limit,
            cmtype: member_type.map(str::to_string),
            cmprop: "ids|title|timestamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentChangesQuery {
    pub action: &'static str,
    pub list: &'static str,
    pub rclimit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rcnamespace: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rctype: Option<String>,
    pub rcprop: &'static str,
}

impl RecentChangesQuery {
    pub fn new(limit: u32, namespace: Option<u32>, change_type: Option<&str>) -> Self {
        Self {
            action: "query",
            list: "recentchanges",
            rclimit: limit,
            rcnamespace: namespace,
            rctype: change_type.map(str::to_string),
            rcprop: "title|ids|sizes|flags|user|timestamp|comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinksQuery<'a> {
    pub action: &'static str,
    pub prop: &'static str,
    pub titles: &'a str,
    pub pllimit: u32,
}

impl<'a> LinksQuery<'a> {
    pub fn new(title: &'a str, limit: u32) -> Self {
        Self {
            action: "query",
            prop: "links",
            titles: title,
            pllimit: limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacklinksQuery<'a> {
    pub action: &'static str,
    pub list: &'static str,
    pub bltitle: &'a str,
    pub bllimit: u32,
}

impl<'a> BacklinksQuery<'a> {
    pub fn new(title: &'a str, limit: u32) -> Self {
        Self {
            action: "query",
            list: "backlinks",
            bltitle: title,
            bllimit: limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefix_is_prepended_once() {
        let bare = CategoryMembersQuery::new("Foo", 50, None);
        let prefixed = CategoryMembersQuery::new("Category:Foo", 50, None);
        assert_eq!(bare, prefixed);
        assert_eq!(bare.cmtitle, "Category:Foo");
    }

    #[test]
    fn optional_filters_are_omitted() {
        let query = SearchQuery::new("rust", 10, None);
        let encoded = serde_json::to_value(&query).unwrap();
        assert!(encoded.get("srnamespace").is_none());

        let query = SearchQuery::new("rust", 10, Some(4));
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(encoded["srnamespace"], 4);
    }

    #[test]
    fn member_type_filter_round_trips() {
        let query = CategoryMembersQuery::new("Foo", 25, Some("file"));
        assert_eq!(query.cmtype.as_deref(), Some("file"));
        assert_eq!(query.cmlimit, 25);
    }
}
