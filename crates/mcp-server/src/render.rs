//! Deterministic text rendering shared by the tool handlers.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Removes HTML markup from a search snippet before display.
pub(crate) fn strip_html(input: &str) -> String {
    HTML_TAG.replace_all(input, "").into_owned()
}

/// Byte-size delta of a revision against the next-older one in the same
/// response: `(+N)` when it grew, `(-N)` when it shrank, empty when equal.
/// The oldest revision of a response has no delta at all.
pub(crate) fn history_delta(size: u64, older_size: u64) -> String {
    let delta = size as i64 - older_size as i64;
    if delta > 0 {
        format!("(+{delta})")
    } else if delta < 0 {
        format!("({delta})")
    } else {
        String::new()
    }
}

/// Size delta of a logged change, always `newlen - oldlen`. Positive values
/// carry an explicit leading `+`; negative and zero render as the bare
/// number.
pub(crate) fn change_delta(old_len: u64, new_len: u64) -> String {
    let delta = new_len as i64 - old_len as i64;
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

pub(crate) fn no_search_results(query: &str) -> String {
    format!("No results found for \"{query}\".")
}

pub(crate) fn page_not_found(title: &str) -> String {
    format!("Page not found: {title}")
}

pub(crate) fn no_history(title: &str) -> String {
    format!("No history found for \"{title}\".")
}

pub(crate) fn no_categories(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("No categories found matching \"{prefix}\"."),
        None => "No categories found.".to_string(),
    }
}

pub(crate) fn no_category_members(category: &str) -> String {
    format!("No members found in {category}.")
}

pub(crate) fn no_recent_changes() -> String {
    "No recent changes found.".to_string()
}

pub(crate) fn no_links(title: &str) -> String {
    format!("No links found on page \"{title}\".")
}

pub(crate) fn no_backlinks(title: &str) -> String {
    format!("No pages link to \"{title}\".")
}

pub(crate) fn comment_or_default(comment: &str) -> &str {
    if comment.is_empty() {
        "No comment"
    } else {
        comment
    }
}

pub(crate) fn join_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        "None".to_string()
    } else {
        categories.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_html_tags() {
        assert_eq!(strip_html("<span>hello</span> world"), "hello world");
        assert_eq!(
            strip_html(r#"<span class="searchmatch">Rust</span> is fast"#),
            "Rust is fast"
        );
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn history_delta_rendering() {
        // Newest-first sizes [500, 420, 420]: the first revision grew by 80,
        // the second matches the third, the oldest gets no delta at all.
        let sizes = [500u64, 420, 420];
        assert_eq!(history_delta(sizes[0], sizes[1]), "(+80)");
        assert_eq!(history_delta(sizes[1], sizes[2]), "");
        assert_eq!(history_delta(400, 433), "(-33)");
    }

    #[test]
    fn change_delta_rendering() {
        assert_eq!(change_delta(100, 80), "-20");
        assert_eq!(change_delta(100, 150), "+50");
        assert_eq!(change_delta(100, 100), "0");
    }

    #[test]
    fn fixed_no_result_messages() {
        assert_eq!(
            no_search_results("zzzz-no-such-term"),
            "No results found for \"zzzz-no-such-term\"."
        );
        assert_eq!(page_not_found("Ghost"), "Page not found: Ghost");
        assert_eq!(no_categories(None), "No categories found.");
        assert_eq!(
            no_categories(Some("Rust")),
            "No categories found matching \"Rust\"."
        );
        assert_eq!(no_links("A"), "No links found on page \"A\".");
        assert_eq!(no_backlinks("A"), "No pages link to \"A\".");
    }

    #[test]
    fn empty_fields_get_placeholders() {
        assert_eq!(comment_or_default(""), "No comment");
        assert_eq!(comment_or_default("tidy"), "tidy");
        assert_eq!(join_categories(&[]), "None");
        assert_eq!(
            join_categories(&["Category:A".to_string(), "Category:B".to_string()]),
            "Category:A, Category:B"
        );
    }
}
