//! View-local UI state with pure transitions
//!
//! Pages are rendered on the server, so a toggle is a link to the same page
//! with the toggled state in the query string.

use serde::Serialize;

use crate::helpers::encode_segment;

/// Collapsed/expanded post body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BodyToggle {
    pub expanded: bool,
}

impl BodyToggle {
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    pub fn toggled(self) -> Self {
        Self {
            expanded: !self.expanded,
        }
    }

    /// Text of the toggle control
    pub fn label(self) -> &'static str {
        if self.expanded {
            "Collapse"
        } else {
            "Read Full Story →"
        }
    }

    /// Link that switches to the other state
    pub fn toggle_href(self, page_path: &str) -> String {
        if self.toggled().expanded {
            format!("{}?expanded=true", page_path)
        } else {
            page_path.to_string()
        }
    }
}

/// A list where at most one item is expanded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpandableList {
    pub open: Option<String>,
}

impl ExpandableList {
    pub fn new(open: Option<String>) -> Self {
        Self {
            open: open.filter(|s| !s.is_empty()),
        }
    }

    /// Opening the open item closes it; opening another item switches to it
    pub fn toggled(&self, slug: &str) -> Self {
        if self.is_open(slug) {
            Self { open: None }
        } else {
            Self {
                open: Some(slug.to_string()),
            }
        }
    }

    pub fn is_open(&self, slug: &str) -> bool {
        self.open.as_deref() == Some(slug)
    }

    /// Link that toggles one item
    pub fn toggle_href(&self, page_path: &str, slug: &str) -> String {
        match self.toggled(slug).open {
            Some(open) => format!("{}?open={}", page_path, encode_segment(&open)),
            None => page_path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_toggle() {
        let collapsed = BodyToggle::default();
        assert_eq!(collapsed.label(), "Read Full Story →");
        assert_eq!(collapsed.toggle_href("/posts/a"), "/posts/a?expanded=true");

        let expanded = collapsed.toggled();
        assert!(expanded.expanded);
        assert_eq!(expanded.label(), "Collapse");
        assert_eq!(expanded.toggle_href("/posts/a"), "/posts/a");
    }

    #[test]
    fn test_expandable_list_single_open() {
        let list = ExpandableList::default();
        let a = list.toggled("a");
        assert!(a.is_open("a"));

        let b = a.toggled("b");
        assert!(b.is_open("b"));
        assert!(!b.is_open("a"));

        assert_eq!(b.toggled("b"), ExpandableList::default());
        assert_eq!(b.toggle_href("/category/news", "b"), "/category/news");
        assert_eq!(b.toggle_href("/category/news", "c"), "/category/news?open=c");
    }

    #[test]
    fn test_empty_open_param_is_closed() {
        assert_eq!(ExpandableList::new(Some(String::new())), ExpandableList::default());
    }
}
