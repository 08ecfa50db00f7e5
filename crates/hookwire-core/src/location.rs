//! Page location and full-reload navigation.

/// Path and query of the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, e.g. `/users`.
    pub pathname: String,
    /// Query string without the leading `?`.
    pub search: String,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let search = search.into();
        Self {
            pathname: pathname.into(),
            search: search.strip_prefix('?').map(str::to_owned).unwrap_or(search),
        }
    }

    /// Split a `path?query` reference.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(href, ""),
        }
    }

    /// Reference for the same path with `query` as its query string.
    ///
    /// The `?` is always present, even for an empty query.
    #[must_use]
    pub fn href_with_query(&self, query: &str) -> String {
        format!("{}?{}", self.pathname, query)
    }
}

/// Host surface for reading and replacing the page location.
///
/// `assign` performs a full navigation: the server renders the next page
/// from the query string, so no client state survives the call.
pub trait Navigator {
    fn location(&self) -> Location;

    fn assign(&mut self, href: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_question_mark_is_stripped() {
        let loc = Location::new("/users", "?page=2");
        assert_eq!(loc.search, "page=2");
    }

    #[test]
    fn from_href_splits_once() {
        let loc = Location::from_href("/a?x=1?y");
        assert_eq!(loc.pathname, "/a");
        assert_eq!(loc.search, "x=1?y");
        assert_eq!(Location::from_href("/b").search, "");
    }

    #[test]
    fn href_keeps_question_mark_for_empty_query() {
        assert_eq!(Location::new("/users", "").href_with_query(""), "/users?");
    }
}
