//! Location: path plus query string

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use crate::error::{CoreError, CoreResult};

/// 解析相对链接用的占位 origin
const LINK_BASE: &str = "http://storefront.invalid/";

/// A navigable location, e.g. `/all-products?q=phone&page=2`.
///
/// Query parameters keep their order; setting an existing key updates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            },
            query: Vec::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Parse a link. Absolute URLs are accepted and reduced to path and query.
    pub fn parse(link: &str) -> CoreResult<Self> {
        let base =
            Url::parse(LINK_BASE).map_err(|e| CoreError::InvalidRoute(format!("{link}: {e}")))?;
        let url = base
            .join(link.trim())
            .map_err(|e| CoreError::InvalidRoute(format!("{link}: {e}")))?;

        Ok(Self {
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments without empty components.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing the first existing value and dropping duplicates.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        self.query.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            v.clone_from(&value);
            true
        });
        if !found {
            self.query.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Form-encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}

impl std::str::FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_and_query() {
        let loc = Location::parse("/all-products?q=phones+under+5000&page=2").unwrap();
        assert_eq!(loc.path(), "/all-products");
        assert_eq!(loc.get("q"), Some("phones under 5000"));
        assert_eq!(loc.get("page"), Some("2"));
        assert_eq!(loc.get("name"), None);
    }

    #[test]
    fn parse_absolute_url() {
        let loc = Location::parse("http://localhost:5173/category/3?name=Books%20%26%20Media").unwrap();
        assert_eq!(loc.path(), "/category/3");
        assert_eq!(loc.get("name"), Some("Books & Media"));
    }

    #[test]
    fn parse_empty_is_root() {
        assert_eq!(Location::parse("").unwrap(), Location::default());
    }

    #[test]
    fn set_preserves_order_and_other_keys() {
        let mut loc = Location::parse("/category/3?name=Books&page=1").unwrap();
        loc.set("page", "4");
        assert_eq!(loc.to_string(), "/category/3?name=Books&page=4");

        loc.set("sort", "price");
        assert_eq!(loc.to_string(), "/category/3?name=Books&page=4&sort=price");
    }

    #[test]
    fn set_collapses_duplicates() {
        let mut loc = Location::parse("/?page=1&page=2").unwrap();
        loc.set("page", "3");
        assert_eq!(loc.query_pairs(), &[("page".to_string(), "3".to_string())]);
    }

    #[test]
    fn remove_and_display() {
        let mut loc = Location::new("/all-products").with("q", "red shoes");
        assert_eq!(loc.to_string(), "/all-products?q=red+shoes");
        loc.remove("q");
        assert_eq!(loc.to_string(), "/all-products");
    }

    #[test]
    fn display_round_trips() {
        let loc = Location::new("/all-products")
            .with("q", "a&b=c")
            .with("page", "2");
        let reparsed: Location = loc.to_string().parse().unwrap();
        assert_eq!(reparsed, loc);
    }

    #[test]
    fn segments_skip_empty_parts() {
        let loc = Location::new("/category/42/");
        assert_eq!(loc.segments(), ["category", "42"]);
    }
}
