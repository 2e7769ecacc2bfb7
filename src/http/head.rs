//! Message headers.
//!
//! # Design Decisions
//! - A head is an ordered list, not a map: repeated keys (e.g. `Set-Cookie`)
//!   keep their relative order
//! - Key lookups are ASCII case-insensitive

use axum::http::HeaderMap;

/// A single header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered sequence of headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    headers: Vec<Header>,
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping any existing headers with the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Header::new(key, value));
    }

    /// Builder form of [`Head::add`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// All values stored under `key`, in insertion order.
    ///
    /// Returns an empty vector when the key is absent.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
            .collect()
    }

    /// First value stored under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl From<Vec<Header>> for Head {
    fn from(headers: Vec<Header>) -> Self {
        Self { headers }
    }
}

impl FromIterator<Header> for Head {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Self {
            headers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Head {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

impl IntoIterator for Head {
    type Item = Header;
    type IntoIter = std::vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

/// Non UTF-8 header values are converted lossily.
impl From<&HeaderMap> for Head {
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                Header::new(
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_values_keeps_order() {
        let head = Head::new().with("X", "1").with("Y", "other").with("X", "2");
        assert_eq!(head.values("X"), vec!["1", "2"]);
    }

    #[test]
    fn test_values_absent_is_empty() {
        let head = Head::new().with("Y", "1");
        assert!(head.values("X").is_empty());
        assert!(Head::new().values("X").is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let head = Head::new().with("Content-Type", "text/plain");
        assert_eq!(head.first("content-type"), Some("text/plain"));
        assert_eq!(head.values("CONTENT-TYPE"), vec!["text/plain"]);
    }

    #[test]
    fn test_from_header_map() {
        let mut map = HeaderMap::new();
        map.append("accept", HeaderValue::from_static("text/html"));
        map.append("accept", HeaderValue::from_static("application/json"));
        map.append("host", HeaderValue::from_static("example.com"));

        let head = Head::from(&map);
        assert_eq!(head.len(), 3);
        assert_eq!(head.values("Accept"), vec!["text/html", "application/json"]);
        assert_eq!(head.first("host"), Some("example.com"));
    }
}
