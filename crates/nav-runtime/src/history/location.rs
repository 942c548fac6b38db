#![forbid(unsafe_code)]

//! Location values: what a history frame points at.
//!
//! A [`LocationDescriptor`] is a partial address supplied by callers. It is
//! resolved against the current [`Location`] into a full one: a missing
//! pathname keeps the current pathname, a relative pathname is joined to the
//! current directory, and `search`/`hash` gain their `?`/`#` prefix.

use std::fmt;

/// A fully resolved address: pathname, query string and fragment.
///
/// # Invariants
///
/// 1. `pathname` starts with `/`.
/// 2. `search` is empty or starts with `?`.
/// 3. `hash` is empty or starts with `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pathname: String,
    search: String,
    hash: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl Location {
    /// The `/` location.
    #[must_use]
    pub fn root() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Parse a path string such as `/novel?novelId=7#top`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        LocationDescriptor::parse(path).resolve(None)
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// `pathname + search + hash`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    /// Decoded value of the first `key` parameter in the query string.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<String> {
        query_param(&self.search, key)
    }

    /// Descriptor that resolves back to this exact location.
    #[must_use]
    pub fn to_descriptor(&self) -> LocationDescriptor {
        LocationDescriptor {
            pathname: Some(self.pathname.clone()),
            search: self.search.clone(),
            hash: self.hash.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// A partial address to navigate to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDescriptor {
    /// `None` keeps the current pathname.
    pub pathname: Option<String>,
    pub search: String,
    pub hash: String,
}

impl LocationDescriptor {
    #[must_use]
    pub fn path(pathname: impl Into<String>) -> Self {
        Self {
            pathname: Some(pathname.into()),
            ..Self::default()
        }
    }

    /// A descriptor that only changes the query string.
    #[must_use]
    pub fn search_only(search: impl Into<String>) -> Self {
        Self {
            pathname: None,
            search: search.into(),
            hash: String::new(),
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Split a path string into pathname, search and hash.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(i) => (&path[..i], &path[i..]),
            None => (path, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        Self {
            pathname: (!pathname.is_empty()).then(|| pathname.to_string()),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Resolve against `current` (or `/` when there is none).
    #[must_use]
    pub fn resolve(&self, current: Option<&Location>) -> Location {
        let base = current.map_or("/", Location::pathname);
        let pathname = match self.pathname.as_deref() {
            None | Some("") => base.to_string(),
            Some(p) if p.starts_with('/') => normalize(p),
            Some(p) => {
                let dir = &base[..base.rfind('/').map_or(0, |i| i + 1)];
                normalize(&format!("{dir}{p}"))
            }
        };
        Location {
            pathname,
            search: with_prefix(&self.search, '?'),
            hash: with_prefix(&self.hash, '#'),
        }
    }
}

impl From<&str> for LocationDescriptor {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<&Location> for LocationDescriptor {
    fn from(location: &Location) -> Self {
        location.to_descriptor()
    }
}

fn with_prefix(part: &str, prefix: char) -> String {
    if part.is_empty() || part == prefix.to_string() {
        String::new()
    } else if part.starts_with(prefix) {
        part.to_string()
    } else {
        format!("{prefix}{part}")
    }
}

/// Collapse `.` and `..` segments of an absolute pathname.
fn normalize(pathname: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in pathname.split('/').skip(1) {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    let trailing = matches!(pathname.rsplit('/').next(), Some(".") | Some(".."));
    let mut out = format!("/{}", segments.join("/"));
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Decoded value of the first `key` parameter in `search`.
///
/// Accepts the query with or without its leading `?`. `+` decodes to a
/// space and `%XX` escapes are decoded as UTF-8 (invalid sequences are
/// replaced).
#[must_use]
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .strip_prefix('?')
        .unwrap_or(search)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k) == key).then(|| decode_component(v))
        })
}

/// Percent-encode a query component (RFC 3986 unreserved set kept as is).
#[must_use]
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// A location labeled for breadcrumb display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedLocation {
    location: Location,
    name: String,
}

impl NamedLocation {
    #[must_use]
    pub fn new(location: Location, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        self.location.pathname()
    }

    #[must_use]
    pub fn search(&self) -> &str {
        self.location.search()
    }

    #[must_use]
    pub fn hash(&self) -> &str {
        self.location.hash()
    }

    /// Same location under a new label.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            location: self.location.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NamedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_all_parts() {
        let loc = Location::parse("/novel?novelId=7#top");
        assert_eq!(loc.pathname(), "/novel");
        assert_eq!(loc.search(), "?novelId=7");
        assert_eq!(loc.hash(), "#top");
        assert_eq!(loc.path(), "/novel?novelId=7#top");
    }

    #[test]
    fn prefixes_added_when_missing() {
        let loc = LocationDescriptor::path("/chapter")
            .with_search("chapterId=3")
            .with_hash("p2")
            .resolve(None);
        assert_eq!(loc.path(), "/chapter?chapterId=3#p2");
    }

    #[test]
    fn bare_prefixes_collapse_to_empty() {
        let loc = LocationDescriptor::path("/a").with_search("?").resolve(None);
        assert_eq!(loc.search(), "");
    }

    #[test]
    fn missing_pathname_keeps_current() {
        let current = Location::parse("/chapter?chapterId=3");
        let next = LocationDescriptor::search_only("?chapterId=4").resolve(Some(&current));
        assert_eq!(next.path(), "/chapter?chapterId=4");
    }

    #[test]
    fn missing_pathname_without_current_is_root() {
        let loc = LocationDescriptor::search_only("q=1").resolve(None);
        assert_eq!(loc.path(), "/?q=1");
    }

    #[test]
    fn relative_pathname_joins_current_directory() {
        let current = Location::parse("/books/novel");
        let next = LocationDescriptor::path("chapter").resolve(Some(&current));
        assert_eq!(next.pathname(), "/books/chapter");

        let up = LocationDescriptor::path("../index").resolve(Some(&current));
        assert_eq!(up.pathname(), "/index");
    }

    #[test]
    fn dot_segments_normalized() {
        assert_eq!(Location::parse("/a/./b/../c").pathname(), "/a/c");
        assert_eq!(Location::parse("/a/b/..").pathname(), "/a/");
        assert_eq!(Location::parse("/../..").pathname(), "/");
    }

    #[test]
    fn query_decodes_values() {
        let loc = Location::parse("/chapter?novelId=7&url=https%3A%2F%2Fexample.com&title=a+b");
        assert_eq!(loc.query("novelId").as_deref(), Some("7"));
        assert_eq!(loc.query("url").as_deref(), Some("https://example.com"));
        assert_eq!(loc.query("title").as_deref(), Some("a b"));
        assert_eq!(loc.query("missing"), None);
    }

    #[test]
    fn query_first_occurrence_wins_and_bare_key_is_empty() {
        assert_eq!(query_param("a=1&a=2", "a").as_deref(), Some("1"));
        assert_eq!(query_param("?flag&b=2", "flag").as_deref(), Some(""));
    }

    #[test]
    fn malformed_escapes_kept_literally() {
        assert_eq!(query_param("x=%zz%4", "x").as_deref(), Some("%zz%4"));
        assert_eq!(query_param("x=%E7%AB%A0", "x").as_deref(), Some("章"));
    }

    #[test]
    fn encode_then_query_recovers_value() {
        let raw = "https://example.com/a b?c=d&e";
        let search = format!("?url={}", encode_component(raw));
        assert_eq!(query_param(&search, "url").as_deref(), Some(raw));
    }

    #[test]
    fn named_location_renamed_keeps_location() {
        let named = NamedLocation::new(Location::parse("/chapter?chapterId=3"), "Ch. 3");
        let renamed = named.renamed("Chapter Three");
        assert_eq!(renamed.location(), named.location());
        assert_eq!(renamed.name(), "Chapter Three");
        assert_eq!(renamed.to_string(), "Chapter Three (/chapter?chapterId=3)");
    }
}
