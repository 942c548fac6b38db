#![forbid(unsafe_code)]

//! Chapter routes carried in the location query string.
//!
//! A chapter page lives at `/chapter?novelId=..&url=..&chapterId=..`, where
//! `url` is the main page of the content source the work was found on.

pub use nav_runtime::history::query_param;

use nav_runtime::history::{Location, encode_component};

/// Pathname of the chapter reading page.
pub const CHAPTER_PATH: &str = "/chapter";
/// Pathname of a work's chapter index.
pub const NOVEL_PATH: &str = "/novel";

/// Query parameters that identify one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRoute {
    pub novel_id: String,
    pub chapter_id: String,
    pub main_page_url: String,
}

impl ChapterRoute {
    #[must_use]
    pub fn new(
        novel_id: impl Into<String>,
        chapter_id: impl Into<String>,
        main_page_url: impl Into<String>,
    ) -> Self {
        Self {
            novel_id: novel_id.into(),
            chapter_id: chapter_id.into(),
            main_page_url: main_page_url.into(),
        }
    }

    /// Read the route from `location`. Any missing or empty parameter
    /// yields `None`.
    #[must_use]
    pub fn from_location(location: &Location) -> Option<Self> {
        let param = |key: &str| location.query(key).filter(|v| !v.is_empty());
        Some(Self {
            novel_id: param("novelId")?,
            chapter_id: param("chapterId")?,
            main_page_url: param("url")?,
        })
    }

    /// Query string for `chapter_id` of the same work.
    #[must_use]
    pub fn chapter_search(&self, chapter_id: &str) -> String {
        format!(
            "?novelId={}&url={}&chapterId={}",
            encode_component(&self.novel_id),
            encode_component(&self.main_page_url),
            encode_component(chapter_id)
        )
    }

    /// Query string for this work's chapter index.
    #[must_use]
    pub fn novel_search(&self) -> String {
        format!(
            "?novelId={}&url={}",
            encode_component(&self.novel_id),
            encode_component(&self.main_page_url)
        )
    }

    /// Full location of this chapter.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::parse(&format!(
            "{CHAPTER_PATH}{}",
            self.chapter_search(&self.chapter_id)
        ))
    }

    /// The same route pointed at another chapter.
    #[must_use]
    pub fn with_chapter(&self, chapter_id: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://books.example.com/";

    #[test]
    fn parses_complete_route() {
        let loc = Location::parse(
            "/chapter?novelId=7&url=https%3A%2F%2Fbooks.example.com%2F&chapterId=3",
        );
        let route = ChapterRoute::from_location(&loc).unwrap();
        assert_eq!(route, ChapterRoute::new("7", "3", SOURCE));
    }

    #[test]
    fn missing_or_empty_parameter_is_none() {
        assert!(ChapterRoute::from_location(&Location::parse("/chapter?novelId=7&chapterId=3")).is_none());
        assert!(ChapterRoute::from_location(&Location::parse("/chapter?novelId=&url=x&chapterId=3")).is_none());
        assert!(ChapterRoute::from_location(&Location::root()).is_none());
    }

    #[test]
    fn searches_encode_source_url() {
        let route = ChapterRoute::new("7", "3", SOURCE);
        assert_eq!(
            route.novel_search(),
            "?novelId=7&url=https%3A%2F%2Fbooks.example.com%2F"
        );
        assert!(route.chapter_search("4").ends_with("&chapterId=4"));
    }

    #[test]
    fn location_parses_back_to_route() {
        let route = ChapterRoute::new("novel 7", "3/4", SOURCE);
        let loc = route.location();
        assert_eq!(loc.pathname(), CHAPTER_PATH);
        assert_eq!(ChapterRoute::from_location(&loc), Some(route));
    }

    #[test]
    fn with_chapter_keeps_work_and_source() {
        let route = ChapterRoute::new("7", "3", SOURCE).with_chapter("4");
        assert_eq!(route.chapter_id, "4");
        assert_eq!(route.novel_id, "7");
        assert_eq!(route.main_page_url, SOURCE);
    }
}
