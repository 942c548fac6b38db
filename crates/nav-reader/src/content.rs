#![forbid(unsafe_code)]

//! Chapter content as delivered by a content source.

use std::fmt;

/// One fetched chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChapterContent {
    pub novel_id: String,
    pub novel_name: String,
    pub chapter_name: String,
    /// Paragraphs in reading order.
    pub content_list: Vec<String>,
    pub pre_chapter_id: Option<String>,
    pub next_chapter_id: Option<String>,
}

/// Errors a content source can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The source has no such chapter.
    NotFound { novel_id: String, chapter_id: String },
    /// Transport failure.
    Network(String),
    /// The page was fetched but could not be parsed.
    Parse(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound {
                novel_id,
                chapter_id,
            } => write!(f, "chapter {chapter_id} of novel {novel_id} not found"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

/// Where chapter text comes from.
///
/// Fetching happens outside the history store; callers finish the fetch
/// before mutating navigation state.
pub trait ContentSource {
    fn fetch_chapter(&self, novel_id: &str, chapter_id: &str)
    -> Result<ChapterContent, ContentError>;
}

impl<F> ContentSource for F
where
    F: Fn(&str, &str) -> Result<ChapterContent, ContentError>,
{
    fn fetch_chapter(
        &self,
        novel_id: &str,
        chapter_id: &str,
    ) -> Result<ChapterContent, ContentError> {
        self(novel_id, chapter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sources() {
        let source = |novel: &str, chapter: &str| -> Result<ChapterContent, ContentError> {
            Ok(ChapterContent {
                novel_id: novel.to_string(),
                chapter_name: format!("Chapter {chapter}"),
                ..ChapterContent::default()
            })
        };
        let content = source.fetch_chapter("7", "3").unwrap();
        assert_eq!(content.chapter_name, "Chapter 3");
        assert_eq!(content.novel_id, "7");
    }

    #[test]
    fn error_display() {
        let err = ContentError::NotFound {
            novel_id: "7".into(),
            chapter_id: "3".into(),
        };
        assert_eq!(err.to_string(), "chapter 3 of novel 7 not found");
        assert_eq!(
            ContentError::Network("timeout".into()).to_string(),
            "network error: timeout"
        );
    }
}
