//! Post model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// Assumed reading speed for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL-safe identifier, derived from the source file name
    pub slug: String,

    /// Display title, falls back to the slug
    pub title: String,

    /// Short summary
    pub description: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Post author
    pub author: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Derived "N min read" estimate
    pub reading_time: String,

    /// Markdown body with the front-matter header stripped
    pub content: String,

    /// Full source file path
    pub source: PathBuf,
}

/// Estimate reading time for a body of text.
///
/// Words are whitespace-delimited and the minute count always rounds up,
/// so a one-word post still reads "1 min read".
pub fn reading_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    format!("{} min read", words.div_ceil(WORDS_PER_MINUTE))
}
