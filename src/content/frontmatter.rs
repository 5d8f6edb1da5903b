//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Accepts either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Front-matter data from a post file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "one_or_many", default)]
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a document.
    /// Returns (front_matter, remaining_body).
    ///
    /// A document with no recognizable header, an unterminated fence, or a
    /// header that fails to deserialize yields the default front-matter with
    /// the whole document as body. Defaulting is per-field, never fatal.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        // YAML front-matter (---)
        if let Some(rest) = content.strip_prefix("---") {
            return Self::parse_yaml(content, rest);
        }

        // JSON front-matter ({"key": ...})
        if content.starts_with('{') {
            return Self::parse_json(content);
        }

        (FrontMatter::default(), content)
    }

    fn parse_yaml<'c>(original: &'c str, rest: &'c str) -> (Self, &'c str) {
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end) = rest.find("\n---") else {
            // No closing fence, the whole document is body
            return (FrontMatter::default(), original);
        };

        let header = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        if header.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        // A fenced block without key: value lines is a pair of markdown
        // horizontal rules, not metadata
        if !looks_like_mapping(header) {
            return (FrontMatter::default(), original);
        }

        match serde_yaml::from_str::<FrontMatter>(header) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), original)
            }
        }
    }

    fn parse_json(content: &str) -> (Self, &str) {
        // Find the matching closing brace
        let mut depth = 0usize;
        let mut end = 0usize;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end == 0 {
            return (FrontMatter::default(), content);
        }

        match serde_json::from_str::<FrontMatter>(&content[..end]) {
            Ok(fm) => (fm, content[end..].trim_start_matches(['\n', '\r'])),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse JSON front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// At least one line shaped like `key: value`, with a plain identifier key.
/// Colons inside URLs (`https://...`) do not qualify.
fn looks_like_mapping(block: &str) -> bool {
    block.lines().any(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return false;
        }
        match line.split_once(':') {
            Some((key, value)) => {
                !key.is_empty()
                    && key
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    && (value.is_empty() || value.starts_with(' '))
            }
            None => false,
        }
    })
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&d.and_hms_opt(0, 0, 0)?).earliest();
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
