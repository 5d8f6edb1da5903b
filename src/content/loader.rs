//! Post loader - reads content files into post records

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{reading_time, FrontMatter, Post};
use crate::Site;

/// File extensions recognized as post sources
const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Reads posts from the site content directory.
///
/// Holds no state between calls; every query re-reads the filesystem.
pub struct PostLoader<'a> {
    site: &'a Site,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load every post under the content directory, newest first.
    ///
    /// A missing content directory yields an empty list. A file that cannot
    /// be read is logged and skipped. Posts sharing a date order by slug.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_post_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts)
    }

    /// Look up a single post by slug.
    ///
    /// Returns `Ok(None)` when no file matches the slug. A read failure on
    /// a file that does exist is propagated, not swallowed.
    pub fn find_post(&self, slug: &str) -> Result<Option<Post>> {
        for ext in POST_EXTENSIONS {
            let path = self.site.content_dir.join(format!("{}.{}", slug, ext));
            if path.exists() {
                return self.load_post(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Parse a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw);

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let date = fm.parse_date().unwrap_or_else(Local::now);
        let title = fm.title.unwrap_or_else(|| slug.clone());
        let author = fm
            .author
            .unwrap_or_else(|| self.site.config.author.clone());

        Ok(Post {
            slug,
            title,
            description: fm.description.unwrap_or_default(),
            date,
            author,
            tags: fm.tags,
            reading_time: reading_time(body),
            content: body.to_string(),
            source: path.to_path_buf(),
        })
    }
}

/// Check if a file is a recognized post source
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| POST_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use std::fs;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> Site {
        Site::new(dir.path()).unwrap()
    }

    fn write_post(dir: &TempDir, name: &str, contents: &str) {
        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_empty_content_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_full_metadata_round_trip() {
        let dir = TempDir::new().unwrap();
        write_post(
            &dir,
            "first-post.mdx",
            "---\ntitle: Hello World\ndescription: A greeting\ndate: 2024-01-01\nauthor: Someone Else\ntags:\n  - a\n  - b\n---\n\nBody text here.\n",
        );

        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.slug, "first-post");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.description, "A greeting");
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert_eq!(post.author, "Someone Else");
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.reading_time, "1 min read");
        assert_eq!(post.content, "Body text here.\n");
    }

    #[test]
    fn test_defaults_for_empty_header() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "untitled-draft.mdx", "---\n---\nJust a body.\n");

        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(post.title, "untitled-draft");
        assert_eq!(post.description, "");
        assert_eq!(post.author, "Apurwa Sarwajit");
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "Just a body.\n");
        // Date defaults to "now" at read time
        let age = Local::now().signed_duration_since(post.date);
        assert!(age.num_seconds().abs() < 5);
    }

    #[test]
    fn test_missing_header_keeps_whole_file() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "note.mdx", "No header at all, just prose.\n");

        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert_eq!(posts[0].title, "note");
        assert_eq!(posts[0].content, "No header at all, just prose.\n");
    }

    #[test]
    fn test_sorted_newest_first_with_slug_tiebreak() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "older.mdx", "---\ndate: 2024-01-01\n---\nold\n");
        write_post(&dir, "beta.mdx", "---\ndate: 2024-03-01\n---\nb\n");
        write_post(&dir, "alpha.mdx", "---\ndate: 2024-03-01\n---\na\n");

        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["alpha", "beta", "older"]);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_hello_world_scenario() {
        let dir = TempDir::new().unwrap();
        let body = vec!["word"; 400].join(" ");
        write_post(
            &dir,
            "hello-world.mdx",
            &format!("---\ntitle: Hello World\ndate: 2024-01-01\ntags:\n  - intro\n---\n\n{}\n", body),
        );

        let site = site(&dir);
        let posts = PostLoader::new(&site).list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].reading_time, "2 min read");
        assert_eq!(posts[0].tags, vec!["intro"]);
    }

    #[test]
    fn test_unreadable_file_skipped_in_listing() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "good.mdx", "---\ntitle: Good\n---\nfine\n");
        // Not valid UTF-8, read_to_string fails
        fs::write(dir.path().join("content/bad.mdx"), [0xff, 0xfe, 0x00]).unwrap();

        let site = site(&dir);
        let loader = PostLoader::new(&site);
        let posts = loader.list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");

        // A direct lookup on the broken file surfaces the error
        assert!(loader.find_post("bad").is_err());
    }

    #[test]
    fn test_find_post_miss_is_none() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        let site = site(&dir);
        assert!(PostLoader::new(&site).find_post("no-such-post").unwrap().is_none());
    }

    #[test]
    fn test_find_post_returns_matching_slug() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "my-post.mdx", "---\ntitle: Mine\n---\nbody\n");
        write_post(&dir, "plain.md", "---\ntitle: Plain\n---\nbody\n");

        let site = site(&dir);
        let loader = PostLoader::new(&site);

        let post = loader.find_post("my-post").unwrap().unwrap();
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.title, "Mine");

        // .md is also a recognized extension
        let plain = loader.find_post("plain").unwrap().unwrap();
        assert_eq!(plain.title, "Plain");
    }

    #[test]
    fn test_other_extensions_ignored() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "notes.txt", "not a post\n");

        let site = site(&dir);
        assert!(PostLoader::new(&site).list_posts().unwrap().is_empty());
    }
}
