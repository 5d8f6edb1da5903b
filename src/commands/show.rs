//! Show a single post

use anyhow::{anyhow, Result};

use crate::content::MarkdownRenderer;
use crate::Site;

/// Print one post by slug, as metadata plus markdown or as rendered HTML
pub fn run(site: &Site, slug: &str, as_html: bool) -> Result<()> {
    let post = site
        .posts()
        .find_post(slug)?
        .ok_or_else(|| anyhow!("no post with slug '{}'", slug))?;

    if as_html {
        let renderer = MarkdownRenderer::with_theme(&site.config.highlight_theme);
        println!("{}", renderer.render(&post.content));
        return Ok(());
    }

    println!("{}", post.title);
    println!(
        "{} · {} · {}",
        post.date.format("%Y-%m-%d"),
        post.author,
        post.reading_time
    );
    if !post.description.is_empty() {
        println!("{}", post.description);
    }
    if !post.tags.is_empty() {
        println!("tags: {}", post.tags.join(", "));
    }
    println!();
    println!("{}", post.content);

    Ok(())
}
