use std::io::Write;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::{
    context::Context,
    metadata::{sort_posts, Post},
    time_ago::time_ago,
};

fn collect_posts(ctx: &Context) -> anyhow::Result<Vec<Post>> {
    let mut posts = vec![];
    let entries = std::fs::read_dir(&ctx.posts_dir)
        .with_context(|| format!("while reading posts directory {:?}", ctx.posts_dir))?;
    // every entry is a post; a sub-directory fails to read and aborts the listing
    for entry in entries {
        let path = entry
            .with_context(|| format!("while reading an entry of {:?}", ctx.posts_dir))?
            .path();
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("while reading {path:?}"))?;
        let post =
            Post::parse(path.clone(), &content).with_context(|| format!("while parsing {path:?}"))?;
        debug!("Read {:?} ({} bytes of body)", post.path, post.content.len());
        posts.push(post);
    }
    Ok(posts)
}

fn render_line(post: &Post, now: &DateTime<Utc>) -> String {
    let mut line = format!(
        "{}  {}  ({})",
        post.date,
        post.title,
        time_ago(&post.date.0, now)
    );
    if post.draft {
        line.push_str("  [draft]");
    }
    line
}

/// Prints every post, newest first. Drafts only show with `include_drafts`.
///
/// Returns the posts in the order they were printed.
pub(crate) fn list_posts(
    ctx: &Context,
    include_drafts: bool,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<Vec<Post>> {
    let mut posts: Vec<Post> = collect_posts(ctx)?
        .into_iter()
        .filter(|p| include_drafts || !p.draft)
        .collect();
    sort_posts(&mut posts);
    info!("Listing {} post(s) from {:?}", posts.len(), ctx.posts_dir);

    if posts.is_empty() {
        writeln!(out, "No posts found.")?;
    }
    for post in posts.iter() {
        writeln!(out, "{}", render_line(post, &now))?;
    }
    Ok(posts)
}
