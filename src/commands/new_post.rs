use std::{io::Write, path::PathBuf};

use anyhow::Context as _;
use log::{info, warn};

use crate::{
    context::Context,
    metadata::{derive_filename, now_iso, parse_front_matter, scaffold, DEFAULT_TITLE},
    prompt::Prompt,
};

#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Saved(PathBuf),
    Discarded,
}

/// Opens the editor on a fresh post and saves it once the user confirms.
///
/// The edited text is written as-is; front matter is only parsed to pick
/// the filename.
pub(crate) fn new_post(
    ctx: &Context,
    prompt: &mut impl Prompt,
    title: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let title = match title {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TITLE,
    };
    let post_content = prompt.edit("Create a new post", &scaffold(title, &now_iso()), ".md")?;

    let (front, _) = parse_front_matter(&post_content)?;
    let actual_title = front.title_or_default();
    let actual_date = match front.date.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => now_iso(),
    };

    if !prompt.confirm(&format!("Save post \"{actual_title}\"?"), true)? {
        writeln!(out, "Post discarded.")?;
        return Ok(Outcome::Discarded);
    }

    let file_path = ctx
        .posts_dir
        .join(derive_filename(Some(actual_title), Some(&actual_date)));
    // TODO: ask before overwriting, or add a numeric suffix to the filename
    if file_path.exists() {
        warn!("Overwriting existing post {file_path:?}");
    }
    std::fs::write(&file_path, &post_content)
        .with_context(|| format!("while writing {file_path:?}"))?;
    info!("Wrote {} bytes to {file_path:?}", post_content.len());

    writeln!(out, "The post has been saved! as {}", file_path.display())?;
    Ok(Outcome::Saved(file_path))
}
