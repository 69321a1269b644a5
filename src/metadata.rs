use std::{fmt, path::PathBuf, str::FromStr, sync::OnceLock};

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

pub(crate) const DEFAULT_TITLE: &str = "untitled";

/// Header block of a post. Every key may be missing.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub(crate) struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
}

impl FrontMatter {
    pub fn title_or_default(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TITLE,
        }
    }
}

/// Date of a post, normalized to UTC so posts can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct PostDate(pub DateTime<Utc>);

impl FromStr for PostDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        // YAML timestamps without an offset are read as UTC
        for format in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(dt.and_utc()));
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date format: {s:?}"))?;
        Ok(Self(date.and_time(chrono::NaiveTime::MIN).and_utc()))
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub title: String,
    pub date: PostDate,
    pub draft: bool,
    pub content: String,
    pub path: PathBuf,
}

impl Post {
    pub fn parse(path: PathBuf, text: &str) -> anyhow::Result<Self> {
        let (front, content) = parse_front_matter(text)?;
        let Some(date) = front.date.as_deref() else {
            bail!("post has no date in its front matter");
        };
        Ok(Self {
            title: front.title_or_default().to_string(),
            date: date.parse()?,
            draft: front.draft.unwrap_or(false),
            content: content.to_string(),
            path,
        })
    }
}

fn front_matter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        RegexBuilder::new(r"\A---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)(.*)")
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .unwrap()
    })
}

/// Splits `text` into its front matter and the Markdown body after it.
///
/// Text that does not open with a `---` line has no front matter at all.
pub(crate) fn parse_front_matter(text: &str) -> anyhow::Result<(FrontMatter, &str)> {
    if text.lines().next().map(str::trim_end) != Some("---") {
        return Ok((FrontMatter::default(), text));
    }
    let Some(caps) = front_matter_pattern().captures(text) else {
        bail!("unterminated front matter, needs a closing `---`");
    };
    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let front = if header.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_norway::from_str(header).context("invalid front matter")?
    };
    Ok((front, body))
}

/// Lower-cased, hyphenated title for use in filenames.
///
/// Symbols are stripped before whitespace collapses, so a title ending in
/// ` !?` keeps a trailing hyphen.
pub(crate) fn slugify(title: &str) -> String {
    static SPECIAL: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let special = SPECIAL.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());
    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").unwrap());

    let stripped = special.replace_all(title, "");
    spaces.replace_all(&stripped, "-").to_lowercase()
}

pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn derive_filename(title: Option<&str>, date: Option<&str>) -> String {
    let title = match title {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TITLE,
    };
    let date = match date {
        Some(d) => d.to_string(),
        None => now_iso(),
    };
    let day = date.split(['T', ' ']).next().unwrap_or_default();
    format!("{}_{}.md", day, slugify(title))
}

/// Initial editor contents for a new post.
pub(crate) fn scaffold(title: &str, date: &str) -> String {
    format!(
        "---\ntitle: '{}'\ndate: '{}'\ndraft: true\n---",
        title.replace('\'', "''"),
        date.replace('\'', "''"),
    )
}

// newest first. stable, so equal dates keep directory order.
pub(crate) fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
