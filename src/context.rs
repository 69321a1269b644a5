use std::path::PathBuf;

use crate::config::Config;

/// Per-invocation settings handed to each command.
#[derive(Debug)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,
}

impl Context {
    pub fn new(posts_dir: PathBuf) -> Self {
        Self { posts_dir }
    }
}

impl From<&Config> for Context {
    fn from(config: &Config) -> Self {
        Self::new(config.posts_dir())
    }
}
