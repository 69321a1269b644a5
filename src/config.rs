use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use log::debug;
use serde::Deserialize;

pub(crate) const CONFIG_FILE_NAME: &str = ".jgbrc.json";
pub(crate) const CONFIG_ENV: &str = "JGBRC";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Config {
    /// Root directory of the blog.
    pub path: PathBuf,
}

impl Config {
    /// Loads `$JGBRC`, falling back to `~/.jgbrc.json`.
    pub fn load() -> anyhow::Result<Self> {
        let config_file_path = match std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not find home directory"))?
                .join(CONFIG_FILE_NAME),
        };
        Self::load_from(&config_file_path)
    }

    pub fn load_from(config_file_path: &Path) -> anyhow::Result<Self> {
        debug!("Reading config from {config_file_path:?}");
        let fd = File::open(config_file_path)
            .with_context(|| format!("while opening config {config_file_path:?}"))?;
        let reader = BufReader::new(fd);
        serde_json::from_reader(reader)
            .with_context(|| format!("while parsing config {config_file_path:?}"))
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.path.join("build").join("posts")
    }
}
