use std::{
    ffi::OsString,
    io::{BufRead, Write},
    path::Path,
    process::Command,
};

use anyhow::{bail, Context};
use log::debug;

/// Interactive collaborators used while creating a post.
pub(crate) trait Prompt {
    /// Lets the user edit `default` and returns the edited text.
    fn edit(&mut self, message: &str, default: &str, extension: &str) -> anyhow::Result<String>;

    /// Asks a yes/no question. An empty answer means `default`.
    fn confirm(&mut self, message: &str, default: bool) -> anyhow::Result<bool>;
}

/// Uses `$VISUAL`/`$EDITOR` for editing and stdin for answers.
pub(crate) struct TerminalPrompt;

/// First of `visual`, `editor` holding more than whitespace, else `vi`.
fn pick_editor(visual: Option<OsString>, editor: Option<OsString>) -> String {
    [visual, editor]
        .into_iter()
        .flatten()
        .map(|v| v.to_string_lossy().trim().to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Splits an editor setting into program and arguments.
///
/// A value naming an existing file is taken whole, so paths with spaces
/// work unquoted. Otherwise words split on whitespace, and single or
/// double quotes group words, e.g. `"/opt/My Editor/ed" --wait`.
fn editor_argv(value: &str) -> Vec<String> {
    if Path::new(value).is_file() {
        return vec![value.to_string()];
    }
    let mut argv = vec![];
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;
    for c in value.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    argv.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        argv.push(word);
    }
    argv
}

/// Interprets one line typed at a yes/no prompt.
fn parse_answer(line: &str, default: bool) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl Prompt for TerminalPrompt {
    fn edit(&mut self, message: &str, default: &str, extension: &str) -> anyhow::Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("jgw-")
            .suffix(extension)
            .tempfile()
            .context("while creating a temporary file for the editor")?;
        file.write_all(default.as_bytes())?;
        file.flush()?;

        println!("? {message}");
        let editor = pick_editor(std::env::var_os("VISUAL"), std::env::var_os("EDITOR"));
        debug!("Launching {editor:?} on {:?}", file.path());
        let argv = editor_argv(&editor);
        let Some((program, args)) = argv.split_first() else {
            bail!("editor setting {editor:?} names no program");
        };
        let status = Command::new(program)
            .args(args)
            .arg(file.path())
            .status()
            .with_context(|| format!("while launching editor {program:?}"))?;
        if !status.success() {
            bail!("editor {program:?} exited with {status}");
        }

        std::fs::read_to_string(file.path()).context("while reading back the edited post")
    }

    fn confirm(&mut self, message: &str, default: bool) -> anyhow::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            write!(stdout, "? {message} ({hint}) ")?;
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(default);
            }
            if let Some(answer) = parse_answer(&line, default) {
                return Ok(answer);
            }
            writeln!(stdout, "Please answer y or n.")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers() {
        assert_eq!(parse_answer("\n", true), Some(true));
        assert_eq!(parse_answer("", false), Some(false));
        assert_eq!(parse_answer("Y\n", false), Some(true));
        assert_eq!(parse_answer(" yes ", false), Some(true));
        assert_eq!(parse_answer("NO", true), Some(false));
        assert_eq!(parse_answer("maybe", true), None);
    }

    #[test]
    fn blank_editor_settings_fall_through() {
        let os = |s: &str| Some(OsString::from(s));
        assert_eq!(pick_editor(os("nvim"), os("nano")), "nvim");
        assert_eq!(pick_editor(os("   "), os("nano")), "nano");
        assert_eq!(pick_editor(None, os("\t")), "vi");
        assert_eq!(pick_editor(None, None), "vi");
    }

    #[test]
    fn editor_arguments_split_on_whitespace_and_quotes() {
        assert_eq!(editor_argv("code --wait"), ["code", "--wait"]);
        assert_eq!(editor_argv("  vim   -n "), ["vim", "-n"]);
        assert_eq!(
            editor_argv("\"/opt/My Editor/ed\" --wait"),
            ["/opt/My Editor/ed", "--wait"]
        );
        assert_eq!(editor_argv("'/opt/a b/ed'"), ["/opt/a b/ed"]);
        assert_eq!(editor_argv("ed ''"), ["ed", ""]);
    }

    #[test]
    fn existing_editor_path_with_spaces_is_kept_whole() {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("My Editor");
        std::fs::write(&program, "").unwrap();
        let value = program.to_string_lossy().to_string();

        assert_eq!(editor_argv(&value), [value.clone()]);
    }
}
