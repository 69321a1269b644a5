use anyhow::bail;
use chrono::Utc;
use clap::{command, Arg, ArgAction, Command};
use commands::{list_posts, new_post, Outcome};
use config::Config;
use context::Context;
use log::info;
use prompt::TerminalPrompt;

mod commands;
mod config;
mod context;
mod metadata;
mod prompt;
mod time_ago;

fn cli() -> Command {
    command!()
        .about("Blog authoring helper")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("post")
                .about("Create and list posts")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("new").about("create new post").arg(
                        Arg::new("title")
                            .short('t')
                            .long("title")
                            .help("Optional title of your new post")
                            .default_value("new post"),
                    ),
                )
                .subcommand(
                    Command::new("list").about("list all posts").arg(
                        Arg::new("all")
                            .short('a')
                            .long("all")
                            .help("include drafts")
                            .action(ArgAction::SetTrue),
                    ),
                ),
        )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let Some(("post", post)) = matches.subcommand() else {
        bail!("unknown command");
    };

    let config = Config::load()?;
    let ctx = Context::from(&config);
    let mut stdout = std::io::stdout();

    match post.subcommand() {
        Some(("new", args)) => {
            let title = args.get_one::<String>("title").map(String::as_str);
            match new_post(&ctx, &mut TerminalPrompt, title, &mut stdout)? {
                Outcome::Saved(path) => info!("Saved post to {path:?}"),
                Outcome::Discarded => info!("Nothing written"),
            }
        }
        Some(("list", args)) => {
            list_posts(&ctx, args.get_flag("all"), Utc::now(), &mut stdout)?;
        }
        _ => bail!("unknown post subcommand"),
    }

    Ok(())
}
