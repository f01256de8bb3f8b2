use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::INITIAL_SHOW_COUNT;

#[derive(Debug, Parser)]
#[command(
    name = "creator-feed",
    version,
    about = "creator-feed - A creator's videos, about page and links from the terminal.",
    long_about = None
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/creator-feed/config.yaml)
    #[arg(long, global = true, env = "CREATOR_FEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the live feed and show the saved fallback videos
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Latest video plus the most recent uploads
    Home(HomeCommand),
    /// All fetched videos, optionally filtered
    Videos(VideosCommand),
    /// About the creator
    About,
    /// Contact details
    Contact,
    /// Social links
    Socials,
}

#[derive(Debug, Args)]
pub struct HomeCommand {
    /// How many videos to list, counting the featured one
    #[arg(long, default_value_t = INITIAL_SHOW_COUNT)]
    pub count: usize,
    /// Print the video list as JSON
    #[arg(long)]
    pub json: bool,
    /// Open the latest video in the browser
    #[arg(long)]
    pub open: bool,
}

impl Default for HomeCommand {
    fn default() -> Self {
        Self {
            count: INITIAL_SHOW_COUNT,
            json: false,
            open: false,
        }
    }
}

#[derive(Debug, Args)]
pub struct VideosCommand {
    /// Case-insensitive filter on title or video id
    #[arg(long, short)]
    pub search: Option<String>,
    /// Print the matching videos as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_videos_search() {
        let cli = Cli::parse_from(["creator-feed", "--offline", "videos", "-s", "vlog", "--json"]);
        assert!(cli.offline);
        match cli.command {
            Some(Command::Videos(cmd)) => {
                assert_eq!(cmd.search.as_deref(), Some("vlog"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn home_count_defaults_to_initial_page() {
        let cli = Cli::parse_from(["creator-feed", "home"]);
        match cli.command {
            Some(Command::Home(cmd)) => assert_eq!(cmd.count, INITIAL_SHOW_COUNT),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
