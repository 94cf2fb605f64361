use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Resolve track URLs into download links and keep a local download history.
#[derive(Debug, Parser)]
#[command(name = "trackgrab", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Credential for the resolution service.
    #[arg(long, env = "TRACKGRAB_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Override the resolution endpoint URL.
    #[arg(long, env = "TRACKGRAB_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Override the host header sent to the resolution service.
    #[arg(long, env = "TRACKGRAB_API_HOST", global = true)]
    pub api_host: Option<String>,

    /// Directory holding the download history.
    #[arg(long, env = "TRACKGRAB_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds, at least 1 (transport default when unset).
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve one track URL and start its download.
    Download {
        /// Track URL to resolve.
        #[arg(conflicts_with = "paste")]
        url: Option<String>,

        /// Take the URL from the clipboard.
        #[arg(long)]
        paste: bool,

        /// Print the download link instead of opening it.
        #[arg(long)]
        no_open: bool,
    },

    /// Print past downloads, oldest first.
    History,

    /// Interactive session: every line is a submission.
    Session {
        /// Print download links instead of opening them.
        #[arg(long)]
        no_open: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn download_accepts_url_and_flags() {
        let cli = Cli::try_parse_from([
            "trackgrab",
            "download",
            "https://open.spotify.com/track/abc",
            "--no-open",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Download { url, paste, no_open }) => {
                assert_eq!(url.as_deref(), Some("https://open.spotify.com/track/abc"));
                assert!(!paste);
                assert!(no_open);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn url_and_paste_conflict() {
        let result = Cli::try_parse_from(["trackgrab", "download", "https://x", "--paste"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["trackgrab", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["trackgrab", "--timeout", "0", "history"]);
        assert!(result.is_err());
    }

    #[test]
    fn positive_timeout_is_parsed() {
        let cli = Cli::try_parse_from(["trackgrab", "history", "--timeout", "5"]).unwrap();
        assert_eq!(cli.global.timeout, Some(5));
    }
}
