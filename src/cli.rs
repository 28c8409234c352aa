use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "YouTube transcript summarizer",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/ytsum/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address (overrides HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// Summarize a single video and print the result
    Summarize {
        /// YouTube video URL
        url: String,

        /// Language to write the summary in
        #[arg(short, long, default_value = "English")]
        lang: String,

        /// Output format: text (default), json
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["ytsum"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["ytsum", "serve", "--port", "8080", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Command::Serve { port: Some(8080), host: None })));
    }

    #[test]
    fn test_summarize_args() {
        let cli = Cli::try_parse_from(["ytsum", "summarize", "https://youtu.be/abc", "-l", "Spanish", "-f", "json"]).unwrap();
        match cli.command {
            Some(Command::Summarize { url, lang, format, output }) => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(lang, "Spanish");
                assert_eq!(format, OutputFormat::Json);
                assert!(output.is_none());
            }
            _ => panic!("expected summarize subcommand"),
        }
    }
}
