use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "photo-analyze",
    version,
    about = "Send an image to a remote classifier and show the verdict"
)]
pub struct Args {
    /// Optional TOML file with `endpoint`, `timeout_ms`, `log_level`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Classifier base URL.
    #[arg(long, env = "PHOTO_ANALYZE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,
    /// Client-side deadline for one request.
    #[arg(long, env = "PHOTO_ANALYZE_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Analyze one image and print the result.
    Analyze {
        image: PathBuf,
        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Interactive session: select, analyze, close.
    Shell,
    /// Check that the classifier is up.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_global_flags() {
        let args = Args::try_parse_from([
            "photo-analyze",
            "analyze",
            "dog.jpg",
            "--endpoint",
            "http://127.0.0.1:9000",
            "--timeout-ms",
            "500",
            "--json",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Analyze {
                image: PathBuf::from("dog.jpg"),
                json: true
            }
        );
        assert_eq!(args.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(args.timeout_ms, Some(500));
    }

    #[test]
    fn analyze_requires_image() {
        assert!(Args::try_parse_from(["photo-analyze", "analyze"]).is_err());
    }

    #[test]
    fn shell_and_ping_take_no_arguments() {
        let args = Args::try_parse_from(["photo-analyze", "--debug", "shell"]).unwrap();
        assert_eq!(args.command, Command::Shell);
        assert!(args.debug);
        let args = Args::try_parse_from(["photo-analyze", "ping"]).unwrap();
        assert_eq!(args.command, Command::Ping);
    }
}
