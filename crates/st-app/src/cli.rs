use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "st-app", version, about = "Translate text through SimplyTranslate")]
pub struct Cli {
    /// JSON config file, environment defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate once and print the result
    Translate {
        /// Source language code ("auto" to detect)
        #[arg(long)]
        from: Option<String>,
        /// Target language code
        #[arg(long)]
        to: Option<String>,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Main screen: read text and commands from stdin
    Interactive,
    /// Overlay for text shared by another app
    Share {
        /// Directly shared text
        #[arg(long)]
        text: Option<String>,
        /// Selected text sent through "process text"
        #[arg(long)]
        process_text: Option<String>,
    },
    /// List supported languages
    Languages {
        /// Only languages valid as a target
        #[arg(long)]
        target: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_collects_trailing_words() {
        let cli = Cli::parse_from(["st-app", "translate", "--to", "ja", "good", "morning"]);

        match cli.command {
            Command::Translate { from, to, text } => {
                assert!(from.is_none());
                assert_eq!(to.as_deref(), Some("ja"));
                assert_eq!(text, vec!["good", "morning"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["st-app", "share", "--text", "Hello", "--log-json"]);

        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Share { text: Some(_), process_text: None }));
    }
}
