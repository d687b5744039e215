//! CLI commands using clap

use crate::application::dto::ServiceOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// b64forge - Base64 File Converter
///
/// Encodes files to base64 with a bounded preview, and decodes base64 text
/// back into files named after their detected type.
#[derive(Parser, Debug)]
#[command(name = "b64forge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert files to and from base64", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory for temporary artifacts (defaults to the system temp dir)
    #[arg(long, global = true)]
    pub temp_dir: Option<PathBuf>,

    /// Characters of base64 shown in previews
    #[arg(long, global = true, default_value = "100")]
    pub preview_length: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Encode a file to base64
    Encode {
        /// File to encode
        file: PathBuf,

        /// Produce the complete text instead of a preview
        #[arg(long)]
        full: bool,

        /// Write the complete text to this file (implies --full)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a base64 text file
    Decode {
        /// File containing base64 text
        file: PathBuf,

        /// Save the decoded file here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode base64 text read from standard input
    Paste {
        /// Save the decoded file here
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Detect the type of a file from its content
    Detect {
        /// File to inspect
        file: PathBuf,
    },

    /// Check whether a file looks like base64
    Validate {
        /// File containing base64 text
        file: PathBuf,
    },

    /// List known file signatures
    Signatures,
}

impl Cli {
    /// Maximum log level selected by the flags
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Service options with the command-line overrides applied
    pub fn service_options(&self) -> ServiceOptions {
        let options = ServiceOptions::default().with_preview_length(self.preview_length);
        match &self.temp_dir {
            Some(dir) => options.with_temp_dir(dir.clone()),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encode_full() {
        let cli = Cli::try_parse_from(["b64forge", "encode", "photo.png", "--full"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Encode {
                file: PathBuf::from("photo.png"),
                full: true,
                output: None,
                json: false,
            }
        );
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "b64forge",
            "decode",
            "in.b64",
            "-o",
            "out.bin",
            "-v",
            "--temp-dir",
            "/var/tmp",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), Level::INFO);
        let options = cli.service_options();
        assert_eq!(options.temp_dir, PathBuf::from("/var/tmp"));
        assert_eq!(options.preview_length, 100);
    }

    #[test]
    fn test_debug_wins_over_verbose() {
        let cli = Cli::try_parse_from(["b64forge", "-v", "-d", "signatures"]).unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_missing_file_argument_is_rejected() {
        assert!(Cli::try_parse_from(["b64forge", "detect"]).is_err());
    }
}
