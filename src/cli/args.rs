use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "noir")]
#[command(version)]
#[command(about = "NOIR_NET: a terminal portfolio with an encrypted contact channel", long_about = None)]
pub struct Cli {
    /// Content document: file path or http(s) URL (overrides content.source)
    #[arg(long, value_name = "SRC")]
    pub content: Option<String>,

    /// Path to a settings file (replaces the global and local files)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Location to open first
    #[arg(long, default_value = "/")]
    pub path: String,

    /// Start without the decryption primitive
    #[arg(long)]
    pub no_cipher: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log file used while the terminal is open (defaults to the config dir)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write default settings and a sample content document
    Init {
        /// Where to write the sample content document
        #[arg(default_value = crate::constants::DEFAULT_CONTENT_SOURCE)]
        content: PathBuf,
    },
    /// Encrypt contact lines for the encrypted_contacts field
    Encrypt {
        /// Passphrase visitors will type
        #[arg(short, long, env = "NOIR_PASSPHRASE", hide_env_values = true)]
        passphrase: String,
        /// Read the plaintext from a file instead of the argument
        #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
        input: Option<PathBuf>,
        /// Plaintext, one contact per line
        text: Option<String>,
    },
    /// Load the content document and report what the terminal will show
    Check {
        /// Also try this passphrase against the encrypted contacts
        #[arg(short, long, env = "NOIR_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
    },
    /// List navigable routes
    Routes,
    /// Open the terminal (default)
    Browse,
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["noir"]).unwrap();
        assert_eq!(cli.path, "/");
        assert!(!cli.no_cipher);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "noir",
            "--content",
            "https://example.com/config.json",
            "--path",
            "/profile",
            "--no-cipher",
            "-v",
            "encrypt",
            "-p",
            "pw",
            "EMAIL: a@b.c",
        ])
        .unwrap();

        assert_eq!(cli.content.as_deref(), Some("https://example.com/config.json"));
        assert_eq!(cli.path, "/profile");
        assert!(cli.no_cipher && cli.verbose);
        match cli.command {
            Some(Commands::Encrypt {
                passphrase,
                input,
                text,
            }) => {
                assert_eq!(passphrase, "pw");
                assert!(input.is_none());
                assert_eq!(text.as_deref(), Some("EMAIL: a@b.c"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_encrypt_input_conflicts_with_text() {
        let res = Cli::try_parse_from(["noir", "encrypt", "-p", "pw", "-i", "c.txt", "inline"]);
        assert!(res.is_err());
    }
}
