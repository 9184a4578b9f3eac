use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    app::{get_config_dir, init_settings, Settings},
    cipher::{encrypt, is_placeholder, CipherAdapter, CryptoJsAes},
    constants::SETTINGS_FILE_NAME,
    content::{self, AppConfig},
    router::{resolve, ROUTES},
};

use super::Commands;

/// Handle CLI subcommands. `Ok(false)` means: continue to the terminal.
pub async fn handle_command(command: &Commands, settings: &Settings) -> Result<bool> {
    match command {
        Commands::Init { content } => {
            run_init(content)?;
            Ok(true)
        }
        Commands::Encrypt {
            passphrase,
            input,
            text,
        } => {
            let plaintext = match (input, text) {
                (Some(path), _) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(text)) => text.replace("\\n", "\n"),
                (None, None) => anyhow::bail!("Nothing to encrypt: pass TEXT or --input FILE"),
            };
            println!("{}", run_encrypt(&plaintext, passphrase)?);
            Ok(true)
        }
        Commands::Check { passphrase } => {
            run_check(settings, passphrase.as_deref()).await?;
            Ok(true)
        }
        Commands::Routes => {
            list_routes();
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Browse => Ok(false),
    }
}

fn run_init(content_path: &Path) -> Result<()> {
    println!("Initializing NOIR_NET...");
    let report = init_settings(content_path)?;

    match report.settings_file {
        Some(path) => println!("  {} Settings: {}", "[OK]".green(), path.display()),
        None => println!(
            "  {} Settings: {} already exists",
            "[SKIP]".yellow(),
            get_config_dir()?.join(SETTINGS_FILE_NAME).display()
        ),
    }
    match report.content_file {
        Some(path) => println!("  {} Content: {}", "[OK]".green(), path.display()),
        None => println!(
            "  {} Content: {} already exists",
            "[SKIP]".yellow(),
            content_path.display()
        ),
    }
    Ok(())
}

/// Produce an `encrypted_contacts` value the terminal can decrypt
pub fn run_encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    if passphrase.is_empty() {
        anyhow::bail!("Passphrase must not be empty");
    }
    if plaintext.trim().is_empty() {
        anyhow::bail!("Plaintext must contain at least one contact line");
    }
    Ok(encrypt(plaintext, passphrase))
}

async fn run_check(settings: &Settings, passphrase: Option<&str>) -> Result<()> {
    let source = content::source_from_spec(
        &settings.content.source,
        Duration::from_secs(settings.content.timeout_secs),
    )?;
    println!("Checking {}", source.describe().cyan());

    let config = match content::load(source.as_ref()).await {
        Ok(config) => config,
        Err(e) => {
            println!("  {} {}", "[ERROR]".red(), e.reason());
            return Err(e.into());
        }
    };

    for line in check_report(&config, passphrase) {
        println!("{}", line);
    }
    Ok(())
}

/// Human-readable findings about a loaded document. Never includes decrypted text.
pub fn check_report(config: &AppConfig, passphrase: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    let alias = config.profile.alias().unwrap_or("(missing, shows UNKNOWN)");
    lines.push(format!("  {} Alias: {}", "[OK]".green(), alias));
    lines.push(format!(
        "  {} Case files: {}",
        "[OK]".green(),
        config.projects.len()
    ));

    for project in config.projects.iter().filter(|p| p.link.trim().is_empty()) {
        lines.push(format!(
            "  {} {} has no source link",
            "[WARNING]".yellow(),
            project.name
        ));
    }

    match config.encrypted_contacts.as_deref() {
        None | Some("") => lines.push(format!(
            "  {} Contacts: no encrypted data",
            "[WARNING]".yellow()
        )),
        Some(ciphertext) if is_placeholder(ciphertext) => lines.push(format!(
            "  {} Contacts: placeholder, run `noir encrypt`",
            "[WARNING]".yellow()
        )),
        Some(_) => lines.push(format!("  {} Contacts: encrypted", "[OK]".green())),
    }

    if let Some(passphrase) = passphrase {
        let adapter = CipherAdapter::new(Arc::new(CryptoJsAes));
        match adapter.decrypt(config.encrypted_contacts.as_deref(), passphrase) {
            Ok(plaintext) => {
                let count = plaintext.lines().filter(|l| !l.trim().is_empty()).count();
                lines.push(format!(
                    "  {} Passphrase opens {} contact line(s)",
                    "[OK]".green(),
                    count
                ));
            }
            Err(e) => lines.push(format!("  {} {}", "[ERROR]".red(), e)),
        }
    }

    lines
}

/// List the route table
pub fn list_routes() {
    println!("Routes:");
    for (idx, route) in ROUTES.iter().enumerate() {
        let gate = if route.mounts_gate { " (contact gate)" } else { "" };
        println!(
            "  {} {:<10} {}{}",
            (idx + 1).to_string().dimmed(),
            route.path.green(),
            route.label,
            gate.dimmed()
        );
    }
    println!(
        "  Anything else resolves to {}",
        resolve(&ROUTES, "/anything").path.green()
    );
}

/// Show version information
pub fn show_version() {
    println!("noir v{}", env!("CARGO_PKG_VERSION"));
    println!("   NOIR_NET terminal portfolio");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{CipherAdapter, CryptoJsAes};
    use crate::content::{Profile, Project};

    fn joined(lines: &[String]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_encrypt_output_opens_with_passphrase() {
        let ciphertext = run_encrypt("EMAIL: a@b.c\nTG: @x", "pw").unwrap();
        assert!(ciphertext.starts_with("U2FsdGVkX1"));

        let adapter = CipherAdapter::new(Arc::new(CryptoJsAes));
        assert_eq!(
            adapter.decrypt(Some(&ciphertext), "pw").unwrap(),
            "EMAIL: a@b.c\nTG: @x"
        );
    }

    #[test]
    fn test_encrypt_rejects_empty_input() {
        assert!(run_encrypt("x", "").is_err());
        assert!(run_encrypt("  \n", "pw").is_err());
    }

    #[test]
    fn test_check_report() {
        let config = AppConfig {
            profile: Profile {
                pseudo: Some("GHOST".to_string()),
                ..Default::default()
            },
            projects: vec![Project {
                name: "relay".to_string(),
                description: "d".to_string(),
                tags: vec![],
                link: String::new(),
            }],
            encrypted_contacts: Some(encrypt("EMAIL: a@b.c\n\nTG: @x\n", "pw")),
        };

        let report = joined(&check_report(&config, Some("pw")));
        assert!(report.contains("Alias: GHOST"));
        assert!(report.contains("Case files: 1"));
        assert!(report.contains("relay has no source link"));
        assert!(report.contains("Contacts: encrypted"));
        assert!(report.contains("opens 2 contact line(s)"));
        assert!(!report.contains("a@b.c"));

        let report = joined(&check_report(&config, Some("nope")));
        assert!(report.contains("Access Denied: Invalid Token."));
    }

    #[test]
    fn test_check_report_placeholder() {
        let config = AppConfig::sample();
        let report = joined(&check_report(&config, None));
        assert!(report.contains("placeholder"));
    }
}
