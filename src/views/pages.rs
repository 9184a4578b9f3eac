use crate::constants::{REDACTED_CONTACTS, SKILL_NAME_WIDTH, UNKNOWN_ALIAS};
use crate::content::AppConfig;

use super::markup::{code_block, escape_inline, escape_link};

/// Capability/status pairs shown on the vitals page. Deliberately static.
pub const SKILLS: &[(&str, &str)] = &[
    ("Linux Kernel", "[ROOT_ACCESS]"),
    ("Docker/OCI", "[DEPLOYED]"),
    ("Kubernetes", "[ORCHESTRATED]"),
    ("Network L2-L7", "[SECURE]"),
    ("Python / Bash", "[OPTIMIZED]"),
];

/// What the contact zone currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactZone<'a> {
    /// Redacted line plus the reveal trigger
    Locked,
    /// Masked key entry; `working` while an attempt is in flight
    Entry {
        masked_len: usize,
        focused: bool,
        working: bool,
    },
    /// Decrypted lines, blank ones already dropped
    Revealed(&'a [String]),
}

fn alias(config: &AppConfig) -> String {
    escape_inline(config.profile.alias().unwrap_or(UNKNOWN_ALIAS))
}

/// Landing page
pub fn home(config: &AppConfig) -> String {
    format!(
        "# // NOTIFICATION\n\n\
         FROM: {}\n\n\
         SUBJECT: WELCOME\n\n\
         ────────────────────────────────\n\n\
         Welcome to the secure terminal.\n\n\
         Use the menu on the left to navigate system files.\n\n\
         ▌\n",
        alias(config)
    )
}

/// Case files: one list item per project, in order
pub fn projects(config: &AppConfig) -> String {
    if config.projects.is_empty() {
        return "# // EMPTY\n\nProject archive not found.\n".to_string();
    }

    let mut out = String::from("# // CASE_FILES\n\n");
    for project in &config.projects {
        let tags = project
            .unique_tags()
            .iter()
            .map(|tag| escape_inline(tag))
            .collect::<Vec<_>>()
            .join(", ");

        out.push_str(&format!("- **{}** \\[{}\\]\\\n", escape_inline(&project.name), tags));
        out.push_str(&format!("  ↳ {}\\\n", escape_inline(&project.description)));
        if project.link.trim().is_empty() {
            out.push_str("  \\[NO_SOURCE\\]\n");
        } else {
            out.push_str(&format!("  [SOURCE_CODE]({})\n", escape_link(&project.link)));
        }
    }
    out
}

/// System vitals, padded like a diagnostics dump
pub fn skills(_config: &AppConfig) -> String {
    let mut out = String::from("# // SYSTEM_VITALS\n\nRUNNING DIAGNOSTICS...\n\n");
    for (name, status) in SKILLS {
        let padded = format!("{:.<width$}", name, width = SKILL_NAME_WIDTH);
        out.push_str(&format!("- `{} {}`\n", padded, status));
    }
    out.push_str("\n> ALL SYSTEMS OPERATIONAL\n");
    out
}

/// Profile fields without the contact zone
pub fn profile_fields(config: &AppConfig) -> String {
    let role = escape_inline(config.profile.role.as_deref().unwrap_or(UNKNOWN_ALIAS));
    let mut out = format!(
        "# // PROFILE\n\n**SUBJECT:** {}\n\n**ALIAS:** {}\n\n",
        role,
        alias(config)
    );

    if let Some(avatar) = config.profile.ascii_avatar.as_deref() {
        if !avatar.trim().is_empty() {
            out.push_str(&code_block(avatar));
            out.push('\n');
        }
    }

    out.push_str("────────────────────────────────\n\n### ENCRYPTED CHANNEL:\n\n");
    out
}

/// Profile page as first rendered: the contact zone is always locked here
pub fn profile(config: &AppConfig) -> String {
    format!("{}{}", profile_fields(config), contact_zone(ContactZone::Locked))
}

/// Markup for the contact zone in any gate phase
pub fn contact_zone(zone: ContactZone<'_>) -> String {
    match zone {
        ContactZone::Locked => format!(
            "~~{}~~\n\n**\\[DECRYPT DATA\\]** press `d`\n",
            REDACTED_CONTACTS
        ),
        ContactZone::Entry {
            masked_len,
            focused,
            working,
        } => {
            let mask = if masked_len == 0 {
                "***".to_string()
            } else {
                "●".repeat(masked_len)
            };
            let cursor = if focused && !working { "▌" } else { "" };
            format!(
                "~~{}~~\n\nKEY: `{}`{} **\\[ENTER\\]**\n",
                REDACTED_CONTACTS, mask, cursor
            )
        }
        ContactZone::Revealed(lines) => lines
            .iter()
            .map(|line| format!("┃ {}\n\n", escape_inline(line)))
            .collect(),
    }
}
