use serde::{Deserialize, Serialize};

/// Parsed portfolio content, read-only after load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identity shown on the home and profile pages
    #[serde(default)]
    pub profile: Profile,

    /// Case files, in display order
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Opaque ciphertext guarding the contact channel
    #[serde(default, alias = "encryptedContacts", skip_serializing_if = "Option::is_none")]
    pub encrypted_contacts: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, alias = "asciiAvatar", skip_serializing_if = "Option::is_none")]
    pub ascii_avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: String,
}

impl Profile {
    /// The alias to show, if one is set and not blank
    pub fn alias(&self) -> Option<&str> {
        self.pseudo.as_deref().filter(|p| !p.trim().is_empty())
    }
}

impl Project {
    /// Tags with duplicates removed, first occurrence wins
    pub fn unique_tags(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag);
            }
        }
        seen
    }
}

impl AppConfig {
    /// Sample document written by `noir init`
    pub fn sample() -> Self {
        Self {
            profile: Profile {
                pseudo: Some("GHOST".to_string()),
                role: Some("Infrastructure Engineer".to_string()),
                ascii_avatar: None,
            },
            projects: vec![Project {
                name: "noir-terminal".to_string(),
                description: "Terminal-styled portfolio with an encrypted contact channel".to_string(),
                tags: vec!["rust".to_string(), "tui".to_string()],
                link: "https://example.com/noir-terminal".to_string(),
            }],
            encrypted_contacts: Some(crate::constants::PLACEHOLDER_MARKERS[0].to_string()),
        }
    }
}
