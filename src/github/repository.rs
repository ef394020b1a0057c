// src/github/repository.rs
// =============================================================================
// The repository record we keep for every search result.
//
// The GitHub search payload is large and any field may be missing, so every
// attribute except the name and owner login is optional. A missing name or
// login decodes to an empty string rather than failing the whole item.
//
// Rust concepts:
// - #[serde(default)]: fall back to Default when a field is absent
// - #[serde(rename = "...")]: map JSON names onto Rust field names
// - From<T>: convert the wire shape into our own type
// =============================================================================

use serde::{Deserialize, Serialize};

// A fetched search result
//
// Built once from a response item and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner_login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_avatar_url: Option<String>,
    /// "User" or "Organization"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watcher_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Repository {
    /// Minimal constructor, handy for tests and fixtures
    pub fn new(name: impl Into<String>, owner_login: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_login: owner_login.into(),
            owner_avatar_url: None,
            owner_type: None,
            star_count: None,
            watcher_count: None,
            fork_count: None,
            language: None,
            description: None,
            url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `owner/name`, used as the display identifier
    pub fn display_name(&self) -> String {
        if self.owner_login.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.owner_login, self.name)
        }
    }
}

// The shape of one element of the `items` array in the search response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RepositoryItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    owner: Option<OwnerItem>,
    #[serde(default)]
    stargazers_count: Option<u64>,
    #[serde(default)]
    watchers_count: Option<u64>,
    #[serde(default)]
    forks_count: Option<u64>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwnerItem {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default, rename = "type")]
    owner_type: Option<String>,
}

impl From<RepositoryItem> for Repository {
    fn from(item: RepositoryItem) -> Self {
        let owner = item.owner.unwrap_or_default();

        Repository {
            name: item.name.unwrap_or_default(),
            owner_login: owner.login.unwrap_or_default(),
            owner_avatar_url: owner.avatar_url,
            owner_type: owner.owner_type,
            star_count: item.stargazers_count,
            watcher_count: item.watchers_count,
            fork_count: item.forks_count,
            language: item.language,
            description: item.description,
            url: item.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_item() {
        let json = r#"{
            "name": "tokio",
            "owner": {
                "login": "tokio-rs",
                "avatar_url": "https://avatars.example/tokio-rs.png",
                "type": "Organization"
            },
            "stargazers_count": 25000,
            "watchers_count": 25000,
            "forks_count": 2300,
            "language": "Rust",
            "description": "A runtime for writing reliable asynchronous applications",
            "html_url": "https://github.com/tokio-rs/tokio"
        }"#;

        let item: RepositoryItem = serde_json::from_str(json).unwrap();
        let repo = Repository::from(item);

        assert_eq!(repo.name, "tokio");
        assert_eq!(repo.owner_login, "tokio-rs");
        assert_eq!(repo.owner_type.as_deref(), Some("Organization"));
        assert_eq!(repo.star_count, Some(25000));
        assert_eq!(repo.fork_count, Some(2300));
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.url.as_deref(), Some("https://github.com/tokio-rs/tokio"));
        assert_eq!(repo.display_name(), "tokio-rs/tokio");
    }

    #[test]
    fn test_decode_sparse_item() {
        // Only a name, and an explicit null language
        let item: RepositoryItem =
            serde_json::from_str(r#"{ "name": "lonely", "language": null }"#).unwrap();
        let repo = Repository::from(item);

        assert_eq!(repo.name, "lonely");
        assert_eq!(repo.owner_login, "");
        assert_eq!(repo.language, None);
        assert_eq!(repo.star_count, None);
        assert_eq!(repo.display_name(), "lonely");
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let repo = Repository::new("beta", "someone");
        let json = serde_json::to_string(&repo).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("star_count"));
    }
}
