use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub title: String,
    pub url: String,
}

impl LinkSpec {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Everything printed on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tagline: String,
    /// Avatar badge text; derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Diyorbek T.".to_string(),
            location: "Tashkent, Uzbekistan".to_string(),
            tagline: "Front-end developer at E-BIRJA".to_string(),
            initials: None,
            links: vec![
                LinkSpec::new("GitHub", "https://github.com/DiyorbeToshpulatov"),
                LinkSpec::new(
                    "LinkedIn",
                    "https://www.linkedin.com/in/diyorbek-toshpulatov-6146ab22b/",
                ),
                LinkSpec::new("Telegram", "https://t.me/d_fazliddinovich"),
                LinkSpec::new("Instagram", "https://www.instagram.com/d_fazliddinovich/#"),
                LinkSpec::new("X", "https://x.com/DiyorbekLatov"),
            ],
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile name is empty")]
    EmptyName,
    #[error("link #{index} has an empty title")]
    EmptyLinkTitle { index: usize },
    #[error("link {title:?} has an empty url")]
    EmptyLinkUrl { title: String },
    #[error("link {title:?} url {url:?} must start with http:// or https://")]
    UnsupportedScheme { title: String, url: String },
}

impl Profile {
    #[must_use]
    pub fn initials(&self) -> String {
        if let Some(initials) = self.initials.as_deref().map(str::trim)
            && !initials.is_empty()
        {
            return initials.to_string();
        }
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().find(|ch| ch.is_alphanumeric()))
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        for (index, link) in self.links.iter().enumerate() {
            if link.title.trim().is_empty() {
                return Err(ProfileError::EmptyLinkTitle { index });
            }
            let url = link.url.trim();
            if url.is_empty() {
                return Err(ProfileError::EmptyLinkUrl {
                    title: link.title.clone(),
                });
            }
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ProfileError::UnsupportedScheme {
                    title: link.title.clone(),
                    url: link.url.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Resolves the card profile.
///
/// An explicit path must exist and parse. The default location is optional:
/// a missing file falls back to the built-in profile, a broken one is logged
/// and ignored.
pub fn load_profile(explicit: Option<&Path>) -> anyhow::Result<Profile> {
    load_profile_from(explicit, default_profile_path().as_deref())
}

pub fn load_profile_from(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
) -> anyhow::Result<Profile> {
    if let Some(path) = explicit {
        return read_profile(path);
    }

    let Some(path) = default_path.filter(|path| path.exists()) else {
        debug!("no profile file found, using built-in profile");
        return Ok(Profile::default());
    };

    match read_profile(path) {
        Ok(profile) => Ok(profile),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "ignoring unreadable profile"
            );
            Ok(Profile::default())
        }
    }
}

pub fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading profile {} failed", path.display()))?;
    let profile: Profile = serde_json::from_str(&content)
        .with_context(|| format!("parsing profile {} failed", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("profile {} is invalid", path.display()))?;
    Ok(profile)
}

pub fn save_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating profile directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(profile).context("serializing profile payload failed")?;
    fs::write(path, payload).context("writing profile file failed")
}

#[must_use]
pub fn default_profile_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("STORMBIO_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("profile.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("stormbio")
            .join("profile.json"),
    )
}

#[cfg(test)]
mod tests;
