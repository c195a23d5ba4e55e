use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use uuid::Uuid;

const UNKNOWN_COMPANY: &str = "Unknown Company";
const UNKNOWN_OWNER: &str = "Unknown Owner";
const DEFAULT_ROLE: &str = "Member";
const DEFAULT_SLUG: &str = "my-card";

/// A business card collected into the wallet
///
/// Read-only to the animation core; it only needs the count and order of
/// records plus the display fields for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Wallet entry id
    pub id: Uuid,
    /// Profile the card belongs to
    pub profile_id: Option<Uuid>,
    pub company: String,
    pub owner: String,
    pub role: String,
    pub slug: String,
    pub avatar_url: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Wallet entry as stored by the profile service
///
/// Every display field is optional; missing values get fallbacks when the
/// entry is turned into a [`CardRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedCard {
    pub id: Uuid,
    #[serde(default)]
    pub profile_id: Option<Uuid>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Route a committed card navigates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub slug: String,
    pub profile_id: Option<Uuid>,
    pub company: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<SavedCard> for CardRecord {
    fn from(saved: SavedCard) -> Self {
        Self {
            id: saved.id,
            profile_id: saved.profile_id,
            company: non_empty(saved.company).unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            owner: non_empty(saved.owner).unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
            role: non_empty(saved.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            slug: non_empty(saved.slug).unwrap_or_default(),
            avatar_url: non_empty(saved.avatar_url),
            saved_at: saved.saved_at,
        }
    }
}

impl CardRecord {
    /// Build a record with only the display fields set
    pub fn new(company: &str, owner: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id: None,
            company: company.to_string(),
            owner: owner.to_string(),
            role: role.to_string(),
            slug: String::new(),
            avatar_url: None,
            saved_at: None,
        }
    }

    /// Single-letter monogram shown where a logo would go
    pub fn monogram(&self) -> char {
        self.company
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Where a commit on this card navigates to
    pub fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget {
            slug: self.slug.clone(),
            profile_id: self.profile_id,
            company: self.company.clone(),
        }
    }
}

impl NavigationTarget {
    /// Router path: `/card/{slug}?id={profile_id}&c={company}`
    pub fn path(&self) -> String {
        let slug = if self.slug.is_empty() {
            DEFAULT_SLUG
        } else {
            self.slug.as_str()
        };
        let id = self
            .profile_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let company: String = form_urlencoded::byte_serialize(self.company.as_bytes()).collect();

        format!("/card/{}?id={}&c={}", slug, id, company)
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
