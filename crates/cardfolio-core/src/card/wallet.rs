use std::cmp::Ordering;
use std::path::Path;

use tracing::debug;
use uuid::Uuid;

use super::models::{CardRecord, SavedCard};
use crate::Result;

const SAMPLE_CARDS: [(&str, &str, &str, &str); 6] = [
    ("Monolith Corp", "Alex Mercer", "Chief Executive", "alex-mercer"),
    ("Vanguard Systems", "Sarah Connor", "Tech Lead", "sarah-connor"),
    ("Apex Dynamics", "John Wick", "Security Consultant", "john-wick"),
    ("Nebula Innovations", "Ellen Ripley", "Operations", "ellen-ripley"),
    ("Cyberdyne", "Miles Dyson", "Lead Researcher", "miles-dyson"),
    ("Tyrell Corp", "Eldon Tyrell", "Founder", "eldon-tyrell"),
];

/// Ordered collection of collected cards, newest first
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    cards: Vec<CardRecord>,
}

impl Wallet {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    /// Built-in demo wallet
    pub fn sample() -> Self {
        let cards = SAMPLE_CARDS
            .iter()
            .enumerate()
            .map(|(i, (company, owner, role, slug))| CardRecord {
                id: Uuid::from_u128(i as u128 + 1),
                profile_id: Some(Uuid::from_u128(0x100 + i as u128)),
                slug: slug.to_string(),
                ..CardRecord::new(company, owner, role)
            })
            .collect();
        Self { cards }
    }

    /// Load a wallet from a JSON array of saved-card entries
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let wallet = Self::from_json(&content)?;
        debug!(path = %path.display(), cards = wallet.len(), "Loaded wallet");
        Ok(wallet)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<SavedCard> = serde_json::from_str(content)?;
        let mut cards: Vec<CardRecord> = entries.into_iter().map(CardRecord::from).collect();

        // Newest first; undated entries keep their file order at the end
        cards.sort_by(|a, b| match (a.saved_at, b.saved_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&CardRecord> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wallet() {
        let wallet = Wallet::sample();
        assert_eq!(wallet.len(), 6);
        assert_eq!(wallet.get(0).unwrap().company, "Monolith Corp");
        assert_eq!(wallet.get(5).unwrap().owner, "Eldon Tyrell");
    }

    #[test]
    fn test_from_json_orders_newest_first() {
        let json = r#"[
            {"id": "00000000-0000-0000-0000-000000000001", "company": "Undated"},
            {"id": "00000000-0000-0000-0000-000000000002", "company": "Old",
             "saved_at": "2024-01-01T00:00:00Z"},
            {"id": "00000000-0000-0000-0000-000000000003", "company": "New",
             "saved_at": "2025-06-01T00:00:00Z"}
        ]"#;

        let wallet = Wallet::from_json(json).unwrap();
        let companies: Vec<&str> = wallet.iter().map(|c| c.company.as_str()).collect();
        assert_eq!(companies, vec!["New", "Old", "Undated"]);
        assert_eq!(wallet.get(2).unwrap().role, "Member");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Wallet::from_json("{not json").is_err());
    }

    #[test]
    fn test_empty_wallet() {
        let wallet = Wallet::from_json("[]").unwrap();
        assert!(wallet.is_empty());
    }
}
