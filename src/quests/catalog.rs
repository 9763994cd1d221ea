//! Quest definitions
//!
//! The catalog is plain configuration. It is handed to the quest session at
//! construction and never mutated behind its back.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::progression::StatName;

/// Which board a quest is listed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestKind {
    #[default]
    Main,
    Side,
    /// Recovery quest, usually worth no XP
    Emergency,
}

impl QuestKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestKind::Main => "Main Quests",
            QuestKind::Side => "Side Quests",
            QuestKind::Emergency => "Emergency",
        }
    }
}

/// A quest definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub xp_reward: u32,
    pub stat: StatName,
    #[serde(default)]
    pub kind: QuestKind,
}

impl Quest {
    pub fn new(id: &str, title: &str, xp_reward: u32, stat: StatName, kind: QuestKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            xp_reward,
            stat,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate quest id '{0}'")]
    DuplicateId(String),
    #[error("quest '{0}' has an empty id or title")]
    MissingTitle(String),
    #[error("quest '{0}' must award more than 0 XP")]
    ZeroReward(String),
}

/// The full list of quests available each day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub quests: Vec<Quest>,
}

impl QuestCatalog {
    /// Build a catalog, checking it is well formed
    pub fn new(quests: Vec<Quest>) -> Result<Self, CatalogError> {
        let catalog = Self { quests };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ids must be unique and titles non-empty. Only emergency quests may
    /// award zero XP.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for quest in &self.quests {
            if quest.id.trim().is_empty() || quest.title.trim().is_empty() {
                return Err(CatalogError::MissingTitle(quest.id.clone()));
            }
            if !seen.insert(quest.id.as_str()) {
                return Err(CatalogError::DuplicateId(quest.id.clone()));
            }
            if quest.xp_reward == 0 && quest.kind != QuestKind::Emergency {
                return Err(CatalogError::ZeroReward(quest.id.clone()));
            }
        }
        Ok(())
    }

    /// Find a quest by id
    pub fn find(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// All quests of one kind, in catalog order
    pub fn by_kind(&self, kind: QuestKind) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.kind == kind).collect()
    }

    /// XP available from completing every quest once
    pub fn total_xp(&self) -> u64 {
        self.quests.iter().map(|q| q.xp_reward as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

impl Default for QuestCatalog {
    fn default() -> Self {
        default_quest_catalog()
    }
}

/// Built-in daily quests
pub fn default_quest_catalog() -> QuestCatalog {
    use QuestKind::*;
    use StatName::*;

    QuestCatalog {
        quests: vec![
            // Main
            Quest::new("mq1", "Solve 3 DSA problems", 50, Intelligence, Main),
            Quest::new("mq2", "Revise 1 core subject topic", 25, Intelligence, Main),
            Quest::new("mq3", "30 min aptitude practice", 25, Focus, Main),
            // Side
            Quest::new("sq1", "Workout", 30, Strength, Side),
            Quest::new("sq2", "No phone after 11 PM", 20, Discipline, Side),
            Quest::new("sq3", "Improve resume", 10, Consistency, Side),
            Quest::new("sq4", "Post on LinkedIn", 10, Consistency, Side),
            // Emergency
            Quest::new("eq1", "Hunter in Danger - Recover 150 XP Today", 0, Discipline, Emergency),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_quest_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.by_kind(QuestKind::Main).len(), 3);
        assert_eq!(catalog.by_kind(QuestKind::Side).len(), 4);
        assert_eq!(catalog.by_kind(QuestKind::Emergency).len(), 1);
        assert_eq!(catalog.total_xp(), 170);
    }

    #[test]
    fn test_find() {
        let catalog = default_quest_catalog();
        assert_eq!(catalog.find("sq1").map(|q| q.xp_reward), Some(30));
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let quests = vec![
            Quest::new("a", "One", 10, StatName::Focus, QuestKind::Main),
            Quest::new("a", "Two", 10, StatName::Focus, QuestKind::Side),
        ];
        assert_eq!(QuestCatalog::new(quests), Err(CatalogError::DuplicateId("a".into())));
    }

    #[test]
    fn test_zero_reward_only_for_emergency() {
        let bad = vec![Quest::new("a", "Nothing", 0, StatName::Focus, QuestKind::Side)];
        assert_eq!(QuestCatalog::new(bad), Err(CatalogError::ZeroReward("a".into())));

        let ok = vec![Quest::new("e", "Recover", 0, StatName::Focus, QuestKind::Emergency)];
        assert!(QuestCatalog::new(ok).is_ok());
    }

    #[test]
    fn test_rejects_blank_title() {
        let quests = vec![Quest::new("a", "  ", 10, StatName::Focus, QuestKind::Main)];
        assert_eq!(QuestCatalog::new(quests), Err(CatalogError::MissingTitle("a".into())));
    }
}
