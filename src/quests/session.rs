//! Quest session
//!
//! Tracks which quests have been completed in the current period (one
//! calendar day) and is the only way completions reach the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::catalog::{Quest, QuestCatalog};
use crate::progression::{PlayerState, ProgressionEngine};

/// Result of an accepted completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub quest: Quest,
    pub date: NaiveDate,
    pub state: PlayerState,
}

/// Saved form of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub period: NaiveDate,
    pub completed: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct QuestSession {
    catalog: QuestCatalog,
    engine: ProgressionEngine,
    period: NaiveDate,
    completed: BTreeSet<String>,
}

impl QuestSession {
    pub fn new(catalog: QuestCatalog, engine: ProgressionEngine, period: NaiveDate) -> Self {
        Self {
            catalog,
            engine,
            period,
            completed: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    pub fn period(&self) -> NaiveDate {
        self.period
    }

    /// Complete a quest on `date`.
    ///
    /// Unknown ids and quests already done this period are ignored and
    /// return `None`; the player state is left alone.
    pub fn complete(&mut self, quest_id: &str, state: &PlayerState, date: NaiveDate) -> Option<Completion> {
        let Some(quest) = self.catalog.find(quest_id) else {
            log::debug!("Ignoring completion of unknown quest '{}'", quest_id);
            return None;
        };
        if self.completed.contains(quest_id) {
            log::debug!("Quest '{}' already completed for {}", quest_id, self.period);
            return None;
        }

        self.completed.insert(quest.id.clone());
        let next = self.engine.apply_completion(state, quest, date);
        Some(Completion {
            quest: quest.clone(),
            date,
            state: next,
        })
    }

    /// Start a new period if `today` is later than the current one.
    /// Returns true when the completed set was cleared.
    ///
    /// A date earlier than the period (clock moved backwards) keeps the
    /// current period and its completions.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today <= self.period {
            if today < self.period {
                log::debug!("Date {} is before quest period {}, keeping period", today, self.period);
            }
            return false;
        }
        log::info!(
            "New quest period {} (was {}, {} quests completed)",
            today,
            self.period,
            self.completed.len()
        );
        self.period = today;
        self.completed.clear();
        true
    }

    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.completed.contains(quest_id)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    /// Completed quests in catalog order
    pub fn completed_quests(&self) -> Vec<&Quest> {
        self.catalog
            .quests
            .iter()
            .filter(|q| self.completed.contains(&q.id))
            .collect()
    }

    /// Quests still open this period, in catalog order
    pub fn remaining(&self) -> Vec<&Quest> {
        self.catalog
            .quests
            .iter()
            .filter(|q| !self.completed.contains(&q.id))
            .collect()
    }

    /// XP earned from quests completed this period
    pub fn xp_earned(&self) -> u64 {
        self.completed_quests().iter().map(|q| q.xp_reward as u64).sum()
    }

    /// Swap in an edited catalog. Completions of quests that no longer exist
    /// are dropped.
    pub fn replace_catalog(&mut self, catalog: QuestCatalog) {
        self.completed.retain(|id| catalog.contains(id));
        self.catalog = catalog;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            period: self.period,
            completed: self.completed.clone(),
        }
    }

    /// Restore a saved session, keeping only ids the catalog still knows
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.period = snapshot.period;
        self.completed = snapshot
            .completed
            .into_iter()
            .filter(|id| self.catalog.contains(id))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::StatName;
    use crate::quests::{default_quest_catalog, QuestKind};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn session() -> QuestSession {
        QuestSession::new(default_quest_catalog(), ProgressionEngine::default(), d("2024-01-10"))
    }

    #[test]
    fn test_complete_forwards_to_engine() {
        let mut session = session();
        let state = PlayerState::default();
        let done = session.complete("mq1", &state, d("2024-01-10")).unwrap();
        assert_eq!(done.quest.id, "mq1");
        assert_eq!(done.state.xp, 50);
        assert_eq!(done.state.stats.intelligence, 1);
        assert!(session.is_completed("mq1"));
    }

    #[test]
    fn test_double_completion_is_ignored() {
        let mut session = session();
        let state = PlayerState::default();
        let first = session.complete("sq1", &state, d("2024-01-10")).unwrap().state;
        assert!(session.complete("sq1", &first, d("2024-01-10")).is_none());
        assert_eq!(session.completed_ids().count(), 1);
        assert_eq!(first.xp, 30);
    }

    #[test]
    fn test_unknown_quest_is_ignored() {
        let mut session = session();
        assert!(session.complete("nope", &PlayerState::default(), d("2024-01-10")).is_none());
        assert_eq!(session.completed_ids().count(), 0);
    }

    #[test]
    fn test_roll_over_clears_completed() {
        let mut session = session();
        let state = session.complete("mq1", &PlayerState::default(), d("2024-01-10")).unwrap().state;

        assert!(!session.roll_over(d("2024-01-10")));
        assert!(session.is_completed("mq1"));

        assert!(session.roll_over(d("2024-01-11")));
        assert!(!session.is_completed("mq1"));
        let again = session.complete("mq1", &state, d("2024-01-11")).unwrap();
        assert_eq!(again.state.xp, 0);
        assert_eq!(again.state.level, 2);
    }

    #[test]
    fn test_backwards_date_keeps_period() {
        let mut session = session();
        let state = session.complete("mq1", &PlayerState::default(), d("2024-01-10")).unwrap().state;

        assert!(!session.roll_over(d("2024-01-09")));
        assert_eq!(session.period(), d("2024-01-10"));
        assert!(session.is_completed("mq1"));
        assert!(session.complete("mq1", &state, d("2024-01-09")).is_none());

        // Returning to the same day does not reopen the quest either
        assert!(!session.roll_over(d("2024-01-10")));
        assert!(session.complete("mq1", &state, d("2024-01-10")).is_none());
    }

    #[test]
    fn test_emergency_quest_trains_stat() {
        let mut session = session();
        let done = session.complete("eq1", &PlayerState::default(), d("2024-01-10")).unwrap();
        assert_eq!(done.state.xp, 0);
        assert_eq!(done.state.stats.get(StatName::Discipline), 1);
        assert_eq!(done.state.streak, 1);
    }

    #[test]
    fn test_remaining_and_xp_earned() {
        let mut session = session();
        let state = PlayerState::default();
        session.complete("mq1", &state, d("2024-01-10"));
        session.complete("sq2", &state, d("2024-01-10"));
        assert_eq!(session.remaining().len(), 6);
        assert_eq!(session.xp_earned(), 70);
    }

    #[test]
    fn test_snapshot_restore_filters_unknown_ids() {
        let mut session = session();
        let mut completed = BTreeSet::new();
        completed.insert("mq2".to_string());
        completed.insert("deleted".to_string());
        session.restore(SessionSnapshot { period: d("2024-01-12"), completed });
        assert_eq!(session.period(), d("2024-01-12"));
        assert_eq!(session.completed_ids().collect::<Vec<_>>(), vec!["mq2"]);
    }

    #[test]
    fn test_replace_catalog_drops_missing_completions() {
        let mut session = session();
        session.complete("mq1", &PlayerState::default(), d("2024-01-10"));
        let catalog = QuestCatalog::new(vec![Quest::new("new", "Read", 15, StatName::Focus, QuestKind::Side)]).unwrap();
        session.replace_catalog(catalog);
        assert!(!session.is_completed("mq1"));
        assert_eq!(session.remaining().len(), 1);
    }
}
