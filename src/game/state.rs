//! Tracker state owner
//!
//! `Game` owns the only live copy of the player's progression. Completions
//! flow through the quest session into the engine; the new snapshot is
//! diffed against the old one, recorded in the activity log, announced to
//! subscribers and saved.

use chrono::NaiveDate;
use std::path::PathBuf;

use super::time::{Clock, SystemClock};
use crate::activity::ActivityLog;
use crate::data::{config_directory, save_catalog, DataError, DataManager};
use crate::insight::{self, FireQuote, InsightService, LocalInsights, PerformanceInsight};
use crate::progression::{diff, streak, PlayerState, ProgressEvent, ProgressionEngine, Subscriber};
use crate::quests::{QuestCatalog, QuestSession};
use crate::save::{self, SaveData, SaveError};

/// Messages kept in the log before the oldest are dropped
const MAX_MESSAGES: usize = 100;

/// Screens the front end can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Daily quests, stats and activity
    QuestBoard,
    /// Achievements and personal bests
    Achievements,
    /// Quote and performance analysis
    Insights,
    /// Exit the app
    Quit,
}

/// A message to display in the log
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub date: NaiveDate,
    pub category: MessageCategory,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Quest,
    Progress,
    System,
    Warning,
}

/// Where the tracker keeps its files. `None` disables that file.
#[derive(Debug, Clone, Default)]
pub struct StoragePaths {
    pub save: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl StoragePaths {
    /// Platform data and config directories
    pub fn platform() -> Self {
        Self {
            save: Some(save::save_path()),
            config: Some(config_directory()),
        }
    }

    /// Nothing is read or written
    pub fn in_memory() -> Self {
        Self::default()
    }
}

pub struct Game {
    state: GameState,
    player: PlayerState,
    session: QuestSession,
    activity: ActivityLog,
    notifier: crate::progression::Notifier,
    clock: Box<dyn Clock>,
    insights: Box<dyn InsightService>,
    quote: Option<FireQuote>,
    paths: StoragePaths,
    messages: Vec<GameMessage>,
}

impl Game {
    /// Open the tracker with platform storage and the system clock
    pub fn new() -> Self {
        let paths = StoragePaths::platform();
        let data = match &paths.config {
            Some(dir) => DataManager::load_from(dir),
            None => DataManager::default(),
        };
        Self::open(data, Box::new(SystemClock), paths)
    }

    /// Open the tracker from explicit parts
    pub fn open(data: DataManager, clock: Box<dyn Clock>, paths: StoragePaths) -> Self {
        let today = clock.today();
        let DataManager { catalog, ranks } = data;
        let engine = ProgressionEngine::new(ranks);

        let saved = match &paths.save {
            Some(path) => save::load_or_default(path, engine.ranks()),
            None => SaveData::fresh(engine.ranks()),
        };

        // The rank table may have changed since the last save
        let player = engine.reevaluate_rank(&saved.player);

        let mut session = QuestSession::new(catalog, engine, today);
        if let Some(snapshot) = saved.session {
            session.restore(snapshot);
        }
        session.roll_over(today);

        let mut activity = saved.activity;
        let pruned = activity.prune(today);
        if pruned > 0 {
            log::debug!("Pruned {} old activity days", pruned);
        }

        let mut game = Self {
            state: GameState::QuestBoard,
            player,
            session,
            activity,
            notifier: crate::progression::Notifier::new(),
            clock,
            insights: Box::new(LocalInsights),
            quote: None,
            paths,
            messages: Vec::new(),
        };
        game.add_message(
            format!("Welcome back, hunter. {} quests await.", game.session.remaining().len()),
            MessageCategory::System,
        );
        game
    }

    /// Complete a quest for today.
    ///
    /// Returns the user-facing changes it caused, or `None` when the quest
    /// is unknown or already done today.
    pub fn complete_quest(&mut self, quest_id: &str) -> Option<Vec<ProgressEvent>> {
        let today = self.clock.today();
        self.roll_period(today);

        let completion = self.session.complete(quest_id, &self.player, today)?;
        let events = diff(&self.player, &completion.state);

        self.activity.record_completion(today, completion.quest.xp_reward as u64);
        self.player = completion.state;
        self.quote = None;

        let reward = if completion.quest.xp_reward > 0 {
            format!(" +{} XP", completion.quest.xp_reward)
        } else {
            String::new()
        };
        self.add_message(
            format!("Quest cleared: {}{}", completion.quest.title, reward),
            MessageCategory::Quest,
        );
        for event in &events {
            self.add_message(
                format!("{} {}", event.title(), event.description()),
                MessageCategory::Progress,
            );
        }
        self.notifier.publish(&events);

        self.autosave();
        Some(events)
    }

    /// Roll the quest period if the date has changed since the last check
    pub fn update(&mut self) {
        let today = self.clock.today();
        self.roll_period(today);
    }

    fn roll_period(&mut self, today: NaiveDate) {
        if self.session.roll_over(today) {
            self.quote = None;
            self.add_message("A new day. Your daily quests have been reset.", MessageCategory::System);
            self.autosave();
        }
    }

    /// Wipe all progression and start over as a new player
    pub fn reset_progress(&mut self) {
        let today = self.clock.today();
        self.player = PlayerState::new(self.session.engine().ranks());
        self.activity = ActivityLog::new();
        self.session.restore(crate::quests::SessionSnapshot {
            period: today,
            completed: Default::default(),
        });
        self.quote = None;
        log::info!("Progress reset");
        self.add_message("Progress reset. Rise again from E Rank.", MessageCategory::Warning);
        self.autosave();
    }

    /// Replace the quest catalog, writing it to the config directory
    pub fn replace_catalog(&mut self, catalog: QuestCatalog) -> Result<(), DataError> {
        match &self.paths.config {
            Some(dir) => save_catalog(dir, &catalog)?,
            None => catalog.validate()?,
        }
        self.session.replace_catalog(catalog);
        self.add_message("Quests saved.", MessageCategory::System);
        self.autosave();
        Ok(())
    }

    /// Register a callback for level-ups, promotions and other changes
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.notifier.subscribe(subscriber);
    }

    pub fn set_insight_service(&mut self, service: Box<dyn InsightService>) {
        self.insights = service;
        self.quote = None;
    }

    /// Today's quote, generated once per change in progress
    pub fn fire_quote(&mut self) -> FireQuote {
        if let Some(quote) = &self.quote {
            return quote.clone();
        }
        let titles = self.session.completed_quests().iter().map(|q| q.title.clone()).collect();
        let request = insight::quote_request(&self.player, self.session.xp_earned(), titles);
        let quote = insight::quote_or_fallback(self.insights.as_ref(), &request);
        self.quote = Some(quote.clone());
        quote
    }

    pub fn performance_insight(&self) -> PerformanceInsight {
        let request = insight::insight_request(&self.player, &self.activity, self.clock.today());
        insight::insight_or_fallback(self.insights.as_ref(), &request)
    }

    /// Current snapshot in save form
    pub fn save_data(&self) -> SaveData {
        SaveData {
            version: save::SAVE_VERSION,
            player: self.player.clone(),
            session: Some(self.session.snapshot()),
            activity: self.activity.clone(),
        }
    }

    /// Write the save file, if one is configured
    pub fn save(&self) -> Result<(), SaveError> {
        match &self.paths.save {
            Some(path) => save::save_to(path, &self.save_data()),
            None => Ok(()),
        }
    }

    fn autosave(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Autosave failed: {}", e);
            self.add_message(format!("Could not save progress: {}", e), MessageCategory::Warning);
        }
    }

    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            date: self.clock.today(),
            category,
        });
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn session(&self) -> &QuestSession {
        &self.session
    }

    pub fn catalog(&self) -> &QuestCatalog {
        self.session.catalog()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Streak as of today; shows 0 once a day has been missed
    pub fn live_streak(&self) -> u32 {
        streak::live_streak(self.player.streak, self.player.last_completion_date, self.today())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn quit(&mut self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save on exit: {}", e);
        }
        self.state = GameState::Quit;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FixedClock;
    use crate::progression::{Rank, RankTable};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn game_at(date: &str) -> (Game, Rc<FixedClock>) {
        let clock = Rc::new(FixedClock::new(d(date)));
        let game = Game::open(DataManager::default(), Box::new(Rc::clone(&clock)), StoragePaths::in_memory());
        (game, clock)
    }

    #[test]
    fn test_complete_quest_updates_everything() {
        let (mut game, _) = game_at("2024-01-10");
        let events = game.complete_quest("mq1").unwrap();
        assert!(events.contains(&ProgressEvent::AchievementUnlocked { id: "first_blood" }));
        assert_eq!(game.player().xp, 50);
        assert_eq!(game.activity().xp_on(d("2024-01-10")), 50);
        assert!(game.session().is_completed("mq1"));
    }

    #[test]
    fn test_duplicate_completion_is_noop() {
        let (mut game, _) = game_at("2024-01-10");
        game.complete_quest("sq1");
        let before = game.player().clone();
        assert!(game.complete_quest("sq1").is_none());
        assert!(game.complete_quest("missing").is_none());
        assert_eq!(game.player(), &before);
        assert_eq!(game.activity().xp_on(d("2024-01-10")), 30);
    }

    #[test]
    fn test_day_rollover_reopens_quests() {
        let (mut game, clock) = game_at("2024-01-10");
        game.complete_quest("mq1");
        clock.advance_days(1);
        game.update();
        assert!(!game.session().is_completed("mq1"));
        game.complete_quest("mq1");
        assert_eq!(game.player().streak, 2);
        assert_eq!(game.player().level, 2);
    }

    #[test]
    fn test_clock_moving_backwards_does_not_reopen_quests() {
        let (mut game, clock) = game_at("2024-01-10");
        game.complete_quest("mq1");

        clock.set(d("2024-01-09"));
        game.update();
        assert!(game.complete_quest("mq1").is_none());

        clock.set(d("2024-01-10"));
        game.update();
        assert!(game.complete_quest("mq1").is_none());
        assert_eq!(game.player().xp, 50);
        assert_eq!(game.activity().xp_on(d("2024-01-09")), 0);
    }

    #[test]
    fn test_subscribers_see_level_up() {
        let (mut game, _) = game_at("2024-01-10");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(Box::new(move |event: &ProgressEvent| sink.borrow_mut().push(event.clone())));

        for id in ["mq1", "mq2", "mq3"] {
            game.complete_quest(id);
        }
        assert!(seen.borrow().contains(&ProgressEvent::LevelUp { from: 1, to: 2 }));
    }

    #[test]
    fn test_live_streak_expires_after_missed_day() {
        let (mut game, clock) = game_at("2024-01-10");
        game.complete_quest("mq1");
        clock.advance_days(1);
        assert_eq!(game.live_streak(), 1);
        clock.advance_days(1);
        assert_eq!(game.live_streak(), 0);
        assert_eq!(game.player().streak, 1);
    }

    #[test]
    fn test_reset_progress() {
        let (mut game, _) = game_at("2024-01-10");
        game.complete_quest("mq1");
        game.reset_progress();
        assert_eq!(game.player(), &PlayerState::default());
        assert!(game.activity().is_empty());
        assert!(!game.session().is_completed("mq1"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let paths = StoragePaths {
            save: Some(dir.path().join("progress.json")),
            config: Some(dir.path().join("config")),
        };
        let clock = Rc::new(FixedClock::new(d("2024-01-10")));

        let mut game = Game::open(DataManager::default(), Box::new(Rc::clone(&clock)), paths.clone());
        game.complete_quest("mq1");
        let player = game.player().clone();
        drop(game);

        let mut reopened = Game::open(DataManager::default(), Box::new(Rc::clone(&clock)), paths);
        assert_eq!(reopened.player(), &player);
        assert!(reopened.complete_quest("mq1").is_none());
        assert_eq!(reopened.activity().xp_on(d("2024-01-10")), 50);
    }

    #[test]
    fn test_reopen_with_new_rank_table_promotes() {
        let clock = Rc::new(FixedClock::new(d("2024-01-10")));
        let data = DataManager {
            catalog: QuestCatalog::default(),
            ranks: RankTable::from_pairs(&[(Rank::E, 0), (Rank::D, 1)]).unwrap(),
        };
        let game = Game::open(data, Box::new(clock), StoragePaths::in_memory());
        assert_eq!(game.player().rank, Rank::D);
    }

    #[test]
    fn test_replace_catalog_validates() {
        let (mut game, _) = game_at("2024-01-10");
        let bad = QuestCatalog { quests: vec![] };
        assert!(game.replace_catalog(bad).is_ok());
        assert!(game.catalog().is_empty());

        let dup = QuestCatalog {
            quests: vec![
                crate::quests::Quest::new("a", "A", 5, crate::progression::StatName::Focus, Default::default()),
                crate::quests::Quest::new("a", "B", 5, crate::progression::StatName::Focus, Default::default()),
            ],
        };
        assert!(game.replace_catalog(dup).is_err());
    }

    #[test]
    fn test_quote_is_cached_until_progress() {
        let (mut game, _) = game_at("2024-01-10");
        let idle = game.fire_quote();
        assert_eq!(game.fire_quote(), idle);
        game.complete_quest("sq1");
        assert_ne!(game.fire_quote(), idle);
    }
}
