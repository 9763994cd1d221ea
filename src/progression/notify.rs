//! Progression notifications
//!
//! The engine only returns new state. Anything user-facing is found by
//! diffing the previous snapshot against the new one and handed to
//! subscribers as typed events.

use super::achievements::newly_unlocked;
use super::player::PlayerState;
use super::rank::Rank;

/// A user-facing change between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    LevelUp { from: u32, to: u32 },
    RankPromotion { from: Rank, to: Rank },
    /// A streak longer than one day was broken by a gap
    StreakReset { previous: u32 },
    AchievementUnlocked { id: &'static str },
}

impl ProgressEvent {
    /// Headline for toasts and the message log
    pub fn title(&self) -> &'static str {
        match self {
            ProgressEvent::LevelUp { .. } => "LEVEL UP!",
            ProgressEvent::RankPromotion { .. } => "RANK PROMOTION!",
            ProgressEvent::StreakReset { .. } => "STREAK LOST",
            ProgressEvent::AchievementUnlocked { .. } => "ACHIEVEMENT UNLOCKED",
        }
    }

    pub fn description(&self) -> String {
        match self {
            ProgressEvent::LevelUp { to, .. } => format!("You have reached Level {}!", to),
            ProgressEvent::RankPromotion { to, .. } => {
                format!("You have been promoted to {}!", to.label())
            }
            ProgressEvent::StreakReset { previous } => {
                format!("Your {}-day streak has ended. Start again today.", previous)
            }
            ProgressEvent::AchievementUnlocked { id } => {
                let name = super::achievements::all_achievements()
                    .into_iter()
                    .find(|a| a.id == *id)
                    .map(|a| a.name)
                    .unwrap_or(*id);
                format!("{} unlocked.", name)
            }
        }
    }
}

/// Compare two snapshots and list what changed, in a stable order
pub fn diff(old: &PlayerState, new: &PlayerState) -> Vec<ProgressEvent> {
    let mut events = Vec::new();

    if new.level > old.level {
        events.push(ProgressEvent::LevelUp { from: old.level, to: new.level });
    }
    if new.rank > old.rank {
        events.push(ProgressEvent::RankPromotion { from: old.rank, to: new.rank });
    }
    // A reset shows up as the streak starting over at 1 on a later day
    if new.streak == 1 && old.streak > 1 && new.last_completion_date > old.last_completion_date {
        events.push(ProgressEvent::StreakReset { previous: old.streak });
    }
    for id in newly_unlocked(old, new) {
        events.push(ProgressEvent::AchievementUnlocked { id });
    }

    events
}

/// Subscriber callback
pub type Subscriber = Box<dyn FnMut(&ProgressEvent)>;

/// Fan-out of progression events to any number of subscribers
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Deliver events to every subscriber in subscription order
    pub fn publish(&mut self, events: &[ProgressEvent]) {
        for event in events {
            log::info!("{} {}", event.title(), event.description());
            for subscriber in self.subscribers.iter_mut() {
                subscriber(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
