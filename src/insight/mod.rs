//! Motivational text and performance insights
//!
//! Text generation is an external collaborator. This module defines the
//! request/response shapes, the service trait, an offline implementation and
//! the fallbacks used when a service fails. Nothing here can change player
//! progression.

pub mod local;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::ActivityLog;
use crate::progression::{PlayerState, Stats};

pub use local::LocalInsights;

/// Days of history sent with an insight request
pub const HISTORY_DAYS: i64 = 14;

pub const FALLBACK_QUOTE: &str = "The weak beg for results. The strong build them.";
pub const FALLBACK_AUTHOR: &str = "The System";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Insight service unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Input for a daily quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub level: u32,
    pub rank: String,
    pub xp_gained_today: u64,
    pub current_streak_days: u32,
    pub quests_completed_today: Vec<String>,
    pub weak_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireQuote {
    pub quote: String,
    pub author: String,
}

impl Default for FireQuote {
    fn default() -> Self {
        Self {
            quote: FALLBACK_QUOTE.to_string(),
            author: FALLBACK_AUTHOR.to_string(),
        }
    }
}

/// One day of performance history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub xp_earned: u64,
    pub quests_completed: u32,
    pub streak_days: u32,
}

/// Input for a performance analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRequest {
    pub current_stats: Stats,
    pub current_level: u32,
    pub current_rank: String,
    /// Most recent first
    pub daily_history: Vec<DailyPerformance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceInsight {
    pub weak_areas: Vec<String>,
    pub suggested_recovery_missions: Vec<String>,
    pub focus_areas: Vec<String>,
    /// 0-100
    pub readiness_score: u8,
    pub analysis_summary: String,
}

impl PerformanceInsight {
    /// Shown when no analysis is available
    pub fn unavailable() -> Self {
        Self {
            weak_areas: Vec::new(),
            suggested_recovery_missions: Vec::new(),
            focus_areas: Vec::new(),
            readiness_score: 0,
            analysis_summary: "Analysis unavailable. Keep clearing your daily quests.".to_string(),
        }
    }

    /// Reject responses outside the documented ranges
    pub fn check(self) -> Result<Self, InsightError> {
        if self.readiness_score > 100 {
            return Err(InsightError::InvalidResponse(format!(
                "readiness score {} out of range",
                self.readiness_score
            )));
        }
        if self.analysis_summary.trim().is_empty() {
            return Err(InsightError::InvalidResponse("empty summary".to_string()));
        }
        Ok(self)
    }
}

/// A text-generation backend
pub trait InsightService {
    fn fire_quote(&self, request: &QuoteRequest) -> Result<FireQuote, InsightError>;

    fn performance_insight(&self, request: &InsightRequest) -> Result<PerformanceInsight, InsightError>;
}

/// Build a quote request from the current snapshot
pub fn quote_request(
    state: &PlayerState,
    xp_gained_today: u64,
    quests_completed_today: Vec<String>,
) -> QuoteRequest {
    QuoteRequest {
        level: state.level,
        rank: state.rank.label(),
        xp_gained_today,
        current_streak_days: state.streak,
        quests_completed_today,
        weak_areas: vec![state.stats.weakest().name().to_string()],
    }
}

/// Build an insight request from the snapshot and activity log.
///
/// The log does not keep per-day streaks, so the streak for each day is
/// reconstructed by counting back through consecutive active days.
pub fn insight_request(state: &PlayerState, activity: &ActivityLog, today: NaiveDate) -> InsightRequest {
    let history = activity.history(today, HISTORY_DAYS);

    // Oldest first to accumulate the running streak, then flip back
    let mut running = 0;
    let mut daily_history: Vec<DailyPerformance> = history
        .iter()
        .rev()
        .map(|(date, record)| {
            running = if record.quests > 0 { running + 1 } else { 0 };
            DailyPerformance {
                date: *date,
                xp_earned: record.xp,
                quests_completed: record.quests,
                streak_days: running,
            }
        })
        .collect();
    daily_history.reverse();

    InsightRequest {
        current_stats: state.stats,
        current_level: state.level,
        current_rank: state.rank.name().to_string(),
        daily_history,
    }
}

/// Ask for a quote, using the static default on any failure
pub fn quote_or_fallback(service: &dyn InsightService, request: &QuoteRequest) -> FireQuote {
    match service.fire_quote(request) {
        Ok(quote) if !quote.quote.trim().is_empty() => quote,
        Ok(_) => {
            log::warn!("Quote service returned an empty quote, using fallback");
            FireQuote::default()
        }
        Err(e) => {
            log::warn!("Failed to generate fire quote: {}", e);
            FireQuote::default()
        }
    }
}

/// Ask for an analysis, using a placeholder on any failure
pub fn insight_or_fallback(service: &dyn InsightService, request: &InsightRequest) -> PerformanceInsight {
    match service.performance_insight(request).and_then(PerformanceInsight::check) {
        Ok(insight) => insight,
        Err(e) => {
            log::warn!("Failed to generate performance insight: {}", e);
            PerformanceInsight::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl InsightService for Offline {
        fn fire_quote(&self, _: &QuoteRequest) -> Result<FireQuote, InsightError> {
            Err(InsightError::Unavailable("no network".into()))
        }

        fn performance_insight(&self, _: &InsightRequest) -> Result<PerformanceInsight, InsightError> {
            Ok(PerformanceInsight {
                weak_areas: vec![],
                suggested_recovery_missions: vec![],
                focus_areas: vec![],
                readiness_score: 180,
                analysis_summary: "too good".into(),
            })
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_quote_falls_back_on_error() {
        let request = quote_request(&PlayerState::default(), 0, vec![]);
        let quote = quote_or_fallback(&Offline, &request);
        assert_eq!(quote, FireQuote::default());
        assert_eq!(quote.author, "The System");
    }

    #[test]
    fn test_insight_falls_back_on_malformed_response() {
        let request = insight_request(&PlayerState::default(), &ActivityLog::new(), d("2024-01-10"));
        assert_eq!(insight_or_fallback(&Offline, &request), PerformanceInsight::unavailable());
    }

    #[test]
    fn test_insight_request_reconstructs_streaks() {
        let mut activity = ActivityLog::new();
        activity.record_completion(d("2024-01-08"), 10);
        activity.record_completion(d("2024-01-09"), 20);
        activity.record_completion(d("2024-01-10"), 30);

        let request = insight_request(&PlayerState::default(), &activity, d("2024-01-10"));
        assert_eq!(request.daily_history.len(), HISTORY_DAYS as usize);
        assert_eq!(request.daily_history[0].date, d("2024-01-10"));
        assert_eq!(request.daily_history[0].streak_days, 3);
        assert_eq!(request.daily_history[1].streak_days, 2);
        assert_eq!(request.daily_history[3].streak_days, 0);
    }

    #[test]
    fn test_quote_request_uses_labels() {
        let state = PlayerState { streak: 4, ..PlayerState::default() };
        let request = quote_request(&state, 75, vec!["Workout".into()]);
        assert_eq!(request.rank, "E Rank");
        assert_eq!(request.current_streak_days, 4);
        assert_eq!(request.weak_areas, vec!["Discipline".to_string()]);
    }
}
