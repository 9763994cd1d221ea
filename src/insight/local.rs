//! Offline insight provider
//!
//! Deterministic rule-based answers so the board has something to show
//! without a text-generation backend.

use super::{FireQuote, InsightError, InsightRequest, InsightService, PerformanceInsight, QuoteRequest};
use crate::progression::StatName;

const QUOTES: [&str; 6] = [
    "Every quest you clear is a wall you will never have to climb again.",
    "The gate does not care how you feel. Enter anyway.",
    "Levels are earned in silence. Keep grinding.",
    "A hunter who shows up every day cannot be stopped.",
    "Your rank is a record of the days you did not quit.",
    "Rest if you must. Retreat, never.",
];

const IDLE_QUOTE: &str = "The day is not over. One quest is all it takes to rise.";

/// Weight of daily consistency in the readiness score
const CONSISTENCY_WEIGHT: f64 = 60.0;
/// Weight of stat breadth in the readiness score
const BREADTH_WEIGHT: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalInsights;

fn recovery_mission(stat: StatName) -> &'static str {
    match stat {
        StatName::Discipline => "Phone down after 11 PM for three nights straight",
        StatName::Intelligence => "Clear 3 DSA problems before noon",
        StatName::Strength => "Complete a full workout today",
        StatName::Consistency => "Ship one resume or profile improvement this week",
        StatName::Focus => "Two 30-minute aptitude sessions without breaks",
    }
}

impl InsightService for LocalInsights {
    fn fire_quote(&self, request: &QuoteRequest) -> Result<FireQuote, InsightError> {
        let quote = if request.xp_gained_today == 0 && request.quests_completed_today.is_empty() {
            IDLE_QUOTE
        } else {
            let index = (request.level as usize + request.current_streak_days as usize) % QUOTES.len();
            QUOTES[index]
        };
        let author = if request.rank == "Monarch" || request.current_streak_days >= 30 {
            "Your Inner Monarch"
        } else {
            "The System"
        };

        Ok(FireQuote {
            quote: quote.to_string(),
            author: author.to_string(),
        })
    }

    fn performance_insight(&self, request: &InsightRequest) -> Result<PerformanceInsight, InsightError> {
        let stats = &request.current_stats;
        let mean = stats.total() as f64 / StatName::ALL.len() as f64;

        let mut ranked: Vec<(StatName, u32)> = stats.iter().collect();
        ranked.sort_by_key(|&(_, value)| value);

        let weak: Vec<StatName> = ranked
            .iter()
            .filter(|&&(_, value)| (value as f64) < mean)
            .map(|&(stat, _)| stat)
            .collect();
        let focus: Vec<StatName> = ranked.iter().take(2).map(|&(stat, _)| stat).collect();

        let days = request.daily_history.len().max(1) as f64;
        let active_days = request.daily_history.iter().filter(|d| d.quests_completed > 0).count();
        let trained = ranked.iter().filter(|&&(_, value)| value > 0).count();

        let consistency = active_days as f64 / days;
        let breadth = trained as f64 / StatName::ALL.len() as f64;
        let score = (consistency * CONSISTENCY_WEIGHT + breadth * BREADTH_WEIGHT).round() as u8;

        let analysis_summary = if weak.is_empty() {
            format!(
                "Level {} {} hunter. Active on {} of the last {} days with balanced stats. Hold the line.",
                request.current_level,
                request.current_rank,
                active_days,
                request.daily_history.len()
            )
        } else {
            format!(
                "Level {} {} hunter. Active on {} of the last {} days. {} is falling behind; \
                 clear its quests before it drags your rank.",
                request.current_level,
                request.current_rank,
                active_days,
                request.daily_history.len(),
                weak[0]
            )
        };

        Ok(PerformanceInsight {
            weak_areas: weak.iter().map(|s| s.name().to_string()).collect(),
            suggested_recovery_missions: weak.iter().take(3).map(|&s| recovery_mission(s).to_string()).collect(),
            focus_areas: focus.iter().map(|s| s.name().to_string()).collect(),
            readiness_score: score.min(100),
            analysis_summary,
        })
    }
}
