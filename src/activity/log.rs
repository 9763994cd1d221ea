//! Per-day activity aggregation
//!
//! A derived cache of XP earned per calendar day, used for the weekly chart,
//! the yearly heatmap and insight requests. Losing it never affects the
//! player's progression.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days covered by the heatmap window
pub const HEATMAP_DAYS: i64 = 365;

/// Totals for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub xp: u64,
    pub quests: u32,
}

/// One bar of the weekly chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayActivity {
    pub day: Weekday,
    pub xp: u64,
}

impl WeekdayActivity {
    /// Short label such as "Mon"
    pub fn label(&self) -> &'static str {
        match self.day {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// One heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub xp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add XP to the bucket for `date`. Order of calls does not matter.
    pub fn record_xp(&mut self, date: NaiveDate, amount: u64) {
        let day = self.days.entry(date).or_default();
        day.xp = day.xp.saturating_add(amount);
    }

    /// Add one completed quest and its XP to `date`
    pub fn record_completion(&mut self, date: NaiveDate, amount: u64) {
        self.record_xp(date, amount);
        if let Some(day) = self.days.get_mut(&date) {
            day.quests = day.quests.saturating_add(1);
        }
    }

    pub fn day(&self, date: NaiveDate) -> DayRecord {
        self.days.get(&date).copied().unwrap_or_default()
    }

    pub fn xp_on(&self, date: NaiveDate) -> u64 {
        self.day(date).xp
    }

    /// XP per weekday over the seven days ending at `today`, Monday first
    pub fn weekly(&self, today: NaiveDate) -> [WeekdayActivity; 7] {
        let mut week = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .map(|day| WeekdayActivity { day, xp: 0 });

        let start = today - Duration::days(6);
        for (date, record) in self.days.range(start..=today) {
            let slot = date.weekday().num_days_from_monday() as usize;
            week[slot].xp = week[slot].xp.saturating_add(record.xp);
        }
        week
    }

    /// One cell per day for the year ending at `today`, oldest first
    pub fn heatmap(&self, today: NaiveDate) -> Vec<HeatmapCell> {
        (0..HEATMAP_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                HeatmapCell { date, xp: self.xp_on(date) }
            })
            .collect()
    }

    /// Records for the `days` days ending at `today`, most recent first
    pub fn history(&self, today: NaiveDate, days: i64) -> Vec<(NaiveDate, DayRecord)> {
        (0..days.max(0))
            .map(|offset| {
                let date = today - Duration::days(offset);
                (date, self.day(date))
            })
            .collect()
    }

    /// Total XP over the seven days ending at `today`
    pub fn weekly_total(&self, today: NaiveDate) -> u64 {
        self.weekly(today).iter().fold(0, |total, d| total.saturating_add(d.xp))
    }

    /// Drop buckets that fell out of the heatmap window
    pub fn prune(&mut self, today: NaiveDate) -> usize {
        let cutoff = today - Duration::days(HEATMAP_DAYS - 1);
        let before = self.days.len();
        self.days.retain(|date, _| *date >= cutoff);
        before - self.days.len()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_out_of_order_summation() {
        let mut log = ActivityLog::new();
        log.record_xp(d("2024-01-12"), 30);
        log.record_xp(d("2024-01-10"), 20);
        log.record_xp(d("2024-01-12"), 5);
        log.record_xp(d("2024-01-10"), 25);
        assert_eq!(log.xp_on(d("2024-01-10")), 45);
        assert_eq!(log.xp_on(d("2024-01-12")), 35);
        assert_eq!(log.xp_on(d("2024-01-11")), 0);
    }

    #[test]
    fn test_record_completion_counts_quests() {
        let mut log = ActivityLog::new();
        log.record_completion(d("2024-01-10"), 0);
        log.record_completion(d("2024-01-10"), 50);
        assert_eq!(log.day(d("2024-01-10")), DayRecord { xp: 50, quests: 2 });
    }

    #[test]
    fn test_weekly_buckets_by_weekday() {
        let mut log = ActivityLog::new();
        // 2024-01-08 is a Monday, 2024-01-14 a Sunday
        log.record_xp(d("2024-01-08"), 10);
        log.record_xp(d("2024-01-14"), 70);
        log.record_xp(d("2024-01-01"), 999); // outside the window

        let week = log.weekly(d("2024-01-14"));
        assert_eq!(week[0].label(), "Mon");
        assert_eq!(week[0].xp, 10);
        assert_eq!(week[6].xp, 70);
        assert_eq!(log.weekly_total(d("2024-01-14")), 80);
    }

    #[test]
    fn test_weekly_is_rolling() {
        let mut log = ActivityLog::new();
        log.record_xp(d("2024-01-08"), 10); // Monday
        // Window for Wednesday 2024-01-10 covers Thu 01-04 .. Wed 01-10
        let week = log.weekly(d("2024-01-10"));
        assert_eq!(week[0].xp, 10);
        // A week later Monday the 8th has dropped out
        assert_eq!(log.weekly_total(d("2024-01-15")), 0);
    }

    #[test]
    fn test_weekly_saturates() {
        let mut log = ActivityLog::new();
        // Monday at the ceiling plus Sunday must not wrap
        log.record_xp(d("2024-01-08"), u64::MAX);
        log.record_xp(d("2024-01-14"), 5);
        let week = log.weekly(d("2024-01-14"));
        assert_eq!(week[0].xp, u64::MAX);
        assert_eq!(log.weekly_total(d("2024-01-14")), u64::MAX);
    }

    #[test]
    fn test_heatmap_window() {
        let mut log = ActivityLog::new();
        log.record_xp(d("2024-01-10"), 40);
        let cells = log.heatmap(d("2024-01-10"));
        assert_eq!(cells.len(), 365);
        assert_eq!(cells.last().unwrap(), &HeatmapCell { date: d("2024-01-10"), xp: 40 });
        assert_eq!(cells[0].date, d("2023-01-11"));
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut log = ActivityLog::new();
        log.record_completion(d("2024-01-09"), 20);
        let history = log.history(d("2024-01-10"), 3);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].0, d("2024-01-10"));
        assert_eq!(history[1].1.xp, 20);
    }

    #[test]
    fn test_prune() {
        let mut log = ActivityLog::new();
        log.record_xp(d("2022-06-01"), 10);
        log.record_xp(d("2024-01-10"), 10);
        assert_eq!(log.prune(d("2024-01-10")), 1);
        assert_eq!(log.len(), 1);
    }
}
