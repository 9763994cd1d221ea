//! Daily streak rules

use chrono::NaiveDate;

/// How a completion date relates to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStep {
    /// No earlier completion on record
    First,
    /// Another completion on the same calendar day
    SameDay,
    /// Exactly one day after the last completion
    NextDay,
    /// More than one day after the last completion
    Gap,
    /// Earlier than the last completion (clock moved backwards)
    Backdated,
}

/// Classify `date` against the last completion date
pub fn classify(last: Option<NaiveDate>, date: NaiveDate) -> StreakStep {
    let Some(last) = last else {
        return StreakStep::First;
    };
    match (date - last).num_days() {
        0 => StreakStep::SameDay,
        1 => StreakStep::NextDay,
        d if d > 1 => StreakStep::Gap,
        _ => StreakStep::Backdated,
    }
}

/// Compute the new `(streak, last_completion_date)` pair
pub fn advance(streak: u32, last: Option<NaiveDate>, date: NaiveDate) -> (u32, Option<NaiveDate>) {
    match classify(last, date) {
        StreakStep::First | StreakStep::Gap => (1, Some(date)),
        StreakStep::NextDay => (streak.saturating_add(1), Some(date)),
        // Same-day completions keep the streak; a backdated one is ignored
        StreakStep::SameDay | StreakStep::Backdated => (streak, last),
    }
}

/// Streak as it would be shown on `today`, without a new completion.
///
/// A streak survives until the end of the day after the last completion.
pub fn live_streak(streak: u32, last: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last {
        Some(last) if (today - last).num_days() <= 1 => streak,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_first_completion() {
        assert_eq!(advance(0, None, d("2024-01-10")), (1, Some(d("2024-01-10"))));
    }

    #[test]
    fn test_same_day_keeps_streak() {
        let last = Some(d("2024-01-10"));
        assert_eq!(advance(1, last, d("2024-01-10")), (1, last));
    }

    #[test]
    fn test_next_day_increments() {
        let (streak, last) = advance(1, Some(d("2024-01-10")), d("2024-01-11"));
        assert_eq!(streak, 2);
        assert_eq!(last, Some(d("2024-01-11")));
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(advance(2, Some(d("2024-01-11")), d("2024-01-15")), (1, Some(d("2024-01-15"))));
    }

    #[test]
    fn test_month_boundary_is_consecutive() {
        assert_eq!(classify(Some(d("2024-02-29")), d("2024-03-01")), StreakStep::NextDay);
    }

    #[test]
    fn test_backdated_is_ignored() {
        let last = Some(d("2024-01-11"));
        assert_eq!(classify(last, d("2024-01-09")), StreakStep::Backdated);
        assert_eq!(advance(4, last, d("2024-01-09")), (4, last));
    }

    #[test]
    fn test_live_streak() {
        let last = Some(d("2024-01-10"));
        assert_eq!(live_streak(3, last, d("2024-01-11")), 3);
        assert_eq!(live_streak(3, last, d("2024-01-12")), 0);
        assert_eq!(live_streak(0, None, d("2024-01-12")), 0);
    }
}
