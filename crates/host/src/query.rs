//! Report query model — the filter spec handed to the reporting interface.

use chrono::{Duration, NaiveDate};
use placement_core::types::{CampaignType, PlacementType};
use placement_core::AppConfig;
use serde::{Deserialize, Serialize};

/// Filter spec for one placement-performance report request.
///
/// The date window is a trailing range ending yesterday; today's partial
/// data is never included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementQuery {
    pub placement_types: Vec<PlacementType>,
    pub campaign_types: Vec<CampaignType>,
    /// Rows must have strictly more impressions than this over the window.
    pub impression_threshold: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PlacementQuery {
    /// Build the query for one run: a `days_to_check`-day window ending
    /// yesterday, with the configured type and impression filters.
    pub fn from_config(config: &AppConfig, today: NaiveDate) -> Self {
        let end_date = today - Duration::days(1);
        let start_date = today - Duration::days(i64::from(config.days_to_check));
        Self {
            placement_types: config.placement_types.clone(),
            campaign_types: config.campaign_types.clone(),
            impression_threshold: config.impression_threshold,
            start_date,
            end_date,
        }
    }

    /// Window start in the reporting interface's `YYYYMMDD` wire format.
    pub fn start_yyyymmdd(&self) -> String {
        self.start_date.format("%Y%m%d").to_string()
    }

    /// Window end in the reporting interface's `YYYYMMDD` wire format.
    pub fn end_yyyymmdd(&self) -> String {
        self.end_date.format("%Y%m%d").to_string()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window_ends_yesterday() {
        let config = AppConfig {
            days_to_check: 7,
            ..AppConfig::default()
        };
        let query = PlacementQuery::from_config(&config, day(2026, 8, 27));
        assert_eq!(query.start_date, day(2026, 8, 20));
        assert_eq!(query.end_date, day(2026, 8, 26));
        assert!(query.contains_date(day(2026, 8, 20)));
        assert!(query.contains_date(day(2026, 8, 26)));
        assert!(!query.contains_date(day(2026, 8, 27)));
        assert!(!query.contains_date(day(2026, 8, 19)));
    }

    #[test]
    fn test_one_day_window() {
        let config = AppConfig {
            days_to_check: 1,
            ..AppConfig::default()
        };
        let query = PlacementQuery::from_config(&config, day(2026, 3, 1));
        assert_eq!(query.start_date, query.end_date);
        assert_eq!(query.end_date, day(2026, 2, 28));
    }

    #[test]
    fn test_yyyymmdd_format() {
        let config = AppConfig::default();
        let query = PlacementQuery::from_config(&config, day(2026, 1, 5));
        assert_eq!(query.end_yyyymmdd(), "20260104");
        assert_eq!(query.start_yyyymmdd(), "20251229");
    }
}
