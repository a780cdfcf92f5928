//! Run orchestrator — one strictly sequential pass over the report.

use crate::apply::apply_exclusion;
use crate::classify::{classify, Decision};
use chrono::NaiveDate;
use placement_core::types::RunSummary;
use placement_core::{AppConfig, PlacementError, PlacementResult};
use placement_host::{AdsHost, PlacementQuery, ReportSource};
use tracing::info;

/// Execute one run: query the report for the trailing window ending the day
/// before `today`, classify each row, apply exclusions, and return the
/// summary counters.
pub fn run(
    config: &AppConfig,
    source: &dyn ReportSource,
    host: &dyn AdsHost,
    today: NaiveDate,
) -> PlacementResult<RunSummary> {
    config.validate()?;

    let query = PlacementQuery::from_config(config, today);
    info!(
        start = %query.start_yyyymmdd(),
        end = %query.end_yyyymmdd(),
        threshold = query.impression_threshold,
        placement_types = ?query.placement_types,
        campaign_types = ?query.campaign_types,
        "Requesting placement report"
    );

    let rows = source
        .placements(&query)
        .map_err(|e| PlacementError::Report(e.to_string()))?;

    let mut summary = RunSummary::default();
    for row in rows {
        summary.checked += 1;
        metrics::counter!("placements.checked").increment(1);

        match classify(&row.url, config) {
            Decision::Ignored { .. } => {
                summary.ignored += 1;
                metrics::counter!("placements.ignored").increment(1);
            }
            Decision::Excluded { .. } => {
                if apply_exclusion(host, &row, &config.exclusions_list) {
                    summary.excluded += 1;
                    summary.excluded_urls.push(row.url.clone());
                    metrics::counter!("placements.excluded").increment(1);
                }
            }
            Decision::NoMatch => {}
        }
    }

    if summary.checked == 0 {
        info!(
            start = %query.start_yyyymmdd(),
            end = %query.end_yyyymmdd(),
            threshold = query.impression_threshold,
            "Report returned no placements for the window"
        );
    }

    info!(
        checked = summary.checked,
        excluded = summary.excluded,
        ignored = summary.ignored,
        "Placement run complete"
    );
    if !summary.excluded_urls.is_empty() {
        info!(urls = ?summary.excluded_urls, "Excluded placements");
    }

    Ok(summary)
}
