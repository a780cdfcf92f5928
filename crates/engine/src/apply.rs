//! Applies an exclusion decision against the ads host: negative placement on
//! the owning ad group plus membership in the shared exclusion list.

use placement_core::types::{ExclusionList, PlacementRow};
use placement_host::AdsHost;
use tracing::{info, warn};

/// Resolve the named exclusion list, creating it on first use.
///
/// Exact-name match; the first existing list wins if the platform allows
/// duplicate names. Converges on a single list across runs.
pub fn get_or_create_list(
    host: &dyn AdsHost,
    name: &str,
) -> Result<ExclusionList, anyhow::Error> {
    if let Some(list) = host.find_list(name)? {
        return Ok(list);
    }
    let list = host.create_list(name)?;
    info!(list = %name, list_id = list.id, "Created exclusion list");
    Ok(list)
}

/// Exclude one matched placement. Returns true when both mutations landed.
///
/// Every failure is terminal for this row only: missing entities and
/// mutation errors are logged and the caller moves on to the next row.
pub fn apply_exclusion(host: &dyn AdsHost, row: &PlacementRow, list_name: &str) -> bool {
    match try_apply(host, row, list_name) {
        Ok(applied) => applied,
        Err(error) => {
            warn!(
                url = %row.url,
                ad_group_id = %row.ad_group_id,
                error = %error,
                "Failed to exclude placement"
            );
            metrics::counter!("placements.row_errors").increment(1);
            false
        }
    }
}

fn try_apply(
    host: &dyn AdsHost,
    row: &PlacementRow,
    list_name: &str,
) -> Result<bool, anyhow::Error> {
    let Some(campaign) = host.resolve_campaign(row.campaign_id)? else {
        warn!(
            campaign_id = %row.campaign_id,
            url = %row.url,
            "Campaign not found, skipping row"
        );
        return Ok(false);
    };

    let Some(ad_group) = host.resolve_ad_group(campaign.id, row.ad_group_id)? else {
        warn!(
            campaign_id = %campaign.id,
            ad_group_id = %row.ad_group_id,
            url = %row.url,
            "Ad group not found, skipping row"
        );
        return Ok(false);
    };

    host.exclude_placement(ad_group.id, &row.url)?;

    let list = get_or_create_list(host, list_name)?;
    host.add_to_list(&list, &row.url)?;

    Ok(true)
}
