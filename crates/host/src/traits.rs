//! Trait surface over the ads platform's reporting and mutation APIs.
//! Each method maps to one blocking call into the host; errors come back as
//! `anyhow::Error` so callers can log and move on.

use crate::query::PlacementQuery;
use placement_core::types::{
    AdGroupId, CampaignId, CampaignType, ExclusionList, PlacementRow,
};
use serde::{Deserialize, Serialize};

/// Campaign as resolved by id from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: CampaignId,
    pub name: String,
    pub campaign_type: CampaignType,
}

/// Ad group as resolved by id within its campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdGroupRecord {
    pub id: AdGroupId,
    pub campaign_id: CampaignId,
    pub name: String,
}

/// Executes a placement-performance report query.
pub trait ReportSource: Send + Sync {
    /// Run the query and return a finite, single-pass stream of rows.
    /// An empty result is a normal outcome, not an error.
    fn placements<'a>(
        &'a self,
        query: &PlacementQuery,
    ) -> Result<Box<dyn Iterator<Item = PlacementRow> + 'a>, anyhow::Error>;
}

/// Entity resolution and mutation capabilities of the ads platform.
pub trait AdsHost: Send + Sync {
    /// Resolve a campaign by id. `None` when the id matches nothing.
    fn resolve_campaign(
        &self,
        id: CampaignId,
    ) -> Result<Option<CampaignRecord>, anyhow::Error>;

    /// Resolve an ad group by id within the given campaign.
    fn resolve_ad_group(
        &self,
        campaign_id: CampaignId,
        id: AdGroupId,
    ) -> Result<Option<AdGroupRecord>, anyhow::Error>;

    /// Exclude a placement URL at ad-group scope.
    fn exclude_placement(&self, ad_group_id: AdGroupId, url: &str) -> Result<(), anyhow::Error>;

    /// Find an exclusion list by exact name. First match if the platform
    /// allows duplicate names.
    fn find_list(&self, name: &str) -> Result<Option<ExclusionList>, anyhow::Error>;

    /// Create a new exclusion list with the given name.
    fn create_list(&self, name: &str) -> Result<ExclusionList, anyhow::Error>;

    /// Append a placement URL to an exclusion list.
    fn add_to_list(&self, list: &ExclusionList, url: &str) -> Result<(), anyhow::Error>;
}
