use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque campaign identifier as reported by the ads platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub u64);

/// Opaque ad group identifier, scoped to its owning campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdGroupId(pub u64);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AdGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How exclude terms are matched against a placement URL.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Term must be a suffix of the normalized URL.
    EndsWith,
    /// Term may appear anywhere in the normalized URL.
    #[default]
    Contains,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlacementType {
    Website,
    MobileApplication,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Display,
    DemandGen,
}

/// One placement row from the performance report. Read-only, scoped to the
/// date window and impression threshold already applied by the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRow {
    pub url: String,
    pub campaign_id: CampaignId,
    pub ad_group_id: AdGroupId,
}

/// Handle to a host-owned named exclusion list. Outlives a single run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExclusionList {
    pub id: u64,
    pub name: String,
}

/// Counters accumulated over one run, discarded after the summary log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub checked: u64,
    pub excluded: u64,
    pub ignored: u64,
    /// URLs excluded this run, in the order they were processed.
    pub excluded_urls: Vec<String>,
}
