use crate::error::{PlacementError, PlacementResult};
use crate::types::{CampaignType, MatchMode, PlacementType};
use serde::Deserialize;

/// Root application configuration. Loaded from environment variables with
/// the prefix `PLACEMENT_GUARD__` once at startup, then passed by reference;
/// nothing mutates it after load.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Enables per-row diagnostic logging (which term matched and why).
    #[serde(default = "default_log")]
    pub log: bool,
    /// Name of the shared exclusion list; created on first use.
    #[serde(default = "default_exclusions_list")]
    pub exclusions_list: String,
    /// Minimum impressions a placement must have in the window to be reported.
    #[serde(default)]
    pub impression_threshold: u64,
    /// Trailing window length in days, ending yesterday. Must be positive.
    #[serde(default = "default_days_to_check")]
    pub days_to_check: u32,
    /// Terms that mark a placement for exclusion, tested in order.
    #[serde(default)]
    pub exclude_terms: Vec<String>,
    /// Terms that whitelist a placement; any match overrides exclude terms.
    #[serde(default)]
    pub ignore_terms: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default = "default_placement_types")]
    pub placement_types: Vec<PlacementType>,
    #[serde(default = "default_campaign_types")]
    pub campaign_types: Vec<CampaignType>,
}

// Default functions
fn default_log() -> bool {
    true
}
fn default_exclusions_list() -> String {
    "Auto-Excluded Placements".to_string()
}
fn default_days_to_check() -> u32 {
    7
}
fn default_placement_types() -> Vec<PlacementType> {
    vec![PlacementType::Website, PlacementType::MobileApplication]
}
fn default_campaign_types() -> Vec<CampaignType> {
    vec![CampaignType::Display, CampaignType::DemandGen]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: default_log(),
            exclusions_list: default_exclusions_list(),
            impression_threshold: 0,
            days_to_check: default_days_to_check(),
            exclude_terms: Vec::new(),
            ignore_terms: Vec::new(),
            match_mode: MatchMode::default(),
            placement_types: default_placement_types(),
            campaign_types: default_campaign_types(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("PLACEMENT_GUARD")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> PlacementResult<()> {
        if self.days_to_check == 0 {
            return Err(PlacementError::Config(
                "days_to_check must be positive".to_string(),
            ));
        }
        if self.exclusions_list.trim().is_empty() {
            return Err(PlacementError::Config(
                "exclusions_list name must not be empty".to_string(),
            ));
        }
        if self.placement_types.is_empty() {
            return Err(PlacementError::Config(
                "at least one placement type is required".to_string(),
            ));
        }
        if self.campaign_types.is_empty() {
            return Err(PlacementError::Config(
                "at least one campaign type is required".to_string(),
            ));
        }
        Ok(())
    }
}
