//! In-memory ads host backed by DashMap.
//!
//! Production: the real platform client sits behind the same traits.
//! This provides the same API surface for development, fixture-driven CLI
//! runs, and tests.

use crate::query::PlacementQuery;
use crate::traits::{AdGroupRecord, AdsHost, CampaignRecord, ReportSource};
use anyhow::anyhow;
use chrono::NaiveDate;
use dashmap::DashMap;
use placement_core::types::{
    AdGroupId, CampaignId, CampaignType, ExclusionList, PlacementRow, PlacementType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// One day of impressions for a placement URL within an ad group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementStat {
    pub url: String,
    pub ad_group_id: AdGroupId,
    pub placement_type: PlacementType,
    pub impressions: u64,
    pub date: NaiveDate,
}

/// Serializable account snapshot for loading a `MemoryHost` from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFixture {
    pub campaigns: Vec<CampaignRecord>,
    pub ad_groups: Vec<AdGroupRecord>,
    pub placements: Vec<PlacementStat>,
}

impl AccountFixture {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone)]
struct ListRecord {
    id: u64,
    name: String,
    urls: Vec<String>,
}

/// Thread-safe in-memory stand-in for the ads platform: campaigns, ad
/// groups, placement stats, per-ad-group negative placements, and named
/// exclusion lists.
pub struct MemoryHost {
    campaigns: DashMap<CampaignId, CampaignRecord>,
    ad_groups: DashMap<AdGroupId, AdGroupRecord>,
    stats: DashMap<u64, PlacementStat>,
    lists: DashMap<u64, ListRecord>,
    negatives: DashMap<AdGroupId, Vec<String>>,
    next_stat_id: AtomicU64,
    next_list_id: AtomicU64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            ad_groups: DashMap::new(),
            stats: DashMap::new(),
            lists: DashMap::new(),
            negatives: DashMap::new(),
            next_stat_id: AtomicU64::new(1),
            next_list_id: AtomicU64::new(1),
        }
    }

    pub fn from_fixture(fixture: AccountFixture) -> Self {
        let host = Self::new();
        let campaign_count = fixture.campaigns.len();
        let stat_count = fixture.placements.len();
        for campaign in fixture.campaigns {
            host.campaigns.insert(campaign.id, campaign);
        }
        for ad_group in fixture.ad_groups {
            host.ad_groups.insert(ad_group.id, ad_group);
        }
        for stat in fixture.placements {
            host.insert_stat(stat);
        }
        info!(
            campaigns = campaign_count,
            placements = stat_count,
            "Account fixture loaded"
        );
        host
    }

    /// Small seeded account for fixture-less runs.
    pub fn with_demo_data(today: NaiveDate) -> Self {
        let host = Self::new();
        host.add_campaign(CampaignId(1001), "Display - Prospecting", CampaignType::Display);
        host.add_campaign(CampaignId(1002), "Demand Gen - Retargeting", CampaignType::DemandGen);
        host.add_ad_group(AdGroupId(2001), CampaignId(1001), "Broad placements");
        host.add_ad_group(AdGroupId(2002), CampaignId(1002), "Feed placements");

        let yesterday = today.pred_opt().unwrap_or(today);
        let demo = [
            ("mobilegames.example.com", AdGroupId(2001), PlacementType::Website, 420),
            ("news.dailyherald.example", AdGroupId(2001), PlacementType::Website, 1200),
            ("puzzle-arcade.app", AdGroupId(2002), PlacementType::MobileApplication, 310),
            ("physics.university.edu/games", AdGroupId(2002), PlacementType::Website, 95),
        ];
        for (url, ad_group_id, placement_type, impressions) in demo {
            host.insert_stat(PlacementStat {
                url: url.to_string(),
                ad_group_id,
                placement_type,
                impressions,
                date: yesterday,
            });
        }
        info!("Demo account seeded");
        host
    }

    pub fn add_campaign(&self, id: CampaignId, name: &str, campaign_type: CampaignType) {
        self.campaigns.insert(
            id,
            CampaignRecord {
                id,
                name: name.to_string(),
                campaign_type,
            },
        );
    }

    pub fn add_ad_group(&self, id: AdGroupId, campaign_id: CampaignId, name: &str) {
        self.ad_groups.insert(
            id,
            AdGroupRecord {
                id,
                campaign_id,
                name: name.to_string(),
            },
        );
    }

    pub fn insert_stat(&self, stat: PlacementStat) {
        let id = self.next_stat_id.fetch_add(1, Ordering::Relaxed);
        self.stats.insert(id, stat);
    }

    /// Negative placements recorded against an ad group, in insertion order.
    pub fn negatives_for(&self, ad_group_id: AdGroupId) -> Vec<String> {
        self.negatives
            .get(&ad_group_id)
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }

    /// Members of a named exclusion list, if the list exists.
    pub fn list_members(&self, name: &str) -> Option<Vec<String>> {
        self.lists
            .iter()
            .filter(|entry| entry.value().name == name)
            .min_by_key(|entry| entry.value().id)
            .map(|entry| entry.value().urls.clone())
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    fn campaign_type_of(&self, ad_group_id: AdGroupId) -> Option<CampaignType> {
        let ad_group = self.ad_groups.get(&ad_group_id)?;
        let campaign = self.campaigns.get(&ad_group.campaign_id)?;
        Some(campaign.campaign_type)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSource for MemoryHost {
    fn placements<'a>(
        &'a self,
        query: &PlacementQuery,
    ) -> Result<Box<dyn Iterator<Item = PlacementRow> + 'a>, anyhow::Error> {
        // Aggregate impressions per (url, ad group) across the window, then
        // apply the threshold to the totals, the way the reporting engine
        // rolls up daily rows.
        let mut totals: BTreeMap<(String, AdGroupId), u64> = BTreeMap::new();
        for entry in self.stats.iter() {
            let stat = entry.value();
            if !query.contains_date(stat.date) {
                continue;
            }
            if !query.placement_types.contains(&stat.placement_type) {
                continue;
            }
            let Some(campaign_type) = self.campaign_type_of(stat.ad_group_id) else {
                continue;
            };
            if !query.campaign_types.contains(&campaign_type) {
                continue;
            }
            *totals
                .entry((stat.url.clone(), stat.ad_group_id))
                .or_insert(0) += stat.impressions;
        }

        let threshold = query.impression_threshold;
        let rows: Vec<PlacementRow> = totals
            .into_iter()
            .filter(|(_, impressions)| *impressions > threshold)
            .filter_map(|((url, ad_group_id), _)| {
                let campaign_id = self.ad_groups.get(&ad_group_id)?.campaign_id;
                Some(PlacementRow {
                    url,
                    campaign_id,
                    ad_group_id,
                })
            })
            .collect();

        Ok(Box::new(rows.into_iter()))
    }
}

impl AdsHost for MemoryHost {
    fn resolve_campaign(
        &self,
        id: CampaignId,
    ) -> Result<Option<CampaignRecord>, anyhow::Error> {
        Ok(self.campaigns.get(&id).map(|record| record.clone()))
    }

    fn resolve_ad_group(
        &self,
        campaign_id: CampaignId,
        id: AdGroupId,
    ) -> Result<Option<AdGroupRecord>, anyhow::Error> {
        Ok(self
            .ad_groups
            .get(&id)
            .filter(|record| record.campaign_id == campaign_id)
            .map(|record| record.clone()))
    }

    fn exclude_placement(&self, ad_group_id: AdGroupId, url: &str) -> Result<(), anyhow::Error> {
        if !self.ad_groups.contains_key(&ad_group_id) {
            return Err(anyhow!("ad group {ad_group_id} does not exist"));
        }
        let mut urls = self.negatives.entry(ad_group_id).or_default();
        if !urls.iter().any(|existing| existing == url) {
            urls.push(url.to_string());
        }
        Ok(())
    }

    fn find_list(&self, name: &str) -> Result<Option<ExclusionList>, anyhow::Error> {
        Ok(self
            .lists
            .iter()
            .filter(|entry| entry.value().name == name)
            .min_by_key(|entry| entry.value().id)
            .map(|entry| ExclusionList {
                id: entry.value().id,
                name: entry.value().name.clone(),
            }))
    }

    fn create_list(&self, name: &str) -> Result<ExclusionList, anyhow::Error> {
        let id = self.next_list_id.fetch_add(1, Ordering::Relaxed);
        self.lists.insert(
            id,
            ListRecord {
                id,
                name: name.to_string(),
                urls: Vec::new(),
            },
        );
        Ok(ExclusionList {
            id,
            name: name.to_string(),
        })
    }

    fn add_to_list(&self, list: &ExclusionList, url: &str) -> Result<(), anyhow::Error> {
        let mut record = self
            .lists
            .get_mut(&list.id)
            .ok_or_else(|| anyhow!("exclusion list {} does not exist", list.id))?;
        record.urls.push(url.to_string());
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use placement_core::AppConfig;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_host() -> MemoryHost {
        let host = MemoryHost::new();
        host.add_campaign(CampaignId(1), "Display", CampaignType::Display);
        host.add_campaign(CampaignId(2), "Demand Gen", CampaignType::DemandGen);
        host.add_ad_group(AdGroupId(10), CampaignId(1), "Display group");
        host.add_ad_group(AdGroupId(20), CampaignId(2), "DG group");
        host
    }

    fn stat(
        url: &str,
        ad_group: u64,
        placement_type: PlacementType,
        impressions: u64,
        date: NaiveDate,
    ) -> PlacementStat {
        PlacementStat {
            url: url.to_string(),
            ad_group_id: AdGroupId(ad_group),
            placement_type,
            impressions,
            date,
        }
    }

    fn query(threshold: u64) -> PlacementQuery {
        let config = AppConfig {
            impression_threshold: threshold,
            days_to_check: 7,
            ..AppConfig::default()
        };
        PlacementQuery::from_config(&config, day(2026, 8, 27))
    }

    #[test]
    fn test_report_filters_by_date_window() {
        let host = sample_host();
        host.insert_stat(stat("a.example", 10, PlacementType::Website, 50, day(2026, 8, 26)));
        host.insert_stat(stat("b.example", 10, PlacementType::Website, 50, day(2026, 8, 10)));

        let rows: Vec<_> = host.placements(&query(0)).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "a.example");
    }

    #[test]
    fn test_report_aggregates_across_days_before_threshold() {
        let host = sample_host();
        host.insert_stat(stat("a.example", 10, PlacementType::Website, 60, day(2026, 8, 24)));
        host.insert_stat(stat("a.example", 10, PlacementType::Website, 60, day(2026, 8, 25)));

        // Neither day alone clears 100, the window total does.
        let rows: Vec<_> = host.placements(&query(100)).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].campaign_id, CampaignId(1));
        assert_eq!(rows[0].ad_group_id, AdGroupId(10));
    }

    #[test]
    fn test_report_threshold_is_strict() {
        let host = sample_host();
        host.insert_stat(stat("a.example", 10, PlacementType::Website, 100, day(2026, 8, 26)));

        assert_eq!(host.placements(&query(100)).unwrap().count(), 0);
        assert_eq!(host.placements(&query(99)).unwrap().count(), 1);
    }

    #[test]
    fn test_report_filters_by_placement_and_campaign_type() {
        let host = sample_host();
        host.insert_stat(stat("site.example", 10, PlacementType::Website, 50, day(2026, 8, 26)));
        host.insert_stat(stat("some.app", 20, PlacementType::MobileApplication, 50, day(2026, 8, 26)));

        let config = AppConfig {
            placement_types: vec![PlacementType::Website],
            campaign_types: vec![CampaignType::Display],
            ..AppConfig::default()
        };
        let query = PlacementQuery::from_config(&config, day(2026, 8, 27));
        let rows: Vec<_> = host.placements(&query).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "site.example");
    }

    #[test]
    fn test_resolve_ad_group_requires_owning_campaign() {
        let host = sample_host();
        assert!(host
            .resolve_ad_group(CampaignId(1), AdGroupId(10))
            .unwrap()
            .is_some());
        // Right ad group, wrong campaign.
        assert!(host
            .resolve_ad_group(CampaignId(2), AdGroupId(10))
            .unwrap()
            .is_none());
        assert!(host.resolve_campaign(CampaignId(999)).unwrap().is_none());
    }

    #[test]
    fn test_exclude_placement_records_negative() {
        let host = sample_host();
        host.exclude_placement(AdGroupId(10), "spam.example").unwrap();
        host.exclude_placement(AdGroupId(10), "spam.example").unwrap();
        assert_eq!(host.negatives_for(AdGroupId(10)), vec!["spam.example"]);
        assert!(host.exclude_placement(AdGroupId(999), "x.example").is_err());
    }

    #[test]
    fn test_find_and_create_list() {
        let host = sample_host();
        assert!(host.find_list("Blocked").unwrap().is_none());
        let created = host.create_list("Blocked").unwrap();
        let found = host.find_list("Blocked").unwrap().unwrap();
        assert_eq!(created, found);
        host.add_to_list(&found, "spam.example").unwrap();
        assert_eq!(host.list_members("Blocked").unwrap(), vec!["spam.example"]);
    }

    #[test]
    fn test_fixture_round_trip() {
        let raw = r#"{
            "campaigns": [{"id": 1, "name": "Display", "campaign_type": "display"}],
            "ad_groups": [{"id": 10, "campaign_id": 1, "name": "Group"}],
            "placements": [{
                "url": "games.example",
                "ad_group_id": 10,
                "placement_type": "website",
                "impressions": 42,
                "date": "2026-08-26"
            }]
        }"#;
        let fixture = AccountFixture::from_json(raw).unwrap();
        let host = MemoryHost::from_fixture(fixture);
        let rows: Vec<_> = host.placements(&query(0)).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "games.example");
    }
}
