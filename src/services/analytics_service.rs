//! Analytics service layer
//!
//! 从活动日志实时聚合单个短链接的访问统计：来源、设备（操作系统）、浏览器。
//! 每次调用 O(n)，不做缓存。

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::user_agent;
use crate::errors::{LinkhubError, Result};
use crate::storage::{ActivityLevel, ActivityType, FindActivity, ShortcutViewPayload, Store};

/// 单个分组桶
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsItem {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutAnalytics {
    pub references: Vec<AnalyticsItem>,
    pub devices: Vec<AnalyticsItem>,
    pub browsers: Vec<AnalyticsItem>,
}

fn into_sorted_items(counts: HashMap<String, u64>) -> Vec<AnalyticsItem> {
    let mut items: Vec<AnalyticsItem> = counts
        .into_iter()
        .map(|(name, count)| AnalyticsItem { name, count })
        .collect();
    // 按次数升序，相同次数的顺序不保证
    items.sort_unstable_by_key(|item| item.count);
    items
}

/// Reduce view payloads into the three groupings.
///
/// Empty referers form their own bucket.
pub fn aggregate_payloads<I>(payloads: I) -> ShortcutAnalytics
where
    I: IntoIterator<Item = ShortcutViewPayload>,
{
    let mut references: HashMap<String, u64> = HashMap::new();
    let mut devices: HashMap<String, u64> = HashMap::new();
    let mut browsers: HashMap<String, u64> = HashMap::new();

    for payload in payloads {
        let family = user_agent::classify(&payload.user_agent);
        *references.entry(payload.referer).or_insert(0) += 1;
        *devices.entry(family.os).or_insert(0) += 1;
        *browsers.entry(family.browser).or_insert(0) += 1;
    }

    ShortcutAnalytics {
        references: into_sorted_items(references),
        devices: into_sorted_items(devices),
        browsers: into_sorted_items(browsers),
    }
}

/// Filter matching the view records of one shortcut
pub fn shortcut_view_filter(shortcut_id: i32) -> FindActivity {
    FindActivity {
        activity_type: Some(ActivityType::ShortcutView),
        level: Some(ActivityLevel::Info),
        shortcut_id: Some(shortcut_id),
        collection_id: None,
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn Store>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn aggregate_views(&self, shortcut_id: i32) -> Result<ShortcutAnalytics> {
        let activities = self
            .store
            .list_activities(&shortcut_view_filter(shortcut_id))
            .await?;

        debug!(
            "Analytics: aggregating {} view records for shortcut {}",
            activities.len(),
            shortcut_id
        );

        let payloads = activities
            .iter()
            .map(|activity| {
                serde_json::from_str::<ShortcutViewPayload>(&activity.payload).map_err(|e| {
                    error!("Activity {} has a malformed payload: {}", activity.id, e);
                    LinkhubError::internal(format!(
                        "failed to decode activity {} payload: {}",
                        activity.id, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(aggregate_payloads(payloads))
    }

    /// Derived view count, never stored
    pub async fn view_count(&self, shortcut_id: i32) -> Result<u64> {
        self.store
            .count_activities(&shortcut_view_filter(shortcut_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(referer: &str, user_agent: &str) -> ShortcutViewPayload {
        ShortcutViewPayload {
            shortcut_id: 1,
            ip: "127.0.0.1".to_string(),
            referer: referer.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_empty_input() {
        let analytics = aggregate_payloads(Vec::new());
        assert!(analytics.references.is_empty());
        assert!(analytics.devices.is_empty());
        assert!(analytics.browsers.is_empty());
    }

    #[test]
    fn test_same_referer_single_bucket() {
        let analytics = aggregate_payloads((0..5).map(|_| view("https://news.ycombinator.com", CHROME)));
        assert_eq!(
            analytics.references,
            vec![AnalyticsItem {
                name: "https://news.ycombinator.com".to_string(),
                count: 5
            }]
        );
        assert_eq!(analytics.browsers.len(), 1);
        assert_eq!(analytics.browsers[0].name, "Chrome");
    }

    #[test]
    fn test_groupings_sorted_ascending() {
        let payloads = vec![
            view("", FIREFOX),
            view("https://a.example", CHROME),
            view("https://a.example", CHROME),
            view("https://a.example", CHROME),
        ];
        let analytics = aggregate_payloads(payloads);

        let counts: Vec<u64> = analytics.references.iter().map(|i| i.count).collect();
        assert_eq!(counts, vec![1, 3]);
        assert_eq!(analytics.references[0].name, "");

        let browsers: Vec<&str> = analytics.browsers.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(browsers, vec!["Firefox", "Chrome"]);
        assert_eq!(analytics.devices[0].name, "Linux");
    }

    #[test]
    fn test_unrecognised_agent_is_unknown() {
        let analytics = aggregate_payloads(vec![view("", "")]);
        assert_eq!(analytics.devices[0].name, user_agent::UNKNOWN);
        assert_eq!(analytics.browsers[0].name, user_agent::UNKNOWN);
    }
}
