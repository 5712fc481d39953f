//! City Knowledge Store: two-tier flat-file lookup with in-memory caching.
//!
//! Tier 1 is an aggregate dataset (`cities.json`, all cities in one map),
//! attempted at most once per process; a failed load is remembered and never
//! retried. Tier 2 is one `<city>.json` file per city. Successful lookups
//! land in a per-city cache that is never evicted; the city set is closed
//! and small, and cached records are immutable.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::knowledge::models::CityInfo;

/// Aggregate dataset file, checked before per-city files.
const AGGREGATE_FILE: &str = "cities.json";

/// Flat-file knowledge source. Each instance owns its caches; concurrent
/// first-time population of the same city is tolerated: both writers store
/// the same immutable value.
pub struct KnowledgeStore {
    dir: PathBuf,
    cities: DashMap<String, Arc<CityInfo>>,
    aggregate: OnceCell<Option<HashMap<String, Arc<CityInfo>>>>,
}

impl KnowledgeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cities: DashMap::new(),
            aggregate: OnceCell::new(),
        }
    }

    /// Looks up verified knowledge for a city.
    ///
    /// Returns `None` when no knowledge is available. Not an error
    /// condition: callers degrade to a general-knowledge prompt.
    pub async fn lookup(&self, city: &str) -> Option<Arc<CityInfo>> {
        let key = normalize(city)?;

        if let Some(info) = self.cities.get(&key) {
            return Some(Arc::clone(&info));
        }

        if let Some(aggregate) = self.aggregate().await {
            if let Some(info) = aggregate.get(&key) {
                let info = Arc::clone(info);
                self.cities.insert(key, Arc::clone(&info));
                return Some(info);
            }
        }

        let info = self.load_city_file(&key).await?;
        self.cities.insert(key, Arc::clone(&info));
        Some(info)
    }

    /// Cities with verified knowledge available: aggregate keys plus
    /// per-city file stems, deduplicated and sorted.
    pub async fn known_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = match self.aggregate().await {
            Some(aggregate) => aggregate.keys().cloned().collect(),
            None => Vec::new(),
        };

        if let Ok(mut entries) = tokio::fs::read_dir(&self.dir).await {
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.file_name().and_then(|n| n.to_str()) == Some(AGGREGATE_FILE) {
                    continue;
                }
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    cities.push(stem.to_lowercase());
                }
            }
        }

        cities.sort();
        cities.dedup();
        cities
    }

    async fn aggregate(&self) -> Option<&HashMap<String, Arc<CityInfo>>> {
        let path = self.dir.join(AGGREGATE_FILE);
        self.aggregate
            .get_or_init(|| load_aggregate(path))
            .await
            .as_ref()
    }

    async fn load_city_file(&self, key: &str) -> Option<Arc<CityInfo>> {
        let path = self.dir.join(format!("{key}.json"));
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                // City unknown, distinct from the malformed-content case below
                debug!("No knowledge file for city '{key}': {e}");
                return None;
            }
        };

        match serde_json::from_str::<CityInfo>(&raw) {
            Ok(info) => Some(Arc::new(info)),
            Err(e) => {
                warn!("Malformed knowledge file {}: {e}", path.display());
                None
            }
        }
    }
}

/// Loads and parses the aggregate dataset. Called at most once per store;
/// both a missing file and malformed content resolve to `None`, and the
/// outcome is pinned by the caller's `OnceCell` for the process lifetime.
async fn load_aggregate(path: PathBuf) -> Option<HashMap<String, Arc<CityInfo>>> {
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("No aggregate dataset at {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<HashMap<String, CityInfo>>(&raw) {
        Ok(map) => {
            info!("Loaded aggregate dataset ({} cities)", map.len());
            Some(
                map.into_iter()
                    .map(|(k, v)| (k.to_lowercase(), Arc::new(v)))
                    .collect(),
            )
        }
        Err(e) => {
            warn!("Malformed aggregate dataset {}: {e}", path.display());
            None
        }
    }
}

/// Case-folds a city identifier. Identifiers are city names, not paths;
/// anything that could escape the knowledge directory is treated as unknown.
fn normalize(city: &str) -> Option<String> {
    let key = city.trim().to_lowercase();
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return None;
    }
    Some(key)
}
