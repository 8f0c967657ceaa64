//! Lazily loaded region resolver.
//!
//! Holds the reference dataset behind a swappable `Arc` and answers fuzzy
//! `(province, city, district)` lookups with a deterministic scoring policy.
//! The dataset is fetched at most once per load cycle: the first caller to
//! find it absent performs the download, concurrent callers poll for the
//! result instead of re-triggering it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::sleep;

use super::dataset::{RawDataset, RegionDataset};
use super::interner::StringInterner;
use super::suffix::normalize_province;
use crate::errors::ResolveError;
use crate::http::build_client;
use crate::models::{Candidate, RegionMatch};

/// Dataset download timeout.
const LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Delay between polls while another caller's load is in flight.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls before a waiter gives up; covers the download timeout.
const LOAD_WAIT_POLLS: u32 = 150;

/// Scoring bonus when a candidate's parent region contains the queried
/// province.
const PROVINCE_BONUS: i32 = 100;

/// Scoring bonus when a candidate's name equals the lookup key exactly.
const EXACT_NAME_BONUS: i32 = 50;

/// Resolver configuration. Loading it from disk is a collaborator's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Endpoint serving the region dataset JSON.
    pub dataset_url: String,
}

/// Outcome of the most recent dataset load attempts, for collaborators that
/// surface load health.
#[derive(Debug, Clone, Default)]
pub struct LoadHealth {
    pub last_error: Option<String>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_loaded_at: Option<DateTime<Utc>>,
}

/// Process-wide region resolver.
///
/// Collaborators hold one instance (typically in an `Arc`) and call
/// [`resolve`](Self::resolve) concurrently; the dataset is loaded lazily on
/// first use and kept until [`reset`](Self::reset).
pub struct RegionResolver {
    config: ResolverConfig,
    client: Client,
    interner: StringInterner,
    dataset: RwLock<Option<Arc<RegionDataset>>>,
    loading: AtomicBool,
    health: RwLock<LoadHealth>,
}

impl RegionResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            client: build_client(LOAD_TIMEOUT, false),
            config,
            interner: StringInterner::new(),
            dataset: RwLock::new(None),
            loading: AtomicBool::new(false),
            health: RwLock::new(LoadHealth::default()),
        }
    }

    /// Resolve a query to a single region match.
    ///
    /// `district` takes precedence over `city`; the suffixes of
    /// administrative divisions are stripped from `province` before
    /// matching. Suspends until the dataset load completes or the wait
    /// window lapses.
    pub async fn resolve(
        &self,
        province: &str,
        city: &str,
        district: &str,
    ) -> Result<RegionMatch, ResolveError> {
        let dataset = self
            .ensure_loaded()
            .await
            .ok_or(ResolveError::DataUnavailable)?;
        resolve_in(&dataset, province, city, district)
    }

    /// Resolve and serialize as the canonical `{code,name,province}` payload.
    pub async fn resolve_json(
        &self,
        province: &str,
        city: &str,
        district: &str,
    ) -> Result<String, ResolveError> {
        let matched = self.resolve(province, city, district).await?;
        Ok(serde_json::to_string(&matched)?)
    }

    /// Drop the cached dataset; the next resolve reloads it.
    ///
    /// Safe to call concurrently with in-flight resolves: a resolve that
    /// already captured a snapshot keeps using it.
    pub async fn reset(&self) {
        *self.dataset.write().await = None;
        info!("Region dataset cache cleared");
    }

    /// Health of recent dataset load attempts.
    pub async fn load_health(&self) -> LoadHealth {
        self.health.read().await.clone()
    }

    async fn snapshot(&self) -> Option<Arc<RegionDataset>> {
        self.dataset.read().await.clone()
    }

    /// Return the dataset, loading it if absent.
    ///
    /// Exactly one caller per load cycle performs the download (the loser of
    /// the `loading` gate polls). Load failures are swallowed here and
    /// recorded in [`LoadHealth`]; the caller sees `None` and the next
    /// resolve retries.
    async fn ensure_loaded(&self) -> Option<Arc<RegionDataset>> {
        if let Some(dataset) = self.snapshot().await {
            return Some(dataset);
        }

        if self.loading.swap(true, Ordering::AcqRel) {
            return self.wait_for_load().await;
        }

        match self.load_dataset().await {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                *self.dataset.write().await = Some(dataset.clone());
                let now = Some(Utc::now());
                let mut health = self.health.write().await;
                health.last_error = None;
                health.last_attempt_at = now;
                health.last_loaded_at = now;
                info!("Region dataset loaded: {} keys", dataset.len());
            }
            Err(e) => {
                warn!("Region dataset load failed: {}", e);
                let mut health = self.health.write().await;
                health.last_error = Some(e.to_string());
                health.last_attempt_at = Some(Utc::now());
            }
        }
        self.loading.store(false, Ordering::Release);

        self.snapshot().await
    }

    async fn wait_for_load(&self) -> Option<Arc<RegionDataset>> {
        for _ in 0..LOAD_WAIT_POLLS {
            sleep(LOAD_POLL_INTERVAL).await;
            if let Some(dataset) = self.snapshot().await {
                return Some(dataset);
            }
            if !self.loading.load(Ordering::Acquire) {
                // The loader finished without producing a dataset.
                break;
            }
        }
        self.snapshot().await
    }

    async fn load_dataset(&self) -> Result<RegionDataset, reqwest::Error> {
        debug!("Loading region dataset from {}", self.config.dataset_url);
        let raw: RawDataset = self
            .client
            .get(&self.config.dataset_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(RegionDataset::from_raw(raw, &self.interner))
    }
}

/// Pure lookup against a dataset snapshot.
fn resolve_in(
    dataset: &RegionDataset,
    province: &str,
    city: &str,
    district: &str,
) -> Result<RegionMatch, ResolveError> {
    let province = normalize_province(province);
    let city = city.trim();
    let district = district.trim();

    if city.is_empty() && district.is_empty() {
        return Err(ResolveError::InvalidQuery);
    }

    let (candidates, target) = [district, city]
        .into_iter()
        .filter(|key| !key.is_empty())
        .find_map(|key| dataset.lookup(key).map(|found| (found, key)))
        .ok_or_else(|| {
            let missed = if district.is_empty() { city } else { district };
            ResolveError::NotFound(missed.to_string())
        })?;

    let winner = pick_candidate(candidates, &province, target);
    Ok(RegionMatch {
        code: winner.code.to_string(),
        name: winner.name.to_string(),
        province: winner.parent.to_string(),
    })
}

fn score(candidate: &Candidate, province: &str, target: &str) -> i32 {
    let mut score = 0;
    if candidate.parent.contains(province) {
        score += PROVINCE_BONUS;
    }
    if candidate.name.as_ref() == target {
        score += EXACT_NAME_BONUS;
    }
    // Shorter, more specific names break remaining ties.
    score - candidate.name.chars().count() as i32
}

/// Highest score wins; the first candidate in load order wins ties.
fn pick_candidate<'a>(candidates: &'a [Candidate], province: &str, target: &str) -> &'a Candidate {
    // Candidate lists are non-empty by construction.
    let mut best = &candidates[0];
    let mut best_score = score(best, province, target);
    for candidate in &candidates[1..] {
        let candidate_score = score(candidate, province, target);
        if candidate_score > best_score {
            best = candidate;
            best_score = candidate_score;
        }
    }
    best
}
