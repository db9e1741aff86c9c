//! In-memory caching using moka
//!
//! Holds tour listings mirrored from the booking backend, keyed by tour id.
//! Entries expire on a TTL; an evicted listing must be pushed again.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::TourListing;

/// Application cache holding tour listings
#[derive(Clone)]
pub struct AppCache {
    /// Tour listings (tour_id -> TourListing)
    pub tours: Cache<Uuid, Arc<TourListing>>,
}

impl AppCache {
    /// Create a new cache instance with the given capacity and TTL
    pub fn new(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            tours: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tour_cache_capacity, config.tour_cache_ttl)
    }

    pub async fn get_tour(&self, tour_id: Uuid) -> Option<Arc<TourListing>> {
        let tour = self.tours.get(&tour_id).await;
        match tour {
            Some(_) => tracing::debug!("Cache HIT for tour: {}", tour_id),
            None => tracing::debug!("Cache MISS for tour: {}", tour_id),
        }
        tour
    }

    pub async fn put_tour(&self, tour: TourListing) -> Arc<TourListing> {
        let tour = Arc::new(tour);
        self.tours.insert(tour.tour_id, tour.clone()).await;
        info!("Cached tour: {}", tour.tour_id);
        tour
    }

    /// Remove a tour, returning whether it was cached
    pub async fn invalidate_tour(&self, tour_id: Uuid) -> bool {
        let removed = self.tours.remove(&tour_id).await.is_some();
        if removed {
            info!("Cache invalidated for tour: {}", tour_id);
        }
        removed
    }

    /// Snapshot of all cached tours, ordered by start date
    pub fn all_tours(&self) -> Vec<Arc<TourListing>> {
        let mut tours: Vec<Arc<TourListing>> =
            self.tours.iter().map(|(_, tour)| tour).collect();
        tours.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        tours
    }

    /// Get cache statistics for monitoring
    pub async fn stats(&self) -> CacheStats {
        self.tours.run_pending_tasks().await;
        CacheStats {
            tours_size: self.tours.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.tours.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub tours_size: u64,
}
