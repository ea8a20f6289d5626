//! Collector service: records pixel hits and fingerprints.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;

use pixeltrace_core::config::AppConfig;
use pixeltrace_core::config::collector::CollectorConfig;
use pixeltrace_core::result::AppResult;
use pixeltrace_core::types::{FingerprintRecord, PixelRecord, TrackRecord, iso_timestamp};

use crate::context::ClientContext;
use crate::log::TrackLog;
use crate::lookup::{
    BuiltinUserAgentParser, DisabledGeoLocator, GeoLocator, HttpGeoLocator, UserAgentParser,
};
use crate::record::PixelHit;
use crate::store::TrackStore;

/// Builds records from request metadata and keeps them in the store.
#[derive(Debug, Clone)]
pub struct CollectorService {
    store: Arc<TrackStore>,
    geo: Arc<dyn GeoLocator>,
    ua_parser: Arc<dyn UserAgentParser>,
    config: CollectorConfig,
}

impl CollectorService {
    /// Creates a collector from explicit parts.
    pub fn new(
        store: Arc<TrackStore>,
        geo: Arc<dyn GeoLocator>,
        ua_parser: Arc<dyn UserAgentParser>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            store,
            geo,
            ua_parser,
            config,
        }
    }

    /// Opens the tracking log and selects lookups according to configuration.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let log = TrackLog::open(&config.collector.log_file).await?;
        let store = Arc::new(TrackStore::new(log));

        let geo: Arc<dyn GeoLocator> = if config.geolocation.enabled {
            info!(endpoint = %config.geolocation.endpoint, "Geolocation lookups enabled");
            Arc::new(HttpGeoLocator::new(&config.geolocation)?)
        } else {
            Arc::new(DisabledGeoLocator)
        };

        Ok(Self::new(
            store,
            geo,
            Arc::new(BuiltinUserAgentParser),
            config.collector.clone(),
        ))
    }

    /// Builds a pixel record, writes it to the tracking log, and stores it.
    ///
    /// A log write failure is returned and nothing is stored.
    pub async fn record_pixel(&self, hit: PixelHit, client: ClientContext) -> AppResult<PixelRecord> {
        let timestamp = iso_timestamp(Utc::now());
        let parsed_ua = self
            .ua_parser
            .parse(client.user_agent.as_deref().unwrap_or_default());
        let geolocation = self.geo.locate(&client.ip).await;

        let record = hit.into_record(client, parsed_ua, geolocation, &self.config, timestamp);

        let total = self
            .store
            .append_logged(TrackRecord::Pixel(record.clone()))
            .await?;

        info!(
            record = %serde_json::to_string(&record)?,
            total,
            "PIXEL HIT"
        );

        Ok(record)
    }

    /// Merges a posted payload with the caller's address and stores it.
    pub async fn record_fingerprint(
        &self,
        payload: Map<String, Value>,
        ip: String,
    ) -> FingerprintRecord {
        let record = FingerprintRecord::from_payload(payload, ip, iso_timestamp(Utc::now()));
        let total = self
            .store
            .append(TrackRecord::Fingerprint(record.clone()))
            .await;

        info!(
            uid = %record.uid,
            ip = %record.ip,
            attributes = record.attributes.len(),
            total,
            "Fingerprint received"
        );

        record
    }

    /// All stored records in arrival order.
    pub async fn records(&self) -> Vec<TrackRecord> {
        self.store.snapshot().await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    /// Drops every stored record; returns how many were removed.
    pub async fn clear(&self) -> usize {
        self.store.clear().await
    }
}
