use crate::error::TransportError;
use async_trait::async_trait;
use emucast_core::StatusReport;
use emucast_core::proto::EmulatorStatus;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    async fn fetch_status(&self) -> Result<EmulatorStatus, TransportError>;
}

/// Caches the last emulator status snapshot.
pub struct StatusMonitor<S: StatusSource> {
    source: Arc<S>,
    status: Mutex<Option<StatusReport>>,
}

impl<S: StatusSource> StatusMonitor<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            status: Mutex::new(None),
        }
    }

    /// Last fetched snapshot, if any.
    pub fn status(&self) -> Option<StatusReport> {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches a fresh snapshot and caches it. A failed fetch keeps the
    /// previous snapshot.
    pub async fn update(&self) -> Result<StatusReport, TransportError> {
        let report = StatusReport::from(self.source.fetch_status().await?);
        debug!(
            "Emulator {} booted={} uptime={}ms",
            report.version, report.booted, report.uptime_ms
        );
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        Ok(report)
    }
}
