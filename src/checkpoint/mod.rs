//! Snapshot and restore of gate state.
//!
//! The subscriber map, admin and event journal must outlive any single
//! process. A [`GateSnapshot`] captures them, together with the frozen
//! configuration, in JSON or compact binary form. Collaborators (ledger,
//! venue, clock) are not part of a snapshot and are supplied on restore.

pub mod error;

pub use error::CheckpointError;

use crate::builder::GateBuilder;
use crate::clock::Clock;
use crate::config::GateConfig;
use crate::core::{AccountId, EventLog, Expiry};
use crate::gate::{GateState, SubscriptionGate};
use crate::ledger::Ledger;
use crate::venue::SwapVenue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable image of a gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub config: GateConfig,

    /// Every identity that has ever subscribed, with its latest expiry
    pub subscribers: BTreeMap<AccountId, Expiry>,

    pub events: EventLog,
}

impl SubscriptionGate {
    /// Capture the gate's current state.
    pub fn snapshot(&self) -> GateSnapshot {
        let (subscribers, events) = self.export_state();
        GateSnapshot {
            version: SNAPSHOT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            config: self.config().clone(),
            subscribers: subscribers.into_iter().collect(),
            events,
        }
    }
}

impl GateSnapshot {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check version and internal consistency.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if let Some(blank) = self.subscribers.keys().find(|account| account.is_blank()) {
            return Err(CheckpointError::Corrupt(format!(
                "blank subscriber identity '{blank}'"
            )));
        }
        if self.subscribers.values().any(Expiry::is_never) {
            return Err(CheckpointError::Corrupt(
                "subscriber entry without an expiry".to_string(),
            ));
        }
        Ok(())
    }

    /// Rebuild a gate from this snapshot with fresh collaborators.
    ///
    /// `venue` may be `None` for gates running in plugin mode.
    pub fn restore(
        self,
        ledger: Arc<dyn Ledger>,
        venue: Option<Arc<dyn SwapVenue>>,
        clock: Arc<dyn Clock>,
    ) -> Result<SubscriptionGate, CheckpointError> {
        self.validate()?;

        let state = GateState {
            subscribers: self.subscribers.into_iter().collect(),
            events: self.events,
        };
        let mut builder = GateBuilder::from_config(self.config)
            .ledger(ledger)
            .clock(clock)
            .with_state(state);
        if let Some(venue) = venue {
            builder = builder.attach_venue(venue);
        }

        let gate = builder.build()?;
        info!(snapshot = %self.id, "gate restored from snapshot");
        Ok(gate)
    }
}
