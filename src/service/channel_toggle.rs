//! Batch channel renames for world event presentation.
//!
//! Renames are applied one channel at a time. Each entry's outcome is recorded
//! independently and a failure never aborts the rest of the batch; the caller decides
//! what to do with partially applied batches from the returned [`RenameReport`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::external::ExternalError,
    model::channel::{ChannelInfo, ChannelRenameMapping, RenameOutcome, RenameReport},
};

/// Channel lookup and rename operations the toggle depends on.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Resolves a channel's current name and whether the bot may manage it.
    async fn fetch(&self, channel_id: u64) -> Result<ChannelInfo, ExternalError>;

    /// Renames a channel.
    async fn rename(&self, channel_id: u64, name: &str) -> Result<(), ExternalError>;
}

pub struct ChannelPresentationToggle {
    directory: Arc<dyn ChannelDirectory>,
}

impl ChannelPresentationToggle {
    pub fn new(directory: Arc<dyn ChannelDirectory>) -> Self {
        Self { directory }
    }

    /// Applies a rename mapping.
    ///
    /// For each entry: resolve the channel, verify rename permission, skip when the
    /// name already matches, otherwise rename.
    ///
    /// # Arguments
    /// - `mapping` - Target name per channel ID
    ///
    /// # Returns
    /// - `RenameReport` - Outcome per channel; `updated_channels()` lists the channels
    ///   now carrying their target name
    pub async fn apply(&self, mapping: &ChannelRenameMapping) -> RenameReport {
        let mut report = RenameReport::default();

        for (channel_id, target_name) in mapping {
            let outcome = self.apply_one(*channel_id, target_name).await;

            match &outcome {
                RenameOutcome::Renamed => {
                    tracing::info!("Renamed channel {} to '{}'", channel_id, target_name)
                }
                RenameOutcome::Unchanged => {
                    tracing::debug!("Channel {} already named '{}'", channel_id, target_name)
                }
                RenameOutcome::PermissionDenied => {
                    tracing::warn!("Missing permission to rename channel {}", channel_id)
                }
                RenameOutcome::NotFound => {
                    tracing::warn!("Channel {} not found, skipping rename", channel_id)
                }
                RenameOutcome::Transient(e) => {
                    tracing::error!("Failed to rename channel {}: {}", channel_id, e)
                }
            }

            report.outcomes.insert(*channel_id, outcome);
        }

        report
    }

    async fn apply_one(&self, channel_id: u64, target_name: &str) -> RenameOutcome {
        let channel = match self.directory.fetch(channel_id).await {
            Ok(channel) => channel,
            Err(e) => return Self::outcome_from_error(e),
        };

        if !channel.can_manage {
            return RenameOutcome::PermissionDenied;
        }

        if channel.name == target_name {
            return RenameOutcome::Unchanged;
        }

        match self.directory.rename(channel_id, target_name).await {
            Ok(()) => RenameOutcome::Renamed,
            Err(e) => Self::outcome_from_error(e),
        }
    }

    fn outcome_from_error(err: ExternalError) -> RenameOutcome {
        match err {
            ExternalError::NotFound(_) => RenameOutcome::NotFound,
            ExternalError::PermissionDenied(_) => RenameOutcome::PermissionDenied,
            ExternalError::Transient(message) => RenameOutcome::Transient(message),
        }
    }
}
