//! Error taxonomy for the replay pipeline.
//!
//! Load and validation failures are raised eagerly, before any scene is
//! composed, so a caller never receives a partially-correct animation.

use crate::device::DeviceId;
use crate::role::Role;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    /// A device's trajectory source is missing, unreadable, or malformed.
    #[error("trajectory source for device {device} unavailable ({path:?}): {reason}")]
    DataNotFound {
        device: DeviceId,
        path: PathBuf,
        reason: String,
    },

    /// Trajectory lengths differ across devices.
    #[error("device {device} has {len} frames where {expected} were expected")]
    InconsistentTrajectory {
        device: DeviceId,
        len: usize,
        expected: usize,
    },

    /// A role configuration references a device id outside `0..num_devices`.
    #[error("role \"{role}\" references device {device}, but only {num_devices} devices are loaded")]
    InvalidRoleReference {
        role: Role,
        device: DeviceId,
        num_devices: usize,
    },

    /// A role configuration is structurally broken, independent of the
    /// device table (e.g. mismatched parallel lists).
    #[error("malformed role configuration: {0}")]
    MalformedRoleConfig(String),

    /// The external renderer failed; surfaced opaquely, never interpreted.
    #[error("renderer failed during export: {0:#}")]
    RenderExport(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ReplayError>;
