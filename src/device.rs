//! Device identity and recorded motion.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Index of one simulated device. Devices are numbered `0..num_devices`.
#[derive(
    Display, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, From, Serialize, Deserialize,
)]
pub struct DeviceId(pub usize);

/// A single recorded coordinate sample.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A device together with its full recorded trajectory, one sample per frame.
///
/// Immutable once the store has validated it; all mutation happens in the
/// external simulator that wrote the trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    trajectory: Vec<Position>,
}

impl Device {
    pub fn new(id: DeviceId, trajectory: Vec<Position>) -> Self {
        Self { id, trajectory }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// Position at a frame index. The store guarantees every frame index
    /// below its frame count is present for every device.
    pub fn position(&self, frame: usize) -> Position {
        self.trajectory[frame]
    }

    pub fn trajectory(&self) -> &[Position] {
        &self.trajectory
    }
}
