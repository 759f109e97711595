//! Transposition of device-major trajectories into frame-major snapshots.

use crate::device::{DeviceId, Position};
use crate::store::TrajectoryStore;

/// One time instant: every device's position at a single frame index.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: usize,
    /// Indexed by device id.
    positions: Vec<Position>,
}

impl Frame {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num_devices(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, id: DeviceId) -> Position {
        self.positions[id.0]
    }

    /// All positions in ascending device-id order.
    pub fn positions(&self) -> impl Iterator<Item = (DeviceId, Position)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (DeviceId(i), *p))
    }
}

/// Lazy, restartable view of the store as an ordered sequence of frames.
///
/// Frames are materialized one at a time; iterating again starts over from
/// frame zero.
pub struct FrameSequence<'a> {
    store: &'a TrajectoryStore,
}

impl<'a> FrameSequence<'a> {
    pub fn new(store: &'a TrajectoryStore) -> Self {
        Self { store }
    }

    /// Number of frames, equal to the store's common trajectory length.
    pub fn len(&self) -> usize {
        self.store.num_frames()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize a single frame. O(num_devices).
    pub fn frame(&self, index: usize) -> Frame {
        Frame {
            index,
            positions: self
                .store
                .devices()
                .iter()
                .map(|d| d.position(index))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Frame> + '_ {
        (0..self.len()).map(|i| self.frame(i))
    }
}
