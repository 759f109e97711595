//! Loading and validation of per-device trajectory sources.

use crate::device::{Device, DeviceId, Position};
use crate::error::{ReplayError, Result};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Access to one device's recorded trajectory.
///
/// The store is generic over the source so tests and alternative trace
/// layouts can supply trajectories without touching the filesystem.
pub trait TrajectorySource {
    fn read(&self, id: DeviceId) -> Result<Vec<Position>>;
}

/// Reads the simulator's per-device CSV output: `<dir>/<prefix><id>.csv`,
/// a header naming an `x` and a `y` column, then one row per frame.
pub struct CsvDirSource {
    dir: PathBuf,
    prefix: String,
}

impl CsvDirSource {
    /// Source using the simulator's default `dev_pos<id>.csv` naming.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, "dev_pos")
    }

    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    fn path_for(&self, id: DeviceId) -> PathBuf {
        self.dir.join(format!("{}{}.csv", self.prefix, id))
    }
}

impl TrajectorySource for CsvDirSource {
    fn read(&self, id: DeviceId) -> Result<Vec<Position>> {
        let path = self.path_for(id);
        let data = fs::read_to_string(&path).map_err(|err| ReplayError::DataNotFound {
            device: id,
            path: path.clone(),
            reason: err.to_string(),
        })?;
        parse_trajectory(&data).map_err(|reason| ReplayError::DataNotFound {
            device: id,
            path,
            reason,
        })
    }
}

/// Parse the two named numeric columns out of comma-separated text.
/// The simulator writes a space after each comma; tolerate it. Columns
/// beyond `x` and `y` are ignored.
fn parse_trajectory(data: &str) -> std::result::Result<Vec<Position>, String> {
    let mut lines = data.lines();
    let header = lines.next().ok_or_else(|| "empty file".to_string())?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let col_of = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| format!("header {header:?} has no {name:?} column"))
    };
    let x_col = col_of("x")?;
    let y_col = col_of("y")?;

    let mut samples = Vec::new();
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parse = |col: usize| -> std::result::Result<f64, String> {
            fields
                .get(col)
                .ok_or_else(|| format!("row {} has no column {}", i + 2, col))?
                .parse::<f64>()
                .map_err(|err| format!("row {}: {}", i + 2, err))
        };
        samples.push(Position::new(parse(x_col)?, parse(y_col)?));
    }
    Ok(samples)
}

/// The validated, immutable device table shared by the rest of the pipeline.
#[derive(Debug)]
pub struct TrajectoryStore {
    devices: Vec<Device>,
    num_frames: usize,
}

impl TrajectoryStore {
    /// Load `num_devices` trajectories from `source`.
    ///
    /// Fails without returning a partial store if any source is unavailable
    /// or if trajectory lengths disagree across devices.
    pub fn load(source: &impl TrajectorySource, num_devices: usize) -> Result<Self> {
        let mut devices = Vec::with_capacity(num_devices);
        for i in 0..num_devices {
            let id = DeviceId(i);
            let trajectory = source.read(id)?;
            debug!("device {id}: {} samples", trajectory.len());
            devices.push(Device::new(id, trajectory));
        }
        Self::from_devices(devices)
    }

    /// Validate an already-materialized device table.
    pub fn from_devices(devices: Vec<Device>) -> Result<Self> {
        let num_frames = devices.first().map(Device::len).unwrap_or(0);
        for device in &devices {
            if device.len() != num_frames {
                return Err(ReplayError::InconsistentTrajectory {
                    device: device.id(),
                    len: device.len(),
                    expected: num_frames,
                });
            }
        }
        info!(
            "loaded {} devices with {num_frames} frames each",
            devices.len()
        );
        Ok(Self {
            devices,
            num_frames,
        })
    }

    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Common trajectory length across all devices.
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}
