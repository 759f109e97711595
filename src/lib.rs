//! Replay of simulated device mobility with network-role overlays.
//!
//! Takes the per-device position traces written by a MANET simulator and
//! turns them, together with a role configuration (flooding progress or an
//! MPR hierarchy), into a deterministic, ordered sequence of drawable scenes
//! handed one at a time to an external renderer.
//!
//! Pipeline: [`TrajectoryStore`] → [`FrameSequence`] → per step
//! [`RoleClassifier`] + [`SceneComposer`] → [`AnimationDriver`] → a
//! [`Renderer`] implementation such as [`MsgpackSceneSink`].

pub mod config;
pub mod device;
pub mod driver;
pub mod error;
pub mod frame;
pub mod role;
pub mod scene;
pub mod sink;
pub mod store;
pub mod style;

pub use config::ReplayConfig;
pub use device::{Device, DeviceId, Position};
pub use driver::{AnimationDriver, Renderer, RunFlag};
pub use error::{ReplayError, Result};
pub use frame::{Frame, FrameSequence};
pub use role::{EdgeKind, HierarchyEdge, Role, RoleClassifier, RoleConfig, RoleMap};
pub use scene::{Bounds, ComposerOptions, Edge, LegendEntry, Marker, Scene, SceneComposer};
pub use sink::MsgpackSceneSink;
pub use store::{CsvDirSource, TrajectorySource, TrajectoryStore};
pub use style::{Color, LineStyle, MarkerStyle};
