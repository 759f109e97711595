//! Scene composition: one frame plus one role map into drawable primitives.
//!
//! A scene is rebuilt from scratch every step and fully determined by its
//! inputs; the composer holds only static configuration. Draw order is fixed
//! so higher-priority roles are never occluded by lower ones.

use crate::device::{DeviceId, Position};
use crate::frame::Frame;
use crate::role::{EdgeKind, Role, RoleMap};
use crate::style::{self, LineStyle, MarkerStyle, BASE_MARKER};
use serde::{Deserialize, Serialize};

/// Marker draw passes, lowest priority first. The base pass for all devices
/// and the edge pass precede these.
const DRAW_ORDER: [Role; 5] = [
    Role::TwoHop,
    Role::Neighbor,
    Role::Reached,
    Role::Mpr,
    Role::Source,
];

/// A command to draw one device marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub device: DeviceId,
    pub position: Position,
    /// `None` for the base pass that draws every device.
    pub role: Option<Role>,
    pub style: MarkerStyle,
}

/// A command to draw one overlay edge between two device positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: Position,
    pub to: Position,
    pub kind: EdgeKind,
    pub style: LineStyle,
}

/// One legend row. Emitted for every configured role on every scene, whether
/// or not the role is currently populated, so playback never flickers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub role: Role,
    pub label: &'static str,
    pub style: MarkerStyle,
}

/// The plot viewport, fixed across a replay.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// The simulator's square field with its origin at zero.
    pub fn square(size: f64) -> Self {
        Self {
            x_min: 0.0,
            x_max: size,
            y_min: 0.0,
            y_max: size,
        }
    }
}

/// Everything an external renderer needs to draw one animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Frame index in mobility playback, step index in flooding playback.
    pub index: usize,
    pub title: String,
    pub bounds: Bounds,
    pub markers: Vec<Marker>,
    pub edges: Vec<Edge>,
    pub legend: Vec<LegendEntry>,
}

/// Static composition parameters for one scenario.
#[derive(Debug, Clone)]
pub struct ComposerOptions {
    /// Scenario title; with `numbered_titles` it becomes "<title>: <index>".
    pub title: String,
    pub bounds: Bounds,
    pub numbered_titles: bool,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            bounds: Bounds::square(60.0),
            numbered_titles: false,
        }
    }
}

/// Builds scenes from frames and resolved role maps.
pub struct SceneComposer {
    options: ComposerOptions,
    legend: Vec<LegendEntry>,
}

impl SceneComposer {
    /// `roles` is the configured role list, in legend order.
    pub fn new(options: ComposerOptions, roles: &[Role]) -> Self {
        let legend = roles
            .iter()
            .map(|&role| LegendEntry {
                role,
                label: role.label(),
                style: style::marker_style(role),
            })
            .collect();
        Self { options, legend }
    }

    fn title(&self, index: usize) -> String {
        if self.options.numbered_titles {
            format!("{}: {index}", self.options.title)
        } else {
            self.options.title.clone()
        }
    }

    /// Compose the scene for one instant.
    ///
    /// `index` is the timeline position (step or frame index); in flooding
    /// playback it differs from `frame.index()`, which stays anchored.
    pub fn compose(&self, frame: &Frame, index: usize, roles: &RoleMap) -> Scene {
        let mut markers = Vec::with_capacity(frame.num_devices());
        for (device, position) in frame.positions() {
            markers.push(Marker {
                device,
                position,
                role: None,
                style: BASE_MARKER,
            });
        }

        let edges = roles
            .edges()
            .iter()
            .map(|edge| Edge {
                from: frame.position(edge.hub),
                to: frame.position(edge.dependent),
                kind: edge.kind,
                style: style::edge_style(edge.kind),
            })
            .collect();

        for role in DRAW_ORDER {
            let marker_style = style::marker_style(role);
            for &device in roles.get(role) {
                markers.push(Marker {
                    device,
                    position: frame.position(device),
                    role: Some(role),
                    style: marker_style,
                });
            }
        }

        Scene {
            index,
            title: self.title(index),
            bounds: self.options.bounds,
            markers,
            edges,
            legend: self.legend.clone(),
        }
    }
}
