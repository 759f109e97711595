//! Fixed per-role visual styles.
//!
//! Styles are a static lookup by role, never recomputed per frame, so every
//! scene in a replay draws a given role identically. The palette matches the
//! simulator's published matplotlib plots.

use crate::role::{EdgeKind, Role};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Renderer-agnostic color names.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Cyan,
    Yellow,
    Green,
    Gray,
    LightGray,
}

/// How to draw one marker.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: Color,
    /// Marker size in points.
    pub size: f64,
    /// Dashed ring of this data-space radius around the marker, used to
    /// visualize the target's radio range.
    pub ring_radius: Option<f64>,
}

/// How to draw one overlay edge.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub dashed: bool,
}

/// The small black dot every device gets before overlays are applied.
pub const BASE_MARKER: MarkerStyle = MarkerStyle {
    color: Color::Black,
    size: 2.0,
    ring_radius: None,
};

lazy_static! {
    static ref MARKER_STYLES: HashMap<Role, MarkerStyle> = {
        let mut styles = HashMap::new();
        styles.insert(
            Role::Source,
            MarkerStyle {
                color: Color::Red,
                size: 6.0,
                ring_radius: Some(10.0),
            },
        );
        styles.insert(
            Role::Reached,
            MarkerStyle {
                color: Color::Cyan,
                size: 4.0,
                ring_radius: None,
            },
        );
        styles.insert(
            Role::Mpr,
            MarkerStyle {
                color: Color::Yellow,
                size: 5.0,
                ring_radius: None,
            },
        );
        styles.insert(
            Role::Neighbor,
            MarkerStyle {
                color: Color::Cyan,
                size: 4.0,
                ring_radius: None,
            },
        );
        styles.insert(
            Role::TwoHop,
            MarkerStyle {
                color: Color::Green,
                size: 3.0,
                ring_radius: None,
            },
        );
        styles
    };
    static ref EDGE_STYLES: HashMap<EdgeKind, LineStyle> = {
        let mut styles = HashMap::new();
        styles.insert(
            EdgeKind::TargetLink,
            LineStyle {
                color: Color::Gray,
                dashed: true,
            },
        );
        styles.insert(
            EdgeKind::MprCover,
            LineStyle {
                color: Color::LightGray,
                dashed: true,
            },
        );
        styles
    };
}

pub fn marker_style(role: Role) -> MarkerStyle {
    MARKER_STYLES[&role]
}

pub fn edge_style(kind: EdgeKind) -> LineStyle {
    EDGE_STYLES[&kind]
}
