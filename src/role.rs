//! Role policies and their per-step resolution.
//!
//! A scenario assigns devices to semantic roles in one of two ways: a
//! flooding process reveals ids batch by batch, or a static MPR hierarchy
//! holds for the whole replay. Both are interpretations of the same ordered
//! timeline; the classifier resolves one instant of it at a time.

use crate::device::DeviceId;
use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Semantic categories a device can occupy in an overlay.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Flooding origin or hierarchy target. Drawn last and largest.
    Source,
    /// Reached by the flooding process.
    Reached,
    /// Multipoint relay selected by the target.
    Mpr,
    /// One-hop neighbor of the target.
    Neighbor,
    /// Two-hop neighbor, covered through an MPR.
    TwoHop,
}

impl Role {
    /// Legend label, matching the simulator's published plots.
    pub fn label(self) -> &'static str {
        match self {
            Role::Source => "origin",
            Role::Reached => "reached data",
            Role::Mpr => "MPR",
            Role::Neighbor => "neighbors",
            Role::TwoHop => "2-hop neighbors",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which relationship an overlay edge visualizes.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Target to one of its neighbors or MPRs.
    TargetLink,
    /// MPR to a two-hop neighbor it covers.
    MprCover,
}

/// A parent→child relationship to draw as a line between device positions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct HierarchyEdge {
    pub hub: DeviceId,
    pub dependent: DeviceId,
    pub kind: EdgeKind,
}

/// Role policy, selected and parameterized per scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RoleConfig {
    /// Flooding: `origin` holds the data from the start; batch `k` is
    /// revealed at step `k + 1`, and membership only ever grows.
    Progressive {
        origin: Vec<DeviceId>,
        batches: Vec<Vec<DeviceId>>,
    },
    /// OLSR-style MPR hierarchy, constant across all frames.
    /// `two_hop[k]` lists the two-hop neighbors covered by `mprs[k]`.
    Hierarchical {
        target: DeviceId,
        neighbors: Vec<DeviceId>,
        mprs: Vec<DeviceId>,
        two_hop: Vec<Vec<DeviceId>>,
    },
}

/// The resolved `role → ids` mapping for one instant, plus hierarchy edges.
///
/// Id lists are sorted ascending and edges keep configuration order, so the
/// map is fully determined by (config, step).
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMap {
    assignments: Vec<(Role, Vec<DeviceId>)>,
    edges: Vec<HierarchyEdge>,
}

impl RoleMap {
    /// Ids holding `role` at this instant; empty if the role is absent.
    pub fn get(&self, role: Role) -> &[DeviceId] {
        self.assignments
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn assignments(&self) -> impl Iterator<Item = (Role, &[DeviceId])> {
        self.assignments.iter().map(|(r, ids)| (*r, ids.as_slice()))
    }

    pub fn edges(&self) -> &[HierarchyEdge] {
        &self.edges
    }
}

/// Resolves a role configuration at a given step.
///
/// Construction validates every device reference against the device table,
/// so no invalid id can survive into frame iteration.
#[derive(Debug)]
pub struct RoleClassifier {
    config: RoleConfig,
}

impl RoleClassifier {
    pub fn new(config: RoleConfig, num_devices: usize) -> Result<Self> {
        validate(&config, num_devices)?;
        Ok(Self { config })
    }

    /// Roles present in this configuration, in legend order.
    pub fn roles(&self) -> Vec<Role> {
        match &self.config {
            RoleConfig::Progressive { .. } => vec![Role::Source, Role::Reached],
            RoleConfig::Hierarchical { .. } => {
                vec![Role::Source, Role::Mpr, Role::Neighbor, Role::TwoHop]
            }
        }
    }

    /// True if the timeline advances by revelation step rather than by
    /// mobility frame.
    pub fn is_progressive(&self) -> bool {
        matches!(self.config, RoleConfig::Progressive { .. })
    }

    /// Number of scenes a full replay emits.
    ///
    /// Progressive playback has one scene per revelation step, including the
    /// step before the first batch; hierarchical playback has one scene per
    /// mobility frame.
    pub fn num_steps(&self, num_frames: usize) -> usize {
        match &self.config {
            RoleConfig::Progressive { batches, .. } => batches.len() + 1,
            RoleConfig::Hierarchical { .. } => num_frames,
        }
    }

    /// Which mobility frame supplies positions for a given step. Flooding
    /// scenes freeze motion at the first frame.
    pub fn frame_for_step(&self, step: usize) -> usize {
        if self.is_progressive() {
            0
        } else {
            step
        }
    }

    /// Resolve role membership at `step`.
    pub fn classify(&self, step: usize) -> RoleMap {
        match &self.config {
            RoleConfig::Progressive { origin, batches } => {
                let reached: BTreeSet<DeviceId> =
                    batches.iter().take(step).flatten().copied().collect();
                RoleMap {
                    assignments: vec![
                        (Role::Source, sorted(origin)),
                        (Role::Reached, reached.into_iter().collect()),
                    ],
                    edges: Vec::new(),
                }
            }
            RoleConfig::Hierarchical {
                target,
                neighbors,
                mprs,
                two_hop,
            } => {
                let mut edges = Vec::new();
                for &neighbor in neighbors {
                    edges.push(HierarchyEdge {
                        hub: *target,
                        dependent: neighbor,
                        kind: EdgeKind::TargetLink,
                    });
                }
                for &mpr in mprs {
                    edges.push(HierarchyEdge {
                        hub: *target,
                        dependent: mpr,
                        kind: EdgeKind::TargetLink,
                    });
                }
                for (&mpr, covered) in mprs.iter().zip(two_hop) {
                    for &dependent in covered {
                        edges.push(HierarchyEdge {
                            hub: mpr,
                            dependent,
                            kind: EdgeKind::MprCover,
                        });
                    }
                }
                RoleMap {
                    assignments: vec![
                        (Role::Source, vec![*target]),
                        (Role::Neighbor, sorted(neighbors)),
                        (Role::Mpr, sorted(mprs)),
                        (Role::TwoHop, sorted(two_hop.iter().flatten())),
                    ],
                    edges,
                }
            }
        }
    }
}

fn sorted<'a>(ids: impl IntoIterator<Item = &'a DeviceId>) -> Vec<DeviceId> {
    let set: BTreeSet<DeviceId> = ids.into_iter().copied().collect();
    set.into_iter().collect()
}

fn validate(config: &RoleConfig, num_devices: usize) -> Result<()> {
    let check = |role: Role, ids: &[DeviceId]| -> Result<()> {
        for &id in ids {
            if id.0 >= num_devices {
                return Err(ReplayError::InvalidRoleReference {
                    role,
                    device: id,
                    num_devices,
                });
            }
        }
        Ok(())
    };
    match config {
        RoleConfig::Progressive { origin, batches } => {
            check(Role::Source, origin)?;
            for batch in batches {
                check(Role::Reached, batch)?;
            }
        }
        RoleConfig::Hierarchical {
            target,
            neighbors,
            mprs,
            two_hop,
        } => {
            if two_hop.len() != mprs.len() {
                return Err(ReplayError::MalformedRoleConfig(format!(
                    "{} MPRs but {} two-hop lists",
                    mprs.len(),
                    two_hop.len()
                )));
            }
            check(Role::Source, &[*target])?;
            check(Role::Neighbor, neighbors)?;
            check(Role::Mpr, mprs)?;
            for covered in two_hop {
                check(Role::TwoHop, covered)?;
            }
        }
    }
    Ok(())
}
