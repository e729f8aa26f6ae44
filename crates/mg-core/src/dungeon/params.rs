//! Generator configuration.
//!
//! An immutable parameter bundle built fresh per generator; callers merge
//! their overrides at construction time, no shared default table is mutated.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::errors::GenError;

/// What kind of transitions join rooms
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum TransitionKind {
    /// Carved corridors only
    Corridors,
    /// Teleport portals only
    Portals,
    /// Per connection: portal with `portals_percent` probability, else corridor
    #[default]
    Both,
}

/// How the partner room for a new connection is picked
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectStrategy {
    #[default]
    Random,
    /// Smallest center-to-center distance
    Closest,
    /// Largest center-to-center distance
    Farthest,
}

/// Tie-breaking policy when several equally short corridor routes exist
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum CurvePolicy {
    /// Fixed preference order, keeps corridors running straight
    Straight,
    /// Uniform random among ties, meandering corridors
    #[default]
    Curved,
    /// One of the two picked at random per corridor
    Random,
}

/// Generator parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenParams {
    /// Corridors, portals, or a probability-weighted mix
    pub transitions: TransitionKind,
    /// Probability (0..=100) that a `Both` connection becomes a portal
    pub portals_percent: u32,
    /// Give every room at least one outbound connection attempt
    pub each_room_connection: bool,
    /// Keep connecting clusters until the whole dungeon is reachable
    pub must_be_connected: bool,
    /// Partner selection for new connections
    pub base_connecting: ConnectStrategy,
    /// Corridor tie-breaking bias
    pub corridor_curves: CurvePolicy,
    /// Inclusive room side-length range
    pub room_size: (usize, usize),
    /// Rooms to attempt; fewer may be placed when space runs out
    pub rooms_count: usize,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Maximum tolerated `(corridors + portals) - rooms` before pruning stops
    pub max_connections_delta: i64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            transitions: TransitionKind::Both,
            portals_percent: 10,
            each_room_connection: true,
            must_be_connected: true,
            base_connecting: ConnectStrategy::Random,
            corridor_curves: CurvePolicy::Curved,
            room_size: (6, 12),
            rooms_count: 10,
            width: 120,
            height: 50,
            max_connections_delta: 5,
        }
    }
}

impl GenParams {
    /// Reject configurations no amount of retrying could satisfy
    pub fn validate(&self) -> Result<(), GenError> {
        let (min, max) = self.room_size;
        if self.rooms_count == 0 {
            return Err(GenError::InvalidParams {
                reason: "rooms_count must be at least 1".into(),
            });
        }
        if min < 2 {
            return Err(GenError::InvalidParams {
                reason: "minimum room size must be at least 2".into(),
            });
        }
        if min > max {
            return Err(GenError::InvalidParams {
                reason: format!("room_size minimum {} exceeds maximum {}", min, max),
            });
        }
        // A room needs its wall ring plus the impassable grid margin around it.
        if self.width < min + 5 || self.height < min + 5 {
            return Err(GenError::InvalidParams {
                reason: format!(
                    "grid {}x{} cannot hold a {}-cell room with its border",
                    self.width, self.height, min
                ),
            });
        }
        if self.portals_percent > 100 {
            return Err(GenError::InvalidParams {
                reason: format!("portals_percent {} exceeds 100", self.portals_percent),
            });
        }
        if self.max_connections_delta < 0 {
            return Err(GenError::InvalidParams {
                reason: "max_connections_delta must not be negative".into(),
            });
        }
        Ok(())
    }
}
