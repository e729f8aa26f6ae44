//! Dungeon layout system
//!
//! Contains rooms and their placement, corridor and portal connections,
//! connectivity tracking, pruning, and the rendered cell grid.

mod connect;
mod connectivity;
mod errors;
mod generator;
mod grid;
mod params;
mod placement;
mod prune;
mod room;
mod wave;

pub use connect::{Connection, ConnectionBuilder, Corridor, Portal};
pub use connectivity::ConnectivityTracker;
pub use errors::GenError;
pub use generator::{Dungeon, Generator};
pub use grid::{CellKind, Grid, Point};
pub use params::{ConnectStrategy, CurvePolicy, GenParams, TransitionKind};
pub use placement::{place_room, MAX_ATTEMPTS};
pub use prune::maybe_prune;
pub use room::{Room, RoomId};
pub use wave::{find_path, CurveBias, WaveCell, WaveField};
