//! Dungeon generation orchestration.
//!
//! One synchronous pass: place rooms, give each room its optional outbound
//! connection, join clusters until the layout is fully connected, prune the
//! excess, then stamp everything onto the output grid.

use serde::{Deserialize, Serialize};

use super::connect::{Connection, ConnectionBuilder, Corridor, Portal};
use super::connectivity::ConnectivityTracker;
use super::errors::GenError;
use super::grid::{CellKind, Grid, Point};
use super::params::{ConnectStrategy, GenParams};
use super::placement::{place_room, MAX_ATTEMPTS};
use super::prune::maybe_prune;
use super::room::Room;
use crate::rng::GenRng;

/// Consecutive failed connection attempts tolerated while joining clusters
/// before the configuration is declared infeasible
const MAX_CONNECT_FAILURES: usize = 100;

/// A finished layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub portals: Vec<Portal>,
    /// Random floor cell of a random room, code 8
    pub entrance: Point,
    /// Random floor cell of a random room, code 9
    pub exit: Point,
    pub grid: Grid,
    /// Seed that reproduces this layout under the same parameters
    pub seed: u64,
}

/// Dungeon generator: parameters plus the random source every stochastic
/// decision draws from
#[derive(Debug, Clone)]
pub struct Generator {
    params: GenParams,
    rng: GenRng,
}

impl Generator {
    /// Generator with an entropy seed
    pub fn new(params: GenParams) -> Result<Self, GenError> {
        params.validate()?;
        Ok(Self {
            params,
            rng: GenRng::from_entropy(),
        })
    }

    /// Generator reproducing the layout of a previous run
    pub fn with_seed(params: GenParams, seed: u64) -> Result<Self, GenError> {
        params.validate()?;
        Ok(Self {
            params,
            rng: GenRng::new(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Run the full generation pass
    pub fn generate(mut self) -> Result<Dungeon, GenError> {
        let seed = self.rng.seed();

        let mut rooms: Vec<Room> = Vec::new();
        for _ in 0..self.params.rooms_count {
            if let Some(room) = place_room(&self.params, &rooms, &mut self.rng) {
                rooms.push(room);
            }
        }
        if rooms.is_empty() {
            return Err(GenError::Infeasible {
                reason: "no rooms could be placed on the grid".into(),
            });
        }

        let mut tracker = ConnectivityTracker::init(&rooms);
        let mut builder = ConnectionBuilder::new(&self.params, &rooms);
        let mut corridors: Vec<Corridor> = Vec::new();
        let mut portals: Vec<Portal> = Vec::new();

        if self.params.each_room_connection {
            for i in 0..rooms.len() {
                let a = rooms[i].clone();
                let candidates: Vec<&Room> = rooms.iter().collect();
                let Some(b) =
                    find_partner(&a, &candidates, self.params.base_connecting, &mut self.rng)
                else {
                    continue;
                };
                let b = b.clone();
                if let Some(conn) = builder.connect(&a, &b, &mut self.rng) {
                    record(conn, &mut tracker, &mut corridors, &mut portals);
                }
            }
        }

        if self.params.must_be_connected {
            let mut failures = 0;
            while !tracker.is_fully_connected() {
                let pairs = tracker.unconnected_pairs();
                // Deterministic pick: the lowest room id that is still
                // missing somebody, joined toward one of its missing peers.
                let (&a_id, missing) = pairs
                    .iter()
                    .next()
                    .expect("not fully connected yet some room misses nobody");
                let a = room_by_id(&rooms, a_id).clone();
                let candidates: Vec<&Room> = rooms
                    .iter()
                    .filter(|r| missing.contains(&r.id))
                    .collect();
                let partner =
                    find_partner(&a, &candidates, self.params.base_connecting, &mut self.rng)
                        .cloned();
                match partner.and_then(|b| builder.connect(&a, &b, &mut self.rng)) {
                    Some(conn) => {
                        failures = 0;
                        record(conn, &mut tracker, &mut corridors, &mut portals);
                    }
                    None => {
                        failures += 1;
                        if failures >= MAX_CONNECT_FAILURES {
                            return Err(GenError::Infeasible {
                                reason: format!(
                                    "gave up connecting the dungeon after {} failed attempts",
                                    failures
                                ),
                            });
                        }
                    }
                }
            }
        }

        maybe_prune(
            &mut corridors,
            &mut portals,
            rooms.len(),
            &self.params,
            &mut self.rng,
        );

        let (entrance, exit) = pick_entrance_exit(&rooms, &mut self.rng);
        let grid = stamp(
            &self.params,
            &rooms,
            &corridors,
            &portals,
            entrance,
            exit,
        );

        Ok(Dungeon {
            rooms,
            corridors,
            portals,
            entrance,
            exit,
            grid,
            seed,
        })
    }
}

/// Union the tracker and file the connection in its owning collection
fn record(
    conn: Connection,
    tracker: &mut ConnectivityTracker,
    corridors: &mut Vec<Corridor>,
    portals: &mut Vec<Portal>,
) {
    let (a, b) = conn.rooms();
    tracker.union(a, b);
    match conn {
        Connection::Corridor(c) => corridors.push(c),
        Connection::Portal(p) => portals.push(p),
    }
}

fn room_by_id(rooms: &[Room], id: super::room::RoomId) -> &Room {
    rooms
        .iter()
        .find(|r| r.id == id)
        .expect("tracker ids always come from the room list")
}

/// Pick the partner room for a new connection.
///
/// `Random` may return the room itself (a loop corridor); distance-based
/// strategies never do. First room in placement order wins distance ties.
fn find_partner<'a>(
    room: &Room,
    candidates: &[&'a Room],
    strategy: ConnectStrategy,
    rng: &mut GenRng,
) -> Option<&'a Room> {
    match strategy {
        ConnectStrategy::Random => rng.choose(candidates).copied(),
        ConnectStrategy::Closest => candidates
            .iter()
            .filter(|r| r.id != room.id)
            .min_by_key(|r| room.center_distance_sq(r))
            .copied(),
        ConnectStrategy::Farthest => candidates
            .iter()
            .filter(|r| r.id != room.id)
            .max_by_key(|r| room.center_distance_sq(r))
            .copied(),
    }
}

/// Entrance and exit as two distinct random floor cells of random rooms
fn pick_entrance_exit(rooms: &[Room], rng: &mut GenRng) -> (Point, Point) {
    let entrance_room = rng.choose(rooms).expect("at least one room was placed");
    let entrance = entrance_room.random_point(rng);

    let exit_room = rng.choose(rooms).expect("at least one room was placed");
    for _ in 0..MAX_ATTEMPTS {
        let exit = exit_room.random_point(rng);
        if exit != entrance {
            return (entrance, exit);
        }
    }
    // The draw keeps colliding; take the first interior cell that differs.
    for y in exit_room.y..=exit_room.bottom() {
        for x in exit_room.x..=exit_room.right() {
            let p = Point::new(x, y);
            if p != entrance {
                return (entrance, p);
            }
        }
    }
    unreachable!("rooms have at least four floor cells")
}

/// Stamp the final layout onto a fresh grid.
///
/// Any layout point resolving outside the grid is a broken invariant and
/// panics inside [`Grid::set`].
fn stamp(
    params: &GenParams,
    rooms: &[Room],
    corridors: &[Corridor],
    portals: &[Portal],
    entrance: Point,
    exit: Point,
) -> Grid {
    let mut grid = Grid::new(params.width, params.height);

    for room in rooms {
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                grid.set(x, y, CellKind::Floor);
            }
        }
        for x in room.x - 1..=room.right() + 1 {
            grid.set(x, room.y - 1, CellKind::Wall);
            grid.set(x, room.bottom() + 1, CellKind::Wall);
        }
        for y in room.y - 1..=room.bottom() + 1 {
            grid.set(room.x - 1, y, CellKind::Wall);
            grid.set(room.right() + 1, y, CellKind::Wall);
        }
    }

    for corridor in corridors {
        for &p in &corridor.points {
            grid.set(p.x, p.y, CellKind::CorridorFloor);
        }
        for &p in &corridor.points {
            for n in p.neighbors8(params.width, params.height) {
                grid.set_if_void(n.x, n.y, CellKind::CorridorWall);
            }
        }
        let d1 = if corridor.p1_door {
            CellKind::Door
        } else {
            CellKind::Archway
        };
        let d2 = if corridor.p2_door {
            CellKind::Door
        } else {
            CellKind::Archway
        };
        grid.set(corridor.p1.x, corridor.p1.y, d1);
        grid.set(corridor.p2.x, corridor.p2.y, d2);
    }

    for portal in portals {
        grid.set(portal.a.x, portal.a.y, CellKind::Portal);
        grid.set(portal.b.x, portal.b.y, CellKind::Portal);
    }

    grid.set(entrance.x, entrance.y, CellKind::Entrance);
    grid.set(exit.x, exit.y, CellKind::Exit);

    grid
}
