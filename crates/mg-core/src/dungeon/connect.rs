//! Corridor and portal construction between rooms.
//!
//! A corridor picks one door point on each room's wall ring, steps one cell
//! outward on each side, and asks the wave search for a route between those
//! two outside points. A portal skips geometry entirely and links one floor
//! point in each of two distinct rooms.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::Point;
use super::params::{GenParams, TransitionKind};
use super::placement::MAX_ATTEMPTS;
use super::room::{Room, RoomId};
use super::wave::{find_path, CurveBias, WaveField};
use crate::rng::GenRng;

/// A carved passage between two door points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: u32,
    /// Door point on the first room's wall ring
    pub p1: Point,
    /// Door point on the second room's wall ring
    pub p2: Point,
    /// Render P1 as a literal door rather than an open archway
    pub p1_door: bool,
    pub p2_door: bool,
    /// Carved cells from just outside P1 to just outside P2
    pub points: Vec<Point>,
    pub rooms: (RoomId, RoomId),
}

/// A teleport link between floor points of two distinct rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub id: u32,
    pub a: Point,
    pub b: Point,
    pub rooms: (RoomId, RoomId),
}

/// Either kind of successful connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Corridor(Corridor),
    Portal(Portal),
}

impl Connection {
    pub fn rooms(&self) -> (RoomId, RoomId) {
        match self {
            Connection::Corridor(c) => c.rooms,
            Connection::Portal(p) => p.rooms,
        }
    }
}

/// Vertical compass component, direction from the first room to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vert {
    North,
    South,
}

/// Horizontal compass component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horiz {
    East,
    West,
}

/// Compass relation between two room centers; at least one component is set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Compass {
    v: Option<Vert>,
    h: Option<Horiz>,
}

impl Compass {
    /// Relation from `a`'s center toward `b`'s center
    fn between(a: &Room, b: &Room) -> Self {
        let ca = a.center();
        let cb = b.center();
        let v = match cb.y.cmp(&ca.y) {
            std::cmp::Ordering::Less => Some(Vert::North),
            std::cmp::Ordering::Greater => Some(Vert::South),
            std::cmp::Ordering::Equal => None,
        };
        let h = match cb.x.cmp(&ca.x) {
            std::cmp::Ordering::Less => Some(Horiz::West),
            std::cmp::Ordering::Greater => Some(Horiz::East),
            std::cmp::Ordering::Equal => None,
        };
        debug_assert!(
            v.is_some() || h.is_some(),
            "disjoint rooms cannot share a center"
        );
        Self { v, h }
    }

    /// A random non-empty combination, for corridors looping back to one room
    fn random(rng: &mut GenRng) -> Self {
        loop {
            let v = match rng.rn2(3) {
                0 => None,
                1 => Some(Vert::North),
                _ => Some(Vert::South),
            };
            let h = match rng.rn2(3) {
                0 => None,
                1 => Some(Horiz::West),
                _ => Some(Horiz::East),
            };
            if v.is_some() || h.is_some() {
                return Self { v, h };
            }
        }
    }

    fn opposite(self) -> Self {
        Self {
            v: self.v.map(|v| match v {
                Vert::North => Vert::South,
                Vert::South => Vert::North,
            }),
            h: self.h.map(|h| match h {
                Horiz::East => Horiz::West,
                Horiz::West => Horiz::East,
            }),
        }
    }
}

/// Which wall ring edge a door sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    North,
    South,
    East,
    West,
}

/// Pick a door point on the room edge consistent with the compass relation,
/// and the search endpoint one cell outward from it.
///
/// Pure relations use the whole matching edge. Diagonal relations pick one of
/// the two matching edges at random and use the half nearer the other
/// component's direction.
fn pick_exit(room: &Room, compass: Compass, rng: &mut GenRng) -> (Point, Point) {
    let (side, lo, hi) = match (compass.v, compass.h) {
        (Some(v), None) => {
            let side = vert_side(v);
            (side, room.x, room.right())
        }
        (None, Some(h)) => {
            let side = horiz_side(h);
            (side, room.y, room.bottom())
        }
        (Some(v), Some(h)) => {
            if rng.one_in(2) {
                // edge named by the vertical component, half nearer to h
                let span = match h {
                    Horiz::East => (room.x + room.width / 2, room.right()),
                    Horiz::West => (room.x, room.x + room.width / 2),
                };
                (vert_side(v), span.0, span.1)
            } else {
                // edge named by the horizontal component, half nearer to v
                let span = match v {
                    Vert::North => (room.y, room.y + room.height / 2),
                    Vert::South => (room.y + room.height / 2, room.bottom()),
                };
                (horiz_side(h), span.0, span.1)
            }
        }
        (None, None) => unreachable!("compass always has a component"),
    };

    let offset = rng.range(lo, hi);
    let door = match side {
        Side::North => Point::new(offset, room.y - 1),
        Side::South => Point::new(offset, room.bottom() + 1),
        Side::West => Point::new(room.x - 1, offset),
        Side::East => Point::new(room.right() + 1, offset),
    };
    // One step further outward; placement margins keep this inside the grid.
    let outside = match side {
        Side::North => Point::new(door.x, door.y - 1),
        Side::South => Point::new(door.x, door.y + 1),
        Side::West => Point::new(door.x - 1, door.y),
        Side::East => Point::new(door.x + 1, door.y),
    };
    (door, outside)
}

fn vert_side(v: Vert) -> Side {
    match v {
        Vert::North => Side::North,
        Vert::South => Side::South,
    }
}

fn horiz_side(h: Horiz) -> Side {
    match h {
        Horiz::East => Side::East,
        Horiz::West => Side::West,
    }
}

/// Builds corridors and portals; owns the static blocking base and the
/// global set of points already used by portal endpoints.
#[derive(Debug)]
pub struct ConnectionBuilder<'a> {
    params: &'a GenParams,
    base: WaveField,
    blocked_points: BTreeSet<Point>,
    next_corridor_id: u32,
    next_portal_id: u32,
}

impl<'a> ConnectionBuilder<'a> {
    pub fn new(params: &'a GenParams, rooms: &[Room]) -> Self {
        Self {
            params,
            base: WaveField::base(params.width, params.height, rooms),
            blocked_points: BTreeSet::new(),
            next_corridor_id: 1,
            next_portal_id: 1,
        }
    }

    /// Try to join two rooms per the configured transition policy.
    ///
    /// Returns `None` when this particular attempt found no geometry (no
    /// route between the chosen doors, or no free portal points); the caller
    /// retries with other rooms or points on a later iteration.
    pub fn connect(&mut self, a: &Room, b: &Room, rng: &mut GenRng) -> Option<Connection> {
        match self.params.transitions {
            TransitionKind::Corridors => self.build_corridor(a, b, rng).map(Connection::Corridor),
            TransitionKind::Portals => self.build_portal(a, b, rng).map(Connection::Portal),
            TransitionKind::Both => {
                // A loop back to the same room can only ever be a corridor.
                if a.id != b.id && rng.percent(self.params.portals_percent) {
                    self.build_portal(a, b, rng).map(Connection::Portal)
                } else {
                    self.build_corridor(a, b, rng).map(Connection::Corridor)
                }
            }
        }
    }

    fn build_corridor(&mut self, a: &Room, b: &Room, rng: &mut GenRng) -> Option<Corridor> {
        let compass = if a.id == b.id {
            Compass::random(rng)
        } else {
            Compass::between(a, b)
        };
        let (p1, start) = pick_exit(a, compass, rng);
        let (p2, dest) = pick_exit(b, compass.opposite(), rng);

        let bias = CurveBias::resolve(self.params.corridor_curves, rng);
        let points = find_path(&self.base, start, dest, bias, rng)?;

        let corridor = Corridor {
            id: self.next_corridor_id,
            p1,
            p2,
            p1_door: rng.one_in(2),
            p2_door: rng.one_in(2),
            points,
            rooms: (a.id, b.id),
        };
        self.next_corridor_id += 1;
        Some(corridor)
    }

    fn build_portal(&mut self, a: &Room, b: &Room, rng: &mut GenRng) -> Option<Portal> {
        if a.id == b.id {
            return None;
        }
        let pa = self.free_floor_point(a, rng)?;
        let pb = self.free_floor_point(b, rng)?;

        self.blocked_points.insert(pa);
        self.blocked_points.insert(pb);
        let portal = Portal {
            id: self.next_portal_id,
            a: pa,
            b: pb,
            rooms: (a.id, b.id),
        };
        self.next_portal_id += 1;
        Some(portal)
    }

    /// A random floor point not yet claimed by an earlier portal
    fn free_floor_point(&self, room: &Room, rng: &mut GenRng) -> Option<Point> {
        for _ in 0..MAX_ATTEMPTS {
            let p = room.random_point(rng);
            if !self.blocked_points.contains(&p) {
                return Some(p);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::params::CurvePolicy;

    fn two_rooms() -> Vec<Room> {
        vec![
            Room::new(RoomId(1), 4, 4, 6, 5),
            Room::new(RoomId(2), 24, 12, 6, 5),
        ]
    }

    fn params(width: usize, height: usize, transitions: TransitionKind) -> GenParams {
        GenParams {
            width,
            height,
            transitions,
            corridor_curves: CurvePolicy::Curved,
            ..GenParams::default()
        }
    }

    #[test]
    fn test_compass_between() {
        let rooms = two_rooms();
        let c = Compass::between(&rooms[0], &rooms[1]);
        assert_eq!(c.v, Some(Vert::South));
        assert_eq!(c.h, Some(Horiz::East));
        let back = Compass::between(&rooms[1], &rooms[0]);
        assert_eq!(back.v, Some(Vert::North));
        assert_eq!(back.h, Some(Horiz::West));
    }

    #[test]
    fn test_pick_exit_on_matching_edge() {
        let room = Room::new(RoomId(1), 10, 10, 6, 4);
        let mut rng = GenRng::new(3);
        for _ in 0..50 {
            // pure east: door on the right wall column, outside one step east
            let (door, outside) = pick_exit(
                &room,
                Compass {
                    v: None,
                    h: Some(Horiz::East),
                },
                &mut rng,
            );
            assert_eq!(door.x, room.right() + 1);
            assert!((room.y..=room.bottom()).contains(&door.y));
            assert_eq!(outside, Point::new(door.x + 1, door.y));
        }
    }

    #[test]
    fn test_pick_exit_diagonal_uses_near_half() {
        let room = Room::new(RoomId(1), 10, 10, 8, 8);
        let compass = Compass {
            v: Some(Vert::South),
            h: Some(Horiz::East),
        };
        let mut rng = GenRng::new(4);
        for _ in 0..100 {
            let (door, _) = pick_exit(&room, compass, &mut rng);
            if door.y == room.bottom() + 1 {
                // south edge, east half
                assert!(door.x >= room.x + room.width / 2);
            } else {
                // east edge, south half
                assert_eq!(door.x, room.right() + 1);
                assert!(door.y >= room.y + room.height / 2);
            }
        }
    }

    #[test]
    fn test_corridor_between_two_rooms() {
        let rooms = two_rooms();
        let params = params(40, 25, TransitionKind::Corridors);
        let mut builder = ConnectionBuilder::new(&params, &rooms);
        let mut rng = GenRng::new(21);

        let mut made = None;
        for _ in 0..20 {
            if let Some(Connection::Corridor(c)) = builder.connect(&rooms[0], &rooms[1], &mut rng)
            {
                made = Some(c);
                break;
            }
        }
        let corridor = made.expect("two well-separated rooms must connect");
        assert_eq!(corridor.rooms, (RoomId(1), RoomId(2)));
        assert!(!corridor.points.is_empty());
        for p in &corridor.points {
            for room in &rooms {
                assert!(
                    !room.bordered_contains(*p),
                    "corridor point {:?} inside {}",
                    p,
                    room.id
                );
            }
        }
        // door points sit on the wall rings
        assert!(rooms[0].bordered_contains(corridor.p1));
        assert!(!rooms[0].contains(corridor.p1));
        assert!(rooms[1].bordered_contains(corridor.p2));
        assert!(!rooms[1].contains(corridor.p2));
    }

    #[test]
    fn test_loop_corridor_allowed() {
        let rooms = vec![Room::new(RoomId(1), 8, 8, 8, 6)];
        let params = params(40, 25, TransitionKind::Corridors);
        let mut builder = ConnectionBuilder::new(&params, &rooms);
        let mut rng = GenRng::new(5);

        let mut found = false;
        for _ in 0..30 {
            if let Some(Connection::Corridor(c)) = builder.connect(&rooms[0], &rooms[0], &mut rng)
            {
                assert_eq!(c.rooms, (RoomId(1), RoomId(1)));
                found = true;
                break;
            }
        }
        assert!(found, "a lone room should manage a loop corridor");
    }

    #[test]
    fn test_portal_requires_distinct_rooms() {
        let rooms = two_rooms();
        let params = params(40, 25, TransitionKind::Portals);
        let mut builder = ConnectionBuilder::new(&params, &rooms);
        let mut rng = GenRng::new(9);

        assert!(builder.connect(&rooms[0], &rooms[0], &mut rng).is_none());

        let conn = builder.connect(&rooms[0], &rooms[1], &mut rng).unwrap();
        let Connection::Portal(portal) = conn else {
            panic!("portals-only policy produced a corridor");
        };
        assert!(rooms[0].contains(portal.a));
        assert!(rooms[1].contains(portal.b));
        // endpoints are now globally blocked
        assert!(builder.blocked_points.contains(&portal.a));
        assert!(builder.blocked_points.contains(&portal.b));
    }

    #[test]
    fn test_portal_points_never_reused() {
        let rooms = two_rooms();
        let params = params(40, 25, TransitionKind::Portals);
        let mut builder = ConnectionBuilder::new(&params, &rooms);
        let mut rng = GenRng::new(13);

        let mut seen = BTreeSet::new();
        for _ in 0..40 {
            if let Some(Connection::Portal(p)) = builder.connect(&rooms[0], &rooms[1], &mut rng) {
                assert!(seen.insert(p.a), "portal endpoint {:?} reused", p.a);
                assert!(seen.insert(p.b), "portal endpoint {:?} reused", p.b);
            }
        }
        assert!(!seen.is_empty());
    }

    #[test]
    fn test_corridor_ids_sequential() {
        let rooms = two_rooms();
        let params = params(40, 25, TransitionKind::Corridors);
        let mut builder = ConnectionBuilder::new(&params, &rooms);
        let mut rng = GenRng::new(17);

        let mut ids = Vec::new();
        for _ in 0..10 {
            if let Some(Connection::Corridor(c)) = builder.connect(&rooms[0], &rooms[1], &mut rng)
            {
                ids.push(c.id);
            }
        }
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(*id, i as u32 + 1);
        }
    }
}
