//! Connection pruning.
//!
//! After the dungeon is connected the layout may carry more passages than
//! wanted. Pruning removes connections until
//! `(corridors + portals) - rooms` no longer exceeds the configured delta.
//!
//! When `must_be_connected` is set, only a connection whose room pair is
//! joined by at least one other connection may be removed; the surviving
//! duplicate keeps every reachability relation intact, so pruning can never
//! disconnect the dungeon. Without that flag any connection is fair game and
//! the connectivity of the result is the caller's trade-off.

use std::collections::BTreeMap;

use super::connect::{Corridor, Portal};
use super::params::GenParams;
use super::room::RoomId;
use crate::rng::GenRng;

#[derive(Debug, Clone, Copy)]
enum Handle {
    Corridor(usize),
    Portal(usize),
}

/// Room pair key, unordered
fn pair_key(rooms: (RoomId, RoomId)) -> (RoomId, RoomId) {
    if rooms.0 <= rooms.1 {
        rooms
    } else {
        (rooms.1, rooms.0)
    }
}

/// Trim excess connections down to the configured delta.
///
/// Terminates either when the delta is satisfied or when no eligible removal
/// exists, whichever comes first.
pub fn maybe_prune(
    corridors: &mut Vec<Corridor>,
    portals: &mut Vec<Portal>,
    room_count: usize,
    params: &GenParams,
    rng: &mut GenRng,
) {
    loop {
        let delta = (corridors.len() + portals.len()) as i64 - room_count as i64;
        if delta <= params.max_connections_delta {
            return;
        }

        let handle = if params.must_be_connected {
            pick_duplicate(corridors, portals, rng)
        } else {
            pick_any(corridors, portals, rng)
        };
        match handle {
            Some(Handle::Corridor(i)) => {
                corridors.remove(i);
            }
            Some(Handle::Portal(i)) => {
                portals.remove(i);
            }
            None => return,
        }
    }
}

/// A random member of a random room pair joined more than once
fn pick_duplicate(
    corridors: &[Corridor],
    portals: &[Portal],
    rng: &mut GenRng,
) -> Option<Handle> {
    let mut groups: BTreeMap<(RoomId, RoomId), Vec<Handle>> = BTreeMap::new();
    for (i, c) in corridors.iter().enumerate() {
        groups
            .entry(pair_key(c.rooms))
            .or_default()
            .push(Handle::Corridor(i));
    }
    for (i, p) in portals.iter().enumerate() {
        groups
            .entry(pair_key(p.rooms))
            .or_default()
            .push(Handle::Portal(i));
    }

    let duplicates: Vec<&Vec<Handle>> = groups.values().filter(|v| v.len() >= 2).collect();
    let group = *rng.choose(&duplicates)?;
    rng.choose(group).copied()
}

/// Any random connection at all
fn pick_any(corridors: &[Corridor], portals: &[Portal], rng: &mut GenRng) -> Option<Handle> {
    let total = corridors.len() + portals.len();
    if total == 0 {
        return None;
    }
    let i = rng.rn2(total as u32) as usize;
    if i < corridors.len() {
        Some(Handle::Corridor(i))
    } else {
        Some(Handle::Portal(i - corridors.len()))
    }
}
