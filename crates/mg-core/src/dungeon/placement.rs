//! Room placement by rejection sampling.

use super::params::GenParams;
use super::room::{Room, RoomId};
use crate::rng::GenRng;

/// Attempt budget for one room before giving up on it
pub const MAX_ATTEMPTS: usize = 10;

/// Try to place one collision-free room.
///
/// Samples a candidate size and position uniformly from the configured
/// ranges, rejecting candidates whose 1-expanded bounding box leaves the
/// grid's interior margin or intersects an existing room's expanded box.
/// Returns `None` once the attempt budget is exhausted; the caller simply
/// proceeds with fewer rooms than requested.
pub fn place_room(params: &GenParams, existing: &[Room], rng: &mut GenRng) -> Option<Room> {
    let (min, max) = params.room_size;
    let id = RoomId(existing.len() as u32 + 1);

    for _ in 0..MAX_ATTEMPTS {
        let width = rng.range(min, max);
        let height = rng.range(min, max);

        // Wall ring plus the one-cell impassable grid margin on every side.
        if width + 4 > params.width || height + 4 > params.height {
            continue;
        }
        let x = rng.range(2, params.width - width - 2);
        let y = rng.range(2, params.height - height - 2);

        let candidate = Room::new(id, x, y, width, height);
        if existing.iter().any(|r| r.overlaps_bordered(&candidate)) {
            continue;
        }
        return Some(candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(params: &GenParams, rng: &mut GenRng) -> Vec<Room> {
        let mut rooms = Vec::new();
        for _ in 0..params.rooms_count {
            if let Some(room) = place_room(params, &rooms, rng) {
                rooms.push(room);
            }
        }
        rooms
    }

    #[test]
    fn test_rooms_inside_bounds_with_border() {
        let params = GenParams::default();
        for seed in 0..20 {
            let mut rng = GenRng::new(seed);
            for room in place_all(&params, &mut rng) {
                assert!(room.x >= 2 && room.y >= 2);
                assert!(room.right() + 2 < params.width);
                assert!(room.bottom() + 2 < params.height);
                assert!((6..=12).contains(&room.width));
                assert!((6..=12).contains(&room.height));
            }
        }
    }

    #[test]
    fn test_no_bordered_overlap() {
        let params = GenParams::default();
        for seed in 0..20 {
            let mut rng = GenRng::new(seed);
            let rooms = place_all(&params, &mut rng);
            for a in &rooms {
                for b in &rooms {
                    if a.id != b.id {
                        assert!(!a.overlaps_bordered(b), "{} collides with {}", a.id, b.id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_ids_sequential() {
        let params = GenParams::default();
        let mut rng = GenRng::new(3);
        let rooms = place_all(&params, &mut rng);
        for (i, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, RoomId(i as u32 + 1));
        }
    }

    #[test]
    fn test_crowded_grid_comes_up_short() {
        // A grid that can hold one or two rooms at most.
        let params = GenParams {
            width: 20,
            height: 20,
            room_size: (10, 12),
            rooms_count: 8,
            ..GenParams::default()
        };
        let mut rng = GenRng::new(11);
        let rooms = place_all(&params, &mut rng);
        assert!(rooms.len() < 8);
        assert!(!rooms.is_empty());
    }
}
