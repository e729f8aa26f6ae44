//! Room connectivity tracking.
//!
//! Maintains, per room, the set of rooms reachable through the connections
//! made so far. The relation is kept symmetric and transitively closed after
//! every union, so "is the whole dungeon connected" is a direct set check.
//! Ordered containers keep iteration deterministic under a fixed seed.

use std::collections::{BTreeMap, BTreeSet};

use super::room::{Room, RoomId};

#[derive(Debug, Clone, Default)]
pub struct ConnectivityTracker {
    reachable: BTreeMap<RoomId, BTreeSet<RoomId>>,
}

impl ConnectivityTracker {
    /// Start with each room reachable only from itself
    pub fn init(rooms: &[Room]) -> Self {
        let reachable = rooms
            .iter()
            .map(|r| (r.id, BTreeSet::from([r.id])))
            .collect();
        Self { reachable }
    }

    /// Rooms tracked
    pub fn len(&self) -> usize {
        self.reachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }

    /// The set of rooms currently reachable from `id` (including itself)
    pub fn reachable_from(&self, id: RoomId) -> Option<&BTreeSet<RoomId>> {
        self.reachable.get(&id)
    }

    /// Record that `a` and `b` are now joined.
    ///
    /// Two sweeps: every room reachable from `b` absorbs `a`'s set, then
    /// every room reachable from `a` absorbs `b`'s set. Applied in that
    /// order the closure stays consistent even when the two sides already
    /// share part of their reachability.
    pub fn union(&mut self, a: RoomId, b: RoomId) {
        let set_a = self.reachable.get(&a).cloned().unwrap_or_default();
        let set_b = self.reachable.get(&b).cloned().unwrap_or_default();

        for member in &set_b {
            if let Some(set) = self.reachable.get_mut(member) {
                set.extend(set_a.iter().copied());
            }
        }
        let set_a = self.reachable.get(&a).cloned().unwrap_or_default();
        for member in &set_a {
            if let Some(set) = self.reachable.get_mut(member) {
                set.extend(set_b.iter().copied());
            }
        }
    }

    /// True iff every room reaches every other room
    pub fn is_fully_connected(&self) -> bool {
        let total = self.reachable.len();
        self.reachable.values().all(|set| set.len() == total)
    }

    /// For each room, the rooms it cannot reach yet.
    ///
    /// Recomputed from the current reachable sets on every call; rooms that
    /// already reach everything are omitted.
    pub fn unconnected_pairs(&self) -> BTreeMap<RoomId, BTreeSet<RoomId>> {
        let all: BTreeSet<RoomId> = self.reachable.keys().copied().collect();
        self.reachable
            .iter()
            .filter_map(|(id, set)| {
                let missing: BTreeSet<RoomId> = all.difference(set).copied().collect();
                if missing.is_empty() {
                    None
                } else {
                    Some((*id, missing))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms(n: u32) -> Vec<Room> {
        (1..=n)
            .map(|i| Room::new(RoomId(i), 2 + 10 * i as usize, 2, 4, 4))
            .collect()
    }

    #[test]
    fn test_init_self_only() {
        let tracker = ConnectivityTracker::init(&rooms(3));
        for i in 1..=3 {
            let set = tracker.reachable_from(RoomId(i)).unwrap();
            assert_eq!(set.len(), 1);
            assert!(set.contains(&RoomId(i)));
        }
        assert!(!tracker.is_fully_connected());
    }

    #[test]
    fn test_union_propagates_to_all_members() {
        let mut tracker = ConnectivityTracker::init(&rooms(4));
        tracker.union(RoomId(1), RoomId(2));
        tracker.union(RoomId(3), RoomId(4));
        assert!(!tracker.is_fully_connected());

        // Joining the two clusters must close over all four members.
        tracker.union(RoomId(2), RoomId(3));
        assert!(tracker.is_fully_connected());
        for i in 1..=4 {
            assert_eq!(tracker.reachable_from(RoomId(i)).unwrap().len(), 4);
        }
    }

    #[test]
    fn test_union_idempotent_on_shared_reachability() {
        let mut tracker = ConnectivityTracker::init(&rooms(3));
        tracker.union(RoomId(1), RoomId(2));
        tracker.union(RoomId(1), RoomId(2));
        tracker.union(RoomId(2), RoomId(1));
        let set = tracker.reachable_from(RoomId(1)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&RoomId(3)));
    }

    #[test]
    fn test_self_union_harmless() {
        let mut tracker = ConnectivityTracker::init(&rooms(2));
        tracker.union(RoomId(1), RoomId(1));
        assert_eq!(tracker.reachable_from(RoomId(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_unconnected_pairs() {
        let mut tracker = ConnectivityTracker::init(&rooms(3));
        tracker.union(RoomId(1), RoomId(2));
        let pairs = tracker.unconnected_pairs();
        assert_eq!(pairs.len(), 3);
        assert_eq!(
            pairs.get(&RoomId(1)).unwrap(),
            &BTreeSet::from([RoomId(3)])
        );
        assert_eq!(
            pairs.get(&RoomId(3)).unwrap(),
            &BTreeSet::from([RoomId(1), RoomId(2)])
        );

        tracker.union(RoomId(2), RoomId(3));
        assert!(tracker.unconnected_pairs().is_empty());
    }

    #[test]
    fn test_single_room_is_connected() {
        let tracker = ConnectivityTracker::init(&rooms(1));
        assert!(tracker.is_fully_connected());
    }
}
