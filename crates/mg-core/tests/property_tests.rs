use mg_core::dungeon::{
    find_path, ConnectivityTracker, CurveBias, GenError, GenParams, Generator, Point, WaveField,
};
use mg_core::GenRng;
use proptest::prelude::*;

fn manhattan(a: Point, b: Point) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_rooms_never_collide(seed in any::<u64>()) {
        let params = GenParams {
            width: 70,
            height: 35,
            rooms_count: 6,
            room_size: (4, 8),
            ..GenParams::default()
        };
        // A rare seed may fail to connect; that is a legal outcome, only a
        // successful layout is held to the invariants.
        let Ok(dungeon) = Generator::with_seed(params, seed).unwrap().generate() else {
            return Ok(());
        };
        for (i, a) in dungeon.rooms.iter().enumerate() {
            for b in &dungeon.rooms[i + 1..] {
                prop_assert!(!a.overlaps_bordered(b));
            }
        }
    }

    #[test]
    fn prop_generated_layout_is_connected(seed in any::<u64>()) {
        let params = GenParams {
            width: 70,
            height: 35,
            rooms_count: 5,
            room_size: (4, 7),
            ..GenParams::default()
        };
        let dungeon = match Generator::with_seed(params, seed).unwrap().generate() {
            Ok(d) => d,
            Err(GenError::Infeasible { .. }) => return Ok(()),
            Err(e @ GenError::InvalidParams { .. }) => panic!("{}", e),
        };
        let mut tracker = ConnectivityTracker::init(&dungeon.rooms);
        for c in &dungeon.corridors {
            tracker.union(c.rooms.0, c.rooms.1);
        }
        for p in &dungeon.portals {
            tracker.union(p.rooms.0, p.rooms.1);
        }
        prop_assert!(tracker.is_fully_connected());
    }

    #[test]
    fn prop_path_length_is_manhattan_on_open_field(
        sx in 1usize..39, sy in 1usize..29,
        dx in 1usize..39, dy in 1usize..29,
        seed in any::<u64>(),
    ) {
        let base = WaveField::base(40, 30, &[]);
        let start = Point::new(sx, sy);
        let dest = Point::new(dx, dy);
        let mut rng = GenRng::new(seed);
        let path = find_path(&base, start, dest, CurveBias::Curved, &mut rng)
            .expect("open field always routes");
        prop_assert_eq!(path.len(), manhattan(start, dest) + 1);
        prop_assert_eq!(path[0], start);
        prop_assert_eq!(*path.last().unwrap(), dest);
        for pair in path.windows(2) {
            prop_assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }
}
