use murmuration_lib::{Boid, SpatialIndex, Swarm, SwarmConfig, Vec2};
use proptest::prelude::*;

prop_compose! {
    fn arb_position()(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0
    ) -> (f64, f64) {
        (x, y)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_index_completeness_for_arbitrary_positions(
        positions in prop::collection::vec(arb_position(), 0..200),
        cell_size in 5.0f64..100.0
    ) {
        let boids: Vec<Boid> = positions
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Boid::new(id, Vec2::new(x, y)))
            .collect();

        let mut index = SpatialIndex::new(cell_size);
        index.rebuild(&boids);

        let mut ids = Vec::new();
        index.iter_bounds(Vec2::new(-500.0, -500.0), Vec2::new(500.0, 500.0), |id| {
            ids.push(id);
        });
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..boids.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_neighbours_never_include_self(
        positions in prop::collection::vec(arb_position(), 1..100),
        cell_size in 5.0f64..100.0
    ) {
        let boids: Vec<Boid> = positions
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Boid::new(id, Vec2::new(x, y)))
            .collect();

        let mut index = SpatialIndex::new(cell_size);
        index.rebuild(&boids);

        for b in &boids {
            let mut saw_self = false;
            index.iter_neighbours(b, |id| saw_self |= id == b.id);
            prop_assert!(!saw_self, "boid {} visited itself", b.id);
        }
    }

    #[test]
    fn test_speed_band_holds_for_any_seed(seed in any::<u64>()) {
        let mut config = SwarmConfig::default();
        config.flock.seed = seed;
        config.flock.size = 30;
        config.flock.workers = 3;
        config.spawn.max = Vec2::new(100.0, 100.0);

        let mut swarm = Swarm::new(config).unwrap();
        let target = swarm.config().spawn_center();
        swarm.update(true, target).unwrap();

        let rules = swarm.config().rules.clone();
        for b in swarm.boids() {
            let speed = b.vel.length();
            prop_assert!(speed.is_finite());
            prop_assert!(speed >= rules.vel_min - 1e-9);
            prop_assert!(speed <= rules.vel_max + 1e-9);
        }
    }

    #[test]
    fn test_round_is_idempotent_quantization((x, y) in arb_position()) {
        let v = Vec2::new(x, y);
        let rounded = v.round();
        prop_assert_eq!(rounded.round(), rounded);
        prop_assert!((rounded.x - x).abs() <= 5e-7);
        prop_assert!((rounded.y - y).abs() <= 5e-7);
    }
}
