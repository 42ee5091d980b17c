//! Unit tests for boids-agent.

#[cfg(test)]
mod builder {
    use crate::AgentStoreBuilder;
    use boids_core::EDGE_EPSILON;

    #[test]
    fn correct_count() {
        let store = AgentStoreBuilder::new(500, 1).build();
        assert_eq!(store.count, 500);
        assert_eq!(store.x.len(), 500);
        assert_eq!(store.vy.len(), 500);
        assert_eq!(store.steering.len(), 500);
    }

    #[test]
    fn zero_agents() {
        let store = AgentStoreBuilder::new(0, 0).build();
        assert!(store.is_empty());
    }

    #[test]
    fn unrandomized_starts_zeroed() {
        let store = AgentStoreBuilder::new(3, 0).build();
        assert!(store.x.iter().chain(&store.vx).all(|&v| v == 0.0));
    }

    #[test]
    fn randomized_positions_inside_plane() {
        let store = AgentStoreBuilder::new(2_000, 7).randomize(300, 200, 5.0).build();
        for i in 0..store.count {
            assert!(store.x[i] >= 0.0 && store.x[i] < 300.0 - EDGE_EPSILON, "x[{i}] = {}", store.x[i]);
            assert!(store.y[i] >= 0.0 && store.y[i] < 200.0 - EDGE_EPSILON, "y[{i}] = {}", store.y[i]);
        }
    }

    #[test]
    fn randomized_speed_is_exact() {
        let store = AgentStoreBuilder::new(100, 7).randomize(300, 200, 5.0).build();
        for id in store.agent_ids() {
            assert!((store.speed(id) - 5.0).abs() < 1e-4, "{id}: {}", store.speed(id));
        }
    }

    #[test]
    fn same_seed_same_placement() {
        let a = AgentStoreBuilder::new(50, 99).randomize(100, 100, 1.0).build();
        let b = AgentStoreBuilder::new(50, 99).randomize(100, 100, 1.0).build();
        assert_eq!(a.x, b.x);
        assert_eq!(a.vy, b.vy);
    }

    #[test]
    fn growing_population_keeps_existing_agents() {
        let small = AgentStoreBuilder::new(10, 3).randomize(100, 100, 1.0).build();
        let large = AgentStoreBuilder::new(20, 3).randomize(100, 100, 1.0).build();
        assert_eq!(small.x[..], large.x[..10]);
    }
}

#[cfg(test)]
mod store {
    use crate::AgentStoreBuilder;
    use boids_core::AgentId;
    use glam::Vec2;

    #[test]
    fn agent_ids_iterator() {
        let store = AgentStoreBuilder::new(5, 0).build();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3), AgentId(4)]);
    }

    #[test]
    fn place_writes_all_fields() {
        let mut store = AgentStoreBuilder::new(2, 0).build();
        store.place(AgentId(1), Vec2::new(3.0, 4.0), Vec2::new(-1.0, 0.5));
        assert_eq!(store.position(AgentId(1)), Vec2::new(3.0, 4.0));
        assert_eq!(store.velocity(AgentId(1)), Vec2::new(-1.0, 0.5));
        assert_eq!(store.position(AgentId(0)), Vec2::ZERO);
    }

    #[test]
    fn speed_is_norm() {
        let mut store = AgentStoreBuilder::new(1, 0).build();
        store.place(AgentId(0), Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_eq!(store.speed(AgentId(0)), 5.0);
    }
}
