//! Property-based tests for the movement resolver against a flat floor of blocks.

use proptest::prelude::*;
use sidecraft_physics::{
    HorizontalBounds, MoveInput, PhysicsParams, PhysicsResolver, PlayerState, Rect, SolidQuery,
};

fn floor(cols: std::ops::Range<i32>) -> Vec<Rect> {
    cols.map(|c| Rect::new(c as f64 * 50.0, 0.0, 50.0, 50.0)).collect()
}

proptest! {
    /// Property: strict overlap is symmetric and edge contact never counts.
    #[test]
    fn intersects_is_symmetric(
        ax in -100i32..100, ay in -100i32..100,
        bx in -100i32..100, by in -100i32..100,
    ) {
        let a = Rect::new(ax as f64, ay as f64, 50.0, 50.0);
        let b = Rect::new(bx as f64, by as f64, 50.0, 50.0);
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        let beside = Rect::new(a.right(), a.y, 50.0, 50.0);
        prop_assert!(!a.intersects(&beside));
    }

    /// Property: walking over a flat floor never sinks into it and stays in bounds.
    #[test]
    fn walking_on_floor_stays_on_top(moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..200)) {
        let world = floor(-20..20);
        let params = PhysicsParams::default();
        let resolver = PhysicsResolver::new(params);
        let bounds = HorizontalBounds { min_x: -500.0, max_x: 500.0 };
        let mut state = PlayerState::spawn_at(0.0, -50.0);
        state.on_ground = true;

        for (left, right, jump) in moves {
            resolver.step(&mut state, MoveInput { left, right, jump }, &world, Some(bounds));
            prop_assert!(world.solids_overlapping(&state.rect(&params)).is_empty());
            prop_assert!(state.y <= -50.0);
            prop_assert!(state.x >= bounds.min_x);
            prop_assert!(state.x + params.player_width <= bounds.max_x);
        }
    }
}
