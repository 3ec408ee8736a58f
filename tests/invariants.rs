//! Randomized gesture sequences against the engine's standing guarantees:
//! items stay inside the viewport, the two-finger scale stays within its
//! limits, and no resize session outlives its anchor.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use multitouch::config::{EngineConfig, GridSnapConfig};
use multitouch::engine::EngineCore;
use multitouch::geometry::{Point, Rect, Size};
use multitouch::grid::{GridLine, GridModel};
use multitouch::input::{Touch, TouchBatch, TouchId, TouchPhase};
use multitouch::item::{Item, ItemId, ItemKind};
use multitouch::session::GestureState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VIEW: Size = Size { width: 400.0, height: 800.0 };
const EPS: f64 = 1e-6;
const STEPS: usize = 2_000;

fn canvas_grid() -> GridModel {
    GridModel::new(vec![
        GridLine::vertical(80.0),
        GridLine::vertical(160.0),
        GridLine::vertical(240.0),
        GridLine::horizontal(200.0),
        GridLine::horizontal(350.0),
        GridLine::horizontal(500.0),
    ])
}

fn canvas_items() -> Vec<Item> {
    vec![
        Item::new(ItemKind::Shape, Rect::new(20.0, 40.0, 120.0, 90.0)),
        Item::new(ItemKind::Image { name: "photo".into() }, Rect::new(200.0, 300.0, 100.0, 100.0)),
        Item::new(ItemKind::Shape, Rect::new(150.0, 600.0, 60.0, 60.0)),
        Item::new(ItemKind::Text { text: "caption".into() }, Rect::new(100.0, 450.0, 120.0, 60.0)),
    ]
}

fn random_point(rng: &mut StdRng) -> Point {
    // Reach a little past the edges so clamping is exercised.
    Point::new(rng.random_range(-40.0..440.0), rng.random_range(-40.0..840.0))
}

/// The item under a two-finger gesture, if any.
fn resizing_item(core: &EngineCore) -> Option<&Item> {
    core.items()
        .iter()
        .find(|item| core.gesture_state(&item.id) == GestureState::ResizingRotating)
}

fn run(seed: u64, config: EngineConfig) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut core = EngineCore::new(canvas_items(), canvas_grid(), config);
    let mut live: BTreeMap<u64, Point> = BTreeMap::new();
    let mut next_id = 0u64;
    let mut clock = 0u64;
    let mut resize_start: Option<(ItemId, Size)> = None;

    for step in 0..STEPS {
        clock += rng.random_range(0..400);
        let roll = rng.random_range(0..10);

        let batch = if live.is_empty() || (roll < 3 && live.len() < 4) {
            next_id += 1;
            let at = random_point(&mut rng);
            live.insert(next_id, at);
            TouchBatch::new(TouchPhase::Began, vec![Touch::at(TouchId(next_id), at)], VIEW, clock)
        } else if roll < 8 {
            let mut touches = Vec::new();
            for (id, at) in &mut live {
                if rng.random_bool(0.7) {
                    let to = Point::new(at.x + rng.random_range(-60.0..60.0), at.y + rng.random_range(-60.0..60.0));
                    touches.push(Touch::moved(TouchId(*id), *at, to));
                    *at = to;
                }
            }
            TouchBatch::new(TouchPhase::Moved, touches, VIEW, clock)
        } else {
            let ids: Vec<u64> = live.keys().copied().collect();
            let id = ids[rng.random_range(0..ids.len())];
            let at = live.remove(&id).unwrap_or_default();
            let phase = if roll == 8 { TouchPhase::Ended } else { TouchPhase::Cancelled };
            TouchBatch::new(phase, vec![Touch::at(TouchId(id), at)], VIEW, clock)
        };

        let was_resizing = core.is_resizing_active();
        core.handle(&batch);

        // Boundary and rotation fields.
        for item in core.items() {
            assert!(item.rect.is_within(VIEW, EPS), "seed {seed} step {step}: {:?} left the viewport", item.rect);
            assert!(item.cumulative_rotation.is_finite(), "seed {seed} step {step}: rotation not finite");
            assert!(
                (0.0..TAU).contains(&item.display_rotation),
                "seed {seed} step {step}: display rotation {} not wrapped",
                item.display_rotation
            );
        }

        // Cascade: a resize never exists without its drag.
        if core.is_resizing_active() {
            assert!(core.is_dragging_active(), "seed {seed} step {step}: resize outlived its anchor");
        }
        assert!(core.session_count() <= 2, "seed {seed} step {step}: more than two sessions");

        // Scale limits, relative to the size when the resize began.
        if !core.is_resizing_active() {
            resize_start = None;
        } else if !was_resizing {
            resize_start = resizing_item(&core).map(|item| (item.id, item.rect.size()));
        } else if let Some((id, start)) = resize_start {
            let Some(item) = core.item(&id) else { continue };
            if item.is_text() {
                continue;
            }
            let ratio = item.rect.width / start.width;
            assert!(
                (0.3 - EPS..=3.0 + EPS).contains(&ratio),
                "seed {seed} step {step}: scale {ratio} outside limits"
            );
        }
    }
}

#[test]
fn random_gestures_with_default_config() {
    for seed in 0..8 {
        run(seed, EngineConfig::default());
    }
}

#[test]
fn random_gestures_with_attraction_band() {
    let config = EngineConfig { grid: GridSnapConfig::new(12.0, 8.0, 3.0), ..Default::default() };
    for seed in 100..108 {
        run(seed, config);
    }
}

#[test]
fn ending_all_touches_clears_everything() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut core = EngineCore::new(canvas_items(), canvas_grid(), EngineConfig::default());

    for round in 0..50u64 {
        let ids = [round * 3 + 1, round * 3 + 2, round * 3 + 3];
        for id in ids {
            let at = random_point(&mut rng);
            core.handle(&TouchBatch::new(TouchPhase::Began, vec![Touch::at(TouchId(id), at)], VIEW, round * 1_000));
        }
        let touches = ids.iter().map(|id| Touch::at(TouchId(*id), Point::default())).collect();
        core.handle(&TouchBatch::new(TouchPhase::Ended, touches, VIEW, round * 1_000 + 10));

        assert_eq!(core.session_count(), 0);
        assert!(!core.is_grid_active());
    }
}
