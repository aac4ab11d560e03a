#![no_main]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use arbitrary::Arbitrary;
use edgeswipe_core::{
    ScrollBehavior, ScrollContainer, ScrollMetrics, SwipeConfig, SwipeSwitcher, TouchInput,
    TouchPhase, TouchPoint,
};
use libfuzzer_sys::fuzz_target;
use web_time::Instant;

#[derive(Debug, Clone)]
struct Pane {
    offset: Rc<Cell<f64>>,
    content: f64,
    viewport: f64,
}

impl ScrollContainer for Pane {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.offset.get(), self.content, self.viewport)
    }

    fn scroll_to(&self, offset: f64, _behavior: ScrollBehavior) {
        self.offset.set(offset);
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Touch { phase: u8, x: i16, y: i16, empty: bool },
    Scroll(i16),
    Tap(u8),
    Tick,
}

#[derive(Debug, Arbitrary)]
struct Input {
    item_count: u8,
    initial: u8,
    threshold: u8,
    ops: Vec<(u8, Op)>,
}

fuzz_target!(|input: Input| {
    let count = usize::from(input.item_count % 16);
    let config = SwipeConfig {
        threshold: f64::from(input.threshold),
        ..SwipeConfig::default()
    };
    let pane = Pane {
        offset: Rc::new(Cell::new(0.0)),
        content: 2000.0,
        viewport: 600.0,
    };
    let mut switcher = SwipeSwitcher::new(config, usize::from(input.initial), count);
    switcher.bind_container(pane.clone());

    let base = Instant::now();
    let mut elapsed = 0u64;
    let mut last_switch: Option<u64> = None;

    for (gap, op) in input.ops {
        elapsed += u64::from(gap);
        let now = base + Duration::from_millis(elapsed);
        match op {
            Op::Touch { phase, x, y, empty } => {
                let phase = match phase % 4 {
                    0 => TouchPhase::Start,
                    1 => TouchPhase::Move,
                    2 => TouchPhase::End,
                    _ => TouchPhase::Cancel,
                };
                let touches = if empty {
                    Vec::new()
                } else {
                    vec![TouchPoint::new(f64::from(x), f64::from(y))]
                };
                let event = TouchInput { phase, touches };
                if let Some(index) = switcher.process(&event, now, &mut || {}) {
                    // Swipe-driven switches are spaced by the navigation lock.
                    if let Some(prev) = last_switch {
                        assert!(elapsed - prev >= 300, "switches {prev} and {elapsed} too close");
                    }
                    last_switch = Some(elapsed);
                    assert!(index < count);
                }
            }
            Op::Scroll(offset) => {
                pane.offset.set(f64::from(offset).clamp(0.0, 1400.0));
                switcher.on_scroll(now);
            }
            Op::Tap(index) => {
                let accepted = switcher.select(usize::from(index));
                assert_eq!(accepted, usize::from(index) < count);
            }
            Op::Tick => {
                switcher.tick(now);
            }
        }

        if count == 0 {
            assert_eq!(switcher.active_index(), 0);
        } else {
            assert!(switcher.active_index() < count);
        }
        let nav = switcher.navigation();
        if let Some(target) = nav.top_hint_target() {
            assert!(target + 1 == switcher.active_index());
        }
        if let Some(target) = nav.bottom_hint_target() {
            assert_eq!(target, switcher.active_index() + 1);
            assert!(target < count);
        }
    }
});
