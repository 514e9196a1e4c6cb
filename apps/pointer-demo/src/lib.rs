//! Scripted multi-touch sessions replayed through a [`PointerPool`].
//!
//! A [`Session`] is a list of frames, each a list of [`TouchEvent`]s keyed
//! by finger number. [`replay`] feeds them through the pool in frame phase
//! order and reports what every pointer saw.

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use tactus_geometry::{Point, Rect};
use tactus_input::{
    HitResolver, InputSourceId, LayerId, PointerButton, PointerId, PointerKind, PointerPool,
    PoolSettings, Recycle,
};
use tactus_testing::LayerScene;

pub const TOUCH_SCREEN: InputSourceId = InputSourceId(0);

pub const BACKGROUND: LayerId = LayerId(0);
pub const SLIDER: LayerId = LayerId(1);
pub const BUTTON: LayerId = LayerId(2);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    Down { finger: u32, x: f32, y: f32 },
    Move { finger: u32, x: f32, y: f32 },
    Up { finger: u32 },
    /// A consumer keeps the finger's pointer alive past its lift.
    Hold { finger: u32 },
    /// The consumer lets go again.
    Unhold { finger: u32 },
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub frames: Vec<Vec<TouchEvent>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(mut self, events: impl IntoIterator<Item = TouchEvent>) -> Self {
        self.frames.push(events.into_iter().collect());
        self
    }
}

/// What a replay observed.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// One line per bound pointer per frame.
    pub lines: Vec<String>,
    /// Layers a finger was over when lifted, keyed by finger.
    pub lifted_over: HashMap<u32, Option<LayerId>>,
    /// Layers a finger pressed on, keyed by finger.
    pub pressed_on: HashMap<u32, Option<LayerId>>,
    /// Pointers still bound after the last frame.
    pub still_bound: usize,
}

/// Screen used by the demo: a slider track with a button next to it.
pub fn demo_scene() -> LayerScene {
    LayerScene::new()
        .with_layer(BACKGROUND, Rect::new(0.0, 0.0, 320.0, 240.0))
        .with_layer(SLIDER, Rect::new(20.0, 100.0, 200.0, 40.0))
        .with_layer(BUTTON, Rect::new(240.0, 100.0, 60.0, 40.0))
}

/// Two fingers: one drags the slider thumb while a second taps the
/// button; the slider finger is held by a consumer across its lift.
pub fn demo_session() -> Session {
    Session::new()
        .frame([TouchEvent::Down {
            finger: 1,
            x: 30.0,
            y: 120.0,
        }])
        .frame([
            TouchEvent::Hold { finger: 1 },
            TouchEvent::Move {
                finger: 1,
                x: 80.0,
                y: 120.0,
            },
        ])
        .frame([
            TouchEvent::Move {
                finger: 1,
                x: 150.0,
                y: 122.0,
            },
            TouchEvent::Down {
                finger: 2,
                x: 260.0,
                y: 110.0,
            },
        ])
        .frame([TouchEvent::Up { finger: 2 }])
        .frame([TouchEvent::Move {
            finger: 1,
            x: 235.0,
            y: 125.0,
        }])
        .frame([TouchEvent::Up { finger: 1 }])
        .frame([TouchEvent::Unhold { finger: 1 }])
}

pub fn replay<R>(session: &Session, settings: PoolSettings, resolver: &R) -> anyhow::Result<Report>
where
    R: HitResolver + ?Sized,
{
    let mut pool = PointerPool::with_settings(settings);
    let mut fingers: HashMap<u32, PointerId> = HashMap::new();
    let mut report = Report::default();

    for (frame, events) in session.frames.iter().enumerate() {
        pool.begin_frame();
        let mut lifted = Vec::new();

        for event in events {
            match *event {
                TouchEvent::Down { finger, x, y } => {
                    let id = pool
                        .activate(TOUCH_SCREEN, PointerKind::Touch, Point::new(x, y), resolver)
                        .with_context(|| format!("finger {finger} down in frame {frame}"))?;
                    let pointer = pool
                        .get_mut(id)
                        .ok_or_else(|| anyhow!("pointer {id} vanished after activation"))?;
                    pointer.press_button(PointerButton::Primary);
                    report
                        .pressed_on
                        .insert(finger, pointer.press_data().target());
                    fingers.insert(finger, id);
                }
                TouchEvent::Move { finger, x, y } => {
                    let id = finger_id(&fingers, finger)?;
                    if let Some(pointer) = pool.get_mut(id) {
                        pointer.set_position(Point::new(x, y));
                    }
                }
                TouchEvent::Up { finger } => {
                    let id = finger_id(&fingers, finger)?;
                    if let Some(pointer) = pool.get_mut(id) {
                        pointer.release_button(PointerButton::Primary);
                    }
                    lifted.push((finger, id));
                }
                TouchEvent::Hold { finger } => {
                    let id = finger_id(&fingers, finger)?;
                    pool.retain(id)?;
                }
                TouchEvent::Unhold { finger } => {
                    let id = finger_id(&fingers, finger)?;
                    let left = pool.release(id)?;
                    log::info!("finger {finger} unheld, {left} holder(s) left");
                    if !pool.contains(id) {
                        fingers.remove(&finger);
                    }
                }
            }
        }

        pool.commit_frame();

        for pointer in pool.iter_mut() {
            let over = pointer.over_data(resolver, false).target();
            let line = format!("frame {frame}: {pointer} over={over:?}");
            log::info!("{line}");
            report.lines.push(line);
        }

        // Lifts happen after consumers saw the release edge.
        for (finger, id) in lifted {
            let over = pool
                .get_mut(id)
                .and_then(|pointer| pointer.over_data(resolver, false).target());
            report.lifted_over.insert(finger, over);
            match pool.lift(id)? {
                Recycle::Now => {
                    log::debug!("finger {finger} recycled");
                    fingers.remove(&finger);
                }
                // Still reachable for the holder's final release.
                Recycle::Deferred => log::debug!("finger {finger} lifted while held"),
            }
        }
    }

    report.still_bound = pool.len();
    Ok(report)
}

fn finger_id(fingers: &HashMap<u32, PointerId>, finger: u32) -> anyhow::Result<PointerId> {
    fingers
        .get(&finger)
        .copied()
        .ok_or_else(|| anyhow!("finger {finger} is not down"))
}
