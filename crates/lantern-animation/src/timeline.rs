//! In-memory `Animator`: an arena of tweens keyed by handle

use crate::tween::{Animator, Completed, TweenSpec, VisualState};
use lantern_core::{IdAllocator, Millis, TweenHandle};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    spec: TweenSpec,
    started_at: Millis,
}

impl ActiveTween {
    fn ends_at(&self) -> Millis {
        self.started_at.saturating_add(self.spec.duration_ms)
    }

    fn elapsed(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }
}

/// Tween arena driven by the frame loop's virtual time.
///
/// Ordered by handle so completions are reported in start order.
#[derive(Default)]
pub struct Timeline {
    ids: IdAllocator,
    tweens: BTreeMap<TweenHandle, ActiveTween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animator for Timeline {
    fn start(&mut self, spec: TweenSpec, now: Millis) -> TweenHandle {
        let handle: TweenHandle = self.ids.next();
        self.tweens.insert(
            handle,
            ActiveTween {
                spec,
                started_at: now,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) -> bool {
        self.tweens.remove(&handle).is_some()
    }

    fn sample(&self, handle: TweenHandle, now: Millis) -> Option<VisualState> {
        self.tweens
            .get(&handle)
            .map(|t| t.spec.sample(t.elapsed(now)))
    }

    fn progress(&self, handle: TweenHandle, now: Millis) -> Option<f32> {
        self.tweens
            .get(&handle)
            .map(|t| t.spec.linear_progress(t.elapsed(now)))
    }

    fn advance(&mut self, now: Millis) -> Vec<Completed> {
        let done: Vec<TweenHandle> = self
            .tweens
            .iter()
            .filter(|(_, t)| t.ends_at() <= now)
            .map(|(h, _)| *h)
            .collect();

        done.into_iter()
            .filter_map(|handle| {
                self.tweens.remove(&handle).map(|t| Completed {
                    handle,
                    state: t.spec.to,
                })
            })
            .collect()
    }

    fn in_flight(&self) -> usize {
        self.tweens.len()
    }

    fn cancel_all(&mut self) -> usize {
        let count = self.tweens.len();
        self.tweens.clear();
        count
    }
}
