//! Opaque handles for elements, particles, tweens, timers and listeners

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a handle from a raw value (for content descriptors/testing)
            pub fn from_raw(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw u64 value
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

handle!(
    /// A reveal candidate supplied by the content layer. Lantern never
    /// dereferences it; it only keys per-element visual state.
    ElementRef
);
handle!(
    /// A live decorative particle, valid until its animation completes.
    ParticleId
);
handle!(
    /// An in-flight tween on some `Animator`.
    TweenHandle
);
handle!(
    /// A timeout or interval armed on the scheduler.
    TimerId
);
handle!(
    /// An event-bus subscription.
    ListenerId
);

/// Issues monotonically increasing handles for one arena.
///
/// Each arena owns its own allocator so that a session replays identically
/// from the same inputs; handles are never reused within an arena.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next handle
    pub fn next<T: From<u64>>(&mut self) -> T {
        let id = self.next;
        self.next += 1;
        T::from(id)
    }

    /// Number of handles issued so far
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}
