//! Screen-change fan-out.
//!
//! Platform glue reports orientation, media, resize, viewport, fullscreen,
//! document-ready and virtual-keyboard changes through [`ScreenEvents::notify`].
//! Listeners hold no lock while they run, so they may subscribe or notify
//! reentrantly.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Why the screen state may have changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenChange {
    /// The platform orientation type changed.
    OrientationChange,
    /// The portrait/landscape media query flipped.
    MediaChange,
    /// The window was resized.
    Resize,
    /// The visual viewport scrolled.
    ViewportScroll,
    /// The visual viewport was resized.
    ViewportResize,
    /// Fullscreen was entered or left.
    FullscreenChange,
    /// The document finished loading.
    DocumentReady,
    /// The virtual keyboard changed its geometry.
    KeyboardGeometry,
    /// First frame after initialization.
    InitialFrame,
}

type Listener = dyn Fn(ScreenChange) + Send + Sync;

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    _listener: Arc<Listener>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Registry of screen-change listeners.
#[derive(Default)]
pub struct ScreenEvents {
    listeners: Mutex<Vec<Weak<Listener>>>,
}

impl ScreenEvents {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every subsequent change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ScreenChange) + Send + Sync + 'static,
    {
        let listener: Arc<Listener> = Arc::new(listener);
        self.listeners.lock().push(Arc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    /// Deliver `change` to every live listener, returning how many ran.
    pub fn notify(&self, change: ScreenChange) -> usize {
        let live: Vec<Arc<Listener>> = {
            let mut listeners = self.listeners.lock();
            listeners.retain(|weak| weak.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        trace!(?change, listeners = live.len(), "screen: notify");
        for listener in &live {
            listener(change);
        }
        live.len()
    }

    /// Number of listeners still subscribed.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl fmt::Debug for ScreenEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn notify_reaches_every_listener() {
        let events = ScreenEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h1 = hits.clone();
        let h2 = hits.clone();
        let _a = events.subscribe(move |_| {
            h1.fetch_add(1, Ordering::SeqCst);
        });
        let _b = events.subscribe(move |_| {
            h2.fetch_add(10, Ordering::SeqCst);
        });
        assert_eq!(events.notify(ScreenChange::Resize), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let events = ScreenEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let sub = events.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(events.listener_count(), 1);
        drop(sub);
        assert_eq!(events.listener_count(), 0);
        assert_eq!(events.notify(ScreenChange::OrientationChange), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listeners_may_notify_reentrantly() {
        let events = Arc::new(ScreenEvents::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner_events = events.clone();
        let inner_seen = seen.clone();
        let _sub = events.subscribe(move |change| {
            inner_seen.lock().push(change);
            if change == ScreenChange::FullscreenChange {
                inner_events.notify(ScreenChange::ViewportResize);
            }
        });
        events.notify(ScreenChange::FullscreenChange);
        assert_eq!(
            *seen.lock(),
            vec![ScreenChange::FullscreenChange, ScreenChange::ViewportResize]
        );
    }
}
