//! Viewport change coalescing and cooperative cancellation
//!
//! Viewport changes may arrive faster than counts complete. The notifier keeps only
//! the most recent viewport (last write wins) and bumps a generation counter on every
//! submission; a [`CancelToken`] taken for one generation reports itself superseded as
//! soon as a newer viewport has been submitted.

use crate::{Extent, Result, SignpostError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Pending {
    viewport: Option<Extent>,
    generation: u64,
}

/// Shared, clonable handle receiving viewport-change notifications
///
/// Clones share the same queue, so the handle can be given to whatever delivers map
/// events (including another thread) while the engine drains it.
#[derive(Debug, Clone, Default)]
pub struct ViewportNotifier {
    pending: Arc<Mutex<Pending>>,
    generation: Arc<AtomicU64>,
}

impl ViewportNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new viewport, replacing any viewport not yet processed
    ///
    /// Any count running for an older viewport observes the new generation at its
    /// next check and stops.
    pub fn submit(&self, viewport: Extent) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if pending.viewport.is_some() {
            tracing::trace!(generation, "Replacing unprocessed viewport");
        }
        pending.viewport = Some(viewport);
        pending.generation = generation;
    }

    /// Take the latest unprocessed viewport together with a token for its generation
    pub fn take(&self) -> Option<(Extent, CancelToken)> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let viewport = pending.viewport.take()?;
        Some((
            viewport,
            CancelToken {
                generation: self.generation.clone(),
                started_at: pending.generation,
            },
        ))
    }

    /// Whether a viewport is waiting to be processed
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .viewport
            .is_some()
    }

    /// Token bound to the current generation, without consuming any pending viewport
    pub fn token(&self) -> CancelToken {
        CancelToken {
            generation: self.generation.clone(),
            started_at: self.generation.load(Ordering::Acquire),
        }
    }

    /// Number of viewports submitted so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

/// Cooperative cancellation flag for one computation
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: Arc<AtomicU64>,
    started_at: u64,
}

impl CancelToken {
    /// A token that is never superseded
    pub fn never() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            started_at: 0,
        }
    }

    /// Whether a newer viewport has been submitted since this token was taken
    #[inline]
    pub fn is_superseded(&self) -> bool {
        self.generation.load(Ordering::Acquire) != self.started_at
    }

    /// `Err(Superseded)` once a newer viewport has been submitted
    #[inline]
    pub fn check(&self) -> Result<()> {
        let latest = self.generation.load(Ordering::Acquire);
        if latest == self.started_at {
            Ok(())
        } else {
            Err(SignpostError::Superseded { generation: latest })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(size: f64) -> Extent {
        Extent::new(size, size, -size, -size)
    }

    #[test]
    fn test_take_empty() {
        let notifier = ViewportNotifier::new();
        assert!(notifier.take().is_none());
        assert!(!notifier.has_pending());
    }

    #[test]
    fn test_last_write_wins() {
        let notifier = ViewportNotifier::new();
        notifier.submit(extent(1.0));
        notifier.submit(extent(2.0));
        notifier.submit(extent(3.0));

        let (viewport, token) = notifier.take().unwrap();
        assert_eq!(viewport, extent(3.0));
        assert!(!token.is_superseded());
        assert!(notifier.take().is_none());
        assert_eq!(notifier.generation(), 3);
    }

    #[test]
    fn test_token_superseded_by_new_submission() {
        let notifier = ViewportNotifier::new();
        notifier.submit(extent(1.0));
        let (_, token) = notifier.take().unwrap();
        assert!(token.check().is_ok());

        notifier.submit(extent(2.0));
        assert!(token.is_superseded());
        assert_eq!(
            token.check(),
            Err(SignpostError::Superseded { generation: 2 })
        );
    }

    #[test]
    fn test_clones_share_queue() {
        let notifier = ViewportNotifier::new();
        let handle = notifier.clone();

        std::thread::spawn(move || handle.submit(extent(4.0)))
            .join()
            .unwrap();

        assert!(notifier.has_pending());
        assert_eq!(notifier.take().unwrap().0, extent(4.0));
    }

    #[test]
    fn test_never_token() {
        assert!(CancelToken::never().check().is_ok());
    }
}
