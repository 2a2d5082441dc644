//! Featured carousel on the home screen
//!
//! The carousel cycles through the first few catalogue titles. Rotation runs
//! on a background task that only holds a weak reference to the session and
//! is aborted when its [`RotationHandle`] is dropped.

use crate::models::Title;
use crate::services::catalogue::Catalogue;
use std::sync::Weak;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Number of leading catalogue titles the carousel cycles through
pub const FEATURED_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturedCarousel {
    len: usize,
    index: usize,
}

impl FeaturedCarousel {
    pub fn for_catalogue(catalogue: &Catalogue) -> Self {
        Self {
            len: catalogue.len().min(FEATURED_COUNT),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves to the next slide, wrapping around
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Jumps to a slide; out-of-range indexes are refused
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn slides<'a>(&self, catalogue: &'a Catalogue) -> &'a [Title] {
        &catalogue.titles()[..self.len.min(catalogue.len())]
    }

    pub fn current<'a>(&self, catalogue: &'a Catalogue) -> Option<&'a Title> {
        self.slides(catalogue).get(self.index)
    }
}

/// Background task advancing a carousel held inside some shared state
///
/// Dropping the handle aborts the task, so no tick can land after the owning
/// view is gone.
#[derive(Debug)]
pub struct RotationHandle {
    task: JoinHandle<()>,
}

impl RotationHandle {
    pub fn spawn<S, F>(state: Weak<RwLock<S>>, period: Duration, advance: F) -> Self
    where
        S: Send + Sync + 'static,
        F: Fn(&mut S) + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);

            loop {
                ticker.tick().await;
                let Some(state) = state.upgrade() else {
                    tracing::debug!("Featured rotation stopped: session dropped");
                    break;
                };
                let mut guard = state.write().await;
                advance(&mut *guard);
            }
        });

        tracing::debug!(period_secs = period.as_secs(), "Featured rotation started");

        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
