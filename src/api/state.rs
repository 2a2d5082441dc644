use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::models::{Brand, NavigationMode};
use crate::services::{featured::RotationHandle, Catalogue, RecommendationAdapter, Session};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub brands: Arc<Vec<Brand>>,
    pub recommender: RecommendationAdapter,
    rotation: Arc<Mutex<Option<RotationHandle>>>,
    rotation_period: Duration,
}

impl AppState {
    /// Creates the state for a fresh session on the home screen
    pub fn new(
        catalogue: Arc<Catalogue>,
        brands: Vec<Brand>,
        recommender: RecommendationAdapter,
        rotation_period: Duration,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new(catalogue))),
            brands: Arc::new(brands),
            recommender,
            rotation: Arc::new(Mutex::new(None)),
            rotation_period,
        }
    }

    pub fn brand(&self, brand_id: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == brand_id)
    }

    /// Runs the featured rotation while the home screen is shown, stops it otherwise
    ///
    /// The rotation lock is held while the mode is read, so concurrent calls
    /// apply in order and the last one always sees the latest mode.
    pub async fn sync_featured_rotation(&self) {
        let mut rotation = self.rotation.lock().await;
        let on_home = self.session.read().await.mode() == NavigationMode::Home;

        let running = rotation.as_ref().is_some_and(|handle| !handle.is_finished());

        if on_home && !running {
            *rotation = Some(RotationHandle::spawn(
                Arc::downgrade(&self.session),
                self.rotation_period,
                Session::advance_featured,
            ));
        } else if !on_home && rotation.take().is_some() {
            tracing::debug!("Featured rotation stopped: left home screen");
        }
    }

    pub async fn is_rotating(&self) -> bool {
        self.rotation
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
