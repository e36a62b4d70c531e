use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use dragcal_core::Session;

use crate::routes::AppError;

/// Shared application state
///
/// The core is single-threaded; one mutex around the whole session keeps
/// interactions from interleaving. Handlers never await while holding it.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        AppState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session
            .lock()
            .map_err(|_| AppError::from(anyhow!("Session lock poisoned")))
    }
}
