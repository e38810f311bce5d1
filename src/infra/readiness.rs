use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::signup::SignupUseCases,
};

/// Readiness gate in front of every store-touching route.
///
/// Starts closed and opens exactly once, when startup hands over a service
/// built on a connected store. Clones share the same state.
#[derive(Clone, Default)]
pub struct StoreGate {
    signups: Arc<OnceCell<Arc<SignupUseCases>>>,
}

impl StoreGate {
    /// A closed gate; every lookup fails with `StoreNotReady` until `open`.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Returns false if the gate was already open; the first service wins.
    pub fn open(&self, signups: SignupUseCases) -> bool {
        self.signups.set(Arc::new(signups)).is_ok()
    }

    pub fn signups(&self) -> AppResult<Arc<SignupUseCases>> {
        self.signups.get().cloned().ok_or(AppError::StoreNotReady)
    }
}
