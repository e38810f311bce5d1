//! In-memory mock implementations for the signup repository trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::signup::{Signup, SignupKind},
    use_cases::signup::SignupRepo,
};

/// In-memory implementation of SignupRepo for testing.
#[derive(Default)]
pub struct InMemorySignupRepo {
    signups: Mutex<HashMap<SignupKind, Vec<Signup>>>,
    calls: AtomicUsize,
    stale_reads: bool,
    unique_email: bool,
}

impl InMemorySignupRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one collection with initial signups.
    pub fn with_signups(kind: SignupKind, signups: Vec<Signup>) -> Self {
        let repo = Self::default();
        repo.signups.lock().unwrap().insert(kind, signups);
        repo
    }

    /// `exists_by_email` always misses, as if a concurrent request inserted
    /// right after this one checked.
    pub fn with_stale_reads(mut self) -> Self {
        self.stale_reads = true;
        self
    }

    /// Reject inserts of an existing email, like a unique index would.
    pub fn with_unique_email(mut self) -> Self {
        self.unique_email = true;
        self
    }

    /// Number of trait calls made so far (for asserting no store access).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self, kind: SignupKind) -> usize {
        self.all(kind).len()
    }

    /// Get all signups of a kind in insertion order (for test assertions).
    pub fn all(&self, kind: SignupKind) -> Vec<Signup> {
        self.signups
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SignupRepo for InMemorySignupRepo {
    async fn exists_by_email(&self, kind: SignupKind, email: &str) -> AppResult<bool> {
        self.record_call();
        if self.stale_reads {
            return Ok(false);
        }
        Ok(self
            .signups
            .lock()
            .unwrap()
            .get(&kind)
            .is_some_and(|list| list.iter().any(|s| s.email == email)))
    }

    async fn insert(&self, kind: SignupKind, signup: &Signup) -> AppResult<()> {
        self.record_call();
        let mut signups = self.signups.lock().unwrap();
        let list = signups.entry(kind).or_default();
        if self.unique_email && list.iter().any(|s| s.email == signup.email) {
            return Err(AppError::DuplicateEmail);
        }
        list.push(signup.clone());
        Ok(())
    }

    async fn count(&self, kind: SignupKind) -> AppResult<u64> {
        self.record_call();
        Ok(self
            .signups
            .lock()
            .unwrap()
            .get(&kind)
            .map_or(0, |list| list.len() as u64))
    }
}

/// Repository whose every call fails like an unreachable store.
#[derive(Default)]
pub struct FailingSignupRepo;

#[async_trait]
impl SignupRepo for FailingSignupRepo {
    async fn exists_by_email(&self, _kind: SignupKind, _email: &str) -> AppResult<bool> {
        Err(AppError::StoreUnavailable("Database operation failed".into()))
    }

    async fn insert(&self, _kind: SignupKind, _signup: &Signup) -> AppResult<()> {
        Err(AppError::StoreUnavailable("Database operation failed".into()))
    }

    async fn count(&self, _kind: SignupKind) -> AppResult<u64> {
        Err(AppError::StoreUnavailable("Database operation failed".into()))
    }
}
