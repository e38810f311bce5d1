//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::signup::{InviteProfile, Signup};

/// Create a test signup with sensible defaults (a bare waitlist entry).
pub fn create_test_signup(overrides: impl FnOnce(&mut Signup)) -> Signup {
    let mut signup = Signup {
        email: "user@example.com".to_string(),
        name: None,
        profile: InviteProfile::default(),
        created_at: test_datetime(),
    };
    overrides(&mut signup);
    signup
}

/// Fixed timestamp for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45)
        .single()
        .expect("valid test timestamp")
}
