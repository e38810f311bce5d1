use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::validators::{is_valid_email, is_valid_name},
    domain::entities::signup::{InviteProfile, Signup, SignupKind},
};

/// Port for the document store. Implementations only need an email existence
/// check, insert and count over the collection mapped to each kind.
#[async_trait]
pub trait SignupRepo: Send + Sync {
    /// Must not depend on the shape of the rest of a stored record.
    async fn exists_by_email(&self, kind: SignupKind, email: &str) -> AppResult<bool>;
    async fn insert(&self, kind: SignupKind, signup: &Signup) -> AppResult<()>;
    async fn count(&self, kind: SignupKind) -> AppResult<u64>;
}

/// Raw request body. Fields stay untyped so that type mismatches surface as
/// field-specific validation errors instead of generic body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub course: Option<Value>,
    pub other_course: Option<Value>,
    pub fav_color: Option<Value>,
    pub nickname: Option<Value>,
    pub fav_food: Option<Value>,
}

/// A payload that passed validation for a given kind, not yet timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSignup {
    pub email: String,
    pub name: Option<String>,
    pub profile: InviteProfile,
}

impl ValidatedSignup {
    pub fn into_signup(self, created_at: DateTime<Utc>) -> Signup {
        Signup {
            email: self.email,
            name: self.name,
            profile: self.profile,
            created_at,
        }
    }
}

pub const INVALID_NAME: &str = "Valid name required (2-100 chars)";
pub const INVALID_EMAIL: &str = "Valid email required";

/// Checks the payload against the rules for `kind`. Never touches the store.
///
/// Name is checked before email, and optional profile fields last, so the
/// first failing field determines the message.
pub fn validate(kind: SignupKind, payload: SignupPayload) -> AppResult<ValidatedSignup> {
    let name = if kind.requires_name() {
        match payload.name {
            Some(Value::String(name)) if is_valid_name(&name) => Some(name),
            _ => return Err(AppError::InvalidInput(INVALID_NAME.into())),
        }
    } else {
        None
    };

    let email = match payload.email {
        Some(Value::String(email)) if is_valid_email(&email) => email,
        _ => return Err(AppError::InvalidInput(INVALID_EMAIL.into())),
    };

    let profile = if kind.accepts_profile() {
        InviteProfile {
            course: optional_string(payload.course, "Course must be a string")?,
            other_course: optional_string(payload.other_course, "Other course must be a string")?,
            fav_color: optional_string(payload.fav_color, "Favorite color must be a string")?,
            nickname: optional_string(payload.nickname, "Nickname must be a string")?,
            fav_food: optional_string(payload.fav_food, "Favorite food must be a string")?,
        }
    } else {
        InviteProfile::default()
    };

    Ok(ValidatedSignup {
        email,
        name,
        profile,
    })
}

fn optional_string(value: Option<Value>, message: &str) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AppError::InvalidInput(message.into())),
    }
}

#[derive(Clone)]
pub struct SignupUseCases {
    repo: Arc<dyn SignupRepo>,
}

impl SignupUseCases {
    /// The repository must already be connected; readiness is tracked by the caller.
    pub fn new(repo: Arc<dyn SignupRepo>) -> Self {
        Self { repo }
    }

    /// Validate, reject known emails, then insert with a server timestamp.
    ///
    /// The existence check and the insert are two separate store calls, so
    /// concurrent submissions of the same email can both succeed unless the
    /// store enforces a unique index (in which case the insert itself fails
    /// with `DuplicateEmail`).
    #[instrument(skip(self, payload))]
    pub async fn submit(&self, kind: SignupKind, payload: SignupPayload) -> AppResult<Signup> {
        let valid = validate(kind, payload)?;

        if self.repo.exists_by_email(kind, &valid.email).await? {
            info!(email = %valid.email, "Email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let signup = valid.into_signup(Utc::now());
        self.repo.insert(kind, &signup).await?;
        info!(email = %signup.email, "Registered");

        Ok(signup)
    }

    #[instrument(skip(self))]
    pub async fn count_spots(&self, kind: SignupKind) -> AppResult<u64> {
        self.repo.count(kind).await
    }
}
