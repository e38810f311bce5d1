use chrono::{DateTime, Utc};
use strum::{Display, EnumIter};

/// The kind of signup being recorded. Each kind lives in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SignupKind {
    Waitlist,
    BetaRequest,
    BetaInvite,
}

impl SignupKind {
    /// Whether a `name` field is mandatory for this kind.
    pub fn requires_name(&self) -> bool {
        matches!(self, SignupKind::BetaRequest | SignupKind::BetaInvite)
    }

    /// Whether the optional invite profile fields are read for this kind.
    pub fn accepts_profile(&self) -> bool {
        matches!(self, SignupKind::BetaInvite)
    }
}

/// Maps each signup kind to the collection it is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub waitlist: String,
    pub beta_request: String,
    pub beta_invite: String,
}

impl CollectionNames {
    pub fn get(&self, kind: SignupKind) -> &str {
        match kind {
            SignupKind::Waitlist => &self.waitlist,
            SignupKind::BetaRequest => &self.beta_request,
            SignupKind::BetaInvite => &self.beta_invite,
        }
    }
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            waitlist: "waitlist".to_string(),
            beta_request: "beta_request".to_string(),
            beta_invite: "beta_invite".to_string(),
        }
    }
}

/// Optional profile answers collected on the beta invite form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteProfile {
    pub course: Option<String>,
    pub other_course: Option<String>,
    pub fav_color: Option<String>,
    pub nickname: Option<String>,
    pub fav_food: Option<String>,
}

/// A persisted signup. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub email: String,
    pub name: Option<String>,
    pub profile: InviteProfile,
    pub created_at: DateTime<Utc>,
}
