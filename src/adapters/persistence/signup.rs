use async_trait::async_trait;
use mongodb::bson::{self, Bson, doc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    adapters::persistence::MongoPersistence,
    app_error::{AppError, AppResult},
    domain::entities::signup::{Signup, SignupKind},
    use_cases::signup::SignupRepo,
};

// Signup as stored in a collection. Absent optionals are left out of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupDoc {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_food: Option<String>,
    pub created_at: bson::DateTime,
}

impl From<&Signup> for SignupDoc {
    fn from(signup: &Signup) -> Self {
        let profile = signup.profile.clone();
        SignupDoc {
            email: signup.email.clone(),
            name: signup.name.clone(),
            course: profile.course,
            other_course: profile.other_course,
            fav_color: profile.fav_color,
            nickname: profile.nickname,
            fav_food: profile.fav_food,
            created_at: bson::DateTime::from_millis(signup.created_at.timestamp_millis()),
        }
    }
}

/// Projection used by the existence check. Older records may hold profile
/// values of any type, so nothing besides `_id` is read back.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredId {
    #[serde(rename = "_id")]
    pub id: Bson,
}

#[async_trait]
impl SignupRepo for MongoPersistence {
    async fn exists_by_email(&self, kind: SignupKind, email: &str) -> AppResult<bool> {
        let found = self
            .ids(kind)
            .find_one(doc! { "email": email })
            .projection(doc! { "_id": 1 })
            .await
            .map_err(AppError::from)?;
        if let Some(StoredId { id }) = &found {
            debug!(%id, %kind, "Existing signup found");
        }
        Ok(found.is_some())
    }

    async fn insert(&self, kind: SignupKind, signup: &Signup) -> AppResult<()> {
        self.collection(kind)
            .insert_one(SignupDoc::from(signup))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn count(&self, kind: SignupKind) -> AppResult<u64> {
        self.collection(kind)
            .count_documents(doc! {})
            .await
            .map_err(AppError::from)
    }
}
