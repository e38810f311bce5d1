use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteError, WriteFailure},
    options::IndexOptions,
};
use strum::IntoEnumIterator;
use tracing::info;

use crate::{
    app_error::AppError,
    domain::entities::signup::{CollectionNames, SignupKind},
};

pub mod signup;

use signup::{SignupDoc, StoredId};

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoPersistence {
    db: Database,
    collections: CollectionNames,
}

impl MongoPersistence {
    pub fn new(db: Database, collections: CollectionNames) -> Self {
        MongoPersistence { db, collections }
    }

    pub(crate) fn collection(&self, kind: SignupKind) -> Collection<SignupDoc> {
        self.db.collection(self.collections.get(kind))
    }

    /// Same collection, read back as `_id` only.
    pub(crate) fn ids(&self, kind: SignupKind) -> Collection<StoredId> {
        self.db.collection(self.collections.get(kind))
    }

    /// Adds a unique index on `email` to every signup collection, turning
    /// concurrent duplicate inserts into duplicate-key errors. Fails if a
    /// collection already holds duplicates.
    pub async fn ensure_unique_email_indexes(&self) -> Result<(), mongodb::error::Error> {
        for kind in SignupKind::iter() {
            let index = IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .name("email_unique".to_string())
                        .unique(true)
                        .build(),
                )
                .build();
            self.collection(kind).create_index(index).await?;
            info!(
                %kind,
                collection = self.collections.get(kind),
                "Unique email index ensured"
            );
        }
        Ok(())
    }
}

pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError {
            code: DUPLICATE_KEY_CODE,
            ..
        }))
    )
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return AppError::DuplicateEmail;
        }
        // Log the actual error for debugging, but don't expose details
        tracing::error!(error = %err, "Database error");
        AppError::StoreUnavailable("Database operation failed".into())
    }
}
