use std::sync::Arc;

use api::auth::UserAccount;
use storage::kv::{self, KeyValueStore, keys};

use crate::error::ProfileError;

/// The signed-in account, persisted across launches under a well-known key.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored account, `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when the store cannot be read or the stored
    /// value does not parse.
    pub async fn current(&self) -> Result<Option<UserAccount>, ProfileError> {
        Ok(kv::get_json(self.store.as_ref(), keys::USER).await?)
    }

    /// Persist the account after signup or login.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when the store cannot be written.
    pub async fn save(&self, account: &UserAccount) -> Result<(), ProfileError> {
        Ok(kv::set_json(self.store.as_ref(), keys::USER, account).await?)
    }

    /// Sign out: remove the stored account.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when the store cannot be written.
    pub async fn clear(&self) -> Result<(), ProfileError> {
        Ok(self.store.remove(keys::USER).await?)
    }
}
