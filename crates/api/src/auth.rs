use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use study_core::model::{UserContext, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

/// The signed-in account returned by signup and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
}

impl UserAccount {
    /// The per-call context for accessors scoped to this account.
    #[must_use]
    pub fn context(&self) -> UserContext {
        UserContext::new(self.user_id)
    }
}

/// Full user record from the user resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Typed accessors for signup, login and user lookup.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserAccount, ApiError> {
        self.client
            .post(
                "/auth/signup",
                &SignupRequest {
                    email,
                    password,
                    name,
                },
            )
            .await
    }

    /// Exchange credentials for the account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, ApiError> {
        self.client
            .post("/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn user(&self, id: UserId) -> Result<UserProfile, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }
}
