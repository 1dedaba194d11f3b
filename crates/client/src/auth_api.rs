use serde_json::Value;
use shared_types::{
    AppError, AuthResponse, AuthUser, CreateUserRequest, DeleteUserRequest, LoginRequest,
    SignupRequest, UpdateRoleRequest,
};
use validator::Validate;

use crate::http::ApiClient;
use crate::session::SessionContext;

/// Typed surface over the auth endpoints. Successful login/signup install a
/// session into the shared [`SessionContext`]; logout always clears it, even
/// when the backend call fails.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn session(&self) -> &SessionContext {
        self.client.session()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthUser, AppError> {
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self.client.post_public("/auth/login", &body).await?;
        let session = self.session().establish(&resp);
        tracing::info!(username = %session.user.username, "logged in");
        Ok(session.user)
    }

    /// Validates locally first so obviously-bad input never leaves the client.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthUser, AppError> {
        request.validate()?;
        let resp: AuthResponse = self.client.post_public("/auth/signup", request).await?;
        let session = self.session().establish(&resp);
        Ok(session.user)
    }

    /// Best-effort server-side logout; the local session is cleared no matter
    /// what the backend says.
    pub async fn logout(&self) {
        let result: Result<Value, AppError> = self.client.post_empty("/auth/logout").await;
        if let Err(err) = result {
            tracing::debug!(%err, "server-side logout failed; clearing local session anyway");
        }
        self.session().clear();
    }

    /// Re-fetch the caller's profile and refresh the cached copy.
    pub async fn me(&self) -> Result<AuthUser, AppError> {
        let user: AuthUser = self.client.get("/auth/me", &[]).await?;
        self.session().update_user(user.clone());
        Ok(user)
    }

    pub async fn users(&self) -> Result<Vec<AuthUser>, AppError> {
        self.client.get("/auth/users", &[]).await
    }

    pub async fn update_role(&self, request: &UpdateRoleRequest) -> Result<(), AppError> {
        let _: Value = self.client.post("/auth/update-role", request).await?;
        Ok(())
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<AuthUser, AppError> {
        request.validate()?;
        if request.password != request.confirm_password {
            return Err(AppError::validation("Passwords do not match"));
        }
        self.client.post("/auth/create-user", request).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        let _: Value = self
            .client
            .post("/auth/delete-user", &DeleteUserRequest { user_id })
            .await?;
        Ok(())
    }
}
