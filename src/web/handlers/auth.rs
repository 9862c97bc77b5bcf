//! Authentication handlers.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::auth::{classify, hash_password, resolve, verify_password, LoginKind, ResolveError};
use crate::db::{AccountRepository, NewAccount, NewRefreshToken, RefreshTokenRepository};
use crate::letter::LetterService;
use crate::web::dto::{
    AccountInfo, ApiResponse, LoginRequest, LoginResponse, LogoutRequest, MeResponse,
    RefreshRequest, RefreshResponse, SignupRequest, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorCode};
use crate::web::middleware::{AuthUser, JwtClaims};
use crate::Database;

/// Thread-safe database handle for the Web API.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Refresh token expiry in days.
    pub refresh_token_expiry: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: SharedDatabase,
        jwt_secret: &str,
        access_expiry: u64,
        refresh_expiry: u64,
    ) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    /// Generate an access token for an account.
    pub fn generate_access_token(
        &self,
        account_id: i64,
        username: &str,
    ) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: account_id,
            username: username.to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Generate a refresh token.
    pub fn generate_refresh_token(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Store a refresh token for an account.
    async fn store_refresh_token(&self, account_id: i64, token: &str) -> Result<(), ApiError> {
        let repo = RefreshTokenRepository::new(self.db.pool());
        let expires_at =
            chrono::Utc::now() + chrono::Duration::days(self.refresh_token_expiry as i64);
        let new_token = NewRefreshToken {
            account_id,
            token: token.to_string(),
            expires_at: expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        repo.create(&new_token).await.map_err(|e| {
            tracing::error!("Failed to store refresh token: {}", e);
            ApiError::internal("Failed to create session")
        })?;
        Ok(())
    }
}

/// POST /api/auth/signup - Account registration.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    // Validate input beyond the DTO-level length checks
    crate::auth::validate_username(&req.username).map_err(|e| {
        ApiError::field_error(ErrorCode::ValidationError, "username", e.to_string())
    })?;
    crate::auth::validate_email(&req.email)
        .map_err(|e| ApiError::field_error(ErrorCode::ValidationError, "email", e.to_string()))?;
    crate::auth::validate_password(&req.password).map_err(|e| {
        ApiError::field_error(ErrorCode::ValidationError, "password", e.to_string())
    })?;

    let repo = AccountRepository::new(state.db.pool());

    // Check both uniqueness constraints up front so the error names
    // the offending field
    if repo
        .username_exists(&req.username)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
    {
        return Err(ApiError::field_error(
            ErrorCode::Conflict,
            "username",
            "Username already taken",
        ));
    }
    if repo
        .email_exists(&req.email)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
    {
        return Err(ApiError::field_error(
            ErrorCode::Conflict,
            "email",
            "Email already registered",
        ));
    }

    // Hash password
    let password_hash =
        hash_password(&req.password).map_err(|_| ApiError::internal("Failed to hash password"))?;

    // Create account. The unique indexes still back up the check
    // above under concurrent signups.
    let account = repo
        .create(&NewAccount::new(&req.username, &req.email, &password_hash))
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                ApiError::conflict("Username or email already taken")
            } else {
                tracing::error!("Account creation failed: {}", e);
                ApiError::internal("Failed to create account")
            }
        })?;

    // Generate tokens
    let access_token = state.generate_access_token(account.id, &account.username)?;
    let refresh_token = state.generate_refresh_token();
    state.store_refresh_token(account.id, &refresh_token).await?;

    tracing::info!(account_id = account.id, username = %account.username, "account created");

    let response = LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        account: AccountInfo {
            id: account.id,
            username: account.username,
            email: account.email,
        },
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/auth/login - Account login.
///
/// The identifier accepts either an email address or a username.
/// Username resolution failures are reported against the
/// email_or_username field; credential failures against the password
/// field, without disclosing which part was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let repo = AccountRepository::new(state.db.pool());

    // Resolve the identifier to an email
    let email = match resolve(&repo, &req.email_or_username).await {
        Ok(email) => email,
        Err(e @ (ResolveError::UsernameNotFound | ResolveError::EmailUnavailable)) => {
            return Err(ApiError::field_error(
                ErrorCode::Unauthorized,
                "email_or_username",
                e.to_string(),
            ));
        }
        Err(ResolveError::Database(e)) => {
            tracing::error!("Login resolution failed: {}", e);
            return Err(ApiError::internal("Database error"));
        }
    };

    let invalid_credentials = || {
        ApiError::field_error(
            ErrorCode::Unauthorized,
            "password",
            "Incorrect email/username or password",
        )
    };

    // Fetch the account by email
    let account = repo
        .get_by_email(&email)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(invalid_credentials)?;

    // Verify password
    verify_password(&req.password, &account.password).map_err(|_| invalid_credentials())?;

    // Generate tokens
    let access_token = state.generate_access_token(account.id, &account.username)?;
    let refresh_token = state.generate_refresh_token();
    state.store_refresh_token(account.id, &refresh_token).await?;

    // Update last login time
    let _ = repo.update_last_login(account.id).await;

    let kind = classify(&req.email_or_username);
    tracing::info!(
        account_id = account.id,
        via = if kind == LoginKind::Email { "email" } else { "username" },
        "login"
    );

    let response = LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        account: AccountInfo {
            id: account.id,
            username: account.username,
            email: account.email,
        },
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/auth/logout - Account logout.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LogoutRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    // Revoke the refresh token
    let repo = RefreshTokenRepository::new(state.db.pool());
    let _ = repo.revoke(&req.refresh_token).await;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/auth/refresh - Refresh access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    // Validate refresh token
    let token_repo = RefreshTokenRepository::new(state.db.pool());
    let token = token_repo
        .get_valid_token(&req.refresh_token)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired refresh token"))?;

    // Get account info
    let account = AccountRepository::new(state.db.pool())
        .get_by_id(token.account_id)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Account not found"))?;

    // Rotate: revoke the old token, issue a new pair
    let _ = token_repo.revoke(&req.refresh_token).await;

    let access_token = state.generate_access_token(account.id, &account.username)?;
    let new_refresh_token = state.generate_refresh_token();
    state
        .store_refresh_token(account.id, &new_refresh_token)
        .await?;

    let response = RefreshResponse {
        access_token,
        refresh_token: new_refresh_token,
        expires_in: state.access_token_expiry,
    };

    Ok(Json(ApiResponse::new(response)))
}

/// GET /api/auth/me - Get current account info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let account = AccountRepository::new(state.db.pool())
        .get_by_id(claims.sub)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;

    let letter_count = LetterService::new(state.db.pool())
        .count(claims.sub)
        .await
        .unwrap_or(0);

    let response = MeResponse {
        id: account.id,
        username: account.username,
        email: account.email,
        letter_count,
        created_at: account.created_at.clone(),
        last_login_at: account.last_login.clone(),
    };

    Ok(Json(ApiResponse::new(response)))
}
