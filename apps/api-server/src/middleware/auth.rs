//! Authentication extractors.
//!
//! Tokens are optional on every posts route. A request without a valid token
//! is served as an anonymous caller, which the catalog treats like any other
//! unprivileged caller.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use quill_core::domain::{Caller, User};
use quill_core::ports::{AuthError, TokenClaims, TokenService};

/// Identity carried by a valid bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn caller(&self) -> Caller {
        Caller::from_roles(self.user_id, &self.roles)
    }

    /// The account described by the token, for recording post authors.
    pub fn account(&self) -> User {
        let caller = self.caller();
        User {
            id: self.user_id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_staff: caller.is_staff,
            is_superuser: caller.is_superuser,
            date_joined: chrono::Utc::now(),
        }
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            first_name: claims.first_name,
            last_name: claims.last_name,
            roles: claims.roles,
        }
    }
}

fn identify(req: &HttpRequest) -> Result<Identity, AuthError> {
    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    token_service.validate_token(token).map(Identity::from)
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    /// The caller behind this request; anonymous without a valid token.
    pub fn caller(&self) -> Caller {
        self.0
            .as_ref()
            .map(Identity::caller)
            .unwrap_or_else(Caller::anonymous)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match identify(req) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.user_id, username = %identity.username, "Authenticated request");
                ready(Ok(OptionalIdentity(Some(identity))))
            }
            Err(AuthError::MissingAuth) => ready(Ok(OptionalIdentity(None))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable token");
                ready(Ok(OptionalIdentity(None)))
            }
        }
    }
}
