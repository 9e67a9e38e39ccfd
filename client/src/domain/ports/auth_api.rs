//! Driven port for the token endpoint.
//!
//! Login screens exchange form credentials for a bearer token through this
//! port; the HTTP adapter posts the OAuth2 password form to `/token`.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::LoginCredentials;

use super::ApiError;

/// Tokens issued on a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    access_token: Zeroizing<String>,
}

impl TokenGrant {
    /// Wrap an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Zeroizing::new(access_token.into()),
        }
    }

    /// Bearer token to hand to the credential store.
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Exchange credentials for a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate and return the issued token.
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<TokenGrant, ApiError>;
}

/// Fixture authenticator accepting one login/password pair.
#[derive(Debug, Clone)]
pub struct FixtureAuthApi {
    login: String,
    password: Zeroizing<String>,
    token: String,
}

impl FixtureAuthApi {
    /// Accept `login`/`password` and answer with `token`.
    pub fn new(login: &str, password: &str, token: impl Into<String>) -> Self {
        Self {
            login: login.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthApi for FixtureAuthApi {
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<TokenGrant, ApiError> {
        if credentials.login() == self.login && credentials.password() == self.password.as_str() {
            Ok(TokenGrant::new(self.token.clone()))
        } else {
            Err(ApiError::unauthorized("Incorrect username or password"))
        }
    }
}
