//! Bearer credential and the typed claims decoded from it.
//!
//! The server issues JWTs whose payload carries `{ "id", "role", "exp" }`.
//! The client only reads the payload to route the actor; signature checks are
//! the server's job.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use zeroize::Zeroizing;

use super::UserId;

/// Access tier gating route availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Full access, including registration and balance edits.
    Admin,
    /// Read access to users, payments and reports.
    Supervisor,
    /// End user: own profile and payments.
    User,
    /// No credential present.
    Anonymous,
}

impl Role {
    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::User => "user",
            Self::Anonymous => "none",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidCredential;

    /// Parse a claimed role. `none` is not a claimable role.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "supervisor" => Ok(Self::Supervisor),
            "user" => Ok(Self::User),
            other => Err(InvalidCredential::UnknownRole {
                role: other.to_owned(),
            }),
        }
    }
}

/// Reasons a token cannot be turned into a [`Credential`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCredential {
    /// Not a three-segment token, or the payload is not base64url JSON.
    #[error("malformed credential: {message}")]
    Malformed { message: String },
    /// A required claim is absent.
    #[error("credential is missing the `{claim}` claim")]
    MissingClaim { claim: &'static str },
    /// The role claim is outside the known set.
    #[error("credential carries unknown role `{role}`")]
    UnknownRole { role: String },
}

/// Typed claim set carried by a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    subject: UserId,
    role: Role,
    expires_at: Option<DateTime<Utc>>,
}

impl Claims {
    /// Identifier of the authenticated user.
    pub fn subject(&self) -> UserId {
        self.subject
    }

    /// Claimed role; never [`Role::Anonymous`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// Expiry instant, when the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

#[derive(Deserialize)]
struct WireClaims {
    id: Option<i64>,
    sub: Option<String>,
    role: Option<String>,
    exp: Option<i64>,
}

impl TryFrom<WireClaims> for Claims {
    type Error = InvalidCredential;

    fn try_from(value: WireClaims) -> Result<Self, Self::Error> {
        let subject = match (value.id, value.sub) {
            (Some(id), _) => id,
            (None, Some(sub)) => sub.parse().map_err(|_| InvalidCredential::Malformed {
                message: format!("subject `{sub}` is not a user id"),
            })?,
            (None, None) => return Err(InvalidCredential::MissingClaim { claim: "id" }),
        };
        let role = value
            .role
            .ok_or(InvalidCredential::MissingClaim { claim: "role" })?
            .parse()?;
        let expires_at = match value.exp {
            Some(seconds) => Some(Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
                InvalidCredential::Malformed {
                    message: format!("expiry {seconds} is out of range"),
                }
            })?),
            None => None,
        };
        Ok(Self {
            subject: UserId::new(subject),
            role,
            expires_at,
        })
    }
}

/// Raw bearer token plus its decoded claims.
///
/// ## Invariants
/// - `claims` were decoded from `raw`.
///
/// # Examples
/// ```
/// use localpay_client::domain::{Credential, Role};
///
/// // {"id":7,"role":"supervisor"}
/// let raw = "e30.eyJpZCI6Nywicm9sZSI6InN1cGVydmlzb3IifQ.sig";
/// let credential = Credential::decode(raw).expect("valid token");
/// assert_eq!(credential.claims().role(), Role::Supervisor);
/// assert!(Credential::decode("not-a-token").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    raw: Zeroizing<String>,
    claims: Claims,
}

impl Credential {
    /// Decode the payload segment of a JWT into typed claims.
    pub fn decode(raw: &str) -> Result<Self, InvalidCredential> {
        let token = raw.trim();
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(InvalidCredential::Malformed {
                message: "expected three dot-separated segments".to_owned(),
            });
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|err| InvalidCredential::Malformed {
                message: format!("payload is not base64url: {err}"),
            })?;
        let wire: WireClaims =
            serde_json::from_slice(&bytes).map_err(|err| InvalidCredential::Malformed {
                message: format!("payload is not a claim object: {err}"),
            })?;

        Ok(Self {
            raw: Zeroizing::new(token.to_owned()),
            claims: Claims::try_from(wire)?,
        })
    }

    /// Token text for the `Authorization` header.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// Decoded claims.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("raw", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    //! Unsigned tokens for tests.
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::Value;

    /// Build a token whose payload is `claims`.
    pub(crate) fn token(claims: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    /// Token for user `id` with `role` and no expiry.
    pub(crate) fn token_for(id: i64, role: &str) -> String {
        token(&serde_json::json!({ "id": id, "role": role }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for claim decoding.
    use super::test_tokens::{token, token_for};
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("supervisor", Role::Supervisor)]
    #[case("user", Role::User)]
    fn decodes_known_roles(#[case] claimed: &str, #[case] expected: Role) {
        let credential = Credential::decode(&token_for(12, claimed)).expect("decodes");
        assert_eq!(credential.claims().role(), expected);
        assert_eq!(credential.claims().subject(), UserId::new(12));
    }

    #[rstest]
    #[case("")]
    #[case("garbage")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    #[case("e30.!!!.sig")]
    #[case("e30.bm90LWpzb24.sig")]
    fn malformed_tokens_are_typed_errors(#[case] raw: &str) {
        let err = Credential::decode(raw).expect_err("must fail");
        assert!(matches!(err, InvalidCredential::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn unknown_role_is_reported() {
        let err = Credential::decode(&token_for(1, "cashier")).expect_err("must fail");
        assert_eq!(
            err,
            InvalidCredential::UnknownRole {
                role: "cashier".to_owned()
            }
        );
    }

    #[test]
    fn missing_role_is_reported() {
        let err = Credential::decode(&token(&json!({ "id": 1 }))).expect_err("must fail");
        assert_eq!(err, InvalidCredential::MissingClaim { claim: "role" });
    }

    #[test]
    fn numeric_sub_is_accepted_when_id_is_absent() {
        let credential =
            Credential::decode(&token(&json!({ "sub": "33", "role": "user" }))).expect("decodes");
        assert_eq!(credential.claims().subject(), UserId::new(33));
    }

    #[test]
    fn expiry_is_compared_against_now() {
        let credential = Credential::decode(&token(&json!({
            "id": 1,
            "role": "user",
            "exp": 1_700_000_000
        })))
        .expect("decodes");
        let before = Utc.timestamp_opt(1_699_999_999, 0).single().expect("instant");
        let after = Utc.timestamp_opt(1_700_000_001, 0).single().expect("instant");
        assert!(!credential.claims().is_expired_at(before));
        assert!(credential.claims().is_expired_at(after));
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let credential = Credential::decode(&token_for(5, "admin")).expect("decodes");
        assert!(!format!("{credential:?}").contains(credential.raw()));
    }
}
