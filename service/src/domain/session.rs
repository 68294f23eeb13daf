//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Display, From, FromStr};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::Role;

/// Session of a principal authenticated by the external identity provider.
///
/// Represents the claims of a signed session token. This system only reads
/// them and never issues or alters a [`Session`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// [`Subject`] the identity provider authenticated.
    #[serde(rename = "sub")]
    pub subject: Subject,

    /// Public metadata attached to the [`Subject`] by the identity provider.
    #[serde(default)]
    pub public_metadata: Map<String, Value>,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Key of the [`Session::public_metadata`] holding the role claim.
    pub const ROLE_CLAIM: &'static str = "role";

    /// Returns the raw role claim of this [`Session`].
    ///
    /// Non-string values are treated as absent.
    #[must_use]
    pub fn role_claim(&self) -> Option<&str> {
        self.public_metadata
            .get(Self::ROLE_CLAIM)
            .and_then(Value::as_str)
    }

    /// Resolves the [`Role`] of this [`Session`].
    ///
    /// Every place deciding on privileges goes through this method, so
    /// request-scoped and connection-scoped resolution never disagree.
    #[must_use]
    pub fn role(&self) -> Role {
        Role::from_claim(self.role_claim())
    }

    /// Resolves the [`Role`] of a possibly unauthenticated principal.
    #[must_use]
    pub fn role_of(session: Option<&Self>) -> Role {
        session.map(Self::role).unwrap_or_default()
    }
}

/// Identifier of a principal in the identity provider.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, Hash, PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Subject(String);

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
#[as_ref(str, String)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<Session>;

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::Role;

    use super::Session;

    fn session(claims: serde_json::Value) -> Session {
        serde_json::from_value(claims).unwrap()
    }

    #[test]
    fn resolves_admin_from_metadata() {
        let s = session(json!({
            "sub": "user_1",
            "exp": 2_000_000_000,
            "public_metadata": {"role": "admin"},
        }));

        assert_eq!(s.role_claim(), Some("admin"));
        assert_eq!(s.role(), Role::Admin);
        assert_eq!(s.subject.to_string(), "user_1");
    }

    #[test]
    fn anything_else_is_user() {
        for metadata in [
            json!({}),
            json!({"role": "user"}),
            json!({"role": "Admin"}),
            json!({"role": 1}),
            json!({"role": null}),
            json!({"role": ["admin"]}),
        ] {
            let s = session(json!({
                "sub": "user_2",
                "exp": 2_000_000_000,
                "public_metadata": metadata,
            }));
            assert_eq!(s.role(), Role::User, "{metadata}");
        }

        let without_metadata = session(json!({
            "sub": "user_3",
            "exp": 2_000_000_000,
        }));
        assert_eq!(without_metadata.role(), Role::User);
    }

    #[test]
    fn unauthenticated_is_user() {
        assert_eq!(Session::role_of(None), Role::User);
    }
}
