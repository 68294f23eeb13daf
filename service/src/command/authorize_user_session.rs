//! [`Command`] for authorizing a [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] issued by the identity
/// provider.
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        Ok(jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use crate::{domain::Role, infra::Memory, Service};

    use super::{AuthorizeUserSession, Command as _};

    fn token(secret: &[u8], claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn cmd(token: String) -> AuthorizeUserSession {
        AuthorizeUserSession {
            token: token.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn accepts_signed_token() {
        let svc = Service::mock(Memory::new());
        let claims = json!({
            "sub": "user_1",
            "exp": 4_000_000_000_i64,
            "public_metadata": {"role": "admin"},
        });

        let session = svc
            .execute(cmd(token(Service::<Memory>::MOCK_SECRET, &claims)))
            .await
            .unwrap();
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.subject.to_string(), "user_1");
    }

    #[tokio::test]
    async fn rejects_foreign_or_expired_token() {
        let svc = Service::mock(Memory::new());

        let foreign = token(
            b"another secret",
            &json!({"sub": "user_1", "exp": 4_000_000_000_i64}),
        );
        assert!(svc.execute(cmd(foreign)).await.is_err());

        let expired = token(
            Service::<Memory>::MOCK_SECRET,
            &json!({"sub": "user_1", "exp": 1_000_000_000_i64}),
        );
        assert!(svc.execute(cmd(expired)).await.is_err());

        assert!(svc.execute(cmd("garbage".into())).await.is_err());
    }
}
