//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{Email, Name};
use crate::{
    domain::{user, Role, Status, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Role`] of a new [`User`].
    pub role: Role,

    /// [`Status`] of a new [`User`].
    pub status: Status,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<
            Select<By<Vec<User>, ()>>,
            Ok = Vec<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            role,
            status,
        } = cmd;

        let occupied = self
            .database()
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .iter()
            .any(|u| u.email.is_same_as(&email));
        if occupied {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let user = User {
            id: user::Id::new(),
            name,
            email,
            role,
            status,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`User(id: {})` created", user.id);

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already used by another [`User`].
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{user, Role, Status},
        infra::Memory,
        query, Query as _, Service,
    };

    use super::{Command as _, CreateUser, ExecutionError};

    fn cmd(email: &str) -> CreateUser {
        CreateUser {
            name: user::Name::new("Frank Castle").unwrap(),
            email: user::Email::new(email).unwrap(),
            role: Role::User,
            status: Status::Active,
        }
    }

    #[tokio::test]
    async fn appends_new_user() {
        let svc = Service::mock(Memory::seeded());

        let created = svc.execute(cmd("frank@example.com")).await.unwrap();

        let all = svc.execute(query::users::All::by(())).await.unwrap();
        assert_eq!(all.len(), 8);
        assert_eq!(all.last(), Some(&created));
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let svc = Service::mock(Memory::seeded());

        let err = svc.execute(cmd("JANE@example.com")).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::EmailOccupied(_)));

        let all = svc.execute(query::users::All::by(())).await.unwrap();
        assert_eq!(all.len(), 7);
    }
}
