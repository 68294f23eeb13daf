//! [`Command`] for deleting a [`User`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`User`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteUser {
    /// ID of the [`User`] to delete.
    pub user_id: user::Id,
}

impl<Db> Command<DeleteUser> for Service<Db>
where
    Db: Database<
        Delete<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    /// Deleted [`User`].
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { user_id } = cmd;

        let user = self
            .database()
            .execute(Delete(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        log::info!("`User(id: {user_id})` deleted");

        Ok(user)
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{
        domain::user,
        infra::Memory,
        query, Query as _, Service,
    };

    use super::{Command as _, DeleteUser, ExecutionError};

    #[tokio::test]
    async fn removes_exactly_one_user() {
        let svc = Service::mock(Memory::seeded());
        let id = user::Id::from(Uuid::from_u128(3));

        let deleted = svc.execute(DeleteUser::from(id)).await.unwrap();
        assert_eq!(deleted.name.to_string(), "Bob Johnson");

        let all = svc.execute(query::users::All::by(())).await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|u| u.id != id));
        assert_eq!(
            svc.execute(query::user::ById::by(id)).await.unwrap(),
            None,
        );

        let err = svc.execute(DeleteUser::from(id)).await.unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
        assert_eq!(
            svc.execute(query::users::All::by(())).await.unwrap().len(),
            6,
        );
    }
}
