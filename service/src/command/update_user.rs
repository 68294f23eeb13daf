//! [`Command`] for partially updating a [`User`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, Role, Status, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for partially updating a [`User`].
///
/// Fields left as [`None`] keep their current values.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to update.
    pub user_id: user::Id,

    /// New [`user::Name`] of the [`User`].
    pub name: Option<user::Name>,

    /// New [`user::Email`] of the [`User`].
    pub email: Option<user::Email>,

    /// New [`Role`] of the [`User`].
    pub role: Option<Role>,

    /// New [`Status`] of the [`User`].
    pub status: Option<Status>,
}

impl UpdateUser {
    /// Creates a new [`UpdateUser`] changing nothing.
    #[must_use]
    pub const fn new(user_id: user::Id) -> Self {
        Self {
            user_id,
            name: None,
            email: None,
            role: None,
            status: None,
        }
    }
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<
            Select<By<Vec<User>, ()>>,
            Ok = Vec<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            name,
            email,
            role,
            status,
        } = cmd;

        let all = self
            .database()
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut user = all
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(email) = &email {
            if all
                .iter()
                .any(|u| u.id != user_id && u.email.is_same_as(email))
            {
                return Err(tracerr::new!(E::EmailOccupied(email.clone())));
            }
        }

        let before = user.clone();
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(status) = status {
            user.status = status;
        }
        if user == before {
            return Ok(user);
        }

        let updated = self
            .database()
            .execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            // Deleted concurrently.
            return Err(tracerr::new!(E::UserNotExists(user_id)));
        }

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`user::Email`] is already used by another [`User`].
    #[display("`{_0}` email is occupied")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
