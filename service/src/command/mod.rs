//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_product;
pub mod create_user;
pub mod delete_product;
pub mod delete_user;
pub mod update_product;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_product::CreateProduct, create_user::CreateUser,
    delete_product::DeleteProduct, delete_user::DeleteUser,
    update_product::UpdateProduct, update_user::UpdateUser,
};
