//! GraphQL API definitions.

pub mod dashboard;
pub mod list;
mod mutation;
pub mod product;
mod query;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    mutation::Mutation, product::Product, query::Query, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated principal must be an admin"]
        Admin,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGE_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "Page size must be a positive number"]
        InvalidPageSize,
    }
}
