//! Domain definitions.

pub mod product;
pub mod role;
pub mod session;
pub mod user;

pub use self::{
    product::Product,
    role::{Role, Status},
    session::Session,
    user::User,
};
