//! Read entities definitions.

pub mod dashboard;
pub mod overview;
pub mod product;
pub mod user;

pub use self::{dashboard::Dashboard, overview::Overview};
