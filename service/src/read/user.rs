//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use common::{define_pagination, search};

    use crate::domain::User;

    define_pagination!(User, Filter);

    /// Filter for [`Selector`], matching [`User`] name, email and role.
    pub type Filter = search::Query;
}
