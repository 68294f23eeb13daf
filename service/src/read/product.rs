//! [`Product`] read model definition.
//!
//! [`Product`]: crate::domain::Product

pub mod list {
    //! [`Product`]s list definitions.

    use common::{define_pagination, search};

    use crate::domain::Product;

    define_pagination!(Product, Filter);

    /// Filter for [`Selector`], matching [`Product`] name, description and
    /// category.
    pub type Filter = search::Query;
}
