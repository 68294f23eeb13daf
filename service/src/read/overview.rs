//! Admin [`Overview`] read model definition.

use crate::domain::{Product, Status, User};

/// Number of records in each [`Overview`] preview list.
pub const PREVIEW_SIZE: usize = 3;

/// Summary of the stored records for administrators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Overview {
    /// Number of all [`User`]s.
    pub total_users: usize,

    /// Number of [`Status::Active`] [`User`]s.
    pub active_users: usize,

    /// Number of all [`Product`]s.
    pub total_products: usize,

    /// Sum of stock over all [`Product`]s.
    pub units_in_stock: u64,

    /// First [`User`]s in store order.
    pub recent_users: Vec<User>,

    /// First [`Product`]s in store order.
    pub inventory: Vec<Product>,
}

impl Overview {
    /// Summarizes the provided [`User`]s and [`Product`]s.
    #[must_use]
    pub fn new(users: Vec<User>, products: Vec<Product>) -> Self {
        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|u| u.status == Status::Active)
                .count(),
            total_products: products.len(),
            units_in_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
            recent_users: users.into_iter().take(PREVIEW_SIZE).collect(),
            inventory: products.into_iter().take(PREVIEW_SIZE).collect(),
        }
    }
}
