//! Mock records a seeded [`Memory`] database starts with.
//!
//! [`Memory`]: super::Memory

use common::DateTimeOf;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{product, user, Product, Role, Status, User};

/// Returns the seeded [`User`]s.
#[expect(unsafe_code, reason = "constant valid data")]
pub(super) fn users() -> Vec<User> {
    [
        ("John Doe", "john@", Role::Admin, Status::Active, 1_705_312_800),
        ("Jane Smith", "jane@", Role::User, Status::Active, 1_708_439_400),
        ("Bob Johnson", "bob@", Role::User, Status::Inactive, 1_710_062_100),
        ("Alice Williams", "alice@", Role::User, Status::Active, 1_710_501_600),
        ("Charlie Brown", "charlie@", Role::Admin, Status::Active, 1_711_961_100),
        ("Diana Prince", "diana@", Role::User, Status::Active, 1_712_755_800),
        ("Ethan Hunt", "ethan@", Role::User, Status::Inactive, 1_714_558_500),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, mailbox, role, status, created_at), n)| User {
        id: Uuid::from_u128(n).into(),
        name: unsafe { user::Name::new_unchecked(name) },
        email: unsafe {
            user::Email::new_unchecked(format!("{mailbox}example.com"))
        },
        role,
        status,
        created_at: at(created_at),
    })
    .collect()
}

/// Returns the seeded [`Product`]s.
#[expect(unsafe_code, reason = "constant valid data")]
pub(super) fn products() -> Vec<Product> {
    [
        (
            "Laptop Pro",
            "High-performance laptop for professionals",
            129_999,
            15,
            "Electronics",
            1_704_873_600,
        ),
        (
            "Wireless Mouse",
            "Ergonomic wireless mouse with precision tracking",
            2_999,
            50,
            "Accessories",
            1_707_134_400,
        ),
        (
            "USB-C Hub",
            "Multi-port USB-C hub with HDMI and USB 3.0",
            4_999,
            30,
            "Accessories",
            1_709_308_800,
        ),
        (
            "Mechanical Keyboard",
            "RGB backlit mechanical keyboard with blue switches",
            8_999,
            25,
            "Accessories",
            1_710_495_000,
        ),
        (
            "27-inch Monitor",
            "4K UHD monitor with HDR support",
            39_999,
            12,
            "Electronics",
            1_711_980_000,
        ),
        (
            "Webcam HD",
            "1080p webcam with auto-focus and noise cancellation",
            7_999,
            20,
            "Electronics",
            1_712_749_500,
        ),
        (
            "Desk Lamp",
            "LED desk lamp with adjustable brightness",
            3_499,
            40,
            "Office",
            1_714_551_600,
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((name, description, cents, stock, category, created_at), n)| {
            Product {
                id: Uuid::from_u128(n).into(),
                name: unsafe { product::Name::new_unchecked(name) },
                description: unsafe {
                    product::Description::new_unchecked(description)
                },
                price: unsafe {
                    product::Price::new_unchecked(Decimal::new(cents, 2))
                },
                stock,
                category: unsafe { product::Category::new_unchecked(category) },
                created_at: at(created_at),
            }
        },
    )
    .collect()
}

/// Converts a constant Unix `timestamp` into a [`DateTimeOf`].
fn at<Of>(timestamp: i64) -> DateTimeOf<Of> {
    DateTimeOf::from_unix_timestamp(timestamp).expect("valid timestamp")
}

#[cfg(test)]
mod spec {
    use common::search::{self, Query};

    use crate::domain::Role;

    use super::{products, users};

    #[test]
    fn has_fixed_ids() {
        let users = users();
        assert_eq!(users[0].id.to_string(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(users[0].email.to_string(), "john@example.com");
        assert_eq!(
            users[0].created_at.to_rfc3339(),
            "2024-01-15T10:00:00Z",
        );

        let products = products();
        assert_eq!(products[6].name.to_string(), "Desk Lamp");
        assert_eq!(products[0].price.to_string(), "1299.99");
    }

    #[test]
    fn searches_mock_records() {
        let found = search::filter(products(), &Query::new("wireless"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.to_string(), "Wireless Mouse");

        let admins = search::filter(users(), &Query::new("admin"));
        assert_eq!(admins.len(), 2);
        assert!(admins.iter().all(|u| u.role == Role::Admin));
    }
}
