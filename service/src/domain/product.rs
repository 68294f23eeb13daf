//! [`Product`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Searchable};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Item of the product catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// ID of this [`Product`].
    pub id: Id,

    /// [`Name`] of this [`Product`].
    pub name: Name,

    /// [`Description`] of this [`Product`].
    pub description: Description,

    /// [`Price`] of this [`Product`].
    pub price: Price,

    /// Number of units in stock.
    pub stock: u32,

    /// [`Category`] of this [`Product`].
    pub category: Category,

    /// [`DateTime`] when this [`Product`] was created.
    pub created_at: CreationDateTime,
}

impl Searchable for Product {
    fn search_fields(&self) -> impl IntoIterator<Item = &str> {
        [
            self.name.as_ref(),
            self.description.as_ref(),
            self.category.as_ref(),
        ]
    }
}

/// ID of a [`Product`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for Id {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Defines a non-empty, trimmed text of a [`Product`] limited in length.
macro_rules! define_text {
    ($(#[doc = $doc:literal])* $name:ident, max = $max:literal) => {
        $(#[doc = $doc])*
        #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
        #[as_ref(str, String)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            ///
            /// # Safety
            ///
            /// The caller must ensure that the given `text` matches the
            /// format.
            #[expect(unsafe_code, reason = "bypass")]
            #[must_use]
            pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            #[doc = concat!(
                "Creates a new [`", stringify!($name),
                "`] if the given `text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                (text.trim() == text
                    && !text.is_empty()
                    && text.chars().count() <= $max)
                    .then_some(Self(text))
            }
        }

        impl FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

define_text!(
    /// Name of a [`Product`].
    Name,
    max = 256
);

define_text!(
    /// Description of a [`Product`].
    Description,
    max = 4096
);

define_text!(
    /// Category of a [`Product`].
    Category,
    max = 128
);

/// Price of a [`Product`].
///
/// Non-negative, with at most two fraction digits.
#[derive(Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Maximum number of fraction digits in a [`Price`].
    pub const SCALE: u32 = 2;

    /// Creates a new [`Price`] without checking the `amount`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `amount` is non-negative and
    /// has at most [`Price::SCALE`] fraction digits.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(amount: Decimal) -> Self {
        Self(Self::rescaled(amount))
    }

    /// Creates a new [`Price`] if the given `amount` is valid.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        let amount = amount.normalize();
        (amount >= Decimal::ZERO && amount.scale() <= Self::SCALE)
            .then(|| Self(Self::rescaled(amount)))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Brings the `amount` to exactly [`Price::SCALE`] fraction digits.
    fn rescaled(mut amount: Decimal) -> Decimal {
        amount.rescale(Self::SCALE);
        amount
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Price`")
    }
}

/// [`DateTime`] when a [`Product`] was created.
pub type CreationDateTime = DateTimeOf<(Product, unit::Creation)>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Category, Name, Price};

    #[test]
    fn validates_price() {
        assert_eq!(
            "29.99".parse::<Price>().map(Price::amount),
            Ok(Decimal::new(2999, 2)),
        );
        assert_eq!(
            "0".parse::<Price>().map(|p| p.to_string()),
            Ok("0.00".into()),
        );
        assert_eq!(
            "12.5".parse::<Price>().map(|p| p.to_string()),
            Ok("12.50".into()),
        );
        assert!("-1".parse::<Price>().is_err());
        assert!("1.999".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn validates_texts() {
        assert!(Name::new("Laptop Pro").is_some());
        assert!(Name::new("").is_none());
        assert!(Category::new("Office ").is_none());
        assert!(Category::new("x".repeat(129)).is_none());
    }
}
