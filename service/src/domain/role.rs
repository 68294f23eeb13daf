//! [`Role`] and account [`Status`] definitions.

use common::define_kind;

#[cfg(doc)]
use crate::domain::{Session, User};

define_kind! {
    #[doc = "Privilege classification of an acting principal."]
    enum Role {
        #[doc = "Administrator, allowed to manage users."]
        Admin = 1,

        #[doc = "Regular user."]
        User = 2,
    }
}

impl Role {
    /// Resolves a [`Role`] from the role claim of an identity provider.
    ///
    /// Only the exact `admin` string grants [`Role::Admin`]. Anything else,
    /// including a missing claim, resolves to [`Role::User`].
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(c) if c == Self::Admin.as_str() => Self::Admin,
            Some(_) | None => Self::User,
        }
    }

    /// Indicates whether this [`Role`] is [`Role::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

define_kind! {
    #[doc = "Status of a [`User`] account."]
    enum Status {
        #[doc = "Account is in use."]
        Active = 1,

        #[doc = "Account is disabled."]
        Inactive = 2,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}

#[cfg(test)]
mod spec {
    use super::{Role, Status};

    #[test]
    fn only_exact_admin_claim_grants_admin() {
        assert_eq!(Role::from_claim(Some("admin")), Role::Admin);

        for claim in ["Admin", "ADMIN", " admin", "admin ", "user", "root", ""]
        {
            assert_eq!(Role::from_claim(Some(claim)), Role::User, "{claim}");
        }
        assert_eq!(Role::from_claim(None), Role::User);
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("admin".parse::<Role>().ok(), Some(Role::Admin));
        assert_eq!("user".parse::<Role>().ok(), Some(Role::User));
        assert!("Admin".parse::<Role>().is_err());

        assert_eq!(Status::Inactive.to_string(), "inactive");
        assert_eq!(Role::ALL, [Role::Admin, Role::User]);
    }
}
