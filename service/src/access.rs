//! Role-based access control.
//!
//! Protected surfaces declare a required [`Level`], and the [`Role`] of the
//! acting principal is checked against it by [`decide()`]. A [`Gate`] wraps
//! this check for surfaces whose [`Role`] becomes known asynchronously.

use derive_more::Display;

use crate::domain::Role;

/// Location every denied principal is redirected to.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// Privilege required to reach a surface.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Level {
    /// Only [`Role::Admin`]s are allowed.
    #[display("admin")]
    Admin,

    /// Any authenticated principal is allowed.
    #[default]
    #[display("user")]
    User,
}

impl Level {
    /// Indicates whether the provided [`Role`] satisfies this [`Level`].
    #[must_use]
    pub const fn allows(self, role: Role) -> bool {
        match self {
            Self::Admin => role.is_admin(),
            Self::User => true,
        }
    }
}

/// Outcome of checking a [`Role`] against a required [`Level`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Surface is rendered.
    Render,

    /// Surface is not rendered and navigation goes to the provided location.
    RedirectTo(&'static str),
}

impl Decision {
    /// Indicates whether this [`Decision`] allows rendering.
    #[must_use]
    pub const fn is_render(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Decides whether a surface requiring the `required` [`Level`] is rendered
/// for the provided [`Role`].
#[must_use]
pub const fn decide(required: Level, role: Role) -> Decision {
    if required.allows(role) {
        Decision::Render
    } else {
        Decision::RedirectTo(DEFAULT_REDIRECT)
    }
}

/// Access gate of a single protected surface.
///
/// Starts [`Gate::Pending`] and renders nothing until the [`Role`] is
/// resolved. Resolution happens once: [`Gate::Resolved`] is terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gate {
    /// [`Role`] is not known yet.
    Pending(Level),

    /// [`Decision`] has been made.
    Resolved(Decision),
}

impl Gate {
    /// Creates a new [`Gate::Pending`] guarding the `required` [`Level`].
    #[must_use]
    pub const fn new(required: Level) -> Self {
        Self::Pending(required)
    }

    /// Resolves this [`Gate`] with the provided [`Role`].
    ///
    /// Returns the [`Decision`] and whether it was made by this call. Once
    /// resolved, the first [`Decision`] is returned unchanged.
    pub fn resolve(&mut self, role: Role) -> (Decision, bool) {
        match *self {
            Self::Pending(required) => {
                let decision = decide(required, role);
                *self = Self::Resolved(decision);
                (decision, true)
            }
            Self::Resolved(decision) => (decision, false),
        }
    }

    /// Indicates whether the guarded surface renders its content.
    #[must_use]
    pub const fn renders(self) -> bool {
        matches!(self, Self::Resolved(Decision::Render))
    }
}

/// Entry of the navigation menu.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavItem {
    /// Location this [`NavItem`] leads to.
    pub href: &'static str,

    /// Human-readable title.
    pub title: &'static str,

    /// [`Level`] required to see this [`NavItem`].
    pub level: Level,
}

/// Full navigation menu, in display order.
pub const NAVIGATION: [NavItem; 4] = [
    NavItem {
        href: "/dashboard",
        title: "Dashboard",
        level: Level::User,
    },
    NavItem {
        href: "/dashboard/data",
        title: "Data",
        level: Level::User,
    },
    NavItem {
        href: "/admin",
        title: "Admin Panel",
        level: Level::Admin,
    },
    NavItem {
        href: "/admin/users",
        title: "User Management",
        level: Level::Admin,
    },
];

/// Returns [`NavItem`]s visible to the provided [`Role`].
pub fn navigation(role: Role) -> impl Iterator<Item = NavItem> {
    NAVIGATION.into_iter().filter(move |i| i.level.allows(role))
}

/// Card of the personal dashboard.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Card {
    /// Number of active users.
    #[display("Active Users")]
    ActiveUsers,

    /// Number of catalog products.
    #[display("Products")]
    Products,

    /// Value of the stock on hand.
    #[display("Revenue")]
    Revenue,

    /// Number of all stored records.
    #[display("Data Entries")]
    DataEntries,
}

impl Card {
    /// All the [`Card`]s, in display order.
    pub const ALL: [Self; 4] = [
        Self::ActiveUsers,
        Self::Products,
        Self::Revenue,
        Self::DataEntries,
    ];

    /// Returns the [`Level`] required to see this [`Card`].
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Revenue => Level::Admin,
            Self::ActiveUsers | Self::Products | Self::DataEntries => {
                Level::User
            }
        }
    }

    /// Returns [`Card`]s visible to the provided [`Role`].
    pub fn visible(role: Role) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |c| c.level().allows(role))
    }
}

/// Row and list actions available in a list view.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Actions {
    /// Whether a new item can be created.
    pub create: bool,

    /// Whether an item can be edited.
    pub edit: bool,

    /// Whether an item can be deleted.
    pub delete: bool,
}

impl Actions {
    /// All the actions enabled.
    pub const ALL: Self = Self {
        create: true,
        edit: true,
        delete: true,
    };

    /// No actions at all, making a list view-only.
    pub const NONE: Self = Self {
        create: false,
        edit: false,
        delete: false,
    };

    /// Returns [`Actions`] enabled only for the `required` [`Level`].
    #[must_use]
    pub const fn gated(required: Level, role: Role) -> Self {
        if required.allows(role) {
            Self::ALL
        } else {
            Self::NONE
        }
    }

    /// Returns [`Actions`] of the user list for the provided [`Role`].
    #[must_use]
    pub const fn for_users(role: Role) -> Self {
        Self::gated(Level::Admin, role)
    }

    /// Returns [`Actions`] of the product list for the provided [`Role`].
    #[must_use]
    pub const fn for_products(role: Role) -> Self {
        Self::gated(Level::Admin, role)
    }

    /// Indicates whether no action is enabled.
    #[must_use]
    pub const fn is_view_only(self) -> bool {
        !self.create && !self.edit && !self.delete
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::Role;

    use super::{
        decide, navigation, Actions, Card, Decision, Gate, Level,
        DEFAULT_REDIRECT,
    };

    #[test]
    fn admin_level_redirects_users() {
        assert_eq!(decide(Level::Admin, Role::Admin), Decision::Render);
        assert_eq!(
            decide(Level::Admin, Role::User),
            Decision::RedirectTo(DEFAULT_REDIRECT),
        );
        assert_eq!(decide(Level::User, Role::User), Decision::Render);
        assert_eq!(decide(Level::User, Role::Admin), Decision::Render);
        assert_eq!(Level::default(), Level::User);
    }

    #[test]
    fn pending_gate_renders_nothing() {
        assert!(!Gate::new(Level::User).renders());
        assert!(!Gate::new(Level::Admin).renders());
    }

    #[test]
    fn denied_gate_redirects_exactly_once() {
        let mut gate = Gate::new(Level::Admin);

        let mut redirects = 0;
        for _ in 0..3 {
            let (decision, fresh) = gate.resolve(Role::User);
            assert_eq!(decision, Decision::RedirectTo("/dashboard"));
            if fresh {
                redirects += 1;
            }
            assert!(!gate.renders());
        }
        assert_eq!(redirects, 1);
    }

    #[test]
    fn resolved_gate_is_terminal() {
        let mut gate = Gate::new(Level::Admin);

        assert_eq!(gate.resolve(Role::Admin), (Decision::Render, true));
        assert_eq!(gate.resolve(Role::User), (Decision::Render, false));
        assert!(gate.renders());
    }

    #[test]
    fn filters_navigation_by_role() {
        let titles =
            |role| navigation(role).map(|i| i.title).collect::<Vec<_>>();

        assert_eq!(titles(Role::User), ["Dashboard", "Data"]);
        assert_eq!(
            titles(Role::Admin),
            ["Dashboard", "Data", "Admin Panel", "User Management"],
        );
    }

    #[test]
    fn revenue_is_admin_only() {
        assert!(!Card::visible(Role::User).any(|c| c == Card::Revenue));
        assert!(Card::visible(Role::Admin).any(|c| c == Card::Revenue));
        assert_eq!(Card::visible(Role::User).count(), 3);
    }

    #[test]
    fn only_admins_manage_lists() {
        assert_eq!(Actions::for_users(Role::Admin), Actions::ALL);
        assert!(Actions::for_users(Role::User).is_view_only());
        assert!(Actions::for_products(Role::User).is_view_only());
        assert!(!Actions::for_products(Role::Admin).is_view_only());
    }
}
