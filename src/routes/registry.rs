//! The hand-authored route configuration of the portal. Changing a page,
//! its match pattern or its place in the navigation is a code change here,
//! never a data migration.

use super::{RouteNode, RouteSpec};

/// Where unauthenticated visitors land when a pathname resolves nowhere.
pub const DEFAULT_PUBLIC_PATH: &str = "/login";

/// Where signed-in users land when a pathname is unknown or not authorized
/// for their role.
pub const DEFAULT_PRIVATE_PATH: &str = "/";

/// Pages reachable without a session.
pub static PUBLIC_ROUTES: RouteNode = RouteNode::Group(&[
    (
        "login",
        RouteNode::Leaf(RouteSpec {
            path: "/login",
            pattern: "^/login$",
            label: "Sign in",
            view: "Login",
        }),
    ),
    (
        "password_reset",
        RouteNode::Leaf(RouteSpec {
            path: "/password-reset",
            pattern: "^/password-reset$",
            label: "Reset password",
            view: "PasswordReset",
        }),
    ),
]);

/// Pages behind the session, grouped the way the sidebar presents them.
pub static PRIVATE_ROUTES: RouteNode = RouteNode::Group(&[
    (
        "dashboard",
        RouteNode::Leaf(RouteSpec {
            path: "/",
            pattern: "^/$",
            label: "Dashboard",
            view: "Dashboard",
        }),
    ),
    (
        "ideas",
        RouteNode::Group(&[
            (
                "list",
                RouteNode::Leaf(RouteSpec {
                    path: "/ideas",
                    pattern: "^/ideas$",
                    label: "Ideas",
                    view: "IdeaList",
                }),
            ),
            (
                "detail",
                RouteNode::Leaf(RouteSpec {
                    path: "/ideas/:id",
                    pattern: r"^/ideas/\d+$",
                    label: "Idea detail",
                    view: "IdeaDetail",
                }),
            ),
            (
                "review",
                RouteNode::Leaf(RouteSpec {
                    path: "/ideas/:id/review",
                    pattern: r"^/ideas/\d+/review$",
                    label: "Review idea",
                    view: "IdeaReview",
                }),
            ),
        ]),
    ),
    (
        "departments",
        RouteNode::Group(&[
            (
                "list",
                RouteNode::Leaf(RouteSpec {
                    path: "/departments",
                    pattern: "^/departments$",
                    label: "Departments",
                    view: "DepartmentList",
                }),
            ),
            (
                "detail",
                RouteNode::Leaf(RouteSpec {
                    path: "/departments/:id",
                    pattern: r"^/departments/\d+$",
                    label: "Department",
                    view: "DepartmentDetail",
                }),
            ),
            (
                "settings",
                RouteNode::Leaf(RouteSpec {
                    path: "/departments/:id/settings",
                    pattern: r"^/departments/\d+/settings$",
                    label: "Department settings",
                    view: "DepartmentSettings",
                }),
            ),
        ]),
    ),
    (
        "insights",
        RouteNode::Leaf(RouteSpec {
            path: "/insights",
            pattern: "^/insights$",
            label: "Insights",
            view: "Insights",
        }),
    ),
    (
        "administration",
        RouteNode::Group(&[
            (
                "categories",
                RouteNode::Leaf(RouteSpec {
                    path: "/categories",
                    pattern: "^/categories$",
                    label: "Categories",
                    view: "CategoryList",
                }),
            ),
            (
                "users",
                RouteNode::Leaf(RouteSpec {
                    path: "/users",
                    pattern: "^/users$",
                    label: "Users",
                    view: "UserList",
                }),
            ),
        ]),
    ),
    (
        "profile",
        RouteNode::Leaf(RouteSpec {
            path: "/profile",
            pattern: "^/profile$",
            label: "My profile",
            view: "Profile",
        }),
    ),
]);

/// One sidebar entry. The list is fixed; what each role actually sees is
/// decided per session by the authorization evaluator.
pub struct NavEntry {
    pub icon: &'static str,
    pub label: &'static str,
    pub href: &'static str,
}

pub static NAV_ITEMS: &[NavEntry] = &[
    NavEntry {
        icon: "home",
        label: "Dashboard",
        href: "/",
    },
    NavEntry {
        icon: "lightbulb",
        label: "Ideas",
        href: "/ideas",
    },
    NavEntry {
        icon: "building",
        label: "Departments",
        href: "/departments",
    },
    NavEntry {
        icon: "chart",
        label: "Insights",
        href: "/insights",
    },
    NavEntry {
        icon: "tags",
        label: "Categories",
        href: "/categories",
    },
    NavEntry {
        icon: "people",
        label: "Users",
        href: "/users",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{flatten, RouteTable};

    #[test]
    fn test_registries_compile() {
        RouteTable::compile(&PUBLIC_ROUTES).unwrap();
        RouteTable::compile(&PRIVATE_ROUTES).unwrap();
    }

    #[test]
    fn test_private_flatten_order() {
        let paths: Vec<_> = flatten(&PRIVATE_ROUTES).iter().map(|s| s.path).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/ideas",
                "/ideas/:id",
                "/ideas/:id/review",
                "/departments",
                "/departments/:id",
                "/departments/:id/settings",
                "/insights",
                "/categories",
                "/users",
                "/profile",
            ]
        );
    }

    #[test]
    fn test_nav_hrefs_exist() {
        let table = RouteTable::compile(&PRIVATE_ROUTES).unwrap();
        for item in NAV_ITEMS {
            assert!(
                table.get(item.href).is_some(),
                "nav item '{}' points to no route",
                item.href
            );
        }
    }
}
