pub mod registry;

use anyhow::{bail, Context, Result};
use regex::Regex;

use crate::api::nav::RouteInfo;

/// One navigable endpoint of the portal.
///
/// `path` is the templated form shown to policy configuration
/// (`/departments/:id/settings`), `pattern` the regex source that concrete
/// pathnames are matched against. Both must describe the same parameter
/// positions; [`RouteTable::compile`] rejects patterns that do not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub pattern: &'static str,
    pub label: &'static str,
    pub view: &'static str,
}

/// A node of the route registry tree: either a single page or a named group
/// of further nodes. Groups may nest arbitrarily and keep declaration order.
#[derive(Debug)]
pub enum RouteNode {
    Leaf(RouteSpec),
    Group(&'static [(&'static str, RouteNode)]),
}

/// Reduces a registry tree to its leaves, in pre-order declaration order.
/// A tree without leaves yields an empty list.
pub fn flatten(node: &'static RouteNode) -> Vec<&'static RouteSpec> {
    let mut specs = Vec::new();
    collect(node, &mut specs);
    specs
}

fn collect(node: &'static RouteNode, specs: &mut Vec<&'static RouteSpec>) {
    match node {
        RouteNode::Leaf(spec) => specs.push(spec),
        RouteNode::Group(children) => {
            for (_, child) in children.iter() {
                collect(child, specs);
            }
        }
    }
}

/// A route with its match pattern compiled.
#[derive(Debug)]
pub struct Route {
    pub spec: &'static RouteSpec,
    regex: Regex,
}

impl Route {
    /// Tests a concrete pathname against the compiled match pattern.
    pub fn matches(&self, pathname: &str) -> bool {
        self.regex.is_match(pathname)
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            path: self.spec.path.to_string(),
            pattern: self.spec.pattern.to_string(),
            label: self.spec.label.to_string(),
            view: self.spec.view.to_string(),
        }
    }
}

/// The flattened, compiled form of one registry tree. Built once at startup;
/// a malformed pattern or a duplicate path is a configuration error.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn compile(root: &'static RouteNode) -> Result<Self> {
        let specs = flatten(root);

        let mut routes = Vec::with_capacity(specs.len());
        for spec in specs {
            if routes.iter().any(|r: &Route| r.spec.path == spec.path) {
                bail!("duplicate route path '{}' in registry", spec.path);
            }
            let regex = Regex::new(spec.pattern)
                .with_context(|| format!("compile match pattern for route '{}'", spec.path))?;
            routes.push(Route { spec, regex });
        }

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The templated paths of every route, in registry order.
    pub fn paths(&self) -> Vec<&'static str> {
        self.routes.iter().map(|r| r.spec.path).collect()
    }

    /// Exact lookup by templated path.
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.spec.path == path)
    }

    /// Resolves a concrete pathname to a route, trying exact path equality
    /// first, then the compiled patterns, in registry order.
    pub fn match_pathname(&self, pathname: &str) -> Option<&Route> {
        for route in self.routes.iter() {
            if route.spec.path == pathname || route.matches(pathname) {
                return Some(route);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY_TREE: RouteNode = RouteNode::Group(&[]);

    static DEEP_TREE: RouteNode = RouteNode::Group(&[
        (
            "reports",
            RouteNode::Leaf(RouteSpec {
                path: "/reports",
                pattern: "^/reports$",
                label: "Reports",
                view: "Reports",
            }),
        ),
        (
            "archive",
            RouteNode::Group(&[
                ("drafts", RouteNode::Group(&[])),
                (
                    "published",
                    RouteNode::Group(&[(
                        "detail",
                        RouteNode::Leaf(RouteSpec {
                            path: "/archive/:id",
                            pattern: r"^/archive/\d+$",
                            label: "Archive detail",
                            view: "ArchiveDetail",
                        }),
                    )]),
                ),
            ]),
        ),
        (
            "settings",
            RouteNode::Leaf(RouteSpec {
                path: "/settings",
                pattern: "^/settings$",
                label: "Settings",
                view: "Settings",
            }),
        ),
    ]);

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&EMPTY_TREE).is_empty());
    }

    #[test]
    fn test_flatten_order() {
        let specs = flatten(&DEEP_TREE);
        let paths: Vec<_> = specs.iter().map(|s| s.path).collect();
        // One entry per leaf, pre-order, empty groups contribute nothing
        assert_eq!(paths, vec!["/reports", "/archive/:id", "/settings"]);
    }

    #[test]
    fn test_flatten_deterministic() {
        let first = flatten(&DEEP_TREE);
        let second = flatten(&DEEP_TREE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_match_pathname() {
        let table = RouteTable::compile(&DEEP_TREE).unwrap();

        let route = table.match_pathname("/archive/42").unwrap();
        assert_eq!(route.spec.path, "/archive/:id");

        // Template form resolves through the exact branch
        let route = table.match_pathname("/archive/:id").unwrap();
        assert_eq!(route.spec.path, "/archive/:id");

        assert!(table.match_pathname("/archive/abc").is_none());
        assert!(table.match_pathname("/archive/42/extra").is_none());
    }

    #[test]
    fn test_compile_rejects_duplicates() {
        static DUP_TREE: RouteNode = RouteNode::Group(&[
            (
                "a",
                RouteNode::Leaf(RouteSpec {
                    path: "/same",
                    pattern: "^/same$",
                    label: "A",
                    view: "A",
                }),
            ),
            (
                "b",
                RouteNode::Leaf(RouteSpec {
                    path: "/same",
                    pattern: "^/same$",
                    label: "B",
                    view: "B",
                }),
            ),
        ]);
        assert!(RouteTable::compile(&DUP_TREE).is_err());
    }

    #[test]
    fn test_compile_rejects_bad_pattern() {
        static BAD_TREE: RouteNode = RouteNode::Group(&[(
            "broken",
            RouteNode::Leaf(RouteSpec {
                path: "/broken",
                pattern: "^/broken[$",
                label: "Broken",
                view: "Broken",
            }),
        )]);
        assert!(RouteTable::compile(&BAD_TREE).is_err());
    }
}
