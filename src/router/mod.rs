use std::sync::Arc;

use anyhow::{Context, Result};

use crate::authz::AccessEvaluator;
use crate::roles::PolicyTable;
use crate::routes::registry::{
    DEFAULT_PRIVATE_PATH, DEFAULT_PUBLIC_PATH, PRIVATE_ROUTES, PUBLIC_ROUTES,
};
use crate::routes::{Route, RouteTable};
use crate::session::SessionState;

/// Which registry subtree the session is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTree {
    Public,
    Private,
}

/// Outcome of resolving a pathname: a page to render, or the default path
/// to send the caller to instead. A pathname that resolves nowhere
/// redirects, it never fails.
#[derive(Debug)]
pub enum Dispatch<'a> {
    Page(&'a Route),
    Redirect(&'static str),
}

/// Resolves pathnames against the public or private registry, gated by the
/// authorization evaluator. Everything is compiled and validated once, when
/// the router is built; dispatching never fails after that.
pub struct Router {
    public: Arc<RouteTable>,
    private: Arc<RouteTable>,
    evaluator: AccessEvaluator,
}

impl Router {
    pub fn load() -> Result<Self> {
        let public =
            Arc::new(RouteTable::compile(&PUBLIC_ROUTES).context("compile public routes")?);
        let private =
            Arc::new(RouteTable::compile(&PRIVATE_ROUTES).context("compile private routes")?);
        let policies =
            Arc::new(PolicyTable::build(&private).context("build role policy table")?);
        let evaluator = AccessEvaluator::new(private.clone(), policies);

        Ok(Self {
            public,
            private,
            evaluator,
        })
    }

    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    pub fn private_routes(&self) -> &RouteTable {
        &self.private
    }

    /// Picks the active subtree from the session alone. Evaluated fresh on
    /// every call; a token change flips the tree on the next dispatch.
    pub fn select_tree(&self, session: &SessionState) -> RouteTree {
        if session.is_authenticated() {
            RouteTree::Private
        } else {
            RouteTree::Public
        }
    }

    /// Resolves `pathname` for the session. Unknown and unauthorized
    /// pathnames redirect to the active tree's default path.
    pub fn dispatch(&self, session: &SessionState, pathname: &str) -> Dispatch<'_> {
        match self.select_tree(session) {
            RouteTree::Public => match self.public.match_pathname(pathname) {
                Some(route) => Dispatch::Page(route),
                None => Dispatch::Redirect(DEFAULT_PUBLIC_PATH),
            },
            RouteTree::Private => {
                if !self.evaluator.is_path_authorized(session, pathname) {
                    return Dispatch::Redirect(DEFAULT_PRIVATE_PATH);
                }
                match self.private.match_pathname(pathname) {
                    Some(route) => Dispatch::Page(route),
                    None => Dispatch::Redirect(DEFAULT_PRIVATE_PATH),
                }
            }
        }
    }
}
