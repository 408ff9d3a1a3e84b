use std::sync::Arc;

use log::warn;

use crate::api::nav::NavItem;
use crate::roles::{Feature, PolicyTable};
use crate::routes::registry::NAV_ITEMS;
use crate::routes::RouteTable;
use crate::session::SessionState;

/// Decides, for the session's current role, whether a page may be opened and
/// whether a feature is available.
///
/// The evaluator is a stateless predicate over two immutable tables; it never
/// mutates the session, and for a fixed (role, pathname) pair it always
/// answers the same. Anything that fails to resolve (unknown role, role
/// without pages, authorized path without a route) resolves to deny.
#[derive(Clone)]
pub struct AccessEvaluator {
    routes: Arc<RouteTable>,
    policies: Arc<PolicyTable>,
}

impl AccessEvaluator {
    pub fn new(routes: Arc<RouteTable>, policies: Arc<PolicyTable>) -> Self {
        Self { routes, policies }
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// May the session's role open the page at `pathname`?
    ///
    /// Candidates are checked in policy order. A candidate equal to the
    /// pathname wins immediately; otherwise the candidate's route pattern is
    /// tried against the pathname. A candidate naming no route is skipped,
    /// never fatal: the remaining candidates still get their chance.
    pub fn is_path_authorized(&self, session: &SessionState, pathname: &str) -> bool {
        let policy = match self.policies.get(&session.user_data.role) {
            Some(policy) => policy,
            None => return false,
        };
        if policy.authorized_paths.is_empty() {
            return false;
        }

        for authorized_path in policy.authorized_paths.iter() {
            if *authorized_path == pathname {
                return true;
            }

            match self.routes.get(authorized_path) {
                Some(route) => {
                    if route.matches(pathname) {
                        return true;
                    }
                }
                None => {
                    warn!(
                        "Role '{}' authorizes '{}', which has no route descriptor",
                        policy.value, authorized_path
                    );
                    continue;
                }
            }
        }

        false
    }

    /// May the session's role use `feature`? Unresolvable roles deny, same
    /// as page checks.
    pub fn is_feature_available(&self, session: &SessionState, feature: Feature) -> bool {
        match self.policies.get(&session.user_data.role) {
            Some(policy) => policy.features.contains(&feature),
            None => false,
        }
    }

    /// The sidebar entries the session's role may navigate to, in
    /// presentation order.
    pub fn navigable_items(&self, session: &SessionState) -> Vec<NavItem> {
        NAV_ITEMS
            .iter()
            .filter(|item| self.is_path_authorized(session, item.href))
            .map(|item| NavItem {
                icon: item.icon.to_string(),
                label: item.label.to_string(),
                href: item.href.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::PolicyTable;
    use crate::routes::registry::PRIVATE_ROUTES;

    fn evaluator() -> AccessEvaluator {
        let routes = Arc::new(RouteTable::compile(&PRIVATE_ROUTES).unwrap());
        let policies = Arc::new(PolicyTable::build(&routes).unwrap());
        AccessEvaluator::new(routes, policies)
    }

    fn session(role: &str) -> SessionState {
        let mut session = SessionState::anonymous();
        session.token = "token-data".to_string();
        session.user_data.name = "user".to_string();
        session.user_data.role = role.to_string();
        session
    }

    #[test]
    fn test_exact_match_fast_path() {
        let eval = evaluator();
        let session = session("staff");

        // The templated path itself is in the authorized list, so it passes
        // even though no pattern would match it
        assert!(eval.is_path_authorized(&session, "/ideas/:id"));
    }

    #[test]
    fn test_pattern_match_coverage() {
        let eval = evaluator();
        let session = session("staff");

        assert!(eval.is_path_authorized(&session, "/departments/42"));
        assert!(!eval.is_path_authorized(&session, "/departments/abc"));
        assert!(!eval.is_path_authorized(&session, "/departments/42/settings"));
    }

    #[test]
    fn test_exclusion_policy() {
        let eval = evaluator();
        let session = session("department-head");

        assert!(eval.is_path_authorized(&session, "/departments/7/settings"));
        assert!(!eval.is_path_authorized(&session, "/users"));
        assert!(!eval.is_path_authorized(&session, "/categories"));
    }

    #[test]
    fn test_fail_closed_on_unknown_role() {
        let eval = evaluator();
        let session = session("ghost-role");

        assert!(!eval.is_path_authorized(&session, "/"));
        assert!(!eval.is_path_authorized(&session, "/ideas"));
        assert!(!eval.is_feature_available(&session, Feature::SubmitIdeas));
        assert!(eval.navigable_items(&session).is_empty());
    }

    #[test]
    fn test_idempotence() {
        let eval = evaluator();
        let session = session("qa-coordinator");

        let first = eval.is_path_authorized(&session, "/ideas/3/review");
        for _ in 0..10 {
            assert_eq!(eval.is_path_authorized(&session, "/ideas/3/review"), first);
        }
    }

    #[test]
    fn test_role_switch_reactivity() {
        let eval = evaluator();
        let mut session = session("administrator");

        assert!(eval.is_path_authorized(&session, "/users"));

        // No caching between calls: the next check sees the new role
        session.user_data.role = "staff".to_string();
        assert!(!eval.is_path_authorized(&session, "/users"));
    }

    #[test]
    fn test_qa_coordinator_scenario() {
        let eval = evaluator();
        let session = session("qa-coordinator");

        assert!(!eval.is_path_authorized(&session, "/categories"));
        assert!(!eval.is_path_authorized(&session, "/users"));
        assert!(!eval.is_path_authorized(&session, "/departments/5/settings"));
        assert!(eval.is_path_authorized(&session, "/insights"));
        assert!(eval.is_path_authorized(&session, "/ideas/12/review"));
    }

    #[test]
    fn test_features() {
        let eval = evaluator();

        assert!(eval.is_feature_available(&session("administrator"), Feature::ManageUsers));
        assert!(!eval.is_feature_available(&session("staff"), Feature::ReviewIdeas));
        assert!(eval.is_feature_available(&session("staff"), Feature::SubmitIdeas));
    }

    #[test]
    fn test_navigable_items() {
        let eval = evaluator();

        let items = eval.navigable_items(&session("qa-coordinator"));
        let hrefs: Vec<_> = items.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/", "/ideas", "/departments", "/insights"]);

        let items = eval.navigable_items(&session("administrator"));
        assert_eq!(items.len(), NAV_ITEMS.len());
    }
}
