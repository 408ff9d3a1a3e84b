use std::collections::HashSet;

use anyhow::{bail, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::routes::RouteTable;

/// Feature capabilities a role may hold, independent of page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    SubmitIdeas,
    ReviewIdeas,
    ManageUsers,
    ManageCategories,
    EditDepartmentSettings,
    ViewInsights,
    ExportReports,
}

impl Feature {
    /// Resolves a feature token. Unknown tokens are not an error anywhere in
    /// the portal; they are simply never available.
    pub fn from_name(name: &str) -> Option<Feature> {
        let feature = match name {
            "submit-ideas" => Feature::SubmitIdeas,
            "review-ideas" => Feature::ReviewIdeas,
            "manage-users" => Feature::ManageUsers,
            "manage-categories" => Feature::ManageCategories,
            "edit-department-settings" => Feature::EditDepartmentSettings,
            "view-insights" => Feature::ViewInsights,
            "export-reports" => Feature::ExportReports,
            _ => return None,
        };
        Some(feature)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Feature::SubmitIdeas => "submit-ideas",
            Feature::ReviewIdeas => "review-ideas",
            Feature::ManageUsers => "manage-users",
            Feature::ManageCategories => "manage-categories",
            Feature::EditDepartmentSettings => "edit-department-settings",
            Feature::ViewInsights => "view-insights",
            Feature::ExportReports => "export-reports",
        }
    }
}

/// One entry of the hand-authored role table.
///
/// Roles do not enumerate the pages they may open; they enumerate the pages
/// they may NOT. Everything else in the private registry is authorized by
/// default, so a newly added page is visible to every role until someone
/// excludes it here.
struct RoleDef {
    value: &'static str,
    label: &'static str,
    description: &'static str,
    features: &'static [Feature],
    excluded_paths: &'static [&'static str],
}

static ROLE_DEFS: &[RoleDef] = &[
    RoleDef {
        value: "administrator",
        label: "Administrator",
        description: "Full access to every page and feature of the portal",
        features: &[
            Feature::SubmitIdeas,
            Feature::ReviewIdeas,
            Feature::ManageUsers,
            Feature::ManageCategories,
            Feature::EditDepartmentSettings,
            Feature::ViewInsights,
            Feature::ExportReports,
        ],
        excluded_paths: &[],
    },
    RoleDef {
        value: "department-head",
        label: "Department head",
        description: "Runs one department: reviews ideas, tunes department settings",
        features: &[
            Feature::SubmitIdeas,
            Feature::ReviewIdeas,
            Feature::EditDepartmentSettings,
            Feature::ViewInsights,
            Feature::ExportReports,
        ],
        excluded_paths: &["/categories", "/users"],
    },
    RoleDef {
        value: "qa-coordinator",
        label: "QA coordinator",
        description: "Screens submitted ideas before they reach department review",
        features: &[Feature::SubmitIdeas, Feature::ReviewIdeas, Feature::ViewInsights],
        excluded_paths: &["/departments/:id/settings", "/categories", "/users"],
    },
    RoleDef {
        value: "staff",
        label: "Staff",
        description: "Submits ideas and follows their progress",
        features: &[Feature::SubmitIdeas],
        excluded_paths: &[
            "/departments/:id/settings",
            "/ideas/:id/review",
            "/insights",
            "/categories",
            "/users",
        ],
    },
];

/// A role with its authorized page set resolved.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub features: HashSet<Feature>,
    pub authorized_paths: Vec<&'static str>,
}

/// The resolved policies of every assignable role. Built once at startup
/// from the literal role table and the flattened private route registry;
/// immutable afterwards.
#[derive(Debug)]
pub struct PolicyTable {
    policies: Vec<RolePolicy>,
}

impl PolicyTable {
    /// Resolves each role's authorized paths by subtracting its exclusion
    /// list from the full private route list. Duplicate role values are a
    /// configuration error. Exclusions naming no existing route subtract
    /// nothing and are logged.
    pub fn build(private_routes: &RouteTable) -> Result<Self> {
        let all_paths = private_routes.paths();

        let mut policies = Vec::with_capacity(ROLE_DEFS.len());
        for def in ROLE_DEFS {
            if policies.iter().any(|p: &RolePolicy| p.value == def.value) {
                bail!("duplicate role value '{}' in role table", def.value);
            }

            for excluded in def.excluded_paths {
                if !all_paths.contains(excluded) {
                    warn!(
                        "Role '{}' excludes '{}', which is not a private route",
                        def.value, excluded
                    );
                }
            }

            let authorized_paths = all_paths
                .iter()
                .filter(|path| !def.excluded_paths.contains(path))
                .copied()
                .collect();

            policies.push(RolePolicy {
                value: def.value,
                label: def.label,
                description: def.description,
                features: def.features.iter().copied().collect(),
                authorized_paths,
            });
        }

        Ok(Self { policies })
    }

    pub fn get(&self, role: &str) -> Option<&RolePolicy> {
        self.policies.iter().find(|p| p.value == role)
    }

    pub fn policies(&self) -> &[RolePolicy] {
        &self.policies
    }
}
