use super::common::Reference;
use crate::diff::engine::{diff_resource_with, DiffOptions};
use crate::diff::model::Patch;
use crate::errors::Result;
use crate::introspect::Nullable;
use crate::registry::{Comparable, ResourceComparisonSpec};
use crate::translate::{schemas::beta, translate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A connected system that accounts are aggregated from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub description: String,
    pub owner: Reference,
    /// Unset, explicitly detached (`null`), or pointing at a cluster
    #[serde(skip_serializing_if = "Nullable::is_unset")]
    pub cluster: Nullable<Reference>,
    pub connector: String,
    /// Connector settings, diffed key by key down to the leaves.
    ///
    /// Only strings, bools and `i32` integers can be written back: a changed
    /// float or larger integer leaf fails the whole diff with
    /// `UnsupportedValueKind`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_attributes: Option<BTreeMap<String, serde_json::Value>>,
    /// Percentage of accounts that may be deleted in one aggregation
    pub delete_threshold: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_workgroup: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authoritative: Option<bool>,
}

impl Comparable for Source {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self> {
        static SPEC: OnceLock<ResourceComparisonSpec<Source>> = OnceLock::new();
        SPEC.get_or_init(|| {
            ResourceComparisonSpec::<Source>::builder("source")
                .value("name", |s| &s.name)
                .value("description", |s| &s.description)
                .reference("owner", |s| &s.owner)
                .reference("cluster", |s| &s.cluster)
                .value("connector", |s| &s.connector)
                .value("connectorAttributes", |s| &s.connector_attributes)
                .value("deleteThreshold", |s| &s.delete_threshold)
                .value("features", |s| &s.features)
                .reference("managementWorkgroup", |s| &s.management_workgroup)
                .value("authoritative", |s| &s.authoritative)
                .build()
        })
    }
}

/// Diff two sources and encode the result for the beta patch endpoint.
///
/// Sources are created through the v3 API but patched through beta, whose
/// array element type is a distinct generated type.
pub fn diff_for_beta(
    desired: &Source,
    current: &Source,
    options: &DiffOptions,
) -> Result<Patch<beta::ArrayInner>> {
    let patch = diff_resource_with(desired, current, options)?;
    translate::<serde_json::Value, beta::ArrayInner>(patch)
}
