use super::common::Reference;
use crate::describe_struct;
use crate::registry::{Comparable, ResourceComparisonSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A grantable bundle of access profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    pub description: String,
    pub owner: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_profiles: Option<Vec<Reference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<RoleMembership>,
    /// Opaque key/value data kept from older role definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_membership_info: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Who is automatically granted the role
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoleMembership {
    #[serde(rename = "type")]
    pub membership_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<Reference>>,
}

describe_struct!(RoleMembership {
    membership_type => "type",
    identities => "identities",
});

impl Comparable for Role {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self> {
        static SPEC: OnceLock<ResourceComparisonSpec<Role>> = OnceLock::new();
        SPEC.get_or_init(|| {
            ResourceComparisonSpec::<Role>::builder("role")
                .value("name", |r| &r.name)
                .value("description", |r| &r.description)
                .reference("owner", |r| &r.owner)
                .value("accessProfiles", |r| &r.access_profiles)
                .value("membership", |r| &r.membership)
                .value("legacyMembershipInfo", |r| &r.legacy_membership_info)
                .value("requestable", |r| &r.requestable)
                .value("enabled", |r| &r.enabled)
                .build()
        })
    }
}
