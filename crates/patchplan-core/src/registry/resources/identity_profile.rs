use super::common::Reference;
use crate::describe_struct;
use crate::introspect::Nullable;
use crate::registry::{Comparable, ResourceComparisonSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// How identities are built from one authoritative source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityProfile {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Nullable::is_unset")]
    pub owner: Nullable<Reference>,
    pub priority: i32,
    pub authoritative_source: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_attribute_config: Option<IdentityAttributeConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityAttributeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_transforms: Option<Vec<AttributeTransform>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeTransform {
    pub identity_attribute_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_definition: Option<TransformDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformDefinition {
    #[serde(rename = "type")]
    pub transform_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, serde_json::Value>>,
}

describe_struct!(IdentityAttributeConfig {
    enabled => "enabled",
    attribute_transforms => "attributeTransforms",
});

describe_struct!(AttributeTransform {
    identity_attribute_name => "identityAttributeName",
    transform_definition => "transformDefinition",
});

describe_struct!(TransformDefinition {
    transform_type => "type",
    attributes => "attributes",
});

impl Comparable for IdentityProfile {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self> {
        static SPEC: OnceLock<ResourceComparisonSpec<IdentityProfile>> = OnceLock::new();
        SPEC.get_or_init(|| {
            ResourceComparisonSpec::<IdentityProfile>::builder("identity-profile")
                .value("name", |p| &p.name)
                .value("description", |p| &p.description)
                .reference("owner", |p| &p.owner)
                .value("priority", |p| &p.priority)
                .reference("authoritativeSource", |p| &p.authoritative_source)
                .value("identityAttributeConfig", |p| &p.identity_attribute_config)
                .build()
        })
    }
}
