use super::common::Reference;
use crate::describe_struct;
use crate::registry::{Comparable, ResourceComparisonSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// An automation: a trigger plus a graph of steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    pub description: String,
    pub owner: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<WorkflowDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<WorkflowTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Name of the first step
    pub start: String,
    /// Step name to step body; bodies are free-form.
    ///
    /// Leaves must be strings, bools or `i32` integers once they change; a
    /// float or larger integer leaf fails with `UnsupportedValueKind`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowTrigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
    pub display_name: String,
    /// Free-form; same leaf limits as [`WorkflowDefinition::steps`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, serde_json::Value>>,
}

describe_struct!(WorkflowDefinition {
    start => "start",
    steps => "steps",
});

describe_struct!(WorkflowTrigger {
    trigger_type => "type",
    display_name => "displayName",
    attributes => "attributes",
});

impl Comparable for Workflow {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self> {
        static SPEC: OnceLock<ResourceComparisonSpec<Workflow>> = OnceLock::new();
        SPEC.get_or_init(|| {
            ResourceComparisonSpec::<Workflow>::builder("workflow")
                .value("name", |w| &w.name)
                .value("description", |w| &w.description)
                .reference("owner", |w| &w.owner)
                .value("definition", |w| &w.definition)
                .value("trigger", |w| &w.trigger)
                .value("enabled", |w| &w.enabled)
                .build()
        })
    }
}
