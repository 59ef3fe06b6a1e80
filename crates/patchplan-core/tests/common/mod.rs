use patchplan_core::introspect::Nullable;
use patchplan_core::registry::resources::{
    AccountAction, AttributeTransform, EmailNotificationOption, IdentityAttributeConfig,
    IdentityProfile, LifecycleState, Reference, Role, RoleMembership, Source, Workflow,
    WorkflowDefinition, WorkflowTrigger,
};
use serde_json::json;
use std::collections::BTreeMap;

/// Build a string-keyed JSON map from `(key, value)` pairs
#[allow(dead_code)]
pub fn json_map(entries: &[(&str, serde_json::Value)]) -> BTreeMap<String, serde_json::Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[allow(dead_code)]
pub fn identity_ref(id: &str) -> Reference {
    Reference::new(id, "IDENTITY", "Ops Team")
}

/// A role with every declared field populated
#[allow(dead_code)]
pub fn full_role() -> Role {
    Role {
        name: "auditors".to_string(),
        description: "Read access for audit".to_string(),
        owner: identity_ref("2c9180835d2e5168015d32f890ca1581"),
        access_profiles: Some(vec![Reference::new("ap-1", "ACCESS_PROFILE", "Audit Read")]),
        membership: Some(RoleMembership {
            membership_type: "IDENTITY_LIST".to_string(),
            identities: Some(vec![identity_ref("id-7")]),
        }),
        legacy_membership_info: Some(json_map(&[("criteria", json!("department"))])),
        requestable: Some(true),
        enabled: Some(true),
    }
}

/// A source with every declared field populated
#[allow(dead_code)]
pub fn full_source() -> Source {
    Source {
        name: "HR Feed".to_string(),
        description: "Authoritative HR".to_string(),
        owner: identity_ref("owner-1"),
        cluster: Nullable::Value(Reference::new("cluster-9", "CLUSTER", "Main")),
        connector: "delimited-file".to_string(),
        connector_attributes: Some(json_map(&[
            ("delimiter", json!(",")),
            ("hasHeader", json!(true)),
        ])),
        delete_threshold: 10,
        features: Some(vec!["SEARCH".to_string(), "PROVISIONING".to_string()]),
        management_workgroup: Some(Reference::new("wg-1", "GOVERNANCE_GROUP", "Admins")),
        authoritative: Some(true),
    }
}

#[allow(dead_code)]
pub fn full_workflow() -> Workflow {
    Workflow {
        name: "Joiner notification".to_string(),
        description: "Email the manager of a new hire".to_string(),
        owner: identity_ref("owner-2"),
        definition: Some(WorkflowDefinition {
            start: "Send Email".to_string(),
            steps: Some(json_map(&[(
                "Send Email",
                json!({"actionId": "sp:send-email", "nextStep": "success"}),
            )])),
        }),
        trigger: Some(WorkflowTrigger {
            trigger_type: "EVENT".to_string(),
            display_name: "Identity Created".to_string(),
            attributes: Some(json_map(&[("id", json!("idn:identity-created"))])),
        }),
        enabled: Some(true),
    }
}

#[allow(dead_code)]
pub fn full_lifecycle_state() -> LifecycleState {
    LifecycleState {
        name: "Active".to_string(),
        technical_name: "active".to_string(),
        description: "Employed and working".to_string(),
        access_profile_ids: Some(vec!["ap-1".to_string()]),
        email_notification_option: Some(EmailNotificationOption {
            notify_managers: Some(true),
            notify_all_admins: Some(false),
            notify_specific_users: None,
            email_address_list: None,
        }),
        account_actions: Some(vec![AccountAction {
            action: "ENABLE".to_string(),
            source_ids: Some(vec!["source-1".to_string()]),
        }]),
        identity_state: Nullable::Value("ACTIVE".to_string()),
        priority: 10,
        enabled: Some(true),
    }
}

#[allow(dead_code)]
pub fn full_identity_profile() -> IdentityProfile {
    IdentityProfile {
        name: "Employees".to_string(),
        description: "Profile for HR identities".to_string(),
        owner: Nullable::Value(identity_ref("owner-3")),
        priority: 5,
        authoritative_source: Reference::new("source-1", "SOURCE", "HR Feed"),
        identity_attribute_config: Some(IdentityAttributeConfig {
            enabled: Some(true),
            attribute_transforms: Some(vec![AttributeTransform {
                identity_attribute_name: "email".to_string(),
                transform_definition: None,
            }]),
        }),
    }
}
