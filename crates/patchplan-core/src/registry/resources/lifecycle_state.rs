use crate::describe_struct;
use crate::introspect::Nullable;
use crate::registry::{Comparable, ResourceComparisonSpec};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A stage in an identity's lifecycle and the actions taken on entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifecycleState {
    pub name: String,
    pub technical_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_profile_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notification_option: Option<EmailNotificationOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_actions: Option<Vec<AccountAction>>,
    #[serde(skip_serializing_if = "Nullable::is_unset")]
    pub identity_state: Nullable<String>,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailNotificationOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_managers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_all_admins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_specific_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountAction {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ids: Option<Vec<String>>,
}

describe_struct!(EmailNotificationOption {
    notify_managers => "notifyManagers",
    notify_all_admins => "notifyAllAdmins",
    notify_specific_users => "notifySpecificUsers",
    email_address_list => "emailAddressList",
});

describe_struct!(AccountAction {
    action => "action",
    source_ids => "sourceIds",
});

impl Comparable for LifecycleState {
    fn comparison_spec() -> &'static ResourceComparisonSpec<Self> {
        static SPEC: OnceLock<ResourceComparisonSpec<LifecycleState>> = OnceLock::new();
        SPEC.get_or_init(|| {
            ResourceComparisonSpec::<LifecycleState>::builder("lifecycle-state")
                .value("name", |l| &l.name)
                .value("technicalName", |l| &l.technical_name)
                .value("description", |l| &l.description)
                .value("accessProfileIds", |l| &l.access_profile_ids)
                .value("emailNotificationOption", |l| &l.email_notification_option)
                .value("accountActions", |l| &l.account_actions)
                .value("identityState", |l| &l.identity_state)
                .value("priority", |l| &l.priority)
                .value("enabled", |l| &l.enabled)
                .build()
        })
    }
}
