//! Bundled resource types.
//!
//! Wire names are lowerCamelCase. Collections and toggles that the remote
//! API may omit are `Option`s, so an omitted value reads as unset rather
//! than as an empty value. Toggles are declared last in each spec.

pub mod common;
pub mod identity_profile;
pub mod lifecycle_state;
pub mod role;
pub mod source;
pub mod workflow;

pub use common::Reference;
pub use identity_profile::{AttributeTransform, IdentityAttributeConfig, IdentityProfile};
pub use lifecycle_state::{AccountAction, EmailNotificationOption, LifecycleState};
pub use role::{Role, RoleMembership};
pub use source::Source;
pub use workflow::{Workflow, WorkflowDefinition, WorkflowTrigger};
