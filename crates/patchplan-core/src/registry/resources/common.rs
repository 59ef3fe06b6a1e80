use crate::describe_struct;
use serde::{Deserialize, Serialize};

/// Pointer to another object, compared by `id` alone
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub id: String,
    #[serde(rename = "type")]
    pub ref_type: String,
    pub name: String,
}

impl Reference {
    pub fn new(id: impl Into<String>, ref_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ref_type: ref_type.into(),
            name: name.into(),
        }
    }
}

describe_struct!(Reference {
    id => "id",
    ref_type => "type",
    name => "name",
});
