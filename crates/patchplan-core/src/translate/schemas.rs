//! Array element types of the two bundled API generations.
//!
//! Both are untagged unions over the same three JSON shapes; only the
//! generated names differ.

pub mod v3 {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ArrayInner {
        String(String),
        Integer(i32),
        Object(serde_json::Map<String, serde_json::Value>),
    }
}

pub mod beta {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ArrayInner {
        Text(String),
        Int32(i32),
        MapStringAny(serde_json::Map<String, serde_json::Value>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generations_accept_the_same_shapes() {
        let raw = json!(["a", 3, {"id": "x"}]);
        let old: Vec<v3::ArrayInner> = serde_json::from_value(raw.clone()).unwrap();
        let new: Vec<beta::ArrayInner> = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&old).unwrap(), raw);
        assert_eq!(serde_json::to_value(&new).unwrap(), raw);
        assert_eq!(new[1], beta::ArrayInner::Int32(3));
    }
}
