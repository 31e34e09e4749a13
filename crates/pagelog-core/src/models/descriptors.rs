use serde::{Deserialize, Serialize};

/// Best-effort identity of a clicked DOM node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub id: Option<String>,
    pub tag_name: Option<String>,
}

impl TargetDescriptor {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            tag_name: None,
        }
    }

    pub fn with_tag(tag_name: impl Into<String>) -> Self {
        Self {
            id: None,
            tag_name: Some(tag_name.into()),
        }
    }
}

/// Best-effort identity of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
}
