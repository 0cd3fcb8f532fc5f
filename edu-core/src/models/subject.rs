use serde::{Deserialize, Serialize};

/// A single selectable subject inside a curriculum area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDetail {
    pub id: u32,
    pub detail: String,
}

/// A curriculum area (e.g. 과학) and its ordered detail subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCategory {
    pub id: u32,
    pub area: String,
    pub details: Vec<SubjectDetail>,
}

impl SubjectCategory {
    pub fn contains(
        &self,
        detail: &str,
    ) -> bool {
        self.details.iter().any(|d| d.detail == detail)
    }
}
