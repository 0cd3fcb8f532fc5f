use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaEntry {
    pub id: u32,
    pub question: String,
    pub answer: String,
}
