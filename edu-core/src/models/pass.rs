use serde::{Deserialize, Serialize};

/// Icon reference for a pass card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassIcon {
    #[serde(rename = "blueIcon")]
    Blue,
    #[serde(rename = "greenIcon")]
    Green,
    #[serde(rename = "yellowIcon")]
    Yellow,
}

impl PassIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blueIcon",
            Self::Green => "greenIcon",
            Self::Yellow => "yellowIcon",
        }
    }
}

/// A bundled service tier offered at the end of the guided flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(rename = "isBest", alias = "is_best", default)]
    pub is_best: bool,
    pub icon: PassIcon,
}
