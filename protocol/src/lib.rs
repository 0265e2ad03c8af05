//! Wire types and endpoints of the remote trivia service.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://jservice.io";

/// Numeric category identifier assigned by the service.
pub type CategoryId = u64;

/// One entry of the category listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues_count: Option<u32>,
}

/// Full category record including its clues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues_count: Option<u32>,
    #[serde(default)]
    pub clues: Vec<RawClue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClue {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub value: Option<u32>,
}

/// Read endpoints exposed by the service.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Categories { count: u32, offset: u32 },
    Category { id: CategoryId, offset: u32 },
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Self::Categories { count, offset } => {
                format!("/api/categories?count={count}&offset={offset}")
            }
            Self::Category { id, offset } => format!("/api/category?id={id}&offset={offset}"),
        }
    }

    /// Full request URL; a trailing slash on `base` is tolerated.
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

pub fn decode_categories(body: &str) -> serde_json::Result<Vec<CategorySummary>> {
    serde_json::from_str(body)
}

pub fn decode_category(body: &str) -> serde_json::Result<CategoryDetail> {
    serde_json::from_str(body)
}
