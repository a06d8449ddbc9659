use serde::Serialize;

/// Acknowledgement for a single-document insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Acknowledgement for a single-document update.
///
/// `matched_count` counts records with the identifier, `modified_count`
/// only those whose stored value changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// Response of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegisterOutcome {
    Inserted(InsertResult),
    AlreadyExists {
        message: String,
        #[serde(rename = "insertedId")]
        inserted_id: Option<String>,
    },
}

impl RegisterOutcome {
    pub fn already_exists() -> Self {
        RegisterOutcome::AlreadyExists {
            message: "user exist".to_string(),
            inserted_id: None,
        }
    }
}
