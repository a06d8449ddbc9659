use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Collections holding opaque JSON documents.
///
/// Users live in their own table with typed columns; see [`super::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Testimonials,
    Worksheets,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Testimonials => "testimonials",
            Collection::Worksheets => "worksheets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(Collection::Services),
            "testimonials" => Ok(Collection::Testimonials),
            "worksheets" | "work-sheet" => Ok(Collection::Worksheets),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

#[derive(Debug, FromRow)]
pub(crate) struct DocumentRow {
    pub id: String,
    pub body: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = serde_json::Error;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Document {
            id: row.id,
            body: serde_json::from_str(&row.body)?,
        })
    }
}
