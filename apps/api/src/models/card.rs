use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Board column a card lives in. Doubles as the application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Applied,
    Interview,
    Offer,
    Rejected,
}

/// Stable display order for columns.
pub const COLUMN_ORDER: [ColumnId; 4] = [
    ColumnId::Applied,
    ColumnId::Interview,
    ColumnId::Offer,
    ColumnId::Rejected,
];

impl ColumnId {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnId::Applied => "Applied",
            ColumnId::Interview => "Interview",
            ColumnId::Offer => "Offer",
            ColumnId::Rejected => "Rejected",
        }
    }
}

impl std::str::FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ColumnId::Applied),
            "interview" => Ok(ColumnId::Interview),
            "offer" => Ok(ColumnId::Offer),
            "rejected" => Ok(ColumnId::Rejected),
            other => Err(format!("unknown column '{other}'")),
        }
    }
}

/// Where the role is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

/// A single tracked job application.
///
/// Field names stay camelCase on the wire so persisted documents remain
/// interchangeable with the older board format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub applied_date: NaiveDate,
    pub column_id: ColumnId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<WorkMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
}
