use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The sole persisted entity. `id` is assigned by MySQL on insert and
/// immutable afterwards; the store keeps `status` as plain text — the
/// closed enumeration is enforced at the API boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub status: String,
}

/// Closed set of item states. The wire labels are the original Spanish
/// ones; any other value is rejected by serde before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pendiente",
            ItemStatus::InProgress => "En progreso",
            ItemStatus::Completed => "Completado",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_three_labels() {
        for (label, expected) in [
            ("Pendiente", ItemStatus::Pending),
            ("En progreso", ItemStatus::InProgress),
            ("Completado", ItemStatus::Completed),
        ] {
            let parsed: ItemStatus =
                serde_json::from_value(serde_json::json!(label)).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.as_str(), label);
        }
    }

    #[test]
    fn rejects_values_outside_the_enumeration() {
        for label in ["Done", "pendiente", "", "Cancelado"] {
            let result: Result<ItemStatus, _> =
                serde_json::from_value(serde_json::json!(label));
            assert!(result.is_err(), "label {label:?} should be rejected");
        }
    }
}
