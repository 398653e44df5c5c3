//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation entity — only the table/customer linkage matters here;
/// scheduling fields live in the master-data store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}
