use serde::{Deserialize, Serialize};

/// One affected geographic area within a live alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertArea {
    pub area_name: String,
    pub area_name_he: String,
    pub lat: f64,
    pub lng: f64,
    pub threat_level: f64,
}

/// A live public-alert event from the external feed.
///
/// The alert list is replaced wholesale on every poll tick; an alert missing
/// from the latest payload has ended. There is no separate expiry event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub areas: Vec<AlertArea>,
    pub timestamp: String,
}
