//! Submission offices.

use super::CertificateKind;
use serde::{Deserialize, Serialize};

/// Geographic position of an office entrance. Only carried for map clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A physical office where certificates are issued or submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub id: u32,
    pub name: String,
    pub building: String,
    pub floor: String,
    pub room: String,
    /// Opening hours, e.g. "9:00 AM - 5:00 PM".
    pub hours: String,
    /// Opening days, e.g. "Monday - Friday".
    pub days: String,
    pub coordinates: Coordinates,
    /// Certificates handled here, in display order.
    #[serde(default)]
    pub certificates: Vec<CertificateKind>,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Office {
    pub fn handles(&self, kind: CertificateKind) -> bool {
        self.certificates.contains(&kind)
    }

    /// "Administrative Block, 1st Floor, Room A-105"
    pub fn address(&self) -> String {
        format!("{}, {}, Room {}", self.building, self.floor, self.room)
    }
}
