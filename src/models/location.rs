use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Muestra efímera de geolocalización del dispositivo.
/// No se persiste localmente: se reenvía al backend y se descarta.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    pub captured_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, captured_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            captured_at,
        }
    }
}
