use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// DRIVER RECORD - Entidad persistida del repartidor
// ============================================================================
// Creado por el flujo de registro (fuera de este subsistema).
// lat/lng/updated_at los muta SOLO el loop de reporte (vía backend);
// el dashboard y la vista de logística del admin solo los leen.
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    /// ID único del repartidor
    pub id: String,

    /// Nombre visible
    pub name: String,

    /// Última latitud conocida (None hasta el primer reporte)
    pub latitude: Option<f64>,

    /// Última longitud conocida
    pub longitude: Option<f64>,

    /// Timestamp del último reporte aceptado por el backend
    pub updated_at: Option<DateTime<Utc>>,
}

impl Driver {
    /// ¿El repartidor ya reportó alguna posición?
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
