// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM (estilo vanilla JS)
// ============================================================================
// Solo actualiza los elementos que cambiaron, sin re-renderizar la vista entera.
// El panel de tracking se refresca en cada tick del loop (cada 15s), así que
// tocar solo sus nodos evita perder el foco y los listeners del resto.
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::{add_class, get_element_by_id, remove_class, set_text_content};
use crate::state::app_state::AppState;
use crate::views::dashboard::{freshness_class, last_report_label, toggle_label};

/// Actualizar el panel de tracking (botón, estado y último reporte)
pub fn update_tracking_panel(state: &AppState) -> Result<(), JsValue> {
    let language = state.get_language();
    let tracking = state.tracking.is_tracking();

    // 1. Botón de toggle: texto y clase según el estado
    if let Some(button) = get_element_by_id("tracking-toggle") {
        set_text_content(&button, &toggle_label(tracking, &language));
        if tracking {
            remove_class(&button, "inactive")?;
            add_class(&button, "active")?;
        } else {
            remove_class(&button, "active")?;
            add_class(&button, "inactive")?;
        }
    } else {
        log::warn!("⚠️ Elemento #tracking-toggle no encontrado en el DOM");
    }

    // 2. Badge de estado
    if let Some(status) = get_element_by_id("tracking-status") {
        let key = if tracking {
            "tracking_activo"
        } else {
            "tracking_inactivo"
        };
        set_text_content(&status, &crate::utils::i18n::t(key, &language));
        if tracking {
            remove_class(&status, "status-inactive")?;
            add_class(&status, "status-active")?;
        } else {
            remove_class(&status, "status-active")?;
            add_class(&status, "status-inactive")?;
        }
    }

    // 3. Último reporte con su marca de frescura
    let reported_at = state
        .tracking
        .get_last_reported()
        .or_else(|| state.driver.get_driver().and_then(|d| d.updated_at));

    if let Some(label) = get_element_by_id("last-report") {
        let now = chrono::Utc::now();
        set_text_content(&label, &last_report_label(reported_at, now, &language));
        remove_class(&label, "fresh")?;
        remove_class(&label, "stale")?;
        if let Some(class) = freshness_class(reported_at, now) {
            add_class(&label, class)?;
        }
    }

    log::debug!("🔄 Panel de tracking actualizado (tracking={})", tracking);
    Ok(())
}
