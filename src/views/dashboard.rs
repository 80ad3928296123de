// ============================================================================
// DASHBOARD VIEW - Panel del repartidor con el toggle de tracking
// ============================================================================

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::app_state::AppState;
use crate::utils::constants::{DRIVER_PROFILE_KEY, FRESH_WINDOW_SECS};
use crate::utils::i18n::t;
use crate::utils::storage::remove_from_storage;
use crate::viewmodels::{DriverGuard, TrackingViewModel};

/// Texto del botón de toggle según el estado de la sesión
pub fn toggle_label(tracking: bool, language: &str) -> String {
    if tracking {
        t("detener_tracking", language)
    } else {
        t("iniciar_tracking", language)
    }
}

/// Clase CSS de frescura del último reporte: dentro de la ventana de 30s
/// es "fresh", fuera "stale". Sin reporte no hay clase.
pub fn freshness_class(
    reported_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<&'static str> {
    reported_at.map(|at| {
        let age = now.signed_duration_since(at).num_seconds();
        if age <= FRESH_WINDOW_SECS {
            "fresh"
        } else {
            "stale"
        }
    })
}

/// Línea de "último reporte" del panel de tracking
pub fn last_report_label(
    reported_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    language: &str,
) -> String {
    match reported_at {
        None => t("sin_reportes", language),
        Some(at) => {
            let freshness = if freshness_class(reported_at, now) == Some("fresh") {
                t("fresco", language)
            } else {
                t("obsoleto", language)
            };
            format!(
                "{}: {} ({})",
                t("ultimo_reporte", language),
                at.format("%H:%M:%S"),
                freshness
            )
        }
    }
}

/// Renderizar el dashboard del repartidor
pub fn render_dashboard(
    state: &AppState,
    guard: &DriverGuard,
    tracking_vm: &TrackingViewModel,
) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render_dashboard() llamado");

    let language = state.get_language();

    let screen = ElementBuilder::new("div")?.class("dashboard-screen").build();

    // Header
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let title = ElementBuilder::new("h1")?
        .text(&t("dashboard_title", &language))
        .build();
    append_child(&header, &title)?;

    let actions = ElementBuilder::new("div")?.class("header-actions").build();

    // Toggle de idioma ES/EN
    let lang_btn = ElementBuilder::new("button")?
        .class("btn-icon-header btn-language")
        .text(if language == "EN" { "🇪🇸" } else { "🇬🇧" })
        .build();
    {
        let state = state.clone();
        on_click(&lang_btn, move |_| {
            let next = if state.get_language() == "EN" { "ES" } else { "EN" };
            log::info!("🌐 Idioma cambiado a {}", next);
            state.set_language(next.to_string());
            crate::rerender_app();
        })?;
    }
    append_child(&actions, &lang_btn)?;

    // Logout
    let logout_btn = ElementBuilder::new("button")?
        .class("btn-icon-header btn-logout")
        .attr("title", &t("deconnexion", &language))?
        .text("👋")
        .build();
    {
        let tracking_vm = tracking_vm.clone();
        let guard = guard.clone();
        on_click(&logout_btn, move |_| {
            log::info!("👋 Logout iniciado");

            // Cortar el loop antes de soltar la sesión
            if tracking_vm.is_tracking() {
                tracking_vm.stop();
            }

            if let Err(e) = remove_from_storage(DRIVER_PROFILE_KEY) {
                log::error!("❌ Error limpiando perfil de storage: {}", e);
            }

            guard.sign_out();
        })?;
    }
    append_child(&actions, &logout_btn)?;
    append_child(&header, &actions)?;
    append_child(&screen, &header)?;

    // Mientras el guard resuelve no se muestra el panel de tracking
    if state.driver.get_loading() {
        let checking = ElementBuilder::new("div")?
            .class("guard-checking")
            .text(&t("verificando", &language))
            .build();
        append_child(&screen, &checking)?;
        return Ok(screen);
    }

    let Some(driver) = state.driver.get_driver() else {
        // Guard resuelto sin perfil: el redirect ya está en curso
        return Ok(screen);
    };

    let greeting = ElementBuilder::new("p")?
        .class("driver-name")
        .text(&driver.name)
        .build();
    append_child(&screen, &greeting)?;

    // Última posición conocida (si ya reportó alguna vez)
    if driver.has_position() {
        let coords = ElementBuilder::new("p")?
            .class("driver-coords")
            .text(&format!(
                "📍 {:.5}, {:.5}",
                driver.latitude.unwrap_or_default(),
                driver.longitude.unwrap_or_default()
            ))
            .build();
        append_child(&screen, &coords)?;
    }

    // Panel de tracking
    let panel = ElementBuilder::new("div")?
        .id("tracking-panel")?
        .class("tracking-panel")
        .build();

    let tracking = tracking_vm.is_tracking();

    let status_key = if tracking { "tracking_activo" } else { "tracking_inactivo" };
    let status_class = if tracking { "status-active" } else { "status-inactive" };
    let status = ElementBuilder::new("span")?
        .id("tracking-status")?
        .class(&format!("tracking-status {}", status_class))
        .text(&t(status_key, &language))
        .build();
    append_child(&panel, &status)?;

    let reported_at = state
        .tracking
        .get_last_reported()
        .or(driver.updated_at);
    let now = Utc::now();
    let mut report_class = "last-report".to_string();
    if let Some(class) = freshness_class(reported_at, now) {
        report_class.push(' ');
        report_class.push_str(class);
    }
    let last_report = ElementBuilder::new("div")?
        .id("last-report")?
        .class(&report_class)
        .text(&last_report_label(reported_at, now, &language))
        .build();
    append_child(&panel, &last_report)?;

    let toggle_class = if tracking { "toggle-btn active" } else { "toggle-btn inactive" };
    let toggle = ElementBuilder::new("button")?
        .id("tracking-toggle")?
        .class(toggle_class)
        .text(&toggle_label(tracking, &language))
        .build();
    {
        let tracking_vm = tracking_vm.clone();
        on_click(&toggle, move |_| {
            if tracking_vm.is_tracking() {
                tracking_vm.stop();
            } else {
                let vm = tracking_vm.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    vm.start().await;
                });
            }
        })?;
    }
    append_child(&panel, &toggle)?;

    append_child(&screen, &panel)?;

    Ok(screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    #[test]
    fn etiqueta_del_toggle_segun_estado() {
        assert_eq!(toggle_label(false, "ES"), "Iniciar tracking");
        assert_eq!(toggle_label(true, "ES"), "Detener tracking");
        assert_eq!(toggle_label(true, "EN"), "Stop tracking");
    }

    #[test]
    fn sin_reporte_no_hay_clase_de_frescura() {
        assert_eq!(freshness_class(None, Utc::now()), None);
    }

    #[test]
    fn reporte_dentro_de_la_ventana_es_fresh() {
        let now = Utc::now();
        let at = now - Duration::seconds(10);
        assert_eq!(freshness_class(Some(at), now), Some("fresh"));

        // El borde exacto de 30s todavía cuenta como fresco
        let at = now - Duration::seconds(FRESH_WINDOW_SECS);
        assert_eq!(freshness_class(Some(at), now), Some("fresh"));
    }

    #[test]
    fn reporte_fuera_de_la_ventana_es_stale() {
        let now = Utc::now();
        let at = now - Duration::seconds(FRESH_WINDOW_SECS + 1);
        assert_eq!(freshness_class(Some(at), now), Some("stale"));
    }

    #[test]
    fn reloj_adelantado_del_backend_cuenta_como_fresh() {
        // updated_at ligeramente en el futuro por skew de relojes
        let now = Utc::now();
        let at = now + Duration::seconds(5);
        assert_eq!(freshness_class(Some(at), now), Some("fresh"));
    }

    #[test]
    fn etiqueta_de_ultimo_reporte() {
        let now = Utc::now();
        assert_eq!(last_report_label(None, now, "ES"), "Sin reportes todavía");

        let at = now - Duration::seconds(5);
        let label = last_report_label(Some(at), now, "ES");
        assert!(label.starts_with("Último reporte: "));
        assert!(label.ends_with("(reciente)"));

        let at = now - Duration::seconds(120);
        let label = last_report_label(Some(at), now, "EN");
        assert!(label.ends_with("(stale)"));
    }
}
