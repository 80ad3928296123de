// ============================================================================
// APP - Aplicación principal
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::incremental::update_tracking_panel;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::models::Driver;
use crate::services::api_client::ApiClient;
use crate::services::{BrowserNavigate, DeviceGeolocation, ToastService};
use crate::state::app_state::{AppState, IncrementalUpdate, Route, UpdateType};
use crate::utils::constants::{DRIVER_PROFILE_KEY, LOGIN_PATH};
use crate::utils::storage::load_from_storage;
use crate::utils::ticker::GlooTicker;
use crate::viewmodels::{DriverGuard, TrackingViewModel};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    guard: DriverGuard,
    tracking_vm: TrackingViewModel,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Ruta según el pathname actual
        let route = Self::current_route();
        state.set_route(route);

        // Perfil guardado en storage como semilla optimista: el guard
        // lo verifica contra el backend de todas formas
        if route == Route::Dashboard {
            if let Some(saved_profile) = load_from_storage::<Driver>(DRIVER_PROFILE_KEY) {
                log::info!("💾 [APP] Perfil encontrado en storage: {}", saved_profile.name);
                state.driver.set_driver(Some(saved_profile));
            }
        } else {
            state.driver.set_loading(false);
        }

        // Servicios de producción
        let api = Rc::new(ApiClient::new());
        let source = Rc::new(DeviceGeolocation::new());
        let toasts = Rc::new(ToastService::new());
        let ticker = Rc::new(GlooTicker::new());
        let nav = Rc::new(BrowserNavigate::new());

        // El guard re-renderiza completo al resolver (aparece o
        // desaparece el panel de tracking)
        let guard = DriverGuard::new(
            state.driver.clone(),
            api.clone(),
            nav,
            Rc::new(|| crate::rerender_app()),
        );

        // El loop de tracking solo toca su panel
        let tracking_vm = TrackingViewModel::new(
            state.driver.clone(),
            state.tracking.clone(),
            api,
            source,
            toasts,
            ticker,
            state.language.clone(),
            Rc::new(|| {
                crate::rerender_app_with_type(UpdateType::Incremental(
                    IncrementalUpdate::TrackingPanel,
                ))
            }),
        );

        Ok(Self {
            state,
            guard,
            tracking_vm,
            root: Some(root),
        })
    }

    fn current_route() -> Route {
        let pathname = web_sys::window()
            .map(|w| w.location().pathname().unwrap_or_default())
            .unwrap_or_default();
        if pathname.starts_with(LOGIN_PATH) {
            Route::Login
        } else {
            Route::Dashboard
        }
    }

    /// Resolver la sesión de repartidor (solo en el dashboard)
    pub fn resolve_session(&self) {
        if self.state.get_route() != Route::Dashboard {
            return;
        }
        let guard = self.guard.clone();
        wasm_bindgen_futures::spawn_local(async move {
            guard.resolve().await;
        });
    }

    /// Renderizar aplicación completa
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::info!("🎬 [APP] App::render() llamado");

        if let Some(root) = &self.root {
            // Limpiar contenido anterior
            set_inner_html(root, "");

            let app_view = render_app(&self.state, &self.guard, &self.tracking_vm)?;
            append_child(root, &app_view)?;
        }
        Ok(())
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::TrackingPanel => {
                update_tracking_panel(&self.state)?;
            }
        }
        Ok(())
    }
}
