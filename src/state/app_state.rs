// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::{DriverState, TrackingState};
use crate::utils::constants::LANGUAGE_KEY;

/// Tipo de actualización del DOM
#[derive(Clone, Debug)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    /// Re-render completo (login/logout, resolución del guard)
    FullRender,
}

/// Tipo de actualización incremental específica
#[derive(Clone, Debug)]
pub enum IncrementalUpdate {
    /// Panel de tracking del dashboard (estado, botón, último reporte)
    TrackingPanel,
}

/// Superficie actual de la SPA
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub driver: DriverState,
    pub tracking: TrackingState,

    // UI State
    pub route: Rc<RefCell<Route>>,
    pub language: Rc<RefCell<String>>,
}

impl AppState {
    pub fn new() -> Self {
        let language = Self::load_string_pref(LANGUAGE_KEY, "ES".to_string());

        Self {
            driver: DriverState::new(),
            tracking: TrackingState::new(),

            route: Rc::new(RefCell::new(Route::Dashboard)),
            language: Rc::new(RefCell::new(language)),
        }
    }

    /// Cargar preferencia string desde localStorage
    fn load_string_pref(key: &str, default: String) -> String {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(value)) = storage.get_item(key) {
                    return value;
                }
            }
        }
        default
    }

    /// Guardar preferencia string en localStorage
    pub fn save_string_pref(&self, key: &str, value: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
    }

    pub fn get_language(&self) -> String {
        self.language.borrow().clone()
    }

    /// Establecer language y guardar en localStorage
    pub fn set_language(&self, lang: String) {
        *self.language.borrow_mut() = lang.clone();
        self.save_string_pref(LANGUAGE_KEY, &lang);
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
    }

    pub fn get_route(&self) -> Route {
        *self.route.borrow()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
