// ============================================================================
// APP VIEW - Router de superficies
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::app_state::{AppState, Route};
use crate::viewmodels::{DriverGuard, TrackingViewModel};
use crate::views::dashboard::render_dashboard;
use crate::views::login::render_login;

/// Renderizar la superficie actual según la ruta
pub fn render_app(
    state: &AppState,
    guard: &DriverGuard,
    tracking_vm: &TrackingViewModel,
) -> Result<Element, JsValue> {
    match state.get_route() {
        Route::Login => render_login(state),
        Route::Dashboard => render_dashboard(state, guard, tracking_vm),
    }
}
