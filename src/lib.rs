// ============================================================================
// DRIVER HUB APP - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI (session guard, loop de tracking)
// - Services: SOLO comunicación con backend/navegador
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

mod app;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::state::app_state::UpdateType;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::default());
    log::info!("🚀 Driver Hub App - Rust Puro + MVVM");

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    // Verificar la sesión de repartidor contra el backend
    app.resolve_session();

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-renderizar la app (re-render completo)
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con tipo específico
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        match update_type {
            UpdateType::Incremental(inc_type) => {
                if let Some(ref app) = *app_cell.borrow() {
                    if let Err(e) = app.update_incremental(inc_type) {
                        log::error!("❌ Error en actualización incremental: {:?}", e);
                    }
                } else {
                    log::warn!("⚠️ [UPDATE] App no está inicializada");
                }
            }
            UpdateType::FullRender => {
                if let Some(ref mut app_mut) = *app_cell.borrow_mut() {
                    if let Err(e) = app_mut.render() {
                        log::error!("❌ Error re-renderizando: {:?}", e);
                    }
                } else {
                    log::warn!("⚠️ [RERENDER] App no está inicializada");
                }
            }
        }
    });
}

/// Re-renderizar la app (llamable desde JavaScript)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
