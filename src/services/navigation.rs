// ============================================================================
// NAVIGATION - Redirecciones entre superficies
// ============================================================================

use crate::utils::constants::LOGIN_PATH;

/// Colaborador de navegación, inyectable en el session guard
pub trait Navigate {
    /// Redirigir a la superficie de login de repartidores
    fn redirect_to_login(&self);
}

/// Implementación real sobre window.location
#[derive(Clone, Default)]
pub struct BrowserNavigate;

impl BrowserNavigate {
    pub fn new() -> Self {
        Self
    }
}

impl Navigate for BrowserNavigate {
    fn redirect_to_login(&self) {
        log::info!("↩️ Redirigiendo a {}", LOGIN_PATH);
        if let Some(window) = web_sys::window() {
            if window.location().set_href(LOGIN_PATH).is_err() {
                log::error!("❌ No se pudo redirigir a {}", LOGIN_PATH);
            }
        }
    }
}
