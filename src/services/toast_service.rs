// ============================================================================
// TOAST SERVICE - Notificaciones visibles para el usuario
// ============================================================================
// Toasts de error/éxito con auto-descarte. Los errores de dispositivo del
// loop de tracking llegan por acá; los errores de subida NO (se loguean
// sin toast para no inundar al usuario en conexiones inestables).
// ============================================================================

use gloo_timers::callback::Timeout;
use web_sys::Element;

use crate::dom::{append_child, create_element, get_element_by_id, set_class_name, set_text_content};

/// Tiempo que un toast permanece visible
const TOAST_DURATION_MS: u32 = 4_000;

/// Colaborador de notificaciones, inyectable en los viewmodels
pub trait Notifier {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Implementación real sobre el DOM
#[derive(Clone, Default)]
pub struct ToastService;

impl ToastService {
    pub fn new() -> Self {
        Self
    }

    /// Contenedor de toasts (se crea perezosamente la primera vez)
    fn container() -> Option<Element> {
        if let Some(existing) = get_element_by_id("toast-container") {
            return Some(existing);
        }

        let container = create_element("div").ok()?;
        set_class_name(&container, "toast-container");
        container.set_id("toast-container");

        let body = web_sys::window()?.document()?.body()?;
        body.append_child(&container).ok()?;
        Some(container)
    }

    fn show(&self, message: &str, kind: &str) {
        let Some(container) = Self::container() else {
            // Sin DOM (p.ej. tests nativos) el mensaje queda en el log
            log::warn!("🔔 Toast sin DOM: {}", message);
            return;
        };

        let toast = match create_element("div") {
            Ok(el) => el,
            Err(_) => return,
        };
        set_class_name(&toast, &format!("toast toast-{}", kind));
        set_text_content(&toast, message);

        if append_child(&container, &toast).is_err() {
            return;
        }

        // Auto-descarte
        let toast_clone = toast.clone();
        Timeout::new(TOAST_DURATION_MS, move || {
            toast_clone.remove();
        })
        .forget();
    }
}

impl Notifier for ToastService {
    fn error(&self, message: &str) {
        log::error!("❌ {}", message);
        self.show(message, "error");
    }

    fn success(&self, message: &str) {
        log::info!("✅ {}", message);
        self.show(message, "success");
    }
}
