// ============================================================================
// TRACKING STATE - Estado de la sesión de tracking
// ============================================================================
// Propiedad exclusiva de la instancia del dashboard. El booleano tracking
// y la generación son la única memoria compartida entre el loop y la UI.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct TrackingState {
    /// ¿Hay una sesión de tracking activa?
    pub tracking: Rc<RefCell<bool>>,

    /// Generación de la sesión. Cada start/stop la incrementa; los
    /// resultados en vuelo de una generación vieja se descartan.
    pub generation: Rc<RefCell<u64>>,

    /// Timestamp del último reporte aceptado por el backend
    pub last_reported: Rc<RefCell<Option<DateTime<Utc>>>>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self {
            tracking: Rc::new(RefCell::new(false)),
            generation: Rc::new(RefCell::new(0)),
            last_reported: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_tracking(&self, tracking: bool) {
        *self.tracking.borrow_mut() = tracking;
    }

    pub fn is_tracking(&self) -> bool {
        *self.tracking.borrow()
    }

    /// Avanzar la generación e invalidar el trabajo en vuelo anterior.
    /// Devuelve la generación nueva.
    pub fn bump_generation(&self) -> u64 {
        let mut generation = self.generation.borrow_mut();
        *generation += 1;
        *generation
    }

    pub fn current_generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// ¿Un resultado de la generación dada sigue siendo válido?
    pub fn is_current(&self, generation: u64) -> bool {
        self.is_tracking() && self.current_generation() == generation
    }

    pub fn set_last_reported(&self, at: Option<DateTime<Utc>>) {
        *self.last_reported.borrow_mut() = at;
    }

    pub fn get_last_reported(&self) -> Option<DateTime<Utc>> {
        *self.last_reported.borrow()
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::new()
    }
}
