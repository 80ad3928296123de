// ============================================================================
// TICKER - Timer repetitivo como recurso con dueño
// ============================================================================
// Reemplaza el manejo manual del interval handle en un mut ref:
// el Ticker garantiza como máximo UN timer vivo por instancia.
// arm() reemplaza el timer anterior (si había), cancel() lo libera.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

/// Timer repetitivo inyectable (para poder testear los viewmodels sin
/// un event loop de navegador)
pub trait Ticks {
    /// Armar el timer con el periodo dado. Si ya había un timer vivo,
    /// se cancela y se reemplaza: nunca hay dos timers concurrentes.
    fn arm(&self, period_ms: u32, tick: Box<dyn Fn()>);

    /// Cancelar el timer. No-op si no había timer armado.
    fn cancel(&self);

    /// ¿Hay un timer vivo?
    fn is_armed(&self) -> bool;
}

/// Implementación real sobre gloo_timers::callback::Interval.
/// Drop del Interval anterior cancela el setInterval subyacente.
#[derive(Clone, Default)]
pub struct GlooTicker {
    handle: Rc<RefCell<Option<Interval>>>,
}

impl GlooTicker {
    pub fn new() -> Self {
        Self {
            handle: Rc::new(RefCell::new(None)),
        }
    }
}

impl Ticks for GlooTicker {
    fn arm(&self, period_ms: u32, tick: Box<dyn Fn()>) {
        let interval = Interval::new(period_ms, move || {
            tick();
        });
        // Reemplazar: el Interval anterior se cancela al dropearse
        *self.handle.borrow_mut() = Some(interval);
        log::info!("⏰ Ticker armado cada {}s", period_ms / 1000);
    }

    fn cancel(&self) {
        if self.handle.borrow_mut().take().is_some() {
            log::info!("🛑 Ticker cancelado");
        }
    }

    fn is_armed(&self) -> bool {
        self.handle.borrow().is_some()
    }
}
