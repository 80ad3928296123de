// ============================================================================
// DRIVER STATE - Estado del session guard
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Driver;

/// Resultado del guard: perfil del repartidor + flag de carga.
/// Mientras loading es true NO se toma ninguna decisión de redirect.
#[derive(Clone)]
pub struct DriverState {
    pub driver: Rc<RefCell<Option<Driver>>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl DriverState {
    pub fn new() -> Self {
        Self {
            driver: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(true)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_driver(&self, driver: Option<Driver>) {
        *self.driver.borrow_mut() = driver;
    }

    pub fn get_driver(&self) -> Option<Driver> {
        self.driver.borrow().clone()
    }

    pub fn driver_id(&self) -> Option<String> {
        self.driver.borrow().as_ref().map(|d| d.id.clone())
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }
}

impl Default for DriverState {
    fn default() -> Self {
        Self::new()
    }
}
