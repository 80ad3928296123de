// ============================================================================
// DRIVER GUARD - Verificación de sesión de repartidor
// ============================================================================
// Al cargar el dashboard resuelve la sesión ambiente contra el backend.
// Mientras la consulta está pendiente NO se decide nada; recién cuando
// resuelve, la ausencia de registro (o un error de transporte, que se
// trata igual) redirige a la superficie de login.
// ============================================================================

use std::rc::Rc;

use crate::services::{DriverApi, Navigate};
use crate::state::DriverState;

#[derive(Clone)]
pub struct DriverGuard {
    state: DriverState,
    api: Rc<dyn DriverApi>,
    nav: Rc<dyn Navigate>,
    on_update: Rc<dyn Fn()>,
}

impl DriverGuard {
    pub fn new(
        state: DriverState,
        api: Rc<dyn DriverApi>,
        nav: Rc<dyn Navigate>,
        on_update: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            state,
            api,
            nav,
            on_update,
        }
    }

    /// Resolver la sesión actual. Se llama UNA vez al montar el dashboard.
    pub async fn resolve(&self) {
        self.state.set_loading(true);
        (self.on_update)();

        match self.api.fetch_driver_profile().await {
            Ok(Some(driver)) => {
                log::info!("✅ Sesión de repartidor válida: {}", driver.id);
                self.state.set_driver(Some(driver));
                self.state.set_error(None);
            }
            Ok(None) => {
                log::info!("🚫 La sesión no es de un repartidor, redirigiendo al login");
                self.state.set_driver(None);
                self.nav.redirect_to_login();
            }
            Err(e) => {
                // El guard no distingue "no autorizado" de un error
                // transitorio: ambos redirigen. El detalle queda en el log.
                log::warn!("⚠️ Error resolviendo perfil de repartidor: {}", e);
                self.state.set_driver(None);
                self.state.set_error(Some(e));
                self.nav.redirect_to_login();
            }
        }

        self.state.set_loading(false);
        (self.on_update)();
    }

    /// Soltar la sesión local y volver a la superficie de login.
    /// Usa el mismo colaborador de navegación inyectado que resolve().
    pub fn sign_out(&self) {
        log::info!("👋 Cerrando sesión de repartidor");
        self.state.set_driver(None);
        self.state.set_error(None);
        self.nav.redirect_to_login();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    use crate::models::Driver;

    fn test_driver() -> Driver {
        Driver {
            id: "drv-1".to_string(),
            name: "Marta".to_string(),
            latitude: None,
            longitude: None,
            updated_at: None,
        }
    }

    struct FixedApi {
        profile: Result<Option<Driver>, String>,
    }

    #[async_trait(?Send)]
    impl DriverApi for FixedApi {
        async fn fetch_driver_profile(&self) -> Result<Option<Driver>, String> {
            self.profile.clone()
        }

        async fn update_driver_location(
            &self,
            _driver_id: &str,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<(), String> {
            Ok(())
        }
    }

    /// API cuyo fetch queda pendiente hasta que el test lo resuelva
    struct PendingApi {
        rx: RefCell<Option<oneshot::Receiver<Result<Option<Driver>, String>>>>,
    }

    #[async_trait(?Send)]
    impl DriverApi for PendingApi {
        async fn fetch_driver_profile(&self) -> Result<Option<Driver>, String> {
            let rx = self.rx.borrow_mut().take().expect("fetch llamado dos veces");
            rx.await.unwrap_or_else(|_| Err("canal cerrado".to_string()))
        }

        async fn update_driver_location(
            &self,
            _driver_id: &str,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<(), String> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNav {
        redirects: Cell<u32>,
    }

    impl Navigate for MockNav {
        fn redirect_to_login(&self) {
            self.redirects.set(self.redirects.get() + 1);
        }
    }

    fn guard_with(
        api: Rc<dyn DriverApi>,
    ) -> (DriverGuard, DriverState, Rc<MockNav>) {
        let state = DriverState::new();
        let nav = Rc::new(MockNav::default());
        let guard = DriverGuard::new(state.clone(), api, nav.clone(), Rc::new(|| {}));
        (guard, state, nav)
    }

    #[test]
    fn perfil_presente_no_redirige() {
        let api = Rc::new(FixedApi {
            profile: Ok(Some(test_driver())),
        });
        let (guard, state, nav) = guard_with(api);

        block_on(guard.resolve());

        assert_eq!(nav.redirects.get(), 0);
        assert_eq!(state.driver_id().as_deref(), Some("drv-1"));
        assert!(!state.get_loading());
    }

    #[test]
    fn perfil_ausente_redirige_exactamente_una_vez() {
        let api = Rc::new(FixedApi { profile: Ok(None) });
        let (guard, state, nav) = guard_with(api);

        block_on(guard.resolve());

        assert_eq!(nav.redirects.get(), 1);
        assert!(state.get_driver().is_none());
        assert!(!state.get_loading());
    }

    #[test]
    fn error_de_transporte_se_trata_como_ausencia() {
        let api = Rc::new(FixedApi {
            profile: Err("network down".to_string()),
        });
        let (guard, state, nav) = guard_with(api);

        block_on(guard.resolve());

        assert_eq!(nav.redirects.get(), 1);
        assert!(state.get_driver().is_none());
        assert_eq!(state.get_error().as_deref(), Some("network down"));
    }

    #[test]
    fn no_redirige_mientras_el_fetch_esta_pendiente() {
        let (tx, rx) = oneshot::channel();
        let api = Rc::new(PendingApi {
            rx: RefCell::new(Some(rx)),
        });
        let (guard, state, nav) = guard_with(api);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        spawner
            .spawn_local(async move { guard.resolve().await })
            .unwrap();

        // Fetch pendiente: sin decisión de redirect todavía
        pool.run_until_stalled();
        assert_eq!(nav.redirects.get(), 0);
        assert!(state.get_loading());

        // El fetch resuelve sin perfil: ahora sí redirige, una sola vez
        tx.send(Ok(None)).unwrap();
        pool.run();
        assert_eq!(nav.redirects.get(), 1);
        assert!(!state.get_loading());
    }

    #[test]
    fn sign_out_limpia_el_perfil_y_redirige_por_el_navegador_inyectado() {
        let api = Rc::new(FixedApi {
            profile: Ok(Some(test_driver())),
        });
        let (guard, state, nav) = guard_with(api);

        block_on(guard.resolve());
        assert!(state.get_driver().is_some());

        guard.sign_out();

        assert!(state.get_driver().is_none());
        assert!(state.get_error().is_none());
        assert_eq!(nav.redirects.get(), 1);
    }
}
