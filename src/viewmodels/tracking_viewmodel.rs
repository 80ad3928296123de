// ============================================================================
// TRACKING VIEWMODEL - Loop de reporte de ubicación en vivo
// ============================================================================
// Máquina de dos estados: Idle y Tracking.
//
// start:  valida repartidor + soporte de geo, arma el ticker de 15s y
//         dispara una primera muestra inmediata (t=0).
// tick:   pide una posición de alta precisión y la sube al backend.
// stop:   cancela el ticker y avanza la generación; cualquier resultado
//         en vuelo de la sesión anterior se descarta al llegar.
//
// Fallos de dispositivo (permiso, timeout, sin señal) terminan la sesión
// con toast; fallos de subida se loguean y el próximo tick reintenta.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::{DriverApi, LocationSource, Notifier};
use crate::state::{DriverState, TrackingState};
use crate::utils::constants::REPORT_INTERVAL_MS;
use crate::utils::i18n::t;
use crate::utils::ticker::Ticks;

#[derive(Clone)]
pub struct TrackingViewModel {
    driver: DriverState,
    tracking: TrackingState,
    api: Rc<dyn DriverApi>,
    source: Rc<dyn LocationSource>,
    toasts: Rc<dyn Notifier>,
    ticker: Rc<dyn Ticks>,
    language: Rc<RefCell<String>>,
    on_update: Rc<dyn Fn()>,
}

impl TrackingViewModel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        driver: DriverState,
        tracking: TrackingState,
        api: Rc<dyn DriverApi>,
        source: Rc<dyn LocationSource>,
        toasts: Rc<dyn Notifier>,
        ticker: Rc<dyn Ticks>,
        language: Rc<RefCell<String>>,
        on_update: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            driver,
            tracking,
            api,
            source,
            toasts,
            ticker,
            language,
            on_update,
        }
    }

    fn lang(&self) -> String {
        self.language.borrow().clone()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_tracking()
    }

    /// Idle → Tracking. Idempotente: si ya había sesión activa, el ticker
    /// se reemplaza (nunca quedan dos timers concurrentes).
    pub async fn start(&self) {
        if self.driver.driver_id().is_none() {
            self.toasts.error(&t("sin_conductor", &self.lang()));
            return;
        }

        if !self.source.is_supported() {
            self.toasts.error(&t("geo_no_soportada", &self.lang()));
            return;
        }

        // Nueva sesión: invalida el trabajo en vuelo de la anterior
        let generation = self.tracking.bump_generation();
        self.tracking.set_tracking(true);
        (self.on_update)();

        let vm = self.clone();
        self.ticker.arm(
            REPORT_INTERVAL_MS,
            Box::new(move || {
                let vm = vm.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    vm.run_tick().await;
                });
            }),
        );

        log::info!("🛰️ Tracking iniciado (gen {})", generation);

        // Primera muestra inmediata: t=0, sin esperar el primer tick
        self.sample_and_report(generation).await;
    }

    /// Tracking → Idle, disparado por el usuario o por el teardown
    pub fn stop(&self) {
        self.halt();
        log::info!("🛑 Tracking detenido");
    }

    fn halt(&self) {
        self.ticker.cancel();
        self.tracking.set_tracking(false);
        self.tracking.bump_generation();
        (self.on_update)();
    }

    /// Cuerpo de un tick del loop (lo dispara el ticker cada 15s)
    pub async fn run_tick(&self) {
        let generation = self.tracking.current_generation();
        self.sample_and_report(generation).await;
    }

    async fn sample_and_report(&self, generation: u64) {
        if !self.tracking.is_current(generation) {
            return;
        }

        let Some(driver_id) = self.driver.driver_id() else {
            // El identificador desapareció a mitad de sesión (logout)
            self.toasts.error(&t("sin_conductor", &self.lang()));
            self.halt();
            return;
        };

        match self.source.current_position().await {
            Ok(sample) => {
                // La sesión pudo terminar mientras esperábamos el fix
                if !self.tracking.is_current(generation) {
                    log::info!("🗑️ Muestra descartada (sesión terminada)");
                    return;
                }

                match self
                    .api
                    .update_driver_location(&driver_id, sample.latitude, sample.longitude)
                    .await
                {
                    Ok(()) => {
                        if !self.tracking.is_current(generation) {
                            return;
                        }
                        self.tracking.set_last_reported(Some(sample.captured_at));

                        // Refrescar el registro para que la UI muestre el
                        // updated_at que aceptó el backend
                        if let Ok(Some(driver)) = self.api.fetch_driver_profile().await {
                            if self.tracking.is_current(generation) {
                                self.driver.set_driver(Some(driver));
                            }
                        }
                        (self.on_update)();
                    }
                    Err(e) => {
                        // Transitorio: sin toast, el próximo tick reintenta
                        log::warn!("📡 Error subiendo ubicación (se reintenta): {}", e);
                    }
                }
            }
            Err(error) => {
                if !self.tracking.is_current(generation) {
                    return;
                }
                // Fallo de dispositivo: fatal para la sesión
                self.toasts.error(&t(error.i18n_key(), &self.lang()));
                self.halt();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use chrono::Utc;
    use futures::executor::block_on;

    use crate::models::{Driver, LocationSample};
    use crate::services::GeoError;

    fn test_driver() -> Driver {
        Driver {
            id: "drv-1".to_string(),
            name: "Marta".to_string(),
            latitude: None,
            longitude: None,
            updated_at: None,
        }
    }

    fn test_sample() -> LocationSample {
        LocationSample::new(-34.6037, -58.3816, Utc::now())
    }

    /// Fuente de posiciones programable por el test
    struct MockSource {
        supported: bool,
        results: RefCell<VecDeque<Result<LocationSample, GeoError>>>,
    }

    impl MockSource {
        fn ok_always() -> Self {
            Self {
                supported: true,
                results: RefCell::new(VecDeque::new()),
            }
        }

        fn with_results(results: Vec<Result<LocationSample, GeoError>>) -> Self {
            Self {
                supported: true,
                results: RefCell::new(results.into()),
            }
        }

        fn unsupported() -> Self {
            Self {
                supported: false,
                results: RefCell::new(VecDeque::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl LocationSource for MockSource {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn current_position(&self) -> Result<LocationSample, GeoError> {
            self.results
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(test_sample()))
        }
    }

    /// Backend que registra las subidas y permite programar fallos
    #[derive(Default)]
    struct MockApi {
        uploads: RefCell<Vec<(String, f64, f64)>>,
        upload_failures: RefCell<VecDeque<String>>,
        profile_fetches: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl DriverApi for MockApi {
        async fn fetch_driver_profile(&self) -> Result<Option<Driver>, String> {
            self.profile_fetches.set(self.profile_fetches.get() + 1);
            let mut driver = test_driver();
            driver.updated_at = Some(Utc::now());
            Ok(Some(driver))
        }

        async fn update_driver_location(
            &self,
            driver_id: &str,
            latitude: f64,
            longitude: f64,
        ) -> Result<(), String> {
            if let Some(err) = self.upload_failures.borrow_mut().pop_front() {
                return Err(err);
            }
            self.uploads
                .borrow_mut()
                .push((driver_id.to_string(), latitude, longitude));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        errors: RefCell<Vec<String>>,
    }

    impl Notifier for MockNotifier {
        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }

        fn success(&self, _message: &str) {}
    }

    /// Ticker que solo registra arm/cancel; los tests disparan run_tick
    /// directamente (el callback real haría spawn_local en el navegador)
    #[derive(Default)]
    struct MockTicker {
        armed: Cell<bool>,
        arm_count: Cell<u32>,
        cancel_count: Cell<u32>,
    }

    impl Ticks for MockTicker {
        fn arm(&self, _period_ms: u32, _tick: Box<dyn Fn()>) {
            // Reemplaza al anterior: como máximo un timer vivo
            self.arm_count.set(self.arm_count.get() + 1);
            self.armed.set(true);
        }

        fn cancel(&self) {
            self.cancel_count.set(self.cancel_count.get() + 1);
            self.armed.set(false);
        }

        fn is_armed(&self) -> bool {
            self.armed.get()
        }
    }

    struct Harness {
        vm: TrackingViewModel,
        tracking: TrackingState,
        api: Rc<MockApi>,
        toasts: Rc<MockNotifier>,
        ticker: Rc<MockTicker>,
    }

    fn harness(source: MockSource, with_driver: bool) -> Harness {
        let driver = DriverState::new();
        if with_driver {
            driver.set_driver(Some(test_driver()));
        }
        driver.set_loading(false);

        let tracking = TrackingState::new();
        let api = Rc::new(MockApi::default());
        let toasts = Rc::new(MockNotifier::default());
        let ticker = Rc::new(MockTicker::default());

        let vm = TrackingViewModel::new(
            driver,
            tracking.clone(),
            api.clone(),
            Rc::new(source),
            toasts.clone(),
            ticker.clone(),
            Rc::new(RefCell::new("ES".to_string())),
            Rc::new(|| {}),
        );

        Harness {
            vm,
            tracking,
            api,
            toasts,
            ticker,
        }
    }

    #[test]
    fn start_sube_una_muestra_inmediata() {
        let h = harness(MockSource::ok_always(), true);

        block_on(h.vm.start());

        // Subida en t=0, antes de cualquier tick del timer
        assert_eq!(h.api.uploads.borrow().len(), 1);
        assert_eq!(h.api.uploads.borrow()[0].0, "drv-1");
        assert!(h.tracking.is_tracking());
        assert!(h.ticker.is_armed());
    }

    #[test]
    fn start_refresca_el_registro_tras_subida_aceptada() {
        let h = harness(MockSource::ok_always(), true);

        block_on(h.vm.start());

        assert_eq!(h.api.profile_fetches.get(), 1);
        assert!(h.tracking.get_last_reported().is_some());
    }

    #[test]
    fn start_es_idempotente_nunca_dos_timers() {
        let h = harness(MockSource::ok_always(), true);

        block_on(h.vm.start());
        block_on(h.vm.start());

        // El segundo start reemplaza el timer, no lo duplica
        assert_eq!(h.ticker.arm_count.get(), 2);
        assert!(h.ticker.is_armed());
        assert!(h.tracking.is_tracking());

        // Un tick posterior produce UNA sola subida adicional
        let before = h.api.uploads.borrow().len();
        block_on(h.vm.run_tick());
        assert_eq!(h.api.uploads.borrow().len(), before + 1);
    }

    #[test]
    fn sin_identificador_no_arranca() {
        let h = harness(MockSource::ok_always(), false);

        block_on(h.vm.start());

        assert!(!h.tracking.is_tracking());
        assert!(!h.ticker.is_armed());
        assert!(h.api.uploads.borrow().is_empty());
        assert_eq!(h.toasts.errors.borrow().len(), 1);
    }

    #[test]
    fn geolocalizacion_no_soportada_no_arranca() {
        let h = harness(MockSource::unsupported(), true);

        block_on(h.vm.start());

        assert!(!h.tracking.is_tracking());
        assert!(!h.ticker.is_armed());
        assert_eq!(
            h.toasts.errors.borrow()[0],
            t("geo_no_soportada", "ES")
        );
    }

    #[test]
    fn stop_corta_el_loop_sin_subidas_posteriores() {
        let h = harness(MockSource::ok_always(), true);

        block_on(h.vm.start());
        h.vm.stop();

        assert!(!h.tracking.is_tracking());
        assert!(!h.ticker.is_armed());

        // Aunque un tick rezagado llegue a ejecutarse, no sube nada
        let before = h.api.uploads.borrow().len();
        block_on(h.vm.run_tick());
        block_on(h.vm.run_tick());
        assert_eq!(h.api.uploads.borrow().len(), before);
    }

    #[test]
    fn fallo_de_dispositivo_termina_la_sesion() {
        let source = MockSource::with_results(vec![Err(GeoError::PermissionDenied)]);
        let h = harness(source, true);

        block_on(h.vm.start());

        // Idle, sin timer armado, con toast para el usuario
        assert!(!h.tracking.is_tracking());
        assert!(!h.ticker.is_armed());
        assert!(h.api.uploads.borrow().is_empty());
        assert_eq!(
            h.toasts.errors.borrow()[0],
            t("geo_permiso_denegado", "ES")
        );
    }

    #[test]
    fn timeout_de_dispositivo_tambien_es_fatal() {
        let source = MockSource::with_results(vec![Ok(test_sample()), Err(GeoError::Timeout)]);
        let h = harness(source, true);

        block_on(h.vm.start());
        assert!(h.tracking.is_tracking());

        block_on(h.vm.run_tick());
        assert!(!h.tracking.is_tracking());
        assert!(!h.ticker.is_armed());
    }

    #[test]
    fn fallo_de_subida_no_corta_el_loop() {
        let h = harness(MockSource::ok_always(), true);
        h.api
            .upload_failures
            .borrow_mut()
            .push_back("HTTP 502: bad gateway".to_string());

        // La primera subida falla: sin toast, la sesión sigue
        block_on(h.vm.start());
        assert!(h.tracking.is_tracking());
        assert!(h.ticker.is_armed());
        assert!(h.toasts.errors.borrow().is_empty());
        assert!(h.api.uploads.borrow().is_empty());

        // El tick siguiente reintenta y sube normalmente
        block_on(h.vm.run_tick());
        assert_eq!(h.api.uploads.borrow().len(), 1);
        assert!(h.tracking.is_tracking());
    }

    #[test]
    fn resultado_de_generacion_vieja_se_descarta() {
        let h = harness(MockSource::ok_always(), true);

        block_on(h.vm.start());
        let old_generation = h.tracking.current_generation();
        h.vm.stop();
        block_on(h.vm.start());

        // Un resultado en vuelo de la sesión vieja no toca el estado
        let before = h.api.uploads.borrow().len();
        block_on(h.vm.sample_and_report(old_generation));
        assert_eq!(h.api.uploads.borrow().len(), before);
        assert!(h.tracking.is_tracking());
    }
}
