// ============================================================================
// GEOLOCATION SERVICE - Acceso al API de geolocalización del dispositivo
// ============================================================================
// Envuelve navigator.geolocation.getCurrentPosition (callbacks) en un
// future, con la taxonomía de errores a nivel dispositivo que el loop de
// tracking necesita distinguir de los errores de red.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::Utc;
use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError, PositionOptions};

use crate::models::LocationSample;
use crate::utils::constants::{GEO_MAX_FIX_AGE_MS, GEO_TIMEOUT_MS};

/// Error a nivel dispositivo. Cualquiera de estos es fatal para la sesión
/// de tracking (a diferencia de un error de subida, que se reintenta).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    /// El navegador no expone geolocalización
    Unsupported,
    /// El usuario denegó el permiso de ubicación
    PermissionDenied,
    /// El dispositivo no pudo determinar la posición
    Unavailable,
    /// Se agotó la espera del fix (GEO_TIMEOUT_MS)
    Timeout,
}

impl GeoError {
    /// Códigos del PositionError del navegador (1/2/3)
    fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            3 => GeoError::Timeout,
            _ => GeoError::Unavailable,
        }
    }

    /// Key i18n del mensaje para el usuario
    pub fn i18n_key(&self) -> &'static str {
        match self {
            GeoError::Unsupported => "geo_no_soportada",
            GeoError::PermissionDenied => "geo_permiso_denegado",
            GeoError::Unavailable => "geo_no_disponible",
            GeoError::Timeout => "geo_timeout",
        }
    }
}

/// Fuente de muestras de ubicación, inyectable en los viewmodels
#[async_trait(?Send)]
pub trait LocationSource {
    /// ¿El entorno soporta geolocalización?
    fn is_supported(&self) -> bool;

    /// Pedir una posición de alta precisión, sin fix cacheado,
    /// con espera acotada.
    async fn current_position(&self) -> Result<LocationSample, GeoError>;
}

/// Implementación real sobre web_sys
#[derive(Clone, Default)]
pub struct DeviceGeolocation;

impl DeviceGeolocation {
    pub fn new() -> Self {
        Self
    }

    fn geolocation() -> Option<web_sys::Geolocation> {
        web_sys::window()?.navigator().geolocation().ok()
    }
}

#[async_trait(?Send)]
impl LocationSource for DeviceGeolocation {
    fn is_supported(&self) -> bool {
        Self::geolocation().is_some()
    }

    async fn current_position(&self) -> Result<LocationSample, GeoError> {
        let geolocation = Self::geolocation().ok_or(GeoError::Unsupported)?;

        let (tx, rx) = oneshot::channel::<Result<LocationSample, GeoError>>();
        // El sender se comparte entre los dos callbacks; solo uno dispara
        let tx = Rc::new(RefCell::new(Some(tx)));

        let tx_ok = tx.clone();
        let on_success = Closure::wrap(Box::new(move |position: Position| {
            let coords = position.coords();
            let sample =
                LocationSample::new(coords.latitude(), coords.longitude(), Utc::now());
            if let Some(tx) = tx_ok.borrow_mut().take() {
                let _ = tx.send(Ok(sample));
            }
        }) as Box<dyn FnMut(Position)>);

        let tx_err = tx.clone();
        let on_error = Closure::wrap(Box::new(move |error: PositionError| {
            log::warn!("📵 Geolocation error {}: {}", error.code(), error.message());
            if let Some(tx) = tx_err.borrow_mut().take() {
                let _ = tx.send(Err(GeoError::from_code(error.code())));
            }
        }) as Box<dyn FnMut(PositionError)>);

        let options = PositionOptions::new();
        options.set_enable_high_accuracy(true);
        options.set_timeout(GEO_TIMEOUT_MS);
        options.set_maximum_age(GEO_MAX_FIX_AGE_MS);

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &options,
            )
            .map_err(|_| GeoError::Unsupported)?;

        // Los closures viven hasta que el future resuelve; el navegador
        // garantiza que dispara exactamente uno de los dos callbacks
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(GeoError::Unavailable),
        }
    }
}
