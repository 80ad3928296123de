// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend.
// El backend (auth, persistencia, push) es un colaborador externo opaco.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Serialize;

use crate::models::Driver;
use crate::utils::constants::BACKEND_URL;

/// Operaciones del backend que consume el subsistema de tracking.
/// Trait para poder inyectar mocks en los tests de los viewmodels.
#[async_trait(?Send)]
pub trait DriverApi {
    /// Resolver la sesión actual a un registro de repartidor.
    /// `Ok(None)` = la sesión no corresponde a un repartidor registrado.
    async fn fetch_driver_profile(&self) -> Result<Option<Driver>, String>;

    /// Persistir una muestra de ubicación del repartidor.
    async fn update_driver_location(
        &self,
        driver_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), String>;
}

#[derive(Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct LocationUpdateRequest {
    latitude: f64,
    longitude: f64,
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
        }
    }

    /// Login de repartidor (email + password)
    pub async fn driver_login(&self, email: &str, password: &str) -> Result<Driver, String> {
        let url = format!("{}/v1/drivers/login", self.base_url);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 Iniciando sesión de repartidor: {}", email);

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }

        response
            .json::<Driver>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl DriverApi for ApiClient {
    async fn fetch_driver_profile(&self) -> Result<Option<Driver>, String> {
        let url = format!("{}/v1/drivers/me", self.base_url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        // 404 = la sesión actual no es un repartidor registrado
        if response.status() == 404 {
            log::info!("⚠️ La sesión actual no corresponde a un repartidor");
            return Ok(None);
        }

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }

        let driver = response
            .json::<Driver>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        log::info!("✅ Perfil de repartidor resuelto: {}", driver.id);
        Ok(Some(driver))
    }

    async fn update_driver_location(
        &self,
        driver_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), String> {
        let url = format!("{}/v1/drivers/{}/location", self.base_url, driver_id);
        let request = LocationUpdateRequest {
            latitude,
            longitude,
        };

        let response = Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }

        Ok(())
    }
}
