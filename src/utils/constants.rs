/// URL base del backend
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:3000 (por defecto)
/// - Producción: via BACKEND_URL env var (ver build.rs / .env)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

/// Periodo fijo del loop de reporte de ubicación (un tick cada 15s)
pub const REPORT_INTERVAL_MS: u32 = 15_000;

/// Espera máxima por un fix de geolocalización del dispositivo
pub const GEO_TIMEOUT_MS: u32 = 5_000;

/// maximumAge = 0: nunca aceptar una posición cacheada
pub const GEO_MAX_FIX_AGE_MS: u32 = 0;

/// Ventana de frescura del último reporte mostrado en el dashboard.
/// Dentro de la ventana se marca "fresh", fuera "stale".
pub const FRESH_WINDOW_SECS: i64 = 30;

/// Ruta de la superficie de login de repartidores
pub const LOGIN_PATH: &str = "/driver/login";

/// Key de localStorage con el perfil del repartidor logueado
pub const DRIVER_PROFILE_KEY: &str = "driverHub_profile";

/// Key de localStorage con el idioma preferido
pub const LANGUAGE_KEY: &str = "driverHub_language";
