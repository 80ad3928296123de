// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "EN" => {
            // Login
            translations.insert("login_title", "Driver Hub");
            translations.insert("login_subtitle", "Driver access");
            translations.insert("email", "Email");
            translations.insert("password", "Password");
            translations.insert("entrar", "Sign in");
            translations.insert("entrando", "Signing in...");
            translations.insert("login_error", "Could not sign in");

            // Dashboard
            translations.insert("dashboard_title", "My route");
            translations.insert("verificando", "Checking driver session...");
            translations.insert("iniciar_tracking", "Start tracking");
            translations.insert("detener_tracking", "Stop tracking");
            translations.insert("tracking_activo", "Reporting location");
            translations.insert("tracking_inactivo", "Tracking off");
            translations.insert("ultimo_reporte", "Last report");
            translations.insert("sin_reportes", "No reports yet");
            translations.insert("fresco", "fresh");
            translations.insert("obsoleto", "stale");
            translations.insert("deconnexion", "Sign out");

            // Errores de tracking
            translations.insert("geo_no_soportada", "This browser does not support geolocation");
            translations.insert("geo_permiso_denegado", "Location permission denied");
            translations.insert("geo_no_disponible", "Could not get your position");
            translations.insert("geo_timeout", "Timed out waiting for your position");
            translations.insert("sin_conductor", "No driver identifier, sign in again");
        }
        _ => {
            // ES (por defecto)
            translations.insert("login_title", "Driver Hub");
            translations.insert("login_subtitle", "Acceso repartidores");
            translations.insert("email", "Email");
            translations.insert("password", "Contraseña");
            translations.insert("entrar", "Entrar");
            translations.insert("entrando", "Entrando...");
            translations.insert("login_error", "No se pudo iniciar sesión");

            translations.insert("dashboard_title", "Mi ruta");
            translations.insert("verificando", "Verificando sesión de repartidor...");
            translations.insert("iniciar_tracking", "Iniciar tracking");
            translations.insert("detener_tracking", "Detener tracking");
            translations.insert("tracking_activo", "Reportando ubicación");
            translations.insert("tracking_inactivo", "Tracking detenido");
            translations.insert("ultimo_reporte", "Último reporte");
            translations.insert("sin_reportes", "Sin reportes todavía");
            translations.insert("fresco", "reciente");
            translations.insert("obsoleto", "desactualizado");
            translations.insert("deconnexion", "Cerrar sesión");

            translations.insert("geo_no_soportada", "Este navegador no soporta geolocalización");
            translations.insert("geo_permiso_denegado", "Permiso de ubicación denegado");
            translations.insert("geo_no_disponible", "No se pudo obtener tu posición");
            translations.insert("geo_timeout", "Tiempo de espera agotado obteniendo tu posición");
            translations.insert("sin_conductor", "No hay identificador de repartidor, vuelve a entrar");
        }
    }

    translations
}

/// Traducir una key al idioma dado (fallback: la key misma)
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);
    translations.get(key).map(|s| s.to_string()).unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traduce_es_por_defecto() {
        assert_eq!(t("iniciar_tracking", "ES"), "Iniciar tracking");
        assert_eq!(t("iniciar_tracking", "XX"), "Iniciar tracking");
    }

    #[test]
    fn traduce_en() {
        assert_eq!(t("detener_tracking", "EN"), "Stop tracking");
    }

    #[test]
    fn key_desconocida_devuelve_la_key() {
        assert_eq!(t("no_existe", "ES"), "no_existe");
    }
}
