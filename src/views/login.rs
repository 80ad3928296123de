// ============================================================================
// LOGIN VIEW - Formulario de acceso de repartidores
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    append_child, create_element, get_element_by_id, on_input, set_attribute, set_class_name,
    set_text_content, ElementBuilder,
};
use crate::services::api_client::ApiClient;
use crate::state::app_state::AppState;
use crate::utils::constants::DRIVER_PROFILE_KEY;
use crate::utils::i18n::t;
use crate::utils::storage::save_to_storage;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");

    let language = state.get_language();

    // Estado local del formulario (en closures)
    let email = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(RefCell::new(false));

    // Container principal
    let login_screen = ElementBuilder::new("div")?.class("login-screen").build();

    let login_container = ElementBuilder::new("div")?
        .class("login-container")
        .build();

    // Header
    let login_header = ElementBuilder::new("div")?.class("login-header").build();

    let logo = ElementBuilder::new("div")?.class("login-logo").build();
    let logo_icon = ElementBuilder::new("div")?
        .class("logo-icon")
        .text("🛵")
        .build();
    append_child(&logo, &logo_icon)?;

    let title = ElementBuilder::new("h1")?
        .text(&t("login_title", &language))
        .build();
    let subtitle = ElementBuilder::new("p")?
        .text(&t("login_subtitle", &language))
        .build();

    append_child(&login_header, &logo)?;
    append_child(&login_header, &title)?;
    append_child(&login_header, &subtitle)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let email_group = create_form_group(
        "email",
        "email",
        &t("email", &language),
        email.clone(),
    )?;
    let password_group = create_form_group(
        "password",
        "password",
        &t("password", &language),
        password.clone(),
    )?;

    // Mensaje de error (vacío hasta que falle un intento)
    let error_box = ElementBuilder::new("div")?
        .id("login-error")?
        .class("login-error")
        .build();

    // Submit button
    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id("login-submit")?
        .class("btn-login")
        .text(&t("entrar", &language))
        .build();

    // Event listener para submit
    {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let state = state.clone();
        let language = language.clone();

        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            if *loading.borrow() {
                return;
            }

            let email_val = email.borrow().trim().to_string();
            let password_val = password.borrow().clone();

            if email_val.is_empty() || password_val.is_empty() {
                show_error(&t("login_error", &language));
                return;
            }

            *loading.borrow_mut() = true;
            set_submit_busy(true, &language);

            let loading = loading.clone();
            let state = state.clone();
            let language = language.clone();

            spawn_local(async move {
                log::info!("🔐 [LOGIN] Iniciando login de {}", email_val);

                let api = ApiClient::new();
                match api.driver_login(&email_val, &password_val).await {
                    Ok(driver) => {
                        log::info!("✅ [LOGIN] Login exitoso: {} ({})", driver.name, driver.id);

                        if let Err(e) = save_to_storage(DRIVER_PROFILE_KEY, &driver) {
                            log::error!("❌ [LOGIN] Error guardando perfil en storage: {}", e);
                        }

                        state.driver.set_driver(Some(driver));
                        state.driver.set_loading(false);

                        // El dashboard vive en la raíz
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(e) => {
                        log::error!("❌ [LOGIN] Error en login: {}", e);
                        show_error(&format!("{}: {}", t("login_error", &language), e));
                        *loading.borrow_mut() = false;
                        set_submit_busy(false, &language);
                    }
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Ensamblar formulario
    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &error_box)?;
    append_child(&form, &submit_btn)?;

    append_child(&login_container, &login_header)?;
    append_child(&login_container, &form)?;
    append_child(&login_screen, &login_container)?;

    Ok(login_screen)
}

/// Helper para crear form group
fn create_form_group(
    id: &str,
    input_type: &str,
    label_text: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_attribute(&input, "placeholder", label_text)?;
    set_class_name(&input, "form-input");

    on_input(&input, move |e: web_sys::InputEvent| {
        if let Some(target) = e.target().and_then(|tgt| tgt.dyn_into::<HtmlInputElement>().ok()) {
            *value.borrow_mut() = target.value();
        }
    })?;

    append_child(&group, &label)?;
    append_child(&group, &input)?;

    Ok(group)
}

fn show_error(message: &str) {
    if let Some(error_box) = get_element_by_id("login-error") {
        set_text_content(&error_box, message);
    }
}

fn set_submit_busy(busy: bool, language: &str) {
    if let Some(button) = get_element_by_id("login-submit") {
        let key = if busy { "entrando" } else { "entrar" };
        set_text_content(&button, &t(key, language));
        if busy {
            let _ = button.set_attribute("disabled", "true");
        } else {
            let _ = button.remove_attribute("disabled");
        }
    }
}
