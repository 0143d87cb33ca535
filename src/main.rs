#[cfg(target_arch = "wasm32")]
fn main() {
    use sheetforge_web::app_lib::config::AppConfig;

    console_error_panic_hook::set_once();
    let level = if AppConfig::load().is_production() {
        log::Level::Info
    } else {
        log::Level::Debug
    };
    let _ = console_log::init_with_level(level);

    leptos::prelude::mount_to_body(sheetforge_web::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
