use parc_admin::config::CONFIG;
use parc_admin::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Parc Machines Admin ({}) → {}", CONFIG.environment, CONFIG.api_base_url());

    yew::Renderer::<App>::new().render();
}
