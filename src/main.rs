use finsight::api::{BackendHandle, HttpBackend};
use finsight::config::{BUNDLED_CONFIG, BackendConfig, parse_env_lines};

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // A local .env wins on desktop
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        if std::env::var(&key).is_err() {
            // SAFETY: called at startup before any threads are spawned
            unsafe {
                std::env::set_var(&key, &value);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_env("FINSIGHT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() -> anyhow::Result<()> {
    Ok(())
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing()?;

    let config = BackendConfig::from_env();
    tracing::info!(backend = %config.base_url, "starting FinSight");
    finsight::ui::install_backend(BackendHandle::new(HttpBackend::new(config)));

    dioxus::launch(finsight::ui::App);
    Ok(())
}
