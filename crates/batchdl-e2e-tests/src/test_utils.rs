use batchdl_lib::config::Config;
use eyre::Result;
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HTTP_BODY: &str = "Hello";

/// Serves `body` with status 200 at `route` (e.g. `/files/a.bin`).
pub async fn serve_body(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("error page"))
        .mount(server)
        .await;
}

/// Serves the same body for every GET, optionally after a delay.
pub async fn serve_everything(server: &MockServer, body: &str, delay: std::time::Duration) {
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub fn write_config(dir: &Path, config: &Config) -> Result<PathBuf> {
    let config_path = dir.join("batchdl.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(config)?)?;
    Ok(config_path)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("batchdl_lib=debug,batchdl_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
