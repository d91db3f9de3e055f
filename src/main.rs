use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

const APP_TITLE: &str = "School Admin";
const SESSION_DB_FILE: &str = "session.sqlite";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    #[cfg(feature = "desktop")]
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(APP_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "schooladmin", "school-admin")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join(SESSION_DB_FILE))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
