pub mod config;
pub mod error;
pub mod path_utils;
pub mod themes;

pub use error::{FortuneError, Result};

use tracing::info;

pub fn init() {
    info!("🎋 Fortune Core Initialized ({} themes)", themes::THEME_CATALOG.len());
}
