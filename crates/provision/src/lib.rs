//! Fortune resource provisioning
//!
//! - json_io: pretty JSON read/write helpers
//! - download: remote JSON fetching (trait + reqwest implementation)
//! - migrate: legacy fortune_setting.json split
//! - layout: file locations under the resource root
//! - startup: the one-shot startup routine

pub mod download;
pub mod json_io;
pub mod layout;
pub mod migrate;
pub mod startup;

pub use download::{Downloader, HttpDownloader};
pub use layout::ResourceLayout;
pub use startup::{CopywritingStatus, FileSource, ProvisionReport, Provisioner};

use fortune_core::Result;
use fortune_core::config::FortuneConfig;

/// Provisions resources for `config` over HTTP. This is the host's startup hook.
pub async fn fortune_check(config: &FortuneConfig) -> Result<ProvisionReport> {
    Provisioner::new(config, HttpDownloader::new()).run().await
}
