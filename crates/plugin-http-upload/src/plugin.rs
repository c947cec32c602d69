//! HTTP upload plugin — POSTs the built executable to a configured endpoint.

use std::fs::File;
use std::time::Duration;

use bundlesmith_core::buildlog::BuildLog;
use bundlesmith_core::context::ExecutionContext;
use bundlesmith_plugin::outcome::{HookError, HookResult};
use bundlesmith_plugin::plugin_info;
use bundlesmith_plugin::traits::{Plugin, PluginInfo};

use crate::resolve;

/// Registered name and manifest stem of this plugin.
pub const PLUGIN_NAME: &str = "http_upload";

/// Uploads the built executable to the endpoint configured under
/// `[plugins.http_upload]`.
///
/// The artifact is resolved before anything touches the network, so a
/// build without an executable fails locally without issuing a request.
#[derive(Debug, Default)]
pub struct HttpUploadPlugin;

impl HttpUploadPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for HttpUploadPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            name: PLUGIN_NAME,
            description: "Uploads the built executable to an HTTP endpoint",
            version: "1.0.0",
            author: "Bundlesmith Team"
        )
    }

    fn execute(&self, context: &ExecutionContext, log: &BuildLog) -> HookResult {
        let Some(output) = context.output_path.as_deref() else {
            return Err(HookError::new("no build output to upload"));
        };
        let Some(artifact) = resolve::find_artifact(output) else {
            return Err(HookError::new(format!(
                "no executable found under {}",
                output.display()
            )));
        };

        let settings = &context.app_config.plugins.http_upload;
        if settings.endpoint.trim().is_empty() {
            return Err(HookError::new("upload endpoint is not configured"));
        }

        let filename = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("artifact")
            .to_string();
        let size = std::fs::metadata(&artifact)?.len();

        log.info(format!(
            "Uploading {filename} ({size} bytes) to {}",
            settings.endpoint
        ));

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build();
        let file = File::open(&artifact)?;
        agent
            .post(&settings.endpoint)
            .set("Content-Type", "application/octet-stream")
            .set("X-Filename", &filename)
            .send(file)
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => {
                    HookError::new(format!("endpoint rejected the upload with HTTP {code}"))
                }
                ureq::Error::Transport(transport) => {
                    HookError::with_source("upload failed", transport)
                }
            })?;

        log.success(format!("Uploaded {filename}"));
        Ok(())
    }
}
