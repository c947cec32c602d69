//! General application settings.

use serde::{Deserialize, Serialize};

/// How many entries the recent projects list keeps.
pub const MAX_RECENT_PROJECTS: usize = 10;

/// General application behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// UI theme name.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Python interpreter used for packaging. Empty means whatever
    /// `python` resolves to on the PATH.
    #[serde(default)]
    pub interpreter: String,
    /// Open the output directory once a build succeeds.
    #[serde(default = "default_true")]
    pub auto_open_output: bool,
    /// Write the console log to a file next to the artifact.
    #[serde(default = "default_true")]
    pub save_logs: bool,
    /// Directory the last entry script was picked from.
    #[serde(default)]
    pub last_script_dir: String,
    /// Directory the last build wrote to.
    #[serde(default)]
    pub last_output_dir: String,
    /// Recently packaged entry scripts, most recent first.
    #[serde(default)]
    pub recent_projects: Vec<String>,
}

impl GeneralConfig {
    /// Record a project at the front of the recents list.
    ///
    /// A path already present moves to the front instead of duplicating.
    /// The list never grows past [`MAX_RECENT_PROJECTS`].
    pub fn add_recent_project(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.recent_projects.retain(|p| p != &path);
        self.recent_projects.insert(0, path);
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            interpreter: String::new(),
            auto_open_output: true,
            save_logs: true,
            last_script_dir: String::new(),
            last_output_dir: String::new(),
            recent_projects: Vec::new(),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_true() -> bool {
    true
}
