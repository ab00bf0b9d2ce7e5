//! Runtime configuration.
//!
//! Configuration is resolved once at process start into immutable values
//! that are handed to adapters and services at construction. Values are
//! layered: built-in defaults, then the JSON artifact written by the setup
//! command, then environment variables.

use crate::fs::open_parent;
use crate::transfer::domain::{FetchWindow, TaskTarget, TransferDomainError};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Environment variable holding the upstream integrator key.
pub const METRC_INTEGRATOR_KEY: &str = "METRC_INTEGRATOR_KEY";
/// Environment variable holding the upstream user key.
pub const METRC_USER_KEY: &str = "METRC_USER_KEY";
/// Environment variable holding the facility license number.
pub const METRC_LICENSE: &str = "METRC_LICENSE";
/// Environment variable overriding the upstream base URL.
pub const METRC_BASE_URL: &str = "METRC_BASE_URL";
/// Environment variable holding the task-service personal access token.
pub const ASANA_PAT: &str = "ASANA_PAT";
/// Environment variable holding the task workspace identifier.
pub const ASANA_WORKSPACE_ID: &str = "ASANA_WORKSPACE_ID";
/// Environment variable holding the task project identifier.
pub const ASANA_PROJECT_ID: &str = "ASANA_PROJECT_ID";
/// Environment variable overriding the task-service base URL.
pub const ASANA_BASE_URL: &str = "ASANA_BASE_URL";
/// Environment variable overriding the production lookback in hours.
pub const WAYBILL_WINDOW_HOURS: &str = "WAYBILL_WINDOW_HOURS";

/// Default upstream base URL (California).
pub const DEFAULT_METRC_BASE_URL: &str = "https://api-ca.metrc.com";
/// Default task-service base URL.
pub const DEFAULT_ASANA_BASE_URL: &str = "https://app.asana.com/api/1.0";
/// Default dedup state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "processed_transfers.json";
/// Default configuration artifact, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "waybill.json";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was not supplied.
    #[error("missing required configuration value {0}")]
    Missing(&'static str),

    /// A supplied value could not be interpreted.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration artifact could not be read or written.
    #[error("configuration file I/O failed: {0}")]
    Io(#[source] io::Error),

    /// The configuration artifact is not valid JSON.
    #[error("configuration file could not be parsed: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Credential value that never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential for use in an outgoing request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Settings for the compliance API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Integrator (vendor) key, sent as the Basic-auth user name.
    pub integrator_key: Secret,
    /// User key, sent as the Basic-auth password.
    pub user_key: Secret,
    /// Facility license the transfers are listed for.
    pub license_number: String,
}

impl UpstreamSettings {
    /// Resolves upstream settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a key or the license number is
    /// absent.
    pub fn resolve(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: optional(lookup, METRC_BASE_URL)
                .map_or_else(|| DEFAULT_METRC_BASE_URL.to_owned(), |url| trim_base_url(&url)),
            integrator_key: Secret::new(required(lookup, METRC_INTEGRATOR_KEY)?),
            user_key: Secret::new(required(lookup, METRC_USER_KEY)?),
            license_number: required(lookup, METRC_LICENSE)?,
        })
    }
}

/// Settings for the project-management service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskServiceSettings {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Personal access token, sent as a bearer token.
    pub token: Secret,
    /// Workspace tasks are filed under, once provisioned.
    pub workspace_id: Option<String>,
    /// Project tasks are filed under, once provisioned.
    pub project_id: Option<String>,
}

impl TaskServiceSettings {
    /// Resolves task-service settings through `lookup`, falling back to the
    /// provisioned `artifact` for the workspace and project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the access token is absent.
    pub fn resolve(
        lookup: &impl Fn(&str) -> Option<String>,
        artifact: Option<&ConfigArtifact>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: optional(lookup, ASANA_BASE_URL)
                .map_or_else(|| DEFAULT_ASANA_BASE_URL.to_owned(), |url| trim_base_url(&url)),
            token: Secret::new(required(lookup, ASANA_PAT)?),
            workspace_id: optional(lookup, ASANA_WORKSPACE_ID)
                .or_else(|| artifact.map(|provisioned| provisioned.workspace_id.clone())),
            project_id: optional(lookup, ASANA_PROJECT_ID)
                .or_else(|| artifact.map(|provisioned| provisioned.project_id.clone())),
        })
    }

    /// Returns the provisioned task target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the workspace or project has not
    /// been provisioned, and [`ConfigError::Invalid`] when either is blank.
    pub fn task_target(&self) -> Result<TaskTarget, ConfigError> {
        let workspace = self
            .workspace_id
            .as_deref()
            .ok_or(ConfigError::Missing(ASANA_WORKSPACE_ID))?;
        let project = self
            .project_id
            .as_deref()
            .ok_or(ConfigError::Missing(ASANA_PROJECT_ID))?;
        TaskTarget::new(workspace, project).map_err(|error| ConfigError::Invalid {
            key: ASANA_PROJECT_ID,
            reason: error.to_string(),
        })
    }
}

/// Complete configuration for a production run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaybillConfig {
    /// Compliance API settings.
    pub upstream: UpstreamSettings,
    /// Task-service settings.
    pub task_service: TaskServiceSettings,
    /// Lookback used by production runs.
    pub window: FetchWindow,
}

impl WaybillConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub fn from_env(artifact: Option<&ConfigArtifact>) -> Result<Self, ConfigError> {
        Self::resolve(&|key: &str| std::env::var(key).ok(), artifact)
    }

    /// Resolves the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or a value
    /// cannot be interpreted.
    pub fn resolve(
        lookup: &impl Fn(&str) -> Option<String>,
        artifact: Option<&ConfigArtifact>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            upstream: UpstreamSettings::resolve(lookup)?,
            task_service: TaskServiceSettings::resolve(lookup, artifact)?,
            window: resolve_window(lookup)?,
        })
    }
}

fn resolve_window(lookup: &impl Fn(&str) -> Option<String>) -> Result<FetchWindow, ConfigError> {
    let Some(raw) = optional(lookup, WAYBILL_WINDOW_HOURS) else {
        return Ok(FetchWindow::PRODUCTION);
    };
    let hours = raw.parse::<u32>().map_err(|error| ConfigError::Invalid {
        key: WAYBILL_WINDOW_HOURS,
        reason: error.to_string(),
    })?;
    FetchWindow::new(hours).map_err(|error: TransferDomainError| ConfigError::Invalid {
        key: WAYBILL_WINDOW_HOURS,
        reason: error.to_string(),
    })
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

/// Task target chosen during setup, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigArtifact {
    /// Chosen workspace identifier.
    pub workspace_id: String,
    /// Chosen project identifier.
    pub project_id: String,
}

impl ConfigArtifact {
    /// Loads the artifact at `path`, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid artifact.
    pub fn load(path: &Utf8Path) -> Result<Option<Self>, ConfigError> {
        let (dir, file_name) = open_parent(path).map_err(ConfigError::Io)?;
        let contents = match dir.read_to_string(&file_name) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ConfigError::Io(error)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(ConfigError::Parse)
    }

    /// Writes the artifact to `path`, replacing any previous artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), ConfigError> {
        let (dir, file_name) = open_parent(path).map_err(ConfigError::Io)?;
        let mut contents = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;
        contents.push('\n');
        dir.write(&file_name, contents).map_err(ConfigError::Io)
    }
}
