use serde::Serialize;

pub const BUILD_PROJECT_NAME: &str = "codebuild-tf-plan-github-project";
pub const SUCCESS_MESSAGE: &str = "Hello from Lambda";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildRequest {
    #[serde(rename = "projectName")]
    pub project_name: String,
}

impl BuildRequest {
    pub fn for_project(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }

    /// Request for the one build project this function is wired to.
    pub fn default_project() -> Self {
        Self::for_project(BUILD_PROJECT_NAME)
    }
}

/// Acknowledgement returned by the build service once a build is accepted.
/// Callers are free to drop it.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BuildStartAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStartError {
    message: String,
}

impl BuildStartError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for BuildStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BuildStartError {}
