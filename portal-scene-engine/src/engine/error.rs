use thiserror::Error;

/// Failures surfaced while bringing the portal scene up.
///
/// Neither variant stops the frame loop: a failed asset leaves its part of the
/// scene empty and a missing node only skips that one material assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("failed to load {asset}: {reason}")]
    LoadFailure { asset: String, reason: String },

    #[error("scene node '{node}' not found, material binding skipped")]
    BindingFailure { node: String },
}

impl PortalError {
    pub fn load_failure(asset: &str, reason: impl ToString) -> Self {
        Self::LoadFailure {
            asset: asset.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn binding_failure(node: &str) -> Self {
        Self::BindingFailure {
            node: node.to_string(),
        }
    }

    /// Short method name used when the error is forwarded to the host page.
    pub fn notification_method(&self) -> &'static str {
        match self {
            Self::LoadFailure { .. } => "load_failed",
            Self::BindingFailure { .. } => "binding_failed",
        }
    }
}
