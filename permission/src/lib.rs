//! Camera and notification permission handling with one status model.
//!
//! Every platform reports authorization in its own vocabulary. This crate
//! folds those answers into [`PermissionStatus`] and hides the callback-based
//! platform calls behind a [`PermissionGateway`] that callers construct and
//! pass around explicitly.
//!
//! ```no_run
//! use permkit_permission::{Permission, PermissionGateway, PermissionStatus};
//!
//! async fn ensure_camera(gateway: &PermissionGateway) -> bool {
//!     match gateway.status(Permission::Camera).await {
//!         PermissionStatus::Granted => true,
//!         PermissionStatus::Denied => false,
//!         PermissionStatus::Unknown => {
//!             gateway.request_status(Permission::Camera).await.is_granted()
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod dispatch;
mod gateway;
mod status;
/// Platform-specific implementations.
pub mod sys;

use thiserror::Error;

pub use backend::{AccessReply, NotificationOptions, PermissionBackend, SettingsReply};
pub use dispatch::{InlineDispatcher, Job, MainDispatcher, MainLoop, MainQueue};
pub use gateway::{PermissionGateway, PermissionGatewayBuilder};
pub use status::{CameraAuthorization, NotificationAuthorization, NotificationSettings};

/// Capabilities whose authorization can be checked or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Video capture through the device camera.
    Camera,
    /// Delivery of user-facing notifications.
    Notifications,
}

impl Permission {
    /// Every permission this crate knows about.
    pub const ALL: [Self; 2] = [Self::Camera, Self::Notifications];
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Notifications => f.write_str("notifications"),
        }
    }
}

/// The normalized authorization state of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    /// The user has not been asked yet.
    Unknown,
    /// Access was refused or is restricted by policy.
    Denied,
    /// Access was granted.
    Granted,
}

impl PermissionStatus {
    /// Map the boolean outcome of a permission prompt.
    ///
    /// A request always ends decided, so this never yields [`Self::Unknown`].
    #[must_use]
    pub const fn from_access(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }

    /// Returns `true` for [`Self::Granted`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns `true` once the user has made a decision.
    #[must_use]
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Errors that can occur when working with permissions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The platform reported an authorization code with no mapping.
    #[error("unmapped {permission} authorization code {raw}")]
    UnmappedStatus {
        /// Permission the code was reported for.
        permission: Permission,
        /// The raw platform code.
        raw: i64,
    },
    /// A blocking read was attempted from the main context, which would deadlock.
    #[error("blocking permission read attempted on the main context")]
    BlockingOnMainContext,
    /// The permission type is not supported on this platform.
    #[error("permission not supported on this platform")]
    NotSupported,
}

/// Check the current status of a permission using the platform default backend.
///
/// Prefer holding a [`PermissionGateway`] when checks happen repeatedly.
pub async fn check(permission: Permission) -> PermissionStatus {
    PermissionGateway::builder()
        .build()
        .status(permission)
        .await
}

/// Request a permission from the user using the platform default backend.
///
/// If the permission has already been decided the platform answers without
/// showing a prompt.
pub async fn request(permission: Permission) -> PermissionStatus {
    PermissionGateway::builder()
        .build()
        .request_status(permission)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_outcome_is_always_decided() {
        assert_eq!(PermissionStatus::from_access(true), PermissionStatus::Granted);
        assert_eq!(PermissionStatus::from_access(false), PermissionStatus::Denied);
        assert!(PermissionStatus::from_access(false).is_determined());
    }

    #[test]
    fn predicates() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::Unknown.is_determined());
    }

    #[test]
    fn error_messages_name_the_permission() {
        let err = PermissionError::UnmappedStatus {
            permission: Permission::Notifications,
            raw: 3,
        };
        assert_eq!(err.to_string(), "unmapped notifications authorization code 3");
    }
}
