//! Fallback for platforms without a permission backend.

use crate::{
    AccessReply, CameraAuthorization, NotificationAuthorization, NotificationOptions,
    NotificationSettings, PermissionBackend, PermissionError, SettingsReply,
};

/// Backend that never grants anything.
///
/// Statuses stay undetermined and requests resolve as refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    /// Create the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PermissionBackend for UnsupportedBackend {
    fn camera_authorization(&self) -> CameraAuthorization {
        CameraAuthorization::NotDetermined
    }

    fn notification_settings(&self, reply: SettingsReply) {
        reply.resolve(NotificationSettings::new(
            NotificationAuthorization::NotDetermined,
        ));
    }

    fn request_camera_access(&self, reply: AccessReply) {
        reply.resolve(false, Some(PermissionError::NotSupported.to_string()));
    }

    fn request_notification_authorization(
        &self,
        _options: NotificationOptions,
        reply: AccessReply,
    ) {
        reply.resolve(false, Some(PermissionError::NotSupported.to_string()));
    }
}
