//! Linux and Windows permission backend.
//!
//! Desktop systems have no runtime prompt for camera or notifications:
//! - Camera access is governed by device file permissions or OS privacy
//!   settings that applications cannot query or request.
//! - Notifications are delivered through the desktop notification service
//!   without per-app authorization.
//!
//! Both capabilities therefore report as authorized.

use crate::{
    AccessReply, CameraAuthorization, NotificationAuthorization, NotificationOptions,
    NotificationSettings, PermissionBackend, SettingsReply,
};

/// Backend for desktop platforms without permission prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopBackend;

impl DesktopBackend {
    /// Create the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PermissionBackend for DesktopBackend {
    fn camera_authorization(&self) -> CameraAuthorization {
        CameraAuthorization::Authorized
    }

    fn notification_settings(&self, reply: SettingsReply) {
        reply.resolve(NotificationSettings::new(NotificationAuthorization::Authorized));
    }

    fn request_camera_access(&self, reply: AccessReply) {
        reply.grant();
    }

    fn request_notification_authorization(
        &self,
        _options: NotificationOptions,
        reply: AccessReply,
    ) {
        reply.grant();
    }
}
