//! Apple platform (iOS/macOS) permission backend using swift-bridge.
//!
//! The Swift side wraps `AVCaptureDevice` for video capture and
//! `UNUserNotificationCenter` for notifications. Reply handles cross the
//! bridge as opaque Rust types and are resolved from Swift completion
//! handlers.

use crate::backend::{AccessReply, SettingsReply};
use crate::{CameraAuthorization, NotificationOptions, PermissionBackend};

#[swift_bridge::bridge]
mod ffi {
    // Mirrors AVAuthorizationStatus
    enum CameraAuthorizationStatus {
        NotDetermined,
        Restricted,
        Denied,
        Authorized,
    }

    extern "Rust" {
        type SettingsReply;
        fn resolve_raw(self, authorization_status: i64);

        type AccessReply;
        fn resolve(self, granted: bool, error: Option<String>);
    }

    extern "Swift" {
        fn camera_authorization_status() -> CameraAuthorizationStatus;
        fn request_camera_access(reply: AccessReply);
        fn notification_settings(reply: SettingsReply);
        fn request_notification_authorization(
            alert: bool,
            sound: bool,
            badge: bool,
            reply: AccessReply,
        );
    }
}

const fn camera_from_ffi(status: ffi::CameraAuthorizationStatus) -> CameraAuthorization {
    match status {
        ffi::CameraAuthorizationStatus::NotDetermined => CameraAuthorization::NotDetermined,
        ffi::CameraAuthorizationStatus::Restricted => CameraAuthorization::Restricted,
        ffi::CameraAuthorizationStatus::Denied => CameraAuthorization::Denied,
        ffi::CameraAuthorizationStatus::Authorized => CameraAuthorization::Authorized,
    }
}

/// Backend backed by `AVFoundation` and `UserNotifications`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleBackend;

impl AppleBackend {
    /// Create the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PermissionBackend for AppleBackend {
    fn camera_authorization(&self) -> CameraAuthorization {
        camera_from_ffi(ffi::camera_authorization_status())
    }

    fn notification_settings(&self, reply: SettingsReply) {
        ffi::notification_settings(reply);
    }

    fn request_camera_access(&self, reply: AccessReply) {
        ffi::request_camera_access(reply);
    }

    fn request_notification_authorization(
        &self,
        options: NotificationOptions,
        reply: AccessReply,
    ) {
        ffi::request_notification_authorization(
            options.alert,
            options.sound,
            options.badge,
            reply,
        );
    }
}
