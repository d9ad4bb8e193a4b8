//! The seam between the gateway and the host platform.
//!
//! A [`PermissionBackend`] exposes the raw platform calls. Asynchronous calls
//! receive a reply handle that the platform resolves from whatever thread its
//! callback runs on. Resolving consumes the handle, so a reply can never be
//! delivered twice.

use std::fmt;

use futures::channel::oneshot;
use log::warn;

use crate::{CameraAuthorization, NotificationSettings};

/// Presentation options requested together with notification authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct NotificationOptions {
    /// Show alerts.
    pub alert: bool,
    /// Play sounds.
    pub sound: bool,
    /// Update the app badge.
    pub badge: bool,
}

impl NotificationOptions {
    /// No presentation options.
    pub const NONE: Self = Self {
        alert: false,
        sound: false,
        badge: false,
    };
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            alert: true,
            sound: true,
            badge: true,
        }
    }
}

/// Raw platform permission calls.
pub trait PermissionBackend: Send + Sync + fmt::Debug {
    /// Current camera authorization. Must not prompt.
    fn camera_authorization(&self) -> CameraAuthorization;

    /// Query notification settings and resolve `reply` with the result.
    fn notification_settings(&self, reply: SettingsReply);

    /// Start the camera prompt flow and resolve `reply` with the outcome.
    fn request_camera_access(&self, reply: AccessReply);

    /// Start the notification prompt flow and resolve `reply` with the outcome.
    fn request_notification_authorization(
        &self,
        options: NotificationOptions,
        reply: AccessReply,
    );
}

/// One-shot reply for a notification settings query.
pub struct SettingsReply {
    sender: Option<oneshot::Sender<NotificationSettings>>,
}

impl SettingsReply {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<NotificationSettings>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Deliver the settings snapshot.
    pub fn resolve(mut self, settings: NotificationSettings) {
        if let Some(sender) = self.sender.take() {
            // The waiting side may have been dropped; nothing to deliver to then.
            let _ = sender.send(settings);
        }
    }

    /// Deliver a raw authorization code.
    pub fn resolve_raw(self, authorization_status: i64) {
        self.resolve(NotificationSettings::from_raw(authorization_status));
    }
}

impl fmt::Debug for SettingsReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsReply")
            .field("pending", &self.sender.is_some())
            .finish()
    }
}

impl Drop for SettingsReply {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!("notification settings reply dropped without a result");
        }
    }
}

type AccessCallback = Box<dyn FnOnce(bool) + Send>;

/// One-shot reply for a permission prompt.
pub struct AccessReply {
    callback: Option<AccessCallback>,
}

impl AccessReply {
    /// Wrap a callback that receives the prompt outcome.
    pub fn new(callback: impl FnOnce(bool) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Deliver the outcome of the prompt.
    ///
    /// An error detail from the platform is logged and discarded; the
    /// boolean alone decides the outcome.
    pub fn resolve(mut self, granted: bool, error: Option<String>) {
        if let Some(error) = error {
            warn!("permission request reported an error (granted: {granted}): {error}");
        }
        if let Some(callback) = self.callback.take() {
            callback(granted);
        }
    }

    /// Deliver a successful grant.
    pub fn grant(self) {
        self.resolve(true, None);
    }

    /// Deliver a refusal.
    pub fn deny(self) {
        self.resolve(false, None);
    }
}

impl fmt::Debug for AccessReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessReply")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

impl Drop for AccessReply {
    fn drop(&mut self) {
        if self.callback.is_some() {
            warn!("permission request reply dropped without a result");
        }
    }
}
