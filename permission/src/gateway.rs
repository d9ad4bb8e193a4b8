//! The permission gateway: live status reads and prompt requests over an
//! injected backend, with completions routed through a main dispatcher.

use std::sync::Arc;

use futures::channel::oneshot;
use log::{debug, warn};

use crate::backend::{AccessReply, NotificationOptions, PermissionBackend, SettingsReply};
use crate::dispatch::{InlineDispatcher, MainDispatcher, is_main_context};
use crate::{Permission, PermissionError, PermissionStatus, sys};

/// Queries and requests permissions through an injected platform backend.
///
/// Status is read live from the backend on every call and never cached.
/// Completion handlers passed to [`request`](Self::request) always run
/// through the gateway's [`MainDispatcher`].
#[derive(Debug, Clone)]
pub struct PermissionGateway {
    backend: Arc<dyn PermissionBackend>,
    dispatcher: Arc<dyn MainDispatcher>,
    notification_options: NotificationOptions,
}

impl PermissionGateway {
    /// Create a gateway over `backend`, delivering completions via `dispatcher`.
    #[must_use]
    pub fn new(backend: Arc<dyn PermissionBackend>, dispatcher: Arc<dyn MainDispatcher>) -> Self {
        Self {
            backend,
            dispatcher,
            notification_options: NotificationOptions::default(),
        }
    }

    /// Start configuring a gateway.
    #[must_use]
    pub fn builder() -> PermissionGatewayBuilder {
        PermissionGatewayBuilder::default()
    }

    /// Options sent along with notification authorization requests.
    #[must_use]
    pub const fn notification_options(&self) -> NotificationOptions {
        self.notification_options
    }

    /// Read the current status of `permission`.
    ///
    /// # Panics
    /// Panics if the platform reports a notification authorization code with
    /// no mapping.
    pub async fn status(&self, permission: Permission) -> PermissionStatus {
        let status = match permission {
            Permission::Camera => self.backend.camera_authorization().into(),
            Permission::Notifications => self.notification_status().await,
        };
        debug!("{permission} status: {status:?}");
        status
    }

    async fn notification_status(&self) -> PermissionStatus {
        let (reply, settings) = SettingsReply::channel();
        self.backend.notification_settings(reply);

        match settings.await {
            Ok(settings) => settings.status(),
            Err(_) => {
                warn!("notification settings query was abandoned by the platform");
                PermissionStatus::Unknown
            }
        }
    }

    /// Read the current status of `permission`, blocking until it is known.
    ///
    /// Waits without a timeout. Never call this from a thread the platform
    /// needs in order to answer; calls made while the current thread is
    /// marked as the main context (see
    /// [`is_main_context`](crate::dispatch::is_main_context)) are refused.
    ///
    /// # Errors
    /// Returns [`PermissionError::BlockingOnMainContext`] when called on the
    /// main context.
    ///
    /// # Panics
    /// Panics if the platform reports a notification authorization code with
    /// no mapping.
    pub fn status_blocking(
        &self,
        permission: Permission,
    ) -> Result<PermissionStatus, PermissionError> {
        if is_main_context() {
            return Err(PermissionError::BlockingOnMainContext);
        }
        Ok(pollster::block_on(self.status(permission)))
    }

    /// Ask the platform for `permission`, possibly showing a system prompt.
    ///
    /// `on_complete` runs exactly once, on the main context, with either
    /// [`PermissionStatus::Granted`] or [`PermissionStatus::Denied`]. If the
    /// platform never answers, it never runs.
    pub fn request(
        &self,
        permission: Permission,
        on_complete: impl FnOnce(PermissionStatus) + Send + 'static,
    ) {
        debug!("requesting {permission} permission");

        let dispatcher = Arc::clone(&self.dispatcher);
        let reply = AccessReply::new(move |granted| {
            let status = PermissionStatus::from_access(granted);
            debug!("{permission} request resolved: {status:?}");
            dispatcher.dispatch(Box::new(move || on_complete(status)));
        });

        match permission {
            Permission::Camera => self.backend.request_camera_access(reply),
            Permission::Notifications => self
                .backend
                .request_notification_authorization(self.notification_options, reply),
        }
    }

    /// Awaitable form of [`request`](Self::request).
    ///
    /// The result still travels through the main context, so the returned
    /// future only completes once that context has run the completion. A
    /// request the platform abandons resolves to [`PermissionStatus::Denied`].
    pub async fn request_status(&self, permission: Permission) -> PermissionStatus {
        let (sender, receiver) = oneshot::channel();
        self.request(permission, move |status| {
            let _ = sender.send(status);
        });

        receiver.await.unwrap_or_else(|_| {
            warn!("{permission} request was abandoned before completing");
            PermissionStatus::Denied
        })
    }
}

/// Builder for [`PermissionGateway`].
#[derive(Debug, Default)]
pub struct PermissionGatewayBuilder {
    backend: Option<Arc<dyn PermissionBackend>>,
    dispatcher: Option<Arc<dyn MainDispatcher>>,
    notification_options: NotificationOptions,
}

impl PermissionGatewayBuilder {
    /// Use `backend` instead of the platform default.
    #[must_use]
    pub fn backend(mut self, backend: impl PermissionBackend + 'static) -> Self {
        self.backend = Some(Arc::new(backend));
        self
    }

    /// Use an already shared backend.
    #[must_use]
    pub fn shared_backend(mut self, backend: Arc<dyn PermissionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Deliver completions through `dispatcher` instead of the shared
    /// [`InlineDispatcher`].
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: impl MainDispatcher + 'static) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    /// Options sent with notification authorization requests.
    #[must_use]
    pub const fn notification_options(mut self, options: NotificationOptions) -> Self {
        self.notification_options = options;
        self
    }

    /// Finish the gateway.
    ///
    /// Without an explicit backend the platform default from
    /// [`sys::default_backend`] is used; without a dispatcher completions run
    /// on the serialized [`InlineDispatcher`].
    #[must_use]
    pub fn build(self) -> PermissionGateway {
        PermissionGateway {
            backend: self.backend.unwrap_or_else(sys::default_backend),
            dispatcher: self
                .dispatcher
                .unwrap_or_else(|| Arc::new(InlineDispatcher)),
            notification_options: self.notification_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::dispatch::MainQueue;
    use crate::{CameraAuthorization, NotificationAuthorization, NotificationSettings};

    /// Answers synchronously, or drops replies when `abandon` is set.
    #[derive(Debug, Default)]
    struct StaticBackend {
        abandon: bool,
        last_options: Mutex<Option<NotificationOptions>>,
    }

    impl PermissionBackend for StaticBackend {
        fn camera_authorization(&self) -> CameraAuthorization {
            CameraAuthorization::Restricted
        }

        fn notification_settings(&self, reply: SettingsReply) {
            if !self.abandon {
                reply.resolve(NotificationSettings::new(NotificationAuthorization::Authorized));
            }
        }

        fn request_camera_access(&self, reply: AccessReply) {
            if !self.abandon {
                reply.deny();
            }
        }

        fn request_notification_authorization(
            &self,
            options: NotificationOptions,
            reply: AccessReply,
        ) {
            *self.last_options.lock().unwrap() = Some(options);
            if !self.abandon {
                reply.grant();
            }
        }
    }

    #[tokio::test]
    async fn reads_each_permission() {
        let gateway = PermissionGateway::builder()
            .backend(StaticBackend::default())
            .build();
        assert_eq!(gateway.status(Permission::Camera).await, PermissionStatus::Denied);
        assert_eq!(
            gateway.status(Permission::Notifications).await,
            PermissionStatus::Granted
        );
    }

    #[tokio::test]
    async fn abandoned_settings_query_is_unknown() {
        let gateway = PermissionGateway::builder()
            .backend(StaticBackend {
                abandon: true,
                ..StaticBackend::default()
            })
            .build();
        assert_eq!(
            gateway.status(Permission::Notifications).await,
            PermissionStatus::Unknown
        );
    }

    #[tokio::test]
    async fn abandoned_request_is_denied() {
        let gateway = PermissionGateway::builder()
            .backend(StaticBackend {
                abandon: true,
                ..StaticBackend::default()
            })
            .build();
        assert_eq!(
            gateway.request_status(Permission::Camera).await,
            PermissionStatus::Denied
        );
    }

    #[test]
    fn blocking_read_outside_main_context() {
        let gateway = PermissionGateway::builder()
            .backend(StaticBackend::default())
            .build();
        assert_eq!(
            gateway.status_blocking(Permission::Notifications),
            Ok(PermissionStatus::Granted)
        );
    }

    #[test]
    fn blocking_read_refused_on_main_context() {
        let (queue, main_loop) = MainQueue::new();
        let gateway = PermissionGateway::builder()
            .backend(StaticBackend::default())
            .dispatcher(queue.clone())
            .build();

        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        let inner = gateway.clone();
        queue.dispatch(Box::new(move || {
            *slot.lock().unwrap() = Some(inner.status_blocking(Permission::Camera));
        }));
        main_loop.run_pending();

        assert_eq!(
            *result.lock().unwrap(),
            Some(Err(PermissionError::BlockingOnMainContext))
        );
    }

    #[test]
    fn configured_options_reach_the_backend() {
        let backend = Arc::new(StaticBackend::default());
        let options = NotificationOptions {
            badge: false,
            ..NotificationOptions::default()
        };
        let gateway = PermissionGateway::builder()
            .shared_backend(backend.clone())
            .notification_options(options)
            .build();
        assert_eq!(gateway.notification_options(), options);

        let outcome = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);
        gateway.request(Permission::Notifications, move |status| {
            *slot.lock().unwrap() = Some(status);
        });

        assert_eq!(*outcome.lock().unwrap(), Some(PermissionStatus::Granted));
        assert_eq!(*backend.last_options.lock().unwrap(), Some(options));
    }
}
