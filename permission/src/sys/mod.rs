//! Platform-specific permission backends.

use std::sync::Arc;

use crate::PermissionBackend;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;
mod desktop;
mod unsupported;

#[cfg(any(target_os = "ios", target_os = "macos"))]
pub use apple::AppleBackend;
pub use desktop::DesktopBackend;
pub use unsupported::UnsupportedBackend;

/// The backend for the platform this crate was compiled for.
#[cfg(any(target_os = "ios", target_os = "macos"))]
#[must_use]
pub fn default_backend() -> Arc<dyn PermissionBackend> {
    Arc::new(AppleBackend::new())
}

/// The backend for the platform this crate was compiled for.
#[cfg(any(target_os = "linux", target_os = "windows"))]
#[must_use]
pub fn default_backend() -> Arc<dyn PermissionBackend> {
    Arc::new(DesktopBackend::new())
}

/// The backend for the platform this crate was compiled for.
#[cfg(not(any(
    target_os = "ios",
    target_os = "macos",
    target_os = "linux",
    target_os = "windows"
)))]
#[must_use]
pub fn default_backend() -> Arc<dyn PermissionBackend> {
    Arc::new(UnsupportedBackend::new())
}
