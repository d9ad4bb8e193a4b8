//! # Permkit
//!
//! Uniform camera and notification permission checks across macOS, iOS,
//! Windows, and Linux.
//!
//! ## Features
//!
//! - `permission` (default): the permission gateway, re-exported as
//!   [`permission`].
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! permkit = "0.1"
//! ```
//!
//! ```rust
//! use permkit::permission::{Permission, PermissionGateway};
//!
//! async fn camera_ready(gateway: &PermissionGateway) -> bool {
//!     gateway.status(Permission::Camera).await.is_granted()
//! }
//! ```

#[cfg(feature = "permission")]
pub use permkit_permission as permission;
