//! Platform authorization values and their mapping onto [`PermissionStatus`].

use crate::{Permission, PermissionError, PermissionStatus};

/// Video capture authorization as the platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAuthorization {
    /// The user has not been asked.
    NotDetermined,
    /// Access is blocked by policy (parental controls, MDM).
    Restricted,
    /// The user refused access.
    Denied,
    /// The user allowed access.
    Authorized,
}

impl From<CameraAuthorization> for PermissionStatus {
    fn from(value: CameraAuthorization) -> Self {
        match value {
            CameraAuthorization::Authorized => Self::Granted,
            CameraAuthorization::Denied | CameraAuthorization::Restricted => Self::Denied,
            CameraAuthorization::NotDetermined => Self::Unknown,
        }
    }
}

/// Notification authorization codes that have a defined mapping.
///
/// Discriminants are the platform's raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum NotificationAuthorization {
    /// The user has not been asked.
    NotDetermined = 0,
    /// The user refused notifications.
    Denied = 1,
    /// The user allowed notifications.
    Authorized = 2,
}

impl NotificationAuthorization {
    /// Look up a raw platform code.
    ///
    /// Codes outside the table (provisional, ephemeral and anything newer)
    /// return `None`.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::NotDetermined),
            1 => Some(Self::Denied),
            2 => Some(Self::Authorized),
            _ => None,
        }
    }

    /// The raw platform code.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self as i64
    }
}

impl From<NotificationAuthorization> for PermissionStatus {
    fn from(value: NotificationAuthorization) -> Self {
        match value {
            NotificationAuthorization::NotDetermined => Self::Unknown,
            NotificationAuthorization::Denied => Self::Denied,
            NotificationAuthorization::Authorized => Self::Granted,
        }
    }
}

/// Snapshot delivered by the asynchronous notification settings query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationSettings {
    authorization_status: i64,
}

impl NotificationSettings {
    /// Wrap the raw authorization code reported by the platform.
    #[must_use]
    pub const fn from_raw(authorization_status: i64) -> Self {
        Self {
            authorization_status,
        }
    }

    /// Settings carrying a known authorization value.
    #[must_use]
    pub const fn new(authorization: NotificationAuthorization) -> Self {
        Self::from_raw(authorization.raw())
    }

    /// The raw authorization code.
    #[must_use]
    pub const fn authorization_status(&self) -> i64 {
        self.authorization_status
    }

    /// Map the authorization code, reporting unmapped codes as an error.
    ///
    /// # Errors
    /// Returns [`PermissionError::UnmappedStatus`] if the code has no mapping.
    pub const fn try_status(&self) -> Result<PermissionStatus, PermissionError> {
        match NotificationAuthorization::from_raw(self.authorization_status) {
            Some(NotificationAuthorization::NotDetermined) => Ok(PermissionStatus::Unknown),
            Some(NotificationAuthorization::Denied) => Ok(PermissionStatus::Denied),
            Some(NotificationAuthorization::Authorized) => Ok(PermissionStatus::Granted),
            None => Err(PermissionError::UnmappedStatus {
                permission: Permission::Notifications,
                raw: self.authorization_status,
            }),
        }
    }

    /// Map the authorization code.
    ///
    /// # Panics
    /// Panics if the platform reported a code with no mapping. That means the
    /// platform grew a value the mapping table does not cover.
    #[must_use]
    pub fn status(&self) -> PermissionStatus {
        match self.try_status() {
            Ok(status) => status,
            Err(err) => panic!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_mapping() {
        let cases = [
            (CameraAuthorization::Authorized, PermissionStatus::Granted),
            (CameraAuthorization::Denied, PermissionStatus::Denied),
            (CameraAuthorization::Restricted, PermissionStatus::Denied),
            (CameraAuthorization::NotDetermined, PermissionStatus::Unknown),
        ];
        for (platform, expected) in cases {
            assert_eq!(PermissionStatus::from(platform), expected, "{platform:?}");
        }
    }

    #[test]
    fn every_known_notification_code_maps() {
        for raw in 0..=2 {
            let authorization = NotificationAuthorization::from_raw(raw).unwrap();
            assert_eq!(authorization.raw(), raw);
            let settings = NotificationSettings::from_raw(raw);
            assert_eq!(settings.status(), PermissionStatus::from(authorization));
        }
    }

    #[test]
    fn not_determined_notifications_are_unknown() {
        let settings = NotificationSettings::new(NotificationAuthorization::NotDetermined);
        assert_eq!(settings.status(), PermissionStatus::Unknown);
    }

    #[test]
    fn provisional_code_is_reported() {
        let settings = NotificationSettings::from_raw(3);
        assert_eq!(
            settings.try_status(),
            Err(PermissionError::UnmappedStatus {
                permission: Permission::Notifications,
                raw: 3,
            })
        );
    }

    #[test]
    #[should_panic(expected = "unmapped notifications authorization code 4")]
    fn unmapped_code_fails_fast() {
        let _ = NotificationSettings::from_raw(4).status();
    }
}
