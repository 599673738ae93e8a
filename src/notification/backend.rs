//! Notification delivery backends.
//!
//! A backend is the outer edge of the notification system: it asks the
//! platform for permission and puts a finished [`Notification`] in front of
//! the user. Dispatcher variants decide what a notification looks like;
//! backends only deliver it.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::content::{Notification, NotificationKind};
use super::error::NotificationError;
use crate::sound::{Chime, SoundPlayer};

/// Delivery surface used by the dispatcher variants.
#[allow(async_fn_in_trait)]
pub trait NotificationBackend {
    /// Asks the platform for permission to show notifications.
    async fn request_permission(&self) -> Result<bool, NotificationError>;

    /// Delivers a notification.
    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Returns false if the platform cannot show notifications at all.
    fn is_supported(&self) -> bool {
        true
    }
}

impl<B: NotificationBackend> NotificationBackend for Arc<B> {
    async fn request_permission(&self) -> Result<bool, NotificationError> {
        B::request_permission(self).await
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        B::deliver(self, notification).await
    }

    fn is_supported(&self) -> bool {
        B::is_supported(self)
    }
}

// ============================================================================
// TerminalBackend
// ============================================================================

/// Shows notifications as framed lines on standard error.
///
/// Standard output belongs to the session (and its JSON lines), so nothing
/// here writes to it. Notifications that ask for sound play a chime through
/// the configured [`SoundPlayer`], or ring the terminal bell when no player
/// is available.
pub struct TerminalBackend {
    sound_player: Option<Box<dyn SoundPlayer>>,
}

impl TerminalBackend {
    /// Creates a backend with an optional sound player.
    #[must_use]
    pub fn new(sound_player: Option<Box<dyn SoundPlayer>>) -> Self {
        Self { sound_player }
    }

    /// Creates a backend that never plays audio.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(None)
    }

    fn ring(&self, kind: NotificationKind) {
        let chime = match kind {
            NotificationKind::Noisy => Chime::Alert,
            NotificationKind::Standard | NotificationKind::FollowUp => Chime::Soft,
        };

        match &self.sound_player {
            Some(player) => {
                if let Err(e) = player.play(chime) {
                    warn!("Failed to play notification chime: {}", e);
                }
            }
            None => {
                let mut stderr = std::io::stderr().lock();
                let _ = stderr.write_all(b"\x07").and_then(|()| stderr.flush());
            }
        }
    }
}

impl NotificationBackend for TerminalBackend {
    async fn request_permission(&self) -> Result<bool, NotificationError> {
        Ok(true)
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut stderr = std::io::stderr().lock();
        writeln!(
            stderr,
            "\n┌ {} ─ {}\n└ {}",
            notification.title,
            notification.platform.as_str(),
            notification.body
        )
        .and_then(|()| stderr.flush())
        .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        drop(stderr);

        if notification.sound {
            self.ring(notification.kind);
        }

        debug!(id = %notification.id, kind = ?notification.kind, "Notification delivered");
        Ok(())
    }
}

impl std::fmt::Debug for TerminalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalBackend")
            .field("sound", &self.sound_player.is_some())
            .finish()
    }
}

// ============================================================================
// MockNotificationBackend
// ============================================================================

/// How the mock backend answers permission requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPermission {
    /// Permission granted
    Granted,
    /// Permission denied
    Denied,
    /// The permission request itself fails
    Error,
}

/// Recording backend for tests.
#[derive(Debug)]
pub struct MockNotificationBackend {
    delivered: Mutex<Vec<Notification>>,
    permission: Mutex<MockPermission>,
    permission_requests: Mutex<u32>,
    supported: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockNotificationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            permission: Mutex::new(MockPermission::Granted),
            permission_requests: Mutex::new(0),
            supported: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_permission(&self, permission: MockPermission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.store(supported, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }

    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    #[must_use]
    pub fn permission_requests(&self) -> u32 {
        *self.permission_requests.lock().unwrap()
    }
}

impl NotificationBackend for MockNotificationBackend {
    async fn request_permission(&self) -> Result<bool, NotificationError> {
        *self.permission_requests.lock().unwrap() += 1;
        match *self.permission.lock().unwrap() {
            MockPermission::Granted => Ok(true),
            MockPermission::Denied => Ok(false),
            MockPermission::Error => Err(NotificationError::AuthorizationFailed(
                "Mock failure".to_string(),
            )),
        }
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }

    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::SeqCst)
    }
}
