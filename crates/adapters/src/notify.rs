// SPDX-License-Identifier: MIT

//! Notification delivery over authenticated SMTP.
//!
//! The transport speaks STARTTLS to the relay host and authenticates with the
//! sender address and credential from [`MailSettings`]. Delivery problems are
//! reported as [`NotifyError`]; callers decide whether that is fatal (it never
//! is for the maintenance workflow).

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor};
use thiserror::Error;

use upkeep_core::{MailSettings, NotificationPayload};

/// Errors from a notification attempt.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// The relay accepted the connection but refused the message.
    #[error("relay rejected the message: {0}")]
    Rejected(String),

    /// Connection, TLS, or authentication problems.
    #[error("smtp transport failed: {0}")]
    Transport(String),
}

/// Adapter for delivering one notification payload.
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}

/// Sends mail through the configured relay with STARTTLS.
#[derive(Clone, Debug)]
pub struct SmtpNotifyAdapter {
    settings: MailSettings,
}

impl SmtpNotifyAdapter {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl NotifyAdapter for SmtpNotifyAdapter {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.settings.sender.parse()?)
            .to(self.settings.recipient.parse()?)
            .subject(payload.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(payload.body.clone())?;

        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.relay_host)
                .map_err(classify_smtp)?
                .credentials(Credentials::new(
                    self.settings.sender.clone(),
                    self.settings.credential.clone(),
                ))
                .build();

        tracing::info!(
            subject = %payload.subject,
            to = %self.settings.recipient,
            relay = %self.settings.relay_host,
            "sending notification email"
        );
        transport.send(message).await.map_err(classify_smtp)?;
        tracing::info!(subject = %payload.subject, "notification email sent");
        Ok(())
    }
}

/// Split relay errors into permanent rejections and transport problems.
fn classify_smtp(error: lettre::transport::smtp::Error) -> NotifyError {
    if error.is_permanent() {
        NotifyError::Rejected(error.to_string())
    } else {
        NotifyError::Transport(error.to_string())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use upkeep_core::NotificationPayload;

    use super::{NotifyAdapter, NotifyError};

    struct FakeNotifyState {
        sent: Vec<NotificationPayload>,
        attempts: usize,
        failure: Option<String>,
    }

    /// Fake notifier that records payloads instead of delivering them.
    #[derive(Clone)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl Default for FakeNotifyAdapter {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeNotifyState {
                    sent: Vec::new(),
                    attempts: 0,
                    failure: None,
                })),
            }
        }
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent attempt fail with a transport error.
        pub fn fail_with(&self, message: &str) {
            self.inner.lock().failure = Some(message.to_string());
        }

        /// Payloads delivered so far.
        pub fn sent(&self) -> Vec<NotificationPayload> {
            self.inner.lock().sent.clone()
        }

        /// Number of attempts, delivered or not.
        pub fn attempts(&self) -> usize {
            self.inner.lock().attempts
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
            let mut state = self.inner.lock();
            state.attempts += 1;
            if let Some(message) = &state.failure {
                return Err(NotifyError::Transport(message.clone()));
            }
            state.sent.push(payload.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
