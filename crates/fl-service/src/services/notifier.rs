//! Moderation alerts for newly submitted reviews
//!
//! Submitting a review only hands an alert to a bounded queue. A separate
//! worker task drains it and talks to the mail transport, so slow or failing
//! delivery never reaches the request that created the review.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use validator::ValidateEmail;

use fl_common::MailConfig;
use fl_core::entities::Review;

/// Alerts waiting for delivery before new ones are dropped
pub const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

const SMTPS_PORT: u16 = 465;

/// Snapshot of a new review, rendered into a plaintext mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAlert {
    pub review_id: String,
    pub customer_name: String,
    pub product_name: String,
    pub category: String,
    pub rating: u8,
    pub comment: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewAlert {
    pub fn subject(&self) -> &'static str {
        "Nueva reseña pendiente de moderación"
    }

    pub fn body(&self) -> String {
        format!(
            "Se recibió una nueva reseña.\n\n\
             Cliente: {}\n\
             Producto: {}\n\
             Categoría: {}\n\
             Calificación: {}/5\n\
             Comentario: {}\n\
             Estado: {}\n\
             Fecha: {}\n",
            self.customer_name,
            self.product_name,
            self.category,
            self.rating,
            self.comment,
            self.status,
            self.created_at.to_rfc3339(),
        )
    }
}

impl From<&Review> for ReviewAlert {
    fn from(review: &Review) -> Self {
        Self {
            review_id: review.id.to_string(),
            customer_name: review.customer_name.clone(),
            product_name: review.product_name.clone(),
            category: review.category.clone(),
            rating: review.rating.stars(),
            comment: review.comment.clone(),
            status: review.status.to_string(),
            created_at: review.created_at,
        }
    }
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail transport
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP transport over lettre
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build a transport for `host`.
    ///
    /// Port 465 uses implicit TLS, any other port upgrades with STARTTLS.
    pub fn new(config: &MailConfig, host: &str) -> Result<Self, MailError> {
        let builder = if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(config.timeout()));

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(from.parse::<Mailbox>()?)
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Producer side of the alert queue, cheap to clone
#[derive(Clone)]
pub struct ReviewNotifier {
    sender: Option<mpsc::Sender<ReviewAlert>>,
}

impl ReviewNotifier {
    /// A notifier and the receiving end its worker drains
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ReviewAlert>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A notifier that drops every alert
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queue an alert for `review`. Never waits for delivery.
    pub fn notify_new_review(&self, review: &Review) {
        let Some(sender) = &self.sender else {
            debug!(review_id = %review.id, "Notifier disabled, alert dropped");
            return;
        };

        match sender.try_send(ReviewAlert::from(review)) {
            Ok(()) => debug!(review_id = %review.id, "Review alert queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(review_id = %review.id, "Notification queue full, alert dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(review_id = %review.id, "Notification worker stopped, alert dropped");
            }
        }
    }
}

impl fmt::Debug for ReviewNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewNotifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Consumer side of the alert queue
pub struct NotificationWorker {
    receiver: mpsc::Receiver<ReviewAlert>,
    transport: Option<Arc<dyn MailTransport>>,
    from: Option<String>,
    recipient: Option<String>,
}

impl NotificationWorker {
    pub fn new(
        receiver: mpsc::Receiver<ReviewAlert>,
        transport: Option<Arc<dyn MailTransport>>,
        from: Option<String>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            receiver,
            transport,
            from,
            recipient,
        }
    }

    /// Wire a worker from mail settings.
    ///
    /// Without a host there is no transport. The sender address falls back to
    /// the SMTP user.
    pub fn from_config(receiver: mpsc::Receiver<ReviewAlert>, config: &MailConfig) -> Self {
        let transport = config.smtp_host.as_deref().and_then(|host| {
            match SmtpMailTransport::new(config, host) {
                Ok(transport) => {
                    info!(host = %host, port = config.smtp_port, "SMTP transport configured");
                    Some(Arc::new(transport) as Arc<dyn MailTransport>)
                }
                Err(e) => {
                    error!(error = %e, host = %host, "Failed to configure SMTP transport");
                    None
                }
            }
        });
        let from = config.from.clone().or_else(|| config.smtp_user.clone());

        Self::new(receiver, transport, from, config.notify_to.clone())
    }

    /// Drain the queue until every notifier handle is dropped
    pub async fn run(mut self) {
        while let Some(alert) = self.receiver.recv().await {
            self.deliver(&alert).await;
        }
        debug!("Notification queue closed");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Deliver one alert. Failures are logged, never returned.
    async fn deliver(&self, alert: &ReviewAlert) {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            warn!(review_id = %alert.review_id, "Mail transport not configured, alert skipped");
            return;
        };

        let Some(recipient) = self.recipient.as_ref().filter(|to| to.validate_email()) else {
            warn!(
                review_id = %alert.review_id,
                recipient = ?self.recipient,
                "Alert recipient missing or invalid, alert skipped"
            );
            return;
        };

        match transport
            .send(from, recipient, alert.subject(), &alert.body())
            .await
        {
            Ok(()) => info!(review_id = %alert.review_id, "Review alert sent"),
            Err(e) => error!(review_id = %alert.review_id, error = %e, "Failed to send review alert"),
        }
    }
}
