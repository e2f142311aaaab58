use std::future::Future;

use crate::config::SupportConfig;
use crate::error::SendError;
use crate::ticket::Ticket;

/// Form fields as read at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportRequest {
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

impl SupportEmail {
    pub fn compose(config: &SupportConfig, request: &SupportRequest) -> Self {
        Self {
            to: config.mailbox.clone(),
            from: request.user_email.clone(),
            subject: format!(
                "{} {} - {}",
                config.subject_prefix, request.subject, request.user_name
            ),
            body: request.message.clone(),
        }
    }
}

/// Delivers a support message and hands back the ticket it was filed under.
pub trait SupportTransport {
    fn send(&self, email: &SupportEmail) -> impl Future<Output = Result<Ticket, SendError>>;
}

/// Waits for a number of milliseconds on whatever timer the host offers.
pub trait Delay {
    fn delay(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Stand-in for a mail backend: logs the message, waits, always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedTransport<D> {
    delay: D,
    delay_ms: u32,
}

impl<D: Delay> SimulatedTransport<D> {
    pub fn new(delay: D, delay_ms: u32) -> Self {
        Self { delay, delay_ms }
    }
}

impl<D: Delay> SupportTransport for SimulatedTransport<D> {
    async fn send(&self, email: &SupportEmail) -> Result<Ticket, SendError> {
        log::info!(
            "sending support message to={} from={} subject={:?} ({} bytes)",
            email.to,
            email.from,
            email.subject,
            email.body.len()
        );
        self.delay.delay(self.delay_ms).await;
        Ok(Ticket::issue(foundation::now_ms(), &mut rand::rng()))
    }
}
