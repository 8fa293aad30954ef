use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::app::domain::{EmailCredentials, EmailProvider, RichDocument, SmtpEndpoint};
use crate::app::error::MailError;

pub const SUBJECT: &str = "Document";

/// Delivers one composed message. A single attempt, no retry.
pub trait MailTransport {
    fn send(
        &self,
        endpoint: SmtpEndpoint,
        credentials: &EmailCredentials,
        message: &Message,
    ) -> Result<(), MailError>;
}

/// Blocking SMTP submission with a mandatory STARTTLS upgrade.
pub struct SmtpMailer;

impl MailTransport for SmtpMailer {
    fn send(
        &self,
        endpoint: SmtpEndpoint,
        credentials: &EmailCredentials,
        message: &Message,
    ) -> Result<(), MailError> {
        let creds = Credentials::new(credentials.address.clone(), credentials.password.clone());
        let mailer = SmtpTransport::starttls_relay(endpoint.host)?
            .port(endpoint.port)
            .credentials(creds)
            .build();
        mailer.send(message)?;
        Ok(())
    }
}

/// Build the plain-text message. It is sent from the configured address to the
/// same address.
pub fn compose(credentials: &EmailCredentials, body: &str) -> Result<Message, MailError> {
    let mailbox: Mailbox = credentials.address.parse()?;
    let message = Message::builder()
        .from(mailbox.clone())
        .to(mailbox)
        .subject(SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;
    Ok(message)
}

/// Mail the document's text through the provider's server.
pub fn send_document(
    transport: &dyn MailTransport,
    provider: EmailProvider,
    credentials: Option<&EmailCredentials>,
    doc: &RichDocument,
) -> Result<(), MailError> {
    let credentials = credentials.ok_or(MailError::MissingCredentials)?;
    let message = compose(credentials, &doc.plain_text())?;
    let endpoint = provider.endpoint();
    log::info!(
        "Sending document via {} ({}:{})",
        provider.display_name(),
        endpoint.host,
        endpoint.port
    );
    transport.send(endpoint, credentials, &message)
}
