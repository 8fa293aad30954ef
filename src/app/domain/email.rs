use std::fmt;

use crate::app::error::MailError;

/// Supported mail providers, in dropdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailProvider {
    #[default]
    Gmail,
    ProtonMail,
    Yahoo,
    Outlook,
}

/// Host and port of a provider's submission server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmtpEndpoint {
    pub host: &'static str,
    pub port: u16,
}

impl EmailProvider {
    pub fn all() -> &'static [EmailProvider] {
        &[
            EmailProvider::Gmail,
            EmailProvider::ProtonMail,
            EmailProvider::Yahoo,
            EmailProvider::Outlook,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EmailProvider::Gmail => "Gmail",
            EmailProvider::ProtonMail => "ProtonMail",
            EmailProvider::Yahoo => "Yahoo",
            EmailProvider::Outlook => "Outlook",
        }
    }

    /// Look up a provider by its dropdown label.
    pub fn from_name(name: &str) -> Result<Self, MailError> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.display_name() == name)
            .ok_or_else(|| MailError::UnsupportedProvider(name.to_string()))
    }

    pub fn endpoint(&self) -> SmtpEndpoint {
        match self {
            EmailProvider::Gmail => SmtpEndpoint { host: "smtp.gmail.com", port: 587 },
            EmailProvider::ProtonMail => SmtpEndpoint { host: "smtp.protonmail.ch", port: 587 },
            EmailProvider::Yahoo => SmtpEndpoint { host: "smtp.mail.yahoo.com", port: 587 },
            EmailProvider::Outlook => SmtpEndpoint { host: "smtp.office365.com", port: 587 },
        }
    }
}

/// Login for the selected provider. Held in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailCredentials {
    pub address: String,
    pub password: String,
}

impl EmailCredentials {
    /// Accept the dialog fields unless either is blank after trimming.
    /// The address is stored trimmed, the password as typed.
    pub fn validate(address: &str, password: &str) -> Result<Self, MailError> {
        if address.trim().is_empty() || password.trim().is_empty() {
            return Err(MailError::EmptyCredentials);
        }
        Ok(Self {
            address: address.trim().to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_endpoints() {
        let expected = [
            (EmailProvider::Gmail, "smtp.gmail.com", 587),
            (EmailProvider::ProtonMail, "smtp.protonmail.ch", 587),
            (EmailProvider::Yahoo, "smtp.mail.yahoo.com", 587),
            (EmailProvider::Outlook, "smtp.office365.com", 587),
        ];
        for (provider, host, port) in expected {
            assert_eq!(provider.endpoint(), SmtpEndpoint { host, port });
        }
    }

    #[test]
    fn test_provider_from_name() {
        for provider in EmailProvider::all() {
            assert_eq!(EmailProvider::from_name(provider.display_name()).unwrap(), *provider);
        }
        assert!(matches!(
            EmailProvider::from_name("Hotmail"),
            Err(MailError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_default_provider_is_gmail() {
        assert_eq!(EmailProvider::default(), EmailProvider::Gmail);
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(EmailCredentials::validate("", "pw"), Err(MailError::EmptyCredentials)));
        assert!(matches!(EmailCredentials::validate("me@x.org", "   "), Err(MailError::EmptyCredentials)));
        assert!(matches!(EmailCredentials::validate(" \t", "pw"), Err(MailError::EmptyCredentials)));
    }

    #[test]
    fn test_no_format_validation() {
        let creds = EmailCredentials::validate("  not-an-address ", "pw").unwrap();
        assert_eq!(creds.address, "not-an-address");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = EmailCredentials::validate("me@x.org", "hunter2").unwrap();
        let shown = format!("{:?}", creds);
        assert!(shown.contains("me@x.org"));
        assert!(!shown.contains("hunter2"));
    }
}
