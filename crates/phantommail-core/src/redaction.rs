use serde::{Deserialize, Serialize};

/// Secret reference with the value redacted, safe to write into run artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedSecret {
    /// Where the secret comes from (e.g. an environment variable name).
    pub source: String,
    pub present: bool,
    pub redacted: String,
}

/// Describe a secret without revealing it.
pub fn redact_secret(source: &str, value: Option<&str>) -> RedactedSecret {
    let redacted = match value {
        Some(value) if value.chars().count() > 8 => {
            let prefix: String = value.chars().take(3).collect();
            format!("{prefix}***")
        }
        Some(_) => "***".to_string(),
        None => String::new(),
    };
    RedactedSecret {
        source: source.to_string(),
        present: value.is_some(),
        redacted,
    }
}

/// Mask the local part of an email address (`jane.doe@acme.com` -> `j***@acme.com`).
pub fn redact_email(address: &str) -> String {
    let address = address.trim();
    match address.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// Mask every address of a recipient list.
pub fn redact_recipients(addresses: &[String]) -> Vec<String> {
    addresses.iter().map(|address| redact_email(address)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_local_part_only() {
        assert_eq!(redact_email("jane.doe@acme.com"), "j***@acme.com");
        assert_eq!(redact_email("not-an-address"), "***");
    }

    #[test]
    fn secrets_keep_a_short_prefix() {
        let secret = redact_secret("RESEND_API_KEY", Some("re_123456789abc"));
        assert!(secret.present);
        assert_eq!(secret.redacted, "re_***");

        let missing = redact_secret("RESEND_API_KEY", None);
        assert!(!missing.present);
        assert!(missing.redacted.is_empty());
    }
}
