use async_trait::async_trait;

/// Advisory notification channel for new bookings. Failures are logged and
/// swallowed by callers; a reservation never depends on delivery.
#[async_trait]
pub trait NotifySink: Send + Sync {
    async fn notify(&self, message: &str) -> anyhow::Result<()>;
}

/// Hands bookings off to the shop's WhatsApp number via a wa.me deep link.
/// There is no delivery API behind this, the link is surfaced for the client
/// to open, so "sending" just builds and logs it.
pub struct WhatsAppLink {
    contact_number: String,
}

impl WhatsAppLink {
    pub fn new(contact_number: String) -> Self {
        Self { contact_number }
    }

    pub fn link_for(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.contact_number,
            urlencoding::encode(message)
        )
    }
}

#[async_trait]
impl NotifySink for WhatsAppLink {
    async fn notify(&self, message: &str) -> anyhow::Result<()> {
        let url = self.link_for(message);
        tracing::info!(%url, "whatsapp handoff link");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_url_encoded() {
        let sink = WhatsAppLink::new("+51907011564".to_string());
        let link = sink.link_for("Ana booked Fade (S/. 30) on 2024-06-03 at 14:00.");

        assert!(link.starts_with("https://wa.me/+51907011564?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("2024-06-03"));
    }
}
