use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Fixed shop contact for booking handoffs and deposit instructions.
    pub staff_whatsapp: String,
    /// Whether cancelling a booking puts its slot back on offer, or leaves
    /// it closed until staff re-enable it.
    pub reopen_on_cancel: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "barberyass.db".to_string()),
            staff_whatsapp: env::var("STAFF_WHATSAPP")
                .unwrap_or_else(|_| "+51907011564".to_string()),
            reopen_on_cancel: env::var("REOPEN_ON_CANCEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}
