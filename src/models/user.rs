use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    /// Customers flagged here must pay a 50% deposit before self-service
    /// booking is allowed.
    pub requires_deposit: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Premium,
    Staff,
    Admin,
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Premium => "premium",
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    /// Accepts the canonical vocabulary plus the legacy spellings
    /// ("user", "vip", "barberyass", "god").
    pub fn parse(s: &str) -> Self {
        match s {
            "premium" | "vip" => Role::Premium,
            "staff" | "barberyass" => Role::Staff,
            "admin" => Role::Admin,
            "superadmin" | "god" => Role::SuperAdmin,
            _ => Role::Customer,
        }
    }

    /// Whether this role may use the staff-facing endpoints (slot toggles,
    /// manual bookings, cancellations, service and user management).
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin | Role::SuperAdmin)
    }
}
