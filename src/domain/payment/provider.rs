//! Payment provider identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which checkout provider handled a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProviderKind {
    Creem,
    Stripe,
}

impl PaymentProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProviderKind::Creem => "creem",
            PaymentProviderKind::Stripe => "stripe",
        }
    }

    /// Provider requested by a checkout call: Creem unless something else is named.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            None | Some("creem") => PaymentProviderKind::Creem,
            Some(_) => PaymentProviderKind::Stripe,
        }
    }
}

impl fmt::Display for PaymentProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
