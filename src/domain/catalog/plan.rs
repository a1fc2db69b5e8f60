//! Listing price plans and their review statuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Price plan of a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricePlan {
    #[default]
    Free,
    Pro,
    Sponsor,
}

impl PricePlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePlan::Free => "free",
            PricePlan::Pro => "pro",
            PricePlan::Sponsor => "sponsor",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, PricePlan::Free)
    }

    /// Parses a plan that can be bought; `free` is rejected.
    pub fn parse_paid(value: &str) -> Option<PricePlan> {
        match value.parse() {
            Ok(plan) if plan != PricePlan::Free => Some(plan),
            _ => None,
        }
    }
}

impl fmt::Display for PricePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricePlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PricePlan::Free),
            "pro" => Ok(PricePlan::Pro),
            "sponsor" => Ok(PricePlan::Sponsor),
            other => Err(ValidationError::invalid_format(
                "pricePlan",
                format!("unknown plan '{}'", other),
            )),
        }
    }
}

/// Review/payment status tracked per plan on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Submitting,
    Success,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Submitting => "submitting",
            PlanStatus::Success => "success",
        }
    }
}
