//! Delivery tiers and add-ons

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryTier {
    /// Flat fee, waived above the free-shipping threshold.
    #[default]
    Standard,

    /// Flat fee, always charged.
    Express,

    /// Flat fee, always charged.
    Overnight,
}

impl DeliveryTier {
    /// Stable lowercase name, as stored and sent over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised delivery tier name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown delivery tier: {0}")]
pub struct UnknownDeliveryTier(pub String);

impl FromStr for DeliveryTier {
    type Err = UnknownDeliveryTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "overnight" => Ok(Self::Overnight),
            other => Err(UnknownDeliveryTier(other.to_string())),
        }
    }
}

/// Optional flat-fee extras.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOns {
    /// Shipping protection.
    pub insurance: bool,

    /// Gift wrapping.
    pub gift_wrap: bool,
}

impl AddOns {
    /// No add-ons selected.
    pub const NONE: Self = Self {
        insurance: false,
        gift_wrap: false,
    };
}
