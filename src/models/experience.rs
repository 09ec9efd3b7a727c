//! Bookable experience model

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Identifier of a bookable experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExperienceId {
    Orangutan,
    Sunbear,
    Combo,
}

impl ExperienceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceId::Orangutan => "ORANGUTAN",
            ExperienceId::Sunbear => "SUNBEAR",
            ExperienceId::Combo => "COMBO",
        }
    }

    /// Place name used when asking the fact provider about this experience
    pub fn location(&self) -> &'static str {
        match self {
            ExperienceId::Orangutan => "Sepilok Orangutan Rehabilitation Centre",
            ExperienceId::Sunbear => "Bornean Sun Bear Conservation Centre",
            ExperienceId::Combo => "the Bornean rainforest",
        }
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ORANGUTAN" => Ok(ExperienceId::Orangutan),
            "SUNBEAR" => Ok(ExperienceId::Sunbear),
            "COMBO" => Ok(ExperienceId::Combo),
            other => Err(format!("Unknown experience: {}", other)),
        }
    }
}

/// Visitor category with its own unit price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VisitorCategory {
    Adult,
    Child,
}

impl VisitorCategory {
    /// Lowest count the category may reach; one adult always leads the visit
    pub fn floor(&self) -> u32 {
        match self {
            VisitorCategory::Adult => 1,
            VisitorCategory::Child => 0,
        }
    }
}

/// Unit prices in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceTable {
    pub adult: u32,
    pub child: u32,
}

impl PriceTable {
    pub fn unit_price(&self, category: VisitorCategory) -> u32 {
        match category {
            VisitorCategory::Adult => self.adult,
            VisitorCategory::Child => self.child,
        }
    }

    /// `adults * adult + children * child`
    pub fn total(&self, adults: u32, children: u32) -> u64 {
        let adults = u64::from(adults) * u64::from(self.adult);
        let children = u64::from(children) * u64::from(self.child);
        adults.saturating_add(children)
    }
}

/// Bookable wildlife attraction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Experience {
    pub id: ExperienceId,
    /// Display name
    pub name: String,
    pub description: String,
    /// Image reference rendered by the page
    pub image: String,
    /// Optional external information link
    pub external_url: Option<String>,
    pub prices: PriceTable,
}
