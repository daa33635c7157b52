use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalogue listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Publication state of a listing. Only `Active` listings are publicly
/// visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Draft,
    Active,
    Pending,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Active => "active",
            ListingStatus::Pending => "pending",
        }
    }
}

/// Inbound payload for creating or replacing a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub name: String,
    pub location: String,
    pub price: u64,
    pub size_sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    #[serde(default)]
    pub status: ListingStatus,
}

/// Catalogue record for a residential listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialProperty {
    pub id: PropertyId,
    pub name: String,
    pub location: String,
    pub price: u64,
    pub size_sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub status: ListingStatus,
    pub listed_on: NaiveDate,
}

impl ResidentialProperty {
    pub fn from_draft(id: PropertyId, draft: PropertyDraft, listed_on: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            price: draft.price,
            size_sqft: draft.size_sqft,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            status: draft.status,
            listed_on,
        }
    }

    pub const fn is_public(&self) -> bool {
        matches!(self.status, ListingStatus::Active)
    }
}
