//! Wire types for the remote pet-store inventory service.
//!
//! Field names follow the service's JSON schema (`photoUrls` stays camelCase
//! on the wire); everything else is idiomatic snake_case. Identifiers are
//! assigned by the remote service and never generated locally, so `id` is
//! optional: absent on creation requests, expected on read responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an inventory record.
///
/// The service models exactly three states; anything else on the wire is a
/// deserialization error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Listed and purchasable
    #[default]
    Available,
    /// Reserved, sale in progress
    Pending,
    /// No longer in the inventory
    Sold,
}

impl PetStatus {
    /// All statuses, in the order the inventory listing queries them.
    pub const ALL: [PetStatus; 3] = [PetStatus::Available, PetStatus::Pending, PetStatus::Sold];

    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional grouping reference attached to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Category {
    /// Service-assigned category identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Free-form label attached to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tag {
    /// Service-assigned tag identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A pet inventory record as modeled by the remote service.
///
/// The client holds no authoritative state: a `Pet` only ever reflects what
/// the service returned, and every lifecycle change is a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pet {
    /// Service-assigned identifier; leave `None` when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lifecycle status.
    pub status: PetStatus,
    /// Ordered image URLs; may be empty.
    #[serde(rename = "photoUrls", default)]
    pub photo_urls: Vec<String>,
    /// Optional grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Optional labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}
