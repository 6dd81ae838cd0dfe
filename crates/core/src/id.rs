//! Typed identifiers.
//!
//! Every id is a UUIDv7 tagged with the kind of record it points at, so a
//! `QuotationId` can never be handed to something expecting a `CatalogItemId`.
//! The tag is a zero-sized marker; on the wire an id is just the UUID string.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Names the record an [`Id`] refers to.
pub trait IdKind {
    /// Used in `Debug` output and parse errors.
    const NAME: &'static str;
}

/// Marker kinds for the ids defined in this crate.
pub mod kind {
    use super::IdKind;

    #[derive(Debug)]
    pub enum CatalogItem {}

    #[derive(Debug)]
    pub enum Quotation {}

    #[derive(Debug)]
    pub enum LineItem {}

    impl IdKind for CatalogItem {
        const NAME: &'static str = "CatalogItemId";
    }

    impl IdKind for Quotation {
        const NAME: &'static str = "QuotationId";
    }

    impl IdKind for LineItem {
        const NAME: &'static str = "LineItemId";
    }
}

/// Identifier of a catalog item (product or rentable equipment).
pub type CatalogItemId = Id<kind::CatalogItem>;

/// Identifier of a quotation.
pub type QuotationId = Id<kind::Quotation>;

/// Identifier of a line item within a quotation.
pub type LineItemId = Id<kind::LineItem>;

/// A UUID tagged with the kind of record it identifies.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<K> {
    uuid: Uuid,
    #[serde(skip)]
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> Id<K> {
    /// Fresh time-ordered id. Tests that need stable ids parse a fixed UUID
    /// string instead.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<K: IdKind> Default for Id<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

// UUIDv7 sorts by creation time.
impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::NAME, self.uuid)
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

impl<K: IdKind> From<Uuid> for Id<K> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<K: IdKind> FromStr for Id<K> {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|e| DomainError::invalid_id(format!("{}: {e}", K::NAME)))
    }
}
