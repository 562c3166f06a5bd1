//! Party module - the two roles of a sale contract

use std::fmt;

/// Sentinel for a name or national ID that could not be extracted
pub const NOT_FOUND: &str = "No encontrado";

/// Sentinel for an address that could not be extracted
pub const NOT_FOUND_ADDRESS: &str = "No encontrada";

/// Role of a party in the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyRole {
    /// Seller (first party in REUNIDOS)
    Vendedor,

    /// Buyer (second party in REUNIDOS)
    Comprador,
}

impl PartyRole {
    /// Get the role name as used in extraction output
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyRole::Vendedor => "VENDEDOR",
            PartyRole::Comprador => "COMPRADOR",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PartyRole::Vendedor => "Vendedor",
            PartyRole::Comprador => "Comprador",
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted facts about one party
///
/// Every field always holds either an extracted value or its sentinel,
/// never an empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRecord {
    /// Role this record describes
    pub role: PartyRole,

    /// Full name, or [`NOT_FOUND`]
    pub name: String,

    /// National ID (DNI), or [`NOT_FOUND`]
    pub national_id: String,

    /// Address, or [`NOT_FOUND_ADDRESS`]
    pub address: String,
}

impl PartyRecord {
    /// Create a record with every field set to its sentinel
    ///
    /// # Examples
    ///
    /// ```
    /// use notaria_domain::{PartyRecord, PartyRole};
    ///
    /// let record = PartyRecord::not_found(PartyRole::Vendedor);
    /// assert_eq!(record.name, "No encontrado");
    /// assert_eq!(record.address, "No encontrada");
    /// assert!(!record.has_any());
    /// ```
    pub fn not_found(role: PartyRole) -> Self {
        Self {
            role,
            name: NOT_FOUND.to_string(),
            national_id: NOT_FOUND.to_string(),
            address: NOT_FOUND_ADDRESS.to_string(),
        }
    }

    /// Whether a name was extracted
    pub fn has_name(&self) -> bool {
        self.name != NOT_FOUND
    }

    /// Whether a national ID was extracted
    pub fn has_national_id(&self) -> bool {
        self.national_id != NOT_FOUND
    }

    /// Whether an address was extracted
    pub fn has_address(&self) -> bool {
        self.address != NOT_FOUND_ADDRESS
    }

    /// Whether any field holds extracted data
    pub fn has_any(&self) -> bool {
        self.has_name() || self.has_national_id() || self.has_address()
    }
}
