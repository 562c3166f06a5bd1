//! Extraction result - the pipeline's sole output

use crate::{ContractDetails, PartyRecord, PartyRole};

/// The two parties of a sale contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parties {
    /// Seller record
    pub vendedor: PartyRecord,

    /// Buyer record
    pub comprador: PartyRecord,
}

impl Parties {
    /// Both parties with every field set to its sentinel
    pub fn not_found() -> Self {
        Self {
            vendedor: PartyRecord::not_found(PartyRole::Vendedor),
            comprador: PartyRecord::not_found(PartyRole::Comprador),
        }
    }

    /// Get the record for a role
    pub fn get(&self, role: PartyRole) -> &PartyRecord {
        match role {
            PartyRole::Vendedor => &self.vendedor,
            PartyRole::Comprador => &self.comprador,
        }
    }

    /// Iterate seller then buyer
    pub fn iter(&self) -> impl Iterator<Item = &PartyRecord> {
        [&self.vendedor, &self.comprador].into_iter()
    }
}

impl Default for Parties {
    fn default() -> Self {
        Self::not_found()
    }
}

/// Everything extracted from one contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Seller and buyer
    pub parties: Parties,

    /// Optional contract metadata
    pub details: ContractDetails,
}

impl ExtractionResult {
    /// Combine parties and details
    pub fn new(parties: Parties, details: ContractDetails) -> Self {
        Self { parties, details }
    }

    /// Seller record
    pub fn vendedor(&self) -> &PartyRecord {
        self.parties.get(PartyRole::Vendedor)
    }

    /// Buyer record
    pub fn comprador(&self) -> &PartyRecord {
        self.parties.get(PartyRole::Comprador)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parties_roles() {
        let parties = Parties::not_found();
        assert_eq!(parties.get(PartyRole::Vendedor).role, PartyRole::Vendedor);
        assert_eq!(parties.get(PartyRole::Comprador).role, PartyRole::Comprador);

        let roles: Vec<_> = parties.iter().map(|p| p.role).collect();
        assert_eq!(roles, vec![PartyRole::Vendedor, PartyRole::Comprador]);
    }
}
