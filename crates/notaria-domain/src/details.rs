//! Contract details - sparse metadata pulled from EXPONEN / CLÁUSULAS

use std::fmt;

/// Key of an optional contract detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetailKey {
    /// Signing date ("12 de marzo de 2024")
    Fecha,

    /// Purpose of the contract
    Objeto,

    /// Total price, suffixed with `€`
    Precio,

    /// Payment schedule, one bullet per line
    CondicionesPago,

    /// Warranty period
    Garantia,
}

impl DetailKey {
    /// All keys in output order
    pub const ALL: [DetailKey; 5] = [
        DetailKey::Fecha,
        DetailKey::Objeto,
        DetailKey::Precio,
        DetailKey::CondicionesPago,
        DetailKey::Garantia,
    ];

    /// Get the key name as used in extraction output
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKey::Fecha => "FECHA",
            DetailKey::Objeto => "OBJETO",
            DetailKey::Precio => "PRECIO",
            DetailKey::CondicionesPago => "CONDICIONES_PAGO",
            DetailKey::Garantia => "GARANTIA",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DetailKey::Fecha => "Fecha del contrato",
            DetailKey::Objeto => "Objeto del contrato",
            DetailKey::Precio => "Precio",
            DetailKey::CondicionesPago => "Condiciones de pago",
            DetailKey::Garantia => "Garantía",
        }
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse contract metadata
///
/// A field is `Some` only when its pattern matched. `None` means "not found",
/// which is different from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractDetails {
    /// Signing date
    pub date: Option<String>,

    /// Purpose of the contract
    pub purpose: Option<String>,

    /// Total price
    pub price: Option<String>,

    /// Payment schedule
    pub payment_terms: Option<String>,

    /// Warranty period
    pub warranty: Option<String>,
}

impl ContractDetails {
    /// Look up a detail by key
    pub fn get(&self, key: DetailKey) -> Option<&str> {
        let value = match key {
            DetailKey::Fecha => &self.date,
            DetailKey::Objeto => &self.purpose,
            DetailKey::Precio => &self.price,
            DetailKey::CondicionesPago => &self.payment_terms,
            DetailKey::Garantia => &self.warranty,
        };
        value.as_deref()
    }

    /// Iterate over the present details in output order
    ///
    /// # Examples
    ///
    /// ```
    /// use notaria_domain::{ContractDetails, DetailKey};
    ///
    /// let details = ContractDetails {
    ///     price: Some("150000€".to_string()),
    ///     ..Default::default()
    /// };
    /// let present: Vec<_> = details.iter().collect();
    /// assert_eq!(present, vec![(DetailKey::Precio, "150000€")]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (DetailKey, &str)> + '_ {
        DetailKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }

    /// Number of details that were found
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no detail was found
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_details() {
        let details = ContractDetails::default();
        assert!(details.is_empty());
        assert_eq!(details.get(DetailKey::Fecha), None);
    }

    #[test]
    fn test_iter_preserves_output_order() {
        let details = ContractDetails {
            warranty: Some("2 años".to_string()),
            date: Some("1 de enero de 2024".to_string()),
            ..Default::default()
        };
        let keys: Vec<_> = details.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![DetailKey::Fecha, DetailKey::Garantia]);
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_empty_string_is_present() {
        let details = ContractDetails {
            purpose: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(details.get(DetailKey::Objeto), Some(""));
        assert!(!details.is_empty());
    }
}
