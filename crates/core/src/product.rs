//! Products, production lines and package sizes, plus the per-report
//! [`Catalog`] used to resolve event references into display values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::facility::Facility;
use crate::locale::Locale;
use crate::types::DbId;

/// One translation of a user-entered name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedValue {
    /// ISO 639-1 code (`en`, `fi`).
    pub language: String,
    pub value: String,
}

impl LocalizedValue {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// Pick the translation for `locale`, falling back to the first entry and
/// then to an empty string.
pub fn localized(values: &[LocalizedValue], locale: Locale) -> &str {
    values
        .iter()
        .find(|v| v.language.eq_ignore_ascii_case(locale.code()))
        .or_else(|| values.first())
        .map(|v| v.value.as_str())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub facility: Facility,
    pub name: Vec<LocalizedValue>,
    pub is_raw_material: bool,
    pub is_end_product: bool,
    pub is_active: bool,
}

impl Product {
    pub fn display_name(&self, locale: Locale) -> &str {
        localized(&self.name, locale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: DbId,
    pub facility: Facility,
    pub line_number: String,
    pub default_gutter_hole_count: Option<i32>,
}

/// A sellable package. `size` is the number of bags one package holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSize {
    pub id: DbId,
    pub name: String,
    pub size: i32,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Products and production lines of one facility, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<DbId, Product>,
    lines: HashMap<DbId, ProductionLine>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, lines: Vec<ProductionLine>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            lines: lines.into_iter().map(|l| (l.id, l)).collect(),
        }
    }

    pub fn product(&self, id: DbId) -> Result<&Product, CoreError> {
        self.products.get(&id).ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })
    }

    pub fn product_name(&self, id: DbId, locale: Locale) -> Result<&str, CoreError> {
        Ok(self.product(id)?.display_name(locale))
    }

    pub fn line(&self, id: DbId) -> Result<&ProductionLine, CoreError> {
        self.lines.get(&id).ok_or(CoreError::NotFound {
            entity: "ProductionLine",
            id,
        })
    }

    pub fn line_number(&self, id: DbId) -> Result<&str, CoreError> {
        Ok(self.line(id)?.line_number.as_str())
    }

    /// Order product ids by localized name, ties broken by id.
    pub fn sort_by_name(&self, ids: &mut [DbId], locale: Locale) {
        ids.sort_by(|a, b| {
            let name_a = self.products.get(a).map(|p| p.display_name(locale));
            let name_b = self.products.get(b).map(|p| p.display_name(locale));
            name_a.cmp(&name_b).then(a.cmp(b))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn product(id: DbId, en: &str, fi: &str) -> Product {
        Product {
            id,
            facility: Facility::Juva,
            name: vec![LocalizedValue::new("en", en), LocalizedValue::new("fi", fi)],
            is_raw_material: false,
            is_end_product: true,
            is_active: true,
        }
    }

    #[test]
    fn localized_falls_back_to_first_entry() {
        let values = vec![LocalizedValue::new("fi", "Salaatti")];
        assert_eq!(localized(&values, Locale::En), "Salaatti");
        assert_eq!(localized(&[], Locale::En), "");
    }

    #[test]
    fn catalog_reports_missing_product() {
        let catalog = Catalog::new(vec![product(1, "Lettuce", "Salaatti")], vec![]);
        assert_eq!(catalog.product_name(1, Locale::Fi).unwrap(), "Salaatti");
        assert_matches!(
            catalog.product_name(2, Locale::En),
            Err(CoreError::NotFound { entity: "Product", id: 2 })
        );
        assert_matches!(catalog.line_number(7), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn sorts_ids_by_localized_name() {
        let catalog = Catalog::new(
            vec![product(1, "Rucola", "Rucola"), product(2, "Basil", "Basilika")],
            vec![],
        );
        let mut ids = vec![1, 2];
        catalog.sort_by_name(&mut ids, Locale::En);
        assert_eq!(ids, vec![2, 1]);
    }
}
