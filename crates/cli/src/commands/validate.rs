//! Sanity checks for catalog documents.
//!
//! Reports, per document:
//!
//! - ids used more than once within the same source
//! - price fields that are present but zero or negative (shown as unavailable)
//! - fragrances with no size on offer at all
//! - listing products with a non-positive price

use core::fmt;

use fraghead_core::SizeTier;
use fraghead_core::catalog::fragrance::duplicate_ids;
use fraghead_core::catalog::{FragranceRecord, Product, Provenance, merge_sources};
use fraghead_storefront::catalog::{COLLECTION_FILE, DataSource, PRODUCTS_FILE, RESALE_FILE};
use fraghead_storefront::config::CatalogConfig;
use rust_decimal::Decimal;

use super::CommandError;

/// One problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub file: &'static str,
    pub id: i32,
    pub message: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} id {}: {}", self.file, self.id, self.message)
    }
}

/// Load every catalog document and report problems.
///
/// # Errors
///
/// Returns an error if a document cannot be loaded, or
/// [`CommandError::Invalid`] if any problem was found.
pub async fn run(config: &CatalogConfig) -> Result<(), CommandError> {
    let source = DataSource::new(&config.location);

    let (collection, resale, products) = tokio::try_join!(
        source.fetch_json::<Vec<FragranceRecord>>(COLLECTION_FILE),
        source.fetch_json::<Vec<FragranceRecord>>(RESALE_FILE),
        source.fetch_json::<Vec<Product>>(PRODUCTS_FILE),
    )?;

    let mut problems = check_prices(COLLECTION_FILE, &collection);
    problems.extend(check_prices(RESALE_FILE, &resale));
    problems.extend(check_duplicates(collection.clone(), resale.clone()));
    problems.extend(check_products(&products));

    for problem in &problems {
        tracing::warn!("{problem}");
    }

    if problems.is_empty() {
        tracing::info!(
            collection = collection.len(),
            resale = resale.len(),
            products = products.len(),
            "Catalog documents are valid"
        );
        Ok(())
    } else {
        Err(CommandError::Invalid(problems.len()))
    }
}

fn tier_fields(record: &FragranceRecord) -> [(SizeTier, Option<Decimal>); 4] {
    [
        (SizeTier::Ml30, record.ml_30),
        (SizeTier::Ml20, record.ml_20),
        (SizeTier::Ml10, record.ml_10),
        (SizeTier::Ml5, record.ml_5),
    ]
}

fn check_prices(file: &'static str, records: &[FragranceRecord]) -> Vec<Problem> {
    let mut problems = Vec::new();
    for record in records {
        let fields = tier_fields(record);
        for (tier, amount) in fields {
            if let Some(amount) = amount.filter(|a| *a <= Decimal::ZERO) {
                problems.push(Problem {
                    file,
                    id: record.id.as_i32(),
                    message: format!("{} price {amount} is not positive", tier.field_name()),
                });
            }
        }
        if fields
            .iter()
            .all(|(_, amount)| amount.is_none_or(|a| a <= Decimal::ZERO))
        {
            problems.push(Problem {
                file,
                id: record.id.as_i32(),
                message: format!("{} has no size on offer", record.name),
            });
        }
    }
    problems
}

fn check_duplicates(collection: Vec<FragranceRecord>, resale: Vec<FragranceRecord>) -> Vec<Problem> {
    duplicate_ids(&merge_sources(collection, resale))
        .into_iter()
        .map(|(provenance, id)| Problem {
            file: match provenance {
                Provenance::Collection => COLLECTION_FILE,
                Provenance::Official => RESALE_FILE,
            },
            id: id.as_i32(),
            message: "id is used more than once".to_string(),
        })
        .collect()
}

fn check_products(products: &[Product]) -> Vec<Problem> {
    let mut problems = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for product in products {
        if !seen.insert(product.id) {
            problems.push(Problem {
                file: PRODUCTS_FILE,
                id: product.id.as_i32(),
                message: "id is used more than once".to_string(),
            });
        }
        if product.price <= Decimal::ZERO {
            problems.push(Problem {
                file: PRODUCTS_FILE,
                id: product.id.as_i32(),
                message: format!("price {} is not positive", product.price),
            });
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use fraghead_core::{FragranceId, ProductId};

    use super::*;

    fn record(id: i32, ml_5: Option<i64>, ml_30: Option<i64>) -> FragranceRecord {
        FragranceRecord {
            id: FragranceId::new(id),
            name: format!("Fragrance {id}"),
            category: None,
            description: None,
            ml_30: ml_30.map(Decimal::from),
            ml_20: None,
            ml_10: None,
            ml_5: ml_5.map(Decimal::from),
        }
    }

    #[test]
    fn test_clean_records_have_no_problems() {
        let records = [record(1, Some(200), Some(1000)), record(2, Some(150), None)];
        assert!(check_prices(COLLECTION_FILE, &records).is_empty());
        assert!(check_duplicates(records.to_vec(), vec![record(1, Some(300), None)]).is_empty());
    }

    #[test]
    fn test_non_positive_prices_are_reported() {
        let problems = check_prices(RESALE_FILE, &[record(4, Some(0), Some(-5))]);

        let messages: Vec<_> = problems.iter().map(|p| p.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "ml_30 price -5 is not positive",
                "ml_5 price 0 is not positive",
                "Fragrance 4 has no size on offer",
            ]
        );
        assert_eq!(problems[0].to_string(), "resale-samples.json id 4: ml_30 price -5 is not positive");
    }

    #[test]
    fn test_duplicate_ids_within_a_source() {
        let problems = check_duplicates(
            vec![record(1, Some(200), None), record(1, Some(250), None)],
            Vec::new(),
        );
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].file, COLLECTION_FILE);
        assert_eq!(problems[0].id, 1);
    }

    #[test]
    fn test_product_checks() {
        let product = |id, price| Product {
            id: ProductId::new(id),
            name: "Set".to_string(),
            category: "Sets".to_string(),
            price: Decimal::from(price),
            description: String::new(),
            image: None,
        };

        let problems = check_products(&[product(1, 100), product(1, 0)]);
        assert_eq!(problems.len(), 2);
    }
}
