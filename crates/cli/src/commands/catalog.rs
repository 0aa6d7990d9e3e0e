//! Print the decant table and the product listing.

use core::fmt::Write as _;

use fraghead_core::catalog::listing::{self, ListingFilter};
use fraghead_core::catalog::{CategoryFilter, FilterState, Fragrance, Product, SortKey};
use fraghead_core::{Price, SizeTier};
use fraghead_storefront::catalog::CatalogClient;
use fraghead_storefront::config::CatalogConfig;

use super::CommandError;

/// Print the merged catalog through a sort key and category filter.
///
/// # Errors
///
/// Returns an error if either catalog document cannot be loaded.
pub async fn fragrances(
    config: &CatalogConfig,
    sort: SortKey,
    filter: CategoryFilter,
) -> Result<(), CommandError> {
    let catalog = CatalogClient::new(config).fragrances().await?;
    let rows = FilterState::new(sort, filter).apply(&catalog);

    tracing::info!(
        total = catalog.len(),
        shown = rows.len(),
        sort = %sort,
        filter = %filter,
        "Catalog loaded"
    );

    #[allow(clippy::print_stdout)]
    {
        print!("{}", fragrance_table(&rows));
    }
    Ok(())
}

/// Print the product listing through a search term and category.
///
/// # Errors
///
/// Returns an error if the listing document cannot be loaded.
pub async fn products(
    config: &CatalogConfig,
    search: String,
    category: String,
) -> Result<(), CommandError> {
    let products = CatalogClient::new(config).products().await?;
    let filter = ListingFilter { search, category };
    let matching = filter.apply(&products);

    #[allow(clippy::print_stdout)]
    {
        println!("Categories: {}", listing::categories(&products).join(", "));
        print!("{}", product_table(&matching));
        println!("{}", listing::showing_label(matching.len()));
    }
    Ok(())
}

fn price_or_dash(amount: Option<rust_decimal::Decimal>) -> String {
    amount.map_or_else(|| "-".to_string(), |a| Price::inr(a).to_string())
}

/// Render catalog rows as a fixed-width text table.
fn fragrance_table(rows: &[&Fragrance]) -> String {
    let name_width = rows
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = write!(out, "{:<4} {:<name_width$} {:<10}", "ID", "Name", "Source");
    for tier in SizeTier::ALL {
        let _ = write!(out, " {:>8}", tier.label());
    }
    out.push('\n');

    for item in rows {
        let _ = write!(
            out,
            "{:<4} {:<name_width$} {:<10}",
            item.id.as_i32(),
            item.name,
            item.provenance.as_str()
        );
        for tier in SizeTier::ALL {
            let _ = write!(out, " {:>8}", price_or_dash(item.price(tier)));
        }
        out.push('\n');
    }
    out
}

/// Render listing rows as a fixed-width text table.
fn product_table(products: &[&Product]) -> String {
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:<14} {:>8}  {}",
            product.id.as_i32(),
            product.name,
            product.category,
            Price::inr(product.price).to_string(),
            product.excerpt()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use fraghead_core::FragranceId;
    use fraghead_core::catalog::{FragranceRecord, Provenance};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_fragrance_table_marks_missing_tiers() {
        let item = Fragrance::from_record(
            FragranceRecord {
                id: FragranceId::new(7),
                name: "Vetiver".to_string(),
                category: None,
                description: None,
                ml_30: None,
                ml_20: None,
                ml_10: Some(Decimal::from(450)),
                ml_5: Some(Decimal::from(250)),
            },
            Provenance::Official,
        );

        let table = fragrance_table(&[&item]);
        let mut lines = table.lines();
        let header = lines.next().unwrap_or_default();
        assert!(header.starts_with("ID"));
        assert!(header.contains("30ml"));

        let row = lines.next().unwrap_or_default();
        assert!(row.contains("Vetiver"));
        assert!(row.contains("official"));
        assert!(row.contains("₹450"));
        assert!(row.trim_end().ends_with("₹250"));
        assert_eq!(row.matches(" -").count(), 2);
    }
}
