//! Home page: the decant price table.
//!
//! Renders the merged catalog through the visitor's sort/filter selection and
//! column toggles, next to the cart panel. A catalog that fails to load shows
//! as an empty table.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use fraghead_core::catalog::{CategoryFilter, ColumnVisibility, FilterState, Fragrance, SortKey};
use fraghead_core::{Price, SizeTier};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use crate::error::Result;
use crate::filters;
use crate::models::session;
use crate::state::AppState;

/// Sort/filter selection from the query string.
///
/// Unknown values are ignored and the stored selection is kept.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub sort: Option<String>,
    pub filter: Option<String>,
}

/// An `<option>` in a select control.
#[derive(Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// A price-tier column: its header and whether it is shown.
#[derive(Clone)]
pub struct ColumnView {
    pub size: &'static str,
    pub visible: bool,
}

/// One cell of the price table.
#[derive(Clone)]
pub struct PriceCell {
    pub size: &'static str,
    /// Formatted price, or `None` when the size is not offered.
    pub price: Option<String>,
}

/// One row of the price table.
#[derive(Clone)]
pub struct FragranceRow {
    pub id: i32,
    pub provenance: &'static str,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub official_vial: bool,
    /// Cells for the visible columns only, in table order.
    pub cells: Vec<PriceCell>,
}

impl FragranceRow {
    fn new(item: &Fragrance, columns: &ColumnVisibility) -> Self {
        Self {
            id: item.id.as_i32(),
            provenance: item.provenance.as_str(),
            name: item.name.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            official_vial: item.is_official_vial(),
            cells: columns
                .visible_tiers()
                .map(|tier| PriceCell {
                    size: tier.label(),
                    price: item.price(tier).map(|amount| Price::inr(amount).to_string()),
                })
                .collect(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub rows: Vec<FragranceRow>,
    pub columns: Vec<ColumnView>,
    pub visible_columns: usize,
    pub sort_options: Vec<OptionView>,
    pub filter_options: Vec<OptionView>,
    pub cart: CartView,
    /// Chat link for questions, without a pre-filled order.
    pub contact_url: String,
}

/// Merge the query string into the stored selection.
fn apply_query(mut state: FilterState, query: &HomeQuery) -> FilterState {
    if let Some(raw) = query.sort.as_deref() {
        match raw.parse::<SortKey>() {
            Ok(sort) => state.sort = sort,
            Err(e) => tracing::debug!("Ignoring sort: {e}"),
        }
    }
    if let Some(raw) = query.filter.as_deref() {
        match raw.parse::<CategoryFilter>() {
            Ok(filter) => state.filter = filter,
            Err(e) => tracing::debug!("Ignoring filter: {e}"),
        }
    }
    state
}

fn sort_options(selected: SortKey) -> Vec<OptionView> {
    SortKey::ALL
        .into_iter()
        .map(|key| OptionView {
            value: key.as_str(),
            label: key.label(),
            selected: key == selected,
        })
        .collect()
}

fn filter_options(selected: CategoryFilter) -> Vec<OptionView> {
    CategoryFilter::ALL
        .into_iter()
        .map(|filter| OptionView {
            value: filter.as_str(),
            label: filter.label(),
            selected: filter == selected,
        })
        .collect()
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let stored = session::filters(&session).await?;
    let selection = apply_query(stored, &query);
    if selection != stored {
        session::set_filters(&session, &selection).await?;
    }

    let columns = session::columns(&session).await?;
    let cart = session::cart(&session).await?;

    let rows = match state.catalog().fragrances().await {
        Ok(catalog) => selection
            .apply(&catalog)
            .into_iter()
            .map(|item| FragranceRow::new(item, &columns))
            .collect(),
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            Vec::new()
        }
    };

    Ok(HomeTemplate {
        rows,
        columns: SizeTier::ALL
            .into_iter()
            .map(|tier| ColumnView {
                size: tier.label(),
                visible: columns.is_visible(tier),
            })
            .collect(),
        visible_columns: columns.visible_tiers().count(),
        sort_options: sort_options(selection.sort),
        filter_options: filter_options(selection.filter),
        cart: CartView::from(&cart),
        contact_url: format!(
            "{}{}",
            state.config().checkout.messaging_base,
            state.config().checkout.destination
        ),
    })
}

#[cfg(test)]
mod tests {
    use fraghead_core::FragranceId;
    use fraghead_core::catalog::{FragranceRecord, Provenance};
    use rust_decimal::Decimal;

    use super::*;

    fn query(sort: Option<&str>, filter: Option<&str>) -> HomeQuery {
        HomeQuery {
            sort: sort.map(String::from),
            filter: filter.map(String::from),
        }
    }

    #[test]
    fn test_query_overrides_stored_selection() {
        let stored = FilterState::new(SortKey::Name, CategoryFilter::All);
        let selection = apply_query(stored, &query(Some("price-high"), Some("official")));
        assert_eq!(
            selection,
            FilterState::new(SortKey::PriceHigh, CategoryFilter::Official)
        );
    }

    #[test]
    fn test_unknown_query_values_keep_stored_selection() {
        let stored = FilterState::new(SortKey::PriceLow, CategoryFilter::Collection);
        assert_eq!(apply_query(stored, &query(Some("newest"), Some("sale"))), stored);
        assert_eq!(apply_query(stored, &query(None, None)), stored);
    }

    #[test]
    fn test_row_cells_follow_visible_columns() {
        let item = Fragrance::from_record(
            FragranceRecord {
                id: FragranceId::new(1),
                name: "Rose".to_string(),
                category: None,
                description: None,
                ml_30: Some(Decimal::from(1000)),
                ml_20: None,
                ml_10: None,
                ml_5: Some(Decimal::from(200)),
            },
            Provenance::Collection,
        );
        let mut columns = ColumnVisibility::default();
        columns.toggle(SizeTier::Ml10);

        let row = FragranceRow::new(&item, &columns);
        let sizes: Vec<_> = row.cells.iter().map(|c| c.size).collect();
        assert_eq!(sizes, ["30ml", "20ml", "5ml"]);
        assert_eq!(row.cells[0].price.as_deref(), Some("₹1000"));
        assert_eq!(row.cells[1].price, None);
        assert_eq!(row.cells[2].price.as_deref(), Some("₹200"));
    }

    #[test]
    fn test_options_mark_selection() {
        let options = sort_options(SortKey::PriceLow);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, ["price-low"]);
        assert_eq!(filter_options(CategoryFilter::All).len(), 3);
    }
}
