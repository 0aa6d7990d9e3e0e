//! Product listing and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fraghead_core::catalog::listing::{self, ALL_CATEGORIES};
use fraghead_core::catalog::{ListingFilter, Product};
use fraghead_core::{Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductsQuery {
    fn into_filter(self) -> ListingFilter {
        ListingFilter {
            search: self.q.map(|q| q.trim().to_string()).unwrap_or_default(),
            category: self
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        }
    }
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub excerpt: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: Price::inr(product.price).to_string(),
            description: product.description.clone(),
            excerpt: product.excerpt(),
            image: product.image.clone(),
        }
    }
}

/// A category `<option>`.
#[derive(Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub showing: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Product not found template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub id: String,
}

/// Display the product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> ProductsIndexTemplate {
    let filter = query.into_filter();

    let products = match state.catalog().products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to load products: {e}");
            std::sync::Arc::default()
        }
    };

    let matching: Vec<ProductView> = filter
        .apply(&products)
        .into_iter()
        .map(ProductView::from)
        .collect();

    ProductsIndexTemplate {
        showing: listing::showing_label(matching.len()),
        products: matching,
        categories: listing::categories(&products)
            .into_iter()
            .map(|name| CategoryOption {
                selected: name == filter.category,
                name,
            })
            .collect(),
        search: filter.search,
    }
}

/// Display a product detail page.
///
/// Unknown ids, non-numeric ids and load failures all render the not-found
/// view with a 404.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let product = match id.parse::<ProductId>() {
        Ok(product_id) => match state.catalog().product(product_id).await {
            Ok(product) => product,
            Err(e) => {
                tracing::error!("Failed to load product {product_id}: {e}");
                None
            }
        },
        Err(_) => None,
    };

    match product {
        Some(product) => ProductShowTemplate {
            product: ProductView::from(&product),
        }
        .into_response(),
        None => (StatusCode::NOT_FOUND, ProductNotFoundTemplate { id }).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_to_all_categories() {
        let filter = ProductsQuery::default().into_filter();
        assert_eq!(filter, ListingFilter::default());

        let filter = ProductsQuery {
            q: Some("  oud ".to_string()),
            category: Some(String::new()),
        }
        .into_filter();
        assert_eq!(filter.search, "oud");
        assert_eq!(filter.category, ALL_CATEGORIES);
    }
}
