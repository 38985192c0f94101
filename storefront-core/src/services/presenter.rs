//! Listing presentation: headings, status texts, cards

use std::fmt;

use serde::Serialize;
use storefront_api::{Category, PageIndex, Product};

use crate::pagination::PaginationBar;
use crate::services::query_state::CATEGORY_NAME_PARAM;
use crate::types::{ListingItem, ListingKind, Location, Route, ViewState};

/// 商品价格缺失时的展示文本
const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Where a product image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "camelCase")]
pub enum ImageSource {
    /// No image; render the built-in placeholder.
    Placeholder,
    Url(String),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "(no image)"),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Resolve a product's raw image URL against the asset origin.
pub fn resolve_image_url(raw: Option<&str>, asset_origin: &str) -> ImageSource {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return ImageSource::Placeholder;
    };
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return ImageSource::Url(raw.to_string());
    }
    let origin = asset_origin.trim_end_matches('/');
    let sep = if raw.starts_with('/') { "" } else { "/" };
    ImageSource::Url(format!("{origin}{sep}{raw}"))
}

/// `₹` with Indian digit grouping (`1,23,45,678`), at most two decimals.
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite()) else {
        return PRICE_UNAVAILABLE.to_string();
    };

    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let sign = if price < 0.0 && fixed != "0.00" { "-" } else { "" };

    let grouped = group_indian(int_part);
    if frac.is_empty() {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{frac}")
    }
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub image: ImageSource,
    pub category: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product, asset_origin: &str) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            image: resolve_image_url(product.image_url.as_deref(), asset_origin),
            category: product.category_label().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Where clicking the card navigates.
    pub link: Location,
}

impl CategoryCard {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            link: Route::CategoryProducts {
                category_id: category.id.clone(),
            }
            .location()
            .with(CATEGORY_NAME_PARAM, category.name.clone()),
        }
    }
}

/// What the body of a listing screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PageStatus {
    Loading {
        message: String,
    },
    Failed {
        message: String,
    },
    Empty {
        message: String,
    },
    Categories {
        cards: Vec<CategoryCard>,
        pagination: PaginationBar,
    },
    Products {
        cards: Vec<ProductCard>,
        total_elements: u64,
        pagination: PaginationBar,
    },
}

/// A listing screen ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub heading: String,
    pub subtitle: Option<String>,
    /// `Categories > {name}` trail on category screens.
    pub breadcrumb: Vec<String>,
    pub status: PageStatus,
}

impl ListingPage {
    pub fn project(
        kind: &ListingKind,
        state: &ViewState,
        current: PageIndex,
        asset_origin: &str,
    ) -> Self {
        let status = match state {
            ViewState::Loading => PageStatus::Loading {
                message: loading_message(kind).to_string(),
            },
            ViewState::Failed { message } => PageStatus::Failed {
                message: message.clone(),
            },
            ViewState::Ready { result } if result.is_empty() => PageStatus::Empty {
                message: empty_message(kind),
            },
            ViewState::Ready { result } => {
                let pagination = PaginationBar::new(current, result.total_pages);
                if matches!(kind, ListingKind::Categories) {
                    PageStatus::Categories {
                        cards: result
                            .items
                            .iter()
                            .filter_map(|item| match item {
                                ListingItem::Category(c) => Some(CategoryCard::from_category(c)),
                                ListingItem::Product(_) => None,
                            })
                            .collect(),
                        pagination,
                    }
                } else {
                    PageStatus::Products {
                        cards: result
                            .items
                            .iter()
                            .filter_map(|item| match item {
                                ListingItem::Product(p) => {
                                    Some(ProductCard::from_product(p, asset_origin))
                                }
                                ListingItem::Category(_) => None,
                            })
                            .collect(),
                        total_elements: result.total_elements,
                        pagination,
                    }
                }
            }
        };

        Self {
            heading: heading(kind),
            subtitle: matches!(kind, ListingKind::Categories)
                .then(|| "Choose a category to explore products".to_string()),
            breadcrumb: match kind {
                ListingKind::CategoryProducts { name, .. } => {
                    vec!["Categories".to_string(), name.clone()]
                }
                _ => Vec::new(),
            },
            status,
        }
    }
}

fn heading(kind: &ListingKind) -> String {
    match kind {
        ListingKind::Categories => "Shop by Category".to_string(),
        ListingKind::AllProducts => "All Products".to_string(),
        ListingKind::Search { keyword } => format!("Results for \"{keyword}\""),
        ListingKind::CategoryProducts { name, .. } => name.clone(),
    }
}

fn loading_message(kind: &ListingKind) -> &'static str {
    match kind {
        ListingKind::Categories => "Loading categories...",
        ListingKind::Search { .. } => "Searching...",
        ListingKind::AllProducts | ListingKind::CategoryProducts { .. } => "Loading products...",
    }
}

fn empty_message(kind: &ListingKind) -> String {
    match kind {
        ListingKind::Categories => "No categories found.".to_string(),
        ListingKind::AllProducts => "No products found.".to_string(),
        ListingKind::Search { keyword } => format!("No products found for \"{keyword}\"."),
        ListingKind::CategoryProducts { .. } => "No products found in this category.".to_string(),
    }
}

impl fmt::Display for ListingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.breadcrumb.is_empty() {
            writeln!(f, "{}", self.breadcrumb.join(" › "))?;
        }
        writeln!(f, "{}", self.heading)?;
        if let Some(subtitle) = &self.subtitle {
            writeln!(f, "{subtitle}")?;
        }
        writeln!(f)?;

        match &self.status {
            PageStatus::Loading { message }
            | PageStatus::Failed { message }
            | PageStatus::Empty { message } => writeln!(f, "{message}"),
            PageStatus::Categories { cards, pagination } => {
                for card in cards {
                    writeln!(f, "  [{}] {}  -> {}", card.id, card.name, card.link)?;
                    if let Some(desc) = &card.description {
                        writeln!(f, "      {desc}")?;
                    }
                }
                write_pagination(f, pagination)
            }
            PageStatus::Products {
                cards,
                total_elements,
                pagination,
            } => {
                for card in cards {
                    write!(f, "  [{}] {}  {}", card.id, card.name, card.price)?;
                    if let Some(category) = &card.category {
                        write!(f, "  ({category})")?;
                    }
                    writeln!(f)?;
                    writeln!(f, "      {}", card.image)?;
                }
                writeln!(f, "\n{total_elements} products")?;
                write_pagination(f, pagination)
            }
        }
    }
}

fn write_pagination(f: &mut fmt::Formatter<'_>, pagination: &PaginationBar) -> fmt::Result {
    if pagination.is_empty() {
        Ok(())
    } else {
        writeln!(f, "\n{pagination}")
    }
}
