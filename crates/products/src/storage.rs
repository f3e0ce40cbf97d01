//! Product storage codec.
//!
//! `name` is stored flattened for text search; `description` and
//! `long_description` stay plain maps. Existing collections depend on this
//! asymmetry.

use std::collections::HashMap;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use billing_core::{DomainError, DomainResult, LocalizedText, SearchableText, i18n, id, time};

use crate::product::{Product, ProductPrice};

/// Stored price entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPrice {
    pub currency: String,
    #[serde(default)]
    pub region: String,
    pub amount: f64,
}

/// Stored product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub object: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    pub name: Vec<SearchableText>,
    pub default_currency: String,
    pub enabled: bool,
    pub prices: Vec<StoredPrice>,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub long_description: LocalizedText,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    pub deleted: bool,
    pub merchant_id: ObjectId,
    pub project_id: ObjectId,
}

impl ProductDocument {
    pub fn to_bson(&self) -> DomainResult<bson::Document> {
        billing_core::document::to_bson(self)
    }

    pub fn from_bson(doc: bson::Document) -> DomainResult<Self> {
        billing_core::document::from_bson(doc)
    }
}

/// Round an amount to the two fractional digits kept in storage.
fn normalize_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Encode a product for storage.
///
/// An empty product id is replaced by a fresh one; merchant and project ids
/// are required. Absent timestamps become the current time.
pub fn to_storage(product: &Product) -> DomainResult<ProductDocument> {
    let doc_id = id::to_native_or_new("id", &product.id)?;
    let merchant_id = id::to_native("merchant_id", &product.merchant_id)?;
    let project_id = id::to_native("project_id", &product.project_id)?;

    if !product.has_default_currency_price() {
        return Err(DomainError::validation(format!(
            "product {}: no price in default currency {:?}",
            product.sku, product.default_currency
        )));
    }

    let created_at = time::to_storage_or_now("created_at", product.created_at.as_ref())?;
    let updated_at = time::to_storage_or_now("updated_at", product.updated_at.as_ref())?;

    let prices = product
        .prices
        .iter()
        .map(|p| StoredPrice {
            currency: p.currency.clone(),
            region: p.region.clone(),
            amount: normalize_amount(p.amount),
        })
        .collect();

    Ok(ProductDocument {
        id: doc_id,
        object: product.object.clone(),
        product_type: product.product_type.clone(),
        sku: product.sku.clone(),
        name: i18n::flatten(&product.name),
        default_currency: product.default_currency.clone(),
        enabled: product.enabled,
        prices,
        description: product.description.clone(),
        long_description: product.long_description.clone(),
        created_at,
        updated_at,
        images: product.images.clone(),
        url: product.url.clone(),
        metadata: product.metadata.clone(),
        deleted: product.deleted,
        merchant_id,
        project_id,
    })
}

/// Decode a stored product.
pub fn from_storage(doc: &ProductDocument) -> DomainResult<Product> {
    let created_at = time::from_storage(doc.created_at)?;
    let updated_at = time::from_storage(doc.updated_at)?;

    Ok(Product {
        id: id::to_text(&doc.id),
        object: doc.object.clone(),
        product_type: doc.product_type.clone(),
        sku: doc.sku.clone(),
        name: i18n::unflatten(&doc.name),
        default_currency: doc.default_currency.clone(),
        enabled: doc.enabled,
        prices: doc
            .prices
            .iter()
            .map(|p| ProductPrice {
                currency: p.currency.clone(),
                region: p.region.clone(),
                amount: p.amount,
            })
            .collect(),
        description: doc.description.clone(),
        long_description: doc.long_description.clone(),
        created_at: Some(created_at),
        updated_at: Some(updated_at),
        images: doc.images.clone(),
        url: doc.url.clone(),
        metadata: doc.metadata.clone(),
        deleted: doc.deleted,
        merchant_id: id::to_text(&doc.merchant_id),
        project_id: id::to_text(&doc.project_id),
    })
}
