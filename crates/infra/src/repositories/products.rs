use bson::oid::ObjectId;

use billing_core::{ExpectedVersion, id};
use billing_products::{Product, ProductDocument, from_storage, to_storage};

use super::Versioned;
use crate::error::{ServiceError, ServiceResult};
use crate::store::{DocumentStore, StoredDocument};

pub const PRODUCT_COLLECTION: &str = "product";

#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: DocumentStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encode and write a product. A product without an id gets a fresh one.
    pub fn save(&self, product: &Product, expected: ExpectedVersion) -> ServiceResult<Versioned<Product>> {
        let doc = to_storage(product)?;
        let id = doc.id;
        let body = doc.to_bson()?;
        let revision = self.store.save(PRODUCT_COLLECTION, id, body.clone(), expected)?;

        tracing::debug!(product_id = %id, revision, "product saved");
        decode(StoredDocument { id, revision, body })
    }

    pub fn find(&self, product_id: &str) -> ServiceResult<Option<Versioned<Product>>> {
        let oid = id::to_native("id", product_id)?;
        self.store
            .find(PRODUCT_COLLECTION, &oid)?
            .map(decode)
            .transpose()
    }

    pub fn get(&self, product_id: &str) -> ServiceResult<Versioned<Product>> {
        self.find(product_id)?
            .ok_or_else(|| ServiceError::not_found(PRODUCT_COLLECTION, product_id))
    }

    /// Non-deleted products of a project, ordered by sku.
    pub fn list_by_project(&self, project_id: &str) -> ServiceResult<Vec<Product>> {
        let project: ObjectId = id::to_native("project_id", project_id)?;
        let mut products = Vec::new();
        for stored in self.store.list(PRODUCT_COLLECTION)? {
            if stored.body.get_object_id("project_id").ok() != Some(project) {
                continue;
            }
            let doc = ProductDocument::from_bson(stored.body)?;
            if !doc.deleted {
                products.push(from_storage(&doc)?);
            }
        }
        products.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(products)
    }
}

fn decode(stored: StoredDocument) -> ServiceResult<Versioned<Product>> {
    let doc = ProductDocument::from_bson(stored.body)?;
    Ok(Versioned {
        value: from_storage(&doc)?,
        revision: stored.revision,
    })
}
