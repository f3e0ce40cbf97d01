//! Paylink storage codec.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billing_core::{DomainResult, id, time};

use crate::paylink::Paylink;

/// Stored paylink document.
///
/// `is_expired` is persisted for queries but is advisory: decoding always
/// recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaylinkDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub object: String,
    pub products: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
    pub merchant_id: ObjectId,
    pub project_id: ObjectId,
    pub name: String,
    pub products_type: String,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub visits: i32,
    #[serde(default)]
    pub no_expiry_date: bool,
    #[serde(default)]
    pub total_transactions: i32,
    #[serde(default)]
    pub sales_count: i32,
    #[serde(default)]
    pub returns_count: i32,
    #[serde(default)]
    pub conversion: f64,
    #[serde(default)]
    pub gross_sales_amount: f64,
    #[serde(default)]
    pub gross_returns_amount: f64,
    #[serde(default)]
    pub gross_total_amount: f64,
    #[serde(default)]
    pub transactions_currency: String,
    #[serde(default)]
    pub deleted: bool,
}

impl PaylinkDocument {
    pub fn to_bson(&self) -> DomainResult<bson::Document> {
        billing_core::document::to_bson(self)
    }

    pub fn from_bson(doc: bson::Document) -> DomainResult<Self> {
        billing_core::document::from_bson(doc)
    }
}

/// Encode a paylink for storage.
///
/// `expires_at` is written only for links with a finite expiry.
pub fn to_storage(paylink: &Paylink) -> DomainResult<PaylinkDocument> {
    let doc_id = id::to_native_or_new("id", &paylink.id)?;
    let merchant_id = id::to_native("merchant_id", &paylink.merchant_id)?;
    let project_id = id::to_native("project_id", &paylink.project_id)?;
    let products = id::to_native_all("products", &paylink.products)?;

    let expires_at = match (&paylink.expires_at, paylink.no_expiry_date) {
        (Some(ts), false) => Some(time::to_storage(ts)?),
        _ => None,
    };
    let created_at = time::to_storage_or_now("created_at", paylink.created_at.as_ref())?;
    let updated_at = time::to_storage_or_now("updated_at", paylink.updated_at.as_ref())?;

    Ok(PaylinkDocument {
        id: doc_id,
        object: paylink.object.clone(),
        products,
        expires_at,
        created_at,
        updated_at,
        merchant_id,
        project_id,
        name: paylink.name.clone(),
        products_type: paylink.products_type.clone(),
        is_expired: paylink.is_expired,
        visits: paylink.visits,
        no_expiry_date: paylink.no_expiry_date,
        total_transactions: paylink.total_transactions,
        sales_count: paylink.sales_count,
        returns_count: paylink.returns_count,
        conversion: paylink.conversion,
        gross_sales_amount: paylink.gross_sales_amount,
        gross_returns_amount: paylink.gross_returns_amount,
        gross_total_amount: paylink.gross_total_amount,
        transactions_currency: paylink.transactions_currency.clone(),
        deleted: paylink.deleted,
    })
}

/// Decode a stored paylink, deriving `is_expired` for `now`.
pub fn from_storage(doc: &PaylinkDocument, now: DateTime<Utc>) -> DomainResult<Paylink> {
    let expires_at = match doc.expires_at {
        Some(dt) if !doc.no_expiry_date => Some(time::from_storage(dt)?),
        _ => None,
    };
    let created_at = time::from_storage(doc.created_at)?;
    let updated_at = time::from_storage(doc.updated_at)?;

    let mut paylink = Paylink {
        id: id::to_text(&doc.id),
        object: doc.object.clone(),
        products: doc.products.iter().map(id::to_text).collect(),
        expires_at,
        created_at: Some(created_at),
        updated_at: Some(updated_at),
        merchant_id: id::to_text(&doc.merchant_id),
        project_id: id::to_text(&doc.project_id),
        name: doc.name.clone(),
        products_type: doc.products_type.clone(),
        is_expired: false,
        visits: doc.visits,
        no_expiry_date: doc.no_expiry_date,
        total_transactions: doc.total_transactions,
        sales_count: doc.sales_count,
        returns_count: doc.returns_count,
        conversion: doc.conversion,
        gross_sales_amount: doc.gross_sales_amount,
        gross_returns_amount: doc.gross_returns_amount,
        gross_total_amount: doc.gross_total_amount,
        transactions_currency: doc.transactions_currency.clone(),
        deleted: doc.deleted,
    };
    paylink.refresh_expiry(now);

    if paylink.is_expired != doc.is_expired {
        tracing::warn!(
            paylink_id = %paylink.id,
            stored = doc.is_expired,
            derived = paylink.is_expired,
            "stored is_expired is stale"
        );
    }

    Ok(paylink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::{DomainError, WireTimestamp};
    use chrono::Duration;

    use crate::paylink::PAYLINK_OBJECT;

    fn test_paylink(now: DateTime<Utc>) -> Paylink {
        Paylink {
            id: "5dbae5d0aa0d2f0001f39b1e".to_string(),
            object: PAYLINK_OBJECT.to_string(),
            products: vec![
                "5be2e16701d96d00012d26c5".to_string(),
                "5be2e16701d96d00012d26c6".to_string(),
            ],
            expires_at: Some(WireTimestamp::new(now.timestamp() + 86_400, 0)),
            created_at: Some(WireTimestamp::new(1_572_000_000, 0)),
            updated_at: Some(WireTimestamp::new(1_572_000_100, 0)),
            merchant_id: "5be2e16701d96d00012d26c3".to_string(),
            project_id: "5be2e16701d96d00012d26c4".to_string(),
            name: "Winter sale".to_string(),
            products_type: "product".to_string(),
            is_expired: false,
            visits: 100,
            no_expiry_date: false,
            total_transactions: 12,
            sales_count: 10,
            returns_count: 2,
            conversion: 0.1,
            gross_sales_amount: 120.5,
            gross_returns_amount: 20.0,
            gross_total_amount: 100.5,
            transactions_currency: "USD".to_string(),
            deleted: false,
        }
    }

    #[test]
    fn round_trip_reproduces_paylink() {
        let now = Utc::now();
        let paylink = test_paylink(now);
        let decoded = from_storage(&to_storage(&paylink).unwrap(), now).unwrap();
        assert_eq!(decoded, paylink);
    }

    #[test]
    fn stored_is_expired_is_never_trusted() {
        let now = Utc::now();
        let mut paylink = test_paylink(now);
        paylink.expires_at = Some(WireTimestamp::from(now - Duration::days(1)));
        paylink.is_expired = false;

        let doc = to_storage(&paylink).unwrap();
        assert!(!doc.is_expired);

        let decoded = from_storage(&doc, now).unwrap();
        assert!(decoded.is_expired);
    }

    #[test]
    fn stored_expired_flag_is_cleared_for_live_links() {
        let now = Utc::now();
        let mut doc = to_storage(&test_paylink(now)).unwrap();
        doc.is_expired = true;
        assert!(!from_storage(&doc, now).unwrap().is_expired);
    }

    #[test]
    fn no_expiry_date_omits_expires_at() {
        let now = Utc::now();
        let mut paylink = test_paylink(now);
        paylink.no_expiry_date = true;

        let raw = to_storage(&paylink).unwrap().to_bson().unwrap();
        assert!(!raw.contains_key("expires_at"));
        assert!(raw.get_bool("no_expiry_date").unwrap());

        let doc = PaylinkDocument::from_bson(raw).unwrap();
        let decoded = from_storage(&doc, now).unwrap();
        assert_eq!(decoded.expires_at, None);
        assert!(!decoded.is_expired);
    }

    #[test]
    fn malformed_product_id_fails_whole_encode() {
        let mut paylink = test_paylink(Utc::now());
        paylink.products.push("not-a-product".to_string());
        assert!(matches!(to_storage(&paylink), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn empty_project_id_is_rejected() {
        let mut paylink = test_paylink(Utc::now());
        paylink.project_id.clear();
        assert!(matches!(to_storage(&paylink), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn product_order_is_preserved() {
        let now = Utc::now();
        let mut paylink = test_paylink(now);
        paylink.products.reverse();
        let decoded = from_storage(&to_storage(&paylink).unwrap(), now).unwrap();
        assert_eq!(decoded.products, paylink.products);
    }

    #[test]
    fn unset_timestamps_default_to_now() {
        let now = Utc::now();
        let mut paylink = test_paylink(now);
        paylink.id.clear();
        paylink.created_at = None;
        paylink.updated_at = None;

        let before = Utc::now().timestamp_millis();
        let doc = to_storage(&paylink).unwrap();
        let after = Utc::now().timestamp_millis();

        for stamp in [doc.created_at, doc.updated_at] {
            assert!((before..=after).contains(&stamp.timestamp_millis()));
        }

        let decoded = from_storage(&doc, now).unwrap();
        for stamp in [decoded.created_at, decoded.updated_at] {
            let stamp = stamp.unwrap();
            let millis = stamp.seconds * 1_000 + i64::from(stamp.nanos / 1_000_000);
            assert!((before..=after).contains(&millis));
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: decoded expiry depends only on (expires_at, no_expiry_date, now).
            #[test]
            fn decoded_expiry_matches_rule(
                offset_secs in -1_000_000i64..1_000_000,
                no_expiry_date: bool,
                stored_flag: bool,
            ) {
                let now = Utc::now();
                let mut paylink = test_paylink(now);
                paylink.expires_at = Some(WireTimestamp::new(now.timestamp() + offset_secs, 0));
                paylink.no_expiry_date = no_expiry_date;
                paylink.is_expired = stored_flag;

                let decoded = from_storage(&to_storage(&paylink).unwrap(), now).unwrap();
                prop_assert_eq!(decoded.is_expired, paylink.is_expired_at(now));
            }
        }
    }
}
