use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billing_core::WireTimestamp;

/// Object tag carried by every paylink.
pub const PAYLINK_OBJECT: &str = "paylink";

/// Wire entity: a payment link.
///
/// The statistics fields are maintained by the order pipeline and copied
/// through untouched here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Paylink {
    pub id: String,
    pub object: String,
    pub products: Vec<String>,
    pub expires_at: Option<WireTimestamp>,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
    pub merchant_id: String,
    pub project_id: String,
    pub name: String,
    pub products_type: String,
    pub is_expired: bool,
    pub visits: i32,
    pub no_expiry_date: bool,
    pub total_transactions: i32,
    pub sales_count: i32,
    pub returns_count: i32,
    pub conversion: f64,
    pub gross_sales_amount: f64,
    pub gross_returns_amount: f64,
    pub gross_total_amount: f64,
    pub transactions_currency: String,
    pub deleted: bool,
}

impl Paylink {
    /// Whether the link has expired at `now`.
    ///
    /// Depends only on `expires_at`, `no_expiry_date` and `now`; the
    /// `is_expired` field is never consulted.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.no_expiry_date {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at < WireTimestamp::from(now),
            None => false,
        }
    }

    /// Overwrite `is_expired` with the value derived for `now`.
    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) {
        self.is_expired = self.is_expired_at(now);
    }

    /// Sales net of returns, in `transactions_currency`.
    pub fn net_amount(&self) -> f64 {
        self.gross_sales_amount - self.gross_returns_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn expiring_at(at: DateTime<Utc>) -> Paylink {
        Paylink {
            expires_at: Some(WireTimestamp::from(at)),
            ..Paylink::default()
        }
    }

    #[test]
    fn past_expiry_is_expired() {
        let now = Utc::now();
        assert!(expiring_at(now - Duration::days(1)).is_expired_at(now));
        assert!(!expiring_at(now + Duration::days(1)).is_expired_at(now));
    }

    #[test]
    fn no_expiry_date_never_expires() {
        let now = Utc::now();
        let mut paylink = expiring_at(now - Duration::days(30));
        paylink.no_expiry_date = true;
        assert!(!paylink.is_expired_at(now));
    }

    #[test]
    fn missing_expiry_never_expires() {
        assert!(!Paylink::default().is_expired_at(Utc::now()));
    }

    #[test]
    fn refresh_ignores_stale_flag() {
        let now = Utc::now();
        let mut paylink = expiring_at(now + Duration::hours(1));
        paylink.is_expired = true;
        paylink.refresh_expiry(now);
        assert!(!paylink.is_expired);

        paylink.refresh_expiry(now + Duration::hours(2));
        assert!(paylink.is_expired);
    }

    #[test]
    fn net_amount_subtracts_returns() {
        let paylink = Paylink {
            gross_sales_amount: 120.5,
            gross_returns_amount: 20.0,
            ..Paylink::default()
        };
        assert_eq!(paylink.net_amount(), 100.5);
        assert_eq!(Paylink::default().net_amount(), 0.0);
    }
}
