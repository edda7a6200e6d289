//! Promotional offers.
//!
//! The backend publishes offer badges; the first active, unexpired one is
//! cached locally as the active offer and discounts every menu price by a
//! percentage until it expires.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use visconti_store::LocalStore;

use crate::error::CommerceError;
use crate::ids::OfferId;
use crate::money::Money;

/// Storage key holding the active offer.
pub const ACTIVE_OFFER_KEY: &str = "activeOffer";

/// An offer badge as served by `GET /api/offer-badges`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferBadge {
    #[serde(rename = "_id")]
    pub id: OfferId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Discount percentage.
    pub discount: f64,
    pub expiry_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OfferBadge {
    /// Active and not yet expired at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expiry_date > now
    }
}

/// The subset of an offer kept in local storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOffer {
    /// Discount percentage.
    pub discount: f64,
    pub expiry_date: DateTime<Utc>,
    pub title: String,
}

impl ActiveOffer {
    /// Discount percentage clamped to `0..=100`. Non-numbers count as no discount.
    pub fn percent(&self) -> f64 {
        if self.discount.is_nan() {
            0.0
        } else {
            self.discount.clamp(0.0, 100.0)
        }
    }

    /// `price - price * discount / 100`, rounded to the cent.
    pub fn apply(&self, price: Money) -> Money {
        let off = price.percentage(self.percent());
        Money::new(price.amount_cents - off.amount_cents, price.currency)
    }

    /// Whether the offer is still running at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date > now
    }

    /// Whole days until expiry, never negative.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        (self.expiry_date - now).num_days().max(0)
    }

    /// Badge text: "3 days left", "1 day left" or "Ends today".
    pub fn expires_label(&self, now: DateTime<Utc>) -> String {
        match self.days_left(now) {
            0 => "Ends today".to_string(),
            1 => "1 day left".to_string(),
            n => format!("{n} days left"),
        }
    }
}

impl From<&OfferBadge> for ActiveOffer {
    fn from(badge: &OfferBadge) -> Self {
        Self {
            discount: badge.discount,
            expiry_date: badge.expiry_date,
            title: badge.title.clone(),
        }
    }
}

/// First badge, in server order, that is active and unexpired at `now`.
pub fn select_active(offers: &[OfferBadge], now: DateTime<Utc>) -> Option<ActiveOffer> {
    offers
        .iter()
        .find(|offer| offer.is_live(now))
        .map(ActiveOffer::from)
}

/// The active offer in local storage.
#[derive(Debug, Clone)]
pub struct OfferCache {
    store: LocalStore,
}

impl OfferCache {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Store `offer` as the active offer.
    pub fn save(&self, offer: &ActiveOffer) -> Result<(), CommerceError> {
        self.store.set(ACTIVE_OFFER_KEY, offer)?;
        tracing::debug!(title = %offer.title, discount = offer.discount, "active offer cached");
        Ok(())
    }

    /// Forget the active offer.
    pub fn clear(&self) -> Result<(), CommerceError> {
        self.store.delete(ACTIVE_OFFER_KEY)?;
        Ok(())
    }

    /// Cached offer regardless of expiry. Unreadable values read as `None`.
    pub fn load(&self) -> Option<ActiveOffer> {
        match self.store.get::<ActiveOffer>(ACTIVE_OFFER_KEY) {
            Ok(offer) => offer,
            Err(e) => {
                tracing::warn!(error = %e, key = ACTIVE_OFFER_KEY, "unreadable offer, ignoring");
                None
            }
        }
    }

    /// Cached offer if it has not expired at `now`.
    pub fn load_valid(&self, now: DateTime<Utc>) -> Option<ActiveOffer> {
        self.load().filter(|offer| offer.is_valid_at(now))
    }
}
