//! Refreshing the cached active offer.

use chrono::{DateTime, Utc};
use visconti_commerce::offer::{select_active, ActiveOffer, OfferCache};

use crate::client::{FetchError, MenuSource};

/// Fetch offers and cache the first one running at `now`.
///
/// When no offer qualifies the cached offer is removed. A failed fetch leaves
/// the cache as it was. Storage write failures are logged and do not fail the
/// refresh.
pub async fn refresh_active_offer<S>(
    source: &S,
    cache: &OfferCache,
    now: DateTime<Utc>,
) -> Result<Option<ActiveOffer>, FetchError>
where
    S: MenuSource + ?Sized,
{
    let offers = source.fetch_offers().await?;
    let active = select_active(&offers, now);

    let stored = match &active {
        Some(offer) => cache.save(offer),
        None => cache.clear(),
    };
    if let Err(e) = stored {
        tracing::warn!(error = %e, "could not update cached offer");
    }

    match &active {
        Some(offer) => tracing::info!(title = %offer.title, discount = offer.discount, "Active offer found"),
        None => tracing::info!(offers = offers.len(), "No active offer"),
    }
    Ok(active)
}
