/**
 * Fan-out
 *
 * Routes a payload to the current connection of one or more users. A push
 * is a best-effort hint: the persisted document is the durable record, so
 * callers always persist first and push second, and an offline target is
 * not an error.
 */

use super::presence::PresenceRegistry;
use crate::shared::Outbound;

/// Push `payload` to `email` if that user is connected
///
/// # Returns
///
/// Whether the payload was queued on a live connection
pub async fn push_to(presence: &PresenceRegistry, email: &str, payload: impl Into<Outbound>) -> bool {
    let payload = payload.into();
    let kind = payload.describe();
    let delivered = presence.push(email, payload).await;
    if delivered {
        tracing::debug!("[FanOut] {} -> {}", kind, email);
    } else {
        tracing::trace!("[FanOut] {} -> {} skipped (offline)", kind, email);
    }
    delivered
}

/// Push one payload per recipient
///
/// # Arguments
///
/// * `presence` - Registry to route through
/// * `deliveries` - `(email, payload)` pairs, pushed in order
///
/// # Returns
///
/// Number of payloads queued on live connections
pub async fn push_to_many<I, P>(presence: &PresenceRegistry, deliveries: I) -> usize
where
    I: IntoIterator<Item = (String, P)>,
    P: Into<Outbound>,
{
    let mut delivered = 0;
    for (email, payload) in deliveries {
        if push_to(presence, &email, payload).await {
            delivered += 1;
        }
    }
    delivered
}
