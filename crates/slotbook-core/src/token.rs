//! Share-token issuance and rotation.
//!
//! A share token is the only credential gating the public booking page: an
//! opaque, unguessable 12-character identifier from a URL-safe alphabet.
//! Rotation swaps the calendar's token in place; the old token stops
//! resolving immediately, with no grace period.

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::model::Calendar;
use crate::store::Store;

/// Token length in characters.
pub const TOKEN_LEN: usize = 12;

/// URL-safe token alphabet: 64 symbols, so each character carries 6 bits.
const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a fresh random share token.
pub fn issue_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Replace the calendar's share token. All subsequent availability and
/// booking operations through the old token fail to resolve a calendar.
pub fn rotate_token(store: &Store, calendar_id: &str) -> Result<Calendar> {
    let token = issue_token();
    let calendar = store.update_calendar(calendar_id, |calendar| {
        calendar.share_token = token;
    })?;
    info!(calendar = %calendar.id, "share token rotated");
    Ok(calendar)
}
