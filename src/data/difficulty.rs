//! Network difficulty provider.
//!
//! API: `https://blockchain.info/q/getdifficulty`
//! Auth: None required.
//! Response: the current difficulty as a bare number in the body, e.g.
//! `126411437451912.23`.

use crate::types::FetchError;

pub const DIFFICULTY_SOURCE: &str = "blockchain.info";

/// Parse a difficulty body. Must be a finite, strictly positive number.
pub fn parse_difficulty(body: &str) -> Result<f64, FetchError> {
    let raw = body.trim();
    let value: f64 = raw
        .parse()
        .map_err(|e| FetchError::Malformed(format!("difficulty '{raw}': {e}")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(FetchError::Malformed(format!("difficulty out of range: {value}")));
    }
    Ok(value)
}
