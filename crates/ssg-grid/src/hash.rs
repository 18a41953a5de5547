use serde::Serialize;
use sha2::{Digest, Sha256};
use ssg_core::SsgError;

use crate::config::QuantizationConfig;
use crate::serde::to_canonical_json_bytes;

#[derive(Serialize)]
struct BatchInput<'a, T> {
    quantization: &'a QuantizationConfig,
    trajectories: &'a [T],
}

/// Hex SHA-256 of the canonical JSON form of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SsgError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Fingerprint of one analysis input.
///
/// Trajectories hash through their serialized form, so a batch read from YAML
/// and the same batch read from JSON share a fingerprint.
pub fn batch_fingerprint<T: Serialize>(
    quantization: &QuantizationConfig,
    trajectories: &[T],
) -> Result<String, SsgError> {
    stable_hash_string(&BatchInput {
        quantization,
        trajectories,
    })
}
