// Seeded pseudo-random values derived from stable identifiers.
//
// Every "random" draw in the layout comes from hashing a string, so the same
// message id always lands in the same place without storing coordinates.
// The hash is the classic 31x polynomial fold over UTF-16 code units, wrapped
// to a signed 32-bit integer at every step.

/// Fold a string into a signed 32-bit hash (`h = h * 31 + unit`, wrapping).
///
/// Works on UTF-16 code units so that identifiers hash identically to the
/// browser-side lookups that share this function.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32)
    })
}

/// Map a seed string to a value in `[0, 1)` with `range` buckets of resolution.
///
/// The empty string maps to `0.0`. A `range` below 1 is treated as 1, which
/// maps every seed to `0.0`.
pub fn seeded_random(seed: &str, range: i32) -> f64 {
    let range = range.max(1);
    let bucket = (hash_seed(seed) % range).abs();
    bucket as f64 / range as f64
}

pub fn angle_seed(id: &str, attempt: u32) -> String {
    format!("{id}_angle_{attempt}")
}

pub fn radius_seed(id: &str, attempt: u32) -> String {
    format!("{id}_radius_{attempt}")
}

pub fn fallback_seed(id: &str) -> String {
    format!("{id}_fallback")
}
