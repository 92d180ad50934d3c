/// Fast 2-value hash with xorshift
#[inline(always)]
pub fn hash2(a: u64, b: u64) -> u64 {
    let mut seed = a.wrapping_mul(2654435761).wrapping_add(b.wrapping_mul(2246822519));
    seed ^= seed << 13;
    seed ^= seed >> 7;
    seed ^= seed << 17;
    seed
}

/// FNV-1a over the bytes of a string
#[inline]
pub fn hash_str(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325, |acc, b| {
        (acc ^ b as u64).wrapping_mul(0x100000001b3)
    })
}

/// Order-sensitive fingerprint of a list of identifiers.
/// Callers sort and dedup first when order must not matter.
pub fn fingerprint<'a>(ids: impl IntoIterator<Item = &'a str>) -> u64 {
    ids.into_iter()
        .fold(0x9e3779b97f4a7c15, |acc, id| hash2(acc, hash_str(id)))
}
