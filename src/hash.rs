// Deterministic seed hashing - every "random" mock field derives from this
/// 32-bit rolling hash over the UTF-16 code units of `s`.
///
/// The recurrence is `h = (h << 5) - h + unit` with two's-complement wrap at
/// ±2^31, i.e. the classic polynomial string hash in native 32-bit signed
/// arithmetic. Identical seeds always yield identical values, which is what
/// keeps the keyword and backlink generators stable across runs.
pub fn seed_hash(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(seed_hash(""), 0);
        assert_eq!(seed_hash("a"), 97);
        assert_eq!(seed_hash("seo"), 113_757);
        assert_eq!(seed_hash("example.com"), 1_944_013_059);
    }

    #[test]
    fn deterministic() {
        let a = seed_hash("keyword research tool");
        let b = seed_hash("keyword research tool");
        assert_eq!(a, b);
    }

    #[test]
    fn wraps_like_32_bit_signed() {
        // Long inputs overflow i32 many times over; the result must still be
        // a stable non-negative value, not a panic.
        let long = "x".repeat(10_000);
        let h = seed_hash(&long);
        assert_eq!(h, seed_hash(&long));
    }

    #[test]
    fn handles_non_ascii() {
        // Multi-byte chars hash by UTF-16 code unit, same as the wire format
        // the seeds originally came from.
        assert_ne!(seed_hash("café"), seed_hash("cafe"));
        assert_eq!(seed_hash("café"), seed_hash("café"));
    }
}
