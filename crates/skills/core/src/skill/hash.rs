//! Stable string hashing shared by every peer of a session.
//!
//! Externally-defined skills and status effects are identified by hashing
//! their names. The hash must produce identical values on every peer and in
//! every session, so it is computed over UTF-16 code units with fixed seeds
//! and wrapping `i32` arithmetic. It is a `const fn` so well-known names hash
//! at compile time.

const SEED: i32 = 5381;
const MIX: i32 = 1_566_083_941;

/// Returns the stable hash of `name`.
///
/// Two djb2-style accumulators consume alternating UTF-16 code units and stop
/// at the first NUL. The accumulators are combined as `h1 + h2 * 1566083941`.
///
/// # Example
/// ```
/// # use skills_core::skill::stable_hash;
/// const SHIELD: i32 = stable_hash("Staff_shield");
/// assert_eq!(SHIELD, 102_922_476);
/// ```
pub const fn stable_hash(name: &str) -> i32 {
    let bytes = name.as_bytes();
    let mut h1 = SEED;
    let mut h2 = SEED;
    let mut units = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let (code_point, len) = decode_utf8(bytes, i);
        i += len;
        if code_point == 0 {
            break;
        }

        if code_point >= 0x1_0000 {
            let c = code_point - 0x1_0000;
            let high = 0xD800 | (c >> 10);
            let low = 0xDC00 | (c & 0x3FF);
            if units % 2 == 0 {
                h1 = mix(h1, high);
                h2 = mix(h2, low);
            } else {
                h2 = mix(h2, high);
                h1 = mix(h1, low);
            }
            units += 2;
        } else {
            if units % 2 == 0 {
                h1 = mix(h1, code_point);
            } else {
                h2 = mix(h2, code_point);
            }
            units += 1;
        }
    }

    h1.wrapping_add(h2.wrapping_mul(MIX))
}

const fn mix(h: i32, unit: u32) -> i32 {
    (h << 5).wrapping_add(h) ^ unit as i32
}

/// Decodes the code point starting at `bytes[i]`. `bytes` is valid UTF-8.
const fn decode_utf8(bytes: &[u8], i: usize) -> (u32, usize) {
    let b0 = bytes[i] as u32;
    if b0 < 0x80 {
        (b0, 1)
    } else if b0 < 0xE0 {
        (((b0 & 0x1F) << 6) | (bytes[i + 1] as u32 & 0x3F), 2)
    } else if b0 < 0xF0 {
        (
            ((b0 & 0x0F) << 12) | ((bytes[i + 1] as u32 & 0x3F) << 6) | (bytes[i + 2] as u32 & 0x3F),
            3,
        )
    } else {
        (
            ((b0 & 0x07) << 18)
                | ((bytes[i + 1] as u32 & 0x3F) << 12)
                | ((bytes[i + 2] as u32 & 0x3F) << 6)
                | (bytes[i + 3] as u32 & 0x3F),
            4,
        )
    }
}
