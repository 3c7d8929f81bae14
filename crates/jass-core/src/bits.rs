//! Fixed-width bit-field helpers used by the packed card, trick and score
//! encodings.
//!
//! Every function panics when the requested field does not fit in the word;
//! callers only ever pass compile-time layouts, so a violation is a bug.

pub mod bits32 {
    const WIDTH: u32 = u32::BITS;

    /// Mask with `size` ones starting at bit `start`.
    pub fn mask(start: u32, size: u32) -> u32 {
        assert!(
            start <= WIDTH && size <= WIDTH - start,
            "field [{start}, {start}+{size}) exceeds 32 bits"
        );
        if size == WIDTH {
            !0
        } else {
            ((1u32 << size) - 1) << start
        }
    }

    pub fn extract(bits: u32, start: u32, size: u32) -> u32 {
        (bits & mask(start, size)) >> start
    }

    /// Packs `(value, size)` fields from the least significant bit upwards.
    pub fn pack(fields: &[(u32, u32)]) -> u32 {
        let mut packed = 0u32;
        let mut offset = 0u32;
        for &(value, size) in fields {
            assert!(
                (1..WIDTH).contains(&size),
                "field size {size} out of range"
            );
            assert!(
                value <= mask(0, size),
                "value {value:#x} does not fit in {size} bits"
            );
            assert!(offset + size <= WIDTH, "packed fields exceed 32 bits");
            packed |= value << offset;
            offset += size;
        }
        packed
    }
}

pub mod bits64 {
    const WIDTH: u32 = u64::BITS;

    pub fn mask(start: u32, size: u32) -> u64 {
        assert!(
            start <= WIDTH && size <= WIDTH - start,
            "field [{start}, {start}+{size}) exceeds 64 bits"
        );
        if size == WIDTH {
            !0
        } else {
            ((1u64 << size) - 1) << start
        }
    }

    pub fn extract(bits: u64, start: u32, size: u32) -> u64 {
        (bits & mask(start, size)) >> start
    }

    pub fn pack(fields: &[(u64, u32)]) -> u64 {
        let mut packed = 0u64;
        let mut offset = 0u32;
        for &(value, size) in fields {
            assert!(
                (1..WIDTH).contains(&size),
                "field size {size} out of range"
            );
            assert!(
                value <= mask(0, size),
                "value {value:#x} does not fit in {size} bits"
            );
            assert!(offset + size <= WIDTH, "packed fields exceed 64 bits");
            packed |= value << offset;
            offset += size;
        }
        packed
    }
}
