//! CRC-32 (IEEE 802.3) over decompressed output, via the teacher's own
//! `crc32fast` dependency rather than the table in
//! `original_source/CRC_CHECKSUM.c` — same polynomial and init/final XOR,
//! just not hand-rolled.

pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { hasher: crc32fast::Hasher::new() }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pangram_crc32_matches_known_value() {
        let mut crc = Crc32::new();
        crc.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(crc.finalize(), 0x414F_A339);
    }

    #[test]
    fn empty_input_crc32_is_zero() {
        let crc = Crc32::new();
        assert_eq!(crc.finalize(), 0);
    }

    #[test]
    fn incremental_updates_match_one_shot() {
        let mut a = Crc32::new();
        a.update(b"hello ");
        a.update(b"world");
        let mut b = Crc32::new();
        b.update(b"hello world");
        assert_eq!(a.finalize(), b.finalize());
    }
}
