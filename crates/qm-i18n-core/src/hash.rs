/// Running ELF hash used for both context buckets and message keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElfHash(u32);

impl ElfHash {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Folds `bytes` into the running state. Hashing stops at an embedded NUL.
    pub fn update(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &byte in bytes {
            if byte == 0 {
                break;
            }
            h = (h << 4).wrapping_add(u32::from(byte));
            let g = h & 0xf000_0000;
            if g != 0 {
                h ^= g >> 24;
            }
            h &= !g;
        }
        self.0 = h;
    }

    /// Zero is reserved, so a zero state finishes as 1.
    pub fn finish(self) -> u32 {
        if self.0 == 0 { 1 } else { self.0 }
    }
}

pub fn elf_hash(bytes: &[u8]) -> u32 {
    let mut hash = ElfHash::new();
    hash.update(bytes);
    hash.finish()
}

pub fn message_hash(source_text: &str, comment: &str) -> u32 {
    let mut hash = ElfHash::new();
    hash.update(source_text.as_bytes());
    hash.update(comment.as_bytes());
    hash.finish()
}

#[cfg(test)]
mod tests {
    use super::{ElfHash, elf_hash, message_hash};

    #[test]
    fn empty_input_finishes_as_one() {
        assert_eq!(elf_hash(b""), 1);
        assert_eq!(message_hash("", ""), 1);
    }

    #[test]
    fn short_input_is_shift_and_add() {
        assert_eq!(elf_hash(b"a"), 0x61);
        assert_eq!(elf_hash(b"ab"), (0x61 << 4) + 0x62);
    }

    #[test]
    fn high_nibble_is_folded_back() {
        let mut reference: u32 = 0;
        for &byte in b"MainWindow::translate" {
            reference = (reference << 4).wrapping_add(u32::from(byte));
            let g = reference & 0xf000_0000;
            if g != 0 {
                reference ^= g >> 24;
            }
            reference &= !g;
        }
        let hash = elf_hash(b"MainWindow::translate");
        assert_eq!(hash, reference);
        assert_eq!(hash & 0xf000_0000, 0);
    }

    #[test]
    fn comment_continues_source_state() {
        let mut joined = ElfHash::new();
        joined.update(b"Open filemenu");
        assert_eq!(message_hash("Open file", "menu"), joined.finish());
        assert_ne!(message_hash("Open file", "menu"), message_hash("Open file", ""));
    }

    #[test]
    fn stops_at_embedded_nul() {
        assert_eq!(elf_hash(b"abc\0def"), elf_hash(b"abc"));
    }
}
