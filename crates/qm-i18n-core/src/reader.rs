#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub fn at(input: &'a [u8], pos: usize) -> Self {
        Self { input, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let value = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(value)
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        let bytes = self.take(2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.input.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    pub fn skip(&mut self, len: usize) -> Option<()> {
        self.take(len).map(|_| ())
    }

    /// Reads a `u32` length followed by that many bytes.
    pub fn read_blob(&mut self) -> Option<&'a [u8]> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }
}

pub fn read_u16_at(input: &[u8], pos: usize) -> Option<u16> {
    ByteCursor::at(input, pos).read_u16()
}

pub fn read_u32_at(input: &[u8], pos: usize) -> Option<u32> {
    ByteCursor::at(input, pos).read_u32()
}
