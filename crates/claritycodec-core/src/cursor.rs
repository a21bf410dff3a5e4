//! Bounded big-endian reader over an immutable byte buffer.

use crate::error::DecodeError;

/// A read position over a borrowed byte slice.
///
/// Every successful read advances the offset by exactly the number of bytes
/// consumed. A failed read leaves the cursor in an unspecified position and
/// it should not be reused.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Consume exactly `n` bytes. `n == 0` always succeeds.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::BufferUnderrun {
                offset: self.offset,
                needed: n,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    /// Consume a fixed-width field.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_offset() {
        let data = [0x07, 0x00, 0x00, 0x01, 0x00, 0xaa, 0xbb];
        let mut c = ByteCursor::new(&data);
        assert_eq!(c.read_u8().unwrap(), 0x07);
        assert_eq!(c.position(), 1);
        assert_eq!(c.read_u32_be().unwrap(), 256);
        assert_eq!(c.position(), 5);
        assert_eq!(c.read_bytes(2).unwrap(), &[0xaa, 0xbb]);
        assert!(c.is_empty());
    }

    #[test]
    fn zero_length_read_is_always_legal() {
        let mut c = ByteCursor::new(&[]);
        assert!(c.read_bytes(0).unwrap().is_empty());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn underrun_reports_shortfall() {
        let mut c = ByteCursor::new(&[0x01, 0x02]);
        c.read_u8().unwrap();
        let err = c.read_u32_be().unwrap_err();
        assert_eq!(
            err,
            DecodeError::BufferUnderrun {
                offset: 1,
                needed: 4,
                remaining: 1
            }
        );
    }

    #[test]
    fn read_u8_on_empty_buffer() {
        let mut c = ByteCursor::new(&[]);
        assert!(matches!(
            c.read_u8(),
            Err(DecodeError::BufferUnderrun { needed: 1, .. })
        ));
    }
}
