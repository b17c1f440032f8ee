use nom::{error::Error as NomError, Err as NomErr, Parser};

use crate::{error::CursorError, utils::u32_from_be};

/// Sequential reader over a finite byte source.
///
/// Reads either succeed in full and advance the position, or fail and leave
/// the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    source: &'a [u8],
    position: usize,
}
impl<'a> ByteCursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Total size of the source in bytes.
    pub fn size(&self) -> usize {
        self.source.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.position == self.source.len()
    }

    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    pub fn seek(&mut self, offset: usize) -> Result<(), CursorError> {
        if offset > self.source.len() {
            return Err(CursorError::OutOfRange {
                offset,
                size: self.source.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        if n > self.remaining() {
            return Err(CursorError::Truncated {
                offset: self.position,
                requested: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.source[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_be_u32(&mut self) -> Result<u32, CursorError> {
        self.read_array::<4>().map(u32_from_be)
    }

    /// Reads `len` bytes and hands them to a fixed-layout `nom` parser.
    pub(crate) fn parse<O, P>(&mut self, len: usize, mut parser: P) -> Result<O, CursorError>
    where
        P: Parser<&'a [u8], O, NomError<&'a [u8]>>,
    {
        let start = self.position;
        let bytes = self.read_exact(len)?;
        match parser.parse(bytes) {
            Ok((_, out)) => Ok(out),
            Err(NomErr::Error(e) | NomErr::Failure(e)) => {
                self.position = start;
                Err(CursorError::Truncated {
                    offset: start + len - e.input.len(),
                    requested: len,
                    available: e.input.len(),
                })
            }
            Err(NomErr::Incomplete(_)) => {
                self.position = start;
                Err(CursorError::Truncated {
                    offset: start + len,
                    requested: len,
                    available: 0,
                })
            }
        }
    }
}
