//! Byte cursor for graymap headers
//!
//! A small token stream over an in-memory buffer. Header parsing peeks
//! and consumes bytes through it instead of pushing characters back
//! into a stream.

/// Whitespace as recognized by the header grammar (space, `\t`, `\n`,
/// vertical tab, form feed, `\r`).
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Read position within a byte buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Look at the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consume and return the next byte.
    #[inline]
    pub fn consume(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consume the next `n` bytes as a slice.
    ///
    /// Returns `None`, without consuming anything, if fewer than `n`
    /// bytes remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// Skip any run of whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and at most one `#` comment line.
    ///
    /// After whitespace, a `#` discards everything through the next
    /// `\n` (or to the end of the buffer), then whitespace is skipped
    /// again. A second consecutive comment line is left in place.
    pub fn skip_whitespace_and_comment(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b'#') {
            while let Some(b) = self.consume() {
                if b == b'\n' {
                    break;
                }
            }
            self.skip_whitespace();
        }
    }

    /// Skip whitespace, then read up to `max_len` non-whitespace bytes.
    ///
    /// Comments are not recognized here.
    pub fn read_token(&mut self, max_len: usize) -> &'a [u8] {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos - start < max_len && self.peek().is_some_and(|b| !is_space(b)) {
            self.pos += 1;
        }
        &self.data[start..self.pos]
    }

    /// Skip whitespace, then read a signed decimal integer.
    ///
    /// Returns `None` if no digits follow or the value overflows `i64`.
    /// On `None` the cursor may have advanced past whitespace and sign.
    pub fn read_int(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let mut value: i64 = 0;
        let mut ndigits = 0usize;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
            self.pos += 1;
            ndigits += 1;
        }
        if ndigits == 0 {
            return None;
        }
        Some(if negative { -value } else { value })
    }
}
