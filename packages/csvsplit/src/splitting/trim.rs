//! Input adapter that drops leading whitespace from unquoted field starts.
//!
//! Trimming has to happen before the CSV parser sees the bytes: whether a
//! field is quoted is decided by its first byte, so `a, "b, c"` only parses
//! as two fields once the space after the delimiter is gone. Bytes inside a
//! quoted field are never touched.

use std::io::{self, Read};

/// Where the adapter is within the current field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// At the start of a field (or record), before any kept byte.
    Start,
    /// Inside an unquoted field.
    Unquoted,
    /// Inside a quoted field.
    Quoted,
    /// Just saw a quote inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

impl FieldState {
    fn next(self, byte: u8, delimiter: u8) -> Self {
        let ends_field = byte == delimiter || byte == b'\n' || byte == b'\r';
        match self {
            Self::Start | Self::Unquoted if ends_field => Self::Start,
            Self::Start if byte == b'"' => Self::Quoted,
            Self::Start | Self::Unquoted => Self::Unquoted,
            Self::Quoted if byte == b'"' => Self::QuoteInQuoted,
            Self::Quoted => Self::Quoted,
            Self::QuoteInQuoted if byte == b'"' => Self::Quoted,
            Self::QuoteInQuoted if ends_field => Self::Start,
            Self::QuoteInQuoted => Self::Unquoted,
        }
    }
}

/// Wraps a reader and removes whitespace at the start of every unquoted
/// field position.
///
/// Whitespace is any Unicode `White_Space` character except `\r` and `\n`,
/// which stay so the parser still sees record boundaries.
pub(crate) struct LeadingSpaceTrimmer<R> {
    inner: R,
    delimiter: u8,
    chunk_size: usize,
    state: FieldState,
    /// Raw bytes read but not yet processed (a split multi-byte character).
    pending: Vec<u8>,
    /// Processed bytes waiting to be handed out.
    out: Vec<u8>,
    out_pos: usize,
    eof: bool,
}

impl<R: Read> LeadingSpaceTrimmer<R> {
    pub(crate) fn new(inner: R, delimiter: u8, chunk_size: usize) -> Self {
        Self {
            inner,
            delimiter,
            chunk_size: chunk_size.max(1),
            state: FieldState::Start,
            pending: Vec::new(),
            out: Vec::new(),
            out_pos: 0,
            eof: false,
        }
    }

    fn fill_pending(&mut self) -> io::Result<()> {
        let start = self.pending.len();
        self.pending.resize(start + self.chunk_size, 0);
        match self.inner.read(&mut self.pending[start..]) {
            Ok(n) => {
                self.pending.truncate(start + n);
                if n == 0 {
                    self.eof = true;
                }
                Ok(())
            }
            Err(e) => {
                self.pending.truncate(start);
                Err(e)
            }
        }
    }

    /// Move as much of `pending` as possible into `out`.
    ///
    /// A possibly-whitespace multi-byte character cut off at the end of the
    /// chunk stays in `pending` until more input (or EOF) arrives.
    fn process(&mut self) {
        let len = self.pending.len();
        let mut i = 0;
        while i < len {
            let byte = self.pending[i];
            if self.state == FieldState::Start && byte != self.delimiter {
                let width = utf8_width(byte);
                if i + width > len && !self.eof {
                    break;
                }
                let end = (i + width).min(len);
                if is_field_space(&self.pending[i..end]) {
                    i = end;
                    continue;
                }
            }
            self.state = self.state.next(byte, self.delimiter);
            self.out.push(byte);
            i += 1;
        }
        self.pending.drain(..i);
    }
}

impl<R: Read> Read for LeadingSpaceTrimmer<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let available = self.out.len() - self.out_pos;
            if available > 0 {
                let n = available.min(buf.len());
                buf[..n].copy_from_slice(&self.out[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }
            if self.eof && self.pending.is_empty() {
                return Ok(0);
            }

            self.out.clear();
            self.out_pos = 0;
            if !self.eof {
                self.fill_pending()?;
            }
            self.process();
        }
    }
}

/// Encoded length implied by a UTF-8 lead byte (1 for ASCII or invalid bytes).
fn utf8_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

fn is_field_space(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .is_some_and(|c| c.is_whitespace() && c != '\n' && c != '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim(input: &[u8], chunk_size: usize) -> Vec<u8> {
        let mut out = Vec::new();
        LeadingSpaceTrimmer::new(input, b',', chunk_size)
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_trims_before_unquoted_and_quoted_fields() {
        assert_eq!(
            trim(b"a,  b, \"c, d\"\n  e,f\n", 64),
            b"a,b,\"c, d\"\ne,f\n".to_vec()
        );
    }

    #[test]
    fn test_keeps_whitespace_inside_quotes() {
        assert_eq!(
            trim(b"x,\"  y\",\" \"\" z\"\n", 64),
            b"x,\"  y\",\" \"\" z\"\n".to_vec()
        );
    }

    #[test]
    fn test_keeps_trailing_and_inner_whitespace() {
        assert_eq!(trim(b"a b ,c \n", 64), b"a b ,c \n".to_vec());
    }

    #[test]
    fn test_keeps_record_terminators() {
        assert_eq!(trim(b"a, \r\nb,\n", 64), b"a,\r\nb,\n".to_vec());
    }

    #[test]
    fn test_quoted_newline_does_not_start_a_record() {
        assert_eq!(
            trim(b"a,\"x\n  y\"\n", 64),
            b"a,\"x\n  y\"\n".to_vec()
        );
    }

    #[test]
    fn test_unicode_whitespace_trimmed() {
        // U+00A0 no-break space, U+3000 ideographic space, vertical tab
        let input = "a,\u{a0}b,\u{3000}c,\u{b}d\n";
        assert_eq!(trim(input.as_bytes(), 64), b"a,b,c,d\n".to_vec());
    }

    #[test]
    fn test_multibyte_space_split_across_chunks() {
        let input = "a,\u{3000}\u{3000}b,é\n";
        for chunk_size in 1..=4 {
            assert_eq!(
                trim(input.as_bytes(), chunk_size),
                "a,b,é\n".as_bytes().to_vec(),
                "chunk_size={chunk_size}"
            );
        }
    }

    #[test]
    fn test_tab_delimiter_is_not_trimmed() {
        let mut out = Vec::new();
        LeadingSpaceTrimmer::new(&b"a\t\t b\n"[..], b'\t', 64)
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, b"a\t\tb\n".to_vec());
    }

    #[test]
    fn test_invalid_utf8_passes_through() {
        assert_eq!(trim(b"k, \xe9\xff\n", 64), b"k,\xe9\xff\n".to_vec());
    }
}
