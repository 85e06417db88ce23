//! Line ending translation for serial terminals.
//!
//! Every `\n` is preceded by a `\r`. Other bytes, including an existing `\r`,
//! pass through untouched, so `b"\r\n"` becomes `b"\r\r\n"`.

use core::iter::FusedIterator;
use core::slice;

/// Yields `bytes` with a `\r` inserted before each `\n`.
pub fn translate(bytes: &[u8]) -> Crlf<'_> {
    Crlf {
        bytes: bytes.iter(),
        pending_lf: false,
    }
}

/// Iterator returned by [`translate`].
#[derive(Debug, Clone)]
pub struct Crlf<'a> {
    bytes: slice::Iter<'a, u8>,
    /// The `\r` of a line ending was yielded, the `\n` is still owed.
    pending_lf: bool,
}

impl Iterator for Crlf<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pending_lf {
            self.pending_lf = false;
            return Some(b'\n');
        }

        let byte = *self.bytes.next()?;
        if byte == b'\n' {
            self.pending_lf = true;
            Some(b'\r')
        } else {
            Some(byte)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.bytes.len();
        let owed = usize::from(self.pending_lf);
        (rest + owed, rest.checked_mul(2).map(|n| n + owed))
    }
}

impl FusedIterator for Crlf<'_> {}
