//! Percent-encoding utilities.
//!
//! Encoding always produces uppercase hexadecimal digits. Decoding accepts
//! both cases but rejects a `%` that is not followed by two hexadecimal
//! digits.
//!
//! # Examples
//!
//! ```
//! use generic_uri::pct_enc;
//!
//! assert_eq!(pct_enc::encode("a b/c", ""), "a%20b%2Fc");
//! assert_eq!(pct_enc::encode("a b/c", "/"), "a%20b/c");
//! assert_eq!(pct_enc::decode("a%20b%2fc").unwrap(), "a b/c");
//! assert!(pct_enc::decode("100%").is_err());
//! ```

#[cfg(feature = "std")]
mod cache;
pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{fmt, iter::FusedIterator, str};

/// Detailed cause of a [`DecodeError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeErrorKind {
    /// A percent character "%" that is not followed by two hexadecimal digits.
    ///
    /// The error index points to the percent character.
    InvalidOctet,
    /// The decoded bytes are not valid UTF-8.
    ///
    /// The error index points to the first invalid byte of the decoded bytes.
    InvalidUtf8,
}

/// An error occurred when percent-decoding a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError {
    pub(crate) index: usize,
    pub(crate) kind: DecodeErrorKind,
}

impl DecodeError {
    /// Returns the index where the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            DecodeErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            DecodeErrorKind::InvalidUtf8 => "invalid UTF-8 in decoded bytes at index ",
        };
        write!(f, "{msg}{}", self.index)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for DecodeError {}

/// Percent-encodes a string, leaving unreserved characters and
/// the ASCII characters in `safe` unencoded.
///
/// The string is encoded as UTF-8 bytes. Non-ASCII characters in `safe`
/// are ignored since a non-ASCII byte is always encoded.
#[must_use]
pub fn encode(s: &str, safe: &str) -> String {
    encode_bytes(s.as_bytes(), safe)
}

/// Percent-encodes raw bytes, leaving unreserved characters and
/// the ASCII characters in `safe` unencoded.
///
/// This is the counterpart of [`encode`] for payloads that are already
/// encoded with some text encoding, or are not text at all.
///
/// # Examples
///
/// ```
/// use generic_uri::pct_enc;
///
/// assert_eq!(pct_enc::encode_bytes(b"\xff\x00a", ""), "%FF%00a");
/// ```
#[must_use]
pub fn encode_bytes(bytes: &[u8], safe: &str) -> String {
    encode_with(bytes, table_for(safe))
}

/// Percent-encodes raw bytes, leaving the bytes allowed by `table` unencoded.
#[must_use]
pub fn encode_with(bytes: &[u8], table: Table) -> String {
    let mut buf = String::with_capacity(bytes.len());
    encode_to(bytes, table, &mut buf);
    buf
}

/// Percent-encodes raw bytes and appends the result to a buffer.
pub fn encode_to(bytes: &[u8], table: Table, buf: &mut String) {
    for chunk in Encode::new(table, bytes) {
        buf.push_str(chunk.as_str());
    }
}

#[cfg(feature = "std")]
fn table_for(safe: &str) -> Table {
    cache::table_for(safe)
}

#[cfg(not(feature = "std"))]
fn table_for(safe: &str) -> Table {
    Table::with_safe(safe)
}

/// Percent-decodes a string and decodes the resulting bytes as UTF-8.
///
/// Returns a borrowed string if there is nothing to decode.
///
/// # Errors
///
/// Returns `Err` if a percent character is not followed by two hexadecimal
/// digits, or if the decoded bytes are not valid UTF-8.
pub fn decode(s: &str) -> Result<Cow<'_, str>, DecodeError> {
    match decode_to_bytes(s)? {
        Cow::Borrowed(_) => Ok(Cow::Borrowed(s)),
        Cow::Owned(vec) => String::from_utf8(vec).map(Cow::Owned).map_err(|e| DecodeError {
            index: e.utf8_error().valid_up_to(),
            kind: DecodeErrorKind::InvalidUtf8,
        }),
    }
}

/// Percent-decodes a string into raw bytes.
///
/// Returns a borrowed slice if there is nothing to decode.
///
/// # Errors
///
/// Returns `Err` if a percent character is not followed by two hexadecimal digits.
///
/// # Examples
///
/// ```
/// use generic_uri::pct_enc;
///
/// assert_eq!(&*pct_enc::decode_to_bytes("%FF%00a").unwrap(), b"\xff\x00a");
/// assert_eq!(pct_enc::decode_to_bytes("%2d%fg").unwrap_err().index(), 3);
/// ```
pub fn decode_to_bytes(s: &str) -> Result<Cow<'_, [u8]>, DecodeError> {
    validate_octets(s)?;

    if !s.contains('%') {
        return Ok(Cow::Borrowed(s.as_bytes()));
    }

    let mut buf = Vec::with_capacity(decoded_len(s));
    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
            DecodedChunk::PctDecoded(x) => buf.push(x),
        }
    }
    Ok(Cow::Owned(buf))
}

/// Checks that every percent character starts a well-formed octet.
pub(crate) fn validate_octets(s: &str) -> Result<(), DecodeError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some(&[hi, lo]) if is_hexdig_pair(hi, lo) => i += 3,
                _ => {
                    return Err(DecodeError {
                        index: i,
                        kind: DecodeErrorKind::InvalidOctet,
                    })
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn decoded_len(s: &str) -> usize {
    s.len() - s.bytes().filter(|&x| x == b'%').count() * 2
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a hexadecimal digit, or returns `None` if it isn't one.
pub(crate) const fn decode_hexdigit(x: u8) -> Option<u8> {
    match OCTET_TABLE_LO[x as usize] {
        0xff => None,
        v => Some(v),
    }
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    OCTET_TABLE_LO[hi as usize] != 0xff && OCTET_TABLE_LO[lo as usize] != 0xff
}

fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Returns the uppercase percent-encoded triplet of a byte.
pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// An iterator over the chunks of a percent-decoded string.
///
/// The source must have been checked with `validate_octets`.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct Decode<'a> {
    source: &'a str,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum DecodedChunk<'a> {
    Unencoded(&'a str),
    PctDecoded(u8),
}

impl<'a> Decode<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source }
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }
        let i = self.source.find('%').unwrap_or(self.source.len());
        let s;
        if i == 0 {
            (s, self.source) = self.source.split_at(3);
            let x = decode_octet(s.as_bytes()[1], s.as_bytes()[2]);
            Some(DecodedChunk::PctDecoded(x))
        } else {
            (s, self.source) = self.source.split_at(i);
            Some(DecodedChunk::Unencoded(s))
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// An iterator over the chunks of a percent-encoded byte sequence.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
struct Encode<'a> {
    table: Table,
    source: &'a [u8],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EncodedChunk<'a> {
    Unencoded(&'a str),
    PctEncoded(&'static str),
}

impl<'a> EncodedChunk<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::Unencoded(s) | Self::PctEncoded(s) => s,
        }
    }
}

impl<'a> Encode<'a> {
    fn new(table: Table, source: &'a [u8]) -> Self {
        Self { table, source }
    }
}

impl<'a> Iterator for Encode<'a> {
    type Item = EncodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&first, rem) = self.source.split_first()?;
        if !self.table.allows(first) {
            self.source = rem;
            return Some(EncodedChunk::PctEncoded(encode_byte(first)));
        }

        let i = self
            .source
            .iter()
            .position(|&x| !self.table.allows(x))
            .unwrap_or(self.source.len());
        let (allowed, rem) = self.source.split_at(i);
        self.source = rem;

        // Allowed bytes are always ASCII.
        match str::from_utf8(allowed) {
            Ok(s) => Some(EncodedChunk::Unencoded(s)),
            Err(_) => unreachable!(),
        }
    }
}

impl FusedIterator for Encode<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enc_dec() {
        const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
        const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

        let s = encode(RAW, "!$&'()*+,;=:@/?");
        assert_eq!(s, ENCODED);
        assert_eq!(decode(&s).unwrap(), RAW);
        assert_eq!(&*decode_to_bytes(&s).unwrap(), RAW.as_bytes());
    }

    #[test]
    fn borrows_when_unencoded() {
        assert!(matches!(decode("abc").unwrap(), Cow::Borrowed("abc")));
        assert!(matches!(decode_to_bytes("").unwrap(), Cow::Borrowed(b"")));
    }

    #[test]
    fn invalid_octets() {
        for (s, index) in [("%", 0), ("%2", 0), ("a%2g", 1), ("%2d%", 3), ("%%20", 0)] {
            let e = decode(s).unwrap_err();
            assert_eq!(e.kind(), DecodeErrorKind::InvalidOctet, "{s}");
            assert_eq!(e.index(), index, "{s}");
        }
    }

    #[test]
    fn invalid_utf8() {
        let e = decode("ab%FFc").unwrap_err();
        assert_eq!(e.kind(), DecodeErrorKind::InvalidUtf8);
        assert_eq!(e.index(), 2);
    }

    #[test]
    fn lowercase_hex_decodes() {
        assert_eq!(decode("%e6%b5%8b").unwrap(), "测");
    }

    #[test]
    fn hexdigits() {
        assert_eq!(decode_hexdigit(b'a'), Some(10));
        assert_eq!(decode_hexdigit(b'F'), Some(15));
        assert_eq!(decode_hexdigit(b'g'), None);
        assert!(is_hexdig_pair(b'0', b'f'));
        assert!(!is_hexdig_pair(b'0', b'%'));
    }
}
