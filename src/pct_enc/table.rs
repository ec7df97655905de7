//! Byte pattern tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

/// A table specifying the ASCII bytes allowed unencoded in a string.
///
/// Every byte not allowed by a table is percent-encoded when encoding with it.
/// Non-ASCII bytes are never allowed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot allow non-ASCII byte");
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Creates a table allowing the unreserved characters together with
    /// every ASCII character in `safe`.
    ///
    /// Non-ASCII characters in `safe` are ignored.
    #[must_use]
    pub const fn with_safe(safe: &str) -> Self {
        let mut bytes = safe.as_bytes();
        let mut table = UNRESERVED;
        while let [cur, rem @ ..] = bytes {
            if cur.is_ascii() {
                table = table.or(Self::new(&[*cur]));
            }
            bytes = rem;
        }
        table
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the bytes allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the given byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Validates the given string with the table.
    ///
    /// Returns `true` if every byte of the string is allowed.
    #[must_use]
    pub const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if !self.allows(s[i]) {
                return false;
            }
            i += 1;
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
///
/// This table only covers the characters after the first.
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// Unencoded characters of `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`.
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":"));

/// Unencoded characters of `reg-name = *( unreserved / pct-encoded / sub-delims )`.
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS);

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`, without `pct-encoded`.
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@"));

/// Unencoded characters of `path = *( pchar / "/" )`.
pub const PATH: Table = PCHAR.or(new(b"/"));

/// Unencoded characters of `query = *( pchar / "/" / "?" )`.
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// Unencoded characters of `fragment = *( pchar / "/" / "?" )`.
pub const FRAGMENT: Table = QUERY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert!(UNRESERVED.allows(b'~'));
        assert!(!UNRESERVED.allows(b'%'));
        assert!(!UNRESERVED.allows(0x80));
        assert!(SUB_DELIMS.is_subset(RESERVED));
        assert!(!RESERVED.is_subset(SUB_DELIMS));
        assert!(QUERY.allows(b'?') && !PATH.allows(b'?'));
        assert!(!QUERY.sub(new(b"&=")).allows(b'&'));
        assert!(HEXDIG.validate(b"09afAF"));
        assert!(!HEXDIG.validate(b"0g"));
    }

    #[test]
    fn safe_set() {
        let t = Table::with_safe("/:é");
        assert!(t.allows(b'/') && t.allows(b':') && t.allows(b'a'));
        assert!(!t.allows(b'@'));
        assert_eq!(Table::with_safe(""), UNRESERVED);
    }
}
