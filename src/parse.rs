//! The grammar splitter and the authority sub-parser.
//!
//! Splitting follows the regular expression from
//! [Appendix B of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#appendix-B):
//!
//! ```text
//! ^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?
//! ```
//!
//! which matches every string, so splitting never fails.

use crate::{error::ComponentError, pct_enc};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
};

/// Byte offsets of the components of a split URI reference.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct Meta {
    // The index of the trailing colon.
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_bounds: Option<(usize, usize)>,
    pub path_bounds: (usize, usize),
    // One byte past the last byte of query.
    pub query_end: Option<NonZeroUsize>,
}

impl Meta {
    #[inline]
    pub fn query_or_path_end(&self) -> usize {
        self.query_end.map_or(self.path_bounds.1, |i| i.get())
    }
}

/// Byte offsets of the host within an authority.
///
/// Userinfo is present iff the host doesn't start at zero, in which case
/// it ends one byte before the host. Port is present iff the host doesn't
/// extend to the end, in which case it starts one byte after the host.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) struct AuthMeta {
    pub host_bounds: (usize, usize),
}

fn find_any(bytes: &[u8], start: usize, delims: &[u8]) -> usize {
    bytes[start..]
        .iter()
        .position(|x| delims.contains(x))
        .map_or(bytes.len(), |i| start + i)
}

/// Splits a URI reference into its five top-level components.
pub(crate) fn split(s: &str) -> Meta {
    let bytes = s.as_bytes();
    let mut out = Meta::default();
    let mut pos = 0;

    // The scheme is a nonempty run of characters other than ":/?#"
    // that is immediately followed by ":".
    let i = find_any(bytes, 0, b":/?#");
    if i > 0 && bytes.get(i) == Some(&b':') {
        out.scheme_end = NonZeroUsize::new(i);
        pos = i + 1;
    }

    if bytes[pos..].starts_with(b"//") {
        let start = pos + 2;
        pos = find_any(bytes, start, b"/?#");
        out.auth_bounds = Some((start, pos));
    }

    let path_start = pos;
    pos = find_any(bytes, pos, b"?#");
    out.path_bounds = (path_start, pos);

    if bytes.get(pos) == Some(&b'?') {
        pos = find_any(bytes, pos + 1, b"#");
        out.query_end = NonZeroUsize::new(pos);
    }

    out
}

/// Splits an authority into userinfo, host and port.
///
/// The last `@` ends the userinfo. The port follows the last `:` of the
/// remainder, but only when every character after that colon is
/// a decimal digit, so colons inside an IP literal stay with the host.
pub(crate) fn split_authority(s: &str) -> AuthMeta {
    let host_start = s.rfind('@').map_or(0, |i| i + 1);
    let host_port = &s[host_start..];

    let host_end = match host_port.rfind(':') {
        Some(i) if host_port[i + 1..].bytes().all(|x| x.is_ascii_digit()) => host_start + i,
        _ => s.len(),
    };

    AuthMeta {
        host_bounds: (host_start, host_end),
    }
}

/// The variant of a host subcomponent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HostKind {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    RegName,
}

/// Classifies a raw host subcomponent, validating IP literals.
pub(crate) fn parse_host(host: &str) -> Result<HostKind, ComponentError> {
    match (host.strip_prefix('['), host.ends_with(']')) {
        (Some(rem), true) => {
            let literal = &rem[..rem.len() - 1];
            parse_ip_literal(literal).map(HostKind::Ipv6)
        }
        (Some(_), false) | (None, true) => Err(ComponentError::UnbalancedBrackets),
        (None, false) => Ok(match parse_v4(host.as_bytes()) {
            Some(addr) => HostKind::Ipv4(addr),
            None => HostKind::RegName,
        }),
    }
}

/// Parses the contents of an IP literal, i.e., without the brackets.
pub(crate) fn parse_ip_literal(literal: &str) -> Result<Ipv6Addr, ComponentError> {
    if let Some(b'v' | b'V') = literal.as_bytes().first() {
        return Err(ComponentError::UnsupportedIpLiteral);
    }
    parse_v6(literal.as_bytes()).ok_or(ComponentError::InvalidIpLiteral)
}

/// Parses a whole string as an `IPv4address`.
pub(crate) fn parse_v4(bytes: &[u8]) -> Option<Ipv4Addr> {
    let mut reader = Reader::new(bytes);
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => Some(addr.into()),
        _ => None,
    }
}

/// Parses a whole string as an `IPv6address`.
pub(crate) fn parse_v6(bytes: &[u8]) -> Option<Ipv6Addr> {
    let mut reader = Reader::new(bytes);
    match reader.read_v6() {
        Some(segs) if !reader.has_remaining() => Some(segs.into()),
        _ => None,
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.bytes.len());
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_idx = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_idx) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_idx != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_idx = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == 0 || i == ellipsis_idx) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_idx == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_idx..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        let first = match self.peek(0) {
            Some(x) => x,
            None => return colon.then_some(Seg::SingleColon),
        };

        let mut x = match pct_enc::decode_hexdigit(first) {
            Some(v) => v as u16,
            None => {
                return colon.then(|| {
                    if first == b':' {
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            let Some(b) = self.peek(i) else {
                break;
            };
            match pct_enc::decode_hexdigit(b) {
                Some(v) => {
                    x = (x << 4) | v as u16;
                    i += 1;
                }
                None if b == b'.' => return Some(Seg::MaybeV4(colon)),
                None => break,
            }
        }
        // INVARIANT: Skipping `i` hexadecimal digits is fine.
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            // INVARIANT: Skipping "0" is fine.
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                // INVARIANT: Skipping `i` digits is fine.
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        // INVARIANT: Skipping 3 digits is fine.
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }
}
