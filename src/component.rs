//! URI components.

use crate::{
    error::ComponentError,
    parse::{self, AuthMeta, HostKind},
    pct_enc::{self, table, DecodeError},
};
use alloc::{borrow::Cow, string::String};
use core::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    num::ParseIntError,
};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use generic_uri::Scheme;
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Scheme::new("HTTP").unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
///
/// assert!(Scheme::new("1http").is_none());
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the scheme in lowercase, its canonical form.
    #[must_use]
    pub fn to_lowercase(&self) -> String {
        self.inner.to_ascii_lowercase()
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

/// An [authority] component, split into userinfo, host and port.
///
/// An `Authority` is obtained from [`SplitResult::authority_parsed`].
/// Splitting never fails; the host is only validated by the accessors
/// that interpret it.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
/// [`SplitResult::authority_parsed`]: crate::SplitResult::authority_parsed
///
/// # Examples
///
/// ```
/// use generic_uri::{split, Host};
/// use std::net::Ipv6Addr;
///
/// let uri = split("foo://user@[::1]:8080/");
/// let auth = uri.authority_parsed().unwrap();
///
/// assert_eq!(auth.userinfo(), Some("user"));
/// assert_eq!(auth.host(), "[::1]");
/// assert_eq!(auth.port(), Some("8080"));
/// assert_eq!(auth.host_parsed(), Ok(Host::Ipv6(Ipv6Addr::LOCALHOST)));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Authority<'a> {
    val: &'a str,
    meta: AuthMeta,
}

impl<'a> Authority<'a> {
    pub(crate) fn parse(val: &'a str) -> Self {
        Self {
            val,
            meta: parse::split_authority(val),
        }
    }

    /// Returns the authority component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.val
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a str> {
        let host_start = self.meta.host_bounds.0;
        (host_start != 0).then(|| &self.val[..host_start - 1])
    }

    /// Returns the [host] subcomponent as a string slice.
    ///
    /// The host subcomponent is always present, although it may be empty.
    /// The square brackets enclosing an IP literal are included.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    #[must_use]
    pub fn host(&self) -> &'a str {
        let (start, end) = self.meta.host_bounds;
        &self.val[start..end]
    }

    /// Returns the optional [port] subcomponent.
    ///
    /// The port is a possibly empty string of decimal digits.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    #[must_use]
    pub fn port(&self) -> Option<&'a str> {
        let host_end = self.meta.host_bounds.1;
        (host_end != self.val.len()).then(|| &self.val[host_end + 1..])
    }

    /// Checks whether a userinfo subcomponent is present.
    #[inline]
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.meta.host_bounds.0 != 0
    }

    /// Checks whether a port subcomponent is present.
    #[inline]
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.meta.host_bounds.1 != self.val.len()
    }

    /// Converts the port subcomponent to `u16`, if present and nonempty.
    ///
    /// Returns `Ok(None)` if the port is not present or is empty. Leading zeros are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the port cannot be parsed into `u16`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::split;
    ///
    /// let port = |s| split(s).authority_parsed().unwrap().port_to_u16();
    ///
    /// assert_eq!(port("foo://localhost:4673/"), Ok(Some(4673)));
    /// assert_eq!(port("foo://localhost/"), Ok(None));
    /// assert_eq!(port("foo://localhost:/"), Ok(None));
    /// assert!(port("foo://localhost:123456/").is_err());
    /// ```
    pub fn port_to_u16(&self) -> Result<Option<u16>, ParseIntError> {
        self.port()
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .transpose()
    }

    /// Percent-decodes the userinfo subcomponent.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the userinfo is not properly percent-encoded.
    pub fn decode_userinfo(&self) -> Result<Option<Cow<'a, str>>, DecodeError> {
        self.userinfo().map(pct_enc::decode).transpose()
    }

    /// Returns the host in its textual normal form.
    ///
    /// An IPv6 literal is returned lowercased and without the brackets.
    /// An IPv4 address is returned as is. A registered name is
    /// percent-decoded and lowercased.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host is a malformed or unsupported IP literal,
    /// has unbalanced brackets, or is not properly percent-encoded.
    pub fn decode_host(&self) -> Result<String, ComponentError> {
        let host = self.host();
        match parse::parse_host(host)? {
            HostKind::Ipv6(_) => Ok(host[1..host.len() - 1].to_ascii_lowercase()),
            HostKind::Ipv4(_) => Ok(host.into()),
            HostKind::RegName => Ok(pct_enc::decode(host)?.to_lowercase()),
        }
    }

    /// Returns the parsed host subcomponent.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`decode_host`](Self::decode_host).
    pub fn host_parsed(&self) -> Result<Host, ComponentError> {
        let host = self.host();
        Ok(match parse::parse_host(host)? {
            HostKind::Ipv4(addr) => Host::Ipv4(addr),
            HostKind::Ipv6(addr) => Host::Ipv6(addr),
            HostKind::RegName => Host::RegName(pct_enc::decode(host)?.to_lowercase()),
        })
    }
}

/// A parsed [host] component.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Host {
    /// An IPv4 address in dotted-decimal form.
    Ipv4(Ipv4Addr),
    /// An IPv6 address, enclosed in square brackets in a URI.
    Ipv6(Ipv6Addr),
    /// A registered name, percent-decoded and lowercased.
    RegName(String),
}

impl fmt::Display for Host {
    /// Formats the host as it would appear in a URI, encoding a
    /// registered name as needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(addr) => write!(f, "{addr}"),
            Self::Ipv6(addr) => write!(f, "[{addr}]"),
            Self::RegName(name) => f.write_str(&pct_enc::encode_with(
                name.as_bytes(),
                table::REG_NAME,
            )),
        }
    }
}
