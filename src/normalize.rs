//! Module for normalization.

use crate::{
    component::{Authority, Scheme},
    error::ComponentError,
    parse::{self, HostKind},
    pct_enc::{self, table, DecodeError, Decode, DecodedChunk},
    resolve,
    split::SplitResult,
};
use alloc::string::{String, ToString};
use borrow_or_share::Bos;
use core::fmt;

/// A configurable URI reference normalizer.
///
/// Normalization follows the syntax-based methods described in
/// [Section 6.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6.2.2):
///
/// - The scheme and a registered name are lowercased.
/// - Percent-encoded octets are uppercased, and those of unreserved
///   characters are decoded.
/// - An IPv6 address is written in its canonical form.
/// - An empty port, or a port equal to the default port of the scheme,
///   is removed together with its `':'`.
/// - Dot segments are removed from an absolute path of a URI with scheme.
///
/// # Examples
///
/// ```
/// use generic_uri::{split, Normalizer};
///
/// let uri = split("HTTP://User@[0:0::1]:80/a/./b/../%7e%63?%3f#%3F");
/// let normalizer = Normalizer::new().default_port_with(|scheme| {
///     (scheme.as_str().eq_ignore_ascii_case("http")).then_some(80)
/// });
///
/// assert_eq!(normalizer.normalize(&uri)?, "http://User@[::1]/a/~c?%3F#%3F");
/// # Ok::<_, generic_uri::ComponentError>(())
/// ```
#[derive(Clone, Copy)]
#[must_use]
pub struct Normalizer {
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            default_port_f: |_| None,
        }
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// By default no scheme has a default port.
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Normalizes the given URI reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any component is not properly percent-encoded,
    /// or if the host is a malformed IP literal or has unbalanced brackets.
    pub fn normalize<T: Bos<str>>(
        &self,
        r: &SplitResult<T>,
    ) -> Result<SplitResult<String>, ComponentError> {
        // The capacity is not always enough, but it's fine since this rarely happens.
        let mut buf = String::with_capacity(r.as_str().len());

        let scheme = r.scheme();
        if let Some(scheme) = scheme {
            buf.push_str(&scheme.to_ascii_lowercase());
            buf.push(':');
        }

        if let Some(auth) = r.authority_parsed() {
            buf.push_str("//");
            self.normalize_authority(&mut buf, &auth, scheme)?;
        }

        let mut path = String::with_capacity(r.path().len());
        normalize_estr(&mut path, r.path(), false)?;
        if scheme.is_some() && path.starts_with('/') {
            path = resolve::remove_dot_segments(&path);
        }
        // Make sure that the output splits into the same components.
        buf.push_str(resolve::path_prefix(
            r.has_scheme(),
            r.has_authority(),
            &path,
        ));
        buf.push_str(&path);

        if let Some(query) = r.query() {
            buf.push('?');
            normalize_estr(&mut buf, query, false)?;
        }

        if let Some(fragment) = r.fragment() {
            buf.push('#');
            normalize_estr(&mut buf, fragment, false)?;
        }

        Ok(SplitResult::new(buf))
    }

    fn normalize_authority(
        &self,
        buf: &mut String,
        auth: &Authority<'_>,
        scheme: Option<&str>,
    ) -> Result<(), ComponentError> {
        if let Some(userinfo) = auth.userinfo() {
            normalize_estr(buf, userinfo, false)?;
            buf.push('@');
        }

        let host = auth.host();
        match parse::parse_host(host)? {
            // An IPv4 address is always canonical.
            HostKind::Ipv4(_) => buf.push_str(host),
            HostKind::Ipv6(addr) => {
                buf.push('[');
                buf.push_str(&addr.to_string());
                buf.push(']');
            }
            HostKind::RegName => normalize_estr(buf, host, true)?,
        }

        if let Some(port) = auth.port().filter(|port| !port.is_empty()) {
            let default = scheme
                .and_then(Scheme::new)
                .and_then(|scheme| (self.default_port_f)(scheme));
            if default.is_none() || port.parse().ok() != default {
                buf.push(':');
                buf.push_str(port);
            }
        }
        Ok(())
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

fn normalize_estr(buf: &mut String, s: &str, to_ascii_lowercase: bool) -> Result<(), DecodeError> {
    pct_enc::validate_octets(s)?;

    for chunk in Decode::new(s) {
        match chunk {
            DecodedChunk::Unencoded(s) => {
                let i = buf.len();
                buf.push_str(s);
                if to_ascii_lowercase {
                    buf[i..].make_ascii_lowercase();
                }
            }
            DecodedChunk::PctDecoded(mut x) => {
                if table::UNRESERVED.allows(x) {
                    if to_ascii_lowercase {
                        x.make_ascii_lowercase();
                    }
                    buf.push(x as char);
                } else {
                    buf.push_str(pct_enc::encode_byte(x));
                }
            }
        }
    }
    Ok(())
}
