//! Split URI references and their components.

use crate::{
    build::{state::Start, Builder},
    component::{Authority, Host, Scheme},
    error::ComponentError,
    normalize::Normalizer,
    parse::{self, Meta},
    pct_enc::{self, DecodeError},
    resolve,
};
use alloc::{
    borrow::{Cow, ToOwned},
    collections::BTreeMap,
    string::String,
    vec::Vec,
};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    convert::Infallible,
    fmt, hash,
    iter::FusedIterator,
    num::ParseIntError,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The delimiters that separate query parameters by default.
pub const QUERY_DELIMS: &[char] = &[';', '&'];

/// A URI reference split into its five top-level components.
///
/// Two variants of `SplitResult` are available:
/// `SplitResult<&str>` (borrowed) and `SplitResult<String>` (owned).
/// Components are exposed as slices of the source text, with lifetimes
/// tied to the storage.
///
/// Splitting follows the regular expression from [Appendix B of RFC 3986]
/// and never fails. Absent components are `None`, never empty strings,
/// except for the path which is always present.
///
/// [Appendix B of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#appendix-B
///
/// # Comparison
///
/// `SplitResult`s are compared byte-wise. No normalization is performed
/// prior to comparison; see [`normalize`](Self::normalize).
///
/// # Examples
///
/// ```
/// use generic_uri::{split, unsplit};
///
/// let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
/// let uri = split(s);
///
/// assert_eq!(uri.scheme(), Some("foo"));
/// assert_eq!(uri.authority(), Some("user@example.com:8042"));
/// assert_eq!(uri.path(), "/over/there");
/// assert_eq!(uri.query(), Some("name=ferret"));
/// assert_eq!(uri.fragment(), Some("nose"));
///
/// assert_eq!(unsplit(&uri.components()), s);
/// ```
#[derive(Clone, Copy)]
pub struct SplitResult<T> {
    pub(crate) val: T,
    pub(crate) meta: Meta,
}

/// The five top-level components of a URI reference as plain fields.
///
/// This is the input of [`unsplit`](crate::unsplit) and the result of
/// [`SplitResult::components`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Components<'a> {
    /// The scheme, without the trailing `:`.
    pub scheme: Option<&'a str>,
    /// The authority, without the leading `//`.
    pub authority: Option<&'a str>,
    /// The path, which may be empty but is never absent.
    pub path: &'a str,
    /// The query, without the leading `?`.
    pub query: Option<&'a str>,
    /// The fragment, without the leading `#`.
    pub fragment: Option<&'a str>,
}

/// Concatenates the present components of a URI reference with their delimiters.
///
/// No validation is performed. For every string `s`,
/// `unsplit(&split(s).components()) == s`.
#[must_use]
pub fn unsplit(c: &Components<'_>) -> String {
    let len = c.scheme.map_or(0, |s| s.len() + 1)
        + c.authority.map_or(0, |s| s.len() + 2)
        + c.path.len()
        + c.query.map_or(0, |s| s.len() + 1)
        + c.fragment.map_or(0, |s| s.len() + 1);

    let mut buf = String::with_capacity(len);
    if let Some(scheme) = c.scheme {
        buf.push_str(scheme);
        buf.push(':');
    }
    if let Some(authority) = c.authority {
        buf.push_str("//");
        buf.push_str(authority);
    }
    buf.push_str(c.path);
    if let Some(query) = c.query {
        buf.push('?');
        buf.push_str(query);
    }
    if let Some(fragment) = c.fragment {
        buf.push('#');
        buf.push_str(fragment);
    }
    buf
}

impl<T: Bos<str>> SplitResult<T> {
    /// Splits a URI reference into its components.
    pub fn new(val: T) -> Self {
        let meta = parse::split(val.borrow_or_share());
        Self { val, meta }
    }
}

impl SplitResult<String> {
    /// Creates a new builder for a URI reference.
    #[inline]
    pub fn builder() -> Builder<Start> {
        Builder::new()
    }

    /// Borrows this `SplitResult<String>` as `SplitResult<&str>`.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    #[must_use]
    pub fn borrow(&self) -> SplitResult<&str> {
        SplitResult {
            val: &self.val,
            meta: self.meta,
        }
    }

    /// Consumes this `SplitResult<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }

    /// Replaces the fragment in place.
    ///
    /// The fragment is taken as is, without encoding.
    pub fn set_fragment(&mut self, opt: Option<&str>) {
        // Altering only the fragment does not change the metadata.
        self.val.truncate(self.meta.query_or_path_end());
        if let Some(s) = opt {
            self.val.reserve_exact(s.len() + 1);
            self.val.push('#');
            self.val.push_str(s);
        }
    }
}

impl SplitResult<&str> {
    /// Creates a new `SplitResult<String>` by cloning the contents of this `SplitResult<&str>`.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> SplitResult<String> {
        SplitResult {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> SplitResult<T> {
    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    fn slice(&'i self, start: usize, end: usize) -> &'o str {
        &self.as_str()[start..end]
    }

    /// Returns the optional [scheme] component, without the trailing `:`.
    ///
    /// The scheme is not validated; see [`normalized_scheme`](Self::normalized_scheme).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o str> {
        let end = self.meta.scheme_end?.get();
        Some(self.slice(0, end))
    }

    /// Returns the optional [authority] component, without the leading `//`.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Option<&'o str> {
        let (start, end) = self.meta.auth_bounds?;
        Some(self.slice(start, end))
    }

    /// Returns the optional authority component split into
    /// userinfo, host and port.
    #[must_use]
    pub fn authority_parsed(&'i self) -> Option<Authority<'o>> {
        self.authority().map(Authority::parse)
    }

    /// Returns the [path] component.
    ///
    /// The path component is always present, although it may be empty.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    #[must_use]
    pub fn path(&'i self) -> &'o str {
        let (start, end) = self.meta.path_bounds;
        self.slice(start, end)
    }

    /// Returns the optional [query] component, without the leading `?`.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    #[must_use]
    pub fn query(&'i self) -> Option<&'o str> {
        let end = self.meta.query_end?.get();
        Some(self.slice(self.meta.path_bounds.1 + 1, end))
    }

    /// Returns the optional [fragment] component, without the leading `#`.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o str> {
        let s = self.as_str();
        let i = self.meta.query_or_path_end();
        (i != s.len()).then(|| &s[i + 1..])
    }

    /// Returns the five components as plain fields.
    #[must_use]
    pub fn components(&'i self) -> Components<'o> {
        Components {
            scheme: self.scheme(),
            authority: self.authority(),
            path: self.path(),
            query: self.query(),
            fragment: self.fragment(),
        }
    }

    /// Returns the URI reference without the fragment component.
    #[must_use]
    pub fn strip_fragment(&'i self) -> SplitResult<&'o str> {
        // Altering only the fragment does not change the metadata.
        SplitResult {
            val: self.slice(0, self.meta.query_or_path_end()),
            meta: self.meta,
        }
    }

    /// Returns the validated scheme in lowercase.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheme does not match
    /// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{split, ComponentError};
    ///
    /// assert_eq!(split("HTTP://example.com").normalized_scheme(), Ok(Some("http".into())));
    /// assert_eq!(split("//example.com").normalized_scheme(), Ok(None));
    /// assert_eq!(split("1http:").normalized_scheme(), Err(ComponentError::InvalidScheme));
    /// ```
    pub fn normalized_scheme(&'i self) -> Result<Option<String>, ComponentError> {
        self.scheme()
            .map(|s| {
                Scheme::new(s)
                    .map(Scheme::to_lowercase)
                    .ok_or(ComponentError::InvalidScheme)
            })
            .transpose()
    }

    /// Percent-decodes the authority component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the authority is not properly percent-encoded.
    pub fn decode_authority(&'i self) -> Result<Option<Cow<'o, str>>, DecodeError> {
        self.authority().map(pct_enc::decode).transpose()
    }

    /// Percent-decodes the userinfo subcomponent.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the userinfo is not properly percent-encoded.
    pub fn decode_userinfo(&'i self) -> Result<Option<Cow<'o, str>>, DecodeError> {
        Ok(match self.authority_parsed() {
            Some(auth) => auth.decode_userinfo()?,
            None => None,
        })
    }

    /// Returns the host in its textual normal form.
    ///
    /// An empty registered name is returned as `Some("")`.
    /// See [`Authority::decode_host`] for the exact behavior.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host is a malformed or unsupported IP literal,
    /// has unbalanced brackets, or is not properly percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{split, ComponentError};
    ///
    /// assert_eq!(split("//user@[::1]:8080").decode_host(), Ok(Some("::1".into())));
    /// assert_eq!(split("//EXAMPLE.%43om").decode_host(), Ok(Some("example.com".into())));
    /// assert_eq!(split("file:///etc").decode_host(), Ok(Some("".into())));
    /// assert_eq!(split("[foo]").decode_host(), Ok(None));
    /// assert_eq!(split("//[foo]").decode_host(), Err(ComponentError::InvalidIpLiteral));
    /// ```
    pub fn decode_host(&'i self) -> Result<Option<String>, ComponentError> {
        self.authority_parsed()
            .map(|auth| auth.decode_host())
            .transpose()
    }

    /// Returns the parsed host subcomponent.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`decode_host`](Self::decode_host).
    pub fn host_parsed(&'i self) -> Result<Option<Host>, ComponentError> {
        self.authority_parsed()
            .map(|auth| auth.host_parsed())
            .transpose()
    }

    /// Returns the optional port subcomponent, a possibly empty string of digits.
    #[must_use]
    pub fn port(&'i self) -> Option<&'o str> {
        self.authority_parsed()?.port()
    }

    /// Converts the port subcomponent to `u16`, if present and nonempty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the port cannot be parsed into `u16`.
    pub fn port_to_u16(&'i self) -> Result<Option<u16>, ParseIntError> {
        match self.authority_parsed() {
            Some(auth) => auth.port_to_u16(),
            None => Ok(None),
        }
    }

    /// Percent-decodes the path component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the path is not properly percent-encoded.
    pub fn decode_path(&'i self) -> Result<Cow<'o, str>, DecodeError> {
        pct_enc::decode(self.path())
    }

    /// Percent-decodes the query component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the query is not properly percent-encoded.
    pub fn decode_query(&'i self) -> Result<Option<Cow<'o, str>>, DecodeError> {
        self.query().map(pct_enc::decode).transpose()
    }

    /// Percent-decodes the fragment component.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the fragment is not properly percent-encoded.
    pub fn decode_fragment(&'i self) -> Result<Option<Cow<'o, str>>, DecodeError> {
        self.fragment().map(pct_enc::decode).transpose()
    }

    /// Returns an iterator over the decoded `(name, value)` pairs of the query.
    ///
    /// The query is split on any of the characters in `delims`, skipping
    /// empty parameters, and each parameter is split at the first `sep`.
    /// A parameter without `sep` has no value. The iterator is empty if
    /// the query is absent or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{split, QUERY_DELIMS};
    ///
    /// let uri = split("?a=1;b&&a=%32&c=");
    /// let pairs: Vec<_> = uri
    ///     .query_pairs(QUERY_DELIMS, '=')
    ///     .collect::<Result<_, _>>()?;
    ///
    /// assert_eq!(pairs, [
    ///     ("a".into(), Some("1".into())),
    ///     ("b".into(), None),
    ///     ("a".into(), Some("2".into())),
    ///     ("c".into(), Some("".into())),
    /// ]);
    /// # Ok::<_, generic_uri::pct_enc::DecodeError>(())
    /// ```
    pub fn query_pairs<'d>(&'i self, delims: &'d [char], sep: char) -> QueryPairs<'o, 'd> {
        QueryPairs {
            rem: self.query().filter(|q| !q.is_empty()),
            delims,
            sep,
        }
    }

    /// Collects the decoded query parameters into a map from names to
    /// the values of every occurrence, in order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any name or value is not properly percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{split, QUERY_DELIMS};
    ///
    /// let map = split("?a=1&b&a=2").query_map(QUERY_DELIMS, '=')?;
    ///
    /// assert_eq!(map["a"], [Some("1".into()), Some("2".into())]);
    /// assert_eq!(map["b"], [None]);
    /// # Ok::<_, generic_uri::pct_enc::DecodeError>(())
    /// ```
    pub fn query_map(
        &'i self,
        delims: &[char],
        sep: char,
    ) -> Result<BTreeMap<String, Vec<Option<String>>>, DecodeError> {
        let mut map: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
        for pair in self.query_pairs(delims, sep) {
            let (name, value) = pair?;
            map.entry(name.into_owned())
                .or_default()
                .push(value.map(Cow::into_owned));
        }
        Ok(map)
    }
}

impl<T: Bos<str>> SplitResult<T> {
    /// Checks whether a scheme component is present.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether an authority component is present.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.meta.auth_bounds.is_some()
    }

    /// Checks whether a query component is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.meta.query_end.is_some()
    }

    /// Checks whether a fragment component is present.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.meta.query_or_path_end() != self.as_str().len()
    }

    /// Creates a new `SplitResult<String>` with the fragment replaced.
    ///
    /// The fragment is taken as is, without encoding.
    #[must_use]
    pub fn with_fragment(&self, opt: Option<&str>) -> SplitResult<String> {
        let stripped = &self.as_str()[..self.meta.query_or_path_end()];
        let val = match opt {
            Some(s) => [stripped, "#", s].concat(),
            None => stripped.to_owned(),
        };
        // Altering only the fragment does not change the metadata.
        SplitResult {
            val,
            meta: self.meta,
        }
    }

    /// Resolves this reference against the given base with strict
    /// RFC 3986 semantics and returns the target.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::split;
    ///
    /// let base = split("http://example.com/foo/bar");
    ///
    /// assert_eq!(split("baz").resolve_against(&base), "http://example.com/foo/baz");
    /// assert_eq!(split("../baz").resolve_against(&base), "http://example.com/baz");
    /// assert_eq!(split("?baz").resolve_against(&base), "http://example.com/foo/bar?baz");
    /// ```
    #[must_use]
    pub fn resolve_against<U: Bos<str>>(&self, base: &SplitResult<U>) -> SplitResult<String> {
        resolve::transform(&base.components(), &self.components(), true)
    }

    /// Normalizes the URI reference with the default [`Normalizer`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if any component is not properly percent-encoded,
    /// or if the host is a malformed IP literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::split;
    ///
    /// let uri = split("eXAMPLE://a/./b/../b/%63/%7bfoo%7d");
    /// assert_eq!(uri.normalize()?, "example://a/b/c/%7Bfoo%7D");
    /// # Ok::<_, generic_uri::ComponentError>(())
    /// ```
    pub fn normalize(&self) -> Result<SplitResult<String>, ComponentError> {
        Normalizer::new().normalize(self)
    }
}

/// An iterator over the decoded parameters of a query.
///
/// This struct is created by [`SplitResult::query_pairs`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct QueryPairs<'a, 'd> {
    rem: Option<&'a str>,
    delims: &'d [char],
    sep: char,
}

/// A decoded query parameter.
pub type QueryPair<'a> = (Cow<'a, str>, Option<Cow<'a, str>>);

impl<'a> Iterator for QueryPairs<'a, '_> {
    type Item = Result<QueryPair<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rem = self.rem?;
            let param = match rem.find(self.delims) {
                Some(i) => {
                    let delim_len = rem[i..].chars().next().map_or(1, char::len_utf8);
                    self.rem = Some(&rem[i + delim_len..]);
                    &rem[..i]
                }
                None => {
                    self.rem = None;
                    rem
                }
            };
            if !param.is_empty() {
                return Some(decode_param(param, self.sep));
            }
        }
    }
}

impl FusedIterator for QueryPairs<'_, '_> {}

fn decode_param(param: &str, sep: char) -> Result<QueryPair<'_>, DecodeError> {
    let (name, value) = match param.split_once(sep) {
        Some((name, value)) => (name, Some(value)),
        None => (param, None),
    };
    Ok((
        pct_enc::decode(name)?,
        value.map(pct_enc::decode).transpose()?,
    ))
}

impl<T: Bos<str> + Default> Default for SplitResult<T> {
    fn default() -> Self {
        Self {
            val: T::default(),
            meta: Meta::default(),
        }
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<SplitResult<U>> for SplitResult<T> {
    fn eq(&self, other: &SplitResult<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for SplitResult<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<SplitResult<T>> for str {
    fn eq(&self, other: &SplitResult<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for SplitResult<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<SplitResult<T>> for &str {
    fn eq(&self, other: &SplitResult<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for SplitResult<T> {}

impl<T: Bos<str>> hash::Hash for SplitResult<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for SplitResult<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for SplitResult<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for SplitResult<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for SplitResult<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> From<&'a str> for SplitResult<&'a str> {
    #[inline]
    fn from(value: &'a str) -> Self {
        SplitResult::new(value)
    }
}

impl From<String> for SplitResult<String> {
    #[inline]
    fn from(value: String) -> Self {
        SplitResult::new(value)
    }
}

impl<'a> From<SplitResult<&'a str>> for &'a str {
    #[inline]
    fn from(value: SplitResult<&'a str>) -> &'a str {
        value.val
    }
}

impl From<SplitResult<String>> for String {
    #[inline]
    fn from(value: SplitResult<String>) -> String {
        value.val
    }
}

impl From<SplitResult<&str>> for SplitResult<String> {
    #[inline]
    fn from(value: SplitResult<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for SplitResult<String> {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SplitResult::new(s.to_owned()))
    }
}

impl<T: Bos<str>> fmt::Debug for SplitResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitResult")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for SplitResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for SplitResult<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SplitResult<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <&str>::deserialize(deserializer).map(SplitResult::new)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SplitResult<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SplitResult::new)
    }
}
