//! Module for URI reference building.

#![allow(missing_debug_implementations)]

mod imp;
pub mod state;

pub use imp::QueryValue;

use imp::*;
use state::*;

use crate::split::SplitResult;
use alloc::string::String;
use core::{fmt, marker::PhantomData};

/// An error occurred when building a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    InvalidScheme,
    /// The host is a bracketed IP literal that is not a valid `IPv6address`.
    InvalidIpLiteral,
    /// The host is a bracketed `IPvFuture` literal, which is not supported.
    UnsupportedIpLiteral,
    /// The port contains a character other than a decimal digit.
    InvalidPort,
    /// Authority is present, but the path is not empty and does not start with `'/'`.
    NonemptyRootlessPath,
    /// Authority is not present, but the path starts with `"//"`.
    PathStartsWithDoubleSlash,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidIpLiteral => "invalid IP literal",
            Self::UnsupportedIpLiteral => "unsupported IPvFuture literal",
            Self::InvalidPort => "port should consist of decimal digits",
            Self::NonemptyRootlessPath => {
                "when authority is present, path should either be empty or start with '/'"
            }
            Self::PathStartsWithDoubleSlash => {
                "when authority is not present, path should not start with \"//\""
            }
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for BuildError {}

/// The separators used when composing a query from parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct QuerySeparators {
    /// The separator between parameters.
    pub pair: char,
    /// The separator between the name and the value of a parameter.
    pub name_value: char,
}

impl Default for QuerySeparators {
    fn default() -> Self {
        Self {
            pair: '&',
            name_value: '=',
        }
    }
}

/// A builder for URI reference.
///
/// This struct is created by [`SplitResult::builder`].
///
/// Every component is given as unencoded text and percent-encoded
/// on the way in, with the characters allowed in that component
/// left as they are.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use generic_uri::SplitResult;
///
/// let uri = SplitResult::builder()
///     .scheme("FOO")
///     .authority_with(|b| b.userinfo("user").host("Example.com").port(8042))
///     .path("/over/there")
///     .query_pairs([("name", "ferret")])
///     .fragment("nose")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     uri.as_str(),
///     "foo://user@example.com:8042/over/there?name=ferret#nose"
/// );
/// ```
///
/// # Constraints
///
/// Typestates are used to avoid misconfigurations,
/// which puts the following constraints:
///
/// - Components must be set from start to end, no repetition allowed.
/// - Methods [`userinfo`], [`host`], and [`port`] are only available
///   within a call to [`authority_with`].
/// - Setting [`host`] is mandatory within a call to [`authority_with`].
///
/// You may otherwise skip setting optional components
/// (scheme, authority, userinfo, port, path, query, and fragment)
/// with [`advance`] or set them optionally with [`optional`].
/// A skipped path is empty.
///
/// Checks that depend on the input values are deferred: the first
/// failure is reported by [`build`].
///
/// [`advance`]: Self::advance
/// [`optional`]: Self::optional
/// [`authority_with`]: Self::authority_with
/// [`userinfo`]: Self::userinfo
/// [`host`]: Self::host
/// [`port`]: Self::port
/// [`build`]: Self::build
#[must_use]
pub struct Builder<S> {
    inner: BuilderInner,
    _marker: PhantomData<S>,
}

impl Builder<Start> {
    pub(crate) fn new() -> Self {
        Self {
            inner: BuilderInner::new(),
            _marker: PhantomData,
        }
    }
}

impl<S> Builder<S> {
    fn cast<T>(self) -> Builder<T>
    where
        S: To<T>,
    {
        self.cast_unchecked()
    }

    fn cast_unchecked<T>(self) -> Builder<T> {
        Builder {
            inner: self.inner,
            _marker: PhantomData,
        }
    }

    /// Advances the builder state, skipping optional components in between.
    ///
    /// Variable rebinding may be necessary as this changes the type of the builder.
    ///
    /// ```
    /// use generic_uri::SplitResult;
    ///
    /// fn build(relative: bool) -> SplitResult<String> {
    ///     let b = SplitResult::builder();
    ///     let b = if relative {
    ///         b.advance()
    ///     } else {
    ///         b.scheme("http").authority_with(|b| b.host("example.com"))
    ///     };
    ///     b.path("/foo").build().unwrap()
    /// }
    ///
    /// assert_eq!(build(false).as_str(), "http://example.com/foo");
    /// assert_eq!(build(true).as_str(), "/foo");
    /// ```
    pub fn advance<T>(self) -> Builder<T>
    where
        S: AdvanceTo<T>,
    {
        self.cast_unchecked()
    }

    /// Optionally calls a builder method with a value.
    ///
    /// ```
    /// use generic_uri::{build::Builder, SplitResult};
    ///
    /// let uri = SplitResult::builder()
    ///     .path("foo")
    ///     .optional(Builder::query, Some("bar"))
    ///     .optional(Builder::fragment, None)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(uri.as_str(), "foo?bar");
    /// ```
    pub fn optional<F, V, T>(self, f: F, opt: Option<V>) -> Builder<T>
    where
        F: FnOnce(Self, V) -> Builder<T>,
        S: AdvanceTo<T>,
    {
        match opt {
            Some(value) => f(self, value),
            None => self.advance(),
        }
    }

    /// Sets the separators used by [`query_pairs`] and [`query_map`].
    ///
    /// These default to `'&'` between parameters and `'='` between
    /// the name and the value.
    ///
    /// [`query_pairs`]: Self::query_pairs
    /// [`query_map`]: Self::query_map
    pub fn separators(mut self, separators: QuerySeparators) -> Self {
        self.inner.separators = separators;
        self
    }
}

impl<S: To<SchemeEnd>> Builder<S> {
    /// Sets the [scheme] component.
    ///
    /// The scheme is validated and written in lowercase, its canonical form.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    pub fn scheme(mut self, scheme: &str) -> Builder<SchemeEnd> {
        self.inner.push_scheme(scheme);
        self.cast()
    }
}

impl<S: To<AuthorityStart>> Builder<S> {
    /// Builds the [authority] component with the given function.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    pub fn authority_with<F, T>(mut self, f: F) -> Builder<AuthorityEnd>
    where
        F: FnOnce(Builder<AuthorityStart>) -> Builder<T>,
        T: To<AuthorityEnd>,
    {
        self.inner.start_authority();
        f(self.cast()).cast()
    }

    /// Sets the [authority] component from text.
    ///
    /// The text is split into userinfo, host and port, and each of them
    /// is then treated as if set by [`authority_with`].
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    /// [`authority_with`]: Self::authority_with
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::SplitResult;
    ///
    /// let uri = SplitResult::builder()
    ///     .scheme("http")
    ///     .authority("user name@[::FFFF:127.0.0.1]:")
    ///     .path("")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(uri, "http://user%20name@[::ffff:127.0.0.1]");
    /// ```
    pub fn authority(mut self, authority: &str) -> Builder<AuthorityEnd> {
        self.inner.push_authority(authority);
        self.cast_unchecked()
    }
}

impl<S: To<UserinfoEnd>> Builder<S> {
    /// Sets the [userinfo][userinfo-rfc] subcomponent of authority.
    ///
    /// [userinfo-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    pub fn userinfo(mut self, userinfo: &str) -> Builder<UserinfoEnd> {
        self.inner.push_userinfo(userinfo);
        self.cast()
    }
}

impl<S: To<HostEnd>> Builder<S> {
    /// Sets the [host] subcomponent of authority.
    ///
    /// This method takes either an [`Ipv4Addr`], [`Ipv6Addr`], [`IpAddr`],
    /// <code>&amp;[Host]</code>, `&str` or `&String` as argument.
    ///
    /// A text host enclosed in square brackets must be a valid IPv6 address.
    /// A text host that is a valid IPv6 address without the brackets is
    /// bracketed. In both cases the address is written in its canonical form.
    /// Any other text host is written in lowercase and percent-encoded.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    /// [`Ipv4Addr`]: core::net::Ipv4Addr
    /// [`Ipv6Addr`]: core::net::Ipv6Addr
    /// [`IpAddr`]: core::net::IpAddr
    /// [Host]: crate::Host
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::SplitResult;
    ///
    /// let build = |host| {
    ///     SplitResult::builder()
    ///         .authority_with(|b| b.host(host))
    ///         .path("")
    ///         .build()
    /// };
    ///
    /// assert_eq!(build("0:0::1").unwrap(), "//[::1]");
    /// assert_eq!(build("Straße.Example").unwrap(), "//stra%C3%9Fe.example");
    /// assert!(build("[v1.x]").is_err());
    /// ```
    pub fn host(mut self, host: impl AsHost) -> Builder<HostEnd> {
        host.push_to(&mut self.inner);
        self.cast()
    }
}

impl<S: To<PortEnd>> Builder<S> {
    /// Sets the [port][port-rfc] subcomponent of authority.
    ///
    /// This method takes either a `u16` or a `&str` as argument.
    /// A text port must consist of decimal digits. An empty port
    /// is omitted together with its `':'`.
    ///
    /// [port-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    pub fn port(mut self, port: impl AsPort) -> Builder<PortEnd> {
        port.push_to(&mut self.inner);
        self.cast()
    }
}

impl<S: To<PathEnd>> Builder<S> {
    /// Sets the [path][path-rfc] component.
    ///
    /// When neither scheme nor authority is present and the first
    /// path segment contains `':'`, the path is prefixed with `"./"`.
    ///
    /// [path-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    pub fn path(mut self, path: &str) -> Builder<PathEnd> {
        self.inner.push_path(path);
        self.cast()
    }
}

impl<S: To<QueryEnd>> Builder<S> {
    /// Sets the [query][query-rfc] component from text.
    ///
    /// [query-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    pub fn query(mut self, query: &str) -> Builder<QueryEnd> {
        self.inner.push_query(query);
        self.cast()
    }

    /// Sets the [query][query-rfc] component from a sequence of parameters.
    ///
    /// Names and values are percent-encoded and joined with the configured
    /// [`separators`](Self::separators). Each value expands as described
    /// in [`QueryValue`].
    ///
    /// [query-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::SplitResult;
    ///
    /// let uri = SplitResult::builder()
    ///     .path("")
    ///     .query_pairs([("q", Some("a&b")), ("flag", None)])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(uri, "?q=a%26b&flag");
    /// ```
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Builder<QueryEnd>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: QueryValue,
    {
        self.inner.push_query_pairs(pairs);
        self.cast()
    }

    /// Sets the [query][query-rfc] component from the entries of a map.
    ///
    /// A sequence value produces one parameter per element, in order.
    ///
    /// [query-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{build::QuerySeparators, SplitResult};
    /// use std::collections::BTreeMap;
    ///
    /// let map = BTreeMap::from([("a", vec![1, 2]), ("b", vec![])]);
    /// let uri = SplitResult::builder()
    ///     .separators(QuerySeparators { pair: ';', name_value: '=' })
    ///     .path("")
    ///     .query_map(&map)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(uri, "?a=1;a=2");
    /// ```
    pub fn query_map<M, K, V>(self, map: M) -> Builder<QueryEnd>
    where
        M: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: QueryValue,
    {
        self.query_pairs(map)
    }
}

impl<S: To<FragmentEnd>> Builder<S> {
    /// Sets the [fragment][fragment-rfc] component.
    ///
    /// [fragment-rfc]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    pub fn fragment(mut self, fragment: &str) -> Builder<FragmentEnd> {
        self.inner.push_fragment(fragment);
        self.cast()
    }
}

impl<S: To<End>> Builder<S> {
    /// Builds the URI reference.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while setting the components:
    ///
    /// - the scheme is invalid;
    /// - the host is an invalid or unsupported IP literal;
    /// - the port is not made of decimal digits;
    /// - authority is present and the path is neither empty nor starts with `'/'`;
    /// - authority is not present and the path starts with `"//"`.
    pub fn build(self) -> Result<SplitResult<String>, BuildError> {
        match self.inner.err {
            Some(e) => Err(e),
            None => Ok(SplitResult::new(self.inner.buf)),
        }
    }
}
