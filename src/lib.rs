#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Scheme-agnostic URI handling following IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! This crate splits a URI reference into its five components without
//! validating it, and builds the operations every URI-consuming program
//! needs on top of that split:
//!
//! - [`split`] and [`unsplit`]: the [Appendix B] regular expression and its
//!   exact inverse. Splitting never fails.
//! - [`Authority`]: userinfo, host and port, with IP literal parsing.
//! - [`pct_enc`]: percent-encoding and decoding with customizable safe sets.
//! - [`resolve`](resolve()) and [`Resolver`]: reference resolution,
//!   including [dot segment removal](resolve::remove_dot_segments).
//! - [`Builder`]: composition of a URI reference from its components,
//!   encoding each one as needed.
//! - [`Normalizer`]: syntax-based normalization.
//!
//! [Appendix B]: https://datatracker.ietf.org/doc/html/rfc3986#appendix-B
//!
//! # Examples
//!
//! ```
//! use generic_uri::{resolve, split, SplitResult};
//!
//! let uri = split("HTTP://user@Example.COM:8080/a/b?q=1#frag");
//! assert_eq!(uri.scheme(), Some("HTTP"));
//! assert_eq!(uri.decode_host()?, Some("example.com".into()));
//! assert_eq!(uri.port_to_u16(), Ok(Some(8080)));
//!
//! assert_eq!(resolve("http://a/b/c/d;p?q", "../g"), "http://a/b/g");
//!
//! let built = SplitResult::builder()
//!     .scheme("foo")
//!     .authority_with(|b| b.host("example.com"))
//!     .path("/over there")
//!     .query("a=b")
//!     .build()?;
//! assert_eq!(built, "foo://example.com/over%20there?a=b");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate features
//!
//! - `std` (default): Enables `std` support. This includes the cache of
//!   safe-set tables used by [`encode`] and implies `impl-error`.
//!
//! - `impl-error`: Implements [`Error`] for error types.
//!
//!   This is enabled by `std`. Requires Rust 1.81 or later when used
//!   without `std`.
//!
//! - `serde`: Implements [`Serialize`] and [`Deserialize`] for [`SplitResult`].
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

extern crate alloc;

#[cfg(feature = "impl-error")]
pub use core::error::Error;

pub mod build;
pub mod component;
pub mod normalize;
pub mod pct_enc;
pub mod resolve;

mod defrag;
mod error;
mod parse;
mod split;

pub use build::{BuildError, Builder};
pub use component::{Authority, Host, Scheme};
pub use defrag::Defrag;
pub use error::ComponentError;
pub use normalize::Normalizer;
pub use pct_enc::{decode, decode_to_bytes, encode, encode_bytes, Table};
pub use resolve::Resolver;
pub use split::{unsplit, Components, QueryPair, QueryPairs, SplitResult, QUERY_DELIMS};

use alloc::string::String;

/// Splits a URI reference into its components.
///
/// Splitting never fails. An invalid reference still splits, and is only
/// rejected by the operations that need a valid component.
///
/// # Examples
///
/// ```
/// use generic_uri::split;
///
/// let uri = split("http://[::1]:80?#");
/// assert_eq!(uri.path(), "");
/// assert_eq!(uri.query(), Some(""));
/// assert_eq!(uri.fragment(), Some(""));
///
/// let uri = split("a/b:c");
/// assert_eq!(uri.scheme(), None);
/// assert_eq!(uri.path(), "a/b:c");
/// ```
#[inline]
#[must_use]
pub fn split(s: &str) -> SplitResult<&str> {
    SplitResult::new(s)
}

/// Resolves a reference against a base with strict RFC 3986 semantics.
///
/// # Examples
///
/// ```
/// use generic_uri::resolve;
///
/// assert_eq!(resolve("http://a/b/c/d;p?q", "g;x?y#s"), "http://a/b/c/g;x?y#s");
/// assert_eq!(resolve("http://a/b/c/d;p?q", "http:g"), "http:g");
/// ```
#[must_use]
pub fn resolve(base: &str, reference: &str) -> String {
    split(reference).resolve_against(&split(base)).into_string()
}

/// Resolves a reference against a base, ignoring a reference scheme
/// that equals the base scheme case-insensitively.
///
/// # Examples
///
/// ```
/// use generic_uri::resolve_loose;
///
/// assert_eq!(resolve_loose("http://a/b/c/d;p?q", "http:g"), "http://a/b/c/g");
/// assert_eq!(resolve_loose("http://a/b/c/d;p?q", "ftp:g"), "ftp:g");
/// ```
#[must_use]
pub fn resolve_loose(base: &str, reference: &str) -> String {
    Resolver::with_base(split(base))
        .strict(false)
        .resolve(&split(reference))
        .into_string()
}

/// Splits a URI reference at the last `'#'`.
///
/// # Examples
///
/// ```
/// use generic_uri::defrag;
///
/// let d = defrag("http://a/b#c");
/// assert_eq!(d.base, "http://a/b");
/// assert_eq!(d.fragment, Some("c"));
/// ```
#[inline]
#[must_use]
pub fn defrag(s: &str) -> Defrag<'_> {
    Defrag::new(s)
}
