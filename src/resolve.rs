//! Module for reference resolution.

use crate::split::{Components, SplitResult};
use alloc::{string::String, vec::Vec};
use borrow_or_share::Bos;
use core::fmt;

/// A configurable URI reference resolver against a fixed base.
///
/// The resolver implements the algorithm from
/// [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2).
/// Resolution never fails and a base without a scheme is accepted.
/// A `..` segment with nothing to remove is dropped from a rooted path
/// and kept in an unrooted one, so `../..` stays `../..`.
///
/// # Examples
///
/// ```
/// use generic_uri::{split, Resolver};
///
/// let resolver = Resolver::with_base(split("http://example.com/foo/bar"));
///
/// assert_eq!(resolver.resolve(&split("baz")), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve(&split("../baz")), "http://example.com/baz");
/// assert_eq!(resolver.resolve(&split("?baz")), "http://example.com/foo/bar?baz");
/// ```
#[derive(Clone, Copy)]
#[must_use]
pub struct Resolver<T> {
    base: SplitResult<T>,
    strict: bool,
}

impl<T: Bos<str>> Resolver<T> {
    /// Creates a new `Resolver` with the given base.
    pub fn with_base(base: SplitResult<T>) -> Self {
        Self { base, strict: true }
    }

    /// Sets whether a reference scheme equal to the base scheme
    /// still makes the reference absolute.
    ///
    /// This defaults to `true`, as RFC 3986 requires. A value of `false`
    /// selects the backward-compatible behavior from
    /// [Section 5.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.2),
    /// where such a scheme is ignored. Schemes are then compared
    /// case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use generic_uri::{split, Resolver};
    ///
    /// let base = split("http://a/b/c/d;p?q");
    ///
    /// let strict = Resolver::with_base(base);
    /// assert_eq!(strict.resolve(&split("http:g")), "http:g");
    ///
    /// let loose = Resolver::with_base(base).strict(false);
    /// assert_eq!(loose.resolve(&split("HTTP:g")), "http://a/b/c/g");
    /// ```
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Returns the base of the resolver.
    pub fn base(&self) -> &SplitResult<T> {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// The fragment of the base is ignored and the fragment of the
    /// target is always that of the reference.
    #[must_use]
    pub fn resolve<U: Bos<str>>(&self, reference: &SplitResult<U>) -> SplitResult<String> {
        transform(&self.base.components(), &reference.components(), self.strict)
    }
}

impl<T: Bos<str>> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base", &self.base)
            .field("strict", &self.strict)
            .finish()
    }
}

/// Transforms a reference into its target against a base.
pub(crate) fn transform(
    base: &Components<'_>,
    /* reference */ r: &Components<'_>,
    strict: bool,
) -> SplitResult<String> {
    let mut buf = String::new();

    let (t_scheme, t_authority, t_path, t_query);

    let r_scheme_applies = match (r.scheme, base.scheme) {
        (Some(_), _) if strict => true,
        (Some(rs), Some(bs)) => !rs.eq_ignore_ascii_case(bs),
        (Some(_), None) => true,
        (None, _) => false,
    };

    if r_scheme_applies {
        t_scheme = r.scheme;
        t_authority = r.authority;
        t_path = remove_dot_segments(r.path);
        t_query = r.query;
    } else {
        if r.authority.is_some() {
            t_authority = r.authority;
            t_path = remove_dot_segments(r.path);
            t_query = r.query;
        } else {
            if r.path.is_empty() {
                t_path = base.path.into();
                t_query = r.query.or(base.query);
            } else {
                if r.path.starts_with('/') {
                    t_path = remove_dot_segments(r.path);
                } else {
                    if base.authority.is_some() && base.path.is_empty() {
                        buf.reserve_exact(r.path.len() + 1);
                        buf.push('/');
                    } else if let Some(i) = base.path.rfind('/') {
                        buf.reserve_exact(i + 1 + r.path.len());
                        buf.push_str(&base.path[..=i]);
                    }
                    buf.push_str(r.path);
                    t_path = remove_dot_segments(&buf);
                }
                t_query = r.query;
            }
            t_authority = base.authority;
        }
        t_scheme = base.scheme;
    }

    let prefix = path_prefix(t_scheme.is_some(), t_authority.is_some(), &t_path);

    buf.clear();
    buf.reserve_exact(
        t_scheme.map_or(0, |s| s.len() + 1)
            + t_authority.map_or(0, |s| s.len() + 2)
            + prefix.len()
            + t_path.len()
            + t_query.map_or(0, |s| s.len() + 1)
            + r.fragment.map_or(0, |s| s.len() + 1),
    );

    if let Some(scheme) = t_scheme {
        buf.push_str(scheme);
        buf.push(':');
    }
    if let Some(authority) = t_authority {
        buf.push_str("//");
        buf.push_str(authority);
    }
    buf.push_str(prefix);
    buf.push_str(&t_path);
    if let Some(query) = t_query {
        buf.push('?');
        buf.push_str(query);
    }
    if let Some(fragment) = r.fragment {
        buf.push('#');
        buf.push_str(fragment);
    }

    SplitResult::new(buf)
}

/// Returns what to put before a target path so that the serialized
/// target splits back into the same components.
pub(crate) fn path_prefix(has_scheme: bool, has_authority: bool, path: &str) -> &'static str {
    if has_authority {
        ""
    } else if path.starts_with("//") {
        "/."
    } else if !has_scheme && first_segment_has_colon(path) {
        "./"
    } else {
        ""
    }
}

pub(crate) fn first_segment_has_colon(path: &str) -> bool {
    path.split('/').next().is_some_and(|seg| seg.contains(':'))
}

/// Removes the `.` and `..` segments from a path as described in
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// A `..` segment with nothing to remove is dropped from a path that starts
/// with `/` and kept from one that doesn't. A trailing `.` or `..` segment
/// leaves a trailing slash behind, so an unrooted path whose segments all
/// cancel out becomes `./`. Removing dot segments twice is the same
/// as removing them once.
///
/// # Examples
///
/// ```
/// use generic_uri::resolve::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../g"), "/g");
/// assert_eq!(remove_dot_segments("../.."), "../..");
/// assert_eq!(remove_dot_segments("/a/b/.."), "/a/");
/// assert_eq!(remove_dot_segments("a/b/../.."), "./");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let (rooted, rest) = match path.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, path),
    };

    let mut out: Vec<&str> = Vec::new();
    let mut kept_double_dot = false;

    for seg in rest.split('/') {
        kept_double_dot = false;
        match seg {
            "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                _ if rooted => {}
                _ => {
                    out.push("..");
                    kept_double_dot = true;
                }
            },
            _ => out.push(seg),
        }
    }

    if !kept_double_dot && (path.ends_with("/.") || path.ends_with("/..")) {
        out.push("");
    }

    let mut buf = String::with_capacity(path.len() + 2);
    if rooted {
        buf.push('/');
    } else if !path.is_empty() && out.first() == Some(&"") {
        // An unrooted path must not start with an empty segment.
        buf.push_str("./");
    }
    for (i, seg) in out.iter().enumerate() {
        if i != 0 {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    buf
}
