use super::{BuildError, QuerySeparators};
use crate::{
    component::{Host, Scheme},
    error::ComponentError,
    parse,
    pct_enc::{self, table, Table},
    resolve,
};
use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub struct BuilderInner {
    pub buf: String,
    pub has_scheme: bool,
    pub has_authority: bool,
    pub separators: QuerySeparators,
    pub err: Option<BuildError>,
}

impl BuilderInner {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            has_scheme: false,
            has_authority: false,
            separators: QuerySeparators::default(),
            err: None,
        }
    }

    // Only the first error is kept.
    pub fn fail(&mut self, e: BuildError) {
        self.err.get_or_insert(e);
    }

    pub fn push_scheme(&mut self, v: &str) {
        match Scheme::new(v) {
            Some(scheme) => {
                self.buf.push_str(&scheme.to_lowercase());
                self.buf.push(':');
                self.has_scheme = true;
            }
            None => self.fail(BuildError::InvalidScheme),
        }
    }

    pub fn start_authority(&mut self) {
        self.buf.push_str("//");
        self.has_authority = true;
    }

    pub fn push_authority(&mut self, v: &str) {
        self.start_authority();

        let meta = parse::split_authority(v);
        let (start, end) = meta.host_bounds;
        if start != 0 {
            self.push_userinfo(&v[..start - 1]);
        }
        push_text_host(self, &v[start..end]);
        if end != v.len() {
            // The port is all digits by construction.
            self.push_port(&v[end + 1..]);
        }
    }

    pub fn push_userinfo(&mut self, v: &str) {
        pct_enc::encode_to(v.as_bytes(), table::USERINFO, &mut self.buf);
        self.buf.push('@');
    }

    pub fn push_reg_name(&mut self, v: &str) {
        let lower = v.to_ascii_lowercase();
        pct_enc::encode_to(lower.as_bytes(), table::REG_NAME, &mut self.buf);
    }

    pub fn push_port(&mut self, v: &str) {
        if !v.bytes().all(|x| x.is_ascii_digit()) {
            self.fail(BuildError::InvalidPort);
        } else if !v.is_empty() {
            self.buf.push(':');
            self.buf.push_str(v);
        }
    }

    pub fn push_path(&mut self, v: &str) {
        let path = pct_enc::encode_with(v.as_bytes(), table::PATH);

        if self.has_authority {
            if !path.is_empty() && !path.starts_with('/') {
                self.fail(BuildError::NonemptyRootlessPath);
            }
        } else if path.starts_with("//") {
            self.fail(BuildError::PathStartsWithDoubleSlash);
        }

        self.buf.push_str(resolve::path_prefix(
            self.has_scheme,
            self.has_authority,
            &path,
        ));
        self.buf.push_str(&path);
    }

    pub fn push_query(&mut self, v: &str) {
        self.buf.push('?');
        pct_enc::encode_to(v.as_bytes(), table::QUERY, &mut self.buf);
    }

    pub fn push_query_pairs<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: QueryValue,
    {
        let QuerySeparators { pair, name_value } = self.separators;
        let table = table::QUERY.sub(char_table(pair)).sub(char_table(name_value));

        let mut terms: Vec<String> = Vec::new();
        for (name, value) in pairs {
            let name = pct_enc::encode_with(name.as_ref().as_bytes(), table);
            value.for_each_value(&mut |value| {
                let mut term = name.clone();
                if let Some(value) = value {
                    term.push(name_value);
                    pct_enc::encode_to(value.as_bytes(), table, &mut term);
                }
                terms.push(term);
            });
        }

        self.buf.push('?');
        for (i, term) in terms.iter().enumerate() {
            if i != 0 {
                self.buf.push(pair);
            }
            self.buf.push_str(term);
        }
    }

    pub fn push_fragment(&mut self, v: &str) {
        self.buf.push('#');
        pct_enc::encode_to(v.as_bytes(), table::FRAGMENT, &mut self.buf);
    }
}

fn char_table(c: char) -> Table {
    if c.is_ascii() {
        Table::new(&[c as u8])
    } else {
        // Non-ASCII characters are always encoded.
        Table::default()
    }
}

fn push_ip_literal(b: &mut BuilderInner, literal: &str) {
    match parse::parse_ip_literal(literal) {
        Ok(addr) => addr.push_to(b),
        Err(ComponentError::UnsupportedIpLiteral) => b.fail(BuildError::UnsupportedIpLiteral),
        Err(_) => b.fail(BuildError::InvalidIpLiteral),
    }
}

fn push_text_host(b: &mut BuilderInner, host: &str) {
    if let Some(literal) = host
        .strip_prefix('[')
        .and_then(|rem| rem.strip_suffix(']'))
    {
        push_ip_literal(b, literal);
    } else if let Some(addr) = parse::parse_v6(host.as_bytes()) {
        addr.push_to(b);
    } else {
        b.push_reg_name(host);
    }
}

pub trait AsHost {
    fn push_to(self, b: &mut BuilderInner);
}

impl AsHost for Ipv4Addr {
    fn push_to(self, b: &mut BuilderInner) {
        b.buf.push_str(&self.to_string());
    }
}

impl AsHost for Ipv6Addr {
    fn push_to(self, b: &mut BuilderInner) {
        b.buf.push('[');
        b.buf.push_str(&self.to_string());
        b.buf.push(']');
    }
}

impl AsHost for IpAddr {
    fn push_to(self, b: &mut BuilderInner) {
        match self {
            Self::V4(addr) => addr.push_to(b),
            Self::V6(addr) => addr.push_to(b),
        }
    }
}

impl AsHost for &str {
    fn push_to(self, b: &mut BuilderInner) {
        push_text_host(b, self);
    }
}

impl AsHost for &String {
    #[inline]
    fn push_to(self, b: &mut BuilderInner) {
        AsHost::push_to(self.as_str(), b);
    }
}

impl AsHost for &Host {
    fn push_to(self, b: &mut BuilderInner) {
        match self {
            Host::Ipv4(addr) => addr.push_to(b),
            Host::Ipv6(addr) => addr.push_to(b),
            Host::RegName(name) => b.push_reg_name(name),
        }
    }
}

pub trait AsPort {
    fn push_to(self, b: &mut BuilderInner);
}

impl AsPort for u16 {
    fn push_to(self, b: &mut BuilderInner) {
        b.buf.push(':');
        b.buf.push_str(&self.to_string());
    }
}

impl AsPort for &str {
    fn push_to(self, b: &mut BuilderInner) {
        b.push_port(self);
    }
}

/// A value that expands into zero or more values of a query parameter.
///
/// Text and numbers expand into one value. `None` expands into a single
/// parameter without value, i.e., a bare name. Sequences expand into
/// one parameter per element.
pub trait QueryValue {
    /// Calls `f` with every value this expands into.
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>));
}

impl QueryValue for str {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        f(Some(self));
    }
}

impl QueryValue for String {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        f(Some(self));
    }
}

impl QueryValue for Cow<'_, str> {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        f(Some(self));
    }
}

macro_rules! impl_query_value_display {
    ($($t:ty),+) => {
        $(
            impl QueryValue for $t {
                fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
                    f(Some(&self.to_string()));
                }
            }
        )+
    };
}

impl_query_value_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: QueryValue> QueryValue for Option<T> {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        match self {
            Some(value) => value.for_each_value(f),
            None => f(None),
        }
    }
}

impl<T: QueryValue> QueryValue for [T] {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        for value in self {
            value.for_each_value(f);
        }
    }
}

impl<T: QueryValue, const N: usize> QueryValue for [T; N] {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        self.as_slice().for_each_value(f);
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        self.as_slice().for_each_value(f);
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn for_each_value(&self, f: &mut dyn FnMut(Option<&str>)) {
        (**self).for_each_value(f);
    }
}
