use crate::pct_enc::{self, DecodeError};
use alloc::{borrow::Cow, string::String};
use core::fmt;

/// A URI reference with its fragment taken off.
///
/// This struct is created by [`defrag`](crate::defrag).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Defrag<'a> {
    /// Everything before the last `'#'`, or the whole input if there is none.
    pub base: &'a str,
    /// Everything after the last `'#'`, if any.
    pub fragment: Option<&'a str>,
}

impl<'a> Defrag<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        match s.rsplit_once('#') {
            Some((base, fragment)) => Self {
                base,
                fragment: Some(fragment),
            },
            None => Self {
                base: s,
                fragment: None,
            },
        }
    }

    /// Percent-decodes the fragment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the fragment is not properly percent-encoded.
    pub fn decode_fragment(&self) -> Result<Option<Cow<'a, str>>, DecodeError> {
        self.fragment.map(pct_enc::decode).transpose()
    }

    /// Recombines the base and the fragment.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        let mut buf = String::from(self.base);
        if let Some(fragment) = self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }
        buf
    }
}

impl fmt::Display for Defrag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base)?;
        if let Some(fragment) = self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_hash() {
        let d = Defrag::new("http://a/b#c#d");
        assert_eq!(d.base, "http://a/b#c");
        assert_eq!(d.fragment, Some("d"));
        assert_eq!(d.to_uri_string(), "http://a/b#c#d");

        let d = Defrag::new("http://a/b");
        assert_eq!(d.fragment, None);
        assert_eq!(d.to_uri_string(), "http://a/b");

        let d = Defrag::new("#");
        assert_eq!(d.base, "");
        assert_eq!(d.fragment, Some(""));
        assert_eq!(d.decode_fragment(), Ok(Some("".into())));
    }
}
