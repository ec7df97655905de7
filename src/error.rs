use crate::pct_enc::DecodeError;
use core::fmt;

/// An error occurred when interpreting a component of a split URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComponentError {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    InvalidScheme,
    /// The IP literal is not a valid `IPv6address`.
    InvalidIpLiteral,
    /// The IP literal is an `IPvFuture`, which is not supported.
    UnsupportedIpLiteral,
    /// The host has an opening square bracket without a closing one or vice versa.
    UnbalancedBrackets,
    /// The component contains malformed percent-encoding.
    Decode(DecodeError),
}

impl From<DecodeError> for ComponentError {
    #[inline]
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidIpLiteral => "invalid IP literal",
            Self::UnsupportedIpLiteral => "unsupported IPvFuture literal",
            Self::UnbalancedBrackets => "unbalanced square brackets in host",
            Self::Decode(e) => return write!(f, "malformed component: {e}"),
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ComponentError {
    fn source(&self) -> Option<&(dyn crate::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}
