#![cfg(feature = "serde")]

use generic_uri::{split, SplitResult};
use serde_test::{assert_de_tokens, assert_ser_tokens, assert_tokens, Token};

#[test]
fn borrowed() {
    let r = split("http://example.com/a?b#c");
    assert_ser_tokens(&r, &[Token::Str("http://example.com/a?b#c")]);
    assert_de_tokens(&r, &[Token::BorrowedStr("http://example.com/a?b#c")]);
}

#[test]
fn owned() {
    let r = split("foo:bar").to_owned();
    assert_tokens(&r, &[Token::Str("foo:bar")]);
    assert_de_tokens(&r, &[Token::String("foo:bar")]);

    // Deserialization splits the string again.
    let r: SplitResult<String> = "//h:1".parse().unwrap();
    assert_de_tokens(&r, &[Token::Str("//h:1")]);
    assert_eq!(r.port(), Some("1"));
}
