use core::net::{Ipv4Addr, Ipv6Addr};

use generic_uri::{pct_enc::DecodeErrorKind, split, ComponentError, Host, Normalizer, Scheme};

#[track_caller]
fn check(s: &str, expected: &str) {
    let normalized = split(s).normalize().unwrap();
    assert_eq!(normalized, expected);
    // Normalization is idempotent.
    assert_eq!(normalized.normalize().unwrap(), expected);
}

#[test]
fn normalize() {
    // Example from Section 6.2 of RFC 3986.
    check("eXAMPLE://a/./b/../b/%63/%7bfoo%7d", "example://a/b/c/%7Bfoo%7D");

    // Lowercase percent-encoded octet.
    check("%3a", "%3A");

    // Uppercase letters in scheme and registered name.
    check("HTTP://www.EXAMPLE.com/", "http://www.example.com/");

    // Empty port.
    check("http://example.com:/", "http://example.com/");

    // Surplus double-dot segments.
    check("http://a/../../../g", "http://a/g");

    // Percent-encoded dot segments.
    check("http://a/b/c/%2E/%2E./%2e%2E/d", "http://a/d");

    // Don't remove dot segments from relative reference or rootless path.
    check("foo/../bar", "foo/../bar");
    check("/foo/../bar", "/foo/../bar");
    check("foo:bar/../baz", "foo:bar/../baz");

    // Do remove dot segments for a URI with absolute path.
    check("foo:/bar/./../baz", "foo:/baz");

    // However, make sure that the output splits the same way.
    check("foo:/.//@@", "foo:/.//@@");

    // Percent-encoded uppercase letters in registered name.
    check("HTTP://%45XAMPLE.%43Om", "http://example.com");

    // Percent-encoded unreserved characters.
    check(
        "%41%42%43%44%45%46%47%48%49%4A%4B%4C%4D%4E%4F%50%51%52%53%54%55%56%57%58%59%5A%61%62%63%64%65%66%67%68%69%6A%6B%6C%6D%6E%6F%70%71%72%73%74%75%76%77%78%79%7A%30%31%32%33%34%35%36%37%38%39%2D%2E%5F%7E",
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~",
    );

    // Percent-encoded reserved characters.
    let s = "%3A%2F%3F%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D%25";
    check(s, s);

    // Already normal.
    let s = "foo://user@example.com:8042/over/there?name=ferret#nose";
    check(s, s);

    // Normalization in all components.
    check(
        "FOO://%55se%72@EXamp%4ce%2ecom:8042/%4b%2f?%4c%2b#%24%4d",
        "foo://User@example.com:8042/K%2F?L%2B#%24M",
    );
}

#[test]
fn normalize_hosts() {
    // Normal IPv4 address.
    check("//127.0.0.1", "//127.0.0.1");

    // Percent-encoded IPv4 address.
    let r = split("//127.0.0.%31").normalize().unwrap();
    assert_eq!(r, "//127.0.0.1");
    assert_eq!(r.host_parsed(), Ok(Some(Host::Ipv4(Ipv4Addr::LOCALHOST))));

    // Normal IPv6 address.
    check("//[::1]", "//[::1]");

    // Verbose IPv6 address.
    let r = split("//[0000:0000:0000::1]").normalize().unwrap();
    assert_eq!(r, "//[::1]");
    assert_eq!(r.host_parsed(), Ok(Some(Host::Ipv6(Ipv6Addr::LOCALHOST))));

    // Uppercase IPv6 address.
    check("//[FE80::ABCD]:1", "//[fe80::abcd]:1");

    // IPv4-mapped IPv6 address.
    check("//[0:0:0:0:0:ffff:192.0.2.1]", "//[::ffff:192.0.2.1]");

    // Deprecated IPv4-compatible IPv6 address.
    check("//[::192.0.2.1]", "//[::c000:201]");

    // Empty host.
    check("file:///etc/hosts", "file:///etc/hosts");
}

#[test]
fn normalize_errors() {
    let err = |s: &str| split(s).normalize().unwrap_err();

    assert_eq!(err("//[v1FdE.AddR]"), ComponentError::UnsupportedIpLiteral);
    assert_eq!(err("//[::1::]"), ComponentError::InvalidIpLiteral);
    assert_eq!(err("//[::1"), ComponentError::UnbalancedBrackets);

    for s in ["%", "?%4", "#%zz", "//%g@a", "//a%"] {
        match err(s) {
            ComponentError::Decode(e) => assert_eq!(e.kind(), DecodeErrorKind::InvalidOctet),
            e => panic!("unexpected error for {s:?}: {e:?}"),
        }
    }
}

fn default_port(scheme: &Scheme) -> Option<u16> {
    const HTTP: &Scheme = Scheme::new_or_panic("http");
    const HTTPS: &Scheme = Scheme::new_or_panic("https");

    if scheme == HTTP {
        Some(80)
    } else if scheme == HTTPS {
        Some(443)
    } else {
        None
    }
}

#[test]
fn normalize_default_port() {
    let normalizer = Normalizer::new().default_port_with(default_port);
    let normalize = |s: &str| normalizer.normalize(&split(s)).unwrap();

    assert_eq!(normalize("http://example.com:80/"), "http://example.com/");
    assert_eq!(normalize("HTTPS://example.com:443"), "https://example.com");
    assert_eq!(normalize("http://example.com:443/"), "http://example.com:443/");
    assert_eq!(normalize("ftp://example.com:80/"), "ftp://example.com:80/");
    assert_eq!(normalize("//example.com:80/"), "//example.com:80/");

    // The default normalizer knows no default port.
    assert_eq!(
        split("http://example.com:80/").normalize().unwrap(),
        "http://example.com:80/"
    );
    assert_eq!(
        Normalizer::default().normalize(&split("http://a:80")).unwrap(),
        "http://a:80"
    );
}
