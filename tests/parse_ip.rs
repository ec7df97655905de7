use core::net::{Ipv4Addr, Ipv6Addr};

use generic_uri::{split, BuildError, ComponentError, Host, SplitResult};

fn host_of(authority: &str) -> Result<Option<Host>, ComponentError> {
    split(&format!("//{authority}")).host_parsed()
}

fn build_host(host: &str) -> Result<SplitResult<String>, BuildError> {
    SplitResult::builder()
        .authority_with(|b| b.host(host))
        .path("")
        .build()
}

#[test]
fn authority_parts() {
    let cases = [
        ("user@[::1]:8080", Some("user"), "[::1]", Some("8080")),
        ("[::1]", None, "[::1]", None),
        ("[::1]:", None, "[::1]", Some("")),
        // Only an all-digit tail after the last colon is a port.
        ("a:b:80", None, "a:b", Some("80")),
        ("a:8x", None, "a:8x", None),
        ("::1", None, ":", Some("1")),
        ("u:p@h", Some("u:p"), "h", None),
        ("a@b@c:1", Some("a@b"), "c", Some("1")),
        ("@:", Some(""), "", Some("")),
        ("", None, "", None),
    ];
    for (authority, userinfo, host, port) in cases {
        let s = format!("//{authority}");
        let r = split(&s);
        let auth = r.authority_parsed().unwrap();
        assert_eq!(auth.userinfo(), userinfo, "{authority}");
        assert_eq!(auth.host(), host, "{authority}");
        assert_eq!(auth.port(), port, "{authority}");
    }

    assert!(split("/a:1").authority_parsed().is_none());
}

#[test]
fn decoded_hosts() {
    let cases = [
        ("//user@[FE80::1]:8080", "fe80::1"),
        ("//[::FFFF:192.0.2.33]", "::ffff:192.0.2.33"),
        ("//127.0.0.1:80", "127.0.0.1"),
        ("//Ex%41mple.COM", "example.com"),
        ("//a:b:80", "a:b"),
        ("//:80", ""),
    ];
    for (uri, host) in cases {
        assert_eq!(split(uri).decode_host(), Ok(Some(host.into())), "{uri}");
    }

    assert_eq!(split("a/b").decode_host(), Ok(None));
    assert!(matches!(
        split("//h%zz").decode_host(),
        Err(ComponentError::Decode(_))
    ));
}

#[test]
fn v4_hosts() {
    for (s, addr) in [
        ("127.0.0.1", Ipv4Addr::new(127, 0, 0, 1)),
        ("255.255.255.255", Ipv4Addr::BROADCAST),
        ("0.0.0.0:8080", Ipv4Addr::UNSPECIFIED),
        ("u@10.0.0.1", Ipv4Addr::new(10, 0, 0, 1)),
    ] {
        assert_eq!(host_of(s), Ok(Some(Host::Ipv4(addr))), "{s}");
    }

    // Anything that is not a dotted quad is a registered name.
    for s in [
        "256.0.0.1",
        "255.0.0",
        "255.0.0.1.2",
        "255.0..1",
        "255.0.0.01",
        "255.0.00.0",
        ".0.0.0.0",
        "0.0.0.0.",
    ] {
        assert_eq!(host_of(s), Ok(Some(Host::RegName(s.into()))), "{s}");
    }
}

#[test]
fn v6_hosts() {
    for (s, addr) in [
        ("::", Ipv6Addr::UNSPECIFIED),
        ("::1", Ipv6Addr::LOCALHOST),
        ("1::", Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0)),
        ("1:02:003:0004:0005:006:07:8", Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)),
        ("2A02:6B8::11:11", Ipv6Addr::new(0x2a02, 0x6b8, 0, 0, 0, 0, 0x11, 0x11)),
        ("1:2:3:4::6:7:8", Ipv6Addr::new(1, 2, 3, 4, 0, 6, 7, 8)),
        ("1:2:3:4:5:6:7::", Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0)),
        (
            "::FFFF:192.0.2.33",
            Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x221),
        ),
        (
            "2001:db8:122:c000:2:2100:192.0.2.33",
            Ipv6Addr::new(0x2001, 0xdb8, 0x122, 0xc000, 2, 0x2100, 0xc000, 0x221),
        ),
    ] {
        assert_eq!(host_of(&format!("[{s}]:80")), Ok(Some(Host::Ipv6(addr))), "{s}");
    }

    for s in [
        "",
        ":",
        "::00000",
        "1:2:3:4:5:6:7",
        "1:2:3:4:5:6:7:8:9",
        "1:2:::6:7:8",
        "1:2::6::8",
        "::1:2:3:4:5:6:7:8",
        ":1::1",
        "1::1:",
        "::127.0.0.1:",
        "1:2:3:4:5:127.0.0.1",
        "::ffff4.4.4.4",
        "127.0.0.1",
        "::1%25eth0",
    ] {
        assert_eq!(
            host_of(&format!("[{s}]")),
            Err(ComponentError::InvalidIpLiteral),
            "{s}"
        );
    }
}

#[test]
fn ip_literal_errors() {
    let err = |s: &str| host_of(s).unwrap_err();

    assert_eq!(err("[::1"), ComponentError::UnbalancedBrackets);
    assert_eq!(err("::1]"), ComponentError::UnbalancedBrackets);
    assert_eq!(err("[v1.fe80::a+en1]"), ComponentError::UnsupportedIpLiteral);
    assert_eq!(err("[V7.x]"), ComponentError::UnsupportedIpLiteral);
}

#[test]
fn builder_canonicalizes_text_hosts() {
    let cases = [
        ("0:0::1", "//[::1]"),
        ("[0:0:0:0:0:0:0:1]", "//[::1]"),
        ("[FE80::A]", "//[fe80::a]"),
        ("1:2:3:4:5:6:7:8", "//[1:2:3:4:5:6:7:8]"),
        ("::FFFF:192.0.2.33", "//[::ffff:192.0.2.33]"),
        ("192.0.2.33", "//192.0.2.33"),
        ("127.0.0.01", "//127.0.0.01"),
    ];
    for (host, expected) in cases {
        let uri = build_host(host).unwrap();
        assert_eq!(uri, expected, "{host}");

        let stripped = host.trim_start_matches('[').trim_end_matches(']');
        let reparsed = uri.host_parsed().unwrap().unwrap();
        match reparsed {
            Host::Ipv6(addr) => assert_eq!(stripped.parse::<Ipv6Addr>(), Ok(addr)),
            Host::Ipv4(addr) => assert_eq!(stripped.parse::<Ipv4Addr>(), Ok(addr)),
            Host::RegName(name) => assert_eq!(name, stripped),
        }
    }

    assert_eq!(build_host("[::x]").unwrap_err(), BuildError::InvalidIpLiteral);
    assert_eq!(build_host("[v1.x]").unwrap_err(), BuildError::UnsupportedIpLiteral);
}
