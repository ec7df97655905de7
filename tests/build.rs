use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use generic_uri::{
    build::{
        state::{AuthorityStart, HostEnd},
        Builder, QuerySeparators,
    },
    split, BuildError, Host, SplitResult,
};

#[test]
fn build_full() {
    let uri = SplitResult::builder()
        .scheme("FOO")
        .authority_with(|b| b.userinfo("us er").host("Example.com").port(8042))
        .path("/over/there and")
        .query("name=fer ret")
        .fragment("no#se")
        .build()
        .unwrap();

    assert_eq!(
        uri,
        "foo://us%20er@example.com:8042/over/there%20and?name=fer%20ret#no%23se"
    );
    assert_eq!(uri.scheme(), Some("foo"));
    assert_eq!(uri.authority(), Some("us%20er@example.com:8042"));
    assert_eq!(uri.path(), "/over/there%20and");
    assert_eq!(uri.decode_fragment().unwrap().as_deref(), Some("no#se"));
}

#[test]
fn build_hosts() {
    let build = |f: fn(Builder<AuthorityStart>) -> Builder<HostEnd>| {
        SplitResult::builder()
            .authority_with(f)
            .path("")
            .build()
    };

    assert_eq!(build(|b| b.host(Ipv4Addr::LOCALHOST)).unwrap(), "//127.0.0.1");
    assert_eq!(build(|b| b.host(Ipv6Addr::LOCALHOST)).unwrap(), "//[::1]");
    assert_eq!(
        build(|b| b.host(IpAddr::V6(Ipv6Addr::UNSPECIFIED))).unwrap(),
        "//[::]"
    );
    assert_eq!(build(|b| b.host("[0:0::1]")).unwrap(), "//[::1]");
    assert_eq!(build(|b| b.host("FE80::1")).unwrap(), "//[fe80::1]");
    assert_eq!(build(|b| b.host("127.0.0.1")).unwrap(), "//127.0.0.1");
    assert_eq!(build(|b| b.host("a b.Example")).unwrap(), "//a%20b.example");
    assert_eq!(build(|b| b.host("")).unwrap(), "//");
    assert_eq!(build(|b| b.host(&Host::RegName("x@y".into()))).unwrap(), "//x%40y");

    // Text that is not bracketed is never an IP literal.
    assert_eq!(build(|b| b.host("[::1")).unwrap(), "//%5B%3A%3A1");
    assert_eq!(
        build(|b| b.host("[1.2.3.4]")).unwrap_err(),
        BuildError::InvalidIpLiteral
    );
    assert_eq!(
        build(|b| b.host("[v1.x]")).unwrap_err(),
        BuildError::UnsupportedIpLiteral
    );

    // Hosts round-trip through the parsed form.
    let r = split("//[::1]");
    let host = r.host_parsed().unwrap().unwrap();
    let uri = SplitResult::builder()
        .authority_with(|b| b.host(&host))
        .path("")
        .build()
        .unwrap();
    assert_eq!(uri, "//[::1]");

    // Owned text hosts go through the same path as borrowed ones.
    for (text, expected) in [("Example.ORG", "//example.org"), ("0:0::1", "//[::1]")] {
        let owned = String::from(text);
        let uri = SplitResult::builder()
            .authority_with(|b| b.host(&owned))
            .path("")
            .build()
            .unwrap();
        assert_eq!(uri, expected);
    }
}

#[test]
fn build_ports() {
    let build = |port: &str| {
        SplitResult::builder()
            .authority_with(|b| b.host("h").port(port))
            .path("")
            .build()
    };

    assert_eq!(build("80").unwrap(), "//h:80");
    assert_eq!(build("0080").unwrap(), "//h:0080");
    assert_eq!(build("").unwrap(), "//h");
    assert_eq!(build("8o").unwrap_err(), BuildError::InvalidPort);
    assert_eq!(build("-1").unwrap_err(), BuildError::InvalidPort);
}

#[test]
fn build_authority_text() {
    let build = |auth: &str| {
        SplitResult::builder()
            .authority(auth)
            .path("/")
            .build()
    };

    assert_eq!(build("u:p@H:1").unwrap(), "//u:p@h:1/");
    assert_eq!(build("a@b@c").unwrap(), "//a%40b@c/");
    assert_eq!(build("[::1]:").unwrap(), "//[::1]/");
    assert_eq!(build("").unwrap(), "///");
    assert_eq!(build("[::x]").unwrap_err(), BuildError::InvalidIpLiteral);
}

#[test]
fn build_paths() {
    let uri = SplitResult::builder().path("a:b/c").build().unwrap();
    assert_eq!(uri, "./a:b/c");
    assert_eq!(uri.scheme(), None);

    let uri = SplitResult::builder()
        .scheme("s")
        .path("a:b")
        .build()
        .unwrap();
    assert_eq!(uri, "s:a:b");

    let uri = SplitResult::builder().path("a?b#c%d").build().unwrap();
    assert_eq!(uri, "a%3Fb%23c%25d");
    assert_eq!(uri.decode_path().unwrap(), "a?b#c%d");

    assert_eq!(
        SplitResult::builder()
            .authority_with(|b| b.host("h"))
            .path("a")
            .build()
            .unwrap_err(),
        BuildError::NonemptyRootlessPath
    );
    assert_eq!(
        SplitResult::builder().path("//a").build().unwrap_err(),
        BuildError::PathStartsWithDoubleSlash
    );
    assert_eq!(
        SplitResult::builder()
            .scheme("s")
            .path("//a")
            .build()
            .unwrap_err(),
        BuildError::PathStartsWithDoubleSlash
    );
}

#[test]
fn build_query_pairs() {
    let uri = SplitResult::builder()
        .path("")
        .query_pairs([
            ("a b", Some("1&2=3")),
            ("flag", None),
            ("empty", Some("")),
        ])
        .build()
        .unwrap();
    assert_eq!(uri, "?a%20b=1%262%3D3&flag&empty=");

    let uri = SplitResult::builder()
        .path("")
        .query_pairs([("n", vec![1, 2]), ("m", vec![])])
        .build()
        .unwrap();
    assert_eq!(uri, "?n=1&n=2");

    let uri = SplitResult::builder()
        .separators(QuerySeparators {
            pair: ';',
            name_value: ':',
        })
        .path("")
        .query_pairs([("a", "x;y&z"), ("b", "c:d=e")])
        .build()
        .unwrap();
    assert_eq!(uri, "?a:x%3By&z;b:c%3Ad=e");

    // Composed queries split back into the same pairs.
    let pairs: Vec<_> = uri
        .query_pairs(&[';'], ':')
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        pairs,
        [
            ("a".into(), Some("x;y&z".into())),
            ("b".into(), Some("c:d=e".into())),
        ]
    );

    let uri = SplitResult::builder()
        .path("")
        .query_pairs(Vec::<(String, String)>::new())
        .build()
        .unwrap();
    assert_eq!(uri, "?");
}

#[test]
fn build_skipping() {
    let uri = SplitResult::builder()
        .scheme("a")
        .optional(Builder::path, None)
        .query("q")
        .build()
        .unwrap();
    assert_eq!(uri, "a:?q");

    let uri = SplitResult::builder()
        .optional(Builder::path, None)
        .fragment("f")
        .build()
        .unwrap();
    assert_eq!(uri, "#f");

    let uri = SplitResult::builder()
        .authority_with(|b| b.host("h").optional(Builder::port, Some(1u16)))
        .path("")
        .build()
        .unwrap();
    assert_eq!(uri, "//h:1");
}

#[test]
fn first_error_wins() {
    let err = SplitResult::builder()
        .scheme("1a")
        .authority_with(|b| b.host("[::x]").port("p"))
        .path("a")
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::InvalidScheme);
    assert_eq!(err.to_string(), "invalid scheme");
}
