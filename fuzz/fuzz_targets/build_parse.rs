#![no_main]
use generic_uri::{split, Builder, Host, SplitResult};
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Arbitrary, Clone, Debug)]
enum HostInput<'a> {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Text(&'a str),
}

#[derive(Arbitrary, Clone, Debug)]
struct AuthorityInput<'a> {
    userinfo: Option<&'a str>,
    host: HostInput<'a>,
    port: Option<u16>,
}

#[derive(Arbitrary, Clone, Debug)]
struct Components<'a> {
    scheme: Option<&'a str>,
    authority: Option<AuthorityInput<'a>>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fuzz_target!(|c: Components<'_>| {
    let res = SplitResult::builder()
        .optional(Builder::scheme, c.scheme)
        .optional(
            Builder::authority_with,
            c.authority.clone().map(|a| {
                move |b: Builder<_>| {
                    let b = b.optional(Builder::userinfo, a.userinfo);
                    let b = match a.host {
                        HostInput::Ipv4(addr) => b.host(addr),
                        HostInput::Ipv6(addr) => b.host(addr),
                        HostInput::Text(s) => b.host(s),
                    };
                    b.optional(Builder::port, a.port)
                }
            }),
        )
        .path(c.path)
        .optional(Builder::query, c.query)
        .optional(Builder::fragment, c.fragment)
        .build();

    let Ok(u1) = res else { return };
    let u2 = split(u1.as_str());
    assert_eq!(u1.components(), u2.components());

    assert_eq!(
        u2.normalized_scheme().unwrap(),
        c.scheme.map(|s| s.to_ascii_lowercase())
    );
    assert_eq!(u2.has_authority(), c.authority.is_some());

    if let Some(a) = c.authority {
        assert_eq!(u2.decode_userinfo().unwrap().as_deref(), a.userinfo);
        assert_eq!(u2.port_to_u16().unwrap(), a.port);
        match (a.host, u2.host_parsed().unwrap().unwrap()) {
            (HostInput::Ipv4(a1), Host::Ipv4(a2)) => assert_eq!(a1, a2),
            (HostInput::Ipv6(a1), Host::Ipv6(a2)) => assert_eq!(a1, a2),
            (HostInput::Text(_), _) => {}
            (h1, h2) => panic!("{h1:?} != {h2:?}"),
        }
    }

    assert_eq!(u2.decode_path().unwrap().trim_start_matches("./"), c.path.trim_start_matches("./"));
    assert_eq!(u2.decode_query().unwrap().as_deref(), c.query);
    assert_eq!(u2.decode_fragment().unwrap().as_deref(), c.fragment);
});
