#![no_main]
use generic_uri::{split, Resolver};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str, bool)| {
    let (base, r, strict) = data;
    let base = split(base);
    let r = split(r);

    let u1 = Resolver::with_base(base).strict(strict).resolve(&r);
    let u2 = split(u1.as_str());

    assert_eq!(u1, u2);
    assert_eq!(u1.fragment(), r.fragment());
    if r.has_scheme() && strict {
        assert_eq!(u1.scheme(), r.scheme());
    } else if u1.scheme().is_some() {
        assert!(base.has_scheme() || r.has_scheme());
    }

    // A reference with authority keeps it, together with its query.
    if r.has_authority() || (r.has_scheme() && strict) {
        assert_eq!(u1.authority(), r.authority());
        assert_eq!(u1.query(), r.query());
    }
});
