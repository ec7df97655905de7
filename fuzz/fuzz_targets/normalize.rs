#![no_main]
use generic_uri::split;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let r = split(data);
    let Ok(r1) = r.normalize() else {
        return;
    };
    let r2 = split(r1.as_str());

    assert_eq!(r1.components(), r2.components());
    assert_eq!(r1.has_scheme(), r.has_scheme());
    assert_eq!(r1.has_authority(), r.has_authority());
    assert_eq!(r1.has_query(), r.has_query());
    assert_eq!(r1.has_fragment(), r.has_fragment());
    assert_eq!(r1.decode_query().ok(), r.decode_query().ok());
    assert_eq!(r1.decode_fragment().ok(), r.decode_fragment().ok());

    // Normalization is idempotent.
    assert_eq!(r1.normalize().unwrap(), r1);
});
