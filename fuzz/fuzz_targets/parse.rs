#![no_main]
use generic_uri::{split, unsplit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let r = split(data);
    assert_eq!(unsplit(&r.components()), data);

    if let Some(a) = r.authority_parsed() {
        let mut buf = String::with_capacity(a.as_str().len());
        if let Some(ui) = a.userinfo() {
            buf.push_str(ui);
            buf.push('@');
        }
        buf.push_str(a.host());
        if let Some(p) = a.port() {
            assert!(p.bytes().all(|x| x.is_ascii_digit()));
            buf.push(':');
            buf.push_str(p);
        }
        assert_eq!(buf, a.as_str());

        // Interpreting the host never panics.
        let _ = a.host_parsed();
        let _ = a.decode_host();
    }
});
