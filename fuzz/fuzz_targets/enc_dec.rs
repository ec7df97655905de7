#![no_main]
use generic_uri::pct_enc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&[u8], &str)| {
    let (bytes, safe) = data;
    if safe.contains('%') {
        return;
    }

    let encoded = pct_enc::encode_bytes(bytes, safe);
    assert!(encoded.is_ascii());
    assert_eq!(&*pct_enc::decode_to_bytes(&encoded).unwrap(), bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => {
            assert_eq!(pct_enc::encode(s, safe), encoded);
            assert_eq!(pct_enc::decode(&encoded).unwrap(), s);
        }
        Err(_) => assert!(pct_enc::decode(&encoded).is_err()),
    }
});
