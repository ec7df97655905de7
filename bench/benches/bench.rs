use criterion::{black_box, criterion_group, criterion_main, Criterion};
use generic_uri::{pct_enc, resolve::remove_dot_segments, split, Resolver, SplitResult};

criterion_group!(
    benches,
    bench_split,
    bench_authority,
    bench_build,
    bench_normalize,
    bench_resolve,
    bench_remove_dot_segments,
    bench_encode,
    bench_decode,
);
criterion_main!(benches);

const SPLIT_CASE: &str = "https://user@example.com:8080/search?q=%E6%B5%8B%E8%AF%95#fragment";
const NORMALIZE_CASE: &str = "eXAMPLE://a/./b/../b/%63/%7bfoo%7d";
const RESOLVE_CASE_BASE: &str = "http://example.com/foo/bar";
const RESOLVE_CASE_REF: &str = "../baz";
const DOT_SEGMENTS_CASE: &str = "/a/b/c/./../../g/./h/../i";
const ENCODE_CASE: &str = "te😃a 测1`~!@试#$%st^&+=";

fn bench_split(c: &mut Criterion) {
    c.bench_function("split", |b| b.iter(|| split(black_box(SPLIT_CASE))));
}

fn bench_authority(c: &mut Criterion) {
    let r = split(SPLIT_CASE);
    c.bench_function("authority", |b| {
        b.iter(|| black_box(&r).authority_parsed().map(|a| a.host_parsed()))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            SplitResult::builder()
                .scheme("foo")
                .authority_with(|b| b.userinfo("user").host("example.com").port(8042))
                .path("/over/there")
                .query_pairs([("name", "ferret")])
                .fragment("nose")
                .build()
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let r = split(NORMALIZE_CASE);
    c.bench_function("normalize", |b| b.iter(|| black_box(&r).normalize()));
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = Resolver::with_base(split(RESOLVE_CASE_BASE));
    let r = split(RESOLVE_CASE_REF);
    c.bench_function("resolve", |b| b.iter(|| resolver.resolve(black_box(&r))));
}

fn bench_remove_dot_segments(c: &mut Criterion) {
    c.bench_function("remove_dot_segments", |b| {
        b.iter(|| remove_dot_segments(black_box(DOT_SEGMENTS_CASE)))
    });
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode", |b| {
        b.iter(|| pct_enc::encode(black_box(ENCODE_CASE), "/:@"))
    });
}

fn bench_decode(c: &mut Criterion) {
    let encoded = pct_enc::encode(ENCODE_CASE, "");
    c.bench_function("decode", |b| b.iter(|| pct_enc::decode(black_box(&encoded))));
}
