use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphwire::{parse_command, TraversalBuilder};

fn chain(hops: usize) -> TraversalBuilder {
    let mut builder = TraversalBuilder::new().is("Person").has("id", "p0");
    for i in 0..hops {
        builder = builder.out_limit(100, ["knows"]).is(format!("Type{}", i));
    }
    builder
}

/// Benchmark materializing and serializing documents of growing depth
fn bench_build_and_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal_build");

    for hops in [1, 8, 64].iter() {
        let builder = chain(*hops);
        group.bench_with_input(BenchmarkId::from_parameter(hops), hops, |b, _| {
            b.iter(|| {
                let doc = builder.build().unwrap();
                serde_json::to_vec(&doc).unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark parsing console lines in both syntaxes
fn bench_console_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_parse");

    group.bench_function("word_form", |b| {
        b.iter(|| parse_command("g is Person has id p1 out-limit 50 knows,likes is Person limit 10").unwrap())
    });
    group.bench_function("call_form", |b| {
        b.iter(|| {
            parse_command(r#"g.is("Person").has("id", "p1").outLimit(50, "knows", "likes").is("Person").limitTo(10)"#)
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build_and_serialize, bench_console_parse);
criterion_main!(benches);
