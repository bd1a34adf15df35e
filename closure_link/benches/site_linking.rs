use std::hint::black_box;
use std::sync::Arc;

use closure_link::{CallShape, FunctionSpace, InvocationSite, Linker, SymbolicRef};
use closure_link_runtime::Value;
use criterion::{criterion_group, criterion_main, Criterion};

fn space() -> FunctionSpace {
    let mut builder = FunctionSpace::builder();
    // Enough units that an uncached lookup walks a realistic import graph.
    for i in 0..32 {
        builder = builder.unit(format!("lib{i}"), |u| {
            u.function(format!("f{i}"), 2, |args| Ok(Value::list(args.iter().cloned())))
        });
    }
    builder
        .unit("main", |mut u| {
            for i in 0..32 {
                u = u.import(format!("lib{i}"));
            }
            u
        })
        .build()
        .expect("bench space")
}

fn bench_linking(c: &mut Criterion) {
    let linker = Linker::new(Arc::new(space()));
    let args = [Value::from("foo"), Value::from("bar")];

    c.bench_function("bootstrap_uncached", |b| {
        b.iter(|| {
            let binding = linker
                .bootstrap("main", black_box("f31"), CallShape::reference(), 2)
                .expect("links");
            black_box(binding);
        })
    });

    let site = InvocationSite::new(
        "main",
        SymbolicRef::new("f31", 2).expect("valid reference"),
        CallShape::direct(2),
    );
    c.bench_function("linked_site_invoke", |b| {
        b.iter(|| {
            let binding = linker.link_site(&site).expect("links");
            black_box(binding.invoke(black_box(&args)).expect("runs"));
        })
    });
}

criterion_group!(benches, bench_linking);
criterion_main!(benches);
