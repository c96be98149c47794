use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use wavefront::build_pool;
use wavefront::harness::Workload;
use wavefront::kernels::{Daxpy, HeatDiffusion, LennardJones, MatMul, Pi, Schedule};

fn bench_workload<W: Workload>(c: &mut Criterion, workload: W) {
    let mut group = c.benchmark_group(workload.name().to_string());
    for threads in [1, 4] {
        let pool = build_pool(threads).unwrap();
        group.bench_function(BenchmarkId::from_parameter(threads), |b| {
            b.iter_batched_ref(
                || workload.prepare().unwrap(),
                |input| workload.run(input, &pool).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_workload(c, Daxpy { len: 1 << 16, a: 2.5 });
    bench_workload(c, MatMul { n: 128, transposed: false });
    bench_workload(c, MatMul { n: 128, transposed: true });
    bench_workload(c, Pi { num_steps: 1_000_000 });
    bench_workload(c, LennardJones { particles: 300, seed: 42 });
    for schedule in Schedule::ALL {
        bench_workload(
            c,
            HeatDiffusion {
                n: 128,
                steps: 20,
                schedule,
                ..Default::default()
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(100))
        .measurement_time(Duration::from_secs(1));
    targets = criterion_benchmark
}
criterion_main!(benches);
