use criterion::{black_box, criterion_group, criterion_main, Criterion};
use event_data::transform::{global_to_curvilinear, parameters_to_global_momentum};
use event_data::{CurvilinearTrackParameters, Qop, TransformConfig, Vector3};
use geometry::{GeometryId, GeometryLevel};

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let config = TransformConfig::default();
    let position = Vector3::new(12.0, -4.0, 150.0);
    let momentum = Vector3::new(0.8, 1.3, 4.2);

    group.bench_function("global_to_curvilinear", |b| {
        b.iter(|| global_to_curvilinear(black_box(&position), black_box(&momentum), -1.0, &config));
    });

    let pars = global_to_curvilinear(&position, &momentum, -1.0, &config);
    group.bench_function("parameters_to_global_momentum", |b| {
        b.iter(|| parameters_to_global_momentum(black_box(&pars)));
    });

    group.bench_function("set_qop", |b| {
        let mut state = CurvilinearTrackParameters::new(None, position, momentum, -1.0);
        b.iter(|| state.set::<Qop>(black_box(-0.2)));
    });

    group.bench_function("associated_surface", |b| {
        let mut state = CurvilinearTrackParameters::new(None, position, momentum, -1.0);
        b.iter(|| {
            black_box(state.associated_surface());
        });
    });

    group.finish();
}

fn bench_geometry_id(c: &mut Criterion) {
    c.bench_function("geometry_id_pack", |b| {
        b.iter(|| {
            let mut id = GeometryId::default();
            for (i, level) in GeometryLevel::ALL.into_iter().enumerate() {
                id.set_level(level, black_box(i as u64 + 1));
            }
            black_box(id.value())
        });
    });
}

criterion_group!(benches, bench_transform, bench_geometry_id);
criterion_main!(benches);
