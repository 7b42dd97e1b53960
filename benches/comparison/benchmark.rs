use criterion::{Criterion, black_box, criterion_group, criterion_main};
use polya_gamma_devroye::{
    PolyaGamma, sample_devroye, sample_gamma_convolution,
    special::{erfc, ln_gamma, upper_incomplete_gamma_q},
    truncated::{left_bounded_gamma, right_bounded_inverse_gaussian},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn bench_polya_gamma(cr: &mut Criterion) {
    let mut pg = PolyaGamma::new(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let n = 10_000;
    let bs = [0.5, 1.0, 5.0, 10.0];
    let cs = [0.0, 0.5, 1.0, 2.0];

    for &b in &bs {
        pg.set_shape(b).expect("benchmark shapes are positive");
        for &c in &cs {
            let bench_name = format!("draw_n{}_b{:.1}_c{:.1}", n, b, c);
            cr.bench_function(&bench_name, |bench| {
                bench.iter(|| {
                    for _ in 0..n {
                        black_box(pg.draw(&mut rng, c));
                    }
                });
            });
        }
    }
}

fn bench_methods(cr: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for &z in &[0.0, 1.0, 50.0] {
        cr.bench_function(&format!("devroye_n4_z{z:.1}"), |bench| {
            bench.iter(|| black_box(sample_devroye(&mut rng, 4, z)));
        });
        cr.bench_function(&format!("gamma_conv_h4_z{z:.1}"), |bench| {
            bench.iter(|| black_box(sample_gamma_convolution(&mut rng, 4.0, z, 200)));
        });
    }
    cr.bench_function("left_bounded_gamma", |bench| {
        bench.iter(|| black_box(left_bounded_gamma(&mut rng, 2.5, 1.0, 3.0)));
    });
    cr.bench_function("right_bounded_inverse_gaussian", |bench| {
        bench.iter(|| black_box(right_bounded_inverse_gaussian(&mut rng, 2.0, 1.0, 0.64)));
    });
}

fn bench_special(cr: &mut Criterion) {
    cr.bench_function("erfc", |bench| bench.iter(|| black_box(erfc(black_box(1.3)))));
    cr.bench_function("ln_gamma", |bench| bench.iter(|| black_box(ln_gamma(black_box(7.25)))));
    cr.bench_function("gamma_q_half_integer", |bench| {
        bench.iter(|| black_box(upper_incomplete_gamma_q(black_box(5.5), black_box(3.0))))
    });
}

#[cfg(feature = "rayon")]
fn bench_polya_gamma_par(cr: &mut Criterion) {
    let mut pg = PolyaGamma::new(1.0);

    let n = 10_000;
    let bs = [0.5, 1.0, 5.0, 10.0];
    let cs = [0.0, 0.5, 1.0, 2.0];

    for &b in &bs {
        pg.set_shape(b).expect("benchmark shapes are positive");
        for &c in &cs {
            let bench_name = format!("draw_par_n{}_b{:.1}_c{:.1}", n, b, c);
            cr.bench_function(&bench_name, |bench| {
                bench.iter(|| {
                    black_box(pg.draw_vec_par(&vec![c; n]));
                });
            });
        }
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10);
    targets = bench_polya_gamma, bench_methods, bench_special
);

// Only include parallel benchmarks if rayon feature is enabled
#[cfg(feature = "rayon")]
criterion_group!(
    name = parallel_benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(10);
    targets = bench_polya_gamma_par
);

#[cfg(not(feature = "rayon"))]
criterion_main!(benches);

#[cfg(feature = "rayon")]
criterion_main!(benches, parallel_benches);
