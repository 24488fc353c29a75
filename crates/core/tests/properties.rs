//! Generation properties that hold for any seed and size.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrain_noise_core::noise::{
    generate, FractalNoise, NoiseParams, NormalizedNoiseField, FLAT_FIELD_VALUE,
};
use terrain_noise_core::terrain::{GRASS_THRESHOLD, WATER_THRESHOLD};
use terrain_noise_core::{classify, generate_world, HashSelector, NoiseError, WorldRequest};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn determinism_across_calls() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..5 {
        let seed: i64 = rng.random_range(-1_000_000_000..1_000_000_000);
        let width = rng.random_range(1..24);
        let height = rng.random_range(1..24);
        let a = classify(&generate(width, height, &NoiseParams::default(), seed).unwrap());
        let b = classify(&generate(width, height, &NoiseParams::default(), seed).unwrap());
        assert_eq!(a, b, "seed {seed}, {width}x{height}");
    }
}

#[test]
fn shape_matches_request() {
    for (width, height) in [(1, 1), (1, 7), (7, 1), (13, 5), (32, 20)] {
        let terrain = classify(&generate(width, height, &NoiseParams::default(), 77).unwrap());
        let codes = terrain.codes();
        assert_eq!(codes.len(), height);
        for row in &codes {
            assert_eq!(row.len(), width);
            assert!(row.iter().all(|&code| code <= 2));
        }
    }
}

#[test]
fn normalization_range() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..10 {
        let seed: i64 = rng.random();
        let field = generate(20, 20, &NoiseParams::default(), seed).unwrap();
        let values = field.as_slice();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if field.is_flat() {
            assert!(values.iter().all(|&v| v == FLAT_FIELD_VALUE));
        } else {
            assert_eq!(min, 0.0, "seed {seed}");
            assert_eq!(max, 1.0, "seed {seed}");
        }
    }
}

#[test]
fn threshold_partition() {
    let field = generate(40, 40, &NoiseParams::default(), 5150).unwrap();
    let terrain = classify(&field);
    for y in 0..40 {
        for x in 0..40 {
            let value = field.value(x, y).unwrap();
            let code = terrain.get(x, y).unwrap().code();
            assert_eq!(value < WATER_THRESHOLD, code == 0, "({x}, {y}) = {value}");
            assert_eq!(
                (WATER_THRESHOLD..GRASS_THRESHOLD).contains(&value),
                code == 1,
                "({x}, {y}) = {value}"
            );
            assert_eq!(value >= GRASS_THRESHOLD, code == 2, "({x}, {y}) = {value}");
        }
    }
}

#[test]
fn seed_sensitivity() {
    let mut rng = StdRng::seed_from_u64(3);
    let params = NoiseParams::default();
    let mut differing = 0;
    for _ in 0..100 {
        let a: i64 = rng.random_range(-(1 << 40)..(1 << 40));
        let mut b: i64 = rng.random_range(-(1 << 40)..(1 << 40));
        if b == a {
            b += 1;
        }
        let tiles_a = classify(&generate(8, 8, &params, a).unwrap());
        let tiles_b = classify(&generate(8, 8, &params, b).unwrap());
        if tiles_a != tiles_b {
            differing += 1;
        }
    }
    assert!(differing >= 99, "only {differing}/100 seed pairs differ");
}

#[test]
fn single_pixel_scenario() {
    let params = NoiseParams::default().with_octaves(1);
    let field = generate(1, 1, &params, 0).unwrap();
    assert!(field.is_flat());
    assert_eq!(classify(&field).codes(), vec![vec![1]]);
}

#[test]
fn flat_fields_classify_as_grass() {
    for seed in [-5, 0, 1, 123, i64::MAX] {
        let field = generate(1, 1, &NoiseParams::default(), seed).unwrap();
        assert!(field.is_flat());
        assert_eq!(generate_world(&WorldRequest::new(seed, 1)).unwrap().tiles, vec![vec![1]]);
    }
}

#[test]
fn invalid_input_is_reported_not_corrected() {
    let cases: [(Result<_, NoiseError>, &str); 4] = [
        (generate(0, 4, &NoiseParams::default(), 0).map(|_| ()), "width"),
        (generate(4, 0, &NoiseParams::default(), 0).map(|_| ()), "height"),
        (
            generate(4, 4, &NoiseParams::default().with_octaves(0), 0).map(|_| ()),
            "octaves",
        ),
        (
            generate(4, 4, &NoiseParams::default().with_scale(0.0), 0).map(|_| ()),
            "scale",
        ),
    ];
    for (result, name) in cases {
        let err = result.unwrap_err();
        assert_eq!(err.parameter(), name);
        assert!(matches!(err, NoiseError::InvalidParameter { .. }));
    }
    assert!(generate_world(&WorldRequest::new(0, -64)).is_err());
}

#[test]
fn parallel_requests_are_independent() {
    let noise = FractalNoise::with_selector(NoiseParams::default(), HashSelector).unwrap();
    let expected: Vec<_> = (0..8).map(|seed| noise.generate(24, 24, seed).unwrap()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|seed| {
                let noise = &noise;
                scope.spawn(move || noise.generate(24, 24, seed).unwrap())
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

/// Either a complete field in `[0, 1]` or a parameter error, never a panic.
fn assert_bounded_or_rejected(result: &Result<NormalizedNoiseField, NoiseError>, label: &str) {
    match result {
        Ok(field) => assert!(
            field.as_slice().iter().all(|v| (0.0..=1.0).contains(v)),
            "{label}: values outside [0, 1]"
        ),
        Err(err) => assert!(
            ["scale", "lacunarity", "persistence"].contains(&err.parameter()),
            "{label}: unexpected {err}"
        ),
    }
}

#[test]
fn extreme_parameters_are_rejected_or_bounded() {
    let scales = [
        1e-300,
        -1e-300,
        f64::MIN_POSITIVE,
        1e-18,
        -1e-18,
        -30.0,
        1e300,
    ];
    let lacunarities = [1e-300, 0.5, 2.0, 1e10, 1e19, 1e200];
    let persistences = [1e-300, 0.01, 1e10, 1e150];

    for scale in scales {
        for lacunarity in lacunarities {
            for persistence in persistences {
                for octaves in [1, 3, 8] {
                    let params = NoiseParams {
                        octaves,
                        persistence,
                        lacunarity,
                        scale,
                    };
                    for seed in [i64::MIN, -1, i64::MAX] {
                        let label = format!("{params:?} seed {seed}");
                        assert_bounded_or_rejected(&generate(3, 2, &params, seed), &label);
                        if let Ok(noise) = FractalNoise::with_selector(params, HashSelector) {
                            assert_bounded_or_rejected(&noise.generate(3, 2, seed), &label);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn random_log_scaled_parameters_are_rejected_or_bounded() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let sign = if rng.random() { 1.0 } else { -1.0 };
        let params = NoiseParams {
            octaves: rng.random_range(1..=12),
            persistence: 10f64.powf(rng.random_range(-300.0..300.0)),
            lacunarity: 10f64.powf(rng.random_range(-300.0..300.0)),
            scale: sign * 10f64.powf(rng.random_range(-300.0..300.0)),
        };
        let seed: i64 = rng.random();
        let size = rng.random_range(1..6);
        let label = format!("{params:?} seed {seed} size {size}");
        assert_bounded_or_rejected(&generate(size, size, &params, seed), &label);
    }
}

#[test]
fn tiny_scale_and_huge_lacunarity_report_the_culprit() {
    let tiny_scale = NoiseParams::default().with_scale(1e-300);
    assert_eq!(generate(2, 2, &tiny_scale, 0).unwrap_err().parameter(), "scale");

    let huge_lacunarity = NoiseParams::default()
        .with_octaves(2)
        .with_lacunarity(1e19)
        .with_scale(1.0);
    assert_eq!(
        generate(2, 2, &huge_lacunarity, 0).unwrap_err().parameter(),
        "lacunarity"
    );
}
