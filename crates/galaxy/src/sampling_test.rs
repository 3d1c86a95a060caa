use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::sampling::{
    centered, distribute, log_uniform, moon_numeral, planet_radius_km, smoothstep, tilt, uniform,
};

#[test]
fn test_uniform_range() {
    let mut rng = ChaChaRng::seed_from_u64(1);
    for _ in 0..1000 {
        let x = uniform(&mut rng, 0.1, 20.0);
        assert!((0.1..20.0).contains(&x));
        let c = centered(&mut rng, 35.0);
        assert!((-17.5..17.5).contains(&c));
    }
}

#[test]
fn test_log_uniform_range() {
    let mut rng = ChaChaRng::seed_from_u64(2);
    let samples: Vec<f64> = (0..2000).map(|_| log_uniform(&mut rng, 0.05, 50.0)).collect();
    assert!(samples.iter().all(|&x| (0.05..=50.0).contains(&x)));

    // Half of a log-uniform draw lies below the geometric mean
    let below = samples.iter().filter(|&&x| x < (0.05f64 * 50.0).sqrt()).count();
    assert!((800..1200).contains(&below), "below = {}", below);
}

#[test]
fn test_tilt_is_radians() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    for _ in 0..500 {
        assert!(tilt(&mut rng, 10.0).abs() <= 10f64.to_radians());
    }
}

#[test]
fn test_smoothstep() {
    assert_eq!(smoothstep(0.0, 10.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 10.0, 12.0), 1.0);
    assert_relative_eq!(smoothstep(0.0, 10.0, 5.0), 0.5);
}

#[test]
fn test_distribute_shape() {
    assert_eq!(distribute(0.0), 0.0);
    assert_relative_eq!(distribute(1.0), 0.9);
    assert_relative_eq!(distribute(0.5), 0.0375);

    let mut previous = 0.0;
    for i in 0..=100 {
        let d = distribute(i as f64 / 100.0);
        assert!(d >= previous);
        assert!(d <= 0.9 + 1e-12);
        previous = d;
    }
}

#[test]
fn test_planet_radius_buckets() {
    let mut rng = ChaChaRng::seed_from_u64(4);
    let radii: Vec<f64> = (0..5000).map(|_| planet_radius_km(&mut rng)).collect();

    assert!(radii.iter().all(|&r| (2_000.0..130_000.0).contains(&r)));
    let giants = radii.iter().filter(|&&r| r >= 98_000.0).count();
    let small = radii.iter().filter(|&&r| r < 8_000.0).count();
    // 3% and 20% of draws
    assert!((75..250).contains(&giants), "giants = {}", giants);
    assert!((850..1150).contains(&small), "small = {}", small);
}

#[test]
fn test_moon_numeral() {
    assert_eq!(moon_numeral(0), "I");
    assert_eq!(moon_numeral(3), "IV");
    assert_eq!(moon_numeral(8), "IX");
    assert_eq!(moon_numeral(13), "XIV");
    assert_eq!(moon_numeral(48), "XLIX");
}
