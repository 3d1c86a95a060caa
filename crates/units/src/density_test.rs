use approx::assert_relative_eq;

use crate::density::Density;
use crate::length::Length;
use crate::mass::EARTH_MASS_KG;

#[test]
fn test_density_units() {
    let water = Density::from_grams_per_cm3(1.0);
    assert_relative_eq!(water.to_grams_per_cm3(), 1.0);
    assert_relative_eq!(water.to_kg_per_m3(), 1000.0);
}

#[test]
fn test_earth_sphere_mass() {
    // Earth: r = 6371 km, mean density 5.514 g/cm³
    let earth = Density::from_grams_per_cm3(5.514).sphere_mass(Length::from_km(6371.0));
    assert_relative_eq!(earth.to_kg(), EARTH_MASS_KG, max_relative = 0.01);
}

#[test]
fn test_sphere_mass_scales_with_volume() {
    let rho = Density::from_grams_per_cm3(2.0);
    let small = rho.sphere_mass(Length::from_km(1000.0));
    let large = rho.sphere_mass(Length::from_km(2000.0));
    assert_relative_eq!(large / small, 8.0, max_relative = 1e-12);
}
