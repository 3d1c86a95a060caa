use nalgebra::Point3;
use octree::Spatial;
use orbital::BodyRef;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use units::Time;

use crate::generation::generate_system;
use crate::names::SyllableNames;
use crate::system::{BodyKind, IndexedBody, System, SystemId};

/// First system from `seed` that has at least one moon.
fn system_with_moons(seed: u64) -> System {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut names = SyllableNames::new();
    (0..500)
        .map(|i| generate_system(SystemId(i), Point3::origin(), &mut rng, &mut names))
        .find(|s| s.planets.iter().any(|p| p.is_moon()))
        .expect("no system with moons in 500 draws")
}

#[test]
fn test_positions_at_epoch_match_stored_positions() {
    let system = system_with_moons(21);
    let positions = system.positions_at(Time::zero(), 1.0);

    let stars: Vec<_> = system.stars.iter().map(|s| s.position).collect();
    let planets: Vec<_> = system.planets.iter().map(|p| p.position).collect();
    assert_eq!(positions.stars, stars);
    assert_eq!(positions.planets, planets);
}

#[test]
fn test_positions_scale_linearly() {
    let system = system_with_moons(22);
    let time = Time::from_days(42.0);
    let au = system.positions_at(time, 1.0);
    let km = system.positions_at(time, units::AU_TO_KM);

    for (a, b) in au.planets.iter().zip(&km.planets) {
        approx::assert_relative_eq!(
            a.coords * units::AU_TO_KM,
            b.coords,
            epsilon = 1e-3,
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_body_lookup() {
    let system = system_with_moons(23);
    let root = system.body(BodyRef::Star(0)).unwrap();
    assert_eq!(root.mass, system.stars[0].info.mass);

    let last = system.planets.len() as u32 - 1;
    assert!(system.body(BodyRef::Planet(last)).is_some());
    assert!(system.body(BodyRef::Planet(last + 1)).is_none());
    assert!(system.body(BodyRef::Star(99)).is_none());
}

#[test]
fn test_moons_of() {
    let system = system_with_moons(24);
    let (index, _) = system
        .planets
        .iter()
        .enumerate()
        .find(|(i, _)| system.planets.get(i + 1).is_some_and(|p| p.is_moon()))
        .unwrap();

    let moons: Vec<_> = system.moons_of(index).collect();
    assert!(!moons.is_empty());
    assert!(moons
        .iter()
        .all(|m| m.info.parent() == Some(BodyRef::Planet(index as u32))));
}

#[test]
fn test_body_index_holds_every_body() {
    let system = system_with_moons(25);
    let index = system.body_index().unwrap();

    assert_eq!(index.len(), system.stars.len() + system.planets.len());
    let counts = index.object_counts();
    assert_eq!(counts[&BodyKind::Star], system.stars.len());
    assert_eq!(counts[&BodyKind::Planet], system.planets.len());

    let mut planet_ids: Vec<u32> = index
        .iter()
        .flat_map(|node| node.objects(BodyKind::Planet))
        .filter_map(|entry| match entry.body() {
            Some(BodyRef::Planet(i)) => Some(i),
            _ => None,
        })
        .collect();
    planet_ids.sort_unstable();
    assert_eq!(planet_ids, (0..system.planets.len() as u32).collect::<Vec<_>>());
}

#[test]
fn test_indexed_body_handles() {
    let bounds = octree::Aabb::from_center(Point3::new(1.0, 2.0, 3.0), 0.5);
    let system = IndexedBody::System {
        id: SystemId(7),
        bounds,
    };
    let planet = IndexedBody::Planet {
        system: SystemId(7),
        index: 3,
        bounds,
    };

    assert_eq!(system.kind(), BodyKind::System);
    assert_eq!(system.system(), SystemId(7));
    assert_eq!(system.body(), None);
    assert_eq!(planet.kind(), BodyKind::Planet);
    assert_eq!(planet.body(), Some(BodyRef::Planet(3)));
    assert_eq!(planet.bounding_box(), bounds);
}

#[test]
fn test_display() {
    let system = system_with_moons(26);
    let text = system.to_string();
    assert!(text.starts_with(&format!("{} {}", system.id, system.name)));
    assert_eq!(SystemId(12).to_string(), "#12");
}
