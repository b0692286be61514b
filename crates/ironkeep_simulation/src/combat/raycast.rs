//! Ray queries против `Hitbox` (без физического движка)
//!
//! Сфера/AABB пересечения из `bevy::math::bounding`. Результат отсортирован по дистанции.

use bevy::math::bounding::RayCast3d;
use bevy::prelude::*;

use crate::components::Hitbox;

/// Пересечение луча с hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    /// Дистанция от origin до точки входа
    pub distance: f32,
}

/// Все пересечения, ближайшее первым
pub fn cast_ray<'a>(
    origin: Vec3,
    direction: Dir3,
    targets: impl IntoIterator<Item = (Entity, &'a Transform, &'a Hitbox)>,
) -> Vec<RayHit> {
    let ray = RayCast3d::from_ray(Ray3d { origin, direction }, f32::MAX);

    let mut hits: Vec<RayHit> = targets
        .into_iter()
        .filter_map(|(entity, transform, hitbox)| {
            let center = transform.translation;
            let distance = match hitbox.bounding_sphere(center) {
                Some(sphere) => ray.sphere_intersection_at(&sphere),
                None => ray.aabb_intersection_at(&hitbox.aabb(center)),
            }?;
            Some(RayHit { entity, distance })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Только ближайшее пересечение
pub fn nearest_hit<'a>(
    origin: Vec3,
    direction: Dir3,
    targets: impl IntoIterator<Item = (Entity, &'a Transform, &'a Hitbox)>,
) -> Option<RayHit> {
    cast_ray(origin, direction, targets).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_sorted_by_distance() {
        let mut world = World::new();
        let far = world.spawn_empty().id();
        let near = world.spawn_empty().id();
        let behind = world.spawn_empty().id();

        let sphere = Hitbox::Sphere { radius: 1.0 };
        let far_t = Transform::from_xyz(0.0, 0.0, -20.0);
        let near_t = Transform::from_xyz(0.0, 0.0, -5.0);
        let behind_t = Transform::from_xyz(0.0, 0.0, 5.0);

        let hits = cast_ray(
            Vec3::ZERO,
            Dir3::NEG_Z,
            [
                (far, &far_t, &sphere),
                (behind, &behind_t, &sphere),
                (near, &near_t, &sphere),
            ],
        );

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, near);
        assert!((hits[0].distance - 4.0).abs() < 1e-4);
        assert_eq!(hits[1].entity, far);
    }

    #[test]
    fn test_cuboid_face_distance() {
        let mut world = World::new();
        let wall = world.spawn_empty().id();
        let hitbox = Hitbox::Cuboid {
            half_extents: Vec3::new(2.0, 2.0, 0.5),
        };
        let transform = Transform::from_xyz(0.0, 0.0, -3.5);

        let hit = nearest_hit(Vec3::ZERO, Dir3::NEG_Z, [(wall, &transform, &hitbox)]).unwrap();
        assert_eq!(hit.entity, wall);
        assert!((hit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_miss_sideways() {
        let mut world = World::new();
        let enemy = world.spawn_empty().id();
        let hitbox = Hitbox::Sphere { radius: 1.0 };
        let transform = Transform::from_xyz(5.0, 0.0, -10.0);

        assert!(nearest_hit(Vec3::ZERO, Dir3::NEG_Z, [(enemy, &transform, &hitbox)]).is_none());
    }
}
