//! World компоненты: collision shapes для ray/proximity queries, level geometry

use bevy::math::bounding::{Aabb3d, BoundingSphere};
use bevy::prelude::*;

/// Форма для ray intersection (центр = `Transform.translation`)
///
/// Враги — сферы (billboard sprite), стены — боксы.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum Hitbox {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl Hitbox {
    pub fn bounding_sphere(&self, center: Vec3) -> Option<BoundingSphere> {
        match *self {
            Hitbox::Sphere { radius } => Some(BoundingSphere::new(center, radius)),
            Hitbox::Cuboid { .. } => None,
        }
    }

    pub fn aabb(&self, center: Vec3) -> Aabb3d {
        match *self {
            Hitbox::Sphere { radius } => Aabb3d::new(center, Vec3::splat(radius)),
            Hitbox::Cuboid { half_extents } => Aabb3d::new(center, half_extents),
        }
    }
}

/// Статичная стена уровня
///
/// `secret == true` — интерактивная (опускается, пока на неё смотрят вблизи).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Wall {
    pub secret: bool,
}

/// Состояние secret wall
///
/// `base_y` — исходная высота; offset = translation.y - base_y монотонно убывает.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SecretWall {
    pub base_y: f32,
    /// Открытие уже началось (для одноразового лога/звука)
    pub opening: bool,
}

impl SecretWall {
    pub fn new(base_y: f32) -> Self {
        Self {
            base_y,
            opening: false,
        }
    }

    pub fn offset(&self, transform: &Transform) -> f32 {
        transform.translation.y - self.base_y
    }
}
