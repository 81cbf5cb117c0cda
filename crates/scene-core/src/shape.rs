use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::constants::MIN_SHAPE_SCALE;

/// The six signature shapes. The set is fixed for the lifetime of the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeId {
    /// 270° partial torus.
    Torus270A,
    /// 270° partial torus.
    Torus270B,
    /// 180° partial torus.
    SemiA,
    /// 180° partial torus.
    SemiB,
    Wave,
    Sphere,
}

impl ShapeId {
    pub const COUNT: usize = 6;
    pub const ALL: [ShapeId; 6] = [
        ShapeId::Torus270A,
        ShapeId::Torus270B,
        ShapeId::SemiA,
        ShapeId::SemiB,
        ShapeId::Wave,
        ShapeId::Sphere,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeId::Torus270A => "torus270A",
            ShapeId::Torus270B => "torus270B",
            ShapeId::SemiA => "semiA",
            ShapeId::SemiB => "semiB",
            ShapeId::Wave => "wave",
            ShapeId::Sphere => "sphere",
        }
    }
}

/// A total mapping from every [`ShapeId`] to a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMap<T>([T; 6]);

impl<T> ShapeMap<T> {
    pub const fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(ShapeId) -> T) -> Self {
        Self(ShapeId::ALL.map(|id| f(id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &T)> {
        ShapeId::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ShapeId, &mut T)> {
        ShapeId::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> &[T; 6] {
        &self.0
    }

    pub fn map<U>(&self, mut f: impl FnMut(ShapeId, &T) -> U) -> ShapeMap<U> {
        ShapeMap::from_fn(|id| f(id, &self.0[id.index()]))
    }
}

impl<T: Copy> ShapeMap<T> {
    pub const fn splat(value: T) -> Self {
        Self([value; 6])
    }
}

impl<T> Index<ShapeId> for ShapeMap<T> {
    type Output = T;
    fn index(&self, id: ShapeId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<ShapeId> for ShapeMap<T> {
    fn index_mut(&mut self, id: ShapeId) -> &mut T {
        &mut self.0[id.index()]
    }
}

impl<T: Serialize> Serialize for ShapeMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ShapeId::COUNT))?;
        for (id, value) in self.iter() {
            map.serialize_entry(&id, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ShapeMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ShapeMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ShapeMapVisitor<T> {
            type Value = ShapeMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with an entry for every shape id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut slots: [Option<T>; 6] = Default::default();
                while let Some((id, value)) = access.next_entry::<ShapeId, T>()? {
                    slots[id.index()] = Some(value);
                }
                let mut out = Vec::with_capacity(ShapeId::COUNT);
                for (id, slot) in ShapeId::ALL.into_iter().zip(slots) {
                    match slot {
                        Some(v) => out.push(v),
                        None => return Err(serde::de::Error::missing_field(id.name())),
                    }
                }
                let values: [T; 6] = out
                    .try_into()
                    .map_err(|_| serde::de::Error::custom("shape map length mismatch"))?;
                Ok(ShapeMap(values))
            }
        }

        deserializer.deserialize_map(ShapeMapVisitor(PhantomData))
    }
}

/// One shape's pose. Rotation is XYZ Euler in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    #[serde(deserialize_with = "deserialize_scale")]
    pub scale: Vec3,
}

impl ShapeTransform {
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Vec3::ZERO, 1.0);

    pub const fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::splat(scale),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.scale.min_element() > 0.0
    }

    /// Zero non-finite components and lift non-positive scale to the minimum.
    pub fn sanitized(self) -> Self {
        let finite_or_zero = |v: Vec3| {
            Vec3::new(
                if v.x.is_finite() { v.x } else { 0.0 },
                if v.y.is_finite() { v.y } else { 0.0 },
                if v.z.is_finite() { v.z } else { 0.0 },
            )
        };
        let scale = finite_or_zero(self.scale).max(Vec3::splat(MIN_SHAPE_SCALE));
        Self {
            position: finite_or_zero(self.position),
            rotation: finite_or_zero(self.rotation),
            scale,
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScaleRepr {
    Uniform(f32),
    Axes(Vec3),
}

fn deserialize_scale<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
    Ok(match ScaleRepr::deserialize(deserializer)? {
        ScaleRepr::Uniform(s) => Vec3::splat(s),
        ScaleRepr::Axes(v) => v,
    })
}
