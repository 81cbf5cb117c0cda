//! The controller's mutable snapshot and the partial updates merged into it.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{BRIGHTNESS_MAX, BRIGHTNESS_MIN, CURSOR_BOOST_LIMIT};
use crate::material::Theme;
use crate::palette::GradientPalette;
use crate::shape::ShapeMap;
use crate::variant::{VariantName, VariantState};

/// Which pointer source feeds parallax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerDriver {
    #[default]
    Device,
    Manual,
}

/// Full scene state. Snapshots handed out are owned copies; mutating one never
/// reaches the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneState {
    pub variant_name: VariantName,
    /// The interpolation target, not the live mesh transforms.
    pub variant: VariantState,
    pub variant_transition_ms: Option<f32>,
    pub palette: GradientPalette,
    pub theme: Theme,
    pub parallax: bool,
    pub hovered: bool,
    pub cursor_boost: f32,
    /// Mirrors the active driver's target.
    #[serde(with = "xy")]
    pub pointer: Vec2,
    pub pointer_driver: PointerDriver,
    #[serde(with = "xy")]
    pub manual_pointer: Vec2,
    pub opacity: f32,
    pub shape_opacity: ShapeMap<f32>,
    pub brightness: f32,
    pub ready: bool,
}

impl SceneState {
    /// `clamp(opacity * shape_opacity[id], 0, 1)` per shape.
    pub fn effective_opacities(&self) -> ShapeMap<f32> {
        self.shape_opacity
            .map(|_, shape| (self.opacity * shape).clamp(0.0, 1.0))
    }
}

/// A partial state. `None` leaves a field untouched.
///
/// `variant_transition_ms` is doubly optional so `null` can clear an explicit
/// duration while an absent field keeps it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<VariantName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantState>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub variant_transition_ms: Option<Option<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<GradientPalette>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_driver: Option<PointerDriver>,
    #[serde(skip_serializing_if = "Option::is_none", with = "xy_option")]
    pub manual_pointer: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_opacity: Option<ShapeMap<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        *self == StateUpdate::default()
    }
}

/// Pointers cross the wire as `{ "x": .., "y": .. }`.
#[derive(Serialize, Deserialize)]
struct Xy {
    x: f32,
    y: f32,
}

mod xy {
    use super::Xy;
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Xy { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let p = Xy::deserialize(d)?;
        Ok(Vec2::new(p.x, p.y))
    }
}

mod xy_option {
    use super::Xy;
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Vec2>, s: S) -> Result<S::Ok, S::Error> {
        v.map(|v| Xy { x: v.x, y: v.y }).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec2>, D::Error> {
        Ok(Option::<Xy>::deserialize(d)?.map(|p| Vec2::new(p.x, p.y)))
    }
}

fn present_or_null<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<f32>>, D::Error> {
    Option::<f32>::deserialize(deserializer).map(Some)
}

/// `None` for NaN, otherwise clamped into `[lo, hi]`.
#[inline]
pub(crate) fn clamp_number(value: f32, lo: f32, hi: f32) -> Option<f32> {
    (!value.is_nan()).then(|| value.clamp(lo, hi))
}

#[inline]
pub(crate) fn clamp_unit(value: f32) -> Option<f32> {
    clamp_number(value, 0.0, 1.0)
}

#[inline]
pub(crate) fn clamp_brightness(value: f32) -> Option<f32> {
    clamp_number(value, BRIGHTNESS_MIN, BRIGHTNESS_MAX)
}

#[inline]
pub(crate) fn clamp_cursor_boost(value: f32) -> Option<f32> {
    clamp_number(value, -CURSOR_BOOST_LIMIT, CURSOR_BOOST_LIMIT)
}

/// Explicit transition durations must be positive and finite; anything else
/// falls back to the base rate.
#[inline]
pub(crate) fn normalize_transition(ms: Option<f32>) -> Option<f32> {
    ms.filter(|v| v.is_finite() && *v > 0.0)
}
