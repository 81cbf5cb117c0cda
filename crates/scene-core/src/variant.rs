//! Named layout variants and their viewport-responsive adjustment.
//!
//! Templates are laid out for a viewport at (or above) the breakpoint with the
//! default orthographic frustum
//! (half-height [`FRUSTUM_HALF_HEIGHT`](crate::constants::FRUSTUM_HALF_HEIGHT)). Smaller
//! or narrower viewports pull the composition in toward the centre.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{RESPONSIVE_MIN_FIT, RESPONSIVE_SCALE_FLOOR};
use crate::shape::{ShapeId, ShapeMap, ShapeTransform};

/// Per-shape target transforms; total over every [`ShapeId`].
pub type VariantState = ShapeMap<ShapeTransform>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantName {
    Home,
    About,
    Work,
    Contact,
    Avatar,
    /// Layout used while the navigation overlay is open.
    Menu,
}

impl VariantName {
    pub const ALL: [VariantName; 6] = [
        VariantName::Home,
        VariantName::About,
        VariantName::Work,
        VariantName::Contact,
        VariantName::Avatar,
        VariantName::Menu,
    ];
}

const fn t(pos: [f32; 3], rot: [f32; 3], scale: f32) -> ShapeTransform {
    ShapeTransform::new(
        Vec3::new(pos[0], pos[1], pos[2]),
        Vec3::new(rot[0], rot[1], rot[2]),
        scale,
    )
}

// Order: torus270A, torus270B, semiA, semiB, wave, sphere
static HOME: VariantState = ShapeMap::new([
    t([3.2, 1.6, 0.0], [0.3, -0.2, 0.4], 1.6),
    t([5.4, -1.8, -0.5], [-0.2, 0.4, 2.1], 1.2),
    t([1.2, -2.6, 0.4], [0.5, 0.1, -0.6], 1.3),
    t([6.2, 2.9, -1.0], [0.1, -0.5, 1.2], 0.9),
    t([2.8, -0.4, 1.0], [0.2, 0.3, -0.25], 1.1),
    t([4.6, 0.2, 0.8], [0.0, 0.0, 0.0], 0.8),
]);

static ABOUT: VariantState = ShapeMap::new([
    t([-4.8, 2.2, 0.0], [0.2, 0.3, -0.5], 1.2),
    t([-2.6, -2.4, -0.4], [-0.3, -0.2, 1.6], 1.0),
    t([-6.0, -0.8, 0.5], [0.4, -0.1, 0.9], 1.1),
    t([-1.8, 3.4, -0.8], [0.0, 0.4, -1.1], 0.8),
    t([-4.2, -0.2, 1.0], [-0.1, -0.3, 0.3], 1.0),
    t([-3.0, 0.9, 0.6], [0.0, 0.0, 0.0], 0.7),
]);

static WORK: VariantState = ShapeMap::new([
    t([-5.6, 3.2, -0.6], [0.4, 0.2, 0.2], 1.0),
    t([5.8, 3.4, -0.6], [-0.3, -0.4, 2.6], 1.0),
    t([-2.2, 3.8, 0.2], [0.6, 0.0, -0.4], 0.9),
    t([2.4, 3.6, 0.2], [0.2, 0.3, 0.8], 0.9),
    t([0.0, 3.1, 0.8], [0.1, 0.0, 0.0], 1.2),
    t([7.2, -3.4, 0.4], [0.0, 0.0, 0.0], 0.6),
]);

static CONTACT: VariantState = ShapeMap::new([
    t([-1.8, -2.6, 0.0], [0.5, 0.2, 0.9], 1.3),
    t([1.9, -2.9, -0.4], [-0.4, 0.2, -2.4], 1.1),
    t([-3.8, -3.4, 0.3], [0.3, -0.3, 0.2], 1.0),
    t([3.9, -3.2, -0.2], [0.2, 0.5, -0.7], 0.9),
    t([0.1, -1.2, 1.0], [0.2, -0.2, 0.1], 1.0),
    t([0.0, -3.6, 0.9], [0.0, 0.0, 0.0], 0.75),
]);

static AVATAR: VariantState = ShapeMap::new([
    t([-0.9, 0.8, 0.0], [0.3, -0.2, 0.4], 0.9),
    t([1.0, -0.7, -0.3], [-0.2, 0.4, 2.1], 0.8),
    t([-1.1, -0.9, 0.3], [0.5, 0.1, -0.6], 0.8),
    t([1.2, 1.0, -0.5], [0.1, -0.5, 1.2], 0.6),
    t([0.0, 0.0, 0.8], [0.2, 0.3, -0.25], 0.7),
    t([0.1, 0.1, 0.5], [0.0, 0.0, 0.0], 0.5),
]);

static MENU: VariantState = ShapeMap::new([
    t([-5.2, 2.6, -1.0], [0.3, -0.4, 0.6], 1.9),
    t([5.6, -2.2, -1.2], [-0.2, 0.6, 2.4], 1.7),
    t([-3.4, -3.0, -0.6], [0.6, 0.2, -0.8], 1.5),
    t([4.2, 3.2, -1.4], [0.2, -0.6, 1.4], 1.3),
    t([0.6, -0.2, -0.4], [0.1, 0.4, -0.2], 1.6),
    t([6.4, 0.8, -0.2], [0.0, 0.0, 0.0], 1.1),
]);

/// Immutable base template for a variant. Clone with [`create_variant_state`]
/// before mutating.
pub fn variant_template(name: VariantName) -> &'static VariantState {
    match name {
        VariantName::Home => &HOME,
        VariantName::About => &ABOUT,
        VariantName::Work => &WORK,
        VariantName::Contact => &CONTACT,
        VariantName::Avatar => &AVATAR,
        VariantName::Menu => &MENU,
    }
}

/// Deep copy of a template; the result shares nothing with `template`.
#[inline]
pub fn create_variant_state(template: &VariantState) -> VariantState {
    *template
}

/// How far the layout has to shrink for the given viewport, in
/// `[RESPONSIVE_MIN_FIT, 1]`. `None` when any dimension is not positive.
pub fn responsive_fit(
    width: f32,
    height: f32,
    breakpoint_width: f32,
    breakpoint_height: f32,
) -> Option<f32> {
    let dims = [width, height, breakpoint_width, breakpoint_height];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return None;
    }
    let aspect_fit = (width / height) / (breakpoint_width / breakpoint_height);
    let size_fit = width / breakpoint_width;
    Some(aspect_fit.min(size_fit).clamp(RESPONSIVE_MIN_FIT, 1.0))
}

/// Adjust a template for the current viewport.
///
/// Horizontal spread follows the fit directly, vertical spread half as much,
/// and shape scale eases toward [`RESPONSIVE_SCALE_FLOOR`]. Depth and rotation
/// are left alone. Pure: identical inputs give identical outputs, and a
/// degenerate viewport returns the template unchanged.
pub fn create_responsive_variant_state(
    template: &VariantState,
    width: f32,
    height: f32,
    breakpoint_width: f32,
    breakpoint_height: f32,
) -> VariantState {
    let mut out = create_variant_state(template);
    let Some(fit) = responsive_fit(width, height, breakpoint_width, breakpoint_height) else {
        return out;
    };
    if fit >= 1.0 {
        return out;
    }
    let spread_y = 0.5 * (1.0 + fit);
    let span = (1.0 - fit) / (1.0 - RESPONSIVE_MIN_FIT);
    let scale_factor = 1.0 - (1.0 - RESPONSIVE_SCALE_FLOOR) * span;
    for (_, tr) in out.iter_mut() {
        tr.position.x *= fit;
        tr.position.y *= spread_y;
        tr.scale *= scale_factor;
    }
    out
}

impl ShapeMap<ShapeTransform> {
    pub fn all_valid(&self) -> bool {
        self.iter().all(|(_, tr)| tr.is_valid())
    }

    pub fn sanitized(&self) -> Self {
        self.map(|_, tr| tr.sanitized())
    }

    pub fn transform(&self, id: ShapeId) -> &ShapeTransform {
        &self[id]
    }
}
