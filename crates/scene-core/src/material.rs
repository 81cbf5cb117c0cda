//! Material skins and theme tuning.
//!
//! Every shape carries two skins: a flat, unlit, vertex-coloured one (light
//! theme) and a monochrome physically shaded one (dark theme). The theme picks
//! the active skin; retuning always writes every parameter of the tuning table,
//! so switching back and forth cannot leave a stale value behind.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::palette::hex;
use crate::shape::ShapeId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkinKind {
    Flat,
    Physical,
}

impl SkinKind {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => SkinKind::Flat,
            Theme::Dark => SkinKind::Physical,
        }
    }
}

/// Identity of one material instance, used to release each exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId {
    pub shape: ShapeId,
    pub skin: SkinKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatMaterial {
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for FlatMaterial {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transparent: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalMaterial {
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub sheen: f32,
    pub sheen_color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub specular_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
}

/// The skin currently drawn for a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialSkin {
    Flat(FlatMaterial),
    Physical(PhysicalMaterial),
}

impl MaterialSkin {
    pub fn opacity(&self) -> f32 {
        match self {
            MaterialSkin::Flat(m) => m.opacity,
            MaterialSkin::Physical(m) => m.opacity,
        }
    }

    pub fn transparent(&self) -> bool {
        match self {
            MaterialSkin::Flat(m) => m.transparent,
            MaterialSkin::Physical(m) => m.transparent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    /// Direction the light travels; ignored for ambient.
    pub direction: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLights {
    pub ambient: Light,
    pub key: Light,
    pub rim: Light,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeTuning {
    pub physical: PhysicalMaterial,
    pub lights: SceneLights,
}

pub fn theme_tuning(theme: Theme) -> ThemeTuning {
    match theme {
        Theme::Light => ThemeTuning {
            physical: PhysicalMaterial {
                color: hex(0xf1f0ec),
                roughness: 0.55,
                metalness: 0.0,
                clearcoat: 0.3,
                clearcoat_roughness: 0.4,
                sheen: 0.0,
                sheen_color: Vec3::ONE,
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                specular_intensity: 0.4,
                opacity: 1.0,
                transparent: false,
            },
            lights: SceneLights {
                ambient: Light {
                    color: Vec3::ONE,
                    intensity: 1.0,
                    direction: Vec3::ZERO,
                },
                key: Light {
                    color: Vec3::ONE,
                    intensity: 0.6,
                    direction: Vec3::new(-0.4, -0.8, -0.45),
                },
                rim: Light {
                    color: hex(0xdde6ff),
                    intensity: 0.3,
                    direction: Vec3::new(0.6, 0.3, 0.75),
                },
            },
        },
        Theme::Dark => ThemeTuning {
            physical: PhysicalMaterial {
                color: hex(0x2a2d34),
                roughness: 0.32,
                metalness: 0.15,
                clearcoat: 0.85,
                clearcoat_roughness: 0.18,
                sheen: 0.45,
                sheen_color: hex(0x8fa2ff),
                emissive: hex(0x141827),
                emissive_intensity: 0.35,
                specular_intensity: 0.75,
                opacity: 1.0,
                transparent: false,
            },
            lights: SceneLights {
                ambient: Light {
                    color: hex(0xb8c4ff),
                    intensity: 0.22,
                    direction: Vec3::ZERO,
                },
                key: Light {
                    color: Vec3::ONE,
                    intensity: 1.5,
                    direction: Vec3::new(-0.5, -0.7, -0.5),
                },
                rim: Light {
                    color: hex(0x7c8cff),
                    intensity: 0.95,
                    direction: Vec3::new(0.7, 0.2, 0.7),
                },
            },
        },
    }
}

impl SceneLights {
    /// Theme lights with every intensity scaled by `brightness`.
    pub fn tuned(theme: Theme, brightness: f32) -> Self {
        let mut lights = theme_tuning(theme).lights;
        for light in [&mut lights.ambient, &mut lights.key, &mut lights.rim] {
            light.intensity *= brightness;
        }
        lights
    }
}

/// The pair of skins owned by one mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMaterials {
    pub shape: ShapeId,
    pub flat: FlatMaterial,
    pub physical: PhysicalMaterial,
    active: SkinKind,
}

impl ShapeMaterials {
    pub fn new(shape: ShapeId, theme: Theme, brightness: f32) -> Self {
        let mut materials = Self {
            shape,
            flat: FlatMaterial::default(),
            physical: theme_tuning(theme).physical,
            active: SkinKind::for_theme(theme),
        };
        materials.apply_theme(theme, brightness);
        materials
    }

    pub fn active_kind(&self) -> SkinKind {
        self.active
    }

    pub fn active(&self) -> MaterialSkin {
        match self.active {
            SkinKind::Flat => MaterialSkin::Flat(self.flat),
            SkinKind::Physical => MaterialSkin::Physical(self.physical),
        }
    }

    pub fn active_id(&self) -> MaterialId {
        MaterialId {
            shape: self.shape,
            skin: self.active,
        }
    }

    pub fn ids(&self) -> [MaterialId; 2] {
        [
            MaterialId {
                shape: self.shape,
                skin: SkinKind::Flat,
            },
            MaterialId {
                shape: self.shape,
                skin: SkinKind::Physical,
            },
        ]
    }

    /// Swap the active skin and rewrite the physical parameters for `theme`.
    /// Opacity survives the swap.
    pub fn apply_theme(&mut self, theme: Theme, brightness: f32) {
        let opacity = self.flat.opacity;
        let mut physical = theme_tuning(theme).physical;
        physical.emissive_intensity *= brightness;
        self.physical = physical;
        self.active = SkinKind::for_theme(theme);
        self.set_opacity(opacity);
    }

    /// Write `opacity` to both skins; anything below 1 is drawn transparent.
    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let transparent = opacity < 1.0;
        self.flat.opacity = opacity;
        self.flat.transparent = transparent;
        self.physical.opacity = opacity;
        self.physical.transparent = transparent;
    }
}
