//! Platform-independent runtime for the signature-shapes background scene.
//!
//! Nothing in here touches the DOM or the GPU directly. The web front-end
//! supplies a [`SceneRenderer`] and a frame clock; everything else (variant
//! layout, geometry, materials, interpolation, state and notifications) lives
//! in this crate so it can be exercised on the host.

pub mod bundle;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gradient;
pub mod interpolation;
pub mod material;
pub mod menu;
pub mod palette;
pub mod parallax;
pub mod registry;
pub mod renderer;
pub mod shape;
pub mod shapes;
pub mod shared;
pub mod state;
pub mod variant;

pub use bundle::{GroupTransform, Mesh, ShapeBundle};
pub use camera::OrthoCamera;
pub use constants::*;
pub use controller::{Breakpoint, SceneController, SceneOptions, Viewport};
pub use error::SceneError;
pub use events::{EventChannel, ListenerId};
pub use material::{MaterialId, MaterialSkin, Theme};
pub use menu::{ForwardOffset, HoverForward};
pub use palette::GradientPalette;
pub use registry::{InstanceId, ManagedInstance, SceneRegistry};
pub use renderer::{FrameView, SceneRenderer};
pub use shape::{ShapeId, ShapeMap, ShapeTransform};
pub use shared::SharedController;
pub use state::{PointerDriver, SceneState, StateUpdate};
pub use variant::{
    create_responsive_variant_state, create_variant_state, variant_template, VariantName,
    VariantState,
};
