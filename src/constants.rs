// Browser-side tuning. Scene tuning lives in `scene_core::constants`.

/// Backing-store pixel ratio cap; higher ratios cost fill rate for no visible gain.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Transparent so the page background shows through the canvas.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

pub const SHAPE_WGSL: &str = include_str!("../shaders/shape.wgsl");
