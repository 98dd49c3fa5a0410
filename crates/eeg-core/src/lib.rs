pub mod api;
pub mod bands;
pub mod constants;
pub mod demo;
pub mod direction;
pub mod glb;
pub mod instances;
pub mod knowledge;
pub mod mesh;
pub mod montage;
pub mod primitives;
pub mod projection;
pub mod report;
pub mod scalp;
pub mod state;
pub static HEAD_WGSL: &str = include_str!("../shaders/head.wgsl");
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");

pub use constants::*;
pub use direction::{bias_upward, map_to_direction};
pub use instances::{marker_instances, InstanceData};
pub use mesh::{Aabb, HeadModel, Ray, SurfaceHit, TriMesh};
pub use montage::{resolve_channels, ChannelSource, Electrode};
pub use projection::{project_electrodes, Placement, ProjectedMarker, ProjectionConfig};
pub use state::*;
