//! Scene state owned by the 3D view: which surface is shown, where its
//! markers sit, and which marker is selected or hovered.

use crate::constants::PICK_RADIUS_SCALE;
use crate::input;
use eeg_core::montage::CLASSIC_10_20;
use eeg_core::{
    marker_instances, primitives, project_electrodes, resolve_channels, HeadModel, InstanceData,
    Placement, ProjectedMarker, ProjectionConfig, Ray, TriMesh, BRAIN_COLOR, CLASSIC_RADIUS,
    DEFAULT_CHANNEL_COUNT, HEAD_COLOR, MARKER_RADIUS,
};
use glam::{Affine3A, Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Head,
    Brain,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Head => ViewMode::Brain,
            ViewMode::Brain => ViewMode::Head,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Head => "Head (64-channel montage)",
            ViewMode::Brain => "Brain (10-20 system)",
        }
    }
}

/// A drawable surface with markers in its local space.
pub struct SceneView {
    pub mesh: TriMesh,
    pub world_from_local: Affine3A,
    pub color: [f32; 4],
    pub markers: Vec<ProjectedMarker>,
}

impl SceneView {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from(self.world_from_local)
    }

    fn world_centers(&self) -> Vec<Vec3> {
        self.markers
            .iter()
            .map(|m| self.world_from_local.transform_point3(m.position))
            .collect()
    }
}

/// Markers are projected only onto a loaded head asset; over the placeholder
/// head they keep their raw directions.
fn head_view(
    model: &HeadModel,
    loaded: bool,
    channels: &[String],
    config: &ProjectionConfig,
) -> SceneView {
    let electrodes = resolve_channels(channels, DEFAULT_CHANNEL_COUNT);
    SceneView {
        mesh: model.local_mesh().clone(),
        world_from_local: model.world_from_local(),
        color: HEAD_COLOR,
        markers: project_electrodes(loaded.then_some(model), &electrodes, config),
    }
}

fn brain_view() -> SceneView {
    SceneView {
        mesh: primitives::brain_shell(),
        world_from_local: Affine3A::IDENTITY,
        color: BRAIN_COLOR,
        markers: CLASSIC_10_20
            .iter()
            .map(|e| ProjectedMarker {
                name: e.name.to_string(),
                position: e.position(CLASSIC_RADIUS),
                placement: Placement::Surface,
            })
            .collect(),
    }
}

pub struct SceneState {
    pub mode: ViewMode,
    head_model: HeadModel,
    head_loaded: bool,
    channels: Vec<String>,
    config: ProjectionConfig,
    head: SceneView,
    brain: SceneView,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    /// Set when the drawn mesh must be re-uploaded.
    pub mesh_dirty: bool,
    /// Set when marker instances must be rebuilt.
    pub markers_dirty: bool,
}

impl SceneState {
    /// Start with the placeholder head until an asset is loaded.
    pub fn new(placeholder: HeadModel) -> Self {
        let config = ProjectionConfig::default();
        let channels = Vec::new();
        let head = head_view(&placeholder, false, &channels, &config);
        Self {
            mode: ViewMode::Head,
            head_model: placeholder,
            head_loaded: false,
            channels,
            config,
            head,
            brain: brain_view(),
            selected: None,
            hovered: None,
            mesh_dirty: true,
            markers_dirty: true,
        }
    }

    pub fn active(&self) -> &SceneView {
        match self.mode {
            ViewMode::Head => &self.head,
            ViewMode::Brain => &self.brain,
        }
    }

    fn reproject(&mut self) {
        self.head = head_view(&self.head_model, self.head_loaded, &self.channels, &self.config);
        let unprojected = self
            .head
            .markers
            .iter()
            .filter(|m| m.placement == Placement::Unprojected)
            .count();
        log::info!(
            "[scene] {} markers on head ({} unprojected)",
            self.head.markers.len(),
            unprojected
        );
        if self.mode == ViewMode::Head {
            self.selected = None;
            self.hovered = None;
            self.mesh_dirty = true;
            self.markers_dirty = true;
        }
    }

    /// New head asset finished loading.
    pub fn set_head_model(&mut self, model: HeadModel) {
        self.head_model = model;
        self.head_loaded = true;
        self.reproject();
    }

    /// User edited the channel list; an empty list means the whole montage.
    pub fn set_channels(&mut self, channels: Vec<String>) {
        self.channels = channels;
        self.reproject();
    }

    pub fn toggle_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        self.selected = None;
        self.hovered = None;
        self.mesh_dirty = true;
        self.markers_dirty = true;
        self.mode
    }

    /// Marker under a world-space ray, nearest first.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        let centers = self.active().world_centers();
        input::pick_nearest(ray.origin, ray.dir, &centers, MARKER_RADIUS * PICK_RADIUS_SCALE)
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.markers_dirty = true;
        }
    }

    /// Select by index and return the electrode name.
    pub fn select(&mut self, index: Option<usize>) -> Option<String> {
        self.selected = index;
        self.markers_dirty = true;
        index.and_then(|i| self.active().markers.get(i).map(|m| m.name.clone()))
    }

    /// Select the marker with this name in the active view, if present.
    pub fn select_by_name(&mut self, name: &str) -> Option<usize> {
        let index = self
            .active()
            .markers
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name.trim()));
        self.select(index);
        index
    }

    pub fn instances(&self) -> Vec<InstanceData> {
        marker_instances(&self.active().markers, self.selected, self.hovered)
    }
}
