//! Places electrode markers on the visible scalp of an arbitrary head mesh.
//!
//! Each electrode direction is turned into a short, ordered list of candidate
//! rays aimed inward at the model. The first hit that lands on the scalp
//! (high enough, not too far forward in the model's local frame) wins. While
//! scanning, the best-scoring hit is remembered so that a channel whose rays
//! all graze the face or neck still lands somewhere sensible. A channel that
//! hits nothing keeps its raw direction.

use crate::constants::{
    CANDIDATE_BIASES, MAX_FRONT_Z, MIN_DIRECTION_Y, MIN_SCALP_Y, NORMAL_OFFSET,
    RAY_ORIGIN_RADIUS, SCORE_FRONT_WEIGHT, SCORE_UP_WEIGHT, UNPROJECTED_RADIUS,
};
use crate::direction::bias_upward;
use crate::mesh::{HeadModel, Ray, SurfaceHit};
use crate::montage::Electrode;
use glam::Vec3;
use serde::Serialize;
use smallvec::SmallVec;

/// Tunables for [`project_electrodes`]. The scalp thresholds were tuned for
/// one head asset and are worth revisiting for others.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    pub ray_origin_radius: f32,
    pub normal_offset: f32,
    pub min_direction_y: f32,
    pub min_scalp_y: f32,
    pub max_front_z: f32,
    pub score_up_weight: f32,
    pub score_front_weight: f32,
    pub unprojected_radius: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            ray_origin_radius: RAY_ORIGIN_RADIUS,
            normal_offset: NORMAL_OFFSET,
            min_direction_y: MIN_DIRECTION_Y,
            min_scalp_y: MIN_SCALP_Y,
            max_front_z: MAX_FRONT_Z,
            score_up_weight: SCORE_UP_WEIGHT,
            score_front_weight: SCORE_FRONT_WEIGHT,
            unprojected_radius: UNPROJECTED_RADIUS,
        }
    }
}

impl ProjectionConfig {
    /// Ranking used when no candidate passes the scalp filter.
    pub fn score(&self, local: Vec3) -> f32 {
        local.y * self.score_up_weight - local.z.max(0.0) * self.score_front_weight
    }

    pub fn on_scalp(&self, local: Vec3) -> bool {
        local.y >= self.min_scalp_y && local.z <= self.max_front_z
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// A candidate passed the scalp filter.
    Surface,
    /// No candidate passed; the best-scoring hit was used.
    BestEffort,
    /// Nothing was hit; raw direction at the default radius.
    Unprojected,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectedMarker {
    pub name: String,
    /// Position in the head model's local space.
    pub position: Vec3,
    pub placement: Placement,
}

/// Ordered candidate directions for one electrode: the lifted base direction
/// followed by the upward/backward variants.
pub fn candidate_directions(direction: Vec3, cfg: &ProjectionConfig) -> SmallVec<[Vec3; 4]> {
    let base = bias_upward(direction, cfg.min_direction_y);
    let mut out = SmallVec::new();
    out.push(base);
    for bias in CANDIDATE_BIASES {
        out.push((base + Vec3::from_array(bias)).try_normalize().unwrap_or(Vec3::Y));
    }
    out
}

struct Scored {
    hit: SurfaceHit,
    score: f32,
}

/// Project one direction. Returns the chosen hit and whether it passed the
/// scalp filter, or `None` when no candidate hit the model.
pub fn project_direction(
    model: &HeadModel,
    direction: Vec3,
    cfg: &ProjectionConfig,
) -> Option<(SurfaceHit, Placement)> {
    let mut best: Option<Scored> = None;
    for dir in candidate_directions(direction, cfg) {
        let ray = Ray::new(dir * cfg.ray_origin_radius, -dir);
        let Some(hit) = model.raycast(&ray) else {
            continue;
        };
        let local = model.to_local(hit.point);
        let score = cfg.score(local);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Scored { hit, score });
        }
        if cfg.on_scalp(local) {
            return Some((hit, Placement::Surface));
        }
    }
    best.map(|b| (b.hit, Placement::BestEffort))
}

/// Project every electrode onto `model`. Without a model every electrode is
/// left unprojected.
pub fn project_electrodes(
    model: Option<&HeadModel>,
    electrodes: &[Electrode],
    cfg: &ProjectionConfig,
) -> Vec<ProjectedMarker> {
    let markers: Vec<ProjectedMarker> = electrodes
        .iter()
        .map(|e| {
            let projected = model.and_then(|m| {
                project_direction(m, e.direction, cfg).map(|(hit, placement)| {
                    let lifted = hit.point + hit.normal * cfg.normal_offset;
                    (m.to_local(lifted), placement)
                })
            });
            let (position, placement) = projected.unwrap_or((
                e.direction * cfg.unprojected_radius,
                Placement::Unprojected,
            ));
            ProjectedMarker {
                name: e.name.clone(),
                position,
                placement,
            }
        })
        .collect();

    let best_effort = markers
        .iter()
        .filter(|m| m.placement == Placement::BestEffort)
        .count();
    let unprojected = markers
        .iter()
        .filter(|m| m.placement == Placement::Unprojected)
        .count();
    log::info!(
        "[projection] {} markers ({} best-effort, {} unprojected)",
        markers.len(),
        best_effort,
        unprojected
    );
    markers
}
