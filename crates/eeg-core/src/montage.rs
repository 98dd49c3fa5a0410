//! Electrode montages and channel resolution.
//!
//! Positions are top-down scalp coordinates: `x` runs left to right and `y`
//! runs back to front, both roughly within [-1.1, 1.1].

use crate::constants::SYNTHETIC_RING_RADIUS;
use crate::direction::map_to_direction;
use crate::knowledge::Region;
use fnv::{FnvHashMap, FnvHashSet};
use glam::{Vec2, Vec3};
use serde::Serialize;
use std::f32::consts::TAU;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MontagePoint {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
}

const fn p(name: &'static str, x: f32, y: f32) -> MontagePoint {
    MontagePoint { name, x, y }
}

/// Extended 10-10 layout used for the head view, in fill order.
pub static MONTAGE_64: [MontagePoint; 60] = [
    p("FP1", -0.55, 0.95),
    p("FPZ", 0.0, 0.98),
    p("FP2", 0.55, 0.95),
    p("AF3", -0.30, 0.88),
    p("AF4", 0.30, 0.88),
    p("F7", -0.92, 0.70),
    p("F5", -0.62, 0.72),
    p("F3", -0.36, 0.74),
    p("F1", -0.14, 0.76),
    p("FZ", 0.0, 0.78),
    p("F2", 0.14, 0.76),
    p("F4", 0.36, 0.74),
    p("F6", 0.62, 0.72),
    p("F8", 0.92, 0.70),
    p("FT7", -1.03, 0.46),
    p("FC5", -0.66, 0.46),
    p("FC3", -0.38, 0.48),
    p("FC1", -0.16, 0.50),
    p("FCZ", 0.0, 0.52),
    p("FC2", 0.16, 0.50),
    p("FC4", 0.38, 0.48),
    p("FC6", 0.66, 0.46),
    p("FT8", 1.03, 0.46),
    p("T7", -1.08, 0.12),
    p("C5", -0.70, 0.14),
    p("C3", -0.40, 0.16),
    p("C1", -0.18, 0.18),
    p("CZ", 0.0, 0.20),
    p("C2", 0.18, 0.18),
    p("C4", 0.40, 0.16),
    p("C6", 0.70, 0.14),
    p("T8", 1.08, 0.12),
    p("TP7", -1.03, -0.18),
    p("CP5", -0.66, -0.18),
    p("CP3", -0.38, -0.16),
    p("CP1", -0.16, -0.14),
    p("CPZ", 0.0, -0.12),
    p("CP2", 0.16, -0.14),
    p("CP4", 0.38, -0.16),
    p("CP6", 0.66, -0.18),
    p("TP8", 1.03, -0.18),
    p("P7", -0.92, -0.44),
    p("P5", -0.62, -0.44),
    p("P3", -0.36, -0.42),
    p("P1", -0.14, -0.40),
    p("PZ", 0.0, -0.38),
    p("P2", 0.14, -0.40),
    p("P4", 0.36, -0.42),
    p("P6", 0.62, -0.44),
    p("P8", 0.92, -0.44),
    p("PO7", -0.62, -0.68),
    p("PO5", -0.36, -0.66),
    p("PO3", -0.18, -0.64),
    p("POZ", 0.0, -0.62),
    p("PO4", 0.18, -0.64),
    p("PO6", 0.36, -0.66),
    p("PO8", 0.62, -0.68),
    p("O1", -0.38, -0.90),
    p("OZ", 0.0, -0.94),
    p("O2", 0.38, -0.90),
];

/// Dataset-specific channels shown on the flat scalp map only.
pub static SCALP_EXTRAS: [MontagePoint; 3] = [
    p("X", -0.85, -1.03),
    p("ND", 0.0, -1.06),
    p("Y", 0.85, -1.03),
];

fn montage_index() -> &'static FnvHashMap<&'static str, usize> {
    static INDEX: OnceLock<FnvHashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        MONTAGE_64
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name, i))
            .collect()
    })
}

/// Look up a montage position by name, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static MontagePoint> {
    let key = name.trim().to_ascii_uppercase();
    montage_index().get(key.as_str()).map(|&i| &MONTAGE_64[i])
}

/// Position on the flat scalp map, including the dataset extras.
pub fn scalp_position(name: &str) -> Option<Vec2> {
    let key = name.trim().to_ascii_uppercase();
    lookup(&key)
        .or_else(|| SCALP_EXTRAS.iter().find(|m| m.name == key))
        .map(|m| Vec2::new(m.x, m.y))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSource {
    Requested,
    Filled,
    Synthetic,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Electrode {
    pub name: String,
    /// Top-down montage coordinate.
    pub top: Vec2,
    pub direction: Vec3,
    pub source: ChannelSource,
}

impl Electrode {
    fn from_top(name: String, top: Vec2, source: ChannelSource) -> Self {
        Self {
            direction: map_to_direction(top.x, top.y),
            name,
            top,
            source,
        }
    }
}

/// Resolve requested channel names to exactly `count` electrodes.
///
/// Known names come first in request order (unknown and repeated names are
/// dropped). An empty request means the whole montage. The remainder is
/// filled from unused montage entries in montage order, then from evenly
/// spaced synthetic `CH{n}` channels on a ring.
pub fn resolve_channels<S: AsRef<str>>(names: &[S], count: usize) -> Vec<Electrode> {
    let mut picked: Vec<Electrode> = Vec::with_capacity(count);
    let mut used: FnvHashSet<&'static str> = FnvHashSet::default();

    let requested: Vec<String> = if names.is_empty() {
        MONTAGE_64.iter().map(|m| m.name.to_string()).collect()
    } else {
        names.iter().map(|n| n.as_ref().to_string()).collect()
    };

    for name in &requested {
        if picked.len() >= count {
            break;
        }
        let Some(m) = lookup(name) else {
            log::debug!("[montage] dropping unknown channel {:?}", name);
            continue;
        };
        if used.insert(m.name) {
            picked.push(Electrode::from_top(
                m.name.to_string(),
                Vec2::new(m.x, m.y),
                ChannelSource::Requested,
            ));
        }
    }

    for m in MONTAGE_64.iter() {
        if picked.len() >= count {
            break;
        }
        if used.insert(m.name) {
            picked.push(Electrode::from_top(
                m.name.to_string(),
                Vec2::new(m.x, m.y),
                ChannelSource::Filled,
            ));
        }
    }

    let remain = count - picked.len();
    for i in 0..remain {
        let angle = TAU * i as f32 / remain as f32;
        let top = Vec2::new(angle.cos(), angle.sin()) * SYNTHETIC_RING_RADIUS;
        let name = format!("CH{}", picked.len() + 1);
        picked.push(Electrode::from_top(name, top, ChannelSource::Synthetic));
    }
    picked
}

/// One electrode of the classic 20-channel 10-20 set used by the brain view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassicElectrode {
    pub name: &'static str,
    /// Raw layout position: `x` left-right, `y` back-front, `z` height.
    pub raw: [f32; 3],
    pub region: Region,
    pub label: &'static str,
    pub note: &'static str,
}

impl ClassicElectrode {
    /// Scene position (front is +Z, up is +Y) pushed out to `radius`.
    pub fn position(&self, radius: f32) -> Vec3 {
        let [x, y, z] = self.raw;
        Vec3::new(x, z, y).try_normalize().unwrap_or(Vec3::Y) * radius
    }
}

const fn c(
    name: &'static str,
    raw: [f32; 3],
    region: Region,
    label: &'static str,
    note: &'static str,
) -> ClassicElectrode {
    ClassicElectrode {
        name,
        raw,
        region,
        label,
        note,
    }
}

pub static CLASSIC_10_20: [ClassicElectrode; 20] = [
    c("Fp1", [-0.55, 0.88, 0.55], Region::Frontal, "Prefrontal (left)", "Attention and executive control; prone to blink artifacts."),
    c("Fp2", [0.55, 0.88, 0.55], Region::Frontal, "Prefrontal (right)", "Like Fp1; eye artifacts are common."),
    c("F7", [-0.92, 0.52, 0.35], Region::Frontal, "Fronto-temporal (left)", "Near the temporal area; sometimes picks up facial muscle activity."),
    c("F3", [-0.45, 0.55, 0.65], Region::Frontal, "Frontal (left)", "Executive function and attention."),
    c("Fz", [0.0, 0.62, 0.78], Region::Frontal, "Frontal midline", "Tracks midline frontal activity."),
    c("F4", [0.45, 0.55, 0.65], Region::Frontal, "Frontal (right)", "Symmetric counterpart of F3."),
    c("F8", [0.92, 0.52, 0.35], Region::Frontal, "Fronto-temporal (right)", "Near the temporal area; prone to muscle artifacts."),
    c("T3", [-1.05, 0.05, 0.2], Region::Temporal, "Temporal (left)", "Auditory and language processing, depending on context."),
    c("C3", [-0.6, 0.1, 0.75], Region::Central, "Central (left)", "Motor related; alpha/beta changes are often inspected here."),
    c("Cz", [0.0, 0.12, 0.92], Region::Central, "Central midline", "Key midline channel for motor activity."),
    c("C4", [0.6, 0.1, 0.75], Region::Central, "Central (right)", "Symmetric counterpart of C3."),
    c("T4", [1.05, 0.05, 0.2], Region::Temporal, "Temporal (right)", "Symmetric counterpart of T3."),
    c("T5", [-0.98, -0.38, 0.25], Region::Temporal, "Posterior temporal (left)", "Borders parietal and visual processing areas."),
    c("P3", [-0.48, -0.4, 0.7], Region::Parietal, "Parietal (left)", "Sensory integration and spatial attention."),
    c("Pz", [0.0, -0.42, 0.82], Region::Parietal, "Parietal midline", "Common site for cognitive response measures."),
    c("P4", [0.48, -0.4, 0.7], Region::Parietal, "Parietal (right)", "Symmetric counterpart of P3."),
    c("T6", [0.98, -0.38, 0.25], Region::Temporal, "Posterior temporal (right)", "Symmetric counterpart of T5."),
    c("O1", [-0.38, -0.86, 0.45], Region::Occipital, "Occipital (left)", "Alpha is usually strong here with eyes closed."),
    c("Oz", [0.0, -0.95, 0.38], Region::Occipital, "Occipital midline", "Good channel for vision-related alpha."),
    c("O2", [0.38, -0.86, 0.45], Region::Occipital, "Occipital (right)", "Symmetric counterpart of O1."),
];
