//! Anatomical notes for electrodes.
//!
//! Lookup is two-tier: a fixed table of well-known channels, else a
//! description of the region the name's prefix places it in.

use fnv::FnvHashMap;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Frontal,
    Central,
    Parietal,
    Temporal,
    Occipital,
    Other,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Frontal,
        Region::Central,
        Region::Parietal,
        Region::Temporal,
        Region::Occipital,
        Region::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Frontal => "Frontal",
            Region::Central => "Central",
            Region::Parietal => "Parietal",
            Region::Temporal => "Temporal",
            Region::Occipital => "Occipital",
            Region::Other => "Other",
        }
    }

    /// RGBA fill used on the scalp map.
    pub fn color(self) -> [u8; 4] {
        match self {
            Region::Frontal => [59, 130, 246, 230],
            Region::Central => [16, 185, 129, 230],
            Region::Parietal => [168, 85, 247, 230],
            Region::Temporal => [245, 158, 11, 230],
            Region::Occipital => [236, 72, 153, 230],
            Region::Other => [148, 163, 184, 230],
        }
    }

    pub fn css_color(self) -> String {
        let [r, g, b, a] = self.color();
        format!("rgba({},{},{},{:.2})", r, g, b, a as f32 / 255.0)
    }
}

// Checked in order; the first match wins, so FC and FT read as frontal,
// CP as central and PO as parietal.
const REGION_PREFIXES: [(&str, Region); 12] = [
    ("FP", Region::Frontal),
    ("AF", Region::Frontal),
    ("F", Region::Frontal),
    ("FC", Region::Central),
    ("C", Region::Central),
    ("CP", Region::Parietal),
    ("P", Region::Parietal),
    ("PO", Region::Occipital),
    ("O", Region::Occipital),
    ("FT", Region::Temporal),
    ("T", Region::Temporal),
    ("TP", Region::Temporal),
];

/// Classify an electrode name by the first matching 10-10 prefix.
pub fn region_of(name: &str) -> Region {
    let key = name.trim().to_ascii_uppercase();
    REGION_PREFIXES
        .iter()
        .find(|(prefix, _)| key.starts_with(prefix))
        .map(|(_, r)| *r)
        .unwrap_or(Region::Other)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: &'static str,
    pub url: &'static str,
    pub accessed: &'static str,
}

pub static SOURCES: [Source; 7] = [
    Source {
        title: "Wikipedia: International 10-20 system (EEG electrode placement)",
        url: "https://en.wikipedia.org/wiki/10%E2%80%9320_system_(EEG)",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Frontal lobe",
        url: "https://en.wikipedia.org/wiki/Frontal_lobe",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Motor cortex",
        url: "https://en.wikipedia.org/wiki/Motor_cortex",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Somatosensory cortex",
        url: "https://en.wikipedia.org/wiki/Somatosensory_cortex",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Parietal lobe",
        url: "https://en.wikipedia.org/wiki/Parietal_lobe",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Occipital lobe",
        url: "https://en.wikipedia.org/wiki/Occipital_lobe",
        accessed: "2026-01-11",
    },
    Source {
        title: "Wikipedia: Temporal lobe",
        url: "https://en.wikipedia.org/wiki/Temporal_lobe",
        accessed: "2026-01-11",
    },
];

struct Entry {
    summary: &'static str,
    increase: &'static str,
    decrease: &'static str,
    sources: &'static [usize],
}

const PREFRONTAL_INCREASE: &str = "More prefrontal activity often accompanies higher attention or executive demand; frontal EEG is also easily contaminated by blinks and facial EMG.";
const PREFRONTAL_DECREASE: &str = "Less activity or fewer characteristic rhythms can relate to reduced attention or a change in alertness, depending on context.";
const MOTOR_INCREASE: &str = "Changes often track movement or movement preparation; mu/beta rhythms typically desynchronize during motor activity.";
const MOTOR_DECREASE: &str = "Mu/beta rhythms tend to be stronger at rest, when no movement is being planned or performed.";
const VISUAL_INCREASE: &str = "Occipital alpha usually rises with eyes closed or during relaxation.";
const VISUAL_DECREASE: &str = "Occipital alpha usually drops with eyes open or focused visual attention.";
const TEMPORAL_INCREASE: &str = "Activity can reflect auditory or language processing, or muscle artifacts from chewing and speech.";
const TEMPORAL_DECREASE: &str = "Lower activity can occur with little auditory or language engagement or a change in state.";
const DATASET_CHANNEL: &str = "Dataset-specific channel outside the standard 10-20/10-10 naming. Its placement depends on the recording setup; check the dataset documentation before interpreting it.";
const DATASET_INCREASE: &str = "No standard interpretation; changes may reflect reference, ground or auxiliary signals.";
const DATASET_DECREASE: &str = "No standard interpretation.";

fn exact_entries() -> &'static FnvHashMap<&'static str, Entry> {
    static TABLE: OnceLock<FnvHashMap<&'static str, Entry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = FnvHashMap::default();
        t.insert("FP1", Entry {
            summary: "Left prefrontal site. Usually associated with attention, behavioral control and cognitive control.",
            increase: PREFRONTAL_INCREASE,
            decrease: PREFRONTAL_DECREASE,
            sources: &[0, 1],
        });
        t.insert("FP2", Entry {
            summary: "Right prefrontal site. Associated with attention and executive function, like FP1.",
            increase: PREFRONTAL_INCREASE,
            decrease: PREFRONTAL_DECREASE,
            sources: &[0, 1],
        });
        t.insert("FZ", Entry {
            summary: "Frontal midline site. Often used to follow midline frontal activity such as frontal theta during mental effort.",
            increase: "Frontal midline theta often rises with working-memory load and sustained concentration.",
            decrease: "Lower frontal midline activity is typical of rest or low task demand.",
            sources: &[0, 1],
        });
        t.insert("C3", Entry {
            summary: "Left central site over the sensorimotor cortex, closely tied to the right side of the body.",
            increase: MOTOR_INCREASE,
            decrease: MOTOR_DECREASE,
            sources: &[0, 2, 3],
        });
        t.insert("C4", Entry {
            summary: "Right central site over the sensorimotor cortex, closely tied to the left side of the body.",
            increase: MOTOR_INCREASE,
            decrease: MOTOR_DECREASE,
            sources: &[0, 2, 3],
        });
        t.insert("CZ", Entry {
            summary: "Central midline site near the vertex, over motor and sensory areas for the legs and trunk.",
            increase: MOTOR_INCREASE,
            decrease: MOTOR_DECREASE,
            sources: &[0, 2, 3],
        });
        t.insert("PZ", Entry {
            summary: "Parietal midline site. Associated with sensory integration and spatial attention; a common site for cognitive evoked responses.",
            increase: "Activity can rise with attentional and sensory processing demands.",
            decrease: "Activity can fall during relaxation or low sensory load.",
            sources: &[0, 4],
        });
        t.insert("O1", Entry {
            summary: "Left occipital site over visual cortex.",
            increase: VISUAL_INCREASE,
            decrease: VISUAL_DECREASE,
            sources: &[0, 5],
        });
        t.insert("O2", Entry {
            summary: "Right occipital site over visual cortex.",
            increase: VISUAL_INCREASE,
            decrease: VISUAL_DECREASE,
            sources: &[0, 5],
        });
        t.insert("T7", Entry {
            summary: "Left temporal site. Associated with auditory processing, language and memory.",
            increase: TEMPORAL_INCREASE,
            decrease: TEMPORAL_DECREASE,
            sources: &[0, 6],
        });
        t.insert("T8", Entry {
            summary: "Right temporal site. Associated with auditory processing and memory.",
            increase: TEMPORAL_INCREASE,
            decrease: TEMPORAL_DECREASE,
            sources: &[0, 6],
        });
        for name in ["X", "Y", "ND"] {
            t.insert(name, Entry {
                summary: DATASET_CHANNEL,
                increase: DATASET_INCREASE,
                decrease: DATASET_DECREASE,
                sources: &[0],
            });
        }
        t
    })
}

fn region_entry(region: Region) -> Entry {
    match region {
        Region::Frontal => Entry {
            summary: "Frontal electrode group. Usually associated with attention, cognitive control, planning and behavioral control, depending on left, right or midline placement.",
            increase: "More activity can relate to higher cognitive load, attention or stress. Frontal sites are also sensitive to blinks and facial muscle noise.",
            decrease: "Less activity can occur with relaxation, lower task demand or a change in alertness.",
            sources: &[0, 1],
        },
        Region::Central => Entry {
            summary: "Central (rolandic) electrode group near the motor and somatosensory cortex.",
            increase: "More activity can relate to movement, movement preparation or sensory responses; head and neck EMG can also contribute.",
            decrease: "Less activity can occur at rest, when movement stops or with little sensory stimulation.",
            sources: &[0, 2, 3],
        },
        Region::Parietal => Entry {
            summary: "Parietal or centro-parietal electrode group. Usually associated with sensory integration, spatial attention and multisensory processing.",
            increase: "More activity can relate to increased attentional or sensory processing, depending on the task.",
            decrease: "Less activity can occur with relaxation or reduced sensory and attentional demand.",
            sources: &[0, 4],
        },
        Region::Occipital => Entry {
            summary: "Occipital or parieto-occipital electrode group over visual cortex; occipital alpha is prominent with eyes closed.",
            increase: VISUAL_INCREASE,
            decrease: VISUAL_DECREASE,
            sources: &[0, 5],
        },
        Region::Temporal => Entry {
            summary: "Temporal or temporo-parietal electrode group. Usually associated with hearing, language and memory, depending on the side.",
            increase: TEMPORAL_INCREASE,
            decrease: TEMPORAL_DECREASE,
            sources: &[0, 6],
        },
        Region::Other => Entry {
            summary: "EEG electrode in the 10-20/10-10 system. Details depend on the exact site and recording context.",
            increase: "More activity can reflect task engagement or EMG/EOG contamination, depending on the site.",
            decrease: "Less activity can occur with relaxation, little stimulation or a change in alertness.",
            sources: &[0],
        },
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElectrodeInfo {
    pub name: String,
    pub region: Region,
    /// True when the text comes from the region fallback.
    pub generic: bool,
    pub summary: &'static str,
    pub increase: &'static str,
    pub decrease: &'static str,
    pub caution: &'static str,
    pub sources: Vec<&'static Source>,
}

pub const CAUTION: &str = "Reference notes only, not a diagnosis. Interpretation depends on the montage, reference, artifacts and experimental context.";

/// Describe an electrode. Never fails: unknown names get the region text.
pub fn electrode_info(name: &str) -> ElectrodeInfo {
    let key = name.trim().to_ascii_uppercase();
    let region = region_of(&key);
    let (entry, generic) = match exact_entries().get(key.as_str()) {
        Some(e) => (
            Entry {
                summary: e.summary,
                increase: e.increase,
                decrease: e.decrease,
                sources: e.sources,
            },
            false,
        ),
        None => (region_entry(region), true),
    };
    ElectrodeInfo {
        name: key,
        region,
        generic,
        summary: entry.summary,
        increase: entry.increase,
        decrease: entry.decrease,
        caution: CAUTION,
        sources: entry.sources.iter().filter_map(|&i| SOURCES.get(i)).collect(),
    }
}
