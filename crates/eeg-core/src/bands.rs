//! EEG frequency bands and bandpower feature names (`bp_<band>_<channel>`).

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub id: &'static str,
    pub title: &'static str,
    pub url: &'static str,
}

pub static CITATIONS: [Citation; 3] = [
    Citation {
        id: "wiki-eeg",
        title: "Wikipedia: Electroencephalography",
        url: "https://en.wikipedia.org/wiki/Electroencephalography",
    },
    Citation {
        id: "mayo-eeg",
        title: "Mayo Clinic: EEG (electroencephalogram)",
        url: "https://www.mayoclinic.org/tests-procedures/eeg/about/pac-20393875",
    },
    Citation {
        id: "nibib-eeg",
        title: "NIBIB: Electroencephalography (EEG)",
        url: "https://www.nibib.nih.gov/science-education/science-topics/electroencephalography-eeg",
    },
];

pub fn citation(id: &str) -> Option<&'static Citation> {
    CITATIONS.iter().find(|c| c.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BandInfo {
    pub band: Band,
    pub label: &'static str,
    pub low_hz: f32,
    pub high_hz: f32,
    pub meaning: &'static str,
    pub caution: &'static str,
    pub citations: &'static [&'static str],
}

impl BandInfo {
    pub fn range_text(&self) -> String {
        format!("{}–{} Hz", self.low_hz, self.high_hz)
    }
}

pub static BANDS: [BandInfo; 5] = [
    BandInfo {
        band: Band::Delta,
        label: "Delta",
        low_hz: 0.5,
        high_hz: 4.0,
        meaning: "Slow waves, prominent in deep sleep. In awake adults, strong delta can point to drowsiness or to artifacts such as movement and eye activity.",
        caution: "Delta in awake recordings is easily inflated by slow drifts and ocular artifacts.",
        citations: &["wiki-eeg", "nibib-eeg"],
    },
    BandInfo {
        band: Band::Theta,
        label: "Theta",
        low_hz: 4.0,
        high_hz: 8.0,
        meaning: "Seen in drowsiness and light sleep; frontal midline theta also rises with working-memory load and focused effort.",
        caution: "Interpretation depends heavily on state (drowsy or on task) and recording site.",
        citations: &["wiki-eeg", "nibib-eeg"],
    },
    BandInfo {
        band: Band::Alpha,
        label: "Alpha",
        low_hz: 8.0,
        high_hz: 13.0,
        meaning: "Relaxed wakefulness, strongest over occipital sites with eyes closed; it drops with eyes open or visual attention.",
        caution: "Eye state during recording strongly affects alpha.",
        citations: &["wiki-eeg", "nibib-eeg"],
    },
    BandInfo {
        band: Band::Beta,
        label: "Beta",
        low_hz: 13.0,
        high_hz: 30.0,
        meaning: "Active thinking, alertness and motor control; central beta desynchronizes around movement.",
        caution: "Muscle tension (EMG) can masquerade as beta power.",
        citations: &["wiki-eeg", "mayo-eeg"],
    },
    BandInfo {
        band: Band::Gamma,
        label: "Gamma",
        low_hz: 30.0,
        high_hz: 45.0,
        meaning: "Fast activity linked to sensory binding and high-level processing.",
        caution: "Scalp gamma is very susceptible to muscle artifacts; treat it with care.",
        citations: &["wiki-eeg", "mayo-eeg"],
    },
];

impl Band {
    pub const ALL: [Band; 5] = [Band::Delta, Band::Theta, Band::Alpha, Band::Beta, Band::Gamma];

    pub fn info(self) -> &'static BandInfo {
        &BANDS[self as usize]
    }

    pub fn key(self) -> &'static str {
        match self {
            Band::Delta => "delta",
            Band::Theta => "theta",
            Band::Alpha => "alpha",
            Band::Beta => "beta",
            Band::Gamma => "gamma",
        }
    }

    pub fn from_key(key: &str) -> Option<Band> {
        Band::ALL
            .into_iter()
            .find(|b| b.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// Split `bp_<band>_<channel>...` into its band and channel parts,
/// case-insensitively. The channel is the alphanumeric run after the band.
fn split_feature(feature: &str) -> Option<(Band, &str)> {
    let lower = feature.to_ascii_lowercase();
    let start = lower.find("bp_")?;
    let rest = &feature[start + 3..];
    let (band_part, tail) = rest.split_once('_')?;
    let band = Band::from_key(band_part)?;
    let end = tail
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(tail.len());
    Some((band, &tail[..end]))
}

pub fn parse_band_from_feature(feature: &str) -> Option<Band> {
    split_feature(feature).map(|(b, _)| b)
}

pub fn parse_channel_from_feature(feature: &str) -> Option<String> {
    split_feature(feature)
        .map(|(_, ch)| ch)
        .filter(|ch| !ch.is_empty())
        .map(str::to_ascii_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_band_and_channel() {
        assert_eq!(parse_band_from_feature("bp_alpha_CZ"), Some(Band::Alpha));
        assert_eq!(parse_channel_from_feature("bp_alpha_CZ"), Some("CZ".into()));
        assert_eq!(parse_band_from_feature("BP_Gamma_fp1_rel"), Some(Band::Gamma));
        assert_eq!(parse_channel_from_feature("BP_Gamma_fp1_rel"), Some("FP1".into()));
    }

    #[test]
    fn rejects_other_features() {
        assert_eq!(parse_band_from_feature("mean_CZ"), None);
        assert_eq!(parse_band_from_feature("bp_sigma_CZ"), None);
        assert_eq!(parse_channel_from_feature("bp_beta_"), None);
    }

    #[test]
    fn band_table_is_contiguous() {
        for pair in BANDS.windows(2) {
            assert_eq!(pair[0].high_hz, pair[1].low_hz);
        }
        for b in Band::ALL {
            assert_eq!(b.info().band, b);
            for id in b.info().citations {
                assert!(citation(id).is_some());
            }
        }
    }
}
