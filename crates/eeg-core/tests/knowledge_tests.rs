use eeg_core::knowledge::{electrode_info, region_of, Region, SOURCES};
use pretty_assertions::assert_eq;

#[test]
fn prefixes_classify_by_first_match() {
    let cases = [
        ("FP1", Region::Frontal),
        ("AF4", Region::Frontal),
        ("F7", Region::Frontal),
        ("FC3", Region::Frontal),
        ("FT8", Region::Frontal),
        ("C4", Region::Central),
        ("CP1", Region::Central),
        ("P8", Region::Parietal),
        ("PO7", Region::Parietal),
        ("OZ", Region::Occipital),
        ("T7", Region::Temporal),
        ("TP8", Region::Temporal),
        ("nd", Region::Other),
        ("X", Region::Other),
        ("", Region::Other),
    ];
    for (name, region) in cases {
        assert_eq!(region_of(name), region, "{name}");
    }
}

#[test]
fn exact_entries_win_over_region_text() {
    let cz = electrode_info("cz");
    assert_eq!(cz.name, "CZ");
    assert!(!cz.generic);
    assert_eq!(cz.region, Region::Central);
    assert_eq!(cz.sources.len(), 3);
    assert_eq!(cz.sources[0], &SOURCES[0]);
}

#[test]
fn unknown_names_fall_back_to_region_description() {
    let po3 = electrode_info("po3");
    assert!(po3.generic);
    assert_eq!(po3.region, Region::Parietal);
    assert_eq!(po3.sources, vec![&SOURCES[0], &SOURCES[4]]);

    let i1 = electrode_info("I1");
    assert!(i1.generic);
    assert_eq!(i1.region, Region::Other);

    let weird = electrode_info("EKG");
    assert!(weird.generic);
    assert_eq!(weird.region, Region::Other);
    assert_eq!(weird.sources, vec![&SOURCES[0]]);
    assert!(!weird.summary.is_empty());
}

#[test]
fn dataset_channels_have_exact_entries() {
    for name in ["X", "Y", "ND"] {
        let info = electrode_info(name);
        assert!(!info.generic, "{name}");
        assert_eq!(info.region, Region::Other);
    }
}

#[test]
fn region_colors_render_as_css() {
    assert_eq!(Region::Frontal.css_color(), "rgba(59,130,246,0.90)");
    assert_eq!(Region::ALL.len(), 6);
}
