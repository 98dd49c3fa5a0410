use eeg_core::glb::{load_glb, GlbError};
use glam::Vec3;

/// Assemble a GLB container from a JSON document and a BIN payload.
fn build_glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = json.as_bytes().to_vec();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_bytes = bin.to_vec();
    while bin_bytes.len() % 4 != 0 {
        bin_bytes.push(0);
    }
    let total = 12 + 8 + json_bytes.len() + if bin.is_empty() { 0 } else { 8 + bin_bytes.len() };
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json_bytes);
    if !bin.is_empty() {
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin_bytes);
    }
    out
}

fn triangle_bin() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

const TRIANGLE_JSON: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0]}],
  "nodes": [{"children": [1], "translation": [0, 0, 5]}, {"mesh": 0, "scale": [2, 2, 2]}],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1}]}],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"},
    {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
  ],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 36},
    {"buffer": 0, "byteOffset": 36, "byteLength": 6}
  ],
  "buffers": [{"byteLength": 44}]
}"#;

#[test]
fn loads_indexed_triangle_with_node_transforms() {
    let mesh = load_glb(&build_glb(TRIANGLE_JSON, &triangle_bin())).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.indices[0], [0, 1, 2]);
    // Child scale 2 then parent translation (0, 0, 5).
    assert!((mesh.positions[1] - Vec3::new(2.0, 0.0, 5.0)).length() < 1e-6);
    assert!((mesh.positions[2] - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-6);
}

#[test]
fn unindexed_primitives_use_vertex_order() {
    let json = TRIANGLE_JSON.replace(r#", "indices": 1"#, "");
    let mesh = load_glb(&build_glb(&json, &triangle_bin())).unwrap();
    assert_eq!(mesh.indices, vec![[0, 1, 2]]);
}

#[test]
fn rejects_bad_magic_and_version() {
    let mut bytes = build_glb(TRIANGLE_JSON, &triangle_bin());
    bytes[0] = b'x';
    assert!(matches!(load_glb(&bytes), Err(GlbError::BadMagic)));

    let mut bytes = build_glb(TRIANGLE_JSON, &triangle_bin());
    bytes[4] = 1;
    assert!(matches!(load_glb(&bytes), Err(GlbError::UnsupportedVersion(1))));

    assert!(matches!(load_glb(b"glTF"), Err(GlbError::TooShort)));
}

#[test]
fn accessor_past_buffer_is_an_error_not_a_panic() {
    let json = TRIANGLE_JSON.replace(r#""count": 3, "type": "VEC3""#, r#""count": 30, "type": "VEC3""#);
    let err = load_glb(&build_glb(&json, &triangle_bin())).unwrap_err();
    assert!(matches!(err, GlbError::Accessor { index: 0, .. }), "{err}");
}

#[test]
fn scene_without_triangles_is_reported() {
    let json = r#"{"asset": {"version": "2.0"}, "nodes": [{}]}"#;
    assert!(matches!(load_glb(&build_glb(json, &[])), Err(GlbError::NoTriangles)));
}

#[test]
fn oversized_accessor_count_is_rejected() {
    let json = TRIANGLE_JSON
        .replace(r#""count": 3, "type": "VEC3""#, r#""count": 4611686018427387905, "type": "VEC3""#)
        .replace(r#""byteLength": 36}"#, r#""byteLength": 36, "byteStride": 12}"#);
    let err = load_glb(&build_glb(&json, &triangle_bin())).unwrap_err();
    assert!(matches!(err, GlbError::Accessor { index: 0, .. }), "{err}");
}

#[test]
fn wrapping_byte_offset_is_rejected() {
    let json = TRIANGLE_JSON.replace(
        r#"{"bufferView": 0, "componentType": 5126"#,
        r#"{"bufferView": 0, "byteOffset": 18446744073709551615, "componentType": 5126"#,
    );
    let err = load_glb(&build_glb(&json, &triangle_bin())).unwrap_err();
    assert!(
        matches!(err, GlbError::Accessor { index: 0, reason: "size overflows" }),
        "{err}"
    );
}

#[test]
fn chunk_length_past_file_end_is_rejected() {
    let mut bytes = build_glb(TRIANGLE_JSON, &triangle_bin());
    bytes[12..16].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(load_glb(&bytes), Err(GlbError::BadChunk(_))));
}
