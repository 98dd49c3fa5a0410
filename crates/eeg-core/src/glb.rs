//! Minimal binary glTF (`.glb`) reader that flattens a scene into one [`TriMesh`].
//!
//! Only what the head viewer needs is decoded: node transforms, triangle
//! primitives, float `POSITION` attributes and optional integer indices from
//! the embedded BIN chunk.

use crate::mesh::TriMesh;
use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

const MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;
const MODE_TRIANGLES: u32 = 4;
const MAX_NODE_DEPTH: usize = 64;

const COMPONENT_U8: u32 = 5121;
const COMPONENT_U16: u32 = 5123;
const COMPONENT_U32: u32 = 5125;
const COMPONENT_F32: u32 = 5126;

#[derive(Debug, Error)]
pub enum GlbError {
    #[error("file too short for a GLB header")]
    TooShort,
    #[error("not a GLB file (bad magic)")]
    BadMagic,
    #[error("unsupported GLB version {0}")]
    UnsupportedVersion(u32),
    #[error("malformed chunk: {0}")]
    BadChunk(&'static str),
    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("accessor {index}: {reason}")]
    Accessor { index: usize, reason: &'static str },
    #[error("node hierarchy deeper than {MAX_NODE_DEPTH} levels")]
    TooDeep,
    #[error("no triangles found")]
    NoTriangles,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default)]
    scene: Option<usize>,
    #[serde(default)]
    scenes: Vec<Scene>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    meshes: Vec<Mesh>,
    #[serde(default)]
    accessors: Vec<Accessor>,
    #[serde(default)]
    buffer_views: Vec<BufferView>,
}

#[derive(Debug, Default, Deserialize)]
struct Scene {
    #[serde(default)]
    nodes: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct Node {
    #[serde(default)]
    children: Vec<usize>,
    mesh: Option<usize>,
    matrix: Option<[f32; 16]>,
    translation: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
}

impl Node {
    fn local_transform(&self) -> Mat4 {
        if let Some(m) = self.matrix {
            return Mat4::from_cols_array(&m);
        }
        let t = self.translation.map(Vec3::from_array).unwrap_or(Vec3::ZERO);
        let r = self
            .rotation
            .map(|q| Quat::from_array(q).normalize())
            .unwrap_or(Quat::IDENTITY);
        let s = self.scale.map(Vec3::from_array).unwrap_or(Vec3::ONE);
        Mat4::from_scale_rotation_translation(s, r, t)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Mesh {
    #[serde(default)]
    primitives: Vec<Primitive>,
}

#[derive(Debug, Default, Deserialize)]
struct Primitive {
    #[serde(default)]
    attributes: Attributes,
    indices: Option<usize>,
    mode: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(rename = "POSITION")]
    position: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: Option<usize>,
    #[serde(default)]
    byte_offset: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    #[serde(default)]
    buffer: usize,
    #[serde(default)]
    byte_offset: usize,
    byte_length: usize,
    byte_stride: Option<usize>,
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Split a GLB container into its JSON and optional BIN chunk.
fn split_chunks(bytes: &[u8]) -> Result<(&[u8], Option<&[u8]>), GlbError> {
    if bytes.len() < 12 {
        return Err(GlbError::TooShort);
    }
    if read_u32(bytes, 0) != Some(MAGIC) {
        return Err(GlbError::BadMagic);
    }
    let version = read_u32(bytes, 4).ok_or(GlbError::TooShort)?;
    if version != 2 {
        return Err(GlbError::UnsupportedVersion(version));
    }
    let total = (read_u32(bytes, 8).ok_or(GlbError::TooShort)? as usize).min(bytes.len());

    let mut json = None;
    let mut bin = None;
    let mut at = 12;
    while total.saturating_sub(at) >= 8 {
        let len = read_u32(bytes, at).ok_or(GlbError::BadChunk("truncated header"))? as usize;
        let kind = read_u32(bytes, at + 4).ok_or(GlbError::BadChunk("truncated header"))?;
        let end = (at + 8)
            .checked_add(len)
            .filter(|&end| end <= total)
            .ok_or(GlbError::BadChunk("chunk runs past end of file"))?;
        let data = &bytes[at + 8..end];
        match kind {
            CHUNK_JSON if json.is_none() => json = Some(data),
            CHUNK_BIN if bin.is_none() => bin = Some(data),
            _ => {}
        }
        at = end;
    }
    let json = json.ok_or(GlbError::BadChunk("missing JSON chunk"))?;
    Ok((json, bin))
}

struct Reader<'a> {
    doc: &'a Document,
    bin: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Byte slice and stride for element `0..count` of an accessor.
    fn element_bytes(
        &self,
        index: usize,
        elem_size: usize,
    ) -> Result<(&'a [u8], usize, usize), GlbError> {
        let err = |reason| GlbError::Accessor { index, reason };
        let acc = self.doc.accessors.get(index).ok_or(err("missing"))?;
        let view_index = acc.buffer_view.ok_or(err("sparse or empty accessors are not supported"))?;
        let view = self
            .doc
            .buffer_views
            .get(view_index)
            .ok_or(err("missing buffer view"))?;
        if view.buffer != 0 {
            return Err(err("only the embedded BIN buffer is supported"));
        }
        let stride = view.byte_stride.unwrap_or(elem_size).max(elem_size);
        let overflow = || err("size overflows");
        let start = view
            .byte_offset
            .checked_add(acc.byte_offset)
            .ok_or_else(overflow)?;
        let needed = match acc.count {
            0 => 0,
            n => (n - 1)
                .checked_mul(stride)
                .and_then(|b| b.checked_add(elem_size))
                .ok_or_else(overflow)?,
        };
        // Reject before anything is allocated for `count` elements.
        if needed > self.bin.len() {
            return Err(err("data runs past the BIN chunk"));
        }
        let view_end = acc.byte_offset.checked_add(needed).ok_or_else(overflow)?;
        if view_end > view.byte_length {
            return Err(err("data runs past its buffer view"));
        }
        let end = start.checked_add(needed).ok_or_else(overflow)?;
        let bytes = self
            .bin
            .get(start..end)
            .ok_or(err("data runs past the BIN chunk"))?;
        Ok((bytes, stride, acc.count))
    }

    fn positions(&self, index: usize) -> Result<Vec<Vec3>, GlbError> {
        let acc = self
            .doc
            .accessors
            .get(index)
            .ok_or(GlbError::Accessor { index, reason: "missing" })?;
        if acc.component_type != COMPONENT_F32 || acc.kind != "VEC3" {
            return Err(GlbError::Accessor {
                index,
                reason: "POSITION must be float VEC3",
            });
        }
        let (bytes, stride, count) = self.element_bytes(index, 12)?;
        Ok((0..count)
            .map(|i| {
                let e = &bytes[i * stride..i * stride + 12];
                let f = |o: usize| f32::from_le_bytes([e[o], e[o + 1], e[o + 2], e[o + 3]]);
                Vec3::new(f(0), f(4), f(8))
            })
            .collect())
    }

    fn indices(&self, index: usize) -> Result<Vec<u32>, GlbError> {
        let acc = self
            .doc
            .accessors
            .get(index)
            .ok_or(GlbError::Accessor { index, reason: "missing" })?;
        if acc.kind != "SCALAR" {
            return Err(GlbError::Accessor {
                index,
                reason: "indices must be SCALAR",
            });
        }
        let size = match acc.component_type {
            COMPONENT_U8 => 1,
            COMPONENT_U16 => 2,
            COMPONENT_U32 => 4,
            _ => {
                return Err(GlbError::Accessor {
                    index,
                    reason: "unsupported index component type",
                })
            }
        };
        let (bytes, stride, count) = self.element_bytes(index, size)?;
        Ok((0..count)
            .map(|i| {
                let e = &bytes[i * stride..i * stride + size];
                match size {
                    1 => e[0] as u32,
                    2 => u16::from_le_bytes([e[0], e[1]]) as u32,
                    _ => u32::from_le_bytes([e[0], e[1], e[2], e[3]]),
                }
            })
            .collect())
    }

    fn append_mesh(&self, mesh_index: usize, world: Mat4, out: &mut TriMesh) -> Result<(), GlbError> {
        let Some(mesh) = self.doc.meshes.get(mesh_index) else {
            log::warn!("[glb] node references missing mesh {}", mesh_index);
            return Ok(());
        };
        for prim in &mesh.primitives {
            if prim.mode.unwrap_or(MODE_TRIANGLES) != MODE_TRIANGLES {
                continue;
            }
            let Some(pos_index) = prim.attributes.position else {
                continue;
            };
            let positions = self.positions(pos_index)?;
            let flat = match prim.indices {
                Some(i) => self.indices(i)?,
                None => (0..positions.len() as u32).collect(),
            };
            let base = out.positions.len() as u32;
            let n = positions.len() as u32;
            out.positions
                .extend(positions.into_iter().map(|p| world.transform_point3(p)));
            out.indices.extend(
                flat.chunks_exact(3)
                    .filter(|t| t.iter().all(|&i| i < n))
                    .map(|t| [t[0] + base, t[1] + base, t[2] + base]),
            );
        }
        Ok(())
    }

    fn visit(&self, node_index: usize, parent: Mat4, depth: usize, out: &mut TriMesh) -> Result<(), GlbError> {
        if depth > MAX_NODE_DEPTH {
            return Err(GlbError::TooDeep);
        }
        let Some(node) = self.doc.nodes.get(node_index) else {
            return Ok(());
        };
        let world = parent * node.local_transform();
        if let Some(m) = node.mesh {
            self.append_mesh(m, world, out)?;
        }
        for &child in &node.children {
            self.visit(child, world, depth + 1, out)?;
        }
        Ok(())
    }

    fn roots(&self) -> Vec<usize> {
        let scene = self.doc.scene.unwrap_or(0);
        if let Some(s) = self.doc.scenes.get(scene) {
            return s.nodes.clone();
        }
        let mut is_child = vec![false; self.doc.nodes.len()];
        for n in &self.doc.nodes {
            for &c in &n.children {
                if let Some(flag) = is_child.get_mut(c) {
                    *flag = true;
                }
            }
        }
        (0..self.doc.nodes.len()).filter(|&i| !is_child[i]).collect()
    }
}

/// Decode a `.glb` file into a single world-space triangle mesh.
pub fn load_glb(bytes: &[u8]) -> Result<TriMesh, GlbError> {
    let (json, bin) = split_chunks(bytes)?;
    let doc: Document = serde_json::from_slice(json)?;
    let reader = Reader {
        doc: &doc,
        bin: bin.unwrap_or(&[]),
    };
    let mut out = TriMesh::default();
    if doc.nodes.is_empty() {
        for m in 0..doc.meshes.len() {
            reader.append_mesh(m, Mat4::IDENTITY, &mut out)?;
        }
    } else {
        for root in reader.roots() {
            reader.visit(root, Mat4::IDENTITY, 0, &mut out)?;
        }
    }
    if out.is_empty() {
        return Err(GlbError::NoTriangles);
    }
    log::info!(
        "[glb] loaded {} vertices, {} triangles",
        out.positions.len(),
        out.triangle_count()
    );
    Ok(out)
}
