//! glTF bundle parsing into a [`SceneGraph`], and the async load state.

use crate::picking::{Intersection, PickableScene, Ray};
use crate::scene::{
    LoadedScene, Material, NodeId, Primitive, SceneGraph, TextureImage, Vertex,
};
use glam::{Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("invalid glTF bundle: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("bundle contains no scene")]
    NoScene,
}

/// Result of the one-shot asset load. `Pending` and `Failed` pick like an
/// empty registry.
#[derive(Debug, Default)]
pub enum SceneLoad {
    #[default]
    Pending,
    Loaded(LoadedScene),
    Failed(SceneLoadError),
}

impl SceneLoad {
    pub fn from_result(result: Result<LoadedScene, SceneLoadError>) -> Self {
        match result {
            Ok(scene) => SceneLoad::Loaded(scene),
            Err(e) => SceneLoad::Failed(e),
        }
    }

    pub fn scene(&self) -> Option<&LoadedScene> {
        match self {
            SceneLoad::Loaded(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn registry(&self) -> &[NodeId] {
        self.scene().map(|s| s.registry.as_slice()).unwrap_or(&[])
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SceneLoad::Pending)
    }
}

impl PickableScene for SceneLoad {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        match self {
            SceneLoad::Loaded(scene) => scene.intersect(ray),
            SceneLoad::Pending | SceneLoad::Failed(_) => Vec::new(),
        }
    }

    fn parent_name(&self, object: NodeId) -> Option<&str> {
        self.scene()?.parent_name(object)
    }
}

/// Node names the way the browser scene graph stores them: whitespace becomes
/// `_`, and `[ ] . : /` are dropped.
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Parse a binary (or self-contained JSON) glTF bundle.
pub fn load_scene_from_slice(bytes: &[u8]) -> Result<LoadedScene, SceneLoadError> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(SceneLoadError::NoScene)?;

    let mut graph = SceneGraph::new(sanitize_node_name(scene.name().unwrap_or_default()));

    let texture_slots: Vec<Option<usize>> = images
        .iter()
        .enumerate()
        .map(|(i, image)| match rgba8_pixels(image) {
            Some(rgba) => Some(graph.add_texture(TextureImage {
                width: image.width,
                height: image.height,
                rgba,
            })),
            None => {
                log::warn!("[scene] image {} has unsupported format {:?}", i, image.format);
                None
            }
        })
        .collect();

    let mut material_slots = Vec::new();
    for material in document.materials() {
        let pbr = material.pbr_metallic_roughness();
        let base_color_texture = pbr
            .base_color_texture()
            .and_then(|info| texture_slots.get(info.texture().source().index()).copied().flatten());
        material_slots.push(graph.add_material(Material {
            base_color_factor: pbr.base_color_factor(),
            base_color_texture,
            double_sided: material.double_sided(),
        }));
    }

    let mut ctx = BuildContext {
        graph: &mut graph,
        buffers: &buffers,
        material_slots: &material_slots,
    };
    let root = ctx.graph.root();
    for node in scene.nodes() {
        ctx.add_node(root, &node, Mat4::IDENTITY);
    }

    Ok(LoadedScene::new(graph))
}

struct BuildContext<'a> {
    graph: &'a mut SceneGraph,
    buffers: &'a [gltf::buffer::Data],
    material_slots: &'a [usize],
}

impl BuildContext<'_> {
    fn add_node(&mut self, parent: NodeId, node: &gltf::Node, parent_world: Mat4) {
        let world = parent_world * Mat4::from_cols_array_2d(&node.transform().matrix());
        let name = sanitize_node_name(node.name().unwrap_or_default());
        let id = self.graph.add_node(parent, name.clone());

        if let Some(mesh) = node.mesh() {
            // grouping follows the declared primitive count, even when some are skipped
            if mesh.primitives().len() > 1 {
                for (i, p) in mesh.primitives().enumerate() {
                    let Some(prim) = self.build_primitive(&p, world) else {
                        continue;
                    };
                    let child = self.graph.add_node(id, format!("{}_{}", name, i));
                    self.graph.attach_primitive(child, prim);
                }
            } else if let Some(prim) = mesh
                .primitives()
                .next()
                .and_then(|p| self.build_primitive(&p, world))
            {
                self.graph.attach_primitive(id, prim);
            }
        }

        for child in node.children() {
            self.add_node(id, &child, world);
        }
    }

    fn build_primitive(&self, primitive: &gltf::Primitive, world: Mat4) -> Option<Primitive> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("[scene] skipping non-triangle primitive ({:?})", primitive.mode());
            return None;
        }
        let reader = primitive.reader(|b| self.buffers.get(b.index()).map(|d| d.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            log::warn!("[scene] skipping primitive without positions");
            return None;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from_array(p)))
            .collect();

        let gltf_material = primitive.material();
        let tex_coord_set = gltf_material
            .pbr_metallic_roughness()
            .base_color_texture()
            .map(|info| info.tex_coord())
            .unwrap_or(0);
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(tex_coord_set)
            .map(|tc| tc.into_f32().collect())
            .unwrap_or_default();

        let mut indices: Vec<u32> = match reader.read_indices() {
            Some(ix) => ix.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        indices.truncate(indices.len() - indices.len() % 3);
        if world.determinant() < 0.0 {
            for tri in indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }

        let normal_matrix = world.inverse().transpose();
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(ns) => ns
                .map(|n| normal_matrix.transform_vector3(Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => face_normals(&positions, &indices),
        };

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                position: p.to_array(),
                normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect();

        let material = gltf_material
            .index()
            .and_then(|i| self.material_slots.get(i).copied())
            .unwrap_or(0);
        Primitive::new(vertices, indices, material)
    }
}

/// Area-weighted vertex normals from counter-clockwise triangles.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.into_iter().map(Vec3::normalize_or_zero).collect()
}

fn rgba8_pixels(image: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;
    match image.format {
        Format::R8G8B8A8 => Some(image.pixels.clone()),
        Format::R8G8B8 => Some(
            image
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
        ),
        Format::R8G8 => Some(
            image
                .pixels
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[1], 0, 255])
                .collect(),
        ),
        Format::R8 => Some(image.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect()),
        _ => None,
    }
}
