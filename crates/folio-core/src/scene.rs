//! Static scene graph baked from the portfolio bundle.
//!
//! Nodes live in an arena indexed by [`NodeId`]; node 0 is the bundle's
//! scene root. Mesh primitives are stored in world space so the renderer and
//! the picker share one copy of the geometry.

use crate::constants::is_interactive_name;
use crate::picking::{Intersection, PickableScene, Ray};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Interactive nodes in traversal order. Holds the four reserved hotspots inline.
pub type InteractiveRegistry = SmallVec<[NodeId; 4]>;

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub primitive: Option<usize>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub base_color_factor: [f32; 4],
    pub base_color_texture: Option<usize>,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            base_color_texture: None,
            double_sided: false,
        }
    }
}

/// Decoded RGBA8 image.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Indexed triangle list in world space. Front faces wind counter-clockwise.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: usize,
    pub bounds: Aabb,
}

impl Primitive {
    /// Returns `None` for empty geometry.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: usize) -> Option<Self> {
        let bounds = Aabb::from_points(vertices.iter().map(|v| Vec3::from_array(v.position)))?;
        Some(Self {
            vertices,
            indices,
            material,
            bounds,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Nearest hit distance along `ray`, if any.
    pub fn intersect(&self, ray: &Ray, cull_back_faces: bool) -> Option<f32> {
        if !ray.intersects_aabb(self.bounds.min, self.bounds.max) {
            return None;
        }
        let mut best: Option<f32> = None;
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| {
                self.vertices
                    .get(i as usize)
                    .map(|v| Vec3::from_array(v.position))
            });
            let (Some(a), Some(b), Some(c)) = (a, b, c) else {
                continue;
            };
            if let Some(t) = ray.intersect_triangle(a, b, c, cull_back_faces) {
                match best {
                    Some(bt) if t >= bt => {}
                    _ => best = Some(t),
                }
            }
        }
        best
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    textures: Vec<TextureImage>,
}

impl SceneGraph {
    /// A graph holding only the root node and one default material (index 0).
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![SceneNode {
                name: root_name.into(),
                parent: None,
                children: Vec::new(),
                primitive: None,
            }],
            primitives: Vec::new(),
            materials: vec![Material::default()],
            textures: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_node(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            primitive: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn attach_primitive(&mut self, node: NodeId, primitive: Primitive) -> usize {
        let index = self.primitives.len();
        self.primitives.push(primitive);
        self.nodes[node.0].primitive = Some(index);
        index
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_texture(&mut self, texture: TextureImage) -> usize {
        self.textures.push(texture);
        self.textures.len() - 1
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn textures(&self) -> &[TextureImage] {
        &self.textures
    }

    /// Material of a primitive, falling back to the default material.
    pub fn material_of(&self, primitive: &Primitive) -> &Material {
        self.materials
            .get(primitive.material)
            .unwrap_or(&self.materials[0])
    }

    /// Depth-first pre-order walk of `from` and all its descendants.
    pub fn traverse(&self, from: NodeId, mut visit: impl FnMut(NodeId, &SceneNode)) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut found = None;
        self.traverse(self.root(), |id, node| {
            if found.is_none() && node.name == name {
                found = Some(id);
            }
        });
        found
    }

    /// Nodes whose name is one of the reserved interactive identifiers.
    pub fn collect_interactive(&self) -> InteractiveRegistry {
        let mut registry = InteractiveRegistry::new();
        self.traverse(self.root(), |id, node| {
            if is_interactive_name(&node.name) {
                registry.push(id);
            }
        });
        registry
    }

    /// Ray hits against every primitive under the `targets` subtrees, nearest first.
    pub fn intersect_subtrees(&self, ray: &Ray, targets: &[NodeId]) -> Vec<Intersection> {
        let mut hits = Vec::new();
        for &target in targets {
            self.traverse(target, |id, node| {
                let Some(prim) = node.primitive.and_then(|p| self.primitives.get(p)) else {
                    return;
                };
                let cull = !self.material_of(prim).double_sided;
                if let Some(distance) = prim.intersect(ray, cull) {
                    hits.push(Intersection {
                        distance,
                        point: ray.at(distance),
                        object: id,
                    });
                }
            });
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// A parsed bundle together with its interactive registry.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    pub graph: SceneGraph,
    pub registry: InteractiveRegistry,
}

impl LoadedScene {
    pub fn new(graph: SceneGraph) -> Self {
        let registry = graph.collect_interactive();
        Self { graph, registry }
    }

    pub fn registry_names(&self) -> Vec<&str> {
        self.registry
            .iter()
            .map(|&id| self.graph.node(id).name.as_str())
            .collect()
    }
}

impl PickableScene for LoadedScene {
    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        self.graph.intersect_subtrees(ray, &self.registry)
    }

    fn parent_name(&self, object: NodeId) -> Option<&str> {
        let parent = self.graph.nodes.get(object.0)?.parent?;
        Some(self.graph.node(parent).name.as_str())
    }
}
