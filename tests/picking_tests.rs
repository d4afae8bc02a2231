// Host-side tests for pointer picking.
// The web crate is wasm-only, so these drive folio-core with fake scenes and cursors.

use folio_core::*;
use glam::Vec3;

/// Canned hits: (distance, name of the hit mesh's parent).
struct FakeScene {
    hits: Vec<(f32, &'static str)>,
}

impl PickableScene for FakeScene {
    fn intersect(&self, _ray: &Ray) -> Vec<Intersection> {
        self.hits
            .iter()
            .enumerate()
            .map(|(i, (distance, _))| Intersection {
                distance: *distance,
                point: Vec3::ZERO,
                object: NodeId(i),
            })
            .collect()
    }

    fn parent_name(&self, object: NodeId) -> Option<&str> {
        self.hits.get(object.0).map(|(_, name)| *name)
    }
}

#[derive(Default)]
struct RecordingCursor {
    calls: Vec<CursorStyle>,
}

impl CursorView for RecordingCursor {
    fn set_cursor(&mut self, style: CursorStyle) {
        self.calls.push(style);
    }
}

fn front_camera() -> Camera {
    Camera::new(
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::ZERO,
        1.0,
        75f32.to_radians(),
        0.1,
        1000.0,
    )
}

/// Unit quad in the plane z = `z`, facing +Z (counter-clockwise seen from the camera).
fn quad(z: f32, material: usize) -> Primitive {
    let corners = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
    let vertices = corners
        .iter()
        .map(|[x, y]| Vertex {
            position: [*x, *y, z],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        })
        .collect();
    Primitive::new(vertices, vec![0, 1, 2, 0, 2, 3], material).unwrap()
}

/// Same quad wound the other way, so its front faces away from the camera.
fn reversed_quad(z: f32, material: usize) -> Primitive {
    let mut q = quad(z, material);
    for tri in q.indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
    q
}

/// Scene > named group > "<name>_0" mesh, the layout hotspots have in the bundle.
fn add_hotspot(graph: &mut SceneGraph, name: &str, prim: Primitive) -> NodeId {
    let root = graph.root();
    let group = graph.add_node(root, name);
    let mesh = graph.add_node(group, format!("{}_0", name));
    graph.attach_primitive(mesh, prim);
    group
}

#[test]
fn no_hits_gives_empty_target_and_default_cursor() {
    let scene = FakeScene { hits: vec![] };
    let mut cursor = RecordingCursor::default();
    let mut interaction = Interaction::default();

    let hover = interaction.update(&front_camera(), &scene, &mut cursor).clone();

    assert!(hover.is_none());
    assert_eq!(hover.id(), None);
    assert_eq!(cursor.calls, vec![CursorStyle::Default]);
}

#[test]
fn single_hit_resolves_to_parent_and_pointer_cursor() {
    let scene = FakeScene {
        hits: vec![(4.0, "Project_2")],
    };
    let mut cursor = RecordingCursor::default();
    let mut interaction = Interaction::default();

    interaction.update(&front_camera(), &scene, &mut cursor);

    assert_eq!(interaction.hover().id(), Some("Project_2"));
    assert_eq!(cursor.calls, vec![CursorStyle::Pointer]);
}

#[test]
fn nearest_hit_wins_regardless_of_order() {
    let scene = FakeScene {
        hits: vec![(12.0, "UFO"), (3.5, "Project_1"), (7.0, "Project_3")],
    };
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert_eq!(pick(&ray, &scene).id(), Some("Project_1"));
}

#[test]
fn cursor_is_applied_every_frame_even_when_unchanged() {
    let scene = FakeScene {
        hits: vec![(2.0, "UFO")],
    };
    let mut cursor = RecordingCursor::default();
    let mut interaction = Interaction::default();
    let camera = front_camera();

    for _ in 0..3 {
        interaction.update(&camera, &scene, &mut cursor);
    }

    assert_eq!(cursor.calls, vec![CursorStyle::Pointer; 3]);
}

#[test]
fn empty_parent_name_counts_as_no_target() {
    let scene = FakeScene {
        hits: vec![(1.0, "")],
    };
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert!(pick(&ray, &scene).is_none());
}

#[test]
fn ray_from_camera_center_points_at_target() {
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 10.0));
    approx::assert_abs_diff_eq!(ray.direction.x, 0.0, epsilon = 1e-5);
    approx::assert_abs_diff_eq!(ray.direction.y, 0.0, epsilon = 1e-5);
    approx::assert_abs_diff_eq!(ray.direction.z, -1.0, epsilon = 1e-5);
}

#[test]
fn ray_from_camera_top_edge_matches_field_of_view() {
    let camera = front_camera();
    let ray = Ray::from_camera(0.0, 1.0, &camera);
    let half_fov = (camera.fovy_radians * 0.5).tan();
    approx::assert_relative_eq!(ray.direction.y / -ray.direction.z, half_fov, max_relative = 1e-4);
}

#[test]
fn triangle_hit_distance_and_back_face_culling() {
    let ray = Ray::new(Vec3::new(0.2, 0.1, 5.0), Vec3::NEG_Z);
    let (a, b, c) = (
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    approx::assert_abs_diff_eq!(ray.intersect_triangle(a, b, c, true).unwrap(), 5.0, epsilon = 1e-5);
    assert_eq!(ray.intersect_triangle(a, c, b, true), None);
    approx::assert_abs_diff_eq!(ray.intersect_triangle(a, c, b, false).unwrap(), 5.0, epsilon = 1e-5);
    // behind the origin
    let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert_eq!(away.intersect_triangle(a, b, c, false), None);
}

#[test]
fn scene_graph_hit_resolves_to_named_group() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "Project_1", quad(0.0, 0));
    let scene = LoadedScene::new(graph);

    let mut cursor = RecordingCursor::default();
    let mut interaction = Interaction::default();
    interaction.update(&front_camera(), &scene, &mut cursor);

    assert_eq!(interaction.hover().id(), Some("Project_1"));
}

#[test]
fn nearest_of_two_hotspots_is_chosen() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "Project_1", quad(0.0, 0));
    add_hotspot(&mut graph, "UFO", quad(5.0, 0));
    let scene = LoadedScene::new(graph);

    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    let hits = scene.intersect(&ray);
    assert_eq!(hits.len(), 2);
    assert!(hits[0].distance <= hits[1].distance);
    assert_eq!(pick(&ray, &scene).id(), Some("UFO"));
}

#[test]
fn non_interactive_geometry_does_not_occlude() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "Project_3", quad(0.0, 0));
    add_hotspot(&mut graph, "Wall", quad(8.0, 0));
    let scene = LoadedScene::new(graph);

    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert_eq!(pick(&ray, &scene).id(), Some("Project_3"));
}

#[test]
fn pointer_off_geometry_misses() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "Project_1", quad(0.0, 0));
    let scene = LoadedScene::new(graph);

    let mut interaction = Interaction::default();
    interaction.pointer.set_from_client(10.0, 10.0, 800.0, 800.0);
    let mut cursor = RecordingCursor::default();
    interaction.update(&front_camera(), &scene, &mut cursor);

    assert!(interaction.hover().is_none());
    assert_eq!(cursor.calls, vec![CursorStyle::Default]);
}

#[test]
fn single_sided_back_face_is_ignored_but_double_sided_is_hit() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "Project_2", reversed_quad(0.0, 0));
    let single = LoadedScene::new(graph);
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert!(pick(&ray, &single).is_none());

    let mut graph = SceneGraph::new("Scene");
    let double = graph.add_material(Material {
        double_sided: true,
        ..Material::default()
    });
    add_hotspot(&mut graph, "Project_2", reversed_quad(0.0, double));
    let double_sided = LoadedScene::new(graph);
    assert_eq!(pick(&ray, &double_sided).id(), Some("Project_2"));
}

#[test]
fn pending_and_failed_loads_pick_nothing() {
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    let pending = SceneLoad::Pending;
    let failed = SceneLoad::Failed(SceneLoadError::NoScene);

    assert!(pending.is_pending());
    assert!(pending.registry().is_empty());
    assert!(pick(&ray, &pending).is_none());
    assert!(failed.registry().is_empty());
    assert!(pick(&ray, &failed).is_none());
}

#[test]
fn loaded_state_picks_like_the_scene() {
    let mut graph = SceneGraph::new("Scene");
    add_hotspot(&mut graph, "UFO", quad(0.0, 0));
    let load = SceneLoad::from_result(Ok(LoadedScene::new(graph)));

    assert_eq!(load.registry().len(), 1);
    let ray = Ray::from_camera(0.0, 0.0, &front_camera());
    assert_eq!(pick(&ray, &load).id(), Some("UFO"));
}
