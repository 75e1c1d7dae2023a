use flatview_core::{
    loader, Camera, DrawCommand, Light, Mesh, MeshData, Pipeline, RenderConfig, RenderMode, Rgb,
    Transform,
};
use nalgebra::Vector3;
use std::f32::consts::FRAC_PI_2;

/// Camera-facing triangle at depth `z`, centered on the view axis.
fn triangle_at(vertices: &mut Vec<[f32; 3]>, z: f32) -> Vec<usize> {
    let base = vertices.len();
    vertices.extend([[-1.0, -1.0, z], [-1.0, 1.0, z], [1.0, 1.0, z]]);
    vec![base, base + 1, base + 2]
}

fn config() -> RenderConfig {
    RenderConfig {
        width: 320,
        height: 240,
        camera_distance: 0.0,
        ..RenderConfig::default()
    }
}

#[test]
fn far_face_is_emitted_first() {
    let mut vertices = Vec::new();
    let near = triangle_at(&mut vertices, 2.0);
    let far = triangle_at(&mut vertices, 5.0);
    let mesh = Mesh::new(
        MeshData {
            vertices,
            faces: vec![near, far],
        },
        0.0,
    )
    .unwrap();

    let pipeline = Pipeline::new(mesh, &config());
    let mut sink: Vec<DrawCommand> = Vec::new();
    let stats = pipeline.render(&mut sink);

    assert_eq!(stats.drawn, 2);
    assert_eq!(sink.iter().map(|c| c.face).collect::<Vec<_>>(), vec![1, 0]);
    assert!((sink[0].depth - 5.0).abs() < 1e-6);
    assert!((sink[1].depth - 2.0).abs() < 1e-6);
}

#[test]
fn equal_depths_keep_mesh_order() {
    let mut vertices = Vec::new();
    let faces = (0..4).map(|_| triangle_at(&mut vertices, 3.0)).collect();
    let mesh = Mesh::new(MeshData { vertices, faces }, 0.0).unwrap();

    let (commands, _) = Pipeline::new(mesh, &config()).draw_list();
    assert_eq!(
        commands.iter().map(|c| c.face).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn faces_at_or_behind_camera_are_skipped() {
    let mut vertices = Vec::new();
    let on_plane = triangle_at(&mut vertices, 0.0);
    let behind = triangle_at(&mut vertices, -3.0);
    let visible = triangle_at(&mut vertices, 4.0);
    let mesh = Mesh::new(
        MeshData {
            vertices,
            faces: vec![on_plane, behind, visible],
        },
        0.0,
    )
    .unwrap();

    let mut sink: Vec<DrawCommand> = Vec::new();
    let stats = Pipeline::new(mesh, &config()).render(&mut sink);

    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.drawn, 1);
    assert_eq!(sink[0].face, 2);
    assert!(sink[0]
        .polygon
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn wireframe_config_disables_culling() {
    let config = RenderConfig {
        mode: RenderMode::Wireframe,
        ..RenderConfig::default()
    };
    let pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);
    assert_eq!(pipeline.options.mode, RenderMode::Wireframe);
    assert!(!pipeline.options.culls());

    let (commands, stats) = pipeline.draw_list();
    assert_eq!(stats.culled, 0);
    assert_eq!(commands.len(), 6);
    assert!(commands.iter().all(|c| c.fill.is_none()));
}

#[test]
fn culling_toggle_reveals_back_faces() {
    let config = RenderConfig::default();
    let mut pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);

    let (culled, _) = pipeline.draw_list();
    pipeline.options.cull_back_faces = false;
    let (all, _) = pipeline.draw_list();

    assert_eq!(culled.len(), 1);
    assert_eq!(all.len(), 6);
    // The camera-facing face is nearest, so it is painted last.
    assert_eq!(all.last().map(|c| c.face), Some(0));
}

#[test]
fn rotation_changes_visible_set_over_frames() {
    let config = RenderConfig {
        angular_velocity: 1.0,
        ..RenderConfig::default()
    };
    let mut pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);
    let mut sink: Vec<DrawCommand> = Vec::new();

    let first = pipeline.frame(0.0, &mut sink);
    assert_eq!(first.drawn, 1);

    sink.clear();
    let second = pipeline.frame(0.5, &mut sink);
    assert_eq!(second.drawn, 2);
    assert!((pipeline.mesh().rotation.angle - 0.5).abs() < 1e-6);
}

#[test]
fn lit_face_is_brighter_than_floor() {
    let config = RenderConfig::default();
    let pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);
    let (commands, _) = pipeline.draw_list();

    let floor = Rgb::grey(76);
    let fill = commands[0].fill.unwrap();
    assert!(fill.r > floor.r && fill.r == fill.g && fill.g == fill.b);
}

#[test]
fn loaded_obj_renders() {
    let text = "\
v -1 -1 0
v -1 1 0
v 1 1 0
v 1 -1 0
f 1 2 3 4
";
    let data = loader::parse_obj(text).unwrap();
    let config = config();
    let mesh = Mesh::new(data, 2.0).unwrap();
    let (commands, stats) = Pipeline::new(mesh, &config).draw_list();

    assert_eq!(stats.drawn, 1);
    let xs: Vec<f32> = commands[0].polygon.iter().map(|p| p.x).collect();
    assert!(xs.iter().any(|&x| (x - 80.0).abs() < 1e-3));
    assert!(xs.iter().any(|&x| (x - 240.0).abs() < 1e-3));
}

#[test]
fn shading_follows_rotation() {
    let config = RenderConfig {
        light: Light::new(Vector3::new(0.0, 0.0, -1.0)).unwrap(),
        ..RenderConfig::default()
    };
    let mut pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);
    // A quarter turn brings the right face (+x normal) round to face the camera.
    pipeline.mesh_mut().rotation.rotate(-FRAC_PI_2);

    let (commands, _) = pipeline.draw_list();
    let nearest = commands.last().unwrap();
    assert_eq!(nearest.face, 2);
    assert_eq!(nearest.fill, Some(Rgb::WHITE));
}

#[test]
fn rotated_polygon_matches_per_vertex_transform() {
    let config = RenderConfig::default();
    let mut pipeline = Pipeline::new(Mesh::cube(1.0, config.camera_distance), &config);
    pipeline.mesh_mut().rotation.rotate(0.4);

    let camera = Camera::new(config.width, config.height, config.camera_distance);
    let angle = pipeline.mesh().rotation.angle;
    let (commands, _) = pipeline.draw_list();
    let mesh = pipeline.mesh();

    for command in &commands {
        let face = &mesh.faces()[command.face];
        for (point, index) in command.polygon.iter().zip(face.indices()) {
            let vertex = mesh.vertices()[index.get()];
            let expected = camera
                .project_to_screen(&Transform::apply(&vertex, angle, config.camera_distance))
                .unwrap();
            assert!((point - expected).norm() < 1e-3);
        }
    }
}
