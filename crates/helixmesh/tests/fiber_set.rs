//! End-to-end builds from fiber set files.

use helixmesh::{
    build_set, build_solid, export, FiberSet, HelixConfig, HelixReport, MeshSink, TessellatedSolid,
    Triangle,
};

const BUNDLE: &str = r#"
[[helix]]
name = "fiber_0"
radius = 10.0
size = 1.0
running_angle_deg = 30.0
length = 200.0
steps = 200
extrusion = 0.5

[[helix]]
name = "fiber_1"
radius = 11.5
size = 1.0
running_angle_deg = -30.0
length = 200.0
steps = 150

[[helix]]
name = "fiber_2"
center = [40.0, 0.0, 0.0]
radius = 10.0
size = 0.8
running_angle_deg = 0.0
length = 200.0
steps = 10
extrusion = 0.25
"#;

#[test]
fn test_bundle_builds_closed_solids() {
    let set = FiberSet::from_toml_str(BUNDLE).unwrap();
    let meshes = build_set(&set).unwrap();
    assert_eq!(meshes.len(), 3);

    for (config, mesh) in set.iter().zip(&meshes) {
        let report = HelixReport::new(config, mesh);
        assert_eq!(report.triangles, config.expected_triangles(), "{}", config.name);
        assert!(report.closed, "{} is open", config.name);
        assert!(report.oriented, "{} is misoriented", config.name);
        assert!(report.volume > 0.0);
    }
}

#[test]
fn test_straight_fiber_volume_includes_extrusion() {
    let set = FiberSet::from_toml_str(BUNDLE).unwrap();
    let config = &set.helices()[2];
    let mesh = &build_set(&set).unwrap()[2];

    let expected = 0.8 * 0.8 * (200.0 + 2.0 * 0.25);
    assert!((mesh.signed_volume() - expected).abs() < 1e-6);

    let (lo, hi) = mesh.bounding_box().unwrap();
    assert!((lo.x - (40.0 + 10.0 - 0.4)).abs() < 1e-12);
    assert!((hi.x - (40.0 + 10.0 + 0.4)).abs() < 1e-12);
    assert!((lo.z + config.extrusion).abs() < 1e-12);
    assert!((hi.z - (config.length + config.extrusion)).abs() < 1e-12);
}

#[test]
fn test_opposite_handed_fibers_mirror() {
    let right = HelixConfig::new("r", 10.0, 1.0, 0.5, 100.0, 40);
    let left = HelixConfig::new("l", 10.0, 1.0, -0.5, 100.0, 40);
    let a = helixmesh::build_helix(&right).unwrap();
    let b = helixmesh::build_helix(&left).unwrap();

    assert!((a.signed_volume() - b.signed_volume()).abs() < 1e-6);
    let (_, hi_a) = a.bounding_box().unwrap();
    let (lo_b, _) = b.bounding_box().unwrap();
    assert!((hi_a.y + lo_b.y).abs() < 1e-9);
}

/// A sink that records facets without welding.
#[derive(Default)]
struct Recorder {
    facets: Vec<Triangle>,
    closed: bool,
}

impl MeshSink for Recorder {
    fn add_facet(&mut self, triangle: Triangle) -> Result<(), helixmesh::MeshError> {
        self.facets.push(triangle);
        Ok(())
    }

    fn close(&mut self) -> Result<(), helixmesh::MeshError> {
        self.closed = true;
        Ok(())
    }
}

#[test]
fn test_custom_sink_sees_build_order() {
    let config = HelixConfig::new("rec", 8.0, 0.5, 0.7, 60.0, 12).with_extrusion(0.2);
    let mut sink = Recorder::default();
    helixmesh::emit_helix(&config, &mut sink).unwrap();

    assert!(sink.closed);
    assert_eq!(sink.facets, helixmesh::build_helix(&config).unwrap().into_triangles());
}

#[test]
fn test_solid_matches_mesh() {
    let config = HelixConfig::new("weld", 10.0, 1.0, 0.4, 120.0, 24);
    let solid: TessellatedSolid = build_solid(&config).unwrap();
    let mesh = helixmesh::build_helix(&config).unwrap();

    assert_eq!(solid.num_facets(), mesh.len());
    for (i, tri) in mesh.iter().enumerate() {
        assert_eq!(solid.facet(i).as_ref(), Some(tri));
    }
}

#[test]
fn test_export_every_format() {
    let set = FiberSet::from_toml_str(BUNDLE).unwrap();
    let meshes = build_set(&set).unwrap();
    let dir = std::env::temp_dir().join(format!("helixmesh-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    for format in [
        export::ExportFormat::Stl,
        export::ExportFormat::AsciiStl,
        export::ExportFormat::Json,
    ] {
        for (config, mesh) in set.iter().zip(&meshes) {
            let path = export::output_path(&dir, &config.name, format);
            export::write_mesh(mesh, &config.name, format, &path).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    let text = std::fs::read_to_string(dir.join("fiber_2.stl")).unwrap();
    assert!(text.starts_with("solid fiber_2"));
    let _ = std::fs::remove_dir_all(&dir);
}
