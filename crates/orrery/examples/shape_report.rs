//! Shape report — build every shape in a JSON scene and print its statistics.
//!
//! ```text
//! RUST_LOG=debug cargo run -p orrery --example shape_report -- scenes/gravity.json
//! ```
//!
//! Without an argument the bundled gravity scene is used.

use orrery::mesh::ShapeDesc;

const DEFAULT_SCENE: &str = include_str!("../scenes/gravity.json");

fn main() {
    env_logger::init();

    let source = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                log::error!("cannot read {path}: {err}");
                std::process::exit(1);
            }
        },
        None => DEFAULT_SCENE.to_string(),
    };

    let shapes = match ShapeDesc::parse_scene(&source) {
        Ok(shapes) => shapes,
        Err(err) => {
            log::error!("invalid scene: {err}");
            std::process::exit(1);
        }
    };

    println!("{:<12} {:>9} {:>9} {:>9} {:>10}", "shape", "vertices", "triangles", "boundary", "watertight");
    for desc in &shapes {
        match desc.build() {
            Ok(mesh) => {
                let report = mesh.edge_report();
                println!(
                    "{:<12} {:>9} {:>9} {:>9} {:>10}",
                    desc.name(),
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    report.boundary_edges,
                    report.is_watertight()
                );
            }
            Err(err) => log::warn!("skipping {}: {err}", desc.name()),
        }
    }
}
