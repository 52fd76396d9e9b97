//! Binary entry point: render the Teachers Day airplane scene and export it
//! as PNG and JPEG into the working directory.

use std::path::Path;

use anyhow::Result;

use teachers_day_airplane::artwork;
use teachers_day_airplane::Renderer;

const PNG_OUTPUT: &str = "teachers_day_airplane.png";
const JPG_OUTPUT: &str = "teachers_day_airplane.jpg";

fn main() -> Result<()> {
    env_logger::init();

    let scene = artwork::teachers_day_scene()?;
    let renderer = Renderer::new();
    let artifacts = renderer.export(&scene, Path::new(PNG_OUTPUT), Path::new(JPG_OUTPUT))?;

    println!("Teachers Day airplane image created successfully!");
    println!("Files saved as:");
    for artifact in &artifacts {
        println!("- {}", artifact.path.display());
    }

    Ok(())
}
