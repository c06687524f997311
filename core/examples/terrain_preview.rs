use core::{ELEMENTS_PER_VERTEX, HeightField, NoiseField, TerrainMesh, TerrainParams};
use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use std::path::Path;

const LEGEND_WIDTH: usize = 24;

fn main() {
    tracing_subscriber::fmt::init();

    // Stage parameters the way a UI collaborator would
    let mut staged = TerrainParams::builder();
    staged.width = 512;
    staged.depth = 512;
    staged.scale = 128;
    staged.frequency = 0.012;
    staged.octaves = 6;
    staged.persistence = 0.4;
    staged.exponent = 1.16;
    let params = staged.build().unwrap();

    let noise = NoiseField::new(2025);
    let map = HeightField::generate(&noise, &params);
    let mesh = TerrainMesh::new(&map);
    println!("{} polygons", mesh.polygon_count());

    // Top-down render: per-vertex band color shaded by the mesh normal
    // against a fixed light direction
    let (lx, ly, lz) = {
        let len = 3.0f32.sqrt();
        (1.0 / len, 1.0 / len, 1.0 / len)
    };
    let width = map.width();
    let depth = map.depth();
    let mut img = RgbImage::new((width + LEGEND_WIDTH) as u32, depth as u32);
    let vertex_data = mesh.vertex_data();
    for (i, v) in vertex_data.chunks(ELEMENTS_PER_VERTEX).enumerate() {
        let x = i / depth;
        let z = i % depth;
        // Lambertian dot against the vertex normal
        let light = (v[3] * lx + v[4] * ly + v[5] * lz).max(0.0) * 0.6 + 0.4;
        let pixel = Rgb([
            (v[6] * light * 255.0) as u8,
            (v[7] * light * 255.0) as u8,
            (v[8] * light * 255.0) as u8,
        ]);
        img.put_pixel(x as u32, z as u32, pixel);
    }

    // Elevation legend strip on the right, low at the bottom
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.93, 0.79, 0.69)), // sand
        (0.39, LinSrgb::new(0.2, 0.5, 0.0)),    // grass
        (0.48, LinSrgb::new(0.61, 0.46, 0.32)), // dirt
        (0.73, LinSrgb::new(1.0, 1.0, 1.0)),    // snow
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);
    for z in 0..depth {
        let t = 1.0 - z as f32 / depth as f32;
        let col: LinSrgb = gradient.get(t);
        let rgb = col.into_format::<u8>();
        for x in width..width + LEGEND_WIDTH {
            img.put_pixel(x as u32, z as u32, Rgb([rgb.red, rgb.green, rgb.blue]));
        }
    }

    let path = Path::new("terrain_preview.png");
    img.save(path).unwrap();
    println!("Saved terrain preview to {:?}", path);
}
