use core::NoiseField;
use image::{GrayImage, Luma};
use std::path::Path;

// Write grayscale previews of the multi-octave sampler at a few octave
// counts, to eyeball continuity and octave detail
fn save_preview(noise: &NoiseField, size: usize, octaves: usize, filename: &str) {
    let mut img = GrayImage::new(size as u32, size as u32);
    for z in 0..size {
        for x in 0..size {
            let v = noise.sample(x as f64 * 0.02, 0.0, z as f64 * 0.02, octaves, 0.5);
            let gray = (v * 255.0).round() as u8;
            img.put_pixel(x as u32, z as u32, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    tracing_subscriber::fmt::init();

    let noise = NoiseField::new(2025);
    save_preview(&noise, 512, 1, "noise_1_octave.png");
    save_preview(&noise, 512, 4, "noise_4_octaves.png");
    save_preview(&noise, 512, 8, "noise_8_octaves.png");
}
