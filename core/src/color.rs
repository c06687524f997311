// Elevation-based terrain coloring
//
// The normalized elevation (height / scale) is partitioned into fixed bands,
// with a linear blend over a shared transition width above each threshold:
//
//   [0.00, 0.35) sand
//   [0.35, 0.43) sand → grass blend
//   [0.43, 0.44) grass
//   [0.44, 0.52) grass → dirt blend
//   [0.52, 0.65) dirt
//   [0.65, 0.73) dirt → snow blend
//   [0.73, ...]  snow
//
// Heights below zero saturate to sand, heights above the scale to snow.

const SAND: [f32; 3] = [0.93, 0.79, 0.69];
const GRASS: [f32; 3] = [0.2, 0.5, 0.0];
const DIRT: [f32; 3] = [0.61, 0.46, 0.32];
const SNOW: [f32; 3] = [1.0, 1.0, 1.0];

const SAND_LIMIT: f32 = 0.35;
const GRASS_LIMIT: f32 = 0.44;
const DIRT_LIMIT: f32 = 0.65;
const TRANSITION: f32 = 0.08;

// Linearly interpolate between two RGB triples
fn lerp_color(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

// Map an elevation to its terrain band color, blending near band boundaries
pub fn classify(height: f32, scale: f32) -> [f32; 3] {
    let sand_limit = SAND_LIMIT * scale;
    let grass_limit = GRASS_LIMIT * scale;
    let dirt_limit = DIRT_LIMIT * scale;
    let transition = TRANSITION * scale;

    if height < sand_limit {
        SAND
    } else if height < sand_limit + transition {
        lerp_color(SAND, GRASS, (height - sand_limit) / transition)
    } else if height < grass_limit {
        GRASS
    } else if height < grass_limit + transition {
        lerp_color(GRASS, DIRT, (height - grass_limit) / transition)
    } else if height < dirt_limit {
        DIRT
    } else if height < dirt_limit + transition {
        lerp_color(DIRT, SNOW, (height - dirt_limit) / transition)
    } else {
        SNOW
    }
}
