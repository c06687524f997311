// 3D Perlin noise sampler used to drive height field generation
// Octave count and persistence are per-call so one table serves every
// parameter combination the caller stages
pub struct NoiseField {
    seed: u64,
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        // build a pseudorandom permutation table of size 256, duplicated into 512
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        // Simple xorshift-based (with a large constant) RNG for shuffling
        let mut x = seed ^ 0xDEADBEEFCAFEBABE_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            // Bitmasking the lowest 8 bits
            (x & 0xFF) as u8
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        // Duplicate into an array of length 512
        // To avoid costly modulo operations when doing lookups
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 255];
        }

        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Gradient function for 3D: based on hashed value, choose from 12 directions
    #[inline]
    fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = (hash & 0xF) as usize;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    // Raw single-octave Perlin noise at (x, y, z), roughly in [-1, 1]
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        // Find unit cube that contains point
        let xi = x.floor() as i32 & 255;
        let yi = y.floor() as i32 & 255;
        let zi = z.floor() as i32 & 255;
        // Relative coordinates within cube
        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();
        // Fade curves for each
        let u = Self::fade(xf);
        let v = Self::fade(yf);
        let w = Self::fade(zf);

        // Hash corners of the cube
        let aaa = self.perm[(self.perm[(self.perm[xi as usize] as usize + yi as usize) & 255]
            as usize
            + zi as usize)
            & 255];
        let aba = self.perm[(self.perm
            [(self.perm[xi as usize] as usize + ((yi + 1) & 255) as usize) & 255]
            as usize
            + zi as usize)
            & 255];
        let aab = self.perm[(self.perm[(self.perm[xi as usize] as usize + yi as usize) & 255]
            as usize
            + ((zi + 1) & 255) as usize)
            & 255];
        let abb = self.perm[(self.perm
            [(self.perm[xi as usize] as usize + ((yi + 1) & 255) as usize) & 255]
            as usize
            + ((zi + 1) & 255) as usize)
            & 255];
        let baa = self.perm[(self.perm
            [(self.perm[((xi + 1) & 255) as usize] as usize + yi as usize) & 255]
            as usize
            + zi as usize)
            & 255];
        let bba = self.perm[(self.perm
            [(self.perm[((xi + 1) & 255) as usize] as usize + ((yi + 1) & 255) as usize) & 255]
            as usize
            + zi as usize)
            & 255];
        let bab = self.perm[(self.perm
            [(self.perm[((xi + 1) & 255) as usize] as usize + yi as usize) & 255]
            as usize
            + ((zi + 1) & 255) as usize)
            & 255];
        let bbb = self.perm[(self.perm
            [(self.perm[((xi + 1) & 255) as usize] as usize + ((yi + 1) & 255) as usize) & 255]
            as usize
            + ((zi + 1) & 255) as usize)
            & 255];

        // Compute gradient contributions
        let x1 = Self::lerp(
            Self::grad(aaa, xf, yf, zf),
            Self::grad(baa, xf - 1.0, yf, zf),
            u,
        );
        let x2 = Self::lerp(
            Self::grad(aba, xf, yf - 1.0, zf),
            Self::grad(bba, xf - 1.0, yf - 1.0, zf),
            u,
        );
        let y1 = Self::lerp(x1, x2, v);

        let x3 = Self::lerp(
            Self::grad(aab, xf, yf, zf - 1.0),
            Self::grad(bab, xf - 1.0, yf, zf - 1.0),
            u,
        );
        let x4 = Self::lerp(
            Self::grad(abb, xf, yf - 1.0, zf - 1.0),
            Self::grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = Self::lerp(x3, x4, v);

        // Final interpolation along z
        Self::lerp(y1, y2, w)
    }

    // Multi-octave Perlin noise at (x, y, z) (Fractal Brownian Motion)
    //
    // Octave k is sampled at frequency 2^k with amplitude persistence^k and
    // the total is divided by the amplitude sum, so the output stays
    // scale-stable as the octave count changes. The normalized signed value
    // is then remapped from [-1, 1] to [0, 1] and clamped; callers can rely
    // on sample() returning [0, 1].
    //
    // octaves >= 1 and persistence >= 0 are validated upstream when terrain
    // parameters are built.
    pub fn sample(&self, x: f64, y: f64, z: f64, octaves: usize, persistence: f64) -> f64 {
        debug_assert!(octaves >= 1, "octaves must be at least 1");
        debug_assert!(persistence >= 0.0, "persistence must be non-negative");

        let mut amplitude = 1.0; // Weight of the current octave
        let mut freq = 1.0; // How zoomed in we are on the noise pattern
        let mut total = 0.0; // Accumulated noise value
        let mut max_amp = 0.0; // Maximum possible amplitude to normalize the result

        for _ in 0..octaves {
            total += self.noise(x * freq, y * freq, z * freq) * amplitude;
            max_amp += amplitude;
            amplitude *= persistence;
            freq *= 2.0;
        }

        // Normalize to [-1, 1], then remap to [0, 1]
        (0.5 * (total / max_amp + 1.0)).clamp(0.0, 1.0)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(2025)
    }
}
