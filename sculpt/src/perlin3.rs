use crate::NoiseSource;
use crate::permutation::PermutationTable;

// Ken Perlin's improved gradient noise in 3D
pub struct ImprovedNoise {
    table: PermutationTable,
}

impl ImprovedNoise {
    // Reference permutation, the one every expected value is computed from
    pub fn new() -> Self {
        Self {
            table: PermutationTable::reference(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            table: PermutationTable::seeded(seed),
        }
    }

    // 6t^5 − 15t^4 + 10t^3, zero first and second derivative at 0 and 1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(t: f64, a: f64, b: f64) -> f64 {
        a + t * (b - a)
    }

    // Low 4 bits of the hash pick one of 12 cube-edge gradients (4 repeated)
    #[inline]
    fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 15;
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
}

impl Default for ImprovedNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for ImprovedNoise {
    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = |i: usize| self.table.perm(i);

        // Unit cube containing the point
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let zi = (fz as i64 & 255) as usize;
        // Relative position inside the cube
        let x = x - fx;
        let y = y - fy;
        let z = z - fz;
        let u = Self::fade(x);
        let v = Self::fade(y);
        let w = Self::fade(z);

        // Hash the 8 cube corners
        let a = p(xi) + yi;
        let aa = p(a) + zi;
        let ab = p(a + 1) + zi;
        let b = p(xi + 1) + yi;
        let ba = p(b) + zi;
        let bb = p(b + 1) + zi;

        Self::lerp(
            w,
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(p(aa), x, y, z),
                    Self::grad(p(ba), x - 1.0, y, z),
                ),
                Self::lerp(
                    u,
                    Self::grad(p(ab), x, y - 1.0, z),
                    Self::grad(p(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(p(aa + 1), x, y, z - 1.0),
                    Self::grad(p(ba + 1), x - 1.0, y, z - 1.0),
                ),
                Self::lerp(
                    u,
                    Self::grad(p(ab + 1), x, y - 1.0, z - 1.0),
                    Self::grad(p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::ImprovedNoise;
    use crate::NoiseSource;

    #[test]
    fn perlin3_known_values() {
        let n = ImprovedNoise::new();
        let cases = [
            ((0.5, 0.5, 0.5), -0.25),
            ((1.25, 0.0, 3.75), 0.533_005_714_416_503_9),
            ((0.3, 0.7, 0.1), -0.104_376_291_142_502_4),
            ((10.5, 0.0, -4.25), 0.034_423_828_125),
            ((-2.3, 150.0, 7.9), -0.263_923_157_759_999_64),
        ];
        for ((x, y, z), expected) in cases {
            let v = n.noise(x, y, z);
            assert!((v - expected).abs() < 1e-12, "({x}, {y}, {z}) gave {v}");
        }
    }

    #[test]
    fn perlin3_zero_on_lattice() {
        let n = ImprovedNoise::new();
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (25.0, 0.0, 75.0), (-3.0, 150.0, 12.0)] {
            assert_eq!(n.noise(x, y, z), 0.0);
        }
    }

    #[test]
    fn perlin3_determinism() {
        let a = ImprovedNoise::new();
        let b = ImprovedNoise::new();
        let v = a.noise(1.23, 4.56, 7.89);
        assert_eq!(v.to_bits(), a.noise(1.23, 4.56, 7.89).to_bits());
        assert_eq!(v.to_bits(), b.noise(1.23, 4.56, 7.89).to_bits());

        let s1 = ImprovedNoise::with_seed(2025);
        let s2 = ImprovedNoise::with_seed(2025);
        assert_eq!(s1.noise(3.3, -1.1, 0.7), s2.noise(3.3, -1.1, 0.7));
    }

    #[test]
    fn perlin3_range() {
        let n = ImprovedNoise::new();
        let seeded = ImprovedNoise::with_seed(99);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50_000 {
            let x = rng.gen_range(-300.0..300.0);
            let y = rng.gen_range(-300.0..300.0);
            let z = rng.gen_range(-300.0..300.0);
            for v in [n.noise(x, y, z), seeded.noise(x, y, z)] {
                assert!((-1.05..=1.05).contains(&v), "{v} out of range");
            }
        }
    }
}
