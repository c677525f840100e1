use crate::NoiseSource;
use crate::permutation::PermutationTable;

// Skewing and unskewing factors for 3D
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

// Normalises the summed corner contributions to roughly [-1, 1]
const SCALE: f64 = 32.0;

// Squared radius of each corner's influence
const FALLOFF: f64 = 0.6;

// 3D simplex noise (Gustavson's formulation)
// Space is skewed into tetrahedra, so only 4 corners contribute per sample
// instead of the 8 of a lattice cube.
pub struct SimplexNoise {
    table: PermutationTable,
    // Midpoints of the 12 cube edges
    grad3: [(i8, i8, i8); 12],
}

impl SimplexNoise {
    pub fn new() -> Self {
        Self::from_table(PermutationTable::reference())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_table(PermutationTable::seeded(seed))
    }

    fn from_table(table: PermutationTable) -> Self {
        let grad3 = [
            (1, 1, 0),
            (-1, 1, 0),
            (1, -1, 0),
            (-1, -1, 0),
            (1, 0, 1),
            (-1, 0, 1),
            (1, 0, -1),
            (-1, 0, -1),
            (0, 1, 1),
            (0, -1, 1),
            (0, 1, -1),
            (0, -1, -1),
        ];
        Self { table, grad3 }
    }

    #[inline]
    fn dot(g: (i8, i8, i8), x: f64, y: f64, z: f64) -> f64 {
        g.0 as f64 * x + g.1 as f64 * y + g.2 as f64 * z
    }

    // (0.6 − d²)⁴ · (g · d), zero outside the corner's radius
    #[inline]
    fn corner(&self, gi: usize, x: f64, y: f64, z: f64) -> f64 {
        let t = FALLOFF - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * Self::dot(self.grad3[gi], x, y, z)
        }
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for SimplexNoise {
    fn noise(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        // Skew the input to find the containing simplex cell
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;
        let k = (zin + s).floor() as i64;
        // Unskew the cell origin back to (x, y, z) space
        let t = (i + j + k) as f64 * G3;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);
        let z0 = zin - (k as f64 - t);

        // Which of the six tetrahedra: order the offsets from largest to smallest
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0) // X Y Z
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1) // X Z Y
            } else {
                (0, 0, 1, 1, 0, 1) // Z X Y
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1) // Z Y X
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1) // Y Z X
        } else {
            (0, 1, 0, 1, 1, 0) // Y X Z
        };

        // Offsets of the remaining corners in unskewed space
        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        // Gradient indices of the four corners
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let p = |n: usize| self.table.perm(n);
        let pm = |n: usize| self.table.perm_mod12(n);
        let gi0 = pm(ii + p(jj + p(kk)));
        let gi1 = pm(ii + i1 + p(jj + j1 + p(kk + k1)));
        let gi2 = pm(ii + i2 + p(jj + j2 + p(kk + k2)));
        let gi3 = pm(ii + 1 + p(jj + 1 + p(kk + 1)));

        let n0 = self.corner(gi0, x0, y0, z0);
        let n1 = self.corner(gi1, x1, y1, z1);
        let n2 = self.corner(gi2, x2, y2, z2);
        let n3 = self.corner(gi3, x3, y3, z3);

        SCALE * (n0 + n1 + n2 + n3)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::SimplexNoise;
    use crate::NoiseSource;

    #[test]
    fn simplex3_known_values() {
        let n = SimplexNoise::new();
        let cases = [
            ((1.25, 0.0, 3.75), 0.193_345_807_613_169),
            ((0.3, 0.7, 0.1), 0.009_378_912_921_810_752),
            ((10.5, 0.0, -4.25), -0.570_858_216_788_840_1),
            ((-2.3, 150.0, 7.9), 0.566_202_222_222_223),
        ];
        for ((x, y, z), expected) in cases {
            let v = n.noise(x, y, z);
            assert!((v - expected).abs() < 1e-9, "({x}, {y}, {z}) gave {v}");
        }
    }

    #[test]
    fn simplex3_determinism() {
        let a = SimplexNoise::new();
        let b = SimplexNoise::new();
        assert_eq!(
            a.noise(1.23, 4.56, 7.89).to_bits(),
            b.noise(1.23, 4.56, 7.89).to_bits()
        );
        let s1 = SimplexNoise::with_seed(11);
        let s2 = SimplexNoise::with_seed(11);
        assert_eq!(s1.noise(-8.5, 2.0, 0.25), s2.noise(-8.5, 2.0, 0.25));
    }

    #[test]
    fn simplex3_range() {
        let n = SimplexNoise::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50_000 {
            let x = rng.gen_range(-300.0..300.0);
            let y = rng.gen_range(-300.0..300.0);
            let z = rng.gen_range(-300.0..300.0);
            let v = n.noise(x, y, z);
            assert!((-1.05..=1.05).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn simplex3_differs_from_seeded() {
        let a = SimplexNoise::new();
        let b = SimplexNoise::with_seed(5);
        let differs = (0..64).any(|k| {
            let x = k as f64 * 0.37;
            a.noise(x, 0.5, -x) != b.noise(x, 0.5, -x)
        });
        assert!(differs);
    }
}
