// Ken Perlin's reference permutation of 0..=255
const REFERENCE: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

// 256-entry permutation duplicated to 512 so lookups like perm[i + perm[j]]
// never need wrapping. Immutable once built.
#[derive(Clone)]
pub struct PermutationTable {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl PermutationTable {
    // The fixed table every reference output is computed against
    pub fn reference() -> Self {
        Self::from_base(&REFERENCE)
    }

    // Shuffled variant for decorrelated noise fields
    pub fn seeded(seed: u64) -> Self {
        let mut p: Vec<u8> = (0..=255).collect();
        // xorshift64 never leaves zero, so nudge a zero seed off it
        let mut x = (seed ^ 0xDEAD_BEEF_CAFE_BABE_u64).max(1);
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        // Fisher–Yates
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        let mut base = [0u8; 256];
        base.copy_from_slice(&p);
        Self::from_base(&base)
    }

    fn from_base(base: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = base[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }
        Self { perm, perm_mod12 }
    }

    #[inline]
    pub fn perm(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    #[inline]
    pub fn perm_mod12(&self, i: usize) -> usize {
        self.perm_mod12[i] as usize
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::reference()
    }
}
