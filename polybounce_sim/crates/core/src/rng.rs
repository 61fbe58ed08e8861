//! Seeded random streams for the simulation.
//! SplitMix64 derives each stream's seed; the stream itself is xorshift64*.
//! Streams are named so launch seeding and bounce jitter never share a sequence.

pub const LAUNCH_STREAM: &str = "launch";
pub const BOUNCE_STREAM: &str = "bounce";

#[derive(Debug, Clone, Copy)]
pub struct RngService {
    base_seed: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct RngStream {
    state: u64,
}

impl RngService {
    pub fn with_seed(seed: u64) -> Self {
        Self { base_seed: seed }
    }

    pub fn seed(&self) -> u64 {
        self.base_seed
    }

    pub fn stream(&self, name: &str) -> RngStream {
        let seed = splitmix64(self.base_seed ^ fnv1a64(name.as_bytes()));
        RngStream { state: seed.max(1) }
    }
}

impl RngStream {
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(2685821657736338717)
    }

    /// Uniform in [0, 1) with 24 bits of precision.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        let v = (self.next_u64() >> 40) as f32;
        v / (1u32 << 24) as f32
    }

    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// Uniform in [-half_width, half_width).
    #[inline]
    pub fn symmetric(&mut self, half_width: f32) -> f32 {
        self.range_f32(-half_width, half_width)
    }
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z ^= z >> 30;
    z = z.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001B3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}
