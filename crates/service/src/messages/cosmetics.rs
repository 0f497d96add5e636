//! Presentation-only defaults assigned when a message is created.

use rand::{seq::SliceRandom, Rng};

/// Card background tags understood by the client.
pub const PALETTE: [&str; 5] = ["bg-pink-100", "bg-yellow-100", "bg-green-100", "bg-purple-100", "bg-blue-100"];

/// Rotation is drawn from `[-ROTATION_LIMIT, ROTATION_LIMIT]` degrees.
pub const ROTATION_LIMIT: f64 = 3.0;

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]).to_string()
}

pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-ROTATION_LIMIT..=ROTATION_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn draws_stay_within_palette_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c = random_color(&mut rng);
            assert!(PALETTE.contains(&c.as_str()), "{c} not in palette");
            let r = random_rotation(&mut rng);
            assert!((-ROTATION_LIMIT..=ROTATION_LIMIT).contains(&r), "{r} out of range");
        }
    }

    #[test]
    fn every_palette_entry_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: std::collections::HashSet<String> = (0..1_000).map(|_| random_color(&mut rng)).collect();
        assert_eq!(seen.len(), PALETTE.len());
    }
}
