use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// X position the obstacle respawns at.
pub const RESET_X: f32 = 145.0;
/// Once past this the obstacle is recycled on the following tick.
pub const MIN_X: f32 = -145.0;
/// Respawn Z is drawn from [0, Z_RANGE).
pub const Z_RANGE: f32 = 130.0;

const STEP: f32 = 0.5;
const HALF_EXTENT: f32 = 4.0;

/// The rolling rock: an object pool of size one, recycled by position reset
/// rather than destruction. X decreases by a fixed step per idle tick; Z is
/// re-rolled on each reset.
#[derive(Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    rng: Pcg64Mcg,
}

impl Obstacle {
    /// `seed` pins the respawn positions for reproducible runs; `None`
    /// seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_rng(&mut rand::rng()),
        };
        let z = rng.random_range(0.0..Z_RANGE);
        Self {
            x: RESET_X,
            y: HALF_EXTENT,
            z,
            rng,
        }
    }

    pub fn half_extent(&self) -> f32 {
        HALF_EXTENT
    }

    /// Advance one idle tick: roll toward -X, recycle after passing the
    /// bound.
    pub fn tick(&mut self) {
        if self.x < MIN_X {
            self.x = RESET_X;
            self.z = self.rng.random_range(0.0..Z_RANGE);
        } else {
            self.x -= STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_toward_negative_x() {
        let mut rock = Obstacle::new(Some(7));
        let x0 = rock.x;
        rock.tick();
        assert!(rock.x < x0);
    }

    #[test]
    fn reset_happens_on_the_tick_after_crossing_the_bound() {
        let mut rock = Obstacle::new(Some(7));
        rock.x = MIN_X - 0.1;
        rock.tick();
        assert_eq!(rock.x, RESET_X);
        assert!(rock.z >= 0.0 && rock.z < Z_RANGE);
    }

    #[test]
    fn full_loop_stays_in_bounds() {
        let mut rock = Obstacle::new(Some(42));
        for _ in 0..2000 {
            rock.tick();
            assert!(rock.x >= MIN_X - STEP && rock.x <= RESET_X);
            assert!(rock.z >= 0.0 && rock.z < Z_RANGE);
        }
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let mut a = Obstacle::new(Some(99));
        let mut b = Obstacle::new(Some(99));
        for _ in 0..1500 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.x, b.x);
        assert_eq!(a.z, b.z);
    }
}
