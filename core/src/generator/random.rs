use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy drawing every random choice from a `SmallRng` seeded with `seed`, so the
/// same seed and config always produce the same maze.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMazeGenerator {
    seed: u64,
}

impl RandomMazeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MazeGenerator for RandomMazeGenerator {
    fn generate(self, config: &MazeConfig) -> Result<Grid> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_with_rng(config, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_reproducible() {
        let config = MazeConfig::new((14, 11), Shape::Circle, MazeKind::Imperfect).unwrap();

        let a = RandomMazeGenerator::new(9).generate(&config).unwrap();
        let b = RandomMazeGenerator::new(9).generate(&config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn imperfect_has_at_least_as_many_openings() {
        for seed in 0..8 {
            let perfect = MazeConfig::new((20, 20), Shape::Square, MazeKind::Perfect).unwrap();
            let imperfect = MazeConfig {
                kind: MazeKind::Imperfect,
                ..perfect.clone()
            };

            let baseline = RandomMazeGenerator::new(seed).generate(&perfect).unwrap();
            let braided = RandomMazeGenerator::new(seed).generate(&imperfect).unwrap();

            // identical RNG stream up to braiding, so the braided maze extends the perfect one
            assert_eq!(baseline.open_wall_pairs(), 399);
            assert!(braided.open_wall_pairs() >= baseline.open_wall_pairs());
            for coords in baseline.iter_cells() {
                for direction in Direction::ALL {
                    if !baseline.has_wall(coords, direction) {
                        assert!(!braided.has_wall(coords, direction));
                    }
                }
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = MazeConfig {
            size: (0, 5),
            shape: Shape::Square,
            kind: MazeKind::Perfect,
        };
        assert_eq!(
            RandomMazeGenerator::new(0).generate(&config),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }
}
