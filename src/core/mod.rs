use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config,
    types::{ColorId, Star, StarSnapshot, Vec2},
};

pub struct StarField {
    pub stars: Vec<Star>,
    rng: StdRng,
    width: f32,
    height: f32,
}

impl StarField {
    pub fn new(width: f32, height: f32) -> Self {
        let mut field = Self {
            stars: Vec::with_capacity(config::STAR_COUNT),
            rng: StdRng::from_entropy(),
            width: width.max(1.0),
            height: height.max(1.0),
        };
        field.populate();
        field
    }

    /// Reseeds the whole set from the new dimensions. The caller is expected
    /// to invoke this on viewport resize; individual stars are not preserved.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.populate();
    }

    pub fn tick(&mut self) {
        let half_width = self.width / 2.0;
        let max_dim = self.width.max(self.height);

        for star in &mut self.stars {
            star.angle += star.speed;

            // Inward pull grows toward the center; the parameter is clamped so
            // the pull stays within [PULL_FAR, PULL_NEAR] at any distance.
            let t = (star.distance / half_width).clamp(0.0, 1.0);
            let pull = config::PULL_NEAR - (config::PULL_NEAR - config::PULL_FAR) * t;
            star.distance -= pull;

            star.speed += config::SWIRL_GAIN / (star.distance + config::SWIRL_SOFTENING);

            if star.distance <= config::RECYCLE_DISTANCE {
                star.distance = max_dim * config::RESPAWN_DISTANCE_FACTOR;
                star.angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
                star.speed = self.rng.gen_range(config::SPEED_MIN..config::SPEED_MAX);
            }
        }
    }

    pub fn snapshot(&self, out: &mut Vec<StarSnapshot>) {
        out.clear();
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        for star in &self.stars {
            let dir = Vec2::new(star.angle.cos(), star.angle.sin());
            let alpha = (star.distance / config::GLOW_RANGE).clamp(0.0, 1.0);
            out.push(StarSnapshot {
                pos: center + dir * star.distance,
                size: star.size,
                alpha,
                color: star.color,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    fn populate(&mut self) {
        let max_dim = self.width.max(self.height);
        self.stars.clear();
        for _ in 0..config::STAR_COUNT {
            let star = Star {
                angle: self.rng.gen_range(0.0..std::f32::consts::TAU),
                distance: self
                    .rng
                    .gen_range(0.0..max_dim * config::SEED_DISTANCE_FACTOR),
                speed: self.rng.gen_range(config::SPEED_MIN..config::SPEED_MAX),
                size: self.rng.gen_range(config::SIZE_MIN..config::SIZE_MAX),
                color: if self.rng.gen_bool(0.5) {
                    ColorId::White
                } else {
                    ColorId::Blue
                },
            };
            self.stars.push(star);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod star_field_new {
        use super::*;

        #[test]
        fn populates_full_star_count() {
            let field = StarField::new(100.0, 60.0);
            assert_eq!(field.len(), config::STAR_COUNT);
            assert!(!field.is_empty());
        }

        #[test]
        fn seeds_distances_below_seed_maximum() {
            let field = StarField::new(100.0, 60.0);
            let max = 100.0 * config::SEED_DISTANCE_FACTOR;
            for star in &field.stars {
                assert!(star.distance >= 0.0);
                assert!(star.distance < max);
            }
        }

        #[test]
        fn seeds_speeds_and_sizes_within_bands() {
            let field = StarField::new(100.0, 60.0);
            for star in &field.stars {
                assert!(star.speed >= config::SPEED_MIN && star.speed < config::SPEED_MAX);
                assert!(star.size >= config::SIZE_MIN && star.size < config::SIZE_MAX);
            }
        }

        #[test]
        fn zero_dimensions_are_clamped() {
            let field = StarField::new(0.0, 0.0);
            assert_eq!(field.len(), config::STAR_COUNT);
            for star in &field.stars {
                assert!(star.distance.is_finite());
            }
        }
    }

    mod star_field_tick {
        use super::*;

        #[test]
        fn distance_decreases_or_resets_to_respawn() {
            let mut field = StarField::new(100.0, 60.0);
            let respawn = 100.0 * config::RESPAWN_DISTANCE_FACTOR;
            let before: Vec<f32> = field.stars.iter().map(|s| s.distance).collect();
            field.tick();
            for (star, old) in field.stars.iter().zip(before) {
                let recycled = (star.distance - respawn).abs() < 1e-3;
                assert!(star.distance < old || recycled);
            }
        }

        #[test]
        fn distances_stay_in_band_over_many_ticks() {
            let mut field = StarField::new(100.0, 60.0);
            let seed_max = 100.0 * config::SEED_DISTANCE_FACTOR;
            for _ in 0..500 {
                field.tick();
                for star in &field.stars {
                    assert!(star.distance > config::RECYCLE_DISTANCE);
                    assert!(star.distance <= seed_max);
                }
            }
        }

        #[test]
        fn angle_advances_by_current_speed() {
            let mut field = StarField::new(100.0, 60.0);
            field.stars[0].angle = 1.0;
            field.stars[0].distance = 40.0;
            let speed = field.stars[0].speed;
            field.tick();
            assert!((field.stars[0].angle - (1.0 + speed)).abs() < 1e-6);
        }

        #[test]
        fn star_near_threshold_is_recycled() {
            let mut field = StarField::new(100.0, 60.0);
            field.stars[0].distance = config::RECYCLE_DISTANCE + 0.5;
            field.tick();
            let respawn = 100.0 * config::RESPAWN_DISTANCE_FACTOR;
            assert!((field.stars[0].distance - respawn).abs() < 1e-3);
            let speed = field.stars[0].speed;
            assert!(speed >= config::SPEED_MIN && speed < config::SPEED_MAX);
        }

        #[test]
        fn recycling_preserves_size_and_color() {
            let mut field = StarField::new(100.0, 60.0);
            field.stars[0].distance = config::RECYCLE_DISTANCE;
            field.stars[0].size = 1.25;
            field.stars[0].color = ColorId::Blue;
            field.tick();
            assert_eq!(field.stars[0].size, 1.25);
            assert_eq!(field.stars[0].color, ColorId::Blue);
        }

        #[test]
        fn star_count_is_stable_across_ticks() {
            let mut field = StarField::new(80.0, 24.0);
            for _ in 0..100 {
                field.tick();
            }
            assert_eq!(field.len(), config::STAR_COUNT);
        }
    }

    mod star_field_snapshot {
        use super::*;

        #[test]
        fn projects_every_star() {
            let field = StarField::new(100.0, 60.0);
            let mut out = Vec::new();
            field.snapshot(&mut out);
            assert_eq!(out.len(), config::STAR_COUNT);
        }

        #[test]
        fn position_is_center_plus_polar_offset() {
            let mut field = StarField::new(100.0, 60.0);
            field.stars[0].angle = 0.0;
            field.stars[0].distance = 30.0;
            let mut out = Vec::new();
            field.snapshot(&mut out);
            assert!((out[0].pos.x - 80.0).abs() < 1e-4);
            assert!((out[0].pos.y - 30.0).abs() < 1e-4);
        }

        #[test]
        fn alpha_ramps_with_distance_and_caps_at_one() {
            let mut field = StarField::new(400.0, 300.0);
            field.stars[0].distance = 50.0;
            field.stars[1].distance = 150.0;
            field.stars[2].distance = 0.0;
            let mut out = Vec::new();
            field.snapshot(&mut out);
            assert!((out[0].alpha - 0.5).abs() < 1e-6);
            assert_eq!(out[1].alpha, 1.0);
            assert_eq!(out[2].alpha, 0.0);
        }

        #[test]
        fn snapshot_does_not_mutate_stars() {
            let field = StarField::new(100.0, 60.0);
            let before: Vec<f32> = field.stars.iter().map(|s| s.distance).collect();
            let mut out = Vec::new();
            field.snapshot(&mut out);
            let after: Vec<f32> = field.stars.iter().map(|s| s.distance).collect();
            assert_eq!(before, after);
        }
    }

    mod star_field_resize {
        use super::*;

        #[test]
        fn reseeds_within_new_band() {
            let mut field = StarField::new(200.0, 100.0);
            field.resize(50.0, 40.0);
            let max = 50.0 * config::SEED_DISTANCE_FACTOR;
            for star in &field.stars {
                assert!(star.distance < max);
            }
        }

        #[test]
        fn preserves_star_count() {
            let mut field = StarField::new(200.0, 100.0);
            field.resize(80.0, 24.0);
            assert_eq!(field.len(), config::STAR_COUNT);
        }
    }
}
