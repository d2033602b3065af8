//! Body color generation.
//!
//! Colors are purely visual; they are drawn from [`RenderingRng`] so the
//! physics stream stays untouched whatever scheme is selected.

use crate::resources::RenderingRng;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How spawned bodies are colored.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Independent uniform red, green and blue channels
    #[default]
    Random,
    /// Saturated hues at balanced lightness
    Rainbow,
}

impl ColorScheme {
    pub fn sample(self, rng: &mut RenderingRng) -> [f32; 3] {
        match self {
            ColorScheme::Random => random_color(rng),
            ColorScheme::Rainbow => random_rainbow_color(rng),
        }
    }
}

pub fn random_color(rng: &mut RenderingRng) -> [f32; 3] {
    [
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
        rng.random_range(0.0..=1.0),
    ]
}

pub fn random_rainbow_color(rng: &mut RenderingRng) -> [f32; 3] {
    let hue = rng.random_range(0.0..=360.0);
    let saturation = rng.random_range(0.8..=1.0);
    let lightness = rng.random_range(0.4..=0.6);

    let linear = LinearRgba::from(Color::hsl(hue, saturation, lightness));
    [linear.red, linear.green, linear.blue]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_color_channels_in_unit_range() {
        let mut rng = RenderingRng::from_seed(1);
        for _ in 0..1_000 {
            let color = random_color(&mut rng);
            assert!(color.iter().all(|channel| (0.0..=1.0).contains(channel)));
        }
    }

    #[test]
    fn test_rainbow_color_is_finite_and_non_negative() {
        let mut rng = RenderingRng::from_seed(2);
        for _ in 0..1_000 {
            let color = ColorScheme::Rainbow.sample(&mut rng);
            assert!(color.iter().all(|channel| channel.is_finite() && *channel >= 0.0));
        }
    }
}
