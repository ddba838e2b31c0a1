//! Artwork and parallax composition for the ride screen.
//!
//! Mountain tiles are generated from seeded ridge profiles so they wrap
//! seamlessly and look the same on every run.

use std::f64::consts::TAU;

use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::style::Color;
use tracing::debug;

use crate::config::{BandSettings, Config};
use crate::error::ConfigError;
use crate::scroll::ScrollBand;

pub const TILE_WIDTH: usize = 160;

pub const SKY: Color = Color::Rgb(243, 200, 188);
pub const SUN: Color = Color::Rgb(249, 249, 249);
pub const GROUND: Color = Color::Rgb(20, 10, 18);
pub const ACCENT: Color = Color::Rgb(255, 165, 0);
pub const INK: Color = Color::Rgb(40, 24, 36);

pub const SUN_ART: [&str; 3] = [" ▄████▄ ", "████████", " ▀████▀ "];

/// Rider and frame. `R` and `F` mark the rear and front hubs; the wheel
/// spokes are drawn there.
pub const BIKER_ART: [&str; 6] = [
    "           __o    ",
    "         _ \\<_    ",
    "   .---.  /\\/ .-. ",
    "  /     \\/ /\\/   \\",
    "  |  R  |===-| F |",
    "   `---'      `-' ",
];

/// A rectangular piece of mountain art. `None` cells are transparent.
#[derive(Debug, Clone)]
pub struct Tile {
    rows: Vec<Vec<Option<char>>>,
    width: usize,
}

impl Tile {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Build a seamlessly wrapping ridge of `height` rows.
    ///
    /// The skyline is a sum of sines whose frequencies are whole multiples of
    /// the tile width, so column `width` matches column 0 exactly.
    pub fn ridge(seed: u64, width: usize, height: usize, roughness: usize, fill: char) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let harmonics: Vec<(f64, f64, f64)> = (1..=roughness.max(1))
            .map(|k| {
                let amplitude = rng.gen_range(0.4..1.0) / k as f64;
                let phase = rng.gen_range(0.0..TAU);
                (k as f64, amplitude, phase)
            })
            .collect();
        let total: f64 = harmonics.iter().map(|(_, a, _)| a).sum();

        let profile: Vec<usize> = (0..width)
            .map(|col| {
                let x = col as f64 / width as f64;
                let v: f64 = harmonics
                    .iter()
                    .map(|(k, a, p)| a * (TAU * k * x + p).sin())
                    .sum();
                // normalise into [1, height]
                let unit = (v / total + 1.0) / 2.0;
                1 + (unit * (height.saturating_sub(1)) as f64).round() as usize
            })
            .collect();

        let rows = (0..height)
            .map(|row| {
                let depth = height - row;
                (0..width)
                    .map(|col| {
                        let here = profile[col];
                        if depth > here {
                            return None;
                        }
                        if depth < here {
                            return Some(fill);
                        }
                        let prev = profile[(col + width - 1) % width];
                        let next = profile[(col + 1) % width];
                        Some(match (prev < here, next < here) {
                            (true, true) => '^',
                            (true, false) => '/',
                            (false, true) => '\\',
                            (false, false) => '▔',
                        })
                    })
                    .collect()
            })
            .collect();

        Self { rows, width }
    }
}

/// One depth plane of the backdrop
#[derive(Debug, Clone)]
pub struct Layer {
    pub tile: Tile,
    pub color: Color,
    /// Rows between the bottom of the backdrop and the tile's bottom row
    pub baseline: u16,
    /// Scrolling layers carry a band; static ones stay put
    pub band: Option<ScrollBand>,
}

impl Layer {
    /// Tile column shown at each of `visible` screen columns at time `t`
    pub fn columns(&self, t: f64, visible: usize) -> Vec<Option<usize>> {
        match &self.band {
            Some(band) => band.column_map(t, visible),
            None => (0..visible)
                .map(|x| (x < self.tile.width()).then_some(x))
                .collect(),
        }
    }
}

/// The five mountain planes, back to front
#[derive(Debug, Clone)]
pub struct Scene {
    layers: Vec<Layer>,
}

impl Scene {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let scrolling = |name: &str, seed, height, roughness, fill, settings: &BandSettings| {
            let tile = Tile::ridge(seed, TILE_WIDTH, height, roughness, fill);
            let band = ScrollBand::new(tile.width() as f64, settings.speed, settings.direction)?;
            debug!(
                band = name,
                speed = settings.speed,
                direction = %settings.direction,
                period = band.period(),
                "band ready"
            );
            Ok::<_, ConfigError>((tile, band))
        };

        let (top, top_band) = scrolling("top", 11, 9, 5, '▓', &config.top_band)?;
        let (bottom, bottom_band) = scrolling("bottom", 23, 7, 4, '█', &config.bottom_band)?;
        let (middle, middle_band) = scrolling("middle", 37, 6, 3, '█', &config.middle_band)?;

        let layers = vec![
            Layer {
                tile: top,
                color: Color::Rgb(214, 150, 150),
                baseline: 13,
                band: Some(top_band),
            },
            Layer {
                tile: Tile::ridge(41, TILE_WIDTH, 8, 2, '▒'),
                color: Color::Rgb(180, 110, 125),
                baseline: 10,
                band: None,
            },
            Layer {
                tile: Tile::ridge(53, TILE_WIDTH, 7, 3, '▓'),
                color: Color::Rgb(140, 80, 105),
                baseline: 7,
                band: None,
            },
            Layer {
                tile: bottom,
                color: Color::Rgb(100, 55, 85),
                baseline: 4,
                band: Some(bottom_band),
            },
            Layer {
                tile: middle,
                color: Color::Rgb(70, 38, 62),
                baseline: 2,
                band: Some(middle_band),
            },
            Layer {
                tile: Tile::ridge(67, TILE_WIDTH, 3, 2, '█'),
                color: Color::Rgb(45, 24, 40),
                baseline: 0,
                band: None,
            },
        ];

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Widest area the backdrop can cover without a seam
    pub fn max_width(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.tile.width())
            .min()
            .unwrap_or(0)
    }
}

/// Rider art with both wheels' spokes filled in
pub fn biker_rows(rear: char, front: char) -> Vec<String> {
    BIKER_ART
        .iter()
        .map(|row| row.replace('R', &rear.to_string()).replace('F', &front.to_string()))
        .collect()
}
