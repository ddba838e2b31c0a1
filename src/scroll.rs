use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which way a band travels across the screen
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScrollDirection {
    /// Content moves towards the left edge
    Leading,
    /// Content moves towards the right edge
    Trailing,
}

/// An endlessly scrolling strip made of two adjacent copies of one tile.
///
/// The scroll position is a pure function of the clock sample: nothing is
/// accumulated between frames, so dropped or uneven frames never drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBand {
    tile_width: f64,
    speed: f64,
    direction: ScrollDirection,
}

impl ScrollBand {
    pub fn new(
        tile_width: f64,
        speed: f64,
        direction: ScrollDirection,
    ) -> Result<Self, ConfigError> {
        if !(tile_width.is_finite() && tile_width > 0.0) {
            return Err(ConfigError::InvalidTileWidth(tile_width));
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(speed));
        }
        Ok(Self {
            tile_width,
            speed,
            direction,
        })
    }

    /// Seconds for the band to travel one full tile width
    pub fn period(&self) -> f64 {
        self.tile_width / self.speed
    }

    /// Scroll offset within the current period, always in `[0, tile_width)`.
    pub fn phase(&self, t: f64) -> f64 {
        let phase = self.speed * t.rem_euclid(self.period());
        // rem_euclid can round up to the divisor itself
        if phase.is_finite() && phase < self.tile_width {
            phase
        } else {
            0.0
        }
    }

    /// Horizontal offsets of the two tile copies at time `t`
    pub fn offsets(&self, t: f64) -> [f64; 2] {
        let phase = self.phase(t);
        match self.direction {
            ScrollDirection::Leading => [-phase, self.tile_width - phase],
            ScrollDirection::Trailing => [phase, -(self.tile_width - phase)],
        }
    }

    /// For each of `visible` screen columns, the tile column drawn there.
    ///
    /// Column `x` samples the tile at its left edge, which lands in whichever
    /// copy spans that point. Columns past the reach of both copies are
    /// `None`; that only happens when `visible` exceeds the tile width.
    pub fn column_map(&self, t: f64, visible: usize) -> Vec<Option<usize>> {
        let width = self.tile_width;
        let phase = self.phase(t);

        (0..visible)
            .map(|x| {
                let x = x as f64;
                let (pos, reach) = match self.direction {
                    ScrollDirection::Leading => (x + phase, 2.0 * width - phase),
                    ScrollDirection::Trailing => (x - phase, width + phase),
                };
                let pos = pos.rem_euclid(width);
                // a sliver below zero wraps to the width itself
                let col = if pos < width { pos.floor() as usize } else { 0 };
                (x < reach).then_some(col)
            })
            .collect()
    }
}
