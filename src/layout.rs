//! Pixel-space layouts and the morph that walks a point cloud through them.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::palette::{Ramp, Rgb};

/// Darkest fraction of each ramp left unused by the morph.
const RAMP_FLOOR: f32 = 0.4;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Layout {
    Phyllotaxis,
    Grid,
    Sine,
    Spiral,
}

impl Layout {
    /// Pixel positions for `count` points, `spacing` pixels apart.
    pub fn place(self, count: usize, spacing: f32, width: f32, height: f32) -> Vec<[f32; 2]> {
        match self {
            Layout::Phyllotaxis => phyllotaxis(count, spacing, width / 2.0, height / 2.0),
            Layout::Grid => grid(count, spacing, width),
            Layout::Sine => sine(count, spacing, width, height),
            Layout::Spiral => spiral(count, spacing, width, height),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Layout::Phyllotaxis => Layout::Grid,
            Layout::Grid => Layout::Sine,
            Layout::Sine => Layout::Spiral,
            Layout::Spiral => Layout::Phyllotaxis,
        }
    }
}

fn columns(spacing: f32, width: f32) -> usize {
    ((width / spacing).floor() as usize).max(1)
}

fn phyllotaxis(count: usize, spacing: f32, cx: f32, cy: f32) -> Vec<[f32; 2]> {
    let golden = PI * (3.0 - 5f32.sqrt());
    (0..count)
        .map(|i| {
            let r = spacing * (i as f32).sqrt() / 2.0;
            let theta = i as f32 * golden;
            [cx + r * theta.cos(), cy + r * theta.sin()]
        })
        .collect()
}

fn grid(count: usize, spacing: f32, width: f32) -> Vec<[f32; 2]> {
    let cols = columns(spacing, width);
    let offset = (width - cols as f32 * spacing) / 2.0;
    (0..count)
        .map(|i| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            [offset + (col + 0.5) * spacing, (row + 0.5) * spacing]
        })
        .collect()
}

fn sine(count: usize, spacing: f32, width: f32, height: f32) -> Vec<[f32; 2]> {
    let cols = columns(spacing, width);
    let rows = count.div_ceil(cols);
    let amplitude = height / 4.0;
    (0..count)
        .map(|i| {
            let x = ((i % cols) as f32 + 0.5) * spacing;
            let band = (i / cols) as f32 - rows as f32 / 2.0;
            let wave = (x / width * 2.0 * TAU).sin();
            [x, height / 2.0 + amplitude * wave + band * spacing / 2.0]
        })
        .collect()
}

fn spiral(count: usize, spacing: f32, width: f32, height: f32) -> Vec<[f32; 2]> {
    // archimedean, roughly one point per `spacing` of arc length
    let b = spacing / TAU;
    (0..count)
        .map(|i| {
            let theta = (2.0 * i as f32 * spacing / b).sqrt();
            let r = b * theta;
            [width / 2.0 + r * theta.cos(), height / 2.0 + r * theta.sin()]
        })
        .collect()
}

/// Per-point endpoints for a morph between two layouts.
#[derive(Debug, Clone)]
pub struct LayoutMorph {
    count: usize,
    spacing: f32,
    width: f32,
    height: f32,
    layout: Layout,
    ramp: Ramp,
    pub start_positions: Vec<[f32; 2]>,
    pub end_positions: Vec<[f32; 2]>,
    pub start_colors: Vec<Rgb>,
    pub end_colors: Vec<Rgb>,
}

impl LayoutMorph {
    /// Every point starts collapsed onto the canvas center, colored with
    /// `ramp`, and the first transition heads into `layout` with the same
    /// ramp.
    pub fn new(
        count: usize,
        spacing: f32,
        width: f32,
        height: f32,
        layout: Layout,
        ramp: Ramp,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::ZeroCount);
        }
        let center = [width / 2.0, height / 2.0];
        let colors = Self::colors(count, ramp);
        let mut morph = Self {
            count,
            spacing,
            width,
            height,
            layout,
            ramp,
            start_positions: vec![center; count],
            end_positions: vec![center; count],
            start_colors: colors.clone(),
            end_colors: colors,
        };
        morph.retarget();
        Ok(morph)
    }

    fn colors(count: usize, ramp: Ramp) -> Vec<Rgb> {
        (0..count)
            .map(|i| ramp.sample_clipped(i as f32 / count as f32, RAMP_FLOOR))
            .collect()
    }

    /// Makes the previous end the new start and lays out the new end.
    fn retarget(&mut self) {
        std::mem::swap(&mut self.start_positions, &mut self.end_positions);
        std::mem::swap(&mut self.start_colors, &mut self.end_colors);
        self.end_positions = self.layout.place(self.count, self.spacing, self.width, self.height);
        self.end_colors = Self::colors(self.count, self.ramp);
    }

    /// Moves on to the next layout and ramp.
    pub fn advance(&mut self) {
        self.layout = self.layout.next();
        self.ramp = self.ramp.next();
        self.retarget();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn ramp(&self) -> Ramp {
        self.ramp
    }
}
