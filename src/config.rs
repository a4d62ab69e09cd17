//! Run options and the per-run layout configuration derived from them.
//!
//! [`RoofOptions`] holds the values as a user enters them, in the chosen
//! unit. [`RoofOptions::layout_config`] validates them, converts lengths to
//! document units (CSS pixels) and applies the clamping rules, producing the
//! immutable [`LayoutConfig`] every generator reads.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::operations::{ScoreSpec, TabSpec};

/// Fewest sides a curved dormer top may have.
pub const MIN_SIDES: usize = 2;
/// Most sides a curved dormer top may have.
pub const MAX_SIDES: usize = 60;

const TAB_HEIGHT: f64 = 0.25;
const TAB_ANGLE: f64 = 45.0;
const DASH_LENGTH: f64 = 0.1;

/// Unit of measure of every length option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Inch,
    Millimeter,
    Centimeter,
    Point,
    Pica,
    Pixel,
}

impl Unit {
    /// Document units (CSS pixels at 96 dpi) per one of this unit.
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Inch => 96.0,
            Self::Millimeter => 96.0 / 25.4,
            Self::Centimeter => 96.0 / 2.54,
            Self::Point => 96.0 / 72.0,
            Self::Pica => 16.0,
            Self::Pixel => 1.0,
        }
    }
}

impl FromStr for Unit {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Self::Inch),
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "pt" => Ok(Self::Point),
            "pc" => Ok(Self::Pica),
            "px" => Ok(Self::Pixel),
            other => Err(ConfigError::UnknownUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Inch => "in",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Pixel => "px",
        };
        f.write_str(s)
    }
}

/// How score lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreStyle {
    #[default]
    Dash,
    Solid,
}

impl FromStr for ScoreStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "dash" => Ok(Self::Dash),
            "solid" => Ok(Self::Solid),
            other => Err(ConfigError::UnknownScoreStyle(other.to_owned())),
        }
    }
}

/// User-facing options for one run, lengths in [`RoofOptions::unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoofOptions {
    pub unit: Unit,
    pub score_style: ScoreStyle,
    /// Gambrel ("barn") roof instead of a plain gable.
    pub barn: bool,
    /// Roof length along the ridge.
    pub roof_width: f64,
    /// Roof footprint across the ridge.
    pub roof_depth: f64,
    /// Height of the ridge above the eaves.
    pub roof_peak: f64,
    /// How far the hip ends cut into the ridge from each end.
    pub roof_inset: f64,
    /// Border kept around the vent cut into the roof base.
    pub base_cutout: f64,
    /// Height of the secondary ridge as a fraction of the peak.
    pub barn_height_ratio: f64,
    /// Horizontal position of the secondary ridge as a fraction of half the depth.
    pub barn_depth_ratio: f64,
    /// Total dormer height; zero disables the dormer.
    pub dormer_height: f64,
    /// Height of the curved dormer top; zero gives a flat-topped dormer.
    pub dormer_top_height: f64,
    pub dormer_width: f64,
    /// Number of straight sides approximating the dormer top.
    pub sides: usize,
    /// How far the dormer front extends below its roof opening.
    pub stickout: f64,
    /// Window frame width as a fraction of the dormer width.
    pub window_frame: f64,
    /// Zero for any chimney dimension disables the chimney.
    pub chimney_height: f64,
    pub chimney_width: f64,
    pub chimney_depth: f64,
    /// Share of the chimney depth on the front slope, 0 to 1.
    pub off_center: f64,
    /// Factor applied to chimney tab size and dash length.
    pub shrink: f64,
    /// Paper thickness; opening templates are adjusted by twice this.
    pub paper: f64,
}

impl Default for RoofOptions {
    fn default() -> Self {
        Self {
            unit: Unit::Inch,
            score_style: ScoreStyle::Dash,
            barn: false,
            roof_width: 7.0,
            roof_depth: 3.0,
            roof_peak: 2.0,
            roof_inset: 1.0,
            base_cutout: 1.0,
            barn_height_ratio: 0.2,
            barn_depth_ratio: 0.4,
            dormer_height: 1.5,
            dormer_top_height: 0.5,
            dormer_width: 1.0,
            sides: 12,
            stickout: 0.0,
            window_frame: 0.125,
            chimney_height: 1.0,
            chimney_width: 1.0,
            chimney_depth: 0.75,
            off_center: 0.5,
            shrink: 0.67,
            paper: 0.01,
        }
    }
}

impl RoofOptions {
    /// Checks the options for values no layout can be built from.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NegativeDimension` for a negative length,
    /// `ConfigError::TooFewSides` / `ConfigError::OutOfRange` for a side count
    /// outside `2..=60` on a curved dormer top, and `ConfigError::OutOfRange`
    /// for barn ratios outside `(0, 1)`, a zero roof footprint or an inset
    /// that leaves no ridge.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("roof_width", self.roof_width),
            ("roof_depth", self.roof_depth),
            ("roof_peak", self.roof_peak),
            ("roof_inset", self.roof_inset),
            ("base_cutout", self.base_cutout),
            ("dormer_height", self.dormer_height),
            ("dormer_top_height", self.dormer_top_height),
            ("dormer_width", self.dormer_width),
            ("stickout", self.stickout),
            ("window_frame", self.window_frame),
            ("chimney_height", self.chimney_height),
            ("chimney_width", self.chimney_width),
            ("chimney_depth", self.chimney_depth),
            ("shrink", self.shrink),
            ("paper", self.paper),
        ];
        for (name, value) in lengths {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::NegativeDimension { name, value }.into());
            }
        }

        for (name, value) in [
            ("roof_width", self.roof_width),
            ("roof_depth", self.roof_depth),
            ("roof_peak", self.roof_peak),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    min: f64::MIN_POSITIVE,
                    max: f64::INFINITY,
                }
                .into());
            }
        }

        if 2.0 * self.roof_inset >= self.roof_width {
            return Err(ConfigError::OutOfRange {
                name: "roof_inset",
                value: self.roof_inset,
                min: 0.0,
                max: self.roof_width / 2.0,
            }
            .into());
        }

        for (name, value) in [
            ("barn_height_ratio", self.barn_height_ratio),
            ("barn_depth_ratio", self.barn_depth_ratio),
        ] {
            // Both slopes of a gambrel need a run and a drop.
            if self.barn && (value <= 0.0 || value >= 1.0) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max: 1.0,
                }
                .into());
            }
        }

        if self.has_curved_dormer_top() {
            if self.sides < MIN_SIDES {
                return Err(ConfigError::TooFewSides {
                    sides: self.sides,
                    min: MIN_SIDES,
                }
                .into());
            }
            if self.sides > MAX_SIDES {
                #[allow(clippy::cast_precision_loss)]
                let err = ConfigError::OutOfRange {
                    name: "sides",
                    value: self.sides as f64,
                    min: MIN_SIDES as f64,
                    max: MAX_SIDES as f64,
                };
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn has_dormer(&self) -> bool {
        self.dormer_height > 0.0
    }

    fn has_curved_dormer_top(&self) -> bool {
        self.has_dormer() && self.dormer_top_height > 0.0
    }

    fn has_chimney(&self) -> bool {
        self.chimney_height > 0.0 && self.chimney_width > 0.0 && self.chimney_depth > 0.0
    }

    /// Validates the options and derives the run's [`LayoutConfig`].
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`RoofOptions::validate`].
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        self.validate()?;
        let scale = self.unit.scale();

        let tab = TabSpec::new(TAB_HEIGHT * scale, TAB_ANGLE);
        let score = match self.score_style {
            ScoreStyle::Dash => ScoreSpec::new(DASH_LENGTH * scale),
            ScoreStyle::Solid => ScoreSpec::solid(),
        };

        let width = self.roof_width * scale;
        let depth = self.roof_depth * scale;

        // The vent keeps at least a tab's width of border and disappears when
        // the border would leave no opening.
        let mut base_cutout = self.base_cutout * scale;
        if base_cutout < tab.height {
            debug!(
                requested = base_cutout,
                used = tab.height,
                "base cutout raised to tab height"
            );
            base_cutout = tab.height;
        }
        if base_cutout >= (width / 2.0).min(depth / 2.0) {
            debug!(base_cutout, "base cutout leaves no opening, vent dropped");
            base_cutout = 0.0;
        }

        let barn = self.barn.then_some(BarnRatios {
            height: self.barn_height_ratio,
            depth: self.barn_depth_ratio,
        });

        let dormer = self.has_dormer().then(|| {
            let height = self.dormer_height * scale;
            let mut top_height = self.dormer_top_height * scale;
            if top_height > height {
                debug!(
                    top_height,
                    height,
                    "dormer top height clamped to dormer height"
                );
                top_height = height;
            }
            let width = self.dormer_width * scale;
            let half_width = width / 2.0;
            let mut window_inset = self.window_frame * width;
            if window_inset > half_width || window_inset > 0.5 * height {
                window_inset = self.window_frame * (0.75 * half_width).min(height);
                debug!(window_inset, "window frame narrowed to fit the dormer");
            }
            DormerConfig {
                height,
                top_height,
                width,
                sides: self.sides,
                stickout: self.stickout * scale,
                window_inset,
            }
        });

        let chimney = self.has_chimney().then(|| {
            let off_center = self.off_center.clamp(0.0, 1.0);
            if (off_center - self.off_center).abs() > 0.0 {
                debug!(
                    requested = self.off_center,
                    off_center,
                    "chimney off-center clamped"
                );
            }
            ChimneyConfig {
                height: self.chimney_height * scale,
                width: self.chimney_width * scale,
                depth: self.chimney_depth * scale,
                off_center,
            }
        });

        Ok(LayoutConfig {
            scale,
            width,
            depth,
            peak: self.roof_peak * scale,
            inset: self.roof_inset * scale,
            base_cutout,
            barn,
            dormer,
            chimney,
            tab,
            score,
            shrink: self.shrink,
            paper: self.paper * scale * 2.0,
        })
    }
}

/// Secondary-ridge placement of a gambrel roof.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnRatios {
    /// Drop of the secondary ridge below the peak, as a fraction of the peak.
    pub height: f64,
    /// Horizontal run of the lower slope, as a fraction of half the depth.
    pub depth: f64,
}

/// Dormer dimensions in document units, already clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DormerConfig {
    pub height: f64,
    /// Never more than `height`.
    pub top_height: f64,
    pub width: f64,
    pub sides: usize,
    pub stickout: f64,
    /// Frame left around the window cut into the dormer front.
    pub window_inset: f64,
}

impl DormerConfig {
    /// Height of the rectangular part below the curved top.
    #[must_use]
    pub fn base_height(&self) -> f64 {
        self.height - self.top_height
    }
}

/// Chimney dimensions in document units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimneyConfig {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    /// Clamped to `[0, 1]`.
    pub off_center: f64,
}

/// Everything the layout generators need for one run, in document units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Document units per user unit.
    pub scale: f64,
    pub width: f64,
    pub depth: f64,
    pub peak: f64,
    pub inset: f64,
    /// Vent border in the roof base; zero when there is no vent.
    pub base_cutout: f64,
    pub barn: Option<BarnRatios>,
    pub dormer: Option<DormerConfig>,
    pub chimney: Option<ChimneyConfig>,
    pub tab: TabSpec,
    pub score: ScoreSpec,
    pub shrink: f64,
    /// Paper compensation applied to opening templates.
    pub paper: f64,
}
