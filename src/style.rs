//! Pens, weight bands, and style resolution.
//!
//! The pipeline never looks up colors or dashes. It only needs to know which
//! pen a point is drawn with and the few pen attributes that change geometry.

/// Identifier of a pen in a [`PenPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StyleId(pub u16);

impl StyleId {
    /// The series' normal pen.
    pub const NORMAL: Self = Self(0);
}

/// Geometry-affecting pen attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Stroke width in pixels. Zero draws symbols only.
    pub line_width: f32,
    /// Symbol size in pixels.
    pub symbol_size: f32,
    /// Error-bar cap width. Falls back to the symbol size.
    pub error_bar_cap_width: Option<f32>,
}

impl Pen {
    /// Check whether the pen strokes polylines at all.
    pub fn draws_lines(&self) -> bool {
        self.line_width > 0.0
    }

    /// Width of error-bar caps.
    pub fn cap_width(&self) -> f32 {
        self.error_bar_cap_width.unwrap_or(self.symbol_size)
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            symbol_size: 4.0,
            error_bar_cap_width: None,
        }
    }
}

/// Half-open weight interval `[min, max)` mapped to a pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleBand {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
    /// Pen used for weights in the band.
    pub style: StyleId,
}

impl StyleBand {
    /// Create a band.
    pub fn new(min: f64, max: f64, style: StyleId) -> Self {
        Self { min, max, style }
    }

    /// Check whether a weight falls in the band.
    pub fn contains(&self, weight: f64) -> bool {
        weight >= self.min && weight < self.max
    }
}

/// Resolve a point weight into a pen.
pub trait WeightLookup {
    /// Pen for `weight`.
    fn lookup(&self, weight: f64) -> StyleId;
}

impl<F> WeightLookup for F
where
    F: Fn(f64) -> StyleId,
{
    fn lookup(&self, weight: f64) -> StyleId {
        self(weight)
    }
}

/// Pens of a series plus the weight bands that select among them.
#[derive(Debug, Clone, PartialEq)]
pub struct PenPalette {
    pens: Vec<Pen>,
    bands: Vec<StyleBand>,
}

impl PenPalette {
    /// Create a palette whose normal pen is `normal`.
    pub fn new(normal: Pen) -> Self {
        Self {
            pens: vec![normal],
            bands: Vec::new(),
        }
    }

    /// Register another pen.
    pub fn add_pen(&mut self, pen: Pen) -> StyleId {
        let id = StyleId(self.pens.len() as u16);
        self.pens.push(pen);
        id
    }

    /// Register a weight band. Later bands take priority.
    pub fn add_band(&mut self, band: StyleBand) {
        self.bands.push(band);
    }

    /// Register a weight band, builder style.
    pub fn with_band(mut self, min: f64, max: f64, style: StyleId) -> Self {
        self.add_band(StyleBand::new(min, max, style));
        self
    }

    /// Access a pen. Unknown ids resolve to the normal pen.
    pub fn pen(&self, style: StyleId) -> &Pen {
        self.pens
            .get(style.0 as usize)
            .unwrap_or(&self.pens[0])
    }

    /// Registered bands in registration order.
    pub fn bands(&self) -> &[StyleBand] {
        &self.bands
    }
}

impl Default for PenPalette {
    fn default() -> Self {
        Self::new(Pen::default())
    }
}

impl WeightLookup for PenPalette {
    /// The last-registered band containing `weight` wins.
    fn lookup(&self, weight: f64) -> StyleId {
        if !weight.is_finite() {
            return StyleId::NORMAL;
        }
        self.bands
            .iter()
            .rev()
            .find(|band| band.contains(weight))
            .map_or(StyleId::NORMAL, |band| band.style)
    }
}
