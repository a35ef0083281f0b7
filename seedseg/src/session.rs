//! Staged segmentation pipeline
//!
//! A [`SegmentationSession`] owns one color image and the masks derived
//! from it. Stages must run in order:
//!
//! ```text
//! Empty --load--> Loaded --compute_region--> RegionReady
//!       --compute_perimeter--> PerimeterReady --smooth_perimeter--> PerimeterReady (smoothed)
//! ```
//!
//! Every operation is transactional: results are computed into locals
//! and committed only on success, so a failing call leaves flags and
//! buffers exactly as they were.

use crate::error::{Prerequisite, SessionError, SessionResult};
use log::{debug, info, warn};
use seedseg_core::{ImageFormat, Pix};
use seedseg_filter::smooth_gaussian;
use seedseg_morph::extract_perimeter;
use seedseg_region::{DEFAULT_TOLERANCE, GrowOptions, RegionError, grow_region};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which derived mask to read or save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    Region,
    Perimeter,
}

impl OutputType {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            OutputType::Region => "region",
            OutputType::Perimeter => "perimeter",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "region" => Ok(OutputType::Region),
            "perimeter" => Ok(OutputType::Perimeter),
            other => Err(format!("unknown output type: {other:?}")),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Tolerance used by [`SegmentationSession::compute_region_default`]
    pub default_tolerance: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SessionConfig {
    /// Set the default tolerance
    pub fn with_default_tolerance(mut self, tolerance: u32) -> Self {
        self.default_tolerance = tolerance;
        self
    }
}

/// Pipeline stage reached by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// A color image is loaded
    Loaded,
    /// A region mask exists for the loaded image
    RegionReady,
    /// A perimeter exists for the current region
    PerimeterReady {
        /// The perimeter has been smoothed at least once
        smoothed: bool,
    },
}

impl Stage {
    pub fn is_loaded(self) -> bool {
        !matches!(self, Stage::Empty)
    }

    pub fn is_region_ready(self) -> bool {
        matches!(self, Stage::RegionReady | Stage::PerimeterReady { .. })
    }

    pub fn is_perimeter_ready(self) -> bool {
        matches!(self, Stage::PerimeterReady { .. })
    }

    pub fn is_perimeter_smoothed(self) -> bool {
        matches!(self, Stage::PerimeterReady { smoothed: true })
    }
}

/// Seeded segmentation session
///
/// # Example
///
/// ```
/// use seedseg::{Channels, ColorSample, PixMut, SegmentationSession, Status};
///
/// let mut pm = PixMut::new(10, 10, Channels::Rgb).unwrap();
/// pm.fill_color(ColorSample::new(255, 255, 255)).unwrap();
///
/// let mut session = SegmentationSession::new();
/// let err = session.compute_perimeter().unwrap_err();
/// assert_eq!(err.status(), Status::NotReady);
///
/// session.load(pm.into()).unwrap();
/// let err = session.compute_region(100, 100, 5).unwrap_err();
/// assert_eq!(err.status(), Status::SeedOutOfRange);
/// ```
#[derive(Debug, Default)]
pub struct SegmentationSession {
    config: SessionConfig,
    stage: Stage,
    input: Option<Pix>,
    region: Option<Pix>,
    perimeter: Option<Pix>,
}

impl SegmentationSession {
    /// Create an empty session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_loaded(&self) -> bool {
        self.stage.is_loaded()
    }

    pub fn is_region_ready(&self) -> bool {
        self.stage.is_region_ready()
    }

    pub fn is_perimeter_ready(&self) -> bool {
        self.stage.is_perimeter_ready()
    }

    pub fn is_perimeter_smoothed(&self) -> bool {
        self.stage.is_perimeter_smoothed()
    }

    /// The loaded color image, if any.
    pub fn input(&self) -> Option<&Pix> {
        self.input.as_ref()
    }

    /// The requested mask, if its stage has been reached.
    pub fn mask(&self, output: OutputType) -> Option<&Pix> {
        match output {
            OutputType::Region => self.region.as_ref(),
            OutputType::Perimeter => self.perimeter.as_ref(),
        }
    }

    /// Load a color image, discarding all derived masks.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidImage`] if `pix` is not 3-channel.
    /// The previous image and masks are kept in that case.
    pub fn load(&mut self, pix: Pix) -> SessionResult<()> {
        if pix.channels().count() != 3 {
            warn!(
                "load rejected: {} channel(s), expected 3",
                pix.channels().count()
            );
            return Err(SessionError::InvalidImage(format!(
                "expected a 3-channel color image, got {} channel(s)",
                pix.channels().count()
            )));
        }

        info!("image loaded: {}x{}", pix.width(), pix.height());
        self.input = Some(pix);
        self.region = None;
        self.perimeter = None;
        self.stage = Stage::Loaded;
        Ok(())
    }

    /// Decode an image file and load it.
    ///
    /// Grayscale files are expanded to color.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidImage`] if the file cannot be read
    /// or decoded.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> SessionResult<()> {
        let path = path.as_ref();
        let decoded = seedseg_io::read_image(path).map_err(|e| {
            warn!("cannot decode {}: {}", path.display(), e);
            SessionError::InvalidImage(format!("{}: {}", path.display(), e))
        })?;
        let color = decoded
            .to_rgb()
            .map_err(|e| SessionError::internal("load_path", e))?;
        self.load(color)
    }

    /// Grow the region mask from a seed using the configured default
    /// tolerance.
    pub fn compute_region_default(&mut self, seed_x: i64, seed_y: i64) -> SessionResult<()> {
        self.compute_region(seed_x, seed_y, self.config.default_tolerance)
    }

    /// Grow the region mask from a seed.
    ///
    /// `seed_x` is the column and `seed_y` the row of the seed pixel. Any
    /// previous perimeter is discarded on success.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotReady`] if no image is loaded
    /// - [`SessionError::SeedOutOfRange`] if the seed is negative or
    ///   outside the image
    pub fn compute_region(&mut self, seed_x: i64, seed_y: i64, tolerance: u32) -> SessionResult<()> {
        const OP: &str = "compute_region";
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| SessionError::not_ready(OP, Prerequisite::Image))?;

        let out_of_range = || SessionError::SeedOutOfRange {
            x: seed_x,
            y: seed_y,
            width: input.width(),
            height: input.height(),
        };
        let (Ok(x), Ok(y)) = (u32::try_from(seed_x), u32::try_from(seed_y)) else {
            warn!("seed ({}, {}) rejected: negative coordinate", seed_x, seed_y);
            return Err(out_of_range());
        };

        let region = match grow_region(input, x, y, &GrowOptions::new(tolerance)) {
            Ok(region) => region,
            Err(RegionError::SeedOutOfRange { .. }) => {
                warn!(
                    "seed ({}, {}) outside {}x{} image",
                    seed_x,
                    seed_y,
                    input.width(),
                    input.height()
                );
                return Err(out_of_range());
            }
            Err(e) => return Err(SessionError::internal(OP, e)),
        };

        info!(
            "region computed from seed ({}, {}) tolerance {}: {} pixels",
            seed_x,
            seed_y,
            tolerance,
            region.count_foreground()
        );
        self.region = Some(region);
        self.perimeter = None;
        self.stage = Stage::RegionReady;
        Ok(())
    }

    /// Extract the perimeter of the current region.
    ///
    /// Replaces any previous (possibly smoothed) perimeter.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] if no region has been computed.
    pub fn compute_perimeter(&mut self) -> SessionResult<()> {
        const OP: &str = "compute_perimeter";
        let region = self.require_region(OP)?;
        let perimeter = extract_perimeter(region).map_err(|e| SessionError::internal(OP, e))?;

        info!("perimeter computed: {} pixels", perimeter.count_foreground());
        self.perimeter = Some(perimeter);
        self.stage = Stage::PerimeterReady { smoothed: false };
        Ok(())
    }

    /// Smooth the current perimeter in place.
    ///
    /// Smoothing an already smoothed perimeter filters it again.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] if no perimeter has been computed.
    pub fn smooth_perimeter(&mut self) -> SessionResult<()> {
        const OP: &str = "smooth_perimeter";
        self.require_region(OP)?;
        let perimeter = match (&self.perimeter, self.stage.is_perimeter_ready()) {
            (Some(p), true) => p,
            _ => return Err(self.reject(OP, Prerequisite::Perimeter)),
        };
        let smoothed = smooth_gaussian(perimeter).map_err(|e| SessionError::internal(OP, e))?;

        info!("perimeter smoothed");
        self.perimeter = Some(smoothed);
        self.stage = Stage::PerimeterReady { smoothed: true };
        Ok(())
    }

    /// Write a mask to `path`, choosing the format from the extension.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotReady`] if the mask's stage has not been reached
    /// - [`SessionError::Save`] if the extension is not a supported image
    ///   format or the file cannot be written
    pub fn save_mask<P: AsRef<Path>>(&self, output: OutputType, path: P) -> SessionResult<()> {
        const OP: &str = "save_mask";
        let path = path.as_ref();
        let mask = match output {
            OutputType::Region => self.require_region(OP)?,
            OutputType::Perimeter => {
                self.require_region(OP)?;
                self.perimeter
                    .as_ref()
                    .ok_or_else(|| self.reject(OP, Prerequisite::Perimeter))?
            }
        };

        let format = ImageFormat::from_path(path);
        seedseg_io::write_image(mask, path, format).map_err(|source| {
            warn!("cannot save {} to {}: {}", output, path.display(), source);
            SessionError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("saved {} mask to {}", output, path.display());
        Ok(())
    }

    /// Region mask, or the first missing prerequisite.
    fn require_region(&self, operation: &'static str) -> SessionResult<&Pix> {
        if !self.stage.is_loaded() {
            return Err(self.reject(operation, Prerequisite::Image));
        }
        match (&self.region, self.stage.is_region_ready()) {
            (Some(region), true) => Ok(region),
            _ => Err(self.reject(operation, Prerequisite::Region)),
        }
    }

    fn reject(&self, operation: &'static str, missing: Prerequisite) -> SessionError {
        warn!("{} rejected in stage {:?}: requires {}", operation, self.stage, missing);
        SessionError::not_ready(operation, missing)
    }
}
