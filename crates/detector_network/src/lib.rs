//! # Detector Network
//!
//! Detector-side physics for the null-stream pipeline.
//!
//! Responsibilities:
//! - Site geometry on the WGS-84 ellipsoid: vertices, arm directions,
//!   detector tensors
//! - Antenna responses and geometric arrival delays toward a sky position
//! - GPS to Greenwich mean sidereal time (IAU 1982)
//! - Network presets and per-event channel assembly
//! - Synthetic waveform injection with optional seeded Gaussian noise
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::ScenarioBlueprint;
//! use detector_network::{ChannelSource, SyntheticSource};
//!
//! let blueprint: ScenarioBlueprint = load_scenario()?;
//! let mut source = SyntheticSource::from_blueprint(&blueprint)?;
//! let channels = source.channels()?;
//! ```

pub mod antenna;
pub mod geometry;
pub mod injection;
pub mod network;
pub mod sidereal;
pub mod source;

pub use geometry::{DetectorGeometry, SPEED_OF_LIGHT, WGS84_A, WGS84_B};
pub use injection::{Impulse, Injector, SineGaussian, Waveform};
pub use network::{DetectorNetwork, DetectorSite};
pub use sidereal::gmst_rad;
pub use source::{ChannelSource, SyntheticSource};
