//! # Contracts
//!
//! Shared data contracts for the null-stream workspace. Every other crate
//! depends on this one and nothing here depends back, so the types below
//! are the stable vocabulary of the pipeline:
//!
//! - [`DetectorChannel`]: one detector's strain series with its time axis,
//!   arrival delay and antenna response
//! - [`ScenarioBlueprint`]: serializable scenario description loaded from
//!   TOML or JSON
//! - [`NullStreamConfig`]: runtime tuning derived from a blueprint
//! - [`NullStreamError`]: the workspace-wide error taxonomy
//!
//! ## Conventions
//!
//! Detector index 0 is the reference: its delay is zero and its time axis
//! is the grid every other channel is resampled onto. Angles in blueprints
//! are degrees for site geometry and radians for sky coordinates, matching
//! the catalogue conventions each side of the pipeline works in.

pub mod blueprint;
pub mod channel;
pub mod config;
pub mod error;

pub use blueprint::{
    ConfigVersion, EngineConfig, InjectionConfig, NetworkConfig, NetworkPreset,
    SamplingConfig, ScenarioBlueprint, ScenarioInfo, SiteSpec, SkyConfig, WaveformKind,
};
pub use channel::DetectorChannel;
pub use config::NullStreamConfig;
pub use error::NullStreamError;
