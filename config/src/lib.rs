//! MARLEY run configuration as typed Rust data.
//!
//! A MARLEY job is driven by a small configuration document: a random seed,
//! the target composition, the reaction-data files, the incident neutrino
//! spectrum, and the beam direction. This crate reads that document in the
//! relaxed JSON dialect MARLEY accepts, decodes it into [`RunConfig`],
//! checks its invariants, and writes it back out in canonical form.
//!
//! # Entry Point
//!
//! ```
//! let config: marley_config::RunConfig = r#"{
//!     seed: 123456,
//!     target: { nuclides: [ 1000180400 ], atom_fractions: [ 1.0 ] },
//!     reactions: [ "ve40ArCC_Bhattacharya2009.react" ],
//!     source: { type: "fermi-dirac", neutrino: "ve", Emin: 0, Emax: 60,
//!               temperature: 3.5, eta: 0 },
//!     direction: { x: 0.0, y: 0.0, z: 1.0 },
//! }"#
//! .parse()
//! .expect("valid configuration");
//! assert_eq!(config.target.nuclides[0].to_string(), "40Ar");
//! ```
//!
//! # Serialization
//!
//! ```
//! # let config: marley_config::RunConfig = include_str!("../data/supernova_ve40ar.js").parse().unwrap();
//! let json = marley_config::serializer::json::to_json(&config);
//! let native = marley_config::serializer::marley::to_marley(&config);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod decode;
pub mod error;
pub mod model;
pub mod nuclide;
pub mod reader;
pub mod serializer;
pub mod validate;

pub use decode::load;
pub use error::{ConfigError, Result};
pub use model::{
    BetaFit, Direction, FermiDirac, Grid, Histogram, InterpolationRule, Monoenergetic, Neutrino,
    ReactionFile, RunConfig, SpectrumSource, Target, TOP_LEVEL_FIELDS,
};
pub use nuclide::Nuclide;
pub use reader::parse_str;
pub use validate::{Violation, FRACTION_TOLERANCE};
