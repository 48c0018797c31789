//! Typed run-configuration model.
//!
//! These types mirror the five top-level sections of a MARLEY job
//! configuration. They are produced by [`RunConfig::from_value`] and are
//! immutable once built; a configuration is read once at start-up and
//! handed to the generator unchanged.

use std::fmt;

use serde::Deserialize;

use crate::nuclide::Nuclide;

/// Top-level keys of a run configuration, in canonical order.
pub const TOP_LEVEL_FIELDS: [&str; 5] = ["seed", "target", "reactions", "source", "direction"];

/// A complete MARLEY run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Random number generator seed.
    pub seed: u64,
    /// Target material composition.
    pub target: Target,
    /// Reaction-data files to load.
    pub reactions: Vec<ReactionFile>,
    /// Incident neutrino energy spectrum.
    pub source: SpectrumSource,
    /// Incident neutrino direction.
    pub direction: Direction,
}

/// Material composition as parallel arrays of nuclides and atom fractions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// Target nuclides.
    pub nuclides: Vec<Nuclide>,
    /// Atom fraction of each nuclide, same order as `nuclides`.
    pub atom_fractions: Vec<f64>,
}

impl Target {
    /// Builds a single-nuclide target.
    #[must_use]
    pub fn pure(nuclide: Nuclide) -> Self {
        Self {
            nuclides: vec![nuclide],
            atom_fractions: vec![1.0],
        }
    }

    /// Sum of all atom fractions.
    #[must_use]
    pub fn fraction_sum(&self) -> f64 {
        self.atom_fractions.iter().sum()
    }

    /// Iterates over `(nuclide, fraction)` pairs.
    pub fn components(&self) -> impl Iterator<Item = (Nuclide, f64)> + '_ {
        self.nuclides
            .iter()
            .copied()
            .zip(self.atom_fractions.iter().copied())
    }
}

/// Name of a reaction-data file, resolved by the consumer against its data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ReactionFile(pub String);

impl ReactionFile {
    /// The file name as written in the configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Neutrino flavor of the incident beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "NeutrinoRepr")]
pub enum Neutrino {
    /// Electron neutrino.
    ElectronNeutrino,
    /// Electron antineutrino.
    ElectronAntineutrino,
    /// Muon neutrino.
    MuonNeutrino,
    /// Muon antineutrino.
    MuonAntineutrino,
    /// Tau neutrino.
    TauNeutrino,
    /// Tau antineutrino.
    TauAntineutrino,
}

impl Neutrino {
    /// All flavors, in PDG order.
    pub const ALL: [Neutrino; 6] = [
        Neutrino::ElectronNeutrino,
        Neutrino::ElectronAntineutrino,
        Neutrino::MuonNeutrino,
        Neutrino::MuonAntineutrino,
        Neutrino::TauNeutrino,
        Neutrino::TauAntineutrino,
    ];

    /// Short tag used in configurations and reaction file names (`ve`, `vubar`, ...).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Neutrino::ElectronNeutrino => "ve",
            Neutrino::ElectronAntineutrino => "vebar",
            Neutrino::MuonNeutrino => "vu",
            Neutrino::MuonAntineutrino => "vubar",
            Neutrino::TauNeutrino => "vt",
            Neutrino::TauAntineutrino => "vtbar",
        }
    }

    /// PDG particle code.
    #[must_use]
    pub fn pdg(self) -> i64 {
        match self {
            Neutrino::ElectronNeutrino => 12,
            Neutrino::ElectronAntineutrino => -12,
            Neutrino::MuonNeutrino => 14,
            Neutrino::MuonAntineutrino => -14,
            Neutrino::TauNeutrino => 16,
            Neutrino::TauAntineutrino => -16,
        }
    }

    /// Parses a flavor tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.tag() == tag)
    }

    /// Parses a PDG code.
    #[must_use]
    pub fn from_pdg(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.pdg() == code)
    }
}

impl fmt::Display for Neutrino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NeutrinoRepr {
    Tag(String),
    Pdg(i64),
}

impl TryFrom<NeutrinoRepr> for Neutrino {
    type Error = String;

    fn try_from(repr: NeutrinoRepr) -> Result<Self, Self::Error> {
        match repr {
            NeutrinoRepr::Tag(tag) => Neutrino::from_tag(&tag).ok_or_else(|| {
                format!("unknown neutrino `{tag}`, expected one of ve, vebar, vu, vubar, vt, vtbar")
            }),
            NeutrinoRepr::Pdg(code) => Neutrino::from_pdg(code)
                .ok_or_else(|| format!("{code} is not a neutrino PDG code")),
        }
    }
}

/// Incident neutrino energy spectrum, selected by the `type` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SpectrumSource {
    /// Thermal Fermi-Dirac spectrum.
    #[serde(rename = "fermi-dirac", alias = "fd")]
    FermiDirac(FermiDirac),
    /// Single energy.
    #[serde(rename = "monoenergetic")]
    Monoenergetic(Monoenergetic),
    /// "Pinched" beta-fit spectrum.
    #[serde(rename = "beta-fit", alias = "bf")]
    BetaFit(BetaFit),
    /// Piecewise-constant histogram.
    #[serde(rename = "histogram")]
    Histogram(Histogram),
    /// Tabulated probability density with interpolation.
    #[serde(rename = "grid")]
    Grid(Grid),
}

impl SpectrumSource {
    /// Canonical `type` tags, in declaration order.
    pub const TYPES: [&'static str; 5] =
        ["fermi-dirac", "monoenergetic", "beta-fit", "histogram", "grid"];

    /// Canonical `type` tag of this source.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            SpectrumSource::FermiDirac(_) => "fermi-dirac",
            SpectrumSource::Monoenergetic(_) => "monoenergetic",
            SpectrumSource::BetaFit(_) => "beta-fit",
            SpectrumSource::Histogram(_) => "histogram",
            SpectrumSource::Grid(_) => "grid",
        }
    }

    /// Neutrino flavor emitted by the source.
    #[must_use]
    pub fn neutrino(&self) -> Neutrino {
        match self {
            SpectrumSource::FermiDirac(s) => s.neutrino,
            SpectrumSource::Monoenergetic(s) => s.neutrino,
            SpectrumSource::BetaFit(s) => s.neutrino,
            SpectrumSource::Histogram(s) => s.neutrino,
            SpectrumSource::Grid(s) => s.neutrino,
        }
    }

    /// Lowest and highest energy (MeV) the spectrum can produce.
    #[must_use]
    pub fn energy_range(&self) -> (f64, f64) {
        match self {
            SpectrumSource::FermiDirac(s) => (s.e_min, s.e_max),
            SpectrumSource::Monoenergetic(s) => (s.energy, s.energy),
            SpectrumSource::BetaFit(s) => (s.e_min, s.e_max),
            SpectrumSource::Histogram(s) => (
                s.bin_lefts.first().copied().unwrap_or(s.e_max),
                s.e_max,
            ),
            SpectrumSource::Grid(s) => (
                s.energies.first().copied().unwrap_or(0.0),
                s.energies.last().copied().unwrap_or(0.0),
            ),
        }
    }
}

/// Fermi-Dirac spectrum parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FermiDirac {
    /// Emitted flavor.
    pub neutrino: Neutrino,
    /// Lower energy cutoff (MeV).
    #[serde(rename = "Emin", default)]
    pub e_min: f64,
    /// Upper energy cutoff (MeV).
    #[serde(rename = "Emax")]
    pub e_max: f64,
    /// Effective temperature (MeV).
    pub temperature: f64,
    /// Degeneracy parameter.
    #[serde(default)]
    pub eta: f64,
}

/// Monoenergetic source parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Monoenergetic {
    /// Emitted flavor.
    pub neutrino: Neutrino,
    /// Neutrino energy (MeV).
    pub energy: f64,
}

/// Default pinching parameter of a beta-fit spectrum.
pub const DEFAULT_BETA: f64 = 4.0;

fn default_beta() -> f64 {
    DEFAULT_BETA
}

/// Beta-fit spectrum parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetaFit {
    /// Emitted flavor.
    pub neutrino: Neutrino,
    /// Lower energy cutoff (MeV).
    #[serde(rename = "Emin", default)]
    pub e_min: f64,
    /// Upper energy cutoff (MeV).
    #[serde(rename = "Emax")]
    pub e_max: f64,
    /// Mean energy (MeV).
    #[serde(rename = "Emean")]
    pub e_mean: f64,
    /// Pinching parameter.
    #[serde(default = "default_beta")]
    pub beta: f64,
}

/// Histogram spectrum: bin `i` spans `[E_bin_lefts[i], E_bin_lefts[i + 1])`,
/// the last bin ends at `Emax`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Histogram {
    /// Emitted flavor.
    pub neutrino: Neutrino,
    /// Left bin edges (MeV).
    #[serde(rename = "E_bin_lefts")]
    pub bin_lefts: Vec<f64>,
    /// Relative bin weights.
    pub weights: Vec<f64>,
    /// Right edge of the last bin (MeV).
    #[serde(rename = "Emax")]
    pub e_max: f64,
}

/// Interpolation rule between grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationRule {
    /// Linear in energy, linear in density.
    #[default]
    LinLin,
    /// Logarithmic in energy, linear in density.
    LogLin,
    /// Linear in energy, logarithmic in density.
    LinLog,
    /// Logarithmic in both.
    LogLog,
    /// Histogram-like constant steps.
    Const,
}

impl InterpolationRule {
    /// Configuration tag of this rule.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InterpolationRule::LinLin => "linlin",
            InterpolationRule::LogLin => "loglin",
            InterpolationRule::LinLog => "linlog",
            InterpolationRule::LogLog => "loglog",
            InterpolationRule::Const => "const",
        }
    }
}

/// Tabulated spectrum.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grid {
    /// Emitted flavor.
    pub neutrino: Neutrino,
    /// Grid energies (MeV).
    pub energies: Vec<f64>,
    /// Probability density at each energy.
    pub prob_densities: Vec<f64>,
    /// Interpolation rule.
    #[serde(default)]
    pub rule: InterpolationRule,
}

/// Beam direction. The consumer normalizes it, so only the orientation matters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Direction {
    /// x component.
    pub x: f64,
    /// y component.
    pub y: f64,
    /// z component.
    pub z: f64,
}

impl Direction {
    /// The +z axis.
    pub const PLUS_Z: Direction = Direction {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Euclidean norm, computed without intermediate overflow or underflow.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Returns true when at least one component is non-zero.
    #[must_use]
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }

    /// Returns the unit vector with the same orientation, or `None` for a
    /// zero or non-finite vector.
    #[must_use]
    pub fn normalized(self) -> Option<Direction> {
        let finite = self.x.is_finite() && self.y.is_finite() && self.z.is_finite();
        if !finite || !self.is_nonzero() {
            return None;
        }
        // Scale into [-1, 1] first so tiny and huge vectors both survive.
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        let scaled = Direction {
            x: self.x / scale,
            y: self.y / scale,
            z: self.z / scale,
        };
        let n = scaled.norm();
        Some(Direction {
            x: scaled.x / n,
            y: scaled.y / n,
            z: scaled.z / n,
        })
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::PLUS_Z
    }
}
