//! Physical and structural invariants of a decoded [`RunConfig`].
//!
//! Decoding guarantees shape and value types; this module checks the
//! relationships between values: parallel array lengths, fraction
//! normalization, energy ordering, positivity, and a usable direction.

use std::collections::HashSet;
use std::fmt;

use crate::error::{ConfigError, Result};
use crate::model::{
    BetaFit, Direction, FermiDirac, Grid, Histogram, Monoenergetic, RunConfig, SpectrumSource,
    Target,
};

/// Allowed deviation of the atom-fraction sum from 1.
pub const FRACTION_TOLERANCE: f64 = 1e-9;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<Violation> for ConfigError {
    fn from(v: Violation) -> Self {
        ConfigError::Invalid {
            field: v.field,
            message: v.message,
        }
    }
}

impl RunConfig {
    /// Returns every broken invariant, in document order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = target_violations(&self.target);
        if self.reactions.is_empty() {
            out.push(Violation::new("reactions", "at least one reaction file is required"));
        }
        for (i, reaction) in self.reactions.iter().enumerate() {
            if reaction.as_str().trim().is_empty() {
                out.push(Violation::new(format!("reactions[{i}]"), "file name is empty"));
            }
        }
        out.extend(source_violations(&self.source));
        out.extend(direction_violations(self.direction));
        out
    }

    /// Checks every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        match self.violations().into_iter().next() {
            Some(v) => Err(v.into()),
            None => Ok(()),
        }
    }
}

/// Invariants of the target composition.
#[must_use]
pub fn target_violations(target: &Target) -> Vec<Violation> {
    let mut out = Vec::new();
    if target.nuclides.is_empty() {
        out.push(Violation::new("target.nuclides", "at least one nuclide is required"));
    }
    if target.nuclides.len() != target.atom_fractions.len() {
        out.push(Violation::new(
            "target.atom_fractions",
            format!(
                "{} fractions given for {} nuclides",
                target.atom_fractions.len(),
                target.nuclides.len()
            ),
        ));
    }
    let mut seen = HashSet::new();
    for nuclide in &target.nuclides {
        if !seen.insert(*nuclide) {
            out.push(Violation::new(
                "target.nuclides",
                format!("{nuclide} ({}) listed more than once", nuclide.code()),
            ));
        }
    }
    for (i, f) in target.atom_fractions.iter().enumerate() {
        if !f.is_finite() || *f < 0.0 {
            out.push(Violation::new(
                format!("target.atom_fractions[{i}]"),
                format!("fraction {f} must be finite and non-negative"),
            ));
        }
    }
    let sum = target.fraction_sum();
    if !target.atom_fractions.is_empty() && (sum - 1.0).abs() > FRACTION_TOLERANCE {
        out.push(Violation::new(
            "target.atom_fractions",
            format!("fractions sum to {sum}, expected 1 (tolerance {FRACTION_TOLERANCE:e})"),
        ));
    }
    out
}

/// Invariants of the energy spectrum.
#[must_use]
pub fn source_violations(source: &SpectrumSource) -> Vec<Violation> {
    let mut out = Vec::new();
    match source {
        SpectrumSource::FermiDirac(s) => fermi_dirac(s, &mut out),
        SpectrumSource::Monoenergetic(s) => monoenergetic(s, &mut out),
        SpectrumSource::BetaFit(s) => beta_fit(s, &mut out),
        SpectrumSource::Histogram(s) => histogram(s, &mut out),
        SpectrumSource::Grid(s) => grid(s, &mut out),
    }
    out
}

/// Invariants of the beam direction.
#[must_use]
pub fn direction_violations(direction: Direction) -> Vec<Violation> {
    let mut out = Vec::new();
    for (axis, c) in [("x", direction.x), ("y", direction.y), ("z", direction.z)] {
        if !c.is_finite() {
            out.push(Violation::new(format!("direction.{axis}"), "component must be finite"));
        }
    }
    if out.is_empty() && !direction.is_nonzero() {
        out.push(Violation::new("direction", "direction vector must be non-zero"));
    }
    out
}

fn finite(field: &str, value: f64, out: &mut Vec<Violation>) -> bool {
    if value.is_finite() {
        return true;
    }
    out.push(Violation::new(format!("source.{field}"), "value must be finite"));
    false
}

fn positive(field: &str, value: f64, out: &mut Vec<Violation>) {
    if finite(field, value, out) && value <= 0.0 {
        out.push(Violation::new(
            format!("source.{field}"),
            format!("{field} = {value} must be > 0"),
        ));
    }
}

fn energy_window(e_min: f64, e_max: f64, out: &mut Vec<Violation>) {
    let ok_min = finite("Emin", e_min, out);
    let ok_max = finite("Emax", e_max, out);
    if !(ok_min && ok_max) {
        return;
    }
    if e_min < 0.0 {
        out.push(Violation::new("source.Emin", format!("Emin = {e_min} must be >= 0")));
    }
    if e_min >= e_max {
        out.push(Violation::new(
            "source.Emax",
            format!("Emax = {e_max} must exceed Emin = {e_min}"),
        ));
    }
}

fn fermi_dirac(s: &FermiDirac, out: &mut Vec<Violation>) {
    energy_window(s.e_min, s.e_max, out);
    positive("temperature", s.temperature, out);
    finite("eta", s.eta, out);
}

fn monoenergetic(s: &Monoenergetic, out: &mut Vec<Violation>) {
    positive("energy", s.energy, out);
}

fn beta_fit(s: &BetaFit, out: &mut Vec<Violation>) {
    energy_window(s.e_min, s.e_max, out);
    if finite("Emean", s.e_mean, out) && !(s.e_min < s.e_mean && s.e_mean < s.e_max) {
        out.push(Violation::new(
            "source.Emean",
            format!(
                "Emean = {} must lie strictly between Emin = {} and Emax = {}",
                s.e_mean, s.e_min, s.e_max
            ),
        ));
    }
    positive("beta", s.beta, out);
}

fn histogram(s: &Histogram, out: &mut Vec<Violation>) {
    if s.bin_lefts.is_empty() {
        out.push(Violation::new("source.E_bin_lefts", "at least one bin is required"));
        return;
    }
    if s.bin_lefts.len() != s.weights.len() {
        out.push(Violation::new(
            "source.weights",
            format!("{} weights given for {} bins", s.weights.len(), s.bin_lefts.len()),
        ));
    }
    ascending_energies("E_bin_lefts", &s.bin_lefts, out);
    if let Some(last) = s.bin_lefts.last() {
        if finite("Emax", s.e_max, out) && s.e_max <= *last {
            out.push(Violation::new(
                "source.Emax",
                format!("Emax = {} must exceed the last bin edge {last}", s.e_max),
            ));
        }
    }
    weights("weights", &s.weights, out);
}

fn grid(s: &Grid, out: &mut Vec<Violation>) {
    if s.energies.len() < 2 {
        out.push(Violation::new("source.energies", "at least two grid points are required"));
    }
    if s.energies.len() != s.prob_densities.len() {
        out.push(Violation::new(
            "source.prob_densities",
            format!(
                "{} densities given for {} energies",
                s.prob_densities.len(),
                s.energies.len()
            ),
        ));
    }
    ascending_energies("energies", &s.energies, out);
    weights("prob_densities", &s.prob_densities, out);
}

fn ascending_energies(field: &str, values: &[f64], out: &mut Vec<Violation>) {
    if values.iter().any(|v| !v.is_finite()) {
        out.push(Violation::new(format!("source.{field}"), "energies must be finite"));
        return;
    }
    if values.first().is_some_and(|v| *v < 0.0) {
        out.push(Violation::new(format!("source.{field}"), "energies must be >= 0"));
    }
    if let Some(i) = values.windows(2).position(|w| w[0] >= w[1]) {
        out.push(Violation::new(
            format!("source.{field}"),
            format!("energies must be strictly increasing (index {})", i + 1),
        ));
    }
}

fn weights(field: &str, values: &[f64], out: &mut Vec<Violation>) {
    if values.iter().any(|w| !w.is_finite() || *w < 0.0) {
        out.push(Violation::new(
            format!("source.{field}"),
            "entries must be finite and non-negative",
        ));
    } else if !values.iter().any(|w| *w > 0.0) {
        out.push(Violation::new(
            format!("source.{field}"),
            "at least one entry must be positive",
        ));
    }
}
