//! Canonical JSON form of a [`RunConfig`].

use serde_json::{json, Value};

use crate::model::{RunConfig, SpectrumSource};

/// Serializes a configuration to canonical JSON.
///
/// Keys appear in canonical order, nuclides as integer codes, the neutrino
/// as its flavor tag, and the source `type` under its canonical name with
/// every defaulted field written out.
#[must_use]
pub fn to_json(config: &RunConfig) -> Value {
    let nuclides: Vec<i64> = config.target.nuclides.iter().map(|n| n.code()).collect();
    let reactions: Vec<&str> = config.reactions.iter().map(|r| r.as_str()).collect();
    json!({
        "seed": config.seed,
        "target": {
            "nuclides": nuclides,
            "atom_fractions": config.target.atom_fractions,
        },
        "reactions": reactions,
        "source": source_json(&config.source),
        "direction": {
            "x": config.direction.x,
            "y": config.direction.y,
            "z": config.direction.z,
        },
    })
}

fn source_json(source: &SpectrumSource) -> Value {
    let tag = source.type_tag();
    let neutrino = source.neutrino().tag();
    match source {
        SpectrumSource::FermiDirac(s) => json!({
            "type": tag,
            "neutrino": neutrino,
            "Emin": s.e_min,
            "Emax": s.e_max,
            "temperature": s.temperature,
            "eta": s.eta,
        }),
        SpectrumSource::Monoenergetic(s) => json!({
            "type": tag,
            "neutrino": neutrino,
            "energy": s.energy,
        }),
        SpectrumSource::BetaFit(s) => json!({
            "type": tag,
            "neutrino": neutrino,
            "Emin": s.e_min,
            "Emax": s.e_max,
            "Emean": s.e_mean,
            "beta": s.beta,
        }),
        SpectrumSource::Histogram(s) => json!({
            "type": tag,
            "neutrino": neutrino,
            "E_bin_lefts": s.bin_lefts,
            "weights": s.weights,
            "Emax": s.e_max,
        }),
        SpectrumSource::Grid(s) => json!({
            "type": tag,
            "neutrino": neutrino,
            "energies": s.energies,
            "prob_densities": s.prob_densities,
            "rule": s.rule.as_str(),
        }),
    }
}
