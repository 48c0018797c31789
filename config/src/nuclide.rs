//! Nuclide identification by PDG nuclear code.
//!
//! MARLEY identifies target nuclei with the ten-digit PDG scheme
//! `10LZZZAAAI`: `L` is the number of strange quarks (always 0 here), `ZZZ`
//! the atomic number, `AAA` the mass number, and `I` the isomer level
//! (always 0 here). `1000180400` is therefore ⁴⁰Ar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Heaviest element accepted in a target.
pub const MAX_Z: u32 = 118;
/// Largest mass number accepted in a target.
pub const MAX_A: u32 = 300;

const CODE_BASE: i64 = 1_000_000_000;
const CODE_END: i64 = 1_100_000_000;

/// Element symbols indexed by `Z - 1`.
const SYMBOLS: [&str; MAX_Z as usize] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// A ground-state, non-strange nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Nuclide {
    z: u32,
    a: u32,
}

impl Nuclide {
    /// Builds a nuclide from atomic and mass numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `z` is outside `1..=118` or `a`
    /// is outside `z..=300`.
    pub fn from_za(z: u32, a: u32) -> Result<Self> {
        if z == 0 || z > MAX_Z {
            return Err(invalid(format!("atomic number {z} outside 1..={MAX_Z}")));
        }
        if a < z || a > MAX_A {
            return Err(invalid(format!(
                "mass number {a} outside {z}..={MAX_A} for Z = {z}"
            )));
        }
        Ok(Self { z, a })
    }

    /// Decodes a `10LZZZAAAI` nuclear code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the integer is not a ten-digit
    /// nuclear code, names a strange or excited nucleus, or has an
    /// impossible Z/A combination.
    pub fn from_code(code: i64) -> Result<Self> {
        if !(CODE_BASE..CODE_END).contains(&code) {
            return Err(invalid(format!(
                "{code} is not a nuclear code of the form 10LZZZAAAI"
            )));
        }
        let rem = code - CODE_BASE;
        let strange = rem / 10_000_000;
        let isomer = rem % 10;
        if strange != 0 {
            return Err(invalid(format!("{code} encodes a hypernucleus (L = {strange})")));
        }
        if isomer != 0 {
            return Err(invalid(format!("{code} encodes an isomer (I = {isomer})")));
        }
        // Both fields are at most three digits, so the casts cannot truncate.
        let z = ((rem / 10_000) % 1000) as u32;
        let a = ((rem / 10) % 1000) as u32;
        Self::from_za(z, a)
    }

    /// Atomic number.
    #[must_use]
    pub fn z(self) -> u32 {
        self.z
    }

    /// Mass number.
    #[must_use]
    pub fn a(self) -> u32 {
        self.a
    }

    /// The `10LZZZAAAI` code of this nuclide.
    #[must_use]
    pub fn code(self) -> i64 {
        CODE_BASE + i64::from(self.z) * 10_000 + i64::from(self.a) * 10
    }

    /// Chemical symbol of the element.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        SYMBOLS[(self.z - 1) as usize]
    }
}

/// Looks up an atomic number by chemical symbol (case-sensitive).
#[must_use]
pub fn z_for_symbol(symbol: &str) -> Option<u32> {
    SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .map(|i| i as u32 + 1)
}

impl TryFrom<i64> for Nuclide {
    type Error = ConfigError;

    fn try_from(code: i64) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<Nuclide> for i64 {
    fn from(n: Nuclide) -> Self {
        n.code()
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.a, self.symbol())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid {
        field: "target.nuclides".to_owned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon_40() {
        let ar = Nuclide::from_code(1_000_180_400).unwrap();
        assert_eq!(ar.z(), 18);
        assert_eq!(ar.a(), 40);
        assert_eq!(ar.symbol(), "Ar");
        assert_eq!(ar.to_string(), "40Ar");
        assert_eq!(ar.code(), 1_000_180_400);
    }

    #[test]
    fn hydrogen_and_oganesson_are_table_ends() {
        assert_eq!(Nuclide::from_za(1, 1).unwrap().symbol(), "H");
        assert_eq!(Nuclide::from_za(118, 294).unwrap().symbol(), "Og");
        assert_eq!(z_for_symbol("Og"), Some(118));
        assert_eq!(z_for_symbol("ar"), None);
    }

    #[test]
    fn rejects_non_nuclear_codes() {
        assert!(Nuclide::from_code(2212).is_err());
        assert!(Nuclide::from_code(-1_000_180_400).is_err());
        assert!(Nuclide::from_code(1_100_000_000).is_err());
    }

    #[test]
    fn rejects_hypernuclei_and_isomers() {
        assert!(Nuclide::from_code(1_010_180_400).is_err());
        assert!(Nuclide::from_code(1_000_180_401).is_err());
    }

    #[test]
    fn rejects_mass_below_charge() {
        let err = Nuclide::from_code(1_000_180_100).unwrap_err();
        assert_eq!(err.field(), Some("target.nuclides"));
        assert!(Nuclide::from_za(0, 1).is_err());
    }

    #[test]
    fn deserializes_from_integer() {
        let n: Nuclide = serde_json::from_str("1000260560").unwrap();
        assert_eq!(n.to_string(), "56Fe");
        assert!(serde_json::from_str::<Nuclide>("1000000000").is_err());
    }
}
