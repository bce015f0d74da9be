//! Supported species and their HITRAN isotopologue metadata.
//!
//! HITRAN addresses an isotopologue two ways:
//! - a `(molecule id, local isotopologue id)` pair, used inside `.par` records
//! - a global isotopologue id, used by the line-by-line API
//!
//! We carry both so the fetch layer and the parser agree on what was requested.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Combustion-relevant species with a HITRAN line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Species {
    #[serde(rename = "H2O")]
    #[value(name = "H2O")]
    H2o,
    #[serde(rename = "CO2")]
    #[value(name = "CO2")]
    Co2,
    #[serde(rename = "CO")]
    #[value(name = "CO")]
    Co,
    #[serde(rename = "CH4")]
    #[value(name = "CH4")]
    Ch4,
    #[serde(rename = "H2CO")]
    #[value(name = "H2CO")]
    H2co,
    #[serde(rename = "H2O2")]
    #[value(name = "H2O2")]
    H2o2,
    #[serde(rename = "SF6")]
    #[value(name = "SF6")]
    Sf6,
}

impl Species {
    pub const ALL: [Species; 7] = [
        Species::H2o,
        Species::Co2,
        Species::Co,
        Species::Ch4,
        Species::H2co,
        Species::H2o2,
        Species::Sf6,
    ];

    /// HITRAN molecule id.
    pub fn molecule_id(self) -> u8 {
        match self {
            Species::H2o => 1,
            Species::Co2 => 2,
            Species::Co => 5,
            Species::Ch4 => 6,
            Species::H2co => 20,
            Species::H2o2 => 25,
            Species::Sf6 => 30,
        }
    }

    /// Chemical formula, also used as the cache table name and in output file names.
    pub fn name(self) -> &'static str {
        match self {
            Species::H2o => "H2O",
            Species::Co2 => "CO2",
            Species::Co => "CO",
            Species::Ch4 => "CH4",
            Species::H2co => "H2CO",
            Species::H2o2 => "H2O2",
            Species::Sf6 => "SF6",
        }
    }

    /// Linear molecules have two rotational degrees of freedom, the rest three.
    pub fn is_linear(self) -> bool {
        matches!(self, Species::Co2 | Species::Co)
    }

    pub fn from_molecule_id(id: u8) -> Option<Species> {
        Species::ALL.into_iter().find(|s| s.molecule_id() == id)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static HITRAN metadata for one isotopologue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isotopologue {
    pub species: Species,
    /// Local isotopologue id within the molecule (the `I` in `(M, I)`).
    pub local_id: u8,
    /// Global isotopologue id used by the HITRAN line-by-line API.
    pub global_id: u16,
    pub formula: &'static str,
    /// Molar mass [g/mol].
    pub molar_mass: f64,
}

const ISOTOPOLOGUES: [Isotopologue; 7] = [
    Isotopologue {
        species: Species::H2o,
        local_id: 1,
        global_id: 1,
        formula: "H2(16O)",
        molar_mass: 18.010565,
    },
    Isotopologue {
        species: Species::Co2,
        local_id: 1,
        global_id: 7,
        formula: "(12C)(16O)2",
        molar_mass: 43.98983,
    },
    Isotopologue {
        species: Species::Co,
        local_id: 1,
        global_id: 26,
        formula: "(12C)(16O)",
        molar_mass: 27.994915,
    },
    Isotopologue {
        species: Species::Ch4,
        local_id: 1,
        global_id: 32,
        formula: "(12C)H4",
        molar_mass: 16.0313,
    },
    Isotopologue {
        species: Species::H2co,
        local_id: 1,
        global_id: 64,
        formula: "H2(12C)(16O)",
        molar_mass: 30.010565,
    },
    Isotopologue {
        species: Species::H2o2,
        local_id: 1,
        global_id: 75,
        formula: "H2(16O)2",
        molar_mass: 34.00548,
    },
    Isotopologue {
        species: Species::Sf6,
        local_id: 1,
        global_id: 126,
        formula: "(32S)F6",
        molar_mass: 145.962492,
    },
];

/// Look up an isotopologue by species and local id.
pub fn isotopologue(species: Species, local_id: u8) -> Result<Isotopologue, AppError> {
    ISOTOPOLOGUES
        .iter()
        .find(|iso| iso.species == species && iso.local_id == local_id)
        .copied()
        .ok_or_else(|| {
            AppError::new(
                2,
                format!(
                    "Unsupported isotopologue: {species} (M={}) I={local_id}. Only the principal isotopologue (I=1) is tabulated.",
                    species.molecule_id()
                ),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_species_has_a_principal_isotopologue() {
        for species in Species::ALL {
            let iso = isotopologue(species, 1).unwrap();
            assert_eq!(iso.species, species);
            assert!(iso.molar_mass > 1.0);
        }
    }

    #[test]
    fn global_ids_match_hitran_table() {
        let expected = [
            (Species::H2o, 1),
            (Species::Co2, 7),
            (Species::Co, 26),
            (Species::Ch4, 32),
            (Species::H2co, 64),
            (Species::H2o2, 75),
            (Species::Sf6, 126),
        ];
        for (species, global_id) in expected {
            assert_eq!(isotopologue(species, 1).unwrap().global_id, global_id, "{species}");
        }
    }

    #[test]
    fn molecule_ids_round_trip() {
        for species in Species::ALL {
            assert_eq!(Species::from_molecule_id(species.molecule_id()), Some(species));
        }
        assert_eq!(Species::from_molecule_id(99), None);
    }

    #[test]
    fn minor_isotopologue_is_rejected() {
        let err = isotopologue(Species::Co2, 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
