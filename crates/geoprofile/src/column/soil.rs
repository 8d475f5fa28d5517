//! Soil-code catalogs.
//!
//! The core only asks whether a code is known. Colors, fill patterns and any
//! other appearance attributes belong to the renderer.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Membership query over a soil-coding table.
pub trait SoilCatalog {
    fn contains(&self, code: &str) -> bool;
}

impl<T: SoilCatalog + ?Sized> SoilCatalog for &T {
    fn contains(&self, code: &str) -> bool {
        (**self).contains(code)
    }
}

impl<S: BuildHasher> SoilCatalog for HashSet<String, S> {
    fn contains(&self, code: &str) -> bool {
        HashSet::contains(self, code)
    }
}

impl SoilCatalog for BTreeSet<String> {
    fn contains(&self, code: &str) -> bool {
        BTreeSet::contains(self, code)
    }
}

/// Soil codes of NEN-EN-ISO 14688-1:2019 + NEN 8990:2020, table NA.17.
pub const NEN_8990_CODES: [&str; 62] = [
    "keien",
    "keienMetGrind",
    "keienMetZand",
    "keienMetSilt",
    "keienMetKlei",
    "keitjes",
    "keitjesMetGrind",
    "keitjesMetZand",
    "keitjesMetSilt",
    "keitjesMetKlei",
    "grind",
    "grindMetKeien",
    "grindMetKeitjes",
    "zwakZandigGrind",
    "sterkZandigGrind",
    "siltigGrind",
    "kleiigGrind",
    "zand",
    "zandMetKeien",
    "zandMetKeitjes",
    "zwakGrindigZand",
    "sterkGrindigZand",
    "siltigZand",
    "siltigZandMetGrind",
    "kleiigZand",
    "kleiigZandMetGrind",
    "silt",
    "siltMetKeien",
    "siltMetKeitjes",
    "zwakGrindigSilt",
    "sterkGrindigSilt",
    "zwakZandigSilt",
    "zwakZandigSiltMetGrind",
    "sterkZandigSilt",
    "sterkZandigSiltMetGrind",
    "klei",
    "kleiMetKeien",
    "kleiMetKeitjes",
    "zwakGrindigeKlei",
    "sterkGrindigeKlei",
    "zwakZandigeKlei",
    "zwakZandigeKleiMetGrind",
    "sterkZandigeKlei",
    "sterkZandigeKleiMetGrind",
    "organischKlei",
    "detritus",
    "zwakZandigeDetritus",
    "sterkZandigeDetritus",
    "siltigeDetritus",
    "kleiigeDetritus",
    "humus",
    "zwakZandigeHumus",
    "sterkZandigeHumus",
    "siltigeHumus",
    "kleiigeHumus",
    "veen",
    "zwakZandigVeen",
    "sterkZandigVeen",
    "siltigVeen",
    "kleiigVeen",
    "bruinkool",
    "gyttja",
];

/// Default catalog backed by [`NEN_8990_CODES`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Nen8990;

impl SoilCatalog for Nen8990 {
    fn contains(&self, code: &str) -> bool {
        NEN_8990_CODES.contains(&code)
    }
}
