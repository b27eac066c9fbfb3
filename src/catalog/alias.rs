//! Static alias tables mapping variant spellings to canonical names.
//!
//! Resolution is total: a hit returns the canonical name, a miss returns the
//! input unchanged (it is either already canonical or harmlessly unknown).

use crate::error::LookupError;
use log::debug;

#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

/// Rain-gauge station names as written on the sheets, mapped to the
/// municipality they measure.
pub const STATION_ALIASES: AliasTable = AliasTable {
    name: "station",
    entries: &[
        ("Araçoiaba (Granja Cristo Redentor)", "Araçoiaba"),
        ("Cabo (Barragem de Gurjaú)", "Cabo de Santo Agostinho"),
        ("Cabo (Barragem de Suape)", "Cabo de Santo Agostinho"),
        ("Cabo (Pirapama)", "Cabo de Santo Agostinho"),
        ("Ipojuca (Suape) - PCD", "Ipojuca"),
        ("Jaboatão (Cidade da Copa) - PCD", "Jaboatão dos Guararapes"),
        ("Recife (Codecipe / Santo Amaro)", "Recife"),
        ("Recife (Várzea)", "Recife"),
        ("São Lourenço da Mata (Tapacurá)", "São Lourenço da Mata"),
    ],
};

/// Municipality names from the mortality files that survive the encoding
/// repair still garbled, plus the one naming variant of the region.
pub const MUNICIPALITY_ALIASES: AliasTable = AliasTable {
    name: "municipality",
    entries: &[
        ("SÃ£o LourenÃ§o da Mata", "São Lourenço da Mata"),
        ("JaboatÃ£o dos Guararapes", "Jaboatão dos Guararapes"),
        ("Ilha de ItamaracÃ¡", "Itamaracá"),
        ("AraÃ§oiaba", "Araçoiaba"),
        ("Ilha de Itamaracá", "Itamaracá"),
    ],
};

impl AliasTable {
    /// Returns the canonical spelling of `raw`, or `raw` itself on a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use chuvas::STATION_ALIASES;
    ///
    /// assert_eq!(STATION_ALIASES.resolve("Recife (Várzea)"), "Recife");
    /// assert_eq!(STATION_ALIASES.resolve("Goiana"), "Goiana");
    /// ```
    pub fn resolve<'a>(&self, raw: &'a str) -> &'a str {
        match self.lookup(raw) {
            Some(canonical) => canonical,
            None => {
                debug!(
                    "{}",
                    LookupError::Alias {
                        table: self.name,
                        value: raw.to_string(),
                    }
                );
                raw
            }
        }
    }

    pub fn lookup(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.entries
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, canonical)| *canonical)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
