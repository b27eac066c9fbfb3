//! Descriptions for the ICD-10 "W" block (accidental external causes), keyed by
//! the three-character code prefix.

use crate::error::LookupError;
use log::debug;

/// Placeholder used when a prefix has no catalog entry.
pub const DESCRIPTION_NOT_FOUND: &str = "description not found";

const W_CAUSES: &[(&str, &str)] = &[
    ("W00", "Queda no mesmo nível por escorregão, tropeção ou cambalhota"),
    ("W01", "Queda no mesmo nível por tropeção ou escorregão com colisão"),
    ("W02", "Queda envolvendo patins, esqui, patinete ou pranchas"),
    ("W03", "Queda em cadeira de rodas"),
    ("W04", "Queda ao ser carregado ou apoiado por outra pessoa"),
    ("W05", "Queda que envolve cama"),
    ("W06", "Queda que envolve sofá"),
    ("W07", "Queda que envolve cadeira"),
    ("W08", "Queda que envolve outros móveis"),
    ("W09", "Queda em ou de equipamento de recreação"),
    ("W10", "Queda em ou de escadas ou degraus"),
    ("W11", "Queda em ou de escada"),
    ("W12", "Queda em ou de andaime"),
    ("W13", "Queda de, ou através de edifício"),
    ("W14", "Queda de árvore"),
    ("W15", "Queda de penhasco"),
    ("W16", "Mergulho ou salto na água causando outro ferimento que não afogamento ou submersão"),
    ("W17", "Outra queda de um mesmo nível a outro"),
    ("W18", "Outra queda no mesmo nível"),
    ("W19", "Queda, não especificada"),
    ("W20", "Atingido por objeto lançado, projetado ou em queda"),
    ("W21", "Atingido por equipamento esportivo"),
    ("W22", "Atingido por outro objeto"),
    ("W23", "Ficando preso, esmagado ou apertado entre objetos"),
    ("W24", "Contato com dispositivos de elevação e transmissão, não classificados em outra parte"),
    ("W25", "Contato com vidro cortante"),
    ("W26", "Contato com faca, espada e punhal"),
    ("W27", "Contato com ferramenta manual cortante ou perfurante"),
    ("W28", "Contato com ferramenta ou objeto doméstico"),
    ("W29", "Contato com outro objeto cortante ou perfurante"),
    ("W30", "Contato com outro equipamento agrícola"),
    ("W31", "Contato com outra máquina e com máquina não especificada"),
    ("W32", "Disparo de arma curta"),
    ("W33", "Disparo de espingarda, fuzil e arma de fogo de maior calibre"),
    ("W34", "Descarga de outra arma de fogo"),
    ("W35", "Explosão ou ruptura de caldeira"),
    ("W36", "Explosão ou ruptura de cilindro de gás"),
    ("W37", "Explosão ou ruptura de outra substância pressurizada"),
    ("W38", "Explosão de fogos de artifício"),
    ("W39", "Explosão de outra substância"),
    ("W40", "Exposição à pressão de ondas"),
    ("W41", "Exposição a vibração"),
    ("W42", "Exposição a ruído"),
    ("W43", "Exposição à radiação"),
    ("W44", "Penetração de corpo estranho através de orifício natural"),
    ("W45", "Penetração de corpo estranho na pele"),
    ("W46", "Contato com agulha hipodérmica contaminada"),
    ("W49", "Exposição a outros fatores e aos não especificados"),
    ("W50", "Agressão por golpe, batida ou pancada por outra pessoa"),
    ("W51", "Agressão por empurrão por outra pessoa"),
    ("W52", "Agressão por compressão por multidão ou aglomeração humana"),
    ("W53", "Mordedura ou pancada provocada por rato"),
    ("W54", "Mordedura ou pancada provocada por cão"),
    ("W55", "Mordedura ou pancada provocada por outros mamíferos"),
    ("W56", "Contato com animais marinhos"),
    ("W57", "Mordedura ou picada por inseto e outros artrópodes não venenosos"),
    ("W58", "Mordedura por crocodilo ou aligátor"),
    ("W59", "Mordedura ou pancada por outros répteis"),
    ("W60", "Contato com espinhos, farpas ou plantas espinhosas"),
    ("W64", "Outros traumatismos acidentais especificados"),
    ("W65", "Afogamento e submersão enquanto na banheira"),
    ("W66", "Afogamento e submersão após queda na banheira"),
    ("W67", "Afogamento e submersão enquanto na piscina"),
    ("W68", "Afogamento e submersão após queda em piscina"),
    ("W69", "Afogamento e submersão enquanto em águas naturais"),
    ("W70", "Afogamento e submersão após queda em águas naturais"),
    ("W73", "Outros afogamentos e submersões especificados"),
    ("W74", "Afogamento e submersão não especificados"),
    ("W75", "Estrangulamento e sufocação acidental na cama"),
    ("W76", "Outros estrangulamentos e sufocações acidentais"),
    ("W77", "Envolvimento ou engolfamento em avalanche, deslizamento ou outro movimento de massa"),
    ("W78", "Inalação de alimentos causando obstrução"),
    ("W79", "Inalação de outros objetos causando obstrução"),
    ("W80", "Aspiração de vômito"),
    ("W81", "Aspiração de conteúdo gástrico"),
    ("W83", "Outros acidentes especificados que causam privação de respiração"),
    ("W84", "Acidente não especificado causando privação de respiração"),
    ("W85", "Exposição a linha de força elétrica transmitida ao ar livre"),
    ("W86", "Exposição a outra corrente elétrica especificada"),
    ("W87", "Exposição a corrente elétrica, não especificada"),
    ("W88", "Exposição à radiação ionizante"),
    ("W89", "Exposição à luz e radiação ultravioleta artificiais"),
    ("W90", "Exposição a outras radiações não ionizantes especificadas"),
    ("W91", "Exposição a radiações não ionizantes, não especificada"),
    ("W92", "Exposição a calor de equipamento doméstico"),
    ("W93", "Exposição a calor de outros equipamentos"),
    ("W94", "Exposição a calor e luz de origem natural"),
    ("W99", "Exposição a outras forças de origem não especificada"),
];

/// Lookup over the static "W" catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CauseCatalog;

impl CauseCatalog {
    /// Extracts the letter + two digits that key the catalog, upper-cased.
    /// Codes shorter than three characters are returned whole.
    pub fn prefix(code: &str) -> String {
        code.trim().chars().take(3).collect::<String>().to_uppercase()
    }

    pub fn lookup(&self, code: &str) -> Option<&'static str> {
        let prefix = Self::prefix(code);
        W_CAUSES
            .iter()
            .find(|(key, _)| *key == prefix)
            .map(|(_, description)| *description)
    }

    /// Renders `"<prefix> - <description>"`; unknown prefixes get
    /// [`DESCRIPTION_NOT_FOUND`] so callers always have a label.
    ///
    /// # Examples
    ///
    /// ```
    /// use chuvas::CauseCatalog;
    ///
    /// let catalog = CauseCatalog;
    /// assert_eq!(
    ///     catalog.describe("W540"),
    ///     "W54 - Mordedura ou pancada provocada por cão"
    /// );
    /// assert_eq!(catalog.describe("X59"), "X59 - description not found");
    /// ```
    pub fn describe(&self, code: &str) -> String {
        let prefix = Self::prefix(code);
        match self.lookup(&prefix) {
            Some(description) => format!("{prefix} - {description}"),
            None => {
                debug!("{}", LookupError::Cause(code.to_string()));
                format!("{prefix} - {DESCRIPTION_NOT_FOUND}")
            }
        }
    }

    pub fn len(&self) -> usize {
        W_CAUSES.len()
    }

    pub fn is_empty(&self) -> bool {
        W_CAUSES.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_w_family_only() {
        let catalog = CauseCatalog;
        assert!(catalog.len() > 80);
        for (code, _) in W_CAUSES {
            assert_eq!(code.len(), 3);
            assert!(code.starts_with('W'));
            assert!(code[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_describe_uses_prefix_of_full_code() {
        let catalog = CauseCatalog;
        assert_eq!(catalog.describe("W19"), "W19 - Queda, não especificada");
        assert_eq!(catalog.describe("W199"), "W19 - Queda, não especificada");
        assert_eq!(
            catalog.describe(" w699 "),
            "W69 - Afogamento e submersão enquanto em águas naturais"
        );
    }

    #[test]
    fn test_gaps_in_the_block_get_placeholder() {
        let catalog = CauseCatalog;
        assert!(catalog.lookup("W47").is_none());
        assert_eq!(catalog.describe("W47"), "W47 - description not found");
        assert_eq!(catalog.describe("I21"), "I21 - description not found");
    }

    #[test]
    fn test_short_codes_are_kept_whole() {
        assert_eq!(CauseCatalog::prefix("W"), "W");
        assert_eq!(CauseCatalog.describe(""), " - description not found");
    }
}
