//! Camp modules and the endpoints they are fetched from

use super::ids::CampId;
use std::fmt;

/// A named camp module
///
/// The header and the ten baseline modules are known up front. Active modules
/// declared by a camp header may carry any code and land in [`ModuleKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Entete,
    InfoGenerale,
    Lieux,
    Staff,
    Participant,
    ProjetPeda,
    JourneeType,
    GrilleActivite,
    Menu,
    Budget,
    NumeroUtile,
    Other(String),
}

/// Modules fetched for every camp, in fetch order
pub const BASELINE_MODULES: [ModuleKind; 10] = [
    ModuleKind::InfoGenerale,
    ModuleKind::Lieux,
    ModuleKind::Staff,
    ModuleKind::Participant,
    ModuleKind::ProjetPeda,
    ModuleKind::JourneeType,
    ModuleKind::GrilleActivite,
    ModuleKind::Menu,
    ModuleKind::Budget,
    ModuleKind::NumeroUtile,
];

impl ModuleKind {
    /// Resolves a module code as the API spells it
    pub fn from_code(code: &str) -> Self {
        match code {
            "ENTETE" => ModuleKind::Entete,
            "INFO_GENERALE" => ModuleKind::InfoGenerale,
            "LIEUX" => ModuleKind::Lieux,
            "STAFF" => ModuleKind::Staff,
            "PARTICIPANT" => ModuleKind::Participant,
            "PROJET_PEDA" => ModuleKind::ProjetPeda,
            "JOURNEE_TYPE" => ModuleKind::JourneeType,
            "GRILLE_ACTIVITE" => ModuleKind::GrilleActivite,
            "MENU" => ModuleKind::Menu,
            "BUDGET" => ModuleKind::Budget,
            "NUMERO_UTILE" => ModuleKind::NumeroUtile,
            other => ModuleKind::Other(other.to_string()),
        }
    }

    /// The API code of the module
    pub fn code(&self) -> &str {
        match self {
            ModuleKind::Entete => "ENTETE",
            ModuleKind::InfoGenerale => "INFO_GENERALE",
            ModuleKind::Lieux => "LIEUX",
            ModuleKind::Staff => "STAFF",
            ModuleKind::Participant => "PARTICIPANT",
            ModuleKind::ProjetPeda => "PROJET_PEDA",
            ModuleKind::JourneeType => "JOURNEE_TYPE",
            ModuleKind::GrilleActivite => "GRILLE_ACTIVITE",
            ModuleKind::Menu => "MENU",
            ModuleKind::Budget => "BUDGET",
            ModuleKind::NumeroUtile => "NUMERO_UTILE",
            ModuleKind::Other(code) => code,
        }
    }

    /// Key under which the module's payload is exposed in the view
    pub fn view_key(&self) -> String {
        view_key(self.code())
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalizes a module code into a view key: lower-cased, `/` replaced by `-`
pub fn view_key(code: &str) -> String {
    code.to_lowercase().replace('/', "-")
}

/// A module to fetch and the API path serving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    pub kind: ModuleKind,
    pub endpoint: String,
}

impl ModuleSpec {
    /// A module served by the camp endpoint, selected by query parameter
    pub fn camp_module(camp_id: &CampId, kind: ModuleKind) -> Self {
        let endpoint = format!("/api/camps/{}?module={}", camp_id, kind.code());
        Self { kind, endpoint }
    }

    /// An active module instance declared by the camp header
    pub fn active_module(code: &str, instance_id: &str) -> Self {
        Self {
            kind: ModuleKind::from_code(code),
            endpoint: format!("/api/camp-modules/{instance_id}"),
        }
    }

    /// The header module, always fetched first
    pub fn header(camp_id: &CampId) -> Self {
        Self::camp_module(camp_id, ModuleKind::Entete)
    }

    /// The ten baseline modules in fetch order
    pub fn baseline(camp_id: &CampId) -> Vec<Self> {
        BASELINE_MODULES
            .iter()
            .cloned()
            .map(|kind| Self::camp_module(camp_id, kind))
            .collect()
    }

    pub fn view_key(&self) -> String {
        self.kind.view_key()
    }
}
