//! Typed projections of module payloads
//!
//! Module payloads are kept as raw JSON in the view so templates see every
//! field the API returns. The structs here read the few fields the pipeline
//! itself depends on. Every field is optional: a payload missing a field
//! yields empty values, never a parse failure.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads `null` as the type's default value
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a scalar as text; numbers and booleans are rendered, anything else is absent
fn stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

/// Reads a flag with loose truthiness: `null`, `false`, `0` and `""` are unset
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

/// Text of a scalar JSON value
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Loose truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Header module (`ENTETE`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entete {
    #[serde(deserialize_with = "stringish")]
    pub statut: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub date_debut: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub date_fin: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub type_camp: TypeCamp,
    #[serde(deserialize_with = "nullable")]
    pub camp_modules: Vec<CampModule>,
    #[serde(deserialize_with = "nullable")]
    pub histo_derniere_modification: Histo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeCamp {
    #[serde(deserialize_with = "stringish")]
    pub code: Option<String>,
}

/// A module instance declared by the header
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampModule {
    #[serde(deserialize_with = "stringish")]
    pub id: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub actif: bool,
    #[serde(deserialize_with = "nullable")]
    pub module: ModuleRef,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleRef {
    #[serde(deserialize_with = "stringish")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Histo {
    #[serde(deserialize_with = "stringish")]
    pub date_heure_modification: Option<String>,
}

/// General information module (`INFO_GENERALE`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InfoGenerale {
    #[serde(deserialize_with = "nullable")]
    pub camp: CampCounts,
    #[serde(deserialize_with = "nullable")]
    pub camp_structures: Vec<CampStructure>,
    #[serde(deserialize_with = "nullable")]
    pub camp_fichiers: Vec<CampFichier>,
}

/// Headcount forecasts carried by the general information module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampCounts {
    #[serde(deserialize_with = "stringish")]
    pub prevision_nbre_animateurs: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub prevision_nbre_participants: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub prevision_nbre_filles: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub prevision_nbre_garcons: Option<String>,
    #[serde(deserialize_with = "stringish", rename = "previsionNbre613")]
    pub prevision_nbre_6_13: Option<String>,
    #[serde(deserialize_with = "stringish", rename = "previsionNbre1417")]
    pub prevision_nbre_14_17: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub age_mini: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub age_maxi: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampStructure {
    /// Raw flag; `true` marks the organizer, any non-null value marks a participant
    pub organisatrice: Value,
    #[serde(deserialize_with = "nullable")]
    pub structure: Structure,
}

impl CampStructure {
    pub fn is_organizer(&self) -> bool {
        self.organisatrice == Value::Bool(true)
    }

    pub fn has_flag(&self) -> bool {
        !self.organisatrice.is_null()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Structure {
    #[serde(deserialize_with = "stringish")]
    pub libelle: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub code: Option<String>,
}

/// An attached file descriptor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampFichier {
    #[serde(deserialize_with = "stringish")]
    pub id: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub nom: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub categorie: Option<String>,
}

/// Staff module (`STAFF`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Staff {
    #[serde(deserialize_with = "stringish")]
    pub telephone_contact_staff: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub camp_adherent_staffs: Vec<StaffMember>,
    #[serde(deserialize_with = "nullable")]
    pub camp_adherent_staffs_informations: Vec<StaffInformation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(deserialize_with = "nullable")]
    pub adherent: Adherent,
    #[serde(deserialize_with = "stringish")]
    pub role_staff: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub date_debut_presence: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub date_fin_presence: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub validation_stage_pratique_bafa: bool,
    #[serde(deserialize_with = "truthy")]
    pub validation_stage_pratique_bafd: bool,
    #[serde(deserialize_with = "truthy")]
    pub responsabilite_intendant: bool,
    #[serde(deserialize_with = "truthy")]
    pub responsabilite_tresorier: bool,
    #[serde(deserialize_with = "truthy", rename = "responsabiliteAS")]
    pub responsabilite_as: bool,
    #[serde(deserialize_with = "truthy")]
    pub responsabilite_materiel: bool,
    #[serde(deserialize_with = "truthy")]
    pub responsabilite_autre: bool,
    #[serde(deserialize_with = "stringish")]
    pub responsabilite_autre_detail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Adherent {
    #[serde(deserialize_with = "stringish")]
    pub numero: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub nom: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub prenom: Option<String>,
}

/// Additional information about a staff member, keyed by member number
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffInformation {
    #[serde(deserialize_with = "stringish")]
    pub numero: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub adherent_qualifications: Vec<Qualification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Qualification {
    #[serde(rename = "type", deserialize_with = "stringish")]
    pub kind: Option<String>,
}

/// Places module (`LIEUX`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lieux {
    #[serde(deserialize_with = "nullable")]
    pub camp_lieu_principal: LieuPrincipal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LieuPrincipal {
    #[serde(deserialize_with = "stringish")]
    pub libelle: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub adresse_ligne1: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub adresse_ligne2: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub code_postal: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub ville: Option<String>,
    #[serde(deserialize_with = "stringish")]
    pub pays: Option<String>,
}

/// Deserializes a typed projection, treating a non-object payload as empty
pub fn project<T>(payload: Option<&Value>) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match payload {
        Some(value @ Value::Object(_)) => match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Unexpected module payload shape, using empty values");
                T::default()
            }
        },
        _ => T::default(),
    }
}
