//! Flat report rows derived from a camp view

use crate::core::format::{parse_timestamp, report_date};
use crate::domain::models::{
    project, CampStructure, Entete, InfoGenerale, Lieux, Staff, StaffInformation, StaffMember,
};
use crate::domain::{Camp, View};

/// Separator between values sharing one cell
pub const JOIN: &str = " | ";

pub const CAMP_HEADERS: [&str; 19] = [
    "Camp",
    "Nom",
    "Modifié le",
    "Structure Organisatrice",
    "Structure",
    "État",
    "Début",
    "Fin",
    "Animateurs",
    "Jeunes",
    "Filles",
    "Garçons",
    "6-13 ans",
    "14-17 ans",
    "age Min",
    "age Max",
    "Tel",
    "Lieu",
    "Adresse",
];

pub const STAFF_HEADERS: [&str; 10] = [
    "Camp",
    "Numéro adhérent",
    "Nom",
    "Prénom",
    "Role",
    "Date début",
    "Date de fin",
    "En stage",
    "Qualifications",
    "Responsabilités",
];

/// One line of `camps.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampSummaryRow {
    pub id: String,
    pub name: String,
    pub modified: String,
    pub organizer_structures: String,
    pub structures: String,
    pub etat: String,
    pub date_debut: String,
    pub date_fin: String,
    pub animateurs: String,
    pub jeunes: String,
    pub filles: String,
    pub garcons: String,
    pub nb_6_13: String,
    pub nb_14_17: String,
    pub age_min: String,
    pub age_max: String,
    pub tel: String,
    pub lieu: String,
    pub adresse: String,
}

impl CampSummaryRow {
    pub fn from_view(camp: &Camp, view: &View) -> Self {
        let entete: Entete = project(view.module("entete"));
        let info: InfoGenerale = project(view.module("info_generale"));
        let staff: Staff = project(view.module("staff"));
        let lieux: Lieux = project(view.module("lieux"));
        let lieu = lieux.camp_lieu_principal;
        let counts = info.camp;

        let text = |value: Option<String>| value.unwrap_or_default();

        Self {
            id: camp.id.to_string(),
            name: camp.name.clone(),
            modified: report_date(camp.last_modified.as_ref()),
            organizer_structures: structures(
                info.camp_structures.iter().filter(|s| s.is_organizer()),
            ),
            structures: structures(info.camp_structures.iter().filter(|s| s.has_flag())),
            etat: text(entete.statut),
            date_debut: day(entete.date_debut.as_deref()),
            date_fin: day(entete.date_fin.as_deref()),
            animateurs: text(counts.prevision_nbre_animateurs),
            jeunes: text(counts.prevision_nbre_participants),
            filles: text(counts.prevision_nbre_filles),
            garcons: text(counts.prevision_nbre_garcons),
            nb_6_13: text(counts.prevision_nbre_6_13),
            nb_14_17: text(counts.prevision_nbre_14_17),
            age_min: text(counts.age_mini),
            age_max: text(counts.age_maxi),
            tel: text(staff.telephone_contact_staff),
            lieu: format!(
                "{} {} {}",
                lieu.code_postal.as_deref().unwrap_or_default(),
                lieu.ville.as_deref().unwrap_or_default(),
                lieu.pays.as_deref().unwrap_or_default()
            ),
            adresse: format!(
                "{}\n{}\n{}",
                lieu.libelle.as_deref().unwrap_or_default(),
                lieu.adresse_ligne1.as_deref().unwrap_or_default(),
                lieu.adresse_ligne2.as_deref().unwrap_or_default()
            ),
        }
    }

    pub fn to_record(&self) -> [&str; 19] {
        [
            &self.id,
            &self.name,
            &self.modified,
            &self.organizer_structures,
            &self.structures,
            &self.etat,
            &self.date_debut,
            &self.date_fin,
            &self.animateurs,
            &self.jeunes,
            &self.filles,
            &self.garcons,
            &self.nb_6_13,
            &self.nb_14_17,
            &self.age_min,
            &self.age_max,
            &self.tel,
            &self.lieu,
            &self.adresse,
        ]
    }
}

/// One line of `chefs.csv`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffSummaryRow {
    pub camp_id: String,
    pub numero: String,
    pub nom: String,
    pub prenom: String,
    pub role: String,
    pub date_debut: String,
    pub date_fin: String,
    pub stage: String,
    pub qualifications: String,
    pub responsabilites: String,
}

impl StaffSummaryRow {
    /// One row per staff member, joined with the member's additional information
    pub fn from_view(camp: &Camp, view: &View) -> Vec<Self> {
        let staff: Staff = project(view.module("staff"));

        staff
            .camp_adherent_staffs
            .iter()
            .map(|member| {
                let info = staff.camp_adherent_staffs_informations.iter().find(|i| {
                    i.numero.is_some() && i.numero == member.adherent.numero
                });
                if info.is_none() {
                    tracing::debug!(
                        camp_id = %camp.id,
                        numero = ?member.adherent.numero,
                        "No additional information for staff member"
                    );
                }
                Self::from_member(camp, member, info)
            })
            .collect()
    }

    fn from_member(camp: &Camp, member: &StaffMember, info: Option<&StaffInformation>) -> Self {
        let adherent = &member.adherent;
        let qualifications = info
            .map(|i| {
                i.adherent_qualifications
                    .iter()
                    .map(|q| q.kind.clone().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(JOIN)
            })
            .unwrap_or_default();

        Self {
            camp_id: camp.id.to_string(),
            numero: adherent.numero.clone().unwrap_or_default(),
            nom: adherent.nom.clone().unwrap_or_default(),
            prenom: adherent.prenom.clone().unwrap_or_default(),
            role: role_label(member.role_staff.as_deref()).to_string(),
            date_debut: day(member.date_debut_presence.as_deref()),
            date_fin: day(member.date_fin_presence.as_deref()),
            stage: stage_label(member).to_string(),
            qualifications,
            responsabilites: responsibilities(member).join(JOIN),
        }
    }

    pub fn to_record(&self) -> [&str; 10] {
        [
            &self.camp_id,
            &self.numero,
            &self.nom,
            &self.prenom,
            &self.role,
            &self.date_debut,
            &self.date_fin,
            &self.stage,
            &self.qualifications,
            &self.responsabilites,
        ]
    }
}

pub fn role_label(code: Option<&str>) -> &'static str {
    match code {
        Some("D") => "Directeur",
        Some("C") => "Chef",
        _ => "Autre",
    }
}

fn stage_label(member: &StaffMember) -> &'static str {
    if member.validation_stage_pratique_bafa {
        "BAFA"
    } else if member.validation_stage_pratique_bafd {
        "BAFD"
    } else {
        ""
    }
}

fn responsibilities(member: &StaffMember) -> Vec<String> {
    let flags = [
        (member.responsabilite_intendant, "Intendant"),
        (member.responsabilite_tresorier, "Trésorier"),
        (member.responsabilite_as, "Sanitaire"),
        (member.responsabilite_materiel, "Materiel"),
        (member.responsabilite_autre, "Autre"),
    ];

    let mut labels: Vec<String> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, label)| label.to_string())
        .collect();

    if let Some(detail) = member
        .responsabilite_autre_detail
        .as_ref()
        .filter(|d| !d.is_empty())
    {
        labels.push(detail.clone());
    }

    labels
}

fn structures<'a>(entries: impl Iterator<Item = &'a CampStructure>) -> String {
    entries
        .map(|s| {
            format!(
                "{} ({})",
                s.structure.libelle.as_deref().unwrap_or_default(),
                s.structure.code.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(JOIN)
}

fn day(value: Option<&str>) -> String {
    report_date(value.and_then(parse_timestamp).as_ref())
}
