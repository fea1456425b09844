//! The composite per-camp view handed to the renderer and the report exporter

use super::modules::ModuleKind;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Age-bracket classification derived from the header's camp type code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branche {
    pub id: String,
    pub name: String,
}

impl Branche {
    /// Maps a camp type code to its branch; unknown codes have none
    pub fn from_type_code(code: &str) -> Option<Self> {
        let (id, name) = match code {
            "8-11" => ("lj", "peuplade"),
            "11-14" => ("sg", "tribue"),
            "14-17" => ("pk", "caravanne"),
            _ => return None,
        };
        Some(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

/// A downloaded asset, addressed relative to the camp's output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub name: String,
    pub url: String,
}

/// A module payload tagged with the module it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePayload {
    pub kind: ModuleKind,
    pub data: Value,
}

/// Composite record for one camp
#[derive(Debug, Clone, Default)]
pub struct View {
    modules: BTreeMap<String, ModulePayload>,

    /// Set when the header's type code is one of the known brackets
    pub branche: Option<Branche>,

    /// Downloaded assets per lower-cased category
    pub files: BTreeMap<String, Vec<FileRef>>,

    /// The camp's output directory
    pub output_dir: PathBuf,

    /// File stem of the rendered document
    pub output_name: String,

    pub include_personal_data: bool,
}

impl View {
    pub fn new(output_dir: PathBuf, output_name: impl Into<String>, include_personal_data: bool) -> Self {
        Self {
            output_dir,
            output_name: output_name.into(),
            include_personal_data,
            ..Default::default()
        }
    }

    /// Inserts a payload under `key` unless the key is already taken.
    ///
    /// Returns `false` when an earlier module owns the key.
    pub fn insert_module(&mut self, key: String, kind: ModuleKind, data: Value) -> bool {
        if self.modules.contains_key(&key) {
            return false;
        }
        self.modules.insert(key, ModulePayload { kind, data });
        true
    }

    pub fn module(&self, key: &str) -> Option<&Value> {
        self.modules.get(key).map(|p| &p.data)
    }

    pub fn module_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.modules.get_mut(key).map(|p| &mut p.data)
    }

    pub fn payload(&self, key: &str) -> Option<&ModulePayload> {
        self.modules.get(key)
    }

    /// Module keys in sorted order
    pub fn module_keys(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Appends a file descriptor to its category, creating the category on first use
    pub fn add_file(&mut self, category: &str, file: FileRef) {
        self.files.entry(category.to_string()).or_default().push(file);
    }

    /// Flattens the view into the JSON object templates are rendered against
    pub fn to_template_data(&self) -> Value {
        let mut data = Map::new();
        for (key, payload) in &self.modules {
            data.insert(key.clone(), payload.data.clone());
        }

        if let Some(branche) = &self.branche {
            data.insert(
                "branche".to_string(),
                serde_json::json!({ "id": branche.id, "name": branche.name }),
            );
        }

        let files: Map<String, Value> = self
            .files
            .iter()
            .map(|(category, refs)| {
                let list = refs
                    .iter()
                    .map(|f| serde_json::json!({ "name": f.name, "url": f.url }))
                    .collect();
                (category.clone(), Value::Array(list))
            })
            .collect();
        data.insert("files".to_string(), Value::Object(files));

        data.insert(
            "outputDir".to_string(),
            Value::String(self.output_dir.to_string_lossy().into_owned()),
        );
        data.insert(
            "outputName".to_string(),
            Value::String(self.output_name.clone()),
        );
        data.insert(
            "includePersonalData".to_string(),
            Value::Bool(self.include_personal_data),
        );

        Value::Object(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("8-11", Some("lj"), Some("peuplade"); "louveteaux")]
    #[test_case("11-14", Some("sg"), Some("tribue"); "scouts")]
    #[test_case("14-17", Some("pk"), Some("caravanne"); "pionniers")]
    #[test_case("17-21", None, None; "outside known brackets")]
    #[test_case("", None, None; "empty code")]
    fn test_branche_from_type_code(code: &str, id: Option<&str>, name: Option<&str>) {
        let branche = Branche::from_type_code(code);
        assert_eq!(branche.as_ref().map(|b| b.id.as_str()), id);
        assert_eq!(branche.as_ref().map(|b| b.name.as_str()), name);
    }

    #[test]
    fn test_insert_module_keeps_first() {
        let mut view = View::default();
        assert!(view.insert_module("menu".into(), ModuleKind::Menu, json!({"v": 1})));
        assert!(!view.insert_module(
            "menu".into(),
            ModuleKind::Other("MENU".into()),
            json!({"v": 2})
        ));
        assert_eq!(view.module("menu"), Some(&json!({"v": 1})));
        assert_eq!(view.payload("menu").map(|p| &p.kind), Some(&ModuleKind::Menu));
    }

    #[test]
    fn test_add_file_appends_within_category() {
        let mut view = View::default();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            view.add_file(
                "photos",
                FileRef {
                    name: name.to_string(),
                    url: format!("photos/{name}"),
                },
            );
        }
        assert_eq!(view.files["photos"].len(), 3);
        assert_eq!(view.files["photos"][2].url, "photos/c.jpg");
    }

    #[test]
    fn test_template_data_contains_context_fields() {
        let mut view = View::new(PathBuf::from("out/Camp-Alpha"), "Camp-Alpha", false);
        view.insert_module("entete".into(), ModuleKind::Entete, json!({"statut": "OK"}));
        view.branche = Branche::from_type_code("11-14");

        let data = view.to_template_data();
        assert_eq!(data["entete"]["statut"], "OK");
        assert_eq!(data["branche"]["id"], "sg");
        assert_eq!(data["outputName"], "Camp-Alpha");
        assert_eq!(data["includePersonalData"], false);
        assert!(data["files"].as_object().map(|m| m.is_empty()).unwrap_or(false));
    }
}
