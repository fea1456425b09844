//! Fetches a camp's modules and merges them into one [`View`]

use crate::adapters::api::CampApi;
use crate::config::FetchConfig;
use crate::domain::models::{project, Entete};
use crate::domain::{Branche, Camp, CampId, CampdocError, ModuleKind, ModuleSpec, Result, View};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;
use std::sync::Arc;

/// View key of the optional survey module
const SURVEY_MODULE_KEY: &str = "appel-age-sup";

/// Field of the survey module holding the responses map
const SURVEY_RESPONSES_FIELD: &str = "surveyjsReponsesJson";

/// Builds camp views from the header, the baseline modules and the
/// header-declared active modules
pub struct ModuleAggregator {
    api: Arc<dyn CampApi>,
    parallel_modules: usize,
    alias_key: String,
}

impl ModuleAggregator {
    pub fn new(api: Arc<dyn CampApi>, config: &FetchConfig) -> Self {
        Self {
            api,
            parallel_modules: config.parallel_modules.max(1),
            alias_key: config.camp_alias_key.clone(),
        }
    }

    /// Fetches the header module of a camp
    pub async fn fetch_header(&self, camp_id: &CampId) -> Result<Value> {
        let spec = ModuleSpec::header(camp_id);
        self.api.get_json(&spec.endpoint).await
    }

    /// Completes `view` with every module of the camp
    ///
    /// `header` is the payload returned by [`fetch_header`](Self::fetch_header).
    /// Fails on the first module that cannot be fetched; the caller never
    /// sees a partially filled view.
    pub async fn build_view(&self, camp: &Camp, header: Value, mut view: View) -> Result<View> {
        let entete: Entete = project(Some(&header));
        let specs = module_specs(&camp.id, &entete);

        tracing::debug!(
            camp_id = %camp.id,
            modules = specs.len(),
            parallel = self.parallel_modules,
            "Fetching modules"
        );

        self.insert(&mut view, camp, ModuleKind::Entete, header);

        // Results come back in list order whatever the fan-out
        let api = &self.api;
        let fetched: Vec<(ModuleSpec, Value)> = stream::iter(specs)
            .map(|spec| async move {
                let data = api.get_json(&spec.endpoint).await?;
                Ok::<_, CampdocError>((spec, data))
            })
            .buffered(self.parallel_modules)
            .try_collect()
            .await?;

        for (spec, data) in fetched {
            self.insert(&mut view, camp, spec.kind, data);
        }

        view.branche = entete
            .type_camp
            .code
            .as_deref()
            .and_then(Branche::from_type_code);
        if view.branche.is_none() {
            tracing::debug!(
                camp_id = %camp.id,
                type_code = ?entete.type_camp.code,
                "No branch for camp type"
            );
        }

        if let Some(survey) = view.module_mut(SURVEY_MODULE_KEY) {
            flatten_survey(survey);
        }

        tracing::info!(
            camp_id = %camp.id,
            modules = view.module_count(),
            branche = ?view.branche.as_ref().map(|b| b.id.as_str()),
            "View assembled"
        );

        Ok(view)
    }

    fn insert(&self, view: &mut View, camp: &Camp, kind: ModuleKind, mut data: Value) {
        alias_camp(&mut data, &self.alias_key);

        let key = kind.view_key();
        if !view.insert_module(key.clone(), kind.clone(), data) {
            let owner = view
                .payload(&key)
                .map(|p| p.kind.to_string())
                .unwrap_or_default();
            tracing::warn!(
                camp_id = %camp.id,
                module = %kind,
                key = %key,
                kept = %owner,
                "Duplicate module key, keeping the first payload"
            );
        }
    }
}

/// Baseline modules followed by the header's active modules, in list order
pub fn module_specs(camp_id: &CampId, header: &Entete) -> Vec<ModuleSpec> {
    let mut specs = ModuleSpec::baseline(camp_id);

    for module in header.camp_modules.iter().filter(|m| m.actif) {
        match (module.module.code.as_deref(), module.id.as_deref()) {
            (Some(code), Some(id)) if !code.is_empty() && !id.is_empty() => {
                specs.push(ModuleSpec::active_module(code, id));
            }
            _ => {
                tracing::warn!(
                    camp_id = %camp_id,
                    code = ?module.module.code,
                    instance_id = ?module.id,
                    "Active module without code or id, skipping"
                );
            }
        }
    }

    specs
}

/// Copies `payload[alias_key]` to `payload.camp`
fn alias_camp(payload: &mut Value, alias_key: &str) {
    if let Value::Object(map) = payload {
        if let Some(camp) = map.get(alias_key).cloned() {
            map.insert("camp".to_string(), camp);
        }
    }
}

/// Sets `appel` to the last entry of the survey responses map
fn flatten_survey(survey: &mut Value) {
    let responses = match survey.get(SURVEY_RESPONSES_FIELD) {
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Survey responses are not valid JSON");
                return;
            }
        },
        Some(other) => other.clone(),
        None => return,
    };

    let last = match &responses {
        Value::Object(map) => map.values().next_back().cloned(),
        _ => None,
    };

    if let (Some(appel), Value::Object(map)) = (last, survey) {
        map.insert("appel".to_string(), appel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::Path;
    use std::str::FromStr;
    use std::sync::Mutex;

    /// In-memory API keyed by request path
    struct FakeApi {
        responses: HashMap<String, Value>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn new(responses: HashMap<String, Value>) -> Self {
            Self {
                responses,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CampApi for FakeApi {
        async fn get_json(&self, path: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(path.to_string());
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| ApiError::from_status(404, path.to_string()).into())
        }

        async fn download(&self, _path: &str, _destination: &Path) -> Result<u64> {
            Ok(0)
        }
    }

    fn camp() -> Camp {
        Camp::new(CampId::from_str("42").unwrap(), "Camp-Alpha")
    }

    fn header() -> Value {
        json!({
            "statut": "VALIDE",
            "typeCamp": {"code": "11-14"},
            "camp817": {"id": 42, "libelle": "Camp-Alpha"},
            "campModules": [
                {"id": 901, "actif": true, "module": {"code": "APPEL"}},
                {"id": 902, "actif": true, "module": {"code": "MENU_SPECIAL"}},
                {"id": 903, "actif": false, "module": {"code": "IGNORED"}}
            ]
        })
    }

    fn responses() -> HashMap<String, Value> {
        let mut responses = HashMap::new();
        for spec in ModuleSpec::baseline(&camp().id) {
            responses.insert(
                spec.endpoint.clone(),
                json!({"module": spec.kind.code(), "camp817": {"id": 42}}),
            );
        }
        responses.insert("/api/camp-modules/901".into(), json!({"question": "q"}));
        responses.insert("/api/camp-modules/902".into(), json!({"menu": []}));
        responses
    }

    #[test]
    fn test_module_specs_appends_active_modules() {
        let entete: Entete = project(Some(&header()));
        let specs = module_specs(&camp().id, &entete);
        assert_eq!(specs.len(), 12);
        assert_eq!(specs[10].endpoint, "/api/camp-modules/901");
        assert_eq!(specs[11].kind, ModuleKind::Other("MENU_SPECIAL".into()));
    }

    #[tokio::test]
    async fn test_build_view_keys_and_branche() {
        for parallel in [1, 4] {
            let api = Arc::new(FakeApi::new(responses()));
            let config = FetchConfig {
                parallel_modules: parallel,
                ..Default::default()
            };
            let aggregator = ModuleAggregator::new(api.clone(), &config);

            let view = aggregator
                .build_view(&camp(), header(), View::default())
                .await
                .unwrap();

            assert_eq!(
                view.module_keys(),
                vec![
                    "appel",
                    "budget",
                    "entete",
                    "grille_activite",
                    "info_generale",
                    "journee_type",
                    "lieux",
                    "menu",
                    "menu_special",
                    "numero_utile",
                    "participant",
                    "projet_peda",
                    "staff",
                ]
            );
            assert_eq!(view.branche, Branche::from_type_code("11-14"));
            assert_eq!(view.module("entete").unwrap()["camp"]["libelle"], "Camp-Alpha");
            assert_eq!(view.module("menu").unwrap()["camp"]["id"], 42);
            assert!(view.module("appel").unwrap().get("camp").is_none());
            assert_eq!(api.calls.lock().unwrap().len(), 12);
        }
    }

    #[tokio::test]
    async fn test_active_module_cannot_overwrite_baseline() {
        let mut header = header();
        header["campModules"] = json!([{"id": 950, "actif": true, "module": {"code": "menu"}}]);
        let mut responses = responses();
        responses.insert("/api/camp-modules/950".into(), json!({"override": true}));

        let aggregator =
            ModuleAggregator::new(Arc::new(FakeApi::new(responses)), &FetchConfig::default());
        let view = aggregator
            .build_view(&camp(), header, View::default())
            .await
            .unwrap();

        assert_eq!(view.module_count(), 11);
        assert_eq!(view.module("menu").unwrap()["module"], "MENU");
    }

    #[tokio::test]
    async fn test_failed_module_fails_the_view() {
        let mut responses = responses();
        responses.remove("/api/camps/42?module=BUDGET");

        let aggregator =
            ModuleAggregator::new(Arc::new(FakeApi::new(responses)), &FetchConfig::default());
        let result = aggregator.build_view(&camp(), header(), View::default()).await;

        assert!(matches!(
            result,
            Err(CampdocError::Api(ApiError::ClientError { status: 404, .. }))
        ));
    }

    #[test]
    fn test_flatten_survey_takes_last_entry() {
        let mut survey = json!({
            "surveyjsReponsesJson": {"first": {"v": 1}, "second": {"v": 2}}
        });
        flatten_survey(&mut survey);
        assert_eq!(survey["appel"], json!({"v": 2}));

        let mut encoded = json!({"surveyjsReponsesJson": "{\"only\": \"yes\"}"});
        flatten_survey(&mut encoded);
        assert_eq!(encoded["appel"], "yes");

        let mut absent = json!({"other": 1});
        flatten_survey(&mut absent);
        assert!(absent.get("appel").is_none());
    }
}
