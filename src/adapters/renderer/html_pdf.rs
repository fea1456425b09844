//! Handlebars HTML rendering followed by an external HTML-to-PDF converter

use super::traits::DocumentRenderer;
use crate::config::RenderConfig;
use crate::core::format;
use crate::domain::{CampdocError, Result, View};
use async_trait::async_trait;
use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, HelperResult, Output,
    RenderContext, Renderable,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;

const TEMPLATE_NAME: &str = "dossier";

/// Longest slice of converter stderr kept in error messages
const MAX_STDERR: usize = 1024;

handlebars_helper!(date_helper: |v: Json| format::date(&format::value_text(v)));
handlebars_helper!(nameddate_helper: |v: Json| format::nameddate(&format::value_text(v)));
handlebars_helper!(fulldate_helper: |v: Json| format::fulldate(&format::value_text(v)));
handlebars_helper!(datetime_helper: |v: Json| format::datetime(&format::value_text(v)));
handlebars_helper!(shortdate_helper: |v: Json| format::shortdate(&format::value_text(v)));
handlebars_helper!(lower_helper: |v: Json| format::lower(&format::value_text(v)));
handlebars_helper!(trim_helper: |v: Json| format::trim(&format::value_text(v)));

/// `{{#ifEquals a b}}...{{else}}...{{/ifEquals}}` with loose equality
struct IfEquals;

impl HelperDef for IfEquals {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let null = Value::Null;
        let left = h.param(0).map(|p| p.value()).unwrap_or(&null);
        let right = h.param(1).map(|p| p.value()).unwrap_or(&null);

        let branch = if format::loose_equals(left, right) {
            h.template()
        } else {
            h.inverse()
        };

        match branch {
            Some(template) => template.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// `{{#contains value list}}...{{/contains}}`; a scalar list is a one-element list
struct Contains;

impl HelperDef for Contains {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let null = Value::Null;
        let needle = h.param(0).map(|p| p.value()).unwrap_or(&null);
        let haystack = h.param(1).map(|p| p.value()).unwrap_or(&null);

        match h.template() {
            Some(template) if format::contains(haystack, needle) => {
                template.render(r, ctx, rc, out)
            }
            _ => Ok(()),
        }
    }
}

/// Builds a registry holding the formatting helpers
pub fn registry() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("date", Box::new(date_helper));
    handlebars.register_helper("nameddate", Box::new(nameddate_helper));
    handlebars.register_helper("fulldate", Box::new(fulldate_helper));
    handlebars.register_helper("datetime", Box::new(datetime_helper));
    handlebars.register_helper("shortdate", Box::new(shortdate_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("trim", Box::new(trim_helper));
    handlebars.register_helper("ifEquals", Box::new(IfEquals));
    handlebars.register_helper("contains", Box::new(Contains));
    handlebars
}

/// Renders `{stem}.html` from a template and converts it to `{stem}.pdf`
pub struct HtmlPdfRenderer {
    registry: Handlebars<'static>,
    converter: String,
    converter_args: Vec<String>,
    keep_html: bool,
}

impl HtmlPdfRenderer {
    /// Loads and compiles the template named in the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the template cannot be read or
    /// does not compile.
    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        let source = std::fs::read_to_string(&config.template).map_err(|e| {
            CampdocError::Configuration(format!(
                "Failed to read template {}: {e}",
                config.template
            ))
        })?;

        let renderer = Self::from_template(&source, config)?;
        tracing::info!(template = %config.template, converter = %config.converter, "Template loaded");
        Ok(renderer)
    }

    /// Compiles a template given as source text
    pub fn from_template(source: &str, config: &RenderConfig) -> Result<Self> {
        let mut registry = registry();
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| CampdocError::Configuration(format!("Invalid template: {e}")))?;

        Ok(Self {
            registry,
            converter: config.converter.clone(),
            converter_args: config.converter_args.clone(),
            keep_html: config.keep_html,
        })
    }

    /// Renders the template against the view
    pub fn render_html(&self, view: &View) -> Result<String> {
        self.registry
            .render(TEMPLATE_NAME, &view.to_template_data())
            .map_err(|e| CampdocError::Render(format!("Template rendering failed: {e}")))
    }

    async fn convert(&self, html: &Path, pdf: &Path) -> Result<()> {
        let output = tokio::process::Command::new(&self.converter)
            .args(&self.converter_args)
            .arg(html)
            .arg(pdf)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                CampdocError::Render(format!("Failed to run {}: {e}", self.converter))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.chars().take(MAX_STDERR).collect();
            return Err(CampdocError::Render(format!(
                "{} exited with {}: {}",
                self.converter,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DocumentRenderer for HtmlPdfRenderer {
    async fn render(&self, view: &View, output_stem: &Path) -> Result<PathBuf> {
        let html_path = with_suffix(output_stem, "html");
        let pdf_path = with_suffix(output_stem, "pdf");

        if let Some(parent) = output_stem.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let html = self.render_html(view)?;
        tokio::fs::write(&html_path, html).await?;

        let converted = self.convert(&html_path, &pdf_path).await;

        if !self.keep_html {
            if let Err(e) = tokio::fs::remove_file(&html_path).await {
                tracing::warn!(path = %html_path.display(), error = %e, "Could not remove intermediate HTML");
            }
        }

        converted?;

        tracing::info!(document = %pdf_path.display(), "Document rendered");
        Ok(pdf_path)
    }
}

/// Appends `.{ext}` to a stem that may itself contain dots
fn with_suffix(stem: &Path, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branche, FileRef, ModuleKind};
    use serde_json::json;

    fn config(converter: &str, args: &[&str], keep_html: bool) -> RenderConfig {
        RenderConfig {
            converter: converter.to_string(),
            converter_args: args.iter().map(|s| s.to_string()).collect(),
            keep_html,
            ..Default::default()
        }
    }

    fn view() -> View {
        let mut view = View::new(PathBuf::from("out/Camp-Alpha"), "Camp-Alpha", false);
        view.insert_module(
            "entete".into(),
            ModuleKind::Entete,
            json!({"statut": "VALIDE", "dateDebut": "2025-07-14T09:30:00+02:00", "tags": ["a", "b"]}),
        );
        view.branche = Branche::from_type_code("11-14");
        view.add_file(
            "photos",
            FileRef {
                name: "a.jpg".into(),
                url: "photos/a.jpg".into(),
            },
        );
        view
    }

    #[test]
    fn test_helpers_render() {
        let template = concat!(
            "{{date entete.dateDebut}}|{{nameddate entete.dateDebut}}|",
            "{{shortdate entete.dateDebut}}|{{lower entete.statut}}|",
            "{{#ifEquals branche.id \"sg\"}}scouts{{else}}other{{/ifEquals}}|",
            "{{#contains \"b\" entete.tags}}has-b{{/contains}}|",
            "{{#contains \"z\" entete.tags}}has-z{{/contains}}|",
            "{{#each files.photos}}{{url}}{{/each}}|{{outputName}}"
        );
        let renderer = HtmlPdfRenderer::from_template(template, &config("true", &[], false)).unwrap();

        let html = renderer.render_html(&view()).unwrap();
        assert_eq!(
            html,
            "14 juillet|lu 14|14/07|valide|scouts|has-b||photos/a.jpg|Camp-Alpha"
        );
    }

    #[test]
    fn test_missing_values_render_empty() {
        let renderer = HtmlPdfRenderer::from_template(
            "[{{fulldate entete.nope}}][{{trim entete.nope}}]",
            &config("true", &[], false),
        )
        .unwrap();
        assert_eq!(renderer.render_html(&View::default()).unwrap(), "[][]");
    }

    #[test]
    fn test_invalid_template_is_configuration_error() {
        let result = HtmlPdfRenderer::from_template("{{#if}}", &config("true", &[], false));
        assert!(matches!(result, Err(CampdocError::Configuration(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_runs_converter_and_removes_html() {
        let dir = tempfile::tempdir().unwrap();
        // `cp input output` stands in for the converter
        let renderer =
            HtmlPdfRenderer::from_template("<p>{{entete.statut}}</p>", &config("cp", &[], false))
                .unwrap();

        let stem = dir.path().join("Camp-Alpha").join("Camp-Alpha");
        let pdf = renderer.render(&view(), &stem).await.unwrap();

        assert_eq!(pdf, stem.with_extension("pdf"));
        assert_eq!(std::fs::read_to_string(&pdf).unwrap(), "<p>VALIDE</p>");
        assert!(!stem.with_extension("html").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_converter_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer =
            HtmlPdfRenderer::from_template("x", &config("false", &[], true)).unwrap();

        let stem = dir.path().join("Camp");
        let result = renderer.render(&view(), &stem).await;

        assert!(matches!(result, Err(CampdocError::Render(_))));
        assert!(stem.with_extension("html").exists());
    }

    #[test]
    fn test_with_suffix_keeps_dotted_names() {
        assert_eq!(
            with_suffix(Path::new("out/Camp v1.2/Camp v1.2"), "pdf"),
            PathBuf::from("out/Camp v1.2/Camp v1.2.pdf")
        );
    }
}
