//! JSON module documents.
//!
//! A document carries the module list and the settings it was entered
//! under. Loading is lenient about module fields (see [`Module`]) but
//! rejects documents without a `modules` array or with settings that name
//! an unknown scheme or policy.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::DocumentError;
use crate::model::{Module, Scheme, Settings, UgPolicy};

/// Settings as stored in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Whether the owner wants the document persisted between sessions.
    #[serde(rename = "saveCookie", default = "default_true")]
    pub save_cookie: bool,
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default)]
    pub ug_policy: UgPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            save_cookie: true,
            scheme: Scheme::default(),
            ug_policy: UgPolicy::default(),
        }
    }
}

impl DocumentSettings {
    pub fn settings(&self) -> Settings {
        Settings::new(self.scheme, self.ug_policy)
    }
}

/// A module list together with its settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub settings: DocumentSettings,
}

impl Document {
    pub fn new(modules: Vec<Module>, settings: Settings) -> Self {
        Self {
            modules,
            settings: DocumentSettings {
                scheme: settings.scheme,
                ug_policy: settings.ug_policy,
                ..DocumentSettings::default()
            },
        }
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(content)?;
        if !value.get("modules").is_some_and(Value::is_array) {
            return Err(DocumentError::MissingModules);
        }

        let settings = match value.get("settings") {
            Some(Value::Null) | None => DocumentSettings::default(),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| DocumentError::InvalidSettings(e.to_string()))?,
        };
        let modules: Vec<Module> = serde_json::from_value(value["modules"].clone())?;

        for (index, module) in modules.iter().enumerate() {
            if ![5, 6, 7].contains(&module.level) {
                tracing::warn!(
                    index,
                    code = %module.code,
                    level = module.level,
                    "module has no usable level and will be ignored"
                );
            }
        }

        Ok(Self { modules, settings })
    }

    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            modules = document.modules.len(),
            scheme = %document.settings.scheme,
            "document loaded"
        );
        Ok(document)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let io_err = |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json_string()?).map_err(io_err)
    }

    /// Evaluation settings of this document.
    pub fn evaluation_settings(&self) -> Settings {
        self.settings.settings()
    }

    /// Copy with codes uppercased, the way they are shown on entry.
    pub fn normalized(&self) -> Self {
        let modules = self
            .modules
            .iter()
            .map(|m| Module {
                code: m.code.to_uppercase(),
                ..m.clone()
            })
            .collect();
        Self {
            modules,
            settings: self.settings,
        }
    }

    /// Copy re-targeted to `scheme`. Modules whose level the new scheme does
    /// not use move to the scheme's first level.
    pub fn with_scheme(&self, scheme: Scheme) -> Self {
        let first = scheme.levels()[0];
        let modules = self
            .modules
            .iter()
            .map(|m| {
                if scheme.accepts_level(m.level) {
                    m.clone()
                } else {
                    Module {
                        level: first,
                        ..m.clone()
                    }
                }
            })
            .collect();
        Self {
            modules,
            settings: DocumentSettings {
                scheme,
                ..self.settings
            },
        }
    }

    /// Copy with a different undergraduate policy.
    pub fn with_ug_policy(&self, ug_policy: UgPolicy) -> Self {
        Self {
            modules: self.modules.clone(),
            settings: DocumentSettings {
                ug_policy,
                ..self.settings
            },
        }
    }
}

/// Description of the document format.
pub fn schema() -> Value {
    json!({
        "modules": [{
            "level": "5|6|7",
            "code": "AAA9999 or AAAA9999",
            "credits": "number",
            "mark": "0..100"
        }],
        "settings": {
            "saveCookie": "bool",
            "scheme": "ug | im | masters",
            "ug_policy": "before_2023 | on_or_after_2023"
        }
    })
}

/// Example module list for a scheme.
pub fn sample_modules(scheme: Scheme) -> Vec<Module> {
    let rows: &[(u8, &str, f64, f64)] = match scheme {
        Scheme::Undergraduate => &[
            (5, "COMP2101", 30.0, 62.0),
            (5, "DBMS2010", 15.0, 58.0),
            (5, "SOFT2068", 15.0, 68.0),
            (5, "OSYS2077", 30.0, 64.0),
            (6, "PROJ3154", 45.0, 72.0),
            (6, "NETS3110", 30.0, 66.0),
            (6, "CYBR3142", 15.0, 74.0),
            (6, "CLOUD3161", 15.0, 63.0),
        ],
        Scheme::IntegratedMasters => &[
            (6, "INTR6001", 30.0, 65.0),
            (6, "CORE6010", 30.0, 62.0),
            (6, "OPTI6030", 30.0, 68.0),
            (6, "LABS6040", 30.0, 64.0),
            (7, "PROJ7001", 60.0, 72.0),
            (7, "ADVN7030", 30.0, 66.0),
            (7, "ELEC7040", 30.0, 70.0),
        ],
        Scheme::Masters => &[
            (7, "PROJ7001", 60.0, 72.0),
            (7, "RESM7005", 30.0, 65.0),
            (7, "ADVT7012", 30.0, 68.0),
            (7, "ELECT7031", 30.0, 62.0),
        ],
    };
    rows.iter()
        .map(|&(level, code, credits, mark)| Module::new(level, code, credits, mark))
        .collect()
}

/// Example document for a scheme.
pub fn sample_document(scheme: Scheme) -> Document {
    Document::new(
        sample_modules(scheme),
        Settings::new(scheme, UgPolicy::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_document() {
        let json = r#"{
            "modules": [
                {"level": 5, "code": "comp2101", "credits": 30, "mark": 62},
                {"level": 6, "code": "PROJ3154", "credits": 45, "mark": null}
            ],
            "settings": {"saveCookie": false, "scheme": "ug", "ug_policy": "on_or_after_2023"}
        }"#;
        let doc = Document::from_json_str(json).unwrap();
        assert_eq!(doc.modules.len(), 2);
        assert_eq!(doc.modules[1].mark, None);
        assert!(!doc.settings.save_cookie);
        assert_eq!(doc.settings.ug_policy, UgPolicy::OnOrAfter2023);
    }

    #[test]
    fn missing_settings_take_defaults() {
        let doc = Document::from_json_str(r#"{"modules": []}"#).unwrap();
        assert_eq!(doc.settings, DocumentSettings::default());

        let doc = Document::from_json_str(r#"{"modules": [], "settings": {"scheme": "im"}}"#)
            .unwrap();
        assert_eq!(doc.settings.scheme, Scheme::IntegratedMasters);
        assert_eq!(doc.settings.ug_policy, UgPolicy::Before2023);
        assert!(doc.settings.save_cookie);
    }

    #[test]
    fn rejects_documents_without_modules() {
        assert!(matches!(
            Document::from_json_str(r#"{"settings": {}}"#),
            Err(DocumentError::MissingModules)
        ));
        assert!(matches!(
            Document::from_json_str(r#"{"modules": {"level": 5}}"#),
            Err(DocumentError::MissingModules)
        ));
        assert!(matches!(
            Document::from_json_str("not json"),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = Document::from_json_str(r#"{"modules": [], "settings": {"scheme": "phd"}}"#)
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidSettings(_)));
    }

    #[test]
    fn scheme_switch_reassigns_levels() {
        let doc = sample_document(Scheme::Undergraduate).with_scheme(Scheme::Masters);
        assert_eq!(doc.settings.scheme, Scheme::Masters);
        assert!(doc.modules.iter().all(|m| m.level == 7));

        let doc = sample_document(Scheme::Undergraduate).with_scheme(Scheme::IntegratedMasters);
        assert_eq!(doc.modules[0].level, 6);
        assert_eq!(doc.modules[4].level, 6);
    }

    #[test]
    fn normalized_uppercases_codes() {
        let doc = Document::new(
            vec![Module::new(5, "comp2101", 30.0, 62.0)],
            Settings::default(),
        );
        assert_eq!(doc.normalized().modules[0].code, "COMP2101");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("degree.json");
        let doc = sample_document(Scheme::IntegratedMasters);

        doc.save(&path).unwrap();
        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Document::load(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn schema_lists_fields() {
        let s = schema();
        assert_eq!(s["settings"]["scheme"], "ug | im | masters");
        assert!(s["modules"][0].get("credits").is_some());
    }
}
