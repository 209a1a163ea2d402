use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod localization;

pub use localization::{interpolate, Vars};

/// Key -> template mapping of one language.
pub type Catalog = HashMap<String, String>;

/// Catalogs per language with a default-language fallback.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogs: HashMap<String, Catalog>,
    default_language: String,
}

impl Translator {
    pub fn new(default_language: String) -> Self {
        info!("Initializing translator (default: {})", default_language);

        Self { catalogs: HashMap::new(), default_language }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Switch the fallback language; refused when no catalog is loaded for it.
    pub fn set_default_language(&mut self, language: &str) -> bool {
        if !self.is_language_supported(language) {
            return false;
        }
        self.default_language = language.to_string();
        true
    }

    /// Parse a JSON catalog (`{"KEY": "template"}`) and register it for `language`.
    pub fn load_language(&mut self, language: &str, content: &str) -> Result<()> {
        debug!("Loading language: {}", language);

        let catalog: Catalog = serde_json::from_str(content)
            .with_context(|| format!("Failed to parse catalog for '{}'", language))?;

        info!("Loaded language: {} ({} keys)", language, catalog.len());
        self.catalogs.insert(language.to_string(), catalog);
        Ok(())
    }

    /// Load every `<lang>.json` in `dir`. Returns the languages loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<String>> {
        let mut loaded = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read catalog directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            self.load_language(language, &content)?;
            loaded.push(language.to_string());
        }
        loaded.sort();
        Ok(loaded)
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.catalogs.get(language).and_then(|c| c.get(key)).map(String::as_str)
    }

    fn template(&self, language: &str, key: &str) -> Option<&str> {
        self.lookup(language, key).or_else(|| {
            if language != self.default_language {
                debug!("'{}' missing in '{}', trying '{}'", key, language, self.default_language);
            }
            self.lookup(&self.default_language, key)
        })
    }

    /// Translated text for `key`; the key itself when it cannot be produced.
    pub fn get_text(&self, language: &str, key: &str, vars: Option<&Vars>) -> String {
        let Some(template) = self.template(language, key) else {
            warn!("Message '{}' not found in language '{}'", key, language);
            return key.to_string();
        };

        match vars {
            None => template.to_string(),
            Some(vars) => interpolate(template, vars).unwrap_or_else(|| {
                warn!("Message '{}' has a variable without value, fallback to key", key);
                key.to_string()
            }),
        }
    }

    /// Whether `key` resolves in `language` or the default language.
    pub fn has_key(&self, language: &str, key: &str) -> bool {
        self.template(language, key).is_some()
    }

    pub fn get_supported_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.catalogs.keys().cloned().collect();
        languages.sort();
        languages
    }

    pub fn is_language_supported(&self, language: &str) -> bool {
        self.catalogs.contains_key(language)
    }
}

pub fn init_default_languages() -> Result<Translator> {
    let mut translator = Translator::new("en".to_string());

    // English always ships inside the binary.
    translator.load_language("en", include_str!("../../resources/i18n/en.json"))?;

    #[cfg(not(feature = "runtime-catalogs"))]
    {
        translator.load_language("zh", include_str!("../../resources/i18n/zh.json"))?;
    }

    #[cfg(feature = "runtime-catalogs")]
    {
        let dir = std::env::var("I18N_DIR").unwrap_or_else(|_| "resources/i18n".to_string());
        if let Err(e) = translator.load_dir(Path::new(&dir)) {
            warn!("Runtime catalogs unavailable ({:#}); only English is loaded", e);
        }
    }

    Ok(translator)
}

static TRANSLATOR: OnceCell<Translator> = OnceCell::new();

/// Install the process-wide translator. Only the first call wins.
pub fn install(translator: Translator) -> bool {
    TRANSLATOR.set(translator).is_ok()
}

/// The process-wide translator, built from the bundled catalogs if none was installed.
pub fn global() -> &'static Translator {
    TRANSLATOR.get_or_init(|| {
        init_default_languages().unwrap_or_else(|e| {
            warn!("Failed to load bundled catalogs: {:#}", e);
            Translator::new("en".to_string())
        })
    })
}

/// Translate `key` in the default language.
pub fn translate_raw(key: &str, vars: Option<&Vars>) -> String {
    let translator = global();
    translator.get_text(translator.default_language(), key, vars)
}

/// Translate `key` in `language`, falling back to the default language.
pub fn translate(key: &str, language: &str, vars: Option<&Vars>) -> String {
    global().get_text(language, key, vars)
}
