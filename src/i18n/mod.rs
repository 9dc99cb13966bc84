//! Localized strings for bot replies and buttons.
//!
//! Translations live in `<locale>.json` files, one nested object per
//! language. Keys are dotted paths (`"buttons.pagination.next"`). A miss in
//! the requested locale falls back to the base locale, then to the raw key.

mod format;


pub use format::interpolate;

use notshop_core::{error::NotshopError, traits::Localizer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// All loaded translation trees, keyed by locale code.
#[derive(Debug, Clone)]
pub struct Translations {
    locales: HashMap<String, Value>,
    base: String,
}

impl Translations {
    /// Empty set of translations with `base` as the fallback locale.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            locales: HashMap::new(),
            base: base.into(),
        }
    }

    /// Add or replace the tree for `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, tree: Value) {
        self.locales.insert(locale.into(), tree);
    }

    /// Load every `*.json` file in `dir`; the file stem is the locale code.
    ///
    /// Files that fail to read or parse are logged and skipped.
    pub fn load_dir(dir: &Path, base: &str) -> Result<Self, NotshopError> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            NotshopError::Locale(format!("cannot read locale dir {}: {e}", dir.display()))
        })?;

        let mut translations = Self::new(base);
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let parsed = std::fs::read_to_string(&path)
                .map_err(NotshopError::from)
                .and_then(|content| serde_json::from_str::<Value>(&content).map_err(NotshopError::from));
            match parsed {
                Ok(tree) => {
                    info!("loaded translations for '{locale}'");
                    translations.insert(locale, tree);
                }
                Err(e) => warn!("failed to load translations for '{locale}': {e}"),
            }
        }

        if !translations.has_locale(base) {
            warn!("base locale '{base}' has no translation file in {}", dir.display());
        }
        Ok(translations)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Loaded locale codes, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Pick the locale for a platform language tag.
    ///
    /// Tries the full tag (`pt-BR`), then its primary subtag (`pt`), then
    /// falls back to the base locale.
    pub fn resolve_locale(&self, language_code: Option<&str>) -> String {
        let Some(code) = language_code.filter(|c| !c.is_empty()) else {
            return self.base.clone();
        };
        if self.has_locale(code) {
            return code.to_string();
        }
        let primary = code.split(['-', '_']).next().unwrap_or(code);
        if self.has_locale(primary) {
            return primary.to_string();
        }
        self.base.clone()
    }

    /// Localized text for `key`, with `{name}` placeholders filled from `params`.
    pub fn get_text(&self, key: &str, locale: &str, params: &[(&str, String)]) -> String {
        let template = self
            .lookup(locale, key)
            .or_else(|| {
                debug!("key '{key}' missing for '{locale}', trying base '{}'", self.base);
                self.lookup(&self.base, key)
            });

        match template {
            Some(template) => interpolate(template, params),
            None => {
                debug!("key '{key}' not found in any locale");
                key.to_string()
            }
        }
    }

    /// Walk the dotted `key` through `locale`'s tree; only string leaves count.
    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        let mut node = self.locales.get(locale)?;
        for part in key.split('.') {
            node = node.as_object()?.get(part)?;
        }
        node.as_str()
    }
}

impl Localizer for Translations {
    fn resolve(&self, key: &str, locale: &str, params: &[(&str, String)]) -> String {
        self.get_text(key, locale, params)
    }
}

/// A user's locale bound to the loaded translations.
#[derive(Debug, Clone, Copy)]
pub struct Lang<'a> {
    translations: &'a Translations,
    locale: &'a str,
}

impl<'a> Lang<'a> {
    pub fn new(translations: &'a Translations, locale: &'a str) -> Self {
        Self {
            translations,
            locale,
        }
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    pub fn translations(&self) -> &'a Translations {
        self.translations
    }

    /// Static text for `key`.
    pub fn t(&self, key: &str) -> String {
        self.translations.get_text(key, self.locale, &[])
    }

    /// Text for `key` with interpolation.
    pub fn tf(&self, key: &str, params: &[(&str, String)]) -> String {
        self.translations.get_text(key, self.locale, params)
    }
}
