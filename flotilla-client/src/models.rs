//! Model catalog, alias resolution, and capability selection

use std::collections::HashMap;

use flotilla_core::{Capability, Model};

use crate::constants::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

/// The models a service offers, with their aliases and a default
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    /// Models producing streamed text
    pub text_models: Vec<String>,
    /// Models producing images
    pub image_models: Vec<String>,
    /// Alternative names accepted for catalog entries
    pub aliases: HashMap<String, String>,
    /// Model used when the request names none, or an unknown one
    pub default_model: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        aliases.insert("flux".to_string(), DEFAULT_IMAGE_MODEL.to_string());

        Self {
            text_models: vec![DEFAULT_TEXT_MODEL.to_string()],
            image_models: vec![DEFAULT_IMAGE_MODEL.to_string()],
            aliases,
            default_model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

/// A catalog-resolved model name together with its capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Canonical model name
    pub name: String,
    /// What the model produces
    pub capability: Capability,
}

impl ModelCatalog {
    /// Resolve a requested model name against the catalog
    ///
    /// Exact catalog entries resolve to themselves and aliases to their
    /// target; anything else, including no requested model at all,
    /// resolves to the default model. The resolved name's membership in
    /// the image list decides the capability.
    pub fn resolve(&self, requested: Option<&Model>) -> ResolvedModel {
        let name = match requested {
            Some(model) if self.knows(&model.0) => model.0.clone(),
            Some(model) => self
                .aliases
                .get(&model.0)
                .cloned()
                .unwrap_or_else(|| self.default_model.clone()),
            None => self.default_model.clone(),
        };

        let capability = if self.image_models.iter().any(|m| *m == name) {
            Capability::Image
        } else {
            Capability::Text
        };

        ResolvedModel { name, capability }
    }

    fn knows(&self, name: &str) -> bool {
        self.text_models
            .iter()
            .chain(self.image_models.iter())
            .any(|m| m == name)
    }
}
