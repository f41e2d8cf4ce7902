//! Field registry: the bidirectional mapping between on-screen control
//! instances and their underlying field-type templates.
//!
//! Each template is stored once; any number of minted instance ids plus the
//! template's own `meta.id` resolve to that single stored value, so lookups
//! by either id class return the identical template. Entries are only
//! reclaimed by a full [`Registry::reset`].

use indexmap::IndexMap;

use crate::model::FieldTemplate;

/// Process-wide (per builder instance) template store. Written by the
/// composition engine at build time, read by activation handlers afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: Vec<FieldTemplate>,
    index: IndexMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `template` under both `instance_id` and its own `meta.id`.
    ///
    /// Registering the same template under further instance ids is always
    /// allowed and never removes prior bindings; the template value is
    /// stored once and shared by every id pointing at it. No shape
    /// validation happens here — a malformed template surfaces later as a
    /// lookup miss.
    pub fn register(&mut self, instance_id: &str, template: &FieldTemplate) {
        let slot = match self.index.get(&template.meta.id).copied() {
            Some(slot) => slot,
            None => {
                self.templates.push(template.clone());
                let slot = self.templates.len() - 1;
                self.index.insert(template.meta.id.clone(), slot);
                slot
            }
        };
        self.index.insert(instance_id.to_string(), slot);
    }

    /// Resolve an instance id or template id to its template.
    pub fn lookup(&self, id: &str) -> Option<&FieldTemplate> {
        self.index.get(id).map(|&slot| &self.templates[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered ids (instance ids plus template ids).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Full teardown; the only way entries are reclaimed.
    pub fn reset(&mut self) {
        self.templates.clear();
        self.index.clear();
    }
}
