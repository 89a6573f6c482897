//! A bound set of fields.

use serde_json::Value;
use tracing::debug;

use crate::field::FieldDescriptor;
use crate::metadata::{InputDecl, extract_rules};
use crate::registry::RuleRegistry;

/// The fields of one form, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<FieldDescriptor>,
}

impl Form {
    /// Builds fields from input declarations.
    ///
    /// Radio buttons and checkboxes bound to the same model collapse into
    /// one field: the first declaration keeps its position and rules, later
    /// ones only replace its metadata.
    pub fn bind<I>(registry: &RuleRegistry, decls: I) -> Self
    where
        I: IntoIterator<Item = InputDecl>,
    {
        let mut fields: Vec<FieldDescriptor> = Vec::new();
        for decl in decls {
            if decl.kind.is_grouped()
                && let Some(existing) = fields.iter_mut().find(|f| f.id == decl.model)
            {
                debug!(field = %decl.model, kind = ?decl.kind, "collapsing grouped input");
                existing.context = decl.context();
                continue;
            }

            let mut field = FieldDescriptor::new(decl.model.clone(), Value::Null)
                .with_context(decl.context())
                .with_force_check(decl.force_check());
            field.rules = extract_rules(registry, &decl);
            fields.push(field);
        }
        Self { fields }
    }

    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// First field with the given id.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets the value of every field bound to `id`. Returns `false` if there
    /// is none.
    pub fn set_value(&mut self, id: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.update(id, |field| field.value = value.clone())
    }

    pub fn set_relevant(&mut self, id: &str, relevant: bool) -> bool {
        self.update(id, |field| field.relevant = relevant)
    }

    pub fn set_force_check(&mut self, id: &str, force: bool) -> bool {
        self.update(id, |field| field.force_check = force)
    }

    fn update(&mut self, id: &str, mut apply: impl FnMut(&mut FieldDescriptor)) -> bool {
        let mut found = false;
        for field in self.fields.iter_mut().filter(|field| field.id == id) {
            apply(field);
            found = true;
        }
        found
    }
}

impl FromIterator<FieldDescriptor> for Form {
    fn from_iter<T: IntoIterator<Item = FieldDescriptor>>(iter: T) -> Self {
        Self::from_fields(iter.into_iter().collect())
    }
}
