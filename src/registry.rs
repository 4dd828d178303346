//! Scoped argument registrations.
//!
//! Registrations are grouped into contexts. A context registered for the
//! scope `sql db` applies to `sql db create`, `sql db copy` and every other
//! command under `sql db`, but not to `sql dbx`.

use crate::arguments::{ArgSettings, Validator};
use crate::complex::ComplexArgumentProcessor;
use crate::error::Result;

/// One registration made inside an argument context.
#[derive(Debug, Clone)]
pub enum Registration {
    /// Settings for an argument the command already has.
    Argument(String, ArgSettings),
    /// An argument added to the command, merged if it already exists.
    Extra(String, ArgSettings),
    Processor(ComplexArgumentProcessor),
    /// Command-level validator, run after all aggregation.
    Validator(Validator),
}

/// Registrations for every command under one scope.
#[derive(Debug, Clone)]
pub struct ArgumentContext {
    scope: String,
    entries: Vec<Registration>,
}

impl ArgumentContext {
    fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn entries(&self) -> &[Registration] {
        &self.entries
    }

    /// Whether this context applies to `command`.
    pub fn applies_to(&self, command: &str) -> bool {
        self.scope.is_empty()
            || command
                .strip_prefix(self.scope.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    }

    pub fn argument(&mut self, dest: &str, settings: ArgSettings) -> &mut Self {
        self.entries
            .push(Registration::Argument(dest.to_string(), settings));
        self
    }

    pub fn extra(&mut self, dest: &str, settings: ArgSettings) -> &mut Self {
        self.entries.push(Registration::Extra(dest.to_string(), settings));
        self
    }

    /// Hide arguments from the command line; they read as null.
    pub fn ignore(&mut self, dests: &[&str]) -> &mut Self {
        for dest in dests {
            self.argument(dest, ArgSettings::ignored());
        }
        self
    }

    pub fn processor(&mut self, processor: ComplexArgumentProcessor) -> &mut Self {
        self.entries.push(Registration::Processor(processor));
        self
    }

    pub fn validator(&mut self, validator: Validator) -> &mut Self {
        self.entries.push(Registration::Validator(validator));
        self
    }
}

/// All argument contexts, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ArgumentRegistry {
    contexts: Vec<ArgumentContext>,
}

impl ArgumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register arguments for every command under `scope`.
    pub fn argument_context<F>(&mut self, scope: &str, configure: F)
    where
        F: FnOnce(&mut ArgumentContext),
    {
        let mut context = ArgumentContext::new(scope);
        configure(&mut context);
        self.contexts.push(context);
    }

    /// Like [`argument_context`](Self::argument_context), for registrations
    /// that can be rejected. Nothing is registered on error.
    pub fn try_argument_context<F>(&mut self, scope: &str, configure: F) -> Result<()>
    where
        F: FnOnce(&mut ArgumentContext) -> Result<()>,
    {
        let mut context = ArgumentContext::new(scope);
        configure(&mut context)?;
        self.contexts.push(context);
        Ok(())
    }

    /// Contexts that apply to `command`, in registration order.
    pub fn matching<'a>(&'a self, command: &'a str) -> impl Iterator<Item = &'a ArgumentContext> {
        self.contexts.iter().filter(move |c| c.applies_to(command))
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_scope_matches_on_word_boundary() {
        let mut registry = ArgumentRegistry::new();
        registry.argument_context("sql db", |c| {
            c.ignore(&["read_scale"]);
        });
        registry.argument_context("", |_| {});

        assert_eq!(registry.matching("sql db create").count(), 2);
        assert_eq!(registry.matching("sql db").count(), 2);
        assert_eq!(registry.matching("sql dbx create").count(), 1);
        assert_eq!(registry.matching("sql dw create").count(), 1);
    }

    #[test]
    fn test_failed_context_is_not_registered() {
        let mut registry = ArgumentRegistry::new();
        let err = registry
            .try_argument_context("sql dw create", |c| {
                c.ignore(&["tier"]);
                Err(CliError::registration("sql dw create", "unsupported"))
            })
            .unwrap_err();

        assert!(matches!(err, CliError::Registration { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ignore_records_hidden_arguments() {
        let mut registry = ArgumentRegistry::new();
        registry.argument_context("sql mi create", |c| {
            c.ignore(&["name", "family"]);
        });

        let context = registry.matching("sql mi create").next().unwrap();
        let dests: Vec<_> = context
            .entries()
            .iter()
            .filter_map(|e| match e {
                Registration::Argument(dest, _) => Some(dest.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(dests, vec!["name", "family"]);
    }
}
