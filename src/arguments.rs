//! Per-argument settings and how they are merged.

use crate::config::SizeWithUnitConverter;
use crate::error::Result;
use crate::invocation::InvocationContext;
use crate::namespace::Namespace;

/// A post-parse check over the namespace.
pub type Validator = fn(&InvocationContext, &mut Namespace) -> Result<()>;

/// How the raw text of an argument is parsed.
#[derive(Debug, Clone, Default)]
pub enum ArgKind {
    #[default]
    Text,
    Int,
    Float,
    /// A switch that is either present or not.
    Flag,
    /// `--flag`, `--flag true` or `--flag false`.
    ThreeStateFlag,
    /// One or more values.
    List,
    /// Space-separated `key[=value]` pairs.
    Tags,
    /// One of a fixed set of values, matched case-insensitively.
    Choice(&'static [&'static str]),
    /// A size with an optional unit suffix.
    Size(SizeWithUnitConverter),
}

/// Settings for one argument, as registered in one scope.
///
/// Every field is optional so that a later registration only overrides what
/// it names; see [`ArgSettings::merge`].
#[derive(Debug, Clone, Default)]
pub struct ArgSettings {
    options: Option<Vec<String>>,
    required: Option<bool>,
    group: Option<String>,
    help: Option<String>,
    kind: Option<ArgKind>,
    configured_default: Option<String>,
    validator: Option<Validator>,
    ignored: Option<bool>,
}

impl ArgSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that hide the argument from the command line entirely.
    pub fn ignored() -> Self {
        Self {
            ignored: Some(true),
            ..Self::default()
        }
    }

    /// Option strings, e.g. `["--tier", "--edition", "-e"]`.
    pub fn options<S: AsRef<str>>(mut self, options: &[S]) -> Self {
        self.options = Some(options.iter().map(|o| o.as_ref().to_string()).collect());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn kind(mut self, kind: ArgKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Profile default key (e.g. `sql-server`) consulted when the argument
    /// is not given.
    pub fn configured_default(mut self, key: &str) -> Self {
        self.configured_default = Some(key.to_string());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Apply `other` on top of `self`, field by field.
    pub fn merge(&mut self, other: &ArgSettings) {
        fn over<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        over(&mut self.options, &other.options);
        over(&mut self.required, &other.required);
        over(&mut self.group, &other.group);
        over(&mut self.help, &other.help);
        over(&mut self.kind, &other.kind);
        over(&mut self.configured_default, &other.configured_default);
        over(&mut self.validator, &other.validator);
        over(&mut self.ignored, &other.ignored);
    }

    pub fn merged(mut self, other: &ArgSettings) -> Self {
        self.merge(other);
        self
    }
}

/// A fully resolved argument of one command.
#[derive(Debug, Clone)]
pub struct Argument {
    dest: String,
    settings: ArgSettings,
}

impl Argument {
    pub fn new(dest: impl Into<String>, settings: ArgSettings) -> Self {
        Self {
            dest: dest.into(),
            settings,
        }
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub(crate) fn settings_mut(&mut self) -> &mut ArgSettings {
        &mut self.settings
    }

    /// Option strings; `--dest-name` when none were registered.
    pub fn options(&self) -> Vec<String> {
        match &self.settings.options {
            Some(options) if !options.is_empty() => options.clone(),
            _ => vec![format!("--{}", self.dest.replace('_', "-"))],
        }
    }

    pub fn is_required(&self) -> bool {
        self.settings.required.unwrap_or(false)
    }

    pub fn is_ignored(&self) -> bool {
        self.settings.ignored.unwrap_or(false)
    }

    pub fn group(&self) -> Option<&str> {
        self.settings.group.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.settings.help.as_deref()
    }

    pub fn kind(&self) -> &ArgKind {
        static TEXT: ArgKind = ArgKind::Text;
        self.settings.kind.as_ref().unwrap_or(&TEXT)
    }

    pub fn configured_default(&self) -> Option<&str> {
        self.settings.configured_default.as_deref()
    }

    pub fn validator(&self) -> Option<Validator> {
        self.settings.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_only_named_fields() {
        let mut base = ArgSettings::new()
            .options(&["--tier", "--edition", "-e"])
            .group("Performance Level (components)");
        base.merge(&ArgSettings::new().help("The edition component of the sku."));

        let arg = Argument::new("tier", base);
        assert_eq!(arg.options(), vec!["--tier", "--edition", "-e"]);
        assert_eq!(arg.group(), Some("Performance Level (components)"));
        assert_eq!(arg.help(), Some("The edition component of the sku."));
        assert!(!arg.is_required());
    }

    #[test]
    fn test_later_required_wins() {
        let settings = ArgSettings::new()
            .required(true)
            .merged(&ArgSettings::new().required(false));
        assert!(!Argument::new("server_name", settings).is_required());
    }

    #[test]
    fn test_default_option_from_dest() {
        let arg = Argument::new("output_server_name", ArgSettings::new());
        assert_eq!(arg.options(), vec!["--output-server-name"]);
        assert!(matches!(arg.kind(), ArgKind::Text));
    }
}
