//! Command table: declared parameters plus resolved registrations.

use std::collections::BTreeMap;

use clap::builder::{BoolishValueParser, PossibleValuesParser};
use clap::{Arg, ArgAction, ArgMatches, Command};
use sql_models::Value;

use crate::arguments::{ArgKind, ArgSettings, Argument, Validator};
use crate::complex::ComplexArgumentProcessor;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::invocation::InvocationContext;
use crate::namespace::Namespace;
use crate::registry::{ArgumentRegistry, Registration};

/// A parameter of the operation behind a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CommandDefinition {
    name: &'static str,
    about: &'static str,
    params: &'static [Param],
}

/// Every known command and the argument registrations that shape them.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<CommandDefinition>,
    registry: ArgumentRegistry,
}

impl CommandTable {
    pub fn new(registry: ArgumentRegistry) -> Self {
        Self {
            commands: Vec::new(),
            registry,
        }
    }

    pub fn command(&mut self, name: &'static str, about: &'static str, params: &'static [Param]) {
        self.commands.push(CommandDefinition {
            name,
            about,
            params,
        });
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    /// Merge every registration that applies to `name` into one spec.
    ///
    /// Extras are added first, in registration order; argument settings are
    /// then layered on top, so a setting made for `sql mi` also reaches an
    /// argument that `sql mi create` added.
    pub fn resolve(&self, name: &str) -> Result<CommandSpec> {
        let definition = self
            .commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        let mut arguments: Vec<Argument> = definition
            .params
            .iter()
            .map(|p| Argument::new(p.name, ArgSettings::new().required(p.required)))
            .collect();
        let mut processors: Vec<ComplexArgumentProcessor> = Vec::new();
        let mut validators: Vec<Validator> = Vec::new();

        for context in self.registry.matching(name) {
            for entry in context.entries() {
                match entry {
                    Registration::Extra(dest, settings) => {
                        match arguments.iter_mut().find(|a| a.dest() == dest) {
                            Some(existing) => existing.settings_mut().merge(settings),
                            None => arguments.push(Argument::new(dest.clone(), settings.clone())),
                        }
                    }
                    Registration::Processor(processor) => {
                        if processor.consumes(processor.dest()) {
                            return Err(CliError::registration(
                                name,
                                format!(
                                    "complex argument {:?} collides with one of its own flags",
                                    processor.dest()
                                ),
                            ));
                        }
                        processors.retain(|p| p.dest() != processor.dest());
                        processors.push(processor.clone());
                    }
                    Registration::Validator(validator) => validators.push(*validator),
                    Registration::Argument(..) => {}
                }
            }
        }

        for context in self.registry.matching(name) {
            for entry in context.entries() {
                if let Registration::Argument(dest, settings) = entry {
                    if let Some(existing) = arguments.iter_mut().find(|a| a.dest() == dest) {
                        existing.settings_mut().merge(settings);
                    }
                }
            }
        }

        tracing::debug!(
            "Resolved '{}' with {} arguments and {} complex arguments",
            name,
            arguments.len(),
            processors.len()
        );

        Ok(CommandSpec {
            name: definition.name,
            about: definition.about,
            arguments,
            processors,
            validators,
        })
    }

    /// Build the clap subcommand tree under `root`.
    pub fn build_cli(&self, root: Command, profile: &Profile) -> Result<Command> {
        let mut tree = Node::default();
        for definition in &self.commands {
            let spec = self.resolve(definition.name)?;
            let path: Vec<&str> = definition.name.split(' ').collect();
            tree.insert(&path, spec.clap_command(profile));
        }
        Ok(tree.attach(root))
    }
}

#[derive(Default)]
struct Node {
    children: Vec<(String, Node)>,
    command: Option<Command>,
}

impl Node {
    fn insert(&mut self, path: &[&str], command: Command) {
        match path.split_first() {
            None => self.command = Some(command),
            Some((head, rest)) => {
                let index = match self.children.iter().position(|(name, _)| name == head) {
                    Some(index) => index,
                    None => {
                        self.children.push((head.to_string(), Node::default()));
                        self.children.len() - 1
                    }
                };
                self.children[index].1.insert(rest, command);
            }
        }
    }

    fn attach(self, parent: Command) -> Command {
        self.children
            .into_iter()
            .fold(parent, |parent, (name, node)| {
                let command = match node.command {
                    Some(command) => command,
                    None => Command::new(name)
                        .subcommand_required(true)
                        .arg_required_else_help(true),
                };
                let children = Node {
                    children: node.children,
                    command: None,
                };
                parent.subcommand(children.attach(command))
            })
    }
}

/// A command with every registration applied.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: &'static str,
    about: &'static str,
    arguments: Vec<Argument>,
    processors: Vec<ComplexArgumentProcessor>,
    validators: Vec<Validator>,
}

impl CommandSpec {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn argument(&self, dest: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.dest() == dest)
    }

    pub fn processors(&self) -> &[ComplexArgumentProcessor] {
        &self.processors
    }

    /// The clap command for this spec. Ignored arguments are left out.
    pub fn clap_command(&self, profile: &Profile) -> Command {
        let word = self.name.rsplit(' ').next().unwrap_or(self.name);
        self.arguments
            .iter()
            .filter(|a| !a.is_ignored())
            .fold(Command::new(word.to_string()).about(self.about), |cmd, arg| {
                cmd.arg(clap_arg(arg, profile))
            })
    }

    /// Read every argument back out of `matches`.
    ///
    /// Ignored arguments and arguments that were not given read as null,
    /// unless the profile has a configured default for them.
    pub fn namespace_from(&self, matches: &ArgMatches, profile: &Profile) -> Result<Namespace> {
        let mut namespace = Namespace::new();
        for arg in &self.arguments {
            let value = if arg.is_ignored() {
                Value::Null
            } else {
                read_value(arg, matches)?
            };
            let value = match (value, arg.configured_default()) {
                (Value::Null, Some(key)) if !arg.is_ignored() => {
                    Value::from(profile.default_for(key).map(str::to_string))
                }
                (value, _) => value,
            };
            namespace.set(arg.dest(), value);
        }
        Ok(namespace)
    }

    /// Run argument validators, then aggregators, then command validators.
    pub fn process(&self, ctx: &InvocationContext, namespace: &mut Namespace) -> Result<()> {
        for validator in self
            .arguments
            .iter()
            .filter(|a| !a.is_ignored())
            .filter_map(Argument::validator)
        {
            validator(ctx, namespace)?;
        }
        for processor in &self.processors {
            processor.process(namespace)?;
        }
        for validator in &self.validators {
            validator(ctx, namespace)?;
        }
        Ok(())
    }
}

fn clap_arg(arg: &Argument, profile: &Profile) -> Arg {
    let options = arg.options();
    let mut longs = options.iter().filter_map(|o| o.strip_prefix("--"));
    let short = options
        .iter()
        .filter_map(|o| o.strip_prefix('-'))
        .filter(|o| !o.starts_with('-'))
        .find_map(|o| {
            let mut chars = o.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });

    let mut clap_arg = Arg::new(arg.dest().to_string());
    if let Some(long) = longs.next() {
        clap_arg = clap_arg.long(long.to_string());
    }
    let aliases: Vec<String> = longs.map(str::to_string).collect();
    if !aliases.is_empty() {
        clap_arg = clap_arg.visible_aliases(aliases);
    }
    if let Some(short) = short {
        clap_arg = clap_arg.short(short);
    }

    let defaulted = arg
        .configured_default()
        .is_some_and(|key| profile.default_for(key).is_some());
    clap_arg = clap_arg.required(arg.is_required() && !defaulted);

    if let Some(group) = arg.group() {
        clap_arg = clap_arg.help_heading(group.to_string());
    }

    let mut help = arg.help().unwrap_or_default().to_string();
    if let ArgKind::Size(converter) = arg.kind() {
        help = format!("{help} {converter}").trim().to_string();
    }
    if !help.is_empty() {
        clap_arg = clap_arg.help(help);
    }

    match arg.kind() {
        ArgKind::Text => clap_arg.value_parser(clap::value_parser!(String)),
        ArgKind::Int => clap_arg.value_parser(clap::value_parser!(i64)),
        ArgKind::Float => clap_arg.value_parser(clap::value_parser!(f64)),
        ArgKind::Flag => clap_arg.action(ArgAction::SetTrue),
        ArgKind::ThreeStateFlag => clap_arg
            .num_args(0..=1)
            .default_missing_value("true")
            .value_parser(BoolishValueParser::new()),
        ArgKind::List => clap_arg
            .num_args(1..)
            .action(ArgAction::Append)
            .value_parser(clap::value_parser!(String)),
        ArgKind::Tags => clap_arg
            .num_args(0..)
            .action(ArgAction::Append)
            .value_parser(clap::value_parser!(String)),
        ArgKind::Choice(values) => clap_arg
            .ignore_case(true)
            .value_parser(PossibleValuesParser::new(values.iter().copied())),
        ArgKind::Size(converter) => {
            let converter = converter.clone();
            clap_arg.value_parser(move |s: &str| converter.convert(s))
        }
    }
}

fn read_value(arg: &Argument, matches: &ArgMatches) -> Result<Value> {
    let id = arg.dest();
    let failed = |e: clap::parser::MatchesError| CliError::Matches {
        arg: id.to_string(),
        reason: e.to_string(),
    };

    let value = match arg.kind() {
        ArgKind::Text => Value::from(matches.try_get_one::<String>(id).map_err(failed)?.cloned()),
        ArgKind::Choice(values) => Value::from(
            matches
                .try_get_one::<String>(id)
                .map_err(failed)?
                .map(|v| canonical_choice(values, v)),
        ),
        ArgKind::Int | ArgKind::Size(_) => {
            Value::from(matches.try_get_one::<i64>(id).map_err(failed)?.copied())
        }
        ArgKind::Float => Value::from(matches.try_get_one::<f64>(id).map_err(failed)?.copied()),
        ArgKind::Flag | ArgKind::ThreeStateFlag => {
            Value::from(matches.try_get_one::<bool>(id).map_err(failed)?.copied())
        }
        ArgKind::List => Value::from(
            matches
                .try_get_many::<String>(id)
                .map_err(failed)?
                .map(|values| values.cloned().collect::<Vec<_>>()),
        ),
        ArgKind::Tags => {
            let given = matches
                .value_source(id)
                .is_some_and(|s| s == clap::parser::ValueSource::CommandLine);
            match matches.try_get_many::<String>(id).map_err(failed)? {
                Some(values) => Value::Tags(parse_tags(values)),
                None if given => Value::Tags(BTreeMap::new()),
                None => Value::Null,
            }
        }
    };
    Ok(value)
}

fn canonical_choice(values: &[&str], given: &str) -> String {
    values
        .iter()
        .find(|v| v.eq_ignore_ascii_case(given))
        .map_or_else(|| given.to_string(), |v| v.to_string())
}

/// `key[=value]` pairs; a bare key maps to an empty value and `""` is
/// skipped.
fn parse_tags<'a>(values: impl Iterator<Item = &'a String>) -> BTreeMap<String, String> {
    values
        .filter(|v| !v.is_empty())
        .map(|v| match v.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (v.clone(), String::new()),
        })
        .collect()
}
