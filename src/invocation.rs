//! Parsing and processing of a single command invocation.

use std::error::Error as _;
use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue};
use clap::{ArgMatches, Args, Command, FromArgMatches};

use crate::command::CommandTable;
use crate::config::{ConversionError, Profile};
use crate::error::{CliError, Result};
use crate::namespace::Namespace;
use crate::params;

/// Options accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Subscription used to build resource ids.
    #[arg(long, global = true, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription: Option<String>,
}

/// What validators may know about the invocation beyond the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub command: String,
    pub subscription: Option<String>,
}

impl InvocationContext {
    pub fn new(command: impl Into<String>, subscription: Option<String>) -> Self {
        Self {
            command: command.into(),
            subscription,
        }
    }

    /// The subscription, required when a resource id has to be built.
    pub fn subscription_id(&self) -> Result<&str> {
        self.subscription.as_deref().ok_or_else(|| {
            CliError::usage(
                "no subscription is set; pass --subscription or set AZURE_SUBSCRIPTION_ID",
            )
        })
    }
}

/// The processed result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub namespace: Namespace,
}

/// The `azsql` command line.
#[derive(Debug, Clone)]
pub struct Cli {
    table: CommandTable,
    profile: Profile,
}

impl Cli {
    pub fn new(profile: Profile) -> Result<Self> {
        Ok(Self {
            table: params::load_command_table()?,
            profile,
        })
    }

    pub fn command(&self) -> Result<Command> {
        let root = GlobalArgs::augment_args(
            Command::new("azsql")
                .about("Manage Azure SQL databases, servers and managed instances")
                .version(env!("CARGO_PKG_VERSION"))
                .subcommand_required(true)
                .arg_required_else_help(true),
        );
        self.table.build_cli(root, &self.profile)
    }

    /// Parse `args` (including the program name) and run every validator
    /// and aggregator of the selected command.
    pub fn invoke<I, T>(&self, args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command()?
            .try_get_matches_from(args)
            .map_err(classify_parse_error)?;

        let (path, leaf) = leaf_matches(&matches);
        let command = path.join(" ");
        let span = tracing::info_span!("invocation", command = %command);
        let _enter = span.enter();

        let globals = GlobalArgs::from_arg_matches(leaf)?;
        let ctx = InvocationContext::new(
            command.clone(),
            globals.subscription.or_else(|| self.profile.subscription.clone()),
        );

        let spec = self.table.resolve(&command)?;
        let mut namespace = spec.namespace_from(leaf, &self.profile)?;
        spec.process(&ctx, &mut namespace)?;

        tracing::info!("Processed '{}' into {} fields", command, namespace.len());
        Ok(Invocation { command, namespace })
    }
}

fn leaf_matches(matches: &ArgMatches) -> (Vec<&str>, &ArgMatches) {
    let mut path = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        path.push(name);
        current = sub;
    }
    (path, current)
}

/// Size conversion failures are reported as invalid arguments; everything
/// else stays a parse error so clap can render it.
fn classify_parse_error(err: clap::Error) -> CliError {
    let conversion = err
        .source()
        .and_then(|source| source.downcast_ref::<ConversionError>())
        .cloned();
    match conversion {
        Some(source) => {
            let arg = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => arg.clone(),
                _ => "value".to_string(),
            };
            CliError::InvalidArgument { arg, source }
        }
        None => CliError::Parse(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_required_for_ids() {
        let ctx = InvocationContext::new("sql mi create", None);
        assert!(matches!(ctx.subscription_id(), Err(CliError::Usage(_))));

        let ctx = InvocationContext::new("sql mi create", Some("sub".into()));
        assert_eq!(ctx.subscription_id().unwrap(), "sub");
    }

    #[test]
    fn test_leaf_matches_walks_subcommands() {
        let cmd = Command::new("azsql").subcommand(
            Command::new("sql").subcommand(Command::new("db").subcommand(Command::new("create"))),
        );
        let matches = cmd
            .try_get_matches_from(["azsql", "sql", "db", "create"])
            .unwrap();
        let (path, _) = leaf_matches(&matches);
        assert_eq!(path, vec!["sql", "db", "create"]);
    }
}
