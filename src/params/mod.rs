//! Argument registrations for the `sql` command group.
//!
//! Each submodule registers the arguments and commands of one resource
//! type. The shared argument types below are reused across them.

mod db;
mod elastic_pool;
mod job;
mod managed_instance;
mod server;

pub use db::{configure_db_create_params, CreateMode, Engine};

use crate::arguments::{ArgKind, ArgSettings};
use crate::command::CommandTable;
use crate::config::SizeWithUnitConverter;
use crate::error::Result;
use crate::registry::ArgumentRegistry;
use crate::validators::validate_managed_instance_storage_size;

pub const SKU_ARG_GROUP: &str = "Performance Level";

pub const SKU_COMPONENT_ARG_GROUP: &str = "Performance Level (components)";

const SERVER_CONFIGURE_HELP: &str =
    "You can configure the default using `azsql` profile defaults: sql-server=<name>";

pub const CATALOG_COLLATION_TYPES: &[&str] = &["DATABASE_DEFAULT", "SQL_Latin1_General_CP1_CI_AS"];

pub const LICENSE_TYPES: &[&str] = &["LicenseIncluded", "BasePrice"];

pub const AUTHENTICATION_TYPES: &[&str] = &["SQL", "ADPassword"];

pub const STORAGE_KEY_TYPES: &[&str] = &["StorageAccessKey", "SharedAccessKey"];

pub fn resource_group_name_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--resource-group", "-g"])
        .configured_default("group")
        .help("Name of resource group. You can configure the default group using profile defaults: group=<name>")
}

pub fn location_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--location", "-l"])
        .configured_default("location")
        .help("Location. You can configure the default location using profile defaults: location=<location>")
}

pub fn tags_type() -> ArgSettings {
    ArgSettings::new()
        .kind(ArgKind::Tags)
        .help("Space-separated tags: key[=value] [key[=value] ...]. Use \"\" to clear existing tags.")
}

pub fn no_wait_type() -> ArgSettings {
    ArgSettings::new()
        .kind(ArgKind::Flag)
        .help("Do not wait for the long-running operation to finish.")
}

pub fn server_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--server", "-s"])
        .configured_default("sql-server")
        .help(&format!("Name of the Azure SQL server. {SERVER_CONFIGURE_HELP}"))
}

pub fn job_agent_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--agent", "-a"])
        .configured_default("sql-job-agent")
        .help("Name of the Elastic Job agent. You can configure the default agent using profile defaults: sql-job-agent=<name>")
}

pub fn job_param_type() -> ArgSettings {
    ArgSettings::new().options(&["--job", "-j"])
}

pub fn tier_param_type() -> ArgSettings {
    ArgSettings::new()
        .group(SKU_COMPONENT_ARG_GROUP)
        .options(&["--tier", "--edition", "-e"])
}

pub fn capacity_param_type() -> ArgSettings {
    ArgSettings::new()
        .group(SKU_COMPONENT_ARG_GROUP)
        .options(&["--capacity", "-c"])
}

pub fn capacity_or_dtu_param_type() -> ArgSettings {
    ArgSettings::new()
        .group(SKU_COMPONENT_ARG_GROUP)
        .options(&["--capacity", "-c", "--dtu"])
}

pub fn family_param_type() -> ArgSettings {
    ArgSettings::new()
        .group(SKU_COMPONENT_ARG_GROUP)
        .options(&["--family", "-f"])
}

pub fn elastic_pool_id_param_type() -> ArgSettings {
    ArgSettings::new()
        .group(SKU_ARG_GROUP)
        .options(&["--elastic-pool"])
}

pub fn max_size_bytes_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--max-size"])
        .kind(ArgKind::Size(SizeWithUnitConverter::bytes()))
        .help("The max storage size. If no unit is specified, defaults to bytes (B).")
}

pub fn zone_redundant_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--zone-redundant", "-z"])
        .kind(ArgKind::ThreeStateFlag)
        .help("Specifies whether to enable zone redundancy")
}

pub fn managed_instance_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--managed-instance", "--mi"])
        .help("Name of the Azure SQL managed instance.")
}

pub fn storage_param_type() -> ArgSettings {
    ArgSettings::new()
        .options(&["--storage"])
        .kind(ArgKind::Size(SizeWithUnitConverter::gigabytes()))
        .validator(validate_managed_instance_storage_size)
        .help("The storage size. If no unit is specified, defaults to gigabytes (GB).")
}

/// Enum-valued argument with case-insensitive matching.
pub fn enum_type(values: &'static [&'static str]) -> ArgSettings {
    ArgSettings::new().kind(ArgKind::Choice(values))
}

/// Register every argument context of the `sql` group.
pub fn load_arguments(registry: &mut ArgumentRegistry) -> Result<()> {
    registry.argument_context("sql", |c| {
        c.argument("resource_group_name", resource_group_name_type());
        c.argument("location", location_type());
        c.argument("tags", tags_type());
        c.argument("no_wait", no_wait_type());
    });

    job::load_arguments(registry);
    db::load_arguments(registry)?;
    elastic_pool::load_arguments(registry);
    server::load_arguments(registry);
    managed_instance::load_arguments(registry);
    Ok(())
}

/// All `sql` commands with their registrations applied.
pub fn load_command_table() -> Result<CommandTable> {
    let mut registry = ArgumentRegistry::new();
    load_arguments(&mut registry)?;

    let mut table = CommandTable::new(registry);
    job::load_commands(&mut table);
    db::load_commands(&mut table);
    elastic_pool::load_commands(&mut table);
    server::load_commands(&mut table);
    managed_instance::load_commands(&mut table);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_resolves() {
        let table = load_command_table().unwrap();
        let names: Vec<_> = table.names().collect();
        assert!(names.contains(&"sql db create"));
        assert!(names.contains(&"sql mi create"));
        for name in names {
            table.resolve(name).unwrap();
        }
    }

    #[test]
    fn test_cli_builds() {
        let table = load_command_table().unwrap();
        let cli = table
            .build_cli(clap::Command::new("azsql"), &Default::default())
            .unwrap();
        cli.debug_assert();
    }
}
