//! `sql db` and `sql dw` registrations.

use std::fmt;

use sql_models::{Database, ExportRequest, ImportExtensionRequest, Sku};

use super::{
    capacity_param_type, elastic_pool_id_param_type, enum_type, family_param_type,
    max_size_bytes_param_type, server_param_type, tier_param_type, zone_redundant_param_type,
    AUTHENTICATION_TYPES, CATALOG_COLLATION_TYPES, LICENSE_TYPES, SKU_ARG_GROUP,
    SKU_COMPONENT_ARG_GROUP, STORAGE_KEY_TYPES,
};
use crate::arguments::ArgSettings;
use crate::command::{CommandTable, Param};
use crate::complex::create_args_for_complex_type;
use crate::error::{CliError, Result};
use crate::invocation::InvocationContext;
use crate::namespace::Namespace;
use crate::registry::{ArgumentContext, ArgumentRegistry};

const DB_SERVICE_OBJECTIVE_EXAMPLES: &str = "Basic, S0, P1, GP_Gen4_1, BC_Gen5_2.";
const DW_SERVICE_OBJECTIVE_EXAMPLES: &str = "DW100, DW1000c";

/// SQL engine a database command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Db,
    Dw,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Db => write!(f, "db"),
            Engine::Dw => write!(f, "dw"),
        }
    }
}

/// How a new database is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    Default,
    Copy,
    Secondary,
    PointInTimeRestore,
    Restore,
    Recovery,
    RestoreLongTermRetentionBackup,
}

impl fmt::Display for CreateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreateMode::Default => "Default",
            CreateMode::Copy => "Copy",
            CreateMode::Secondary => "Secondary",
            CreateMode::PointInTimeRestore => "PointInTimeRestore",
            CreateMode::Restore => "Restore",
            CreateMode::Recovery => "Recovery",
            CreateMode::RestoreLongTermRetentionBackup => "RestoreLongTermRetentionBackup",
        };
        f.write_str(name)
    }
}

impl CreateMode {
    fn is_restore(self) -> bool {
        matches!(self, CreateMode::Restore | CreateMode::PointInTimeRestore)
    }
}

/// Configure the arguments of a database or data warehouse create command.
///
/// Each create mode gets its own command, and data warehouses accept fewer
/// settings than databases, so which arguments are hidden depends on both
/// `engine` and `create_mode`.
pub fn configure_db_create_params(
    c: &mut ArgumentContext,
    engine: Engine,
    create_mode: CreateMode,
) -> Result<()> {
    if engine == Engine::Dw
        && !matches!(
            create_mode,
            CreateMode::Default | CreateMode::PointInTimeRestore | CreateMode::Restore
        )
    {
        return Err(CliError::registration(
            c.scope(),
            format!("Engine {engine} does not support create mode {create_mode}"),
        ));
    }

    create_args_for_complex_type::<Database, _>(
        c,
        "parameters",
        &[
            "catalog_collation",
            "collation",
            "elastic_pool_id",
            "license_type",
            "max_size_bytes",
            "restore_point_in_time",
            "sample_name",
            "sku",
            "source_database_deletion_date",
            "tags",
            "zone_redundant",
        ],
        None,
    );

    create_args_for_complex_type::<Sku, _>(c, "sku", &["capacity", "family", "name", "tier"], None);

    // This is the sku name, not the database name.
    let examples = match engine {
        Engine::Db => DB_SERVICE_OBJECTIVE_EXAMPLES,
        Engine::Dw => DW_SERVICE_OBJECTIVE_EXAMPLES,
    };
    c.argument(
        "name",
        ArgSettings::new()
            .options(&["--service-objective"])
            .group(SKU_ARG_GROUP)
            .required(false)
            .help(&format!(
                "The service objective for the new database. For example: {examples}"
            )),
    );

    c.argument(
        "elastic_pool_id",
        elastic_pool_id_param_type()
            .help("The name or resource id of the elastic pool to create the database in."),
    );

    if create_mode != CreateMode::Default || engine != Engine::Db {
        c.ignore(&["sample_name", "catalog_collation", "read_scale"]);
    }

    if !create_mode.is_restore() {
        c.ignore(&["restore_point_in_time", "source_database_deletion_date"]);
    }

    // Determined by the source database.
    if matches!(create_mode, CreateMode::Copy | CreateMode::Secondary) {
        c.ignore(&["collation", "tier", "max_size_bytes"]);
    }
    if create_mode.is_restore() {
        c.ignore(&["collation", "max_size_bytes"]);
    }

    if engine == Engine::Dw {
        c.ignore(&["elastic_pool_id", "tier", "license_type", "family", "capacity"]);
    }

    Ok(())
}

/// A restore needs a point in time, a deletion time, or both.
fn validate_restore_point(_ctx: &InvocationContext, namespace: &mut Namespace) -> Result<()> {
    if namespace.value("restore_point_in_time").is_specified()
        || namespace.value("source_database_deletion_date").is_specified()
    {
        Ok(())
    } else {
        Err(CliError::usage(
            "either --time or --deleted-time must be specified",
        ))
    }
}

fn configure_transfer_params<T: sql_models::ComplexType>(c: &mut ArgumentContext) {
    create_args_for_complex_type::<T, _>(
        c,
        "parameters",
        &[
            "administrator_login",
            "administrator_login_password",
            "authentication_type",
            "storage_key",
            "storage_key_type",
            "storage_uri",
        ],
        None,
    );

    c.argument(
        "administrator_login",
        ArgSettings::new().options(&["--admin-user", "-u"]),
    );
    c.argument(
        "administrator_login_password",
        ArgSettings::new().options(&["--admin-password", "-p"]),
    );
    c.argument(
        "authentication_type",
        enum_type(AUTHENTICATION_TYPES).options(&["--auth-type", "-a"]),
    );
    c.argument("storage_key_type", enum_type(STORAGE_KEY_TYPES));
}

pub(super) fn load_arguments(registry: &mut ArgumentRegistry) -> Result<()> {
    registry.argument_context("sql db", |c| {
        c.argument("server_name", server_param_type());
        c.argument(
            "database_name",
            ArgSettings::new()
                .options(&["--name", "-n"])
                .help("Name of the Azure SQL Database."),
        );
        c.argument("max_size_bytes", max_size_bytes_param_type());

        c.argument("collation", ArgSettings::new().group("Creation"));
        c.argument(
            "catalog_collation",
            enum_type(CATALOG_COLLATION_TYPES).group("Creation"),
        );
        c.argument("sample_name", ArgSettings::new().group("Creation"));
        c.argument("license_type", enum_type(LICENSE_TYPES));
        c.ignore(&["read_scale"]);
        c.argument("zone_redundant", zone_redundant_param_type());

        c.argument(
            "tier",
            tier_param_type().help(
                "The edition component of the sku. Allowed values include: Basic, Standard, \
                 Premium, GeneralPurpose, BusinessCritical.",
            ),
        );
        c.argument(
            "capacity",
            capacity_param_type()
                .group(SKU_COMPONENT_ARG_GROUP)
                .help("The capacity component of the sku in integer number of DTUs or vcores."),
        );
        c.argument(
            "family",
            family_param_type().help(
                "The compute generation component of the sku (for vcore skus only). \
                 Allowed values include: Gen4, Gen5.",
            ),
        );
    });

    registry.try_argument_context("sql db create", |c| {
        configure_db_create_params(c, Engine::Db, CreateMode::Default)
    })?;

    registry.try_argument_context("sql db copy", |c| {
        configure_db_create_params(c, Engine::Db, CreateMode::Copy)?;
        c.argument(
            "dest_name",
            ArgSettings::new().help("Name of the database that will be created as the copy destination."),
        );
        c.argument(
            "dest_resource_group_name",
            ArgSettings::new().options(&["--dest-resource-group"]).help(
                "Name of the resource group to create the copy in. \
                 If unspecified, defaults to the origin resource group.",
            ),
        );
        c.argument(
            "dest_server_name",
            ArgSettings::new().options(&["--dest-server"]).help(
                "Name of the server to create the copy in. \
                 If unspecified, defaults to the origin server.",
            ),
        );
        Ok(())
    })?;

    registry.try_argument_context("sql db restore", |c| {
        configure_db_create_params(c, Engine::Db, CreateMode::PointInTimeRestore)?;
        c.argument(
            "dest_name",
            ArgSettings::new()
                .help("Name of the database that will be created as the restore destination."),
        );
        c.argument(
            "restore_point_in_time",
            ArgSettings::new()
                .options(&["--time", "-t"])
                .group("Restore Point")
                .validator(validate_restore_point)
                .help(
                    "The point in time of the source database that will be restored to create \
                     the new database. Must be greater than or equal to the source database's \
                     earliestRestoreDate value. Either --time or --deleted-time (or both) must \
                     be specified.",
                ),
        );
        c.argument(
            "source_database_deletion_date",
            ArgSettings::new()
                .options(&["--deleted-time"])
                .group("Restore Point")
                .help(
                    "If specified, restore from a deleted database instead of from an existing \
                     database. Must match the deleted time of a deleted database in the same \
                     server. Either --time or --deleted-time (or both) must be specified.",
                ),
        );
        Ok(())
    })?;

    registry.argument_context("sql db export", |c| {
        configure_transfer_params::<ExportRequest>(c);
    });

    registry.argument_context("sql db import", |c| {
        configure_transfer_params::<ImportExtensionRequest>(c);
    });

    registry.argument_context("sql dw", |c| {
        c.argument("server_name", server_param_type());
        c.argument(
            "database_name",
            ArgSettings::new()
                .options(&["--name", "-n"])
                .help("Name of the data warehouse."),
        );
        c.argument("max_size_bytes", max_size_bytes_param_type());
        c.argument(
            "collation",
            ArgSettings::new().help("The collation of the data warehouse."),
        );
    });

    registry.try_argument_context("sql dw create", |c| {
        configure_db_create_params(c, Engine::Dw, CreateMode::Default)
    })?;

    Ok(())
}

const DB_CREATE_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::optional("no_wait"),
];

const DB_COPY_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("dest_name"),
    Param::optional("dest_server_name"),
    Param::optional("dest_resource_group_name"),
    Param::optional("no_wait"),
];

const DB_RESTORE_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("dest_name"),
    Param::optional("restore_point_in_time"),
    Param::optional("source_database_deletion_date"),
    Param::optional("no_wait"),
];

const DB_TRANSFER_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("storage_key_type"),
    Param::required("storage_key"),
];

pub(super) fn load_commands(table: &mut CommandTable) {
    table.command("sql db create", "Create a database.", DB_CREATE_PARAMS);
    table.command("sql db copy", "Create a copy of a database.", DB_COPY_PARAMS);
    table.command(
        "sql db restore",
        "Create a new database by restoring from a backup.",
        DB_RESTORE_PARAMS,
    );
    table.command(
        "sql db export",
        "Export a database to a bacpac.",
        DB_TRANSFER_PARAMS,
    );
    table.command(
        "sql db import",
        "Import a bacpac into an existing database.",
        DB_TRANSFER_PARAMS,
    );
    table.command("sql dw create", "Create a data warehouse.", DB_CREATE_PARAMS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        let mut registry = ArgumentRegistry::new();
        load_arguments(&mut registry).unwrap();
        let mut table = CommandTable::new(registry);
        load_commands(&mut table);
        table
    }

    fn ignored(table: &CommandTable, command: &str, dest: &str) -> bool {
        table
            .resolve(command)
            .unwrap()
            .argument(dest)
            .unwrap_or_else(|| panic!("{command} has no {dest}"))
            .is_ignored()
    }

    #[test]
    fn test_dw_rejects_copy_mode() {
        let mut registry = ArgumentRegistry::new();
        let err = registry
            .try_argument_context("sql dw copy", |c| {
                configure_db_create_params(c, Engine::Dw, CreateMode::Copy)
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid registration for 'sql dw copy': Engine dw does not support create mode Copy"
        );
    }

    #[test]
    fn test_create_mode_matrix() {
        let table = table();

        assert!(!ignored(&table, "sql db create", "sample_name"));
        assert!(ignored(&table, "sql db create", "restore_point_in_time"));

        assert!(ignored(&table, "sql db copy", "collation"));
        assert!(ignored(&table, "sql db copy", "tier"));
        assert!(ignored(&table, "sql db copy", "sample_name"));

        assert!(!ignored(&table, "sql db restore", "restore_point_in_time"));
        assert!(ignored(&table, "sql db restore", "max_size_bytes"));

        for dest in ["elastic_pool_id", "tier", "license_type", "family", "capacity"] {
            assert!(ignored(&table, "sql dw create", dest), "{dest}");
        }
        assert!(!ignored(&table, "sql dw create", "name"));
    }

    #[test]
    fn test_service_objective_help_depends_on_engine() {
        let table = table();
        let db = table.resolve("sql db create").unwrap();
        let dw = table.resolve("sql dw create").unwrap();
        assert!(db.argument("name").unwrap().help().unwrap().ends_with("BC_Gen5_2."));
        assert!(dw.argument("name").unwrap().help().unwrap().ends_with("DW1000c"));
    }

    #[test]
    fn test_restore_point_required_at_least_once() {
        let ctx = InvocationContext::new("sql db restore", None);
        let mut ns = Namespace::new();
        ns.set("restore_point_in_time", None::<String>);
        assert!(validate_restore_point(&ctx, &mut ns).is_err());

        ns.set("source_database_deletion_date", "2018-05-20T05:34:22");
        assert!(validate_restore_point(&ctx, &mut ns).is_ok());
    }
}
