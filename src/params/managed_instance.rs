//! `sql mi` and `sql midb` registrations.

use sql_models::{ManagedDatabase, ManagedInstance, Sku};

use super::{
    enum_type, family_param_type, managed_instance_param_type, storage_param_type,
    tier_param_type, LICENSE_TYPES,
};
use crate::arguments::{ArgKind, ArgSettings};
use crate::command::{CommandTable, Param};
use crate::complex::create_args_for_complex_type;
use crate::registry::ArgumentRegistry;
use crate::validators::validate_subnet;

pub(super) fn load_arguments(registry: &mut ArgumentRegistry) {
    registry.argument_context("sql mi", |c| {
        c.argument(
            "managed_instance_name",
            ArgSettings::new()
                .options(&["--name", "-n"])
                .help("The managed instance name"),
        );
        c.argument(
            "tier",
            tier_param_type().help("The edition component of the sku. Allowed value is GeneralPurpose."),
        );
        c.argument(
            "family",
            family_param_type().help(
                "The compute generation component of the sku. Allowed values include: Gen4, Gen5.",
            ),
        );
        c.argument(
            "storage_size_in_gb",
            storage_param_type().help(
                "The storage size of the managed instance. \
                 Storage size must be specified in increments of 32 GB",
            ),
        );
        c.argument(
            "license_type",
            enum_type(LICENSE_TYPES).help("The license type to apply for this managed instance."),
        );
        c.argument(
            "vcores",
            ArgSettings::new()
                .options(&["--capacity", "-c"])
                .kind(ArgKind::Int)
                .help("The capacity of the managed instance in vcores."),
        );
    });

    registry.argument_context("sql mi create", |c| {
        create_args_for_complex_type::<ManagedInstance, _>(
            c,
            "parameters",
            &[
                "administrator_login",
                "administrator_login_password",
                "license_type",
                "virtual_network_subnet_id",
                "vcores",
                "storage_size_in_gb",
            ],
            None,
        );
        create_args_for_complex_type::<Sku, _>(c, "sku", &["family", "name", "tier"], None);

        // Sku name is derived from the components.
        c.ignore(&["name"]);

        c.argument(
            "administrator_login",
            ArgSettings::new()
                .options(&["--admin-user", "-u"])
                .required(true),
        );
        c.argument(
            "administrator_login_password",
            ArgSettings::new()
                .options(&["--admin-password", "-p"])
                .required(true),
        );

        c.extra(
            "vnet_name",
            ArgSettings::new()
                .options(&["--vnet-name"])
                .help("The virtual network name")
                .validator(validate_subnet),
        );
        c.argument(
            "virtual_network_subnet_id",
            ArgSettings::new().options(&["--subnet"]).required(true).help(
                "Name or ID of the subnet that allows access to an Azure Sql Managed Instance. \
                 If subnet name is provided, --vnet-name must be provided.",
            ),
        );

        c.argument(
            "assign_identity",
            ArgSettings::new()
                .options(&["--assign-identity", "-i"])
                .kind(ArgKind::Flag)
                .help(
                    "Generate and assign an Azure Active Directory Identity for this managed \
                     instance for use with key management services like Azure KeyVault.",
                ),
        );
    });

    registry.argument_context("sql mi update", |c| {
        create_args_for_complex_type::<ManagedInstance, _>(
            c,
            "parameters",
            &["administrator_login_password"],
            None,
        );
        c.argument(
            "administrator_login_password",
            ArgSettings::new().options(&["--admin-password", "-p"]),
        );
        c.argument(
            "assign_identity",
            ArgSettings::new()
                .options(&["--assign-identity", "-i"])
                .kind(ArgKind::Flag)
                .help(
                    "Generate and assign an Azure Active Directory Identity for this managed \
                     instance for use with key management services like Azure KeyVault. \
                     If identity is already assigned - do nothing.",
                ),
        );
    });

    registry.argument_context("sql midb", |c| {
        c.argument("managed_instance_name", managed_instance_param_type());
        c.argument(
            "database_name",
            ArgSettings::new()
                .options(&["--name", "-n"])
                .help("The name of the Azure SQL Managed Database."),
        );
    });

    registry.argument_context("sql midb create", |c| {
        create_args_for_complex_type::<ManagedDatabase, _>(c, "parameters", &["collation"], None);
        c.argument(
            "collation",
            ArgSettings::new().required(false).help(
                "The collation of the Azure SQL Managed Database collation to use, \
                 e.g.: SQL_Latin1_General_CP1_CI_AS or Latin1_General_100_CS_AS_SC",
            ),
        );
    });

    registry.argument_context("sql midb restore", |c| {
        create_args_for_complex_type::<ManagedDatabase, _>(
            c,
            "parameters",
            &[
                "target_managed_database_name",
                "target_managed_instance_name",
                "restore_point_in_time",
            ],
            None,
        );
        c.argument(
            "target_managed_database_name",
            ArgSettings::new()
                .options(&["--dest-name"])
                .required(true)
                .help("Name of the managed database that will be created as the restore destination."),
        );
        c.argument(
            "target_managed_instance_name",
            ArgSettings::new().options(&["--dest-mi"]).help(
                "Name of the managed instance to restore managed database to. \
                 This can be same managed instance, or another managed instance on same \
                 subscription. When not specified it defaults to source managed instance.",
            ),
        );
        c.argument(
            "target_resource_group_name",
            ArgSettings::new().options(&["--dest-resource-group"]).help(
                "Name of the resource group of the managed instance to restore managed \
                 database to. When not specified it defaults to source resource group.",
            ),
        );
        c.argument(
            "restore_point_in_time",
            ArgSettings::new()
                .options(&["--time", "-t"])
                .group("Restore Point")
                .required(true)
                .help(
                    "The point in time of the source database that will be restored to create \
                     the new database. Must be greater than or equal to the source database's \
                     earliestRestoreDate value. Time should be in following format: \
                     \"YYYY-MM-DDTHH:MM:SS\"",
                ),
        );
    });
}

const MI_CREATE_PARAMS: &[Param] = &[
    Param::required("managed_instance_name"),
    Param::required("resource_group_name"),
    Param::required("location"),
    Param::required("virtual_network_subnet_id"),
    Param::optional("assign_identity"),
    Param::optional("sku"),
];

const MI_UPDATE_PARAMS: &[Param] = &[
    Param::required("managed_instance_name"),
    Param::required("resource_group_name"),
    Param::optional("license_type"),
    Param::optional("vcores"),
    Param::optional("storage_size_in_gb"),
    Param::optional("assign_identity"),
];

const MIDB_CREATE_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("managed_instance_name"),
    Param::required("resource_group_name"),
];

const MIDB_RESTORE_PARAMS: &[Param] = &[
    Param::required("database_name"),
    Param::required("managed_instance_name"),
    Param::required("resource_group_name"),
    Param::required("target_managed_database_name"),
    Param::optional("target_managed_instance_name"),
    Param::optional("target_resource_group_name"),
];

pub(super) fn load_commands(table: &mut CommandTable) {
    table.command("sql mi create", "Create a managed instance.", MI_CREATE_PARAMS);
    table.command("sql mi update", "Update a managed instance.", MI_UPDATE_PARAMS);
    table.command(
        "sql midb create",
        "Create a managed database.",
        MIDB_CREATE_PARAMS,
    );
    table.command(
        "sql midb restore",
        "Restore a managed database to a point in time.",
        MIDB_RESTORE_PARAMS,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CommandTable {
        let mut registry = ArgumentRegistry::new();
        load_arguments(&mut registry);
        let mut table = CommandTable::new(registry);
        load_commands(&mut table);
        table
    }

    #[test]
    fn test_mi_create_binds_validators_to_arguments() {
        let spec = table().resolve("sql mi create").unwrap();

        assert!(spec.argument("vnet_name").unwrap().validator().is_some());
        assert!(spec
            .argument("storage_size_in_gb")
            .unwrap()
            .validator()
            .is_some());
        assert!(spec.argument("virtual_network_subnet_id").unwrap().is_required());
        assert!(spec.argument("name").unwrap().is_ignored());

        let order: Vec<_> = spec.processors().iter().map(|p| p.dest()).collect();
        assert_eq!(order, vec!["parameters", "sku"]);
    }

    #[test]
    fn test_midb_restore_requires_target_and_time() {
        let spec = table().resolve("sql midb restore").unwrap();
        assert!(spec.argument("target_managed_database_name").unwrap().is_required());
        assert!(spec.argument("restore_point_in_time").unwrap().is_required());
        assert_eq!(
            spec.argument("managed_instance_name").unwrap().options(),
            vec!["--managed-instance", "--mi"]
        );
    }
}
