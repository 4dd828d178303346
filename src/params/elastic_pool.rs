//! `sql elastic-pool` registrations.

use sql_models::{ElasticPool, ElasticPoolPerDatabaseSettings, Sku};

use super::{
    capacity_or_dtu_param_type, enum_type, family_param_type, max_size_bytes_param_type,
    server_param_type, tier_param_type, zone_redundant_param_type, LICENSE_TYPES,
};
use crate::arguments::{ArgKind, ArgSettings};
use crate::command::{CommandTable, Param};
use crate::complex::create_args_for_complex_type;
use crate::registry::ArgumentRegistry;

pub(super) fn load_arguments(registry: &mut ArgumentRegistry) {
    registry.argument_context("sql elastic-pool", |c| {
        c.argument("server_name", server_param_type());
        c.argument(
            "elastic_pool_name",
            ArgSettings::new()
                .options(&["--name", "-n"])
                .help("The name of the elastic pool."),
        );

        // --db-dtu-max and --db-dtu-min are kept for compatibility.
        c.argument(
            "max_capacity",
            ArgSettings::new()
                .options(&["--db-dtu-max", "--db-max-dtu", "--db-max-capacity"])
                .kind(ArgKind::Float)
                .help("The maximum capacity (in DTUs or vcores) any one database can consume."),
        );
        c.argument(
            "min_capacity",
            ArgSettings::new()
                .options(&["--db-dtu-min", "--db-min-dtu", "--db-min-capacity"])
                .kind(ArgKind::Float)
                .help("The minimum capacity (in DTUs or vcores) each database is guaranteed."),
        );

        c.argument(
            "max_size_bytes",
            max_size_bytes_param_type().options(&["--max-size", "--storage"]),
        );
        c.argument("license_type", enum_type(LICENSE_TYPES));
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
            capacity_or_dtu_param_type()
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

    registry.argument_context("sql elastic-pool create", |c| {
        create_args_for_complex_type::<ElasticPool, _>(
            c,
            "parameters",
            &[
                "license_type",
                "max_size_bytes",
                "per_database_settings",
                "tags",
                "zone_redundant",
            ],
            None,
        );
        create_args_for_complex_type::<ElasticPoolPerDatabaseSettings, _>(
            c,
            "per_database_settings",
            &["max_capacity", "min_capacity"],
            None,
        );
        create_args_for_complex_type::<Sku, _>(c, "sku", &["capacity", "family", "name", "tier"], None);

        // Sku name is derived from the components.
        c.ignore(&["name"]);
    });
}

const ELASTIC_POOL_CREATE_PARAMS: &[Param] = &[
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("elastic_pool_name"),
    Param::optional("sku"),
];

pub(super) fn load_commands(table: &mut CommandTable) {
    table.command(
        "sql elastic-pool create",
        "Create an elastic pool.",
        ELASTIC_POOL_CREATE_PARAMS,
    );
}
