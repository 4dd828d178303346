//! `sql server` registrations.

use sql_models::{Server, ServerAzureADAdministrator};

use super::server_param_type;
use crate::arguments::{ArgKind, ArgSettings};
use crate::command::{CommandTable, Param};
use crate::complex::create_args_for_complex_type;
use crate::registry::ArgumentRegistry;
use crate::validators::validate_subnet;

const ASSIGN_IDENTITY_HELP: &str = "Generate and assign an Azure Active Directory Identity for \
     this server for use with key management services like Azure KeyVault.";

pub(super) fn load_arguments(registry: &mut ArgumentRegistry) {
    registry.argument_context("sql server", |c| {
        c.argument(
            "server_name",
            server_param_type().options(&["--name", "-n"]),
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
            "assign_identity",
            ArgSettings::new()
                .options(&["--assign_identity", "-i"])
                .kind(ArgKind::Flag)
                .help(ASSIGN_IDENTITY_HELP),
        );
    });

    registry.argument_context("sql server create", |c| {
        create_args_for_complex_type::<Server, _>(
            c,
            "parameters",
            &["administrator_login", "administrator_login_password", "location"],
            None,
        );
        c.argument("administrator_login", ArgSettings::new().required(true));
        c.argument(
            "administrator_login_password",
            ArgSettings::new().required(true),
        );
        c.argument(
            "assign_identity",
            ArgSettings::new().options(&["--assign-identity", "-i"]),
        );
    });

    registry.argument_context("sql server ad-admin", |c| {
        // --server-name is the originally released name.
        c.argument(
            "server_name",
            ArgSettings::new().options(&["--server-name", "--server", "-s"]),
        );
        c.argument(
            "login",
            ArgSettings::new()
                .options(&["--display-name", "-u"])
                .help("Display name of the Azure AD administrator user or group."),
        );
        c.argument(
            "sid",
            ArgSettings::new()
                .options(&["--object-id", "-i"])
                .help("The unique ID of the Azure AD administrator."),
        );
        c.ignore(&["tenant_id"]);
    });

    registry.argument_context("sql server ad-admin create", |c| {
        create_args_for_complex_type::<ServerAzureADAdministrator, _>(
            c,
            "properties",
            &["login", "sid"],
            None,
        );
    });

    registry.argument_context("sql server vnet-rule", |c| {
        c.argument("server_name", server_param_type());
        c.argument(
            "virtual_network_rule_name",
            ArgSettings::new().options(&["--name", "-n"]),
        );
        c.argument(
            "virtual_network_subnet_id",
            ArgSettings::new().options(&["--subnet"]).help(
                "Name or ID of the subnet that allows access to an Azure Sql Server. \
                 If subnet name is provided, --vnet-name must be provided.",
            ),
        );
        c.argument(
            "ignore_missing_vnet_service_endpoint",
            ArgSettings::new()
                .options(&["--ignore-missing-endpoint", "-i"])
                .kind(ArgKind::ThreeStateFlag)
                .help("Create firewall rule before the virtual network has vnet service endpoint enabled"),
        );
    });

    registry.argument_context("sql server vnet-rule create", |c| {
        c.extra(
            "vnet_name",
            ArgSettings::new()
                .options(&["--vnet-name"])
                .help("The virtual network name"),
        );
        c.validator(validate_subnet);
    });
}

const SERVER_CREATE_PARAMS: &[Param] = &[
    Param::required("resource_group_name"),
    Param::required("server_name"),
    Param::optional("assign_identity"),
];

const AD_ADMIN_CREATE_PARAMS: &[Param] = &[
    Param::required("resource_group_name"),
    Param::required("server_name"),
];

const VNET_RULE_CREATE_PARAMS: &[Param] = &[
    Param::required("resource_group_name"),
    Param::required("server_name"),
    Param::required("virtual_network_rule_name"),
    Param::required("virtual_network_subnet_id"),
    Param::optional("ignore_missing_vnet_service_endpoint"),
];

pub(super) fn load_commands(table: &mut CommandTable) {
    table.command("sql server create", "Create a server.", SERVER_CREATE_PARAMS);
    table.command(
        "sql server ad-admin create",
        "Create an Active Directory administrator for a server.",
        AD_ADMIN_CREATE_PARAMS,
    );
    table.command(
        "sql server vnet-rule create",
        "Create a virtual network rule to allow access to a server.",
        VNET_RULE_CREATE_PARAMS,
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
    fn test_server_create_requires_admin() {
        let spec = table().resolve("sql server create").unwrap();
        let login = spec.argument("administrator_login").unwrap();
        assert!(login.is_required());
        assert_eq!(login.options(), vec!["--admin-user", "-u"]);
        assert_eq!(
            spec.argument("assign_identity").unwrap().options(),
            vec!["--assign-identity", "-i"]
        );
        // Declared required on the record.
        assert!(spec.argument("location").unwrap().is_required());
    }

    #[test]
    fn test_ad_admin_flags() {
        let spec = table().resolve("sql server ad-admin create").unwrap();
        assert!(spec.argument("login").unwrap().is_required());
        assert_eq!(
            spec.argument("server_name").unwrap().options(),
            vec!["--server-name", "--server", "-s"]
        );
        assert!(spec.argument("properties").unwrap().is_ignored());
    }
}
