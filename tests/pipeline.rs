use azsql::{Cli, CliError, Invocation, Profile};
use sql_models::{Database, JobStep, JobStepAction, JobStepOutput, ManagedInstance, Sku, Value};

const SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";

fn invoke(args: &[&str]) -> azsql::Result<Invocation> {
    invoke_with(Profile::default(), args)
}

fn invoke_with(profile: Profile, args: &[&str]) -> azsql::Result<Invocation> {
    let cli = Cli::new(profile)?;
    let mut argv = vec!["azsql", "--subscription", SUBSCRIPTION];
    argv.extend_from_slice(args);
    cli.invoke(argv)
}

#[test]
fn test_db_create_builds_sku_beside_parameters() {
    let invocation = invoke(&[
        "sql", "db", "create", "-g", "rg", "-s", "srv", "-n", "db1", "-e", "GeneralPurpose",
        "-f", "Gen5", "-c", "2", "--max-size", "10GB",
    ])
    .unwrap();
    assert_eq!(invocation.command, "sql db create");

    let ns = &invocation.namespace;
    let db = ns.model::<Database>("parameters").unwrap();
    assert_eq!(db.max_size_bytes, Some(10 * 1024 * 1024 * 1024));
    assert_eq!(db.sku, None);

    let sku = ns.model::<Sku>("sku").unwrap();
    assert_eq!(sku.tier.as_deref(), Some("GeneralPurpose"));
    assert_eq!(sku.family.as_deref(), Some("Gen5"));
    assert_eq!(sku.capacity, Some(2));

    // Consumed by the aggregators.
    for key in ["tier", "family", "capacity", "max_size_bytes"] {
        assert!(!ns.contains(key), "{key} should have been consumed");
    }
    assert_eq!(ns.str("database_name"), Some("db1"));
    assert_eq!(ns.str("server_name"), Some("srv"));
}

#[test]
fn test_db_create_without_settings_builds_nothing() {
    let invocation = invoke(&["sql", "db", "create", "-g", "rg", "-s", "srv", "-n", "db1"]).unwrap();
    let ns = &invocation.namespace;

    assert_eq!(ns.value("parameters"), &Value::Null);
    assert!(!ns.contains("collation"));
    assert!(!ns.contains("tier"));
}

#[test]
fn test_invalid_size_unit_is_reported_per_argument() {
    let err = invoke(&[
        "sql", "db", "create", "-g", "rg", "-s", "srv", "-n", "db1", "--max-size", "10XB",
    ])
    .unwrap_err();
    match err {
        CliError::InvalidArgument { arg, source } => {
            assert!(arg.contains("max-size"), "unexpected arg {arg}");
            assert!(source.to_string().contains("XB"));
        }
        other => panic!("expected an invalid argument error, got {other:?}"),
    }
}

#[test]
fn test_unknown_flag_is_a_parse_error() {
    let err = invoke(&["sql", "db", "create", "-g", "rg", "-s", "srv", "-n", "db1", "--bogus"])
        .unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
}

#[test]
fn test_mi_create_expands_subnet_name() {
    let invocation = invoke(&[
        "sql", "mi", "create", "-g", "rg", "-n", "mi1", "-l", "westus", "-u", "admin", "-p",
        "secret", "--subnet", "default", "--vnet-name", "vnet1", "--storage", "64GB",
    ])
    .unwrap();
    let ns = &invocation.namespace;

    let mi = ns.model::<ManagedInstance>("parameters").unwrap();
    assert_eq!(
        mi.virtual_network_subnet_id.as_deref(),
        Some(
            "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg/providers/\
             Microsoft.Network/virtualNetworks/vnet1/subnets/default"
        )
    );
    assert_eq!(mi.storage_size_in_gb, Some(64));
    assert_eq!(mi.administrator_login.as_deref(), Some("admin"));
    assert!(!ns.contains("vnet_name"));
    assert_eq!(ns.str("location"), Some("westus"));
}

#[test]
fn test_mi_create_rejects_storage_off_increment() {
    let err = invoke(&[
        "sql", "mi", "create", "-g", "rg", "-n", "mi1", "-l", "westus", "-u", "admin", "-p",
        "secret", "--subnet", "default", "--vnet-name", "vnet1", "--storage", "50",
    ])
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "incorrect usage: --storage must be specified in increments of 32 GB"
    );
}

#[test]
fn test_mi_create_subnet_name_needs_vnet() {
    let err = invoke(&[
        "sql", "mi", "create", "-g", "rg", "-n", "mi1", "-l", "westus", "-u", "admin", "-p",
        "secret", "--subnet", "default",
    ])
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "incorrect usage: [--subnet ID | --subnet NAME --vnet-name NAME]"
    );
}

#[test]
fn test_vnet_rule_create_accepts_subnet_id() {
    let subnet = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/\
                  virtualNetworks/vnet1/subnets/default";
    let invocation = invoke(&[
        "sql", "server", "vnet-rule", "create", "-g", "rg", "-s", "srv", "-n", "rule1",
        "--subnet", subnet,
    ])
    .unwrap();
    let ns = &invocation.namespace;
    assert_eq!(ns.str("virtual_network_subnet_id"), Some(subnet));
    assert!(!ns.contains("vnet_name"));
}

#[test]
fn test_job_step_output_keys_are_renamed() {
    let invocation = invoke(&[
        "sql", "job", "step", "create", "-g", "rg", "-s", "srv", "-a", "agent", "-j", "job1",
        "-n", "step1", "--text", "SELECT 1", "--credential", "cred", "--target-group", "tg",
        "--output-server", "out-srv", "--output-db", "out-db", "--output-table", "results",
        "--output-credential", "out-cred",
    ])
    .unwrap();
    let ns = &invocation.namespace;

    let step = ns.model::<JobStep>("parameters").unwrap();
    assert_eq!(step.credential.as_deref(), Some("cred"));
    assert_eq!(step.target_group.as_deref(), Some("tg"));

    let action = ns.model::<JobStepAction>("action").unwrap();
    assert_eq!(action.value.as_deref(), Some("SELECT 1"));
    let output = ns.model::<JobStepOutput>("output").unwrap();
    assert_eq!(output.server_name.as_deref(), Some("out-srv"));
    assert_eq!(output.credential.as_deref(), Some("out-cred"));
    assert_eq!(output.table_name.as_deref(), Some("results"));

    assert!(!ns.contains("output_server_name"));
    assert!(!ns.contains("output_credential"));
    // Server of the job itself is untouched.
    assert_eq!(ns.str("server_name"), Some("srv"));
}

#[test]
fn test_profile_supplies_configured_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "subscription = \"profile-sub\"\n\n[defaults]\ngroup = \"profile-rg\"\nsql-server = \"profile-srv\"\n",
    )
    .unwrap();
    let profile = Profile::load(&path).unwrap();

    let cli = Cli::new(profile).unwrap();
    let invocation = cli
        .invoke(["azsql", "sql", "db", "create", "-n", "db1"])
        .unwrap();
    let ns = &invocation.namespace;
    assert_eq!(ns.str("resource_group_name"), Some("profile-rg"));
    assert_eq!(ns.str("server_name"), Some("profile-srv"));
}

#[test]
fn test_tags_and_choice_values() {
    let invocation = invoke(&[
        "sql", "elastic-pool", "create", "-g", "rg", "-s", "srv", "-n", "pool1", "--tags",
        "env=prod", "team", "--license-type", "baseprice",
    ])
    .unwrap();
    let ns = &invocation.namespace;
    let json = ns.value("parameters").to_json();
    assert_eq!(json["tags"]["env"], "prod");
    assert_eq!(json["tags"]["team"], "");
    assert_eq!(json["licenseType"], "BasePrice");
}
