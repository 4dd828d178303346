use sql_models::{
    ComplexType, JobStep, JobStepAction, JobStepOutput, ManagedDatabase, ModelObject, Properties,
    ServerAzureADAdministrator, Value,
};

#[test]
fn test_job_step_nests_action_and_output() {
    let action = JobStepAction::build(Properties::for_type::<JobStepAction>().with("value", "SELECT 1"))
        .unwrap();
    let output = JobStepOutput::build(
        Properties::for_type::<JobStepOutput>()
            .with("server_name", "outsrv")
            .with("database_name", "outdb")
            .with("table_name", "results"),
    )
    .unwrap();

    let step = JobStep::build(
        Properties::for_type::<JobStep>()
            .with("action", ModelObject::new(action).unwrap())
            .with("output", ModelObject::new(output).unwrap())
            .with("step_id", "3"),
    )
    .unwrap();

    assert_eq!(step.step_id, Some(3));
    assert_eq!(step.action.unwrap().value.as_deref(), Some("SELECT 1"));
    assert_eq!(step.output.unwrap().server_name.as_deref(), Some("outsrv"));

    assert!(JobStep::is_required("action"));
    assert!(JobStepOutput::is_required("server_name"));
    assert!(!JobStepOutput::is_required("schema_name"));
}

#[test]
fn test_ad_admin_carries_constant_type() {
    let admin = ServerAzureADAdministrator::build(
        Properties::for_type::<ServerAzureADAdministrator>()
            .with("login", "dba-group")
            .with("sid", "00000000-0000-0000-0000-000000000000"),
    )
    .unwrap();

    let json = ModelObject::new(admin).unwrap().json().clone();
    assert_eq!(json["administratorType"], "ActiveDirectory");
    assert_eq!(json["login"], "dba-group");
}

#[test]
fn test_restore_targets_are_not_serialized() {
    let db = ManagedDatabase::build(
        Properties::for_type::<ManagedDatabase>()
            .with("target_managed_database_name", "restored")
            .with("restore_point_in_time", "2018-05-20T05:34:22"),
    )
    .unwrap();

    assert_eq!(db.target_managed_database_name.as_deref(), Some("restored"));
    let json = serde_json::to_value(&db).unwrap();
    assert!(json.get("targetManagedDatabaseName").is_none());
    assert_eq!(json["restorePointInTime"], "2018-05-20T05:34:22Z");
}

#[test]
fn test_value_truthiness() {
    assert!(!Value::Null.is_specified());
    assert!(!Value::Bool(false).is_specified());
    assert!(!Value::Int(0).is_specified());
    assert!(!Value::Str(String::new()).is_specified());
    assert!(!Value::List(vec![]).is_specified());
    assert!(Value::Int(-1).is_specified());
    assert!(Value::Str("x".into()).is_specified());
    assert!(Value::Bool(true).is_specified());
}
