//! Elastic job records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::model::{ComplexType, Properties, PropertySpec};

/// When and how often a job runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

impl ComplexType for JobSchedule {
    const TYPE_NAME: &'static str = "JobSchedule";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::optional("start_time", "Schedule start time."),
            PropertySpec::optional("end_time", "Schedule end time."),
            PropertySpec::optional("schedule_type", "Schedule interval type. Possible values include: 'Once', 'Recurring'."),
            PropertySpec::optional("enabled", "Whether or not the schedule is enabled."),
            PropertySpec::optional("interval", "Value of the schedule's recurring interval, if the schedule type is recurring. ISO8601 duration format."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            start_time: props.datetime("start_time")?,
            end_time: props.datetime("end_time")?,
            schedule_type: props.string("schedule_type")?,
            enabled: props.boolean("enabled")?,
            interval: props.string("interval")?,
        })
    }
}

/// The T-SQL a job step executes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStepAction {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub source: &'static str,
    pub value: Option<String>,
}

impl ComplexType for JobStepAction {
    const TYPE_NAME: &'static str = "JobStepAction";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] =
            &[PropertySpec::required("value", "The action value, for example the text of the T-SQL script to execute.")];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            action_type: "TSql",
            source: "Inline",
            value: props.string("value")?,
        })
    }
}

/// Destination table for the results of a job step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStepOutput {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group_name: Option<String>,
    pub server_name: Option<String>,
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub table_name: Option<String>,
    pub credential: Option<String>,
}

impl ComplexType for JobStepOutput {
    const TYPE_NAME: &'static str = "JobStepOutput";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::optional("subscription_id", "The output destination subscription id."),
            PropertySpec::optional("resource_group_name", "The output destination resource group."),
            PropertySpec::required("server_name", "The output destination server name."),
            PropertySpec::required("database_name", "The output destination database."),
            PropertySpec::optional("schema_name", "The output destination schema."),
            PropertySpec::required("table_name", "The output destination table."),
            PropertySpec::required("credential", "The resource ID of the credential to use to connect to the output destination."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            output_type: "SqlDatabase",
            subscription_id: props.string("subscription_id")?,
            resource_group_name: props.string("resource_group_name")?,
            server_name: props.string("server_name")?,
            database_name: props.string("database_name")?,
            schema_name: props.string("schema_name")?,
            table_name: props.string("table_name")?,
            credential: props.string("credential")?,
        })
    }
}

/// Timeout and retry policy of a job step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStepExecutionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_retry_interval_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_retry_interval_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval_backoff_multiplier: Option<f64>,
}

impl ComplexType for JobStepExecutionOptions {
    const TYPE_NAME: &'static str = "JobStepExecutionOptions";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::optional("timeout_seconds", "Execution timeout for the job step."),
            PropertySpec::optional("retry_attempts", "Maximum number of times the job step will be reattempted if the first attempt fails."),
            PropertySpec::optional("initial_retry_interval_seconds", "Initial delay between retries for job step execution."),
            PropertySpec::optional("maximum_retry_interval_seconds", "The maximum amount of time to wait between retries for job step execution."),
            PropertySpec::optional("retry_interval_backoff_multiplier", "The backoff multiplier for the time between retries."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            timeout_seconds: props.int("timeout_seconds")?,
            retry_attempts: props.int("retry_attempts")?,
            initial_retry_interval_seconds: props.int("initial_retry_interval_seconds")?,
            maximum_retry_interval_seconds: props.int("maximum_retry_interval_seconds")?,
            retry_interval_backoff_multiplier: props.float("retry_interval_backoff_multiplier")?,
        })
    }
}

/// A single step of an elastic job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<i64>,
    pub target_group: Option<String>,
    pub credential: Option<String>,
    pub action: Option<JobStepAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<JobStepOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_options: Option<JobStepExecutionOptions>,
}

impl ComplexType for JobStep {
    const TYPE_NAME: &'static str = "JobStep";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::optional("step_id", "The job step's index within the job. If not specified when creating the job step, it will be created as the last step."),
            PropertySpec::required("target_group", "The resource ID of the target group that the job step will be executed on."),
            PropertySpec::required("credential", "The resource ID of the job credential that will be used to connect to the targets."),
            PropertySpec::required("action", "The action payload of the job step."),
            PropertySpec::optional("output", "Output destination properties of the job step."),
            PropertySpec::optional("execution_options", "Execution options for the job step."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            step_id: props.int("step_id")?,
            target_group: props.string("target_group")?,
            credential: props.string("credential")?,
            action: props.model::<JobStepAction>("action")?,
            output: props.model::<JobStepOutput>("output")?,
            execution_options: props.model::<JobStepExecutionOptions>("execution_options")?,
        })
    }
}
