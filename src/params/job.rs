//! `sql job` registrations.

use sql_models::{JobSchedule, JobStep, JobStepAction, JobStepExecutionOptions, JobStepOutput};

use super::{job_agent_param_type, job_param_type, server_param_type};
use crate::arguments::{ArgKind, ArgSettings};
use crate::command::{CommandTable, Param};
use crate::complex::{create_args_for_complex_type, ComplexArg};
use crate::registry::ArgumentRegistry;

const SCHEDULE_ARG_GROUP: &str = "Schedule";
const SCHEDULE_INTERVAL_ARG_GROUP: &str = "Schedule Interval";
const ACTION_ARG_GROUP: &str = "Action";

pub(super) fn load_arguments(registry: &mut ArgumentRegistry) {
    registry.argument_context("sql job", |c| {
        c.argument("server_name", server_param_type());
        c.argument(
            "job_name",
            job_param_type().options(&["--name", "-n"]),
        );
        c.argument("job_agent_name", job_agent_param_type());
        c.argument(
            "description",
            ArgSettings::new().help("User-defined description of the job."),
        );

        c.argument(
            "enabled",
            ArgSettings::new()
                .group(SCHEDULE_ARG_GROUP)
                .kind(ArgKind::ThreeStateFlag)
                .help("Whether scheduled execution of this job is enabled."),
        );
        c.argument("start_time", ArgSettings::new().group(SCHEDULE_ARG_GROUP));
        c.argument("end_time", ArgSettings::new().group(SCHEDULE_ARG_GROUP));

        c.argument(
            "interval",
            ArgSettings::new().group(SCHEDULE_INTERVAL_ARG_GROUP).help(
                "Interval in ISO8601 duration format, e.g. \"P1M\" (1 month), \"P2W\" (2 weeks), \
                 \"P3D\" (3 days), \"PT4H\" (4 hours), or \"PT5M\" (5 minutes).",
            ),
        );
        for (dest, help) in [
            ("months", "Interval in months."),
            ("weeks", "Interval in weeks."),
            ("days", "Interval in days."),
            ("hours", "Interval in hours."),
            ("minutes", "Interval in minutes."),
        ] {
            c.argument(
                dest,
                ArgSettings::new()
                    .group(SCHEDULE_INTERVAL_ARG_GROUP)
                    .kind(ArgKind::Int)
                    .help(help),
            );
        }
    });

    registry.argument_context("sql job create", |c| {
        create_args_for_complex_type::<JobSchedule, _>(
            c,
            "schedule",
            &["enabled", "start_time", "end_time"],
            None,
        );
    });

    registry.argument_context("sql job step", |c| {
        c.argument("job_name", job_param_type());
        c.argument("step_name", ArgSettings::new().options(&["--name", "-n"]));
    });

    registry.argument_context("sql job step create", |c| {
        create_args_for_complex_type::<JobStep, _>(
            c,
            "parameters",
            &[
                "action",
                "credential",
                "execution_options",
                "step_id",
                "target_group",
                "output",
            ],
            None,
        );

        create_args_for_complex_type::<JobStepAction, _>(c, "action", &["value"], None);
        c.argument(
            "value",
            ArgSettings::new()
                .group(ACTION_ARG_GROUP)
                .options(&["--text"]),
        );
        c.argument("credential", ArgSettings::new().group(ACTION_ARG_GROUP));
        c.argument("target_group", ArgSettings::new().group(ACTION_ARG_GROUP));
        c.argument(
            "step_id",
            ArgSettings::new().group("Sequencing").kind(ArgKind::Int),
        );

        // `server_name` and `credential` are already taken by the step itself.
        create_args_for_complex_type::<JobStepOutput, _>(
            c,
            "output",
            &[
                ComplexArg::renamed("server_name", "output_server_name"),
                "database_name".into(),
                "schema_name".into(),
                "table_name".into(),
                ComplexArg::renamed("credential", "output_credential"),
            ],
            Some("Output"),
        );
        c.argument(
            "output_server_name",
            ArgSettings::new()
                .options(&["--output-server"])
                .required(false),
        );
        c.argument(
            "database_name",
            ArgSettings::new().options(&["--output-db"]).required(false),
        );
        c.argument(
            "schema_name",
            ArgSettings::new().options(&["--output-schema"]),
        );
        c.argument(
            "table_name",
            ArgSettings::new()
                .options(&["--output-table"])
                .required(false),
        );
        c.argument("output_credential", ArgSettings::new().required(false));

        // TODO: accept minutes/hours for timeout_seconds once a duration
        // converter exists alongside the size converter.
        create_args_for_complex_type::<JobStepExecutionOptions, _>(
            c,
            "execution_options",
            &[
                "timeout_seconds",
                "retry_attempts",
                "initial_retry_interval_seconds",
                "maximum_retry_interval_seconds",
                "retry_interval_backoff_multiplier",
            ],
            Some("Execution Options"),
        );
    });
}

const JOB_CREATE_PARAMS: &[Param] = &[
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("job_agent_name"),
    Param::required("job_name"),
    Param::optional("description"),
    Param::optional("schedule"),
    Param::optional("interval"),
    Param::optional("months"),
    Param::optional("weeks"),
    Param::optional("days"),
    Param::optional("hours"),
    Param::optional("minutes"),
];

const JOB_STEP_CREATE_PARAMS: &[Param] = &[
    Param::required("server_name"),
    Param::required("resource_group_name"),
    Param::required("job_agent_name"),
    Param::required("job_name"),
    Param::required("step_name"),
];

pub(super) fn load_commands(table: &mut CommandTable) {
    table.command("sql job create", "Create an elastic job.", JOB_CREATE_PARAMS);
    table.command(
        "sql job step create",
        "Create a step of an elastic job.",
        JOB_STEP_CREATE_PARAMS,
    );
}
