//! Azsql Library
//!
//! Argument registration and request assembly for Azure SQL management
//! commands. Command-line flags are declared per command scope, parsed with
//! clap, validated, and folded into structured request records from
//! [`sql_models`].
//!
//! # Features
//!
//! - Scoped registration: settings declared for `sql db` apply to every
//!   `sql db ...` command, refined by narrower scopes
//! - Complex arguments: one flag per record property, assembled into the
//!   record after parsing
//! - Unit-aware sizes: `--max-size 10GB` becomes a byte count
//! - Configured defaults: `-g` and `--server` fall back to the profile
//!
//! # CLI Usage
//!
//! ```bash
//! # Create a database with a vcore sku
//! azsql sql db create -g my-rg -s my-server -n my-db -e GeneralPurpose -f Gen5 -c 2
//!
//! # Create a managed instance in a subnet of an existing vnet
//! azsql sql mi create -g my-rg -n my-mi -l westus -u admin -p secret \
//!   --subnet default --vnet-name my-vnet --storage 64GB
//! ```

pub mod arguments;
pub mod command;
pub mod complex;
pub mod config;
pub mod error;
pub mod invocation;
pub mod namespace;
pub mod params;
pub mod registry;
pub mod resource_id;
pub mod validators;

pub use arguments::{ArgKind, ArgSettings, Argument, Validator};
pub use command::{CommandSpec, CommandTable, Param};
pub use complex::{create_args_for_complex_type, ComplexArg, ComplexArgumentProcessor};
pub use config::{ConversionError, Profile, SizeWithUnitConverter};
pub use error::{CliError, Result};
pub use invocation::{Cli, GlobalArgs, Invocation, InvocationContext};
pub use namespace::Namespace;
pub use registry::{ArgumentContext, ArgumentRegistry};
pub use resource_id::{is_valid_resource_id, ResourceId};
