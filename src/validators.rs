//! Post-parse validators shared by several commands.

use crate::error::{CliError, Result};
use crate::invocation::InvocationContext;
use crate::namespace::Namespace;
use crate::resource_id::{is_valid_resource_id, ResourceId};

const SUBNET_USAGE: &str = "[--subnet ID | --subnet NAME --vnet-name NAME]";

/// Accept `--subnet ID`, or `--subnet NAME` together with `--vnet-name`,
/// in which case the subnet is rewritten to its full resource id.
/// `vnet_name` is always removed afterwards.
pub fn validate_subnet(ctx: &InvocationContext, namespace: &mut Namespace) -> Result<()> {
    let subnet = namespace.str("virtual_network_subnet_id").map(str::to_string);
    let vnet = namespace.str("vnet_name").map(str::to_string);
    let subnet_is_id = subnet.as_deref().is_some_and(is_valid_resource_id);

    match (subnet, vnet) {
        (Some(_), None) if subnet_is_id => {}
        (None, None) => {}
        (Some(subnet), Some(vnet)) if !subnet_is_id => {
            let resource_group = namespace.str("resource_group_name").ok_or_else(|| {
                CliError::usage("--resource-group is required when --subnet is a name")
            })?;
            let id = ResourceId::new(
                ctx.subscription_id()?,
                resource_group,
                "Microsoft.Network",
                "virtualNetworks",
                vnet,
            )
            .child("subnets", subnet);
            tracing::debug!("expanded subnet to {}", id);
            namespace.set("virtual_network_subnet_id", id.to_string());
        }
        _ => return Err(CliError::usage(SUBNET_USAGE)),
    }

    namespace.remove("vnet_name");
    Ok(())
}

/// Storage must be a multiple of 32 GB when given.
pub fn validate_managed_instance_storage_size(
    _ctx: &InvocationContext,
    namespace: &mut Namespace,
) -> Result<()> {
    match namespace.int("storage_size_in_gb") {
        Some(size) if size != 0 && size % 32 != 0 => Err(CliError::usage(
            "--storage must be specified in increments of 32 GB",
        )),
        _ => Ok(()),
    }
}
