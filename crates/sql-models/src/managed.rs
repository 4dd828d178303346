//! Managed instance and managed database records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::Sku;
use crate::error::Result;
use crate::model::{ComplexType, Properties, PropertySpec};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedInstance {
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator_login_password: Option<String>,
    #[serde(rename = "subnetId", skip_serializing_if = "Option::is_none")]
    pub virtual_network_subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(rename = "vCores", skip_serializing_if = "Option::is_none")]
    pub vcores: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_size_in_gb: Option<i64>,
}

impl ComplexType for ManagedInstance {
    const TYPE_NAME: &'static str = "ManagedInstance";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("location", "Resource location."),
            PropertySpec::optional("tags", "Resource tags."),
            PropertySpec::optional("sku", "Managed instance SKU."),
            PropertySpec::optional("administrator_login", "Administrator username for the managed instance. Can only be specified when the managed instance is being created (and is required for creation)."),
            PropertySpec::optional("administrator_login_password", "The administrator login password (required for managed instance creation)."),
            PropertySpec::optional("virtual_network_subnet_id", "Subnet resource ID for the managed instance."),
            PropertySpec::optional("license_type", "The license type."),
            PropertySpec::optional("vcores", "The number of vCores."),
            PropertySpec::optional("storage_size_in_gb", "The maximum storage size in GB."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            location: props.string("location")?,
            tags: props.tags("tags")?,
            sku: props.model::<Sku>("sku")?,
            administrator_login: props.string("administrator_login")?,
            administrator_login_password: props.string("administrator_login_password")?,
            virtual_network_subnet_id: props.string("virtual_network_subnet_id")?,
            license_type: props.string("license_type")?,
            vcores: props.int("vcores")?,
            storage_size_in_gb: props.int("storage_size_in_gb")?,
        })
    }
}

/// A database hosted in a managed instance.
///
/// The restore target names are carried for the command layer and never
/// serialized into the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedDatabase {
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_point_in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_database_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_mode: Option<String>,
    #[serde(skip)]
    pub target_managed_database_name: Option<String>,
    #[serde(skip)]
    pub target_managed_instance_name: Option<String>,
}

impl ComplexType for ManagedDatabase {
    const TYPE_NAME: &'static str = "ManagedDatabase";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("location", "Resource location."),
            PropertySpec::optional("tags", "Resource tags."),
            PropertySpec::optional("collation", "Collation of the managed database."),
            PropertySpec::optional("restore_point_in_time", "Conditional. If createMode is PointInTimeRestore, this value is required. Specifies the point in time (ISO8601 format) of the source database that will be restored to create the new database."),
            PropertySpec::optional("source_database_id", "The resource identifier of the source database associated with create operation of this database."),
            PropertySpec::optional("create_mode", "Managed database create mode."),
            PropertySpec::optional("target_managed_database_name", "Name of the managed database that will be created as the restore destination."),
            PropertySpec::optional("target_managed_instance_name", "Name of the managed instance to restore managed database to."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            location: props.string("location")?,
            tags: props.tags("tags")?,
            collation: props.string("collation")?,
            restore_point_in_time: props.datetime("restore_point_in_time")?,
            source_database_id: props.string("source_database_id")?,
            create_mode: props.string("create_mode")?,
            target_managed_database_name: props.string("target_managed_database_name")?,
            target_managed_instance_name: props.string("target_managed_instance_name")?,
        })
    }
}
