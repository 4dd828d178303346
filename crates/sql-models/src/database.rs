//! Database, elastic pool and SKU records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::model::{ComplexType, Properties, PropertySpec};

/// Pricing tier / performance level of a database, pool or managed instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

impl ComplexType for Sku {
    const TYPE_NAME: &'static str = "Sku";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required(
                "name",
                "The name of the SKU, typically a letter + number code, e.g. P3.",
            ),
            PropertySpec::optional("tier", "The tier or edition of the particular SKU, e.g. Basic, Premium."),
            PropertySpec::optional("size", "Size of the particular SKU."),
            PropertySpec::optional("family", "If the service has different generations of hardware, for the same SKU, then that can be captured here."),
            PropertySpec::optional("capacity", "Capacity of the particular SKU."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            name: props.string("name")?,
            tier: props.string("tier")?,
            size: props.string("size")?,
            family: props.string("family")?,
            capacity: props.int("capacity")?,
        })
    }
}

/// Request body for creating or updating a single database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elastic_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_database_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_point_in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_database_deletion_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_collation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_redundant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_scale: Option<String>,
}

impl ComplexType for Database {
    const TYPE_NAME: &'static str = "Database";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("location", "Resource location."),
            PropertySpec::optional("tags", "Resource tags."),
            PropertySpec::optional("sku", "The database SKU."),
            PropertySpec::optional("create_mode", "Specifies the mode of database creation."),
            PropertySpec::optional("collation", "The collation of the database."),
            PropertySpec::optional("max_size_bytes", "The max size of the database expressed in bytes."),
            PropertySpec::optional("sample_name", "The name of the sample schema to apply when creating this database."),
            PropertySpec::optional("elastic_pool_id", "The resource identifier of the elastic pool containing this database."),
            PropertySpec::optional("source_database_id", "The resource identifier of the source database associated with create operation of this database."),
            PropertySpec::optional("restore_point_in_time", "Specifies the point in time (ISO8601 format) of the source database that will be restored to create the new database."),
            PropertySpec::optional("source_database_deletion_date", "Specifies the time that the database was deleted."),
            PropertySpec::optional("catalog_collation", "Collation of the metadata catalog."),
            PropertySpec::optional("zone_redundant", "Whether or not this database is zone redundant."),
            PropertySpec::optional("license_type", "The license type to apply for this database."),
            PropertySpec::optional("read_scale", "Whether read-only connections are routed to a readonly replica."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            location: props.string("location")?,
            tags: props.tags("tags")?,
            sku: props.model::<Sku>("sku")?,
            create_mode: props.string("create_mode")?,
            collation: props.string("collation")?,
            max_size_bytes: props.int("max_size_bytes")?,
            sample_name: props.string("sample_name")?,
            elastic_pool_id: props.string("elastic_pool_id")?,
            source_database_id: props.string("source_database_id")?,
            restore_point_in_time: props.datetime("restore_point_in_time")?,
            source_database_deletion_date: props.datetime("source_database_deletion_date")?,
            catalog_collation: props.string("catalog_collation")?,
            zone_redundant: props.boolean("zone_redundant")?,
            license_type: props.string("license_type")?,
            read_scale: props.string("read_scale")?,
        })
    }
}

/// Per-database capacity bounds inside an elastic pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPoolPerDatabaseSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<f64>,
}

impl ComplexType for ElasticPoolPerDatabaseSettings {
    const TYPE_NAME: &'static str = "ElasticPoolPerDatabaseSettings";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::optional("min_capacity", "The minimum capacity all databases are guaranteed."),
            PropertySpec::optional("max_capacity", "The maximum capacity any one database can consume."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            min_capacity: props.float("min_capacity")?,
            max_capacity: props.float("max_capacity")?,
        })
    }
}

/// Request body for creating an elastic pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticPool {
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_database_settings: Option<ElasticPoolPerDatabaseSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_redundant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
}

impl ComplexType for ElasticPool {
    const TYPE_NAME: &'static str = "ElasticPool";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("location", "Resource location."),
            PropertySpec::optional("tags", "Resource tags."),
            PropertySpec::optional("sku", "The elastic pool SKU."),
            PropertySpec::optional("max_size_bytes", "The storage limit for the database elastic pool in bytes."),
            PropertySpec::optional("per_database_settings", "The per database settings for the elastic pool."),
            PropertySpec::optional("zone_redundant", "Whether or not this elastic pool is zone redundant."),
            PropertySpec::optional("license_type", "The license type to apply for this elastic pool."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            location: props.string("location")?,
            tags: props.tags("tags")?,
            sku: props.model::<Sku>("sku")?,
            max_size_bytes: props.int("max_size_bytes")?,
            per_database_settings: props
                .model::<ElasticPoolPerDatabaseSettings>("per_database_settings")?,
            zone_redundant: props.boolean("zone_redundant")?,
            license_type: props.string("license_type")?,
        })
    }
}
