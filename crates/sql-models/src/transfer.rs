//! Bacpac export and import requests.

use serde::Serialize;

use crate::error::Result;
use crate::model::{ComplexType, Properties, PropertySpec};

const STORAGE_AND_LOGIN: &[PropertySpec] = &[
    PropertySpec::required("storage_key_type", "The type of the storage key to use."),
    PropertySpec::required("storage_key", "The storage key to use. If storage key type is SharedAccessKey, it must be preceded with a \"?.\""),
    PropertySpec::required("storage_uri", "The storage uri to use."),
    PropertySpec::required("administrator_login", "The name of the SQL administrator."),
    PropertySpec::required("administrator_login_password", "The password of the SQL administrator."),
    PropertySpec::optional("authentication_type", "The authentication type."),
];

/// Request body for exporting a database to a bacpac.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub storage_key_type: Option<String>,
    pub storage_key: Option<String>,
    pub storage_uri: Option<String>,
    pub administrator_login: Option<String>,
    pub administrator_login_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<String>,
}

impl ComplexType for ExportRequest {
    const TYPE_NAME: &'static str = "ExportRequest";

    fn properties() -> &'static [PropertySpec] {
        STORAGE_AND_LOGIN
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            storage_key_type: props.string("storage_key_type")?,
            storage_key: props.string("storage_key")?,
            storage_uri: props.string("storage_uri")?,
            administrator_login: props.string("administrator_login")?,
            administrator_login_password: props.string("administrator_login_password")?,
            authentication_type: props.string("authentication_type")?,
        })
    }
}

/// Request body for importing a bacpac into an existing database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportExtensionRequest {
    pub storage_key_type: Option<String>,
    pub storage_key: Option<String>,
    pub storage_uri: Option<String>,
    pub administrator_login: Option<String>,
    pub administrator_login_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<String>,
    pub operation_mode: &'static str,
}

impl Default for ImportExtensionRequest {
    fn default() -> Self {
        Self {
            storage_key_type: None,
            storage_key: None,
            storage_uri: None,
            administrator_login: None,
            administrator_login_password: None,
            authentication_type: None,
            operation_mode: "Import",
        }
    }
}

impl ComplexType for ImportExtensionRequest {
    const TYPE_NAME: &'static str = "ImportExtensionRequest";

    fn properties() -> &'static [PropertySpec] {
        STORAGE_AND_LOGIN
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            storage_key_type: props.string("storage_key_type")?,
            storage_key: props.string("storage_key")?,
            storage_uri: props.string("storage_uri")?,
            administrator_login: props.string("administrator_login")?,
            administrator_login_password: props.string("administrator_login_password")?,
            authentication_type: props.string("authentication_type")?,
            ..Self::default()
        })
    }
}
