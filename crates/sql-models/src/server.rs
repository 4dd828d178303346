//! Logical server records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::model::{ComplexType, Properties, PropertySpec};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator_login_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ComplexType for Server {
    const TYPE_NAME: &'static str = "Server";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("location", "Resource location."),
            PropertySpec::optional("tags", "Resource tags."),
            PropertySpec::optional("administrator_login", "Administrator username for the server. Can only be specified when the server is being created (and is required for creation)."),
            PropertySpec::optional("administrator_login_password", "The administrator login password (required for server creation)."),
            PropertySpec::optional("version", "The version of the server."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            location: props.string("location")?,
            tags: props.tags("tags")?,
            administrator_login: props.string("administrator_login")?,
            administrator_login_password: props.string("administrator_login_password")?,
            version: props.string("version")?,
        })
    }
}

/// Azure Active Directory administrator of a server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerAzureADAdministrator {
    pub administrator_type: &'static str,
    pub login: Option<String>,
    pub sid: Option<String>,
    pub tenant_id: Option<String>,
}

impl ComplexType for ServerAzureADAdministrator {
    const TYPE_NAME: &'static str = "ServerAzureADAdministrator";

    fn properties() -> &'static [PropertySpec] {
        const PROPERTIES: &[PropertySpec] = &[
            PropertySpec::required("login", "The server administrator login value."),
            PropertySpec::required("sid", "The server administrator Sid (Secure ID)."),
            PropertySpec::required("tenant_id", "The server Active Directory Administrator tenant id."),
        ];
        PROPERTIES
    }

    fn from_properties(props: &mut Properties) -> Result<Self> {
        Ok(Self {
            administrator_type: "ActiveDirectory",
            login: props.string("login")?,
            sid: props.string("sid")?,
            tenant_id: props.string("tenant_id")?,
        })
    }
}
