//! `depot pkg`: package lookups and icon management.

use depot_core::models::{GetPkgIconsRequest, GetPkgRequest, PkgVersionType, RemovePkgIconRequest};
use depot_core::{DepotClient, DepotError};

pub async fn get(
    client: &DepotClient,
    name: &str,
    architecture: Option<&str>,
    version_type: PkgVersionType,
) -> Result<serde_json::Value, DepotError> {
    let request = GetPkgRequest {
        version_type,
        ..GetPkgRequest::latest(name, architecture.map(str::to_string))
    };
    let pkg = client.pkg().get_pkg(&request).await?;
    to_json(&pkg)
}

pub async fn icons(client: &DepotClient, name: &str) -> Result<serde_json::Value, DepotError> {
    let icons = client
        .pkg()
        .get_pkg_icons(&GetPkgIconsRequest {
            pkg_name: name.to_string(),
        })
        .await?;
    to_json(&icons)
}

pub async fn remove_icon(client: &DepotClient, name: &str) -> Result<serde_json::Value, DepotError> {
    client
        .pkg()
        .remove_pkg_icon(&RemovePkgIconRequest {
            pkg_name: name.to_string(),
        })
        .await?;
    Ok(serde_json::json!({ "pkgName": name, "hasIcon": false }))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DepotError> {
    serde_json::to_value(value).map_err(|e| DepotError::Encode(e.to_string()))
}
