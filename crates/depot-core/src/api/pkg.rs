//! `/api/v1/pkg`: packages and their icons.

use depot_rpc::{HttpTransport, ReqwestTransport, RpcClient};

use super::invoke;
use crate::error::DepotError;
use crate::models::{
    ConfigurePkgIconRequest, ConfigurePkgIconResult, GetPkgIconsRequest, GetPkgIconsResult,
    GetPkgRequest, GetPkgResult, RemovePkgIconRequest, RemovePkgIconResult,
};

pub struct PkgApi<'a, T = ReqwestTransport> {
    client: &'a RpcClient<T>,
    endpoint: String,
}

impl<'a, T: HttpTransport> PkgApi<'a, T> {
    pub fn new(client: &'a RpcClient<T>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch a package with the versions selected by the request.
    pub async fn get_pkg(&self, request: &GetPkgRequest) -> Result<GetPkgResult, DepotError> {
        if request.name.is_empty() {
            return Err(DepotError::InvalidArgument("the package name is required".into()));
        }
        let result: GetPkgResult = invoke(self.client, &self.endpoint, "getPkg", request).await?;
        tracing::info!("found {} pkg", result.name);
        Ok(result)
    }

    /// Metadata of the icons attached to a package (not the image data).
    pub async fn get_pkg_icons(
        &self,
        request: &GetPkgIconsRequest,
    ) -> Result<GetPkgIconsResult, DepotError> {
        invoke(self.client, &self.endpoint, "getPkgIcons", request).await
    }

    /// Replace the icons of a package.
    pub async fn configure_pkg_icon(
        &self,
        request: &ConfigurePkgIconRequest,
    ) -> Result<ConfigurePkgIconResult, DepotError> {
        invoke(self.client, &self.endpoint, "configurePkgIcon", request).await
    }

    /// Remove all icons from a package.
    pub async fn remove_pkg_icon(
        &self,
        request: &RemovePkgIconRequest,
    ) -> Result<RemovePkgIconResult, DepotError> {
        let result: Result<RemovePkgIconResult, DepotError> =
            invoke(self.client, &self.endpoint, "removePkgIcon", request).await;
        match &result {
            Ok(_) => tracing::info!("removed icons for {} pkg", request.pkg_name),
            Err(e) => tracing::error!("unable to remove the icons for {} pkg: {}", request.pkg_name, e),
        }
        result
    }
}
