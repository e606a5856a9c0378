//! Address sub-client — saved delivery addresses.

use super::{Address, NewAddress};
use crate::client::StorefrontClient;
use crate::error::SdkError;

/// Sub-client for address operations. All endpoints are authenticated; a
/// missing or rejected token surfaces as `HttpError::Unauthorized`.
pub struct Addresses<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Addresses<'_> {
    pub async fn list(&self) -> Result<Vec<Address>, SdkError> {
        let response = self.client.api.addresses().await?;
        Ok(response.into_iter().map(Address::from).collect())
    }

    /// The address the server reports as default. The server is supposed
    /// to keep exactly one; the client does not second-guess it.
    pub async fn default(&self) -> Result<Address, SdkError> {
        let response = self.client.api.default_address().await?;
        Ok(response.into())
    }

    /// Create a new address. Field validation runs locally before any
    /// network call.
    pub async fn create(&self, address: &NewAddress) -> Result<Address, SdkError> {
        address.validate().map_err(SdkError::Validation)?;
        let response = self.client.api.create_address(address).await?;
        Ok(response.into())
    }
}
