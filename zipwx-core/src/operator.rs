use async_trait::async_trait;

/// The person driving the lookup: answers the credential prompt and receives alerts.
#[async_trait]
pub trait Operator: Send + Sync {
    /// Ask for the GeoNames username. `Ok(None)` means the prompt was cancelled.
    async fn solicit_credential(&self) -> anyhow::Result<Option<String>>;

    /// Tell the operator a lookup failed. Returns once the message is acknowledged.
    async fn alert(&self, message: &str);
}
