use tokio::sync::OnceCell;

use crate::{error::LookupError, model::Credential, operator::Operator};

/// Session-wide holder of the GeoNames username.
///
/// The operator is asked at most once per successful initialisation. Concurrent
/// callers wait on the same prompt instead of opening a second one. A cancelled
/// or blank answer leaves the store empty so the next lookup asks again.
#[derive(Debug, Default)]
pub struct CredentialStore {
    cell: OnceCell<Credential>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential supplied up front (e.g. on the command line).
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            cell: OnceCell::new_with(Some(credential)),
        }
    }

    pub fn get(&self) -> Option<&Credential> {
        self.cell.get()
    }

    pub async fn ensure_credential(
        &self,
        operator: &dyn Operator,
    ) -> Result<Credential, LookupError> {
        let credential = self
            .cell
            .get_or_try_init(|| async {
                tracing::debug!("No credential held yet, asking the operator");

                let answer = match operator.solicit_credential().await {
                    Ok(answer) => answer,
                    Err(e) => {
                        tracing::warn!("Credential prompt failed: {e:#}");
                        None
                    }
                };

                answer
                    .and_then(Credential::new)
                    .ok_or(LookupError::NoCredential)
            })
            .await?;

        Ok(credential.clone())
    }
}
