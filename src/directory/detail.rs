//! Hospital page resolution and detail saving

use crate::client::{ClientError, DirectoryClient};
use crate::models::{Hospital, HospitalDetail};

use super::form::DetailForm;

/// A hospital together with its optional detail record
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalOverview {
    pub hospital: Hospital,
    pub details: Option<HospitalDetail>,
}

impl HospitalOverview {
    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

/// Fetch the hospital, then its detail record
///
/// A missing hospital is an error. A missing detail record is not.
pub async fn resolve_overview(
    client: &DirectoryClient,
    hospital_id: &str,
) -> Result<HospitalOverview, ClientError> {
    let hospital = client.get_hospital(hospital_id).await?;
    let details = client.get_details(hospital_id).await?;

    if details.is_none() {
        tracing::debug!(hospital_id, "Hospital has no detail record");
    }

    Ok(HospitalOverview { hospital, details })
}

/// Update the existing detail record, or create one
pub async fn save_details(
    client: &DirectoryClient,
    hospital_id: &str,
    existing: Option<&HospitalDetail>,
    form: &DetailForm,
) -> Result<HospitalDetail, ClientError> {
    match existing {
        Some(_) => client.update_details(hospital_id, &form.to_patch()).await,
        None => client.create_details(hospital_id, &form.to_new_detail()).await,
    }
}
