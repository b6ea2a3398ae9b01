//! Lead purchase API handler.
//!
//! ```text
//! POST /api/v1/leads/purchase  Purchase access to a lead
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{PurchaseLeadRequest, PurchaseOutcome, RejectionReason};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require_text};

const JOB_ID: FieldName = FieldName::new("jobId");
const TECHNICIAN_ID: FieldName = FieldName::new("technicianId");
const TECHNICIAN_NAME: FieldName = FieldName::new("technicianName");

/// Purchase request body. Fields are optional at the wire level so missing
/// values surface as field-level 400s.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLeadBody {
    /// Lead identifier.
    #[schema(example = "0b1f5a52-6c3f-4f0e-9a43-0d0c1d2e3f40")]
    pub job_id: Option<String>,
    /// Purchasing technician identifier.
    #[schema(example = "9c1d6a70-2f1b-4c8e-b1a2-3d4e5f607182")]
    pub technician_id: Option<String>,
    /// Name recorded on the assignment.
    #[schema(example = "Sam Glazier")]
    pub technician_name: Option<String>,
}

impl TryFrom<PurchaseLeadBody> for PurchaseLeadRequest {
    type Error = Error;

    fn try_from(body: PurchaseLeadBody) -> Result<Self, Self::Error> {
        let job_id = require_text(body.job_id, JOB_ID)?;
        let technician_id = require_text(body.technician_id, TECHNICIAN_ID)?;
        let technician_name = require_text(body.technician_name, TECHNICIAN_NAME)?;
        Ok(Self {
            lead_id: parse_uuid(&job_id, JOB_ID)?,
            technician_id: parse_uuid(&technician_id, TECHNICIAN_ID)?,
            technician_name,
        })
    }
}

/// Successful purchase response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLeadResponse {
    /// Always `true`.
    pub success: bool,
    /// Created assignment.
    pub assignment_id: Uuid,
    /// Credits debited from the technician.
    pub credits_deducted: i64,
}

fn rejection_error(reason: RejectionReason) -> Error {
    let details = json!({ "reason": reason.code() });
    match reason {
        RejectionReason::AlreadyPurchased | RejectionReason::SoldOut => {
            Error::conflict(reason.reason()).with_details(details)
        }
        RejectionReason::InsufficientCredits => {
            Error::invalid_request(reason.reason()).with_details(details)
        }
    }
}

/// Purchase a lead for a technician.
///
/// Credits are debited only for paid-tier leads. The purchase is
/// all-or-nothing: a failure after the assignment is recorded removes it
/// again before the error is returned.
#[utoipa::path(
    post,
    path = "/api/v1/leads/purchase",
    request_body = PurchaseLeadBody,
    responses(
        (status = 200, description = "Lead purchased", body = PurchaseLeadResponse),
        (status = 400, description = "Missing fields or insufficient credits", body = ErrorEnvelope),
        (status = 409, description = "Already purchased or sold out", body = ErrorEnvelope),
        (status = 500, description = "Purchase failed", body = ErrorEnvelope),
        (status = 503, description = "Lead store unavailable", body = ErrorEnvelope)
    ),
    tags = ["leads"],
    operation_id = "purchaseLead"
)]
#[post("/leads/purchase")]
pub async fn purchase_lead(
    state: web::Data<HttpState>,
    payload: web::Json<PurchaseLeadBody>,
) -> ApiResult<HttpResponse> {
    let request = PurchaseLeadRequest::try_from(payload.into_inner())?;
    match state.lead_purchase.purchase(request).await? {
        PurchaseOutcome::Purchased(receipt) => Ok(HttpResponse::Ok().json(PurchaseLeadResponse {
            success: true,
            assignment_id: receipt.assignment_id,
            credits_deducted: receipt.credits_deducted,
        })),
        PurchaseOutcome::Rejected(reason) => Err(rejection_error(reason)),
    }
}
