use rocket::post;
use rocket::serde::json::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use super::{validate_issuance, AssetIssuance};
use crate::auth::AdminAuth;
use crate::params::{self, ErrorEnvelope, ParameterError};
use crate::transaction::{
    TransactionError, TransactionParams, TransactionService,
    TransactionSummary, NODE_UNAVAILABLE_CODE,
};

/// Raw issuance request as it arrives on the wire.
///
/// Domain parameters are kept string-typed so the validation pipeline decides
/// what they mean; the common transaction parameters are carried through to
/// the transaction node untouched.
#[derive(Debug, Deserialize)]
pub(crate) struct IssueAssetRequest {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) decimals: Option<String>,
    #[serde(rename = "quantityNQT")]
    pub(crate) quantity_nqt: Option<String>,
    #[serde(flatten)]
    pub(crate) params: TransactionParams,
}

#[tracing::instrument(skip(_auth, service))]
#[post("/transactions/issue-asset", format = "json", data = "<request>")]
pub(crate) async fn issue_asset(
    _auth: AdminAuth,
    service: &rocket::State<Arc<dyn TransactionService>>,
    request: Json<IssueAssetRequest>,
) -> Result<Json<TransactionSummary>, IssueAssetError> {
    let request = request.into_inner();

    let fields = validate_issuance(
        request.name.as_deref(),
        request.description.as_deref(),
        request.decimals.as_deref(),
    )?;
    let quantity_nqt =
        params::parse_quantity_nqt(request.quantity_nqt.as_deref())?;

    let attachment = AssetIssuance::new(
        fields.name,
        fields.description,
        fields.decimals,
        quantity_nqt,
    );

    let summary = service
        .create_transaction(&request.params, attachment)
        .await
        .map_err(|e| {
            error!(error = %e, "Transaction creation failed");
            IssueAssetError::Transaction(e)
        })?;

    Ok(Json(summary))
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum IssueAssetError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Transaction(TransactionError),
}

impl<'r> rocket::response::Responder<'r, 'static> for IssueAssetError {
    fn respond_to(
        self,
        _: &'r rocket::Request<'_>,
    ) -> rocket::response::Result<'static> {
        let (status, envelope) = match self {
            Self::Parameter(e) => (
                rocket::http::Status::BadRequest,
                ErrorEnvelope {
                    error_code: e.error_code(),
                    error_description: e.to_string(),
                },
            ),
            // Errors the node reported are forwarded verbatim.
            Self::Transaction(TransactionError::Node { code, description }) => (
                rocket::http::Status::BadRequest,
                ErrorEnvelope {
                    error_code: code,
                    error_description: description,
                },
            ),
            Self::Transaction(e) => (
                rocket::http::Status::BadGateway,
                ErrorEnvelope {
                    error_code: NODE_UNAVAILABLE_CODE,
                    error_description: e.to_string(),
                },
            ),
        };

        rocket::response::Response::build()
            .status(status)
            .header(rocket::http::ContentType::JSON)
            .sized_body(
                None,
                std::io::Cursor::new(
                    serde_json::to_string(&envelope).unwrap_or_else(|_| {
                        r#"{"errorCode":1,"errorDescription":"Internal server error"}"#
                            .to_string()
                    }),
                ),
            )
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Header, Status};
    use rocket::routes;
    use std::sync::Arc;
    use tracing_test::traced_test;

    use super::issue_asset;
    use crate::asset::{MAX_DESCRIPTION_LENGTH, MIN_NAME_LENGTH};
    use crate::params::ErrorEnvelope;
    use crate::test_utils::{test_config, TEST_API_KEY};
    use crate::transaction::mock::MockTransactionService;
    use crate::transaction::{TransactionService, TransactionSummary};

    fn string_with_length(len: usize) -> String {
        "a".repeat(len)
    }

    fn test_rocket(
        mock: &Arc<MockTransactionService>,
    ) -> rocket::Rocket<rocket::Build> {
        let service: Arc<dyn TransactionService> = mock.clone();

        rocket::build()
            .manage(test_config().expect("valid test config"))
            .manage(service)
            .mount("/", routes![issue_asset])
    }

    async fn dispatch(
        client: &rocket::local::asynchronous::Client,
        body: serde_json::Value,
    ) -> rocket::local::asynchronous::LocalResponse<'_> {
        client
            .post("/transactions/issue-asset")
            .header(ContentType::JSON)
            .header(Header::new("X-API-KEY", TEST_API_KEY))
            .body(body.to_string())
            .dispatch()
            .await
    }

    #[tokio::test]
    async fn test_issue_asset_builds_attachment_from_validated_fields() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let name = string_with_length(MIN_NAME_LENGTH + 1);
        let description = string_with_length(MAX_DESCRIPTION_LENGTH - 1);

        let response = dispatch(
            &client,
            serde_json::json!({
                "name": name,
                "description": description,
                "decimals": "4",
                "quantityNQT": "5",
                "feeNQT": "100000000",
                "deadline": "1440",
                "broadcast": true
            }),
        )
        .await;

        assert_eq!(response.status(), Status::Ok);

        let summary: TransactionSummary = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(summary.attachment.name(), name);
        assert_eq!(summary.attachment.description(), description);
        assert_eq!(summary.attachment.decimals(), 4);
        assert_eq!(summary.attachment.quantity_nqt(), 5);

        let call = mock.last_call().expect("service was called");
        assert_eq!(call.attachment.name(), name);
        assert_eq!(call.params.fee_nqt.as_deref(), Some("100000000"));
        assert_eq!(call.params.deadline.as_deref(), Some("1440"));
        assert_eq!(call.params.broadcast, Some(true));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_issue_asset_missing_name() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response =
            dispatch(&client, serde_json::json!({ "quantityNQT": "5" })).await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 3);
        assert_eq!(envelope.error_description, "\"name\" not specified");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_issue_asset_name_error_wins_over_description_error() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response = dispatch(
            &client,
            serde_json::json!({
                "name": string_with_length(MIN_NAME_LENGTH - 1),
                "description": string_with_length(MAX_DESCRIPTION_LENGTH + 1),
                "quantityNQT": "5"
            }),
        )
        .await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 4);
        assert_eq!(
            envelope.error_description,
            "incorrect \"name\" (length must be in [3..10] range)"
        );
    }

    #[tokio::test]
    async fn test_issue_asset_illegal_name() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response = dispatch(
            &client,
            serde_json::json!({
                "name": format!("{}[", string_with_length(MIN_NAME_LENGTH + 1)),
                "quantityNQT": "5"
            }),
        )
        .await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 4);
        assert_eq!(
            envelope.error_description,
            "incorrect \"name\" (must contain only digits and latin letters)"
        );
    }

    #[tokio::test]
    async fn test_issue_asset_unparsable_decimals() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response = dispatch(
            &client,
            serde_json::json!({
                "name": "gold",
                "decimals": "unParsable",
                "quantityNQT": "5"
            }),
        )
        .await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 4);
        assert_eq!(envelope.error_description, "incorrect \"decimals\"");
    }

    #[tokio::test]
    async fn test_issue_asset_missing_quantity() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response =
            dispatch(&client, serde_json::json!({ "name": "gold" })).await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 3);
        assert_eq!(envelope.error_description, "\"quantityNQT\" not specified");
        assert_eq!(mock.call_count(), 0);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_issue_asset_forwards_node_errors_verbatim() {
        let mock = Arc::new(MockTransactionService::new_node_error(
            6,
            "Not enough funds",
        ));
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response = dispatch(
            &client,
            serde_json::json!({ "name": "gold", "quantityNQT": "5" }),
        )
        .await;

        assert_eq!(response.status(), Status::BadRequest);

        let envelope: ErrorEnvelope = serde_json::from_str(
            &response.into_string().await.expect("valid response body"),
        )
        .expect("valid JSON response");

        assert_eq!(envelope.error_code, 6);
        assert_eq!(envelope.error_description, "Not enough funds");
        assert_eq!(mock.call_count(), 1);

        assert!(logs_contain("Transaction creation failed"));
    }

    #[tokio::test]
    async fn test_issue_asset_requires_api_key() {
        let mock = Arc::new(MockTransactionService::new_success());
        let client = rocket::local::asynchronous::Client::tracked(
            test_rocket(&mock),
        )
        .await
        .expect("valid rocket instance");

        let response = client
            .post("/transactions/issue-asset")
            .header(ContentType::JSON)
            .body(
                serde_json::json!({ "name": "gold", "quantityNQT": "5" })
                    .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Unauthorized);
        assert_eq!(mock.call_count(), 0);
    }
}
