//! JSON request/response shapes.
//!
//! Every response uses the same envelope:
//! `{"success": true, "data": {...}}` or `{"success": false, "error": "...", "code": "..."}`.

use serde::{Deserialize, Serialize};

use crate::{
    engine::calculate,
    error::ValidationError,
    model::{CalculationResult, ParsedLists},
    parser::{parse_with_limits, ParseLimits},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculateRequest {
    /// Lists already split by the uploader.
    Lists(ParsedLists),
    /// Raw file text, parsed on receipt.
    Content { content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Success { success: bool, data: CalculationResult },
    Failure { success: bool, error: String, code: String },
}

impl Response {
    pub fn success(data: CalculationResult) -> Self {
        Response::Success { success: true, data }
    }

    pub fn failure(err: &ValidationError) -> Self {
        let kind = err.kind();
        Response::Failure {
            success: false,
            error: kind.user_message().to_string(),
            code: kind.code().to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}

impl From<Result<CalculationResult, ValidationError>> for Response {
    fn from(result: Result<CalculationResult, ValidationError>) -> Self {
        match result {
            Ok(data) => Response::success(data),
            Err(err) => Response::failure(&err),
        }
    }
}

#[tracing::instrument(skip_all)]
pub fn handle(request: &CalculateRequest, limits: &ParseLimits) -> Response {
    let result = match request {
        CalculateRequest::Lists(lists) => calculate(lists),
        CalculateRequest::Content { content } => {
            parse_with_limits(content, limits).and_then(|lists| calculate(&lists))
        }
    };
    if let Err(err) = &result {
        tracing::warn!(code = err.kind().code(), %err, "calculation rejected");
    }
    result.into()
}

pub fn handle_json(body: &str, limits: &ParseLimits) -> Response {
    if body.len() > limits.max_bytes {
        return Response::failure(&ValidationError::FileTooLarge {
            size: body.len(),
            limit: limits.max_bytes,
        });
    }
    match serde_json::from_str::<CalculateRequest>(body) {
        Ok(request) => handle(&request, limits),
        Err(err) => {
            tracing::warn!(%err, "unreadable request body");
            Response::failure(&ValidationError::InvalidFormat(err.to_string()))
        }
    }
}
