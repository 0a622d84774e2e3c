//! Requests for a portion of a food and their resolution state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error_chain::FieldError;

/// Resolution state of a request. Accepted and Rejected are terminal.
///
/// Serialized as its stored code; schemas that carry it document the field
/// as `i16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum RequestStatus {
    /// Waiting for the food owner, stored as 0.
    Pending,
    /// Accepted and stock moved, stored as 1.
    Accepted,
    /// Rejected without stock effect, stored as 2.
    Rejected,
}

impl RequestStatus {
    /// Stored representation.
    pub const fn code(self) -> i16 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Rejected => 2,
        }
    }

    /// Whether the request still awaits a decision.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Unknown stored status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown request status code {0}")]
pub struct UnknownRequestStatus(pub i16);

impl TryFrom<i16> for RequestStatus {
    type Error = UnknownRequestStatus;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Rejected),
            other => Err(UnknownRequestStatus(other)),
        }
    }
}

impl From<RequestStatus> for i16 {
    fn from(value: RequestStatus) -> Self {
        value.code()
    }
}

/// A user's request for a quantity of someone else's food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Request {
    /// Request identifier.
    pub id_request: Uuid,
    /// Requester.
    pub id_user: Uuid,
    /// Requested food.
    pub id_food: Uuid,
    /// 0 pending, 1 accepted, 2 rejected.
    #[schema(value_type = i16)]
    pub status: RequestStatus,
    /// Requested quantity, at least 1.
    pub quantity: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

/// A pending request joined with the owner and stock of its food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequestWithFood {
    /// Request identifier.
    pub id_request: Uuid,
    /// Requester.
    pub id_user: Uuid,
    /// Requested food.
    pub id_food: Uuid,
    /// 0 pending, 1 accepted, 2 rejected.
    #[schema(value_type = i16)]
    pub status: RequestStatus,
    /// Requested quantity.
    pub quantity: i32,
    /// Owner of the food.
    pub id_user_food: Uuid,
    /// Remaining stock of the food.
    pub stock: i32,
}

impl RequestWithFood {
    /// Whether `user` owns the requested food.
    pub fn is_owned_by(&self, user: Uuid) -> bool {
        self.id_user_food == user
    }

    /// Whether the food can cover the requested quantity.
    pub fn stock_covers_request(&self) -> bool {
        self.stock >= self.quantity
    }
}

/// Resolution chosen by a food owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Accept,
    Reject,
}

/// Action string other than `accept` or `reject`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for RequestAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("accept"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Requester supplied fields for a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RequestDraft {
    pub quantity: i32,
}

impl RequestDraft {
    /// Check the draft, collecting every offending field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.quantity < 1 {
            return Err(vec![FieldError::new(
                "quantity",
                "quantity must be at least 1",
            )]);
        }
        Ok(())
    }

    /// Build a pending request.
    pub fn into_request(
        self,
        id_request: Uuid,
        requester: Uuid,
        id_food: Uuid,
        now: DateTime<Utc>,
    ) -> Request {
        Request {
            id_request,
            id_user: requester,
            id_food,
            status: RequestStatus::Pending,
            quantity: self.quantity,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for request primitives.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, RequestStatus::Pending)]
    #[case(1, RequestStatus::Accepted)]
    #[case(2, RequestStatus::Rejected)]
    fn status_codes_round_trip(#[case] code: i16, #[case] status: RequestStatus) {
        assert_eq!(RequestStatus::try_from(code), Ok(status));
        assert_eq!(i16::from(status), code);
    }

    #[rstest]
    fn unknown_status_code_is_rejected() {
        assert_eq!(RequestStatus::try_from(7), Err(UnknownRequestStatus(7)));
    }

    #[rstest]
    #[case("accept", Ok(RequestAction::Accept))]
    #[case("reject", Ok(RequestAction::Reject))]
    #[case("ACCEPT", Err(UnknownAction("ACCEPT".to_owned())))]
    #[case("", Err(UnknownAction(String::new())))]
    fn actions_parse_exactly(#[case] raw: &str, #[case] expected: Result<RequestAction, UnknownAction>) {
        assert_eq!(raw.parse::<RequestAction>(), expected);
    }

    #[rstest]
    #[case(10, 4, true)]
    #[case(4, 4, true)]
    #[case(10, 12, false)]
    fn stock_covers_request_when_enough(#[case] stock: i32, #[case] quantity: i32, #[case] expected: bool) {
        let row = RequestWithFood {
            id_request: Uuid::new_v4(),
            id_user: Uuid::new_v4(),
            id_food: Uuid::new_v4(),
            status: RequestStatus::Pending,
            quantity,
            id_user_food: Uuid::new_v4(),
            stock,
        };
        assert_eq!(row.stock_covers_request(), expected);
    }

    #[rstest]
    fn status_serializes_as_number() {
        let value = serde_json::to_value(RequestStatus::Accepted).expect("serialize status");
        assert_eq!(value, serde_json::json!(1));
    }

    #[rstest]
    #[case(0, false)]
    #[case(-3, false)]
    #[case(1, true)]
    fn draft_requires_positive_quantity(#[case] quantity: i32, #[case] valid: bool) {
        assert_eq!(RequestDraft { quantity }.validate().is_ok(), valid);
    }

    #[rstest]
    fn draft_builds_pending_request() {
        let now = Utc::now();
        let request = RequestDraft { quantity: 2 }.into_request(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            now,
        );
        assert!(request.status.is_pending());
        assert_eq!(request.quantity, 2);
    }
}
