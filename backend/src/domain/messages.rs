//! Event names, error messages and catalog keys shared across use cases.

/// Operation names recorded in error frames and response labels.
pub mod events {
    /// Owner accepts or rejects a pending request.
    pub const REQUEST_ACTION: &str = "request_action";
    /// Loading the pending request joined with its food.
    pub const GET_PENDING_REQUEST: &str = "get_request_food_by_id_request";
    /// Requester asks for a quantity of a food.
    pub const CREATE_REQUEST: &str = "create_request";
    /// Owner lists requests made against one of their foods.
    pub const LIST_REQUESTS_FOOD: &str = "list_requests_food";
    /// Requester lists their own requests.
    pub const LIST_REQUESTS_USER: &str = "list_requests_user";
    /// Public food listing.
    pub const GET_FOODS: &str = "get_foods";
    /// Public food detail.
    pub const GET_DETAIL_SHARED_FOOD: &str = "get_detail_shared_food";
    /// Owner publishes a food.
    pub const CREATE_FOOD: &str = "create_food";
    /// Owner lists their foods.
    pub const LIST_MY_FOODS: &str = "list_my_foods";
    /// Owner reads one of their foods.
    pub const GET_DETAIL_MY_FOOD: &str = "get_detail_my_food";
    /// Owner edits a food.
    pub const UPDATE_MY_FOODS: &str = "update_my_foods";
    /// Owner removes a food.
    pub const DELETE_MY_FOOD: &str = "delete_my_food";
    /// Account registration.
    pub const REGISTER_USER: &str = "register_user";
    /// Credential exchange.
    pub const LOGIN: &str = "login";
    /// Account listing.
    pub const LIST_USERS: &str = "list_users";
    /// Bearer token validation.
    pub const VALIDATE_BEARER_TOKEN: &str = "validate_bearer_token_middleware";
    /// Panic recovery.
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}

/// Messages recorded in error frames.
pub mod errors {
    /// Malformed identifier, or the caller does not own the resource.
    pub const ID_NOT_VALID: &str = "id not valid";
    /// Caller is not the owner.
    pub const FORBIDDEN: &str = "forbidden";
    /// No bearer token was supplied.
    pub const UNAUTHORIZED: &str = "unauthorized";
    /// Bearer token failed verification.
    pub const TOKEN_NOT_VALID: &str = "token not valid";
    /// Food is missing or soft-deleted.
    pub const FOOD_NOT_FOUND: &str = "food not found";
    /// Food could not be created.
    pub const CREATE_FOOD_ERROR: &str = "create food error";
    /// Food row or its stock could not be updated.
    pub const UPDATE_FOOD_ERROR: &str = "update food error";
    /// Food could not be soft-deleted.
    pub const DELETE_FOOD_ERROR: &str = "delete food error";
    /// Food listing failed.
    pub const LIST_FOODS_ERROR: &str = "list foods error";
    /// Food lookup failed.
    pub const GET_FOOD_ERROR: &str = "get food error";
    /// Request could not be created, or its body was malformed.
    pub const CREATE_REQUEST_ERROR: &str = "create request error";
    /// Request listing failed.
    pub const LIST_REQUESTS_ERROR: &str = "list requests error";
    /// Accept or reject could not be carried out.
    pub const ACTION_REQUEST_ERROR: &str = "action request error";
    /// Requested quantity exceeds the remaining stock.
    pub const NOT_ENOUGH_QUANTITY: &str = "too many quantity requested";
    /// Unknown action, or a reject that could not be stored.
    pub const ACTION_NOT_VALID: &str = "action cannot be processed";
    /// Request is not pending any more.
    pub const ACTION_ALREADY_DONE: &str = "action already accepted or rejected";
    /// Registration with an email already in use.
    pub const EMAIL_ALREADY_REGISTERED: &str = "email already registered";
    /// Registration failed.
    pub const REGISTER_USER_ERROR: &str = "register user error";
    /// Unknown email or wrong password.
    pub const INVALID_CREDENTIALS: &str = "invalid credentials";
    /// Login failed.
    pub const LOGIN_ERROR: &str = "login error";
    /// User listing failed.
    pub const LIST_USERS_ERROR: &str = "list users error";
}

/// Keys into the message catalog.
pub mod keys {
    /// Accept or reject succeeded.
    pub const REQUEST_ACTION_SUCCESS: &str = "request_action_success";
    /// Request already accepted or rejected.
    pub const ACTION_ALREADY_DONE: &str = "action_already_done";
    /// Not enough stock for the request.
    pub const NOT_ENOUGH_QUANTITY: &str = "not_enough_quantity";
    /// Caller is not the owner.
    pub const FORBIDDEN: &str = "forbidden";
    /// Missing or invalid bearer token.
    pub const UNAUTHORIZED: &str = "unauthorized";
    /// Food is missing.
    pub const FOOD_NOT_FOUND: &str = "food_not_found";
    /// Any 5xx outcome.
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}
