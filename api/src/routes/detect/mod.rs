pub mod detect_request;
pub mod detect_response;
pub mod detect_route;
