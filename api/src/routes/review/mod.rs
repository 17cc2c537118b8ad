pub mod review_response;
pub mod review_route;
