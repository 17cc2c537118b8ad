pub mod languages_response;
pub mod languages_route;
