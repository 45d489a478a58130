pub mod api_service;
pub mod response_parser;
