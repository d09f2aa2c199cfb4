pub mod fixture_gateway;
pub mod gateway_factory;
pub mod http_gateway;
