pub mod http_gateway;
