pub mod support_api;
