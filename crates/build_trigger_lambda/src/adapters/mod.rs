pub mod build_service;
