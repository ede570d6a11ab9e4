mod adapter_tests;
mod create_service_tests;
