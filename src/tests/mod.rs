mod payload_json_tests;
mod utils;
