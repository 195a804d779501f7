//! Integration tests driving the assembled router end to end.

mod haiku_api_test;
mod helpers;
mod plugin_system_test;
