//! This module provides reusable test utilities:
//! - Mock cdng backend server
//! - Test configuration builder
//! - Common test data

// Fixtures are shared by several test binaries; not every binary uses all of them
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_backend;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use mock_backend::MockBackendServer;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
