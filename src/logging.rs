pub use crate::common::logging::init_logging;
