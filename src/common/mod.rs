pub mod logging;
pub mod net;
pub mod time;
