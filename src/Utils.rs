/// terminal logging setup
pub mod logging;
