pub mod config_io;
pub mod editor;
pub mod logging;
pub mod paths;
