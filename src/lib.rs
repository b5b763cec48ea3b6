pub mod boot;
pub mod commands;
pub mod config;
pub mod dom;
pub mod history;
pub mod log;
pub mod neofetch;
pub mod shell;
pub mod terminal;

pub use dom::mount;
pub use terminal::Terminal;
