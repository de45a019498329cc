// Domain services used by the HTTP handlers and the CLI
pub mod etchings;
pub mod parts_log;
pub mod submitters;
