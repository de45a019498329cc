pub mod etching;
pub mod parts_log;
pub mod submitter;
