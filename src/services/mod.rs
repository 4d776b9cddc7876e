pub mod session;
pub mod submitter;
pub mod validation;
