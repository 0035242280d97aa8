pub mod deploy;
pub mod output;
pub mod param;
pub mod status;
pub mod wait;
