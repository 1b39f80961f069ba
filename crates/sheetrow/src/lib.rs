pub mod args;
pub mod http;
pub mod run;
