pub mod caller;
pub mod requests;
pub mod response;
