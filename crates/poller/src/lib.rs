pub mod bot;
pub mod client;
pub mod formatter;
pub mod validator;
