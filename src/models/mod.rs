pub mod chat;
pub mod console;
pub mod substitution;
