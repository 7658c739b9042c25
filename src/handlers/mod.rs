// One module per route group; `router::app` wires them up
pub mod accounts;
pub mod admin;
pub mod region;
pub mod roles;
pub mod root;
pub mod utils;
pub mod vendors;
