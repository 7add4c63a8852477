//! Session state: the auth controller and its transitions.

pub mod controller;

pub use controller::AuthController;
