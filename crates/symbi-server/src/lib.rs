//! SYMBI HTTP server library (router, handlers, and state).

pub mod gateway;
