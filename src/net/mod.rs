pub mod listener;

pub use listener::{create_listener, create_listener_from, into_async, ListenerError};
