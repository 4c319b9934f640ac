//! Outbound ports: the external collaborators a session depends on.

pub mod outbound;
