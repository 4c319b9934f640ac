//! Session domain: state machine, intents, errors. No I/O.

pub mod errors;
pub mod intent;
pub mod state;
