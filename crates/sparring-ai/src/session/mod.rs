//! Conversation session management.
//!
//! A `Session` owns the visible transcript and the planning context, and
//! decides per turn what the generation service is sent: the persona is
//! primed in as a synthetic exchange until the first reply lands, after
//! which only the real transcript is replayed.

mod chat;
mod manager;


pub use manager::Session;
