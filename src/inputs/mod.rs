pub mod event_source;
pub mod key_names;
pub mod key_seq;

pub use key_names::{is_quit, key_name};
pub use key_seq::{KeyPress, KeystrokeMatcher, MatchOutcome, MatcherState};
