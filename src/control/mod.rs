// Purpose: control-thread -> audio-thread parameter messages

pub mod message;

pub use message::{MessageReceiver, NoMessages, OctaverMessage};
