#[cfg(feature = "rtrb")]
use rtrb::Consumer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameter changes sent from a control surface to the audio thread.
///
/// Drained at the start of a block, so a change lands on a block boundary
/// and holds for the whole block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum OctaverMessage {
    SetComparisonWindow(usize),
    SetSkipThreshold(f32),
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<OctaverMessage>;
}

/// Receiver for nodes that are only driven directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<OctaverMessage> {
        None
    }
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<OctaverMessage> {
    fn pop(&mut self) -> Option<OctaverMessage> {
        Consumer::pop(self).ok()
    }
}
