//! Parameter changes sent to an effect living on the audio thread.
//!
//! The UI side pushes [`ParamChange`]s into a lock-free queue; the audio side
//! drains them with [`apply_pending`] at the top of each block. Draining never
//! allocates, so it is safe inside a device callback.

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::effects::Effect;

/// Set `param` to `value` on the receiving effect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParamChange<P> {
    pub param: P,
    pub value: f32,
}

impl<P> ParamChange<P> {
    pub fn new(param: P, value: f32) -> Self {
        Self { param, value }
    }
}

pub trait ParamReceiver<P> {
    fn pop(&mut self) -> Option<ParamChange<P>>;
}

#[cfg(feature = "rtrb")]
impl<P> ParamReceiver<P> for Consumer<ParamChange<P>> {
    fn pop(&mut self) -> Option<ParamChange<P>> {
        Consumer::pop(self).ok()
    }
}

/// Bounded single-producer/single-consumer queue of parameter changes.
#[cfg(feature = "rtrb")]
pub fn param_queue<P>(capacity: usize) -> (Producer<ParamChange<P>>, Consumer<ParamChange<P>>) {
    RingBuffer::new(capacity)
}

/// Outcome of one [`apply_pending`] drain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub rejected: usize,
}

/// Apply every queued change to `effect`. Rejected changes leave the effect
/// untouched and are only counted.
pub fn apply_pending<E, R>(effect: &mut E, rx: &mut R) -> ApplyReport
where
    E: Effect,
    R: ParamReceiver<E::Param>,
{
    let mut report = ApplyReport::default();
    while let Some(change) = rx.pop() {
        match effect.set_param(change.param, change.value) {
            Ok(()) => report.applied += 1,
            Err(_) => report.rejected += 1,
        }
    }
    report
}
