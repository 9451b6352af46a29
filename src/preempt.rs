// Copyright (C) 2020-2026 Andy Kurnia.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Preemption {
    NotPreempted = 0,
    // finish what is running, start nothing new.
    Weak = 1,
    // stop as soon as possible.
    Strong = 2,
}

// a shared flag. only ever escalates.
#[derive(Clone, Debug, Default)]
pub struct PreemptionContext(Arc<AtomicU8>);

impl PreemptionContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn state(&self) -> Preemption {
        match self.0.load(Ordering::Relaxed) {
            0 => Preemption::NotPreempted,
            1 => Preemption::Weak,
            _ => Preemption::Strong,
        }
    }

    #[inline(always)]
    pub fn is_strong(&self) -> bool {
        self.state() == Preemption::Strong
    }

    pub fn weak_preempt(&self) {
        self.0.fetch_max(Preemption::Weak as u8, Ordering::Relaxed);
    }

    pub fn strong_preempt(&self) {
        self.0.fetch_max(Preemption::Strong as u8, Ordering::Relaxed);
    }
}
