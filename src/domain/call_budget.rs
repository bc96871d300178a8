use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallBudget {
    used: u32,
    limit: NonZeroU32,
}

impl CallBudget {
    pub fn new(limit: NonZeroU32) -> Self {
        CallBudget { used: 0, limit }
    }

    pub fn with_limit(limit: u32) -> Option<Self> {
        NonZeroU32::new(limit).map(CallBudget::new)
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    pub fn remaining(&self) -> u32 {
        self.limit().saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit()
    }

    pub fn record_call(&mut self) {
        self.used += 1;
    }
}
