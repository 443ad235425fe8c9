//! Health pool shared by structures and targets.

/// Result of a single `take_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health dropped but stayed positive.
    Damaged,
    /// This call crossed zero; the owner must run its terminal transition exactly now.
    Destroyed,
    /// The owner was already terminal; the call was a no-op.
    AlreadyDestroyed,
}

impl DamageOutcome {
    /// Terminal signal, whether or not this call caused it.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Damaged)
    }
}

/// Invariant: `0 <= current <= max`, and once `depleted` is set the pool is frozen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthPool {
    current: f32,
    max: f32,
    depleted: bool,
}

impl HealthPool {
    pub fn full(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max, depleted: false }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 { 0.0 } else { self.current / self.max }
    }

    /// Subtract `amount`, clamping at zero. Negative amounts are treated as zero.
    pub fn take(&mut self, amount: f32) -> DamageOutcome {
        if self.depleted {
            return DamageOutcome::AlreadyDestroyed;
        }

        self.current = (self.current - amount.max(0.0)).max(0.0);
        if self.current <= 0.0 {
            self.depleted = true;
            DamageOutcome::Destroyed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Force the terminal state without damage arithmetic (e.g. fell off the map).
    pub fn deplete(&mut self) -> DamageOutcome {
        if self.depleted {
            return DamageOutcome::AlreadyDestroyed;
        }
        self.current = 0.0;
        self.depleted = true;
        DamageOutcome::Destroyed
    }
}
