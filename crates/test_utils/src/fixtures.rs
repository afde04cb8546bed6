//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data. Instants are fixed so that deadline
//! tests do not depend on the wall clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{AccountId, Amount};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Instant every manual clock starts at (Jan 1, 2024)
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// A deadline one week after [`epoch`](Self::epoch)
    pub fn deadline() -> DateTime<Utc> {
        Self::epoch() + Duration::days(7)
    }

    /// A deadline that has already passed at [`epoch`](Self::epoch)
    pub fn past_deadline() -> DateTime<Utc> {
        Self::epoch() - Duration::days(1)
    }
}

/// Fixture for amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// Standard funding target
    pub fn target() -> Amount {
        Amount::new(1_000)
    }

    /// Partial contribution toward [`target`](Self::target)
    pub fn partial() -> Amount {
        Amount::new(400)
    }

    /// Contribution that overshoots [`target`](Self::target) from zero
    pub fn overshoot() -> Amount {
        Amount::new(1_250)
    }
}

/// Named participants for a scenario
#[derive(Debug, Clone, Copy)]
pub struct Participants {
    pub creator: AccountId,
    pub payee: AccountId,
    pub alice: AccountId,
    pub bob: AccountId,
    pub carol: AccountId,
}

impl Participants {
    pub fn new() -> Self {
        Self {
            creator: AccountId::new(),
            payee: AccountId::new(),
            alice: AccountId::new(),
            bob: AccountId::new(),
            carol: AccountId::new(),
        }
    }

    /// The three contributors
    pub fn contributors(&self) -> [AccountId; 3] {
        [self.alice, self.bob, self.carol]
    }
}

impl Default for Participants {
    fn default() -> Self {
        Self::new()
    }
}
