use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use std::{num::NonZeroU32, time::Duration};

// The booking host is a small university server; keep the pace polite.
const REQ_PER_SEC: NonZeroU32 = nonzero!(10u32);
const MS_BETWEEN_REQ: Duration = Duration::from_millis(100);

type DirectRateLimiter =
    GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

pub struct RateLimiter {
    req_per_sec: DirectRateLimiter,
    gap_between_req: DirectRateLimiter,
}

impl RateLimiter {
    pub fn new() -> Self {
        // Average cap of REQ_PER_SEC requests per second.
        let req_per_sec = GovernorRateLimiter::direct(Quota::per_second(REQ_PER_SEC));

        // No two requests closer together than MS_BETWEEN_REQ.
        let gap_between_req =
            GovernorRateLimiter::direct(Quota::with_period(MS_BETWEEN_REQ).unwrap());

        RateLimiter {
            req_per_sec,
            gap_between_req,
        }
    }

    pub async fn wait_until_ready(&self) {
        // Await the per-second cap before the gap limiter: callers
        // released by the gap check must not be able to queue up against
        // the cap and then cross it together once it refills.
        self.req_per_sec.until_ready().await;
        self.gap_between_req.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
