use std::num::NonZeroU32;

use governor::{
	clock::DefaultClock,
	state::{InMemoryState, NotKeyed},
	Quota, RateLimiter,
};

use crate::models::DEFAULT_REQUESTS_PER_SECOND;

/// Token bucket limiting outbound RPC calls of one chain adapter.
///
/// Always initialized: a ceiling of zero falls back to the default rather than
/// disabling the limiter, so every adapter is throttled regardless of how many
/// fetch workers share it.
#[derive(Debug)]
pub struct RpcRateLimiter {
	limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
	requests_per_second: NonZeroU32,
}

impl RpcRateLimiter {
	pub fn new(requests_per_second: u32) -> Self {
		let requests_per_second = NonZeroU32::new(requests_per_second)
			.or_else(|| NonZeroU32::new(DEFAULT_REQUESTS_PER_SECOND))
			.unwrap_or(NonZeroU32::MIN);

		Self {
			limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
			requests_per_second,
		}
	}

	/// Wait until a request can be made according to the rate limit.
	pub async fn acquire(&self) {
		self.limiter.until_ready().await;
	}

	pub fn requests_per_second(&self) -> u32 {
		self.requests_per_second.get()
	}
}
