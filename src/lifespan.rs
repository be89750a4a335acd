//! Acquire-serve-release wrapper around the serving period.

use std::{future::Future, panic::AssertUnwindSafe};

use async_trait::async_trait;
use futures::FutureExt;
use tracing::info;

/// A long-lived resource released once the application stops.
#[async_trait]
pub trait Disconnect: Send + Sync {
    async fn disconnect(&self);
}

/// Acquire `resource`, run `serve` with a handle to it, then disconnect it.
///
/// If acquisition fails, `serve` never runs. Otherwise the resource is
/// disconnected exactly once, whether `serve` returns `Ok`, returns `Err`
/// or panics. A panic is resumed after the resource has been released.
pub async fn run<R, AE, E, A, S, Fut>(resource: A, serve: S) -> Result<(), E>
where
    R: Disconnect + Clone,
    E: From<AE>,
    A: Future<Output = Result<R, AE>>,
    S: FnOnce(R) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    info!("lifespan start");
    let resource = resource.await?;

    let outcome = AssertUnwindSafe(serve(resource.clone()))
        .catch_unwind()
        .await;

    info!("lifespan ended");
    resource.disconnect().await;

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
