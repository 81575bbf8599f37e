use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Run a future, turning a panic inside it into an `Err` with the panic message.
///
/// Spawned tasks use this so a panic is reported through the event channel
/// instead of silently killing the task.
pub async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ok_passes_through() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_panic_message_captured() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_formatted_panic_message_captured() {
        let n = 3;
        let result: Result<(), String> = catch_task_panic(async move { panic!("bad {}", n) }).await;
        assert_eq!(result, Err("bad 3".to_string()));
    }
}
