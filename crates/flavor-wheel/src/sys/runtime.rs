use crate::events::AppEvent;
use crate::sys::{input, watcher};
use async_channel::Sender;
use tokio::io::BufReader;
use tokio::runtime::{Builder, Handle, Runtime};

/// Tokio runtime running the stdin reader and the config watcher next to the
/// synchronous event loop. Frame clocks are spawned onto it through
/// [`BackgroundServices::handle`].
pub struct BackgroundServices {
    runtime: Runtime,
}

impl BackgroundServices {
    pub fn start(tx: Sender<AppEvent>, watch_config: bool) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("flavor-wheel-io")
            .enable_all()
            .build()?;

        {
            let tx = tx.clone();
            runtime.spawn(async move {
                input::run_input(BufReader::new(tokio::io::stdin()), tx).await;
            });
        }

        if watch_config {
            runtime.spawn(watcher::watch_config(tx));
        }

        Ok(Self { runtime })
    }

    pub fn handle(&self) -> &Handle {
        self.runtime.handle()
    }

    /// Stops without waiting on the blocking stdin read.
    pub fn shutdown(self) {
        self.runtime.shutdown_background();
    }
}
