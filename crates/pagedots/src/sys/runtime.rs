use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and config watcher on their own tokio runtime.
/// Everything they produce reaches the GTK thread through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("pagedots-services".into())
        .spawn(move || run_services(tx));
    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}

fn run_services(tx: Sender<AppEvent>) {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create Tokio runtime: {}", e);
            return;
        }
    };

    rt.block_on(async {
        tokio::spawn(crate::sys::server::run_server(tx.clone()));
        tokio::spawn(crate::sys::watcher::run_async_watcher(tx));

        std::future::pending::<()>().await;
    });
}
