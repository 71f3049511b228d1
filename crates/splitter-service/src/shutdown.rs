//! Termination signal handling.

use splitter_config::ShutdownMode;
use tracing::{error, info, warn};

/// Resolves when the server should stop accepting connections.
///
/// With [`ShutdownMode::Drain`] the first SIGINT or SIGTERM resolves the future
/// and axum finishes in-flight requests before returning. With
/// [`ShutdownMode::Ignore`] signals are logged and the future never resolves.
pub async fn shutdown_signal(mode: ShutdownMode) {
	loop {
		let signal = wait_for_signal().await;
		match mode {
			ShutdownMode::Drain => {
				info!("Received {}, draining in-flight requests", signal);
				return;
			},
			ShutdownMode::Ignore => {
				warn!("Received {}, ignoring because on_shutdown = \"ignore\"", signal);
			},
		}
	}
}

async fn wait_for_signal() -> &'static str {
	let ctrl_c = async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			error!("Failed to listen for SIGINT: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		use tokio::signal::unix::{signal, SignalKind};
		match signal(SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			},
			Err(e) => {
				error!("Failed to listen for SIGTERM: {}", e);
				std::future::pending::<()>().await;
			},
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => "SIGINT",
		_ = terminate => "SIGTERM",
	}
}
