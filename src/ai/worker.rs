//! AI Worker Thread
//!
//! Handles AI requests in a background thread so the console never blocks.
//! The thread hosts a single-threaded tokio runtime; each generation runs as
//! a task guarded by a `CancellationToken` and the configured time budget.

use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::ai_state::{AiRequest, AiResponse, GenerationJob};
use super::prompt::build_messages;
use super::provider::{AiError, AiProvider, Usage};
use super::suggestion::{SuggestionSet, parse_suggestions};
use crate::error::ReplykitError;

/// Spawn the AI worker thread
///
/// The thread exits once every request sender is dropped. If the runtime
/// cannot be created the thread logs and exits, which the controller sees
/// as a closed request channel.
pub fn spawn_worker(
    request_rx: UnboundedReceiver<AiRequest>,
    response_tx: Sender<AiResponse>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("replykit-ai".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to start AI runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(worker_loop(request_rx, response_tx));
        })
}

/// Main worker loop - processes requests until the channel is closed
async fn worker_loop(mut request_rx: UnboundedReceiver<AiRequest>, response_tx: Sender<AiResponse>) {
    // Only one generation is tracked; a new one supersedes the previous
    let mut active: Option<(u64, CancellationToken)> = None;

    while let Some(request) = request_rx.recv().await {
        match request {
            AiRequest::Generate { job, request_id } => {
                if let Some((old_id, token)) = active.take() {
                    log::debug!("Request {} superseded by {}", old_id, request_id);
                    token.cancel();
                }

                let token = CancellationToken::new();
                active = Some((request_id, token.clone()));

                let tx = response_tx.clone();
                tokio::spawn(async move {
                    let response = run_generation(job, request_id, token).await;
                    if tx.send(response).is_err() {
                        log::debug!("Console gone, dropping response for {}", request_id);
                    }
                });
            }
            AiRequest::Cancel { request_id } => match &active {
                Some((id, token)) if *id == request_id => {
                    log::debug!("Cancelling request {}", request_id);
                    token.cancel();
                }
                _ => {
                    log::debug!("Cancel for request {} ignored (not active)", request_id);
                }
            },
        }
    }

    if let Some((_, token)) = active {
        token.cancel();
    }
    log::debug!("AI worker thread shutting down");
}

/// Run one generation, honouring cancellation and the settings time budget
///
/// Always yields exactly one response tagged with `request_id`.
pub(crate) async fn run_generation(
    job: GenerationJob,
    request_id: u64,
    token: CancellationToken,
) -> AiResponse {
    let secs = job.settings.timeout_secs;
    let budget = Duration::from_secs(secs);

    tokio::select! {
        biased;

        _ = token.cancelled() => {
            log::debug!("Request {} cancelled", request_id);
            AiResponse::Cancelled { request_id }
        }
        result = tokio::time::timeout(budget, generate(&job)) => match result {
            Ok(Ok((set, usage))) => {
                log::info!(
                    "Request {} produced {} suggestions{}",
                    request_id,
                    set.items.len(),
                    if set.fallback { " (fallback)" } else { "" }
                );
                AiResponse::Suggestions { request_id, set, usage }
            }
            Ok(Err(e)) => {
                log::warn!("Request {} failed: {}", request_id, e);
                AiResponse::Error { request_id, message: e.to_string() }
            }
            Err(_) => {
                log::warn!("Request {} timed out after {}s", request_id, secs);
                AiResponse::TimedOut { request_id, secs }
            }
        },
    }
}

/// Prompt the model and parse its reply into suggestions
pub async fn generate(job: &GenerationJob) -> Result<(SuggestionSet, Option<Usage>), AiError> {
    let provider = AiProvider::from_settings(&job.settings)?;
    log::debug!(
        "Generating with {} ({} context messages)",
        provider.provider_name(),
        job.context.len()
    );

    let messages = build_messages(&job.message, &job.context, &job.settings.custom_prompt);
    let completion = provider.complete(&messages).await?;
    let set = parse_suggestions(&completion.content, job.settings.fallback_replies)?;
    Ok((set, completion.usage))
}

/// Generate suggestions on the calling thread, for one-shot use
pub fn generate_blocking(
    job: &GenerationJob,
) -> Result<(SuggestionSet, Option<Usage>), ReplykitError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let secs = job.settings.timeout_secs;
    runtime.block_on(async {
        match tokio::time::timeout(Duration::from_secs(secs), generate(job)).await {
            Ok(result) => result.map_err(ReplykitError::from),
            Err(_) => Err(AiError::Timeout(secs).into()),
        }
    })
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
