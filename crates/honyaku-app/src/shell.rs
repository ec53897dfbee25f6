use std::sync::Arc;

use honyaku_config::Config;
use honyaku_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Console front-end. Reads single-letter commands from stdin and prints
/// recognition results and status lines coming back from the app.
pub async fn shell_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (region, auto_on_start) = {
        let config = config.read().await;
        (config.capture.region, config.ocr.auto)
    };
    let mut auto_enabled = auto_on_start;

    println!(
        "honyaku — capturing {}x{} at ({}, {})",
        region.width, region.height, region.x, region.y
    );
    println!("commands: r = recognize, a = toggle auto, c = clear, q = quit");

    if auto_enabled {
        ui_to_app_tx
            .send(AppEvent::SetAutoRecognize {
                enabled: true,
                region,
            })
            .await?;
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            event = app_to_ui_rx.recv() => {
                match event? {
                    AppEvent::ShowRecognition(result) => {
                        println!("{}", result.source_text);
                        println!("-> {}", result.translated_text);
                    }
                    AppEvent::ShowThumbnail(image) => {
                        tracing::debug!("captured {}x{} frame", image.width, image.height);
                    }
                    AppEvent::RecognitionStatus { status, capturing } => {
                        if capturing {
                            tracing::debug!("{status}");
                        } else if status != "Ready" {
                            println!("[{status}]");
                        }
                    }
                    _ => {}
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::Shutdown).await?;
                    break;
                };
                match line.trim() {
                    "r" => {
                        ui_to_app_tx.send(AppEvent::TriggerRecognize(region)).await?;
                    }
                    "a" => {
                        auto_enabled = !auto_enabled;
                        println!(
                            "auto recognize {}",
                            if auto_enabled { "on" } else { "off" }
                        );
                        ui_to_app_tx
                            .send(AppEvent::SetAutoRecognize {
                                enabled: auto_enabled,
                                region,
                            })
                            .await?;
                    }
                    "c" => {
                        // Nothing stateful to clear in a console shell;
                        // push the old output out of view.
                        println!("\n----\n");
                    }
                    "q" => {
                        ui_to_app_tx.send(AppEvent::Shutdown).await?;
                        break;
                    }
                    "" => {}
                    other => println!("unknown command: {other} (r/a/c/q)"),
                }
            }
        }
    }

    Ok(())
}
