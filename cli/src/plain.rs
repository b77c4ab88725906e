//! Line-oriented chat on stdin/stdout.

use anyhow::Result;
use chatbox_core::{ChatWidget, Message};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const QUIT_COMMAND: &str = "/quit";

/// Chat over stdin/stdout until EOF or `/quit`
pub async fn run(widget: ChatWidget) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_with(widget, stdin, &mut stdout).await?;
    Ok(())
}

async fn run_with<R, W>(mut widget: ChatWidget, reader: R, out: &mut W) -> Result<ChatWidget>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let info = widget.endpoint_info();
    writeln!(
        out,
        "Connected to {} ({}). Type a message and press Enter; {} to exit.",
        info.target, info.name, QUIT_COMMAND
    )?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT_COMMAND {
            break;
        }

        // Each turn renders its new transcript entries
        let seen = widget.transcript().len();
        widget.ui_mut().input_value = line;
        let raw = widget.ui().input_value.clone();
        if widget.submit(&raw).await {
            for message in &widget.transcript().messages()[seen..] {
                print_message(out, message)?;
            }
        }
        out.flush()?;
    }

    Ok(widget)
}

fn print_message<W: Write>(out: &mut W, message: &Message) -> std::io::Result<()> {
    let label = format!("{}: ", message.label());
    let indent = " ".repeat(label.len());
    for (i, line) in message.lines().enumerate() {
        let lead = if i == 0 { label.as_str() } else { indent.as_str() };
        writeln!(out, "{}{}", lead, line)?;
    }
    Ok(())
}
