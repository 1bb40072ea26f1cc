use crate::render;
use reporthub_core::api::HubApi;
use reporthub_core::domain::ticker::Ticker;
use reporthub_core::page::{Page, RUNNING_STATUS};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "commands: select <symbol|#>, run, list, help, quit\n";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Choose(String),
    RunDaily,
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Input::Quit,
        "run" | "run-daily" => Input::RunDaily,
        "list" | "ls" => Input::Show,
        "help" | "?" => Input::Help,
        "select" | "s" if rest.is_empty() => Input::Unknown(line.to_string()),
        "select" | "s" => Input::Choose(rest.to_string()),
        _ if rest.is_empty() => Input::Choose(line.to_string()),
        _ => Input::Unknown(line.to_string()),
    };
    Some(input)
}

/// A listed symbol wins over a 1-based list position.
fn resolve_choice(tickers: &[Ticker], choice: &str) -> Option<String> {
    if let Some(t) = tickers.iter().find(|t| t.symbol == choice) {
        return Some(t.symbol.clone());
    }
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| tickers.get(idx))
        .map(|t| t.symbol.clone())
}

/// Interactive page loop. Failures only change the status line; the loop ends
/// on `quit` or end of input.
pub async fn browse<A, R, W>(api: A, input: R, out: &mut W) -> anyhow::Result<()>
where
    A: HubApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut page = Page::new(api);
    page.mount().await;
    write_page(out, &page).await?;

    let mut lines = input.lines();
    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(cmd) = parse_input(&line) else {
            continue;
        };

        match cmd {
            Input::Quit => break,
            Input::Help => {
                out.write_all(HELP.as_bytes()).await?;
                continue;
            }
            Input::Unknown(text) => {
                out.write_all(format!("Unknown command: {text}\n{HELP}").as_bytes())
                    .await?;
                continue;
            }
            Input::Show => {}
            Input::RunDaily => {
                out.write_all(format!("{RUNNING_STATUS}\n").as_bytes()).await?;
                out.flush().await?;
                page.run_daily().await;
            }
            Input::Choose(choice) => {
                let resolved = resolve_choice(page.state().tickers(), &choice);
                let Some(symbol) = resolved else {
                    out.write_all(format!("No ticker matches {choice}\n").as_bytes())
                        .await?;
                    continue;
                };
                page.select(&symbol).await;
            }
        }
        write_page(out, &page).await?;
    }

    out.flush().await?;
    Ok(())
}

async fn write_page<A: HubApi, W: AsyncWrite + Unpin>(
    out: &mut W,
    page: &Page<A>,
) -> anyhow::Result<()> {
    out.write_all(b"\n").await?;
    out.write_all(render::page(page.state()).as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
