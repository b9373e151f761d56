//! Interactive console loop.

use crate::consts::limits;
use crate::logic::{build_news_view, validate_keyword, NewsView};
use crate::network::{NewsEngine, NewsSource};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const EXIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

pub fn format_news_item(view: &NewsView) -> String {
    format!(
        "[{}] {}\n{}\nLink: {}",
        view.index,
        view.title,
        textwrap::fill(&view.summary, limits::CONSOLE_WRAP_WIDTH),
        view.link
    )
}

fn is_exit(keyword: &str) -> bool {
    EXIT_WORDS.iter().any(|w| keyword.eq_ignore_ascii_case(w))
}

/// Prompt for keywords until an exit word or end of input.
pub async fn chat_loop<R, W>(
    engine: &NewsEngine,
    source: &NewsSource,
    limit: usize,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "=== News Brief ===")?;
    writeln!(out, "Enter a keyword to get up to {} summarized articles from {}.", limit, source.source().name)?;
    writeln!(out, "Type 'q' or 'quit' to leave.\n")?;

    let mut lines = input.lines();
    loop {
        write!(out, "keyword > ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out, "\nBye.")?;
            break;
        };

        let keyword = match validate_keyword(&line) {
            Ok(k) => k,
            Err(_) => {
                writeln!(out, "Please enter a keyword.\n")?;
                continue;
            }
        };

        if is_exit(keyword) {
            writeln!(out, "Bye.")?;
            break;
        }

        writeln!(out, "\nSearching '{}'...\n", keyword)?;
        let views = build_news_view(engine, source, keyword, limit).await;

        if views.is_empty() {
            writeln!(out, "No results.\n")?;
            continue;
        }

        for view in &views {
            writeln!(out, "{}", format_news_item(view))?;
            writeln!(out, "{}", "-".repeat(limits::CONSOLE_WRAP_WIDTH))?;
        }
        writeln!(out)?;
    }

    Ok(())
}
