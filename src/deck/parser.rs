use super::{Block, BlockKind, Deck, DeckError, Inline, Section};

const SECTION_BREAK: &str = "---";
const FENCE: &str = "```";

/// Parses deck text into sections.
///
/// Sections are separated by a `---` line. Inside a section `# ` starts a
/// heading, `- ` a bullet, `+ ` an animated bullet and `> ` an animated text
/// line. Fenced code is copied verbatim and may contain `---`. An optional
/// `% Title` line before any content names the deck.
pub fn parse_deck(content: &str) -> Result<Deck, DeckError> {
    let mut title = None;
    let mut sections: Vec<Vec<Block>> = Vec::new();
    let mut current: Vec<Block> = Vec::new();
    let mut fence_start: Option<usize> = None;
    let mut seen_content = false;

    for (line_index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end();

        if line.trim_start().starts_with(FENCE) {
            fence_start = match fence_start {
                Some(_) => None,
                None => Some(line_index + 1),
            };
            seen_content = true;
            continue;
        }

        if fence_start.is_some() {
            current.push(Block {
                kind: BlockKind::Code,
                spans: vec![Inline::Text(line.to_string())],
                animated: false,
            });
            continue;
        }

        if line.trim() == SECTION_BREAK {
            sections.push(std::mem::take(&mut current));
            seen_content = true;
            continue;
        }

        if !seen_content && title.is_none() {
            if let Some(rest) = line.strip_prefix("% ") {
                title = Some(rest.trim().to_string());
                continue;
            }
        }

        let block = parse_block(line);
        if block.kind != BlockKind::Blank {
            seen_content = true;
        }
        current.push(block);
    }

    if let Some(line) = fence_start {
        return Err(DeckError::Parse {
            line,
            message: "code fence is never closed".to_string(),
        });
    }

    sections.push(current);
    let sections = sections
        .into_iter()
        .map(trim_blank_edges)
        .filter(|blocks| !blocks.is_empty())
        .enumerate()
        .map(|(index, blocks)| Section {
            index,
            title: section_title(&blocks),
            blocks,
        })
        .collect();

    Ok(Deck {
        title,
        sections,
        source: None,
    })
}

fn parse_block(line: &str) -> Block {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Block::blank();
    }

    // one or more '#' followed by a space
    let heading = trimmed.trim_start_matches('#');
    let (kind, animated, text) = if heading.len() < trimmed.len() && heading.starts_with(' ') {
        (BlockKind::Heading, false, heading.trim_start())
    } else if let Some(rest) = trimmed.strip_prefix("- ") {
        (BlockKind::Bullet, false, rest)
    } else if let Some(rest) = trimmed.strip_prefix("+ ") {
        (BlockKind::Bullet, true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("> ") {
        (BlockKind::Text, true, rest)
    } else {
        (BlockKind::Text, false, line)
    };

    Block {
        kind,
        spans: parse_inline(text),
        animated,
    }
}

/// Splits `[label](url)` links out of a line. Anything that does not form a
/// complete link stays plain text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let link = after_open.find("](").and_then(|close| {
            let url_part = &after_open[close + 2..];
            url_part
                .find(')')
                .map(|end| (&after_open[..close], &url_part[..end], &url_part[end + 1..]))
        });

        match link {
            Some((label, url, remainder))
                if !label.is_empty() && !label.contains('[') && !url.is_empty() =>
            {
                plain.push_str(&rest[..open]);
                if !plain.is_empty() {
                    spans.push(Inline::Text(std::mem::take(&mut plain)));
                }
                spans.push(Inline::Link {
                    label: label.to_string(),
                    url: url.to_string(),
                });
                rest = remainder;
            }
            _ => {
                plain.push_str(&rest[..=open]);
                rest = after_open;
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Inline::Text(plain));
    }
    spans
}

fn trim_blank_edges(mut blocks: Vec<Block>) -> Vec<Block> {
    while blocks.last().map_or(false, |b| b.kind == BlockKind::Blank) {
        blocks.pop();
    }
    let leading = blocks
        .iter()
        .take_while(|b| b.kind == BlockKind::Blank)
        .count();
    blocks.drain(..leading);
    blocks
}

fn section_title(blocks: &[Block]) -> Option<String> {
    blocks
        .iter()
        .find(|b| b.kind == BlockKind::Heading)
        .map(Block::plain_text)
}
