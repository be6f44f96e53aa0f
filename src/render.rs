use crate::config::RenderConfig;
use crate::ir::Scene;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use unicode_width::UnicodeWidthChar;

/// One output cell. Wide glyphs occupy a cell followed by a continuation.
#[derive(Debug, Clone)]
enum Slot {
    Blank,
    Glyph(String),
    Continuation,
}

/// Paints every placed element's text at its location, one string per output line.
pub fn render_text(scene: &Scene, config: &RenderConfig) -> Vec<String> {
    let height = scene
        .elements
        .iter()
        .filter_map(|element| element.location)
        .map(|rect| rect.bottom + 1)
        .max()
        .unwrap_or(0)
        .max(0) as usize;
    let mut canvas: Vec<Vec<Slot>> = vec![Vec::new(); height];

    for element in &scene.elements {
        let Some(rect) = element.location else {
            continue;
        };
        for (offset, line) in element.text.iter().enumerate() {
            let row = rect.top + offset as i32;
            if row < 0 || row > rect.bottom {
                continue;
            }
            paint_line(&mut canvas[row as usize], rect.left.max(0) as usize, line);
        }
    }

    canvas
        .into_iter()
        .map(|slots| finish_line(slots, config))
        .collect()
}

fn paint_line(slots: &mut Vec<Slot>, start: usize, line: &str) {
    let mut column = start;
    for ch in line.chars() {
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            if column > start
                && let Some(Slot::Glyph(previous)) = slots.get_mut(column - 1)
            {
                previous.push(ch);
            }
            continue;
        }
        if slots.len() < column + width {
            slots.resize(column + width, Slot::Blank);
        }
        slots[column] = Slot::Glyph(ch.to_string());
        for extra in 1..width {
            slots[column + extra] = Slot::Continuation;
        }
        column += width;
    }
}

fn finish_line(mut slots: Vec<Slot>, config: &RenderConfig) -> String {
    if let Some(width) = config.width {
        slots.truncate(width);
        // A wide glyph cut in half would overflow the display.
        if let Some(Slot::Glyph(last)) = slots.last()
            && last.chars().next().and_then(|ch| ch.width()).unwrap_or(0) > 1
        {
            slots.pop();
        }
    }
    while matches!(slots.last(), Some(Slot::Blank)) {
        slots.pop();
    }

    let mut out = String::new();
    for slot in slots {
        match slot {
            Slot::Blank => out.push(config.blank),
            Slot::Glyph(text) => out.push_str(&text),
            Slot::Continuation => {}
        }
    }
    out
}

pub fn write_output_text(lines: &[String], output: Option<&Path>) -> Result<()> {
    let mut text = lines.join("\n");
    text.push('\n');
    if let Some(path) = output {
        std::fs::write(path, text)?;
    } else {
        std::io::stdout().write_all(text.as_bytes())?;
    }
    Ok(())
}
