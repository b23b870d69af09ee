use super::tint::TintedGrid;

/// Class carried by every tinted glyph span.
pub const GLYPH_CLASS: &str = "ch";

/// Encode a tinted grid as inline markup for a `<pre>` element.
///
/// Blank cells pass through as spaces. Each ink cell becomes a span carrying
/// its segment id in `data-seg` and its color in an inline style.
pub fn to_html(grid: &TintedGrid) -> String {
    let mut html = String::with_capacity(grid.cells().len() + grid.ink_count() * 48);

    for (row_index, row) in grid.rows().enumerate() {
        if row_index > 0 {
            html.push('\n');
        }

        for cell in row {
            let (Some(segment), Some(color)) = (cell.segment, cell.color) else {
                push_escaped(&mut html, cell.ch);
                continue;
            };

            html.push_str("<span class=\"");
            html.push_str(GLYPH_CLASS);
            html.push_str("\" data-seg=\"");
            html.push_str(&segment.to_string());
            html.push_str("\" style=\"color:");
            html.push_str(&color.to_string());
            html.push_str("\">");
            push_escaped(&mut html, cell.ch);
            html.push_str("</span>");
        }
    }

    html
}

/// Wrap markup produced by [`to_html`] in a `<pre>` element.
pub fn wrap_pre(id: &str, markup: &str) -> String {
    let mut html = String::with_capacity(markup.len() + id.len() + 24);
    html.push_str("<pre id=\"");
    for ch in id.chars() {
        match ch {
            '"' => html.push_str("&quot;"),
            _ => push_escaped(&mut html, ch),
        }
    }
    html.push_str("\">");
    html.push_str(markup);
    html.push_str("</pre>");
    html
}

pub(crate) fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}
