//! HTML rendition of the Markdown report, with a side panel listing every
//! heading. Level-1 entries fold their sub-headings and start expanded.
//!
//! Only the constructs [`render_markdown`](crate::render_markdown) emits are
//! understood: ATX headings, `- ` items, `> ` quotes, fenced code,
//! `**strong**` and plain paragraphs.

use std::fmt::Write as _;

const STYLE: &str = r#"<style>
:root { --text: #e1f0ff; --muted: #a3c6e9; --heading: #5eabff; --code-bg: #1a2334; --code-border: #2b4369; }
body { margin: 0; font-family: 'Segoe UI', -apple-system, system-ui, sans-serif; color: var(--text); background: #0c1e30; }
.toc-container { position: fixed; left: 0; top: 0; width: 280px; height: 100vh; overflow: auto; padding: 20px; box-sizing: border-box; background: rgba(15, 30, 50, 0.85); border-right: 1px solid rgba(52, 152, 219, 0.2); }
.toc-title { color: var(--heading); font-weight: 600; font-size: 1.4em; margin-bottom: 12px; }
.toc a { color: var(--muted); text-decoration: none; }
.toc a:hover { color: #fff; }
.toc ul { margin: 4px 0 4px 16px; padding: 0; list-style: none; }
.toc summary, .toc-leaf { cursor: pointer; margin: 4px 0; }
.content { margin-left: 300px; padding: 40px 80px; max-width: 1500px; }
h1, h2, h3, h4, h5, h6 { color: var(--heading); }
h1 { border-bottom: 1px solid rgba(94, 171, 255, 0.3); padding-bottom: 0.3em; }
blockquote { border-left: 4px solid #ff8c42; margin: 1em 0; padding: 0 1em; }
pre.codehilite { background: var(--code-bg); border: 1px solid var(--code-border); border-radius: 6px; padding: 0.6em; overflow: auto; }
</style>
"#;

struct Heading {
    level: usize,
    id: String,
    text: String,
}

#[derive(Default)]
struct Blocks {
    html: String,
    headings: Vec<Heading>,
    paragraph: Vec<String>,
    in_list: bool,
    in_code: bool,
}

impl Blocks {
    fn line(&mut self, line: &str) {
        if self.in_code {
            if line.trim_start().starts_with("```") {
                self.html.push_str("</code></pre>\n");
                self.in_code = false;
            } else {
                self.html.push_str(&escape(line));
                self.html.push('\n');
            }
            return;
        }
        if let Some(lang) = line.strip_prefix("```") {
            self.close();
            let _ = write!(
                self.html,
                "<pre class=\"codehilite\"><code class=\"language-{}\">",
                escape(lang.trim())
            );
            self.in_code = true;
            return;
        }
        if line.trim().is_empty() {
            self.close();
            return;
        }
        if let Some((level, text)) = heading(line) {
            self.close();
            let id = format!("section-{}", self.headings.len() + 1);
            let text = inline(text);
            let _ = writeln!(self.html, "<h{level} id=\"{id}\">{text}</h{level}>");
            self.headings.push(Heading { level, id, text });
            return;
        }
        if let Some(item) = line.strip_prefix("- ") {
            self.flush_paragraph();
            if !self.in_list {
                self.html.push_str("<ul>\n");
                self.in_list = true;
            }
            let _ = writeln!(self.html, "<li>{}</li>", inline(item));
            return;
        }
        if let Some(quote) = line.strip_prefix("> ") {
            self.close();
            let _ = writeln!(self.html, "<blockquote><p>{}</p></blockquote>", inline(quote));
            return;
        }
        self.close_list();
        self.paragraph.push(inline(line));
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let _ = writeln!(self.html, "<p>{}</p>", self.paragraph.join("<br>\n"));
            self.paragraph.clear();
        }
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.html.push_str("</ul>\n");
            self.in_list = false;
        }
    }

    fn close(&mut self) {
        self.flush_paragraph();
        self.close_list();
    }

    fn finish(mut self) -> (String, Vec<Heading>) {
        if self.in_code {
            self.html.push_str("</code></pre>\n");
        }
        self.close();
        (self.html, self.headings)
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..].strip_prefix(' ').map(|text| (level, text.trim()))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `text` and turns balanced `**` pairs into `<strong>`.
fn inline(text: &str) -> String {
    let escaped = escape(text);
    let parts: Vec<&str> = escaped.split("**").collect();
    if parts.len() % 2 == 0 {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len());
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            let _ = write!(out, "<strong>{part}</strong>");
        } else {
            out.push_str(part);
        }
    }
    out
}

fn toc(headings: &[Heading]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    let mut i = 0;
    while i < headings.len() {
        let head = &headings[i];
        let children = headings[i + 1..]
            .iter()
            .take_while(|h| h.level > head.level)
            .count();
        let link = format!("<a href=\"#{}\">{}</a>", head.id, head.text);
        if children == 0 {
            let _ = writeln!(out, "<div class=\"toc-leaf\">{link}</div>");
        } else {
            let open = if head.level == 1 { " open" } else { "" };
            let _ = writeln!(out, "<details{open}><summary>{link}</summary>\n<ul>");
            for child in &headings[i + 1..=i + children] {
                let _ = writeln!(out, "<li><a href=\"#{}\">{}</a></li>", child.id, child.text);
            }
            out.push_str("</ul>\n</details>\n");
        }
        i += children + 1;
    }
    out.push_str("</div>\n");
    out
}

/// Converts the Markdown report into a standalone HTML page titled `title`.
pub fn render_html(title: &str, markdown: &str) -> String {
    let mut blocks = Blocks::default();
    for line in markdown.lines() {
        blocks.line(line);
    }
    let (body, headings) = blocks.finish();

    let mut html = String::new();
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>",
        escape(title)
    );
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<nav class=\"toc-container\">\n");
    html.push_str("<div class=\"toc-title\">Contents</div>\n");
    html.push_str(&toc(&headings));
    html.push_str("</nav>\n<main class=\"content\">\n");
    html.push_str(&body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}
