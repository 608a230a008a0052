//! Standalone HTML pages for shared articles.

use std::fmt::Write;

use quickblog_core::domain::Post;
use quickblog_core::domain::validation::word_count;

/// Words per minute used for the read-time estimate.
const READING_WPM: usize = 200;
const DESCRIPTION_CHARS: usize = 160;

const STYLE: &str = r#"
:root { --primary:#3b82f6; --text:#0f172a; --muted:#475569; --bg:#f8fafc; --card:#ffffff; --border:#e2e8f0;
        --gradient:linear-gradient(135deg,#3b82f6 0%,#10b981 50%,#ec4899 100%); }
[data-theme="dark"] { --text:#f8fafc; --muted:#cbd5e1; --bg:#1e293b; --card:#0f172a; --border:#334155; }
* { margin:0; padding:0; box-sizing:border-box; }
body { font-family:'Inter',-apple-system,BlinkMacSystemFont,sans-serif; line-height:1.7; color:var(--text); background:var(--bg); }
nav { display:flex; justify-content:space-between; align-items:center; max-width:800px; margin:0 auto; padding:1rem 1.5rem; }
nav a { color:var(--text); font-weight:800; text-decoration:none; }
.theme-toggle { background:none; border:1px solid var(--border); border-radius:2rem; padding:0.4rem 0.6rem; cursor:pointer; }
article { max-width:800px; margin:1rem auto 2rem; background:var(--card); border-radius:1rem; overflow:hidden; }
header { padding:3rem; background:var(--gradient); color:#fff; }
.category { display:inline-block; background:rgba(255,255,255,0.2); padding:0.4rem 1rem; border-radius:2rem; margin-bottom:1rem; text-transform:capitalize; }
h1 { font-size:clamp(2rem,5vw,3rem); line-height:1.2; margin-bottom:1rem; }
.meta { display:flex; gap:1.5rem; flex-wrap:wrap; opacity:0.9; }
.body { padding:3rem; font-size:1.125rem; }
.body p { margin-bottom:1.5rem; }
.tags { display:flex; gap:0.75rem; flex-wrap:wrap; margin-bottom:2rem; }
.tag { color:var(--primary); border:1px solid var(--border); padding:0.3rem 0.9rem; border-radius:2rem; font-size:0.875rem; }
footer { padding:2rem 3rem; border-top:1px solid var(--border); color:var(--muted); }
"#;

const THEME_SCRIPT: &str = r#"
const root = document.documentElement;
root.setAttribute('data-theme', localStorage.getItem('quickblog_theme') || 'light');
function toggleTheme() {
  const next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
  root.setAttribute('data-theme', next);
  localStorage.setItem('quickblog_theme', next);
}
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a full HTML document for one post.
pub fn article_page(post: &Post, frontend_url: &str) -> String {
    let words = word_count(&post.content);
    let minutes = words.div_ceil(READING_WPM).max(1);
    let description: String = post.content.chars().take(DESCRIPTION_CHARS).collect();
    let title = escape_html(&post.title);
    let home = escape_html(frontend_url);

    let mut tags = String::new();
    if !post.tags.is_empty() {
        tags.push_str(r#"<div class="tags">"#);
        for tag in &post.tags {
            let _ = write!(tags, r#"<span class="tag">#{}</span>"#, escape_html(tag));
        }
        tags.push_str("</div>");
    }

    let paragraphs: String = post
        .content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect();

    let category = post
        .category
        .as_deref()
        .map(|c| format!(r#"<div class="category">{}</div>"#, escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - QuickBlog</title>
<meta name="description" content="{description}...">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}...">
<meta property="og:type" content="article">
<style>{STYLE}</style>
<script>{THEME_SCRIPT}</script>
</head>
<body>
<nav><a href="{home}">QuickBlog</a><button class="theme-toggle" onclick="toggleTheme()">Theme</button></nav>
<article>
<header>
{category}
<h1>{title}</h1>
<div class="meta"><span>{author}</span><span>{date}</span><span>{minutes} min read</span><span>{words} words</span></div>
</header>
<div class="body">
{tags}
{paragraphs}
</div>
<footer>Published on QuickBlog. <a href="{home}">Create your blog</a></footer>
</article>
</body>
</html>
"#,
        description = escape_html(&description),
        author = escape_html(&post.author),
        date = post.created_at.format("%B %-d, %Y"),
    )
}
