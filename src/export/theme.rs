//! Stylesheets written alongside the generated site.

/// Base stylesheet, rewritten on every build.
pub const BASE_CSS: &str = r#":root {
    --color-bg: #ffffff;
    --color-text: #24292f;
    --color-muted: #57606a;
    --color-link: #0969da;
    --color-border: #d0d7de;
    --color-code-bg: #f6f8fa;
    --color-tag-bg: #ddf4ff;
}

@media (prefers-color-scheme: dark) {
    :root {
        --color-bg: #0d1117;
        --color-text: #c9d1d9;
        --color-muted: #8b949e;
        --color-link: #58a6ff;
        --color-border: #30363d;
        --color-code-bg: #161b22;
        --color-tag-bg: #1f3048;
    }
}

body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    background: var(--color-bg);
    color: var(--color-text);
}

a { color: var(--color-link); text-decoration: none; }
a:hover { text-decoration: underline; }

header.site { border-bottom: 1px solid var(--color-border); margin-bottom: 1.5rem; }
header.site nav a { margin-right: 1rem; }
footer.site { border-top: 1px solid var(--color-border); margin-top: 2rem; color: var(--color-muted); font-size: 0.85em; }

ul.notes, ul.tags { list-style: none; padding: 0; }
ul.notes li { margin-bottom: 1rem; }
ul.tags li { display: inline-block; margin: 0 0.5rem 0.5rem 0; }

.time { color: var(--color-muted); font-size: 0.85em; margin-right: 0.5rem; }
.count { color: var(--color-muted); font-size: 0.85em; }
.tag {
    display: inline-block;
    background: var(--color-tag-bg);
    padding: 0.1rem 0.5rem;
    border-radius: 3px;
    margin-right: 0.25rem;
    font-size: 0.85em;
}

pre {
    background: var(--color-code-bg);
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
}
code { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 0.9em; }
:not(pre) > code { background: var(--color-code-bg); padding: 0.1rem 0.3rem; border-radius: 3px; }
blockquote { border-left: 3px solid var(--color-border); margin-left: 0; padding-left: 1rem; color: var(--color-muted); }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid var(--color-border); padding: 0.5rem; text-align: left; }
img { max-width: 100%; height: auto; }
"#;

/// Placeholder for user styles. Only written when missing.
pub const CUSTOM_CSS: &str = "";
