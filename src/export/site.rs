//! Static site generation from the note indexes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::{NoteId, Tag};
use crate::export::html::markdown_to_html;
use crate::export::template::{
    IndexPageVars, InlineTagVars, NoteItemVars, NotePageVars, TagItemVars, TagPageVars, render,
    tag_page_stem,
};
use crate::export::theme::{BASE_CSS, CUSTOM_CSS};
use crate::index::Indexes;
use crate::infra::{NoteStore, StoreError};

/// Site index listing every note, newest first.
pub const DEFAULT_INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>__SITENAME__</title>
    <link rel="stylesheet" href="base.css">
    <link rel="stylesheet" href="custom.css">
</head>
<body>
    <header class="site">
        <h1>__SITENAME__</h1>
        <nav><a href="index.html">Notes</a><a href="tags.html">Tags</a></nav>
    </header>
    <main>
        <ul class="notes">__CONTENT__</ul>
    </main>
    <footer class="site">Built with quill __VER__</footer>
</body>
</html>
"##;

/// Tag overview listing every tag with its note count.
pub const DEFAULT_TAGS_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Tags | __SITENAME__</title>
    <link rel="stylesheet" href="base.css">
    <link rel="stylesheet" href="custom.css">
</head>
<body>
    <header class="site">
        <h1>__SITENAME__</h1>
        <nav><a href="index.html">Notes</a><a href="tags.html">Tags</a></nav>
    </header>
    <main>
        <h2>Tags</h2>
        <ul class="tags">__CONTENT__</ul>
    </main>
    <footer class="site">Built with quill __VER__</footer>
</body>
</html>
"##;

/// Full page for a single note.
pub const DEFAULT_NOTE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>__TITLE__ | __SITENAME__</title>
    <link rel="stylesheet" href="../base.css">
    <link rel="stylesheet" href="../custom.css">
</head>
<body>
    <header class="site">
        <h1>__SITENAME__</h1>
        <nav><a href="../index.html">Notes</a><a href="../tags.html">Tags</a></nav>
    </header>
    <article>
        <header>
            <h2>__TITLE__</h2>
            <div><span class="time">__TIME__</span>__TAGS__</div>
        </header>
        <main>
            __CONTENT__
        </main>
    </article>
    <footer class="site">[__ID__] Built with quill __VER__</footer>
</body>
</html>
"##;

/// Page listing the notes with one tag, newest first.
pub const DEFAULT_TAG_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>__TAG__ | __SITENAME__</title>
    <link rel="stylesheet" href="../base.css">
    <link rel="stylesheet" href="../custom.css">
</head>
<body>
    <header class="site">
        <h1>__SITENAME__</h1>
        <nav><a href="../index.html">Notes</a><a href="../tags.html">Tags</a></nav>
    </header>
    <main>
        <h2>__TAG__ <span class="count">(__COUNT__)</span></h2>
        <ul class="notes">__CONTENT__</ul>
    </main>
    <footer class="site">Built with quill __VER__</footer>
</body>
</html>
"##;

/// Note entry on a tag page.
pub const DEFAULT_ITEM_NOTE_TEMPLATE: &str = r##"<li><span class="time">__TIME__</span><a href="../notes/__ID__.html">__TITLE__</a> __TAGS__</li>
"##;

/// Note entry on the site index.
pub const DEFAULT_ITEM_NOTE_FOR_INDEX_TEMPLATE: &str = r##"<li><span class="time">__TIME__</span><a href="notes/__ID__.html">__TITLE__</a> __TAGS__</li>
"##;

/// Tag entry on the tag overview.
pub const DEFAULT_ITEM_TAG_TEMPLATE: &str = r##"<li><a class="tag" href="tags/__TAG_LINK__.html">__TAG__</a><span class="count">__COUNT__</span></li>
"##;

/// Tag link on note pages and tag pages.
pub const DEFAULT_INLINE_TAG_TEMPLATE: &str = r##"<a class="tag" href="../tags/__TAG_LINK__.html">__TAG__</a>"##;

/// Tag link on the site index.
pub const DEFAULT_INLINE_TAG_FOR_INDEX_TEMPLATE: &str = r##"<a class="tag" href="tags/__TAG_LINK__.html">__TAG__</a>"##;

/// The templates a site is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateName {
    Index,
    Tags,
    Note,
    ItemNote,
    ItemNoteForIndex,
    Tag,
    ItemTag,
    InlineTag,
    InlineTagForIndex,
}

impl TemplateName {
    pub const ALL: [TemplateName; 9] = [
        TemplateName::Index,
        TemplateName::Tags,
        TemplateName::Note,
        TemplateName::ItemNote,
        TemplateName::ItemNoteForIndex,
        TemplateName::Tag,
        TemplateName::ItemTag,
        TemplateName::InlineTag,
        TemplateName::InlineTagForIndex,
    ];

    /// File stem of the override (`templates/<name>.html`).
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::Index => "index",
            TemplateName::Tags => "tags",
            TemplateName::Note => "note",
            TemplateName::ItemNote => "item_note",
            TemplateName::ItemNoteForIndex => "item_note_forIndex",
            TemplateName::Tag => "tag",
            TemplateName::ItemTag => "item_tag",
            TemplateName::InlineTag => "inline_tag",
            TemplateName::InlineTagForIndex => "inline_tag_forIndex",
        }
    }

    pub fn builtin(self) -> &'static str {
        match self {
            TemplateName::Index => DEFAULT_INDEX_TEMPLATE,
            TemplateName::Tags => DEFAULT_TAGS_TEMPLATE,
            TemplateName::Note => DEFAULT_NOTE_TEMPLATE,
            TemplateName::ItemNote => DEFAULT_ITEM_NOTE_TEMPLATE,
            TemplateName::ItemNoteForIndex => DEFAULT_ITEM_NOTE_FOR_INDEX_TEMPLATE,
            TemplateName::Tag => DEFAULT_TAG_TEMPLATE,
            TemplateName::ItemTag => DEFAULT_ITEM_TAG_TEMPLATE,
            TemplateName::InlineTag => DEFAULT_INLINE_TAG_TEMPLATE,
            TemplateName::InlineTagForIndex => DEFAULT_INLINE_TAG_FOR_INDEX_TEMPLATE,
        }
    }
}

/// Built-in templates with optional per-project overrides.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    overrides: BTreeMap<TemplateName, String>,
}

impl Templates {
    /// Only the templates shipped in the binary.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Loads overrides from `dir`. A missing directory or file falls back to
    /// the built-in template.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut templates = Self::default();
        for name in TemplateName::ALL {
            let path = dir.join(format!("{}.html", name.as_str()));
            if !path.is_file() {
                continue;
            }
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            debug!(template = name.as_str(), path = %path.display(), "Using template override");
            templates.overrides.insert(name, source);
        }
        Ok(templates)
    }

    pub fn with_override(mut self, name: TemplateName, source: impl Into<String>) -> Self {
        self.overrides.insert(name, source.into());
        self
    }

    pub fn get(&self, name: TemplateName) -> &str {
        self.overrides
            .get(&name)
            .map(String::as_str)
            .unwrap_or_else(|| name.builtin())
    }
}

/// Configuration for site generation.
pub struct SiteConfig<'a> {
    /// Substituted for `__SITENAME__`.
    pub site_name: &'a str,
    /// Substituted for `__VER__`.
    pub version: &'a str,
}

impl Default for SiteConfig<'_> {
    fn default() -> Self {
        Self {
            site_name: "Notes",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Result of site generation.
#[derive(Debug, Default)]
pub struct SiteResult {
    /// Number of note pages written.
    pub note_pages: usize,
    /// Number of tag pages written.
    pub tag_pages: usize,
    /// Recorded notes whose file no longer exists.
    pub missing: Vec<NoteId>,
}

/// Writes the whole site into `output_dir`.
///
/// Layout: `index.html`, `tags.html`, `base.css`, `custom.css`,
/// `notes/<id>.html` and `tags/<tag>.html`, where the tag is encoded by
/// [`tag_page_stem`]. Existing pages under `notes/` and `tags/` are removed
/// first so deleted notes and tags disappear.
pub fn generate_site(
    indexes: &Indexes,
    store: &NoteStore,
    templates: &Templates,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<SiteResult> {
    let notes_dir = output_dir.join("notes");
    let tags_dir = output_dir.join("tags");
    for dir in [&notes_dir, &tags_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        remove_stale_pages(dir)?;
    }

    write_file(&output_dir.join("base.css"), BASE_CSS)?;
    let custom_css = output_dir.join("custom.css");
    if !custom_css.exists() {
        write_file(&custom_css, CUSTOM_CSS)?;
    }

    let mut result = SiteResult::default();

    for record in indexes.notes() {
        let note = match store.load(record.id()) {
            Ok(note) => note,
            Err(StoreError::NotFound { id }) => {
                warn!(%id, "Recorded note has no file, skipping its page");
                result.missing.push(id);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let vars = NotePageVars {
            version: config.version,
            site_name: config.site_name,
            id: record.id().as_str(),
            time: record.id().display_time(),
            title: note.title(),
            tags: inline_tags(note.tags(), templates.get(TemplateName::InlineTag)),
            content: markdown_to_html(note.content()),
        };
        let path = notes_dir.join(format!("{}.html", record.id()));
        write_file(&path, &render(templates.get(TemplateName::Note), &vars))?;
        result.note_pages += 1;
    }

    let index_items: String = indexes
        .notes()
        .iter()
        .rev()
        .map(|record| {
            let vars = NoteItemVars {
                id: record.id().as_str(),
                time: record.id().display_time(),
                title: record.title(),
                tags: inline_tags(record.tags(), templates.get(TemplateName::InlineTagForIndex)),
            };
            render(templates.get(TemplateName::ItemNoteForIndex), &vars)
        })
        .collect();
    let index = IndexPageVars {
        version: config.version,
        site_name: config.site_name,
        content: index_items,
    };
    write_file(
        &output_dir.join("index.html"),
        &render(templates.get(TemplateName::Index), &index),
    )?;

    let mut tag_items = String::new();
    for tag_count in indexes.tags() {
        let note_items: String = indexes
            .newest_with_tag(tag_count.name())
            .into_iter()
            .map(|record| {
                let vars = NoteItemVars {
                    id: record.id().as_str(),
                    time: record.id().display_time(),
                    title: record.title(),
                    tags: inline_tags(record.tags(), templates.get(TemplateName::InlineTag)),
                };
                render(templates.get(TemplateName::ItemNote), &vars)
            })
            .collect();
        let page = TagPageVars {
            version: config.version,
            site_name: config.site_name,
            tag: tag_count.name(),
            count: tag_count.count(),
            content: note_items,
        };
        let path = tags_dir.join(format!("{}.html", tag_page_stem(tag_count.name())));
        write_file(&path, &render(templates.get(TemplateName::Tag), &page))?;
        result.tag_pages += 1;

        let item = TagItemVars {
            tag: tag_count.name(),
            count: tag_count.count(),
        };
        tag_items.push_str(&render(templates.get(TemplateName::ItemTag), &item));
    }
    let tags = IndexPageVars {
        version: config.version,
        site_name: config.site_name,
        content: tag_items,
    };
    write_file(
        &output_dir.join("tags.html"),
        &render(templates.get(TemplateName::Tags), &tags),
    )?;

    info!(
        notes = result.note_pages,
        tags = result.tag_pages,
        output = %output_dir.display(),
        "Site generated"
    );
    Ok(result)
}

fn inline_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>, template: &str) -> String {
    tags.into_iter()
        .map(|tag| render(template, &InlineTagVars { tag: tag.as_str() }))
        .collect()
}

fn remove_stale_pages(dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "html") {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            debug!(path = %path.display(), "Removed stale page");
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
