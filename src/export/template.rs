//! Placeholder templates with typed variable sets per page.
//!
//! Templates are plain HTML containing `__NAME__` placeholders. Rendering is a
//! single literal pass: values are inserted verbatim (no escaping) and never
//! rescanned, so a value that looks like a placeholder stays as written.
//! Placeholders a page does not define are left untouched.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__([A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*)__").expect("placeholder pattern is valid")
});

/// The variables a template can reference, keyed by placeholder name
/// (without the surrounding underscores).
pub trait TemplateVars {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Substitutes every known placeholder in `template`.
pub fn render(template: &str, vars: &impl TemplateVars) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match vars.lookup(&caps[1]) {
            Some(value) => value.into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// File stem of a tag's page under `tags/`.
///
/// Tags may contain `/`, `\` or other characters that are not safe in a file
/// name, so the stem is the percent-encoded tag. Plain tags such as `rust` are
/// unchanged.
pub fn tag_page_stem(tag: &str) -> Cow<'_, str> {
    urlencoding::encode(tag)
}

/// The page stem as written in a relative link. Browsers decode links before
/// resolving them, so the `%` of an encoded stem is encoded once more.
pub fn tag_page_link(tag: &str) -> String {
    urlencoding::encode(&tag_page_stem(tag)).into_owned()
}

/// Variables of a full note page.
#[derive(Debug, Clone)]
pub struct NotePageVars<'a> {
    pub version: &'a str,
    pub site_name: &'a str,
    pub id: &'a str,
    pub time: String,
    pub title: &'a str,
    /// Rendered inline tag fragments.
    pub tags: String,
    /// Rendered note body.
    pub content: String,
}

impl TemplateVars for NotePageVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "VER" => Some(self.version.into()),
            "SITENAME" => Some(self.site_name.into()),
            "ID" => Some(self.id.into()),
            "TIME" => Some(self.time.as_str().into()),
            "TITLE" => Some(self.title.into()),
            "TAGS" => Some(self.tags.as_str().into()),
            "CONTENT" => Some(self.content.as_str().into()),
            _ => None,
        }
    }
}

/// Variables of a listing page: the site index and the tag overview.
#[derive(Debug, Clone)]
pub struct IndexPageVars<'a> {
    pub version: &'a str,
    pub site_name: &'a str,
    /// Rendered list items.
    pub content: String,
}

impl TemplateVars for IndexPageVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "VER" => Some(self.version.into()),
            "SITENAME" => Some(self.site_name.into()),
            "CONTENT" => Some(self.content.as_str().into()),
            _ => None,
        }
    }
}

/// Variables of a page listing the notes with one tag.
#[derive(Debug, Clone)]
pub struct TagPageVars<'a> {
    pub version: &'a str,
    pub site_name: &'a str,
    pub tag: &'a str,
    pub count: usize,
    /// Rendered note items.
    pub content: String,
}

impl TemplateVars for TagPageVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "VER" => Some(self.version.into()),
            "SITENAME" => Some(self.site_name.into()),
            "TAG" => Some(self.tag.into()),
            "TAG_LINK" => Some(tag_page_link(self.tag).into()),
            "COUNT" => Some(self.count.to_string().into()),
            "CONTENT" => Some(self.content.as_str().into()),
            _ => None,
        }
    }
}

/// Variables of a note entry in a list.
#[derive(Debug, Clone)]
pub struct NoteItemVars<'a> {
    pub id: &'a str,
    pub time: String,
    pub title: &'a str,
    pub tags: String,
}

impl TemplateVars for NoteItemVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "ID" => Some(self.id.into()),
            "TIME" => Some(self.time.as_str().into()),
            "TITLE" => Some(self.title.into()),
            "TAGS" => Some(self.tags.as_str().into()),
            _ => None,
        }
    }
}

/// Variables of a tag entry on the tag overview.
#[derive(Debug, Clone)]
pub struct TagItemVars<'a> {
    pub tag: &'a str,
    pub count: usize,
}

impl TemplateVars for TagItemVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "TAG" => Some(self.tag.into()),
            "TAG_LINK" => Some(tag_page_link(self.tag).into()),
            "COUNT" => Some(self.count.to_string().into()),
            _ => None,
        }
    }
}

/// Variables of a tag link inside a note entry or page.
#[derive(Debug, Clone)]
pub struct InlineTagVars<'a> {
    pub tag: &'a str,
}

impl TemplateVars for InlineTagVars<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "TAG" => Some(self.tag.into()),
            "TAG_LINK" => Some(tag_page_link(self.tag).into()),
            _ => None,
        }
    }
}
