//! Syntax highlighting with syntect
//!
//! # Design
//! - **Per-line tokenization**: a highlighter maps one line of text to styled
//!   spans and never sees the rest of the buffer, so results can be cached per
//!   line and dropped only for lines an edit touched.
//! - **Registry**: languages are looked up in a [`HighlighterRegistry`]; a
//!   language with nothing registered renders as plain text.
//! - **Viewport-only**: [`LineHighlightCache`] tokenizes only the lines the
//!   renderer asks for.

use crate::model::buffer::{Buffer, BufferChange};
use crate::view::theme::Theme;
use ratatui::style::Color;
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

/// Lines longer than this are left unhighlighted
const MAX_LINE_BYTES: usize = 16 * 1024;

/// Highlight categories shared by every language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    Attribute,
    Comment,
    Constant,
    Function,
    Keyword,
    Number,
    Operator,
    Property,
    String,
    Type,
    Variable,
}

impl HighlightCategory {
    /// Get the color for this category from the theme
    pub fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Attribute => theme.syntax_constant, // No specific attribute color, use constant
            Self::Comment => theme.syntax_comment,
            Self::Constant => theme.syntax_constant,
            Self::Function => theme.syntax_function,
            Self::Keyword => theme.syntax_keyword,
            Self::Number => theme.syntax_constant,
            Self::Operator => theme.syntax_operator,
            Self::Property => theme.syntax_variable, // Properties are like variables
            Self::String => theme.syntax_string,
            Self::Type => theme.syntax_type,
            Self::Variable => theme.syntax_variable,
        }
    }
}

/// A styled run within one line, in char columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub category: HighlightCategory,
}

/// Language configuration for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    PlainText,
    Rust,
    Python,
    JavaScript,
    TypeScript,
    HTML,
    CSS,
    C,
    Cpp,
    Go,
    Json,
    Java,
    CSharp,
    Php,
    Ruby,
    Bash,
    Lua,
    Markdown,
    Yaml,
    Toml,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::PlainText,
        Language::Rust,
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::HTML,
        Language::CSS,
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Json,
        Language::Java,
        Language::CSharp,
        Language::Php,
        Language::Ruby,
        Language::Bash,
        Language::Lua,
        Language::Markdown,
        Language::Yaml,
        Language::Toml,
    ];

    /// Detect language from file extension
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Language::PlainText;
        };
        match ext {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "jsx" | "mjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "html" | "htm" => Language::HTML,
            "css" => Language::CSS,
            "c" | "h" => Language::C,
            "cpp" | "hpp" | "cc" | "hh" | "cxx" | "hxx" => Language::Cpp,
            "go" => Language::Go,
            "json" => Language::Json,
            "java" => Language::Java,
            "cs" => Language::CSharp,
            "php" => Language::Php,
            "rb" => Language::Ruby,
            "sh" | "bash" => Language::Bash,
            "lua" => Language::Lua,
            "md" | "markdown" => Language::Markdown,
            "yaml" | "yml" => Language::Yaml,
            "toml" => Language::Toml,
            _ => Language::PlainText,
        }
    }

    /// Name shown in the status bar
    pub fn name(&self) -> &'static str {
        match self {
            Language::PlainText => "Text",
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::HTML => "HTML",
            Language::CSS => "CSS",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Json => "JSON",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Bash => "Bash",
            Language::Lua => "Lua",
            Language::Markdown => "Markdown",
            Language::Yaml => "YAML",
            Language::Toml => "TOML",
        }
    }

    /// Extension used to find the bundled syntect grammar, if there is one
    fn syntect_extension(&self) -> Option<&'static str> {
        match self {
            Language::PlainText | Language::TypeScript | Language::Toml => None,
            Language::Rust => Some("rs"),
            Language::Python => Some("py"),
            Language::JavaScript => Some("js"),
            Language::HTML => Some("html"),
            Language::CSS => Some("css"),
            Language::C => Some("c"),
            Language::Cpp => Some("cpp"),
            Language::Go => Some("go"),
            Language::Json => Some("json"),
            Language::Java => Some("java"),
            Language::CSharp => Some("cs"),
            Language::Php => Some("php"),
            Language::Ruby => Some("rb"),
            Language::Bash => Some("sh"),
            Language::Lua => Some("lua"),
            Language::Markdown => Some("md"),
            Language::Yaml => Some("yaml"),
        }
    }
}

/// Turns one line of text into styled spans
///
/// Implementations must be pure: the same line always yields the same spans.
pub trait LanguageHighlighter {
    fn highlight_line(&self, line: &str) -> Vec<HighlightSpan>;
}

/// Highlighter for languages with no grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextHighlighter;

impl LanguageHighlighter for PlainTextHighlighter {
    fn highlight_line(&self, _line: &str) -> Vec<HighlightSpan> {
        Vec::new()
    }
}

/// Scope prefixes mapped to categories, most specific first
const SCOPE_CATEGORIES: &[(&str, HighlightCategory)] = &[
    ("comment", HighlightCategory::Comment),
    ("string", HighlightCategory::String),
    ("constant.numeric", HighlightCategory::Number),
    ("constant", HighlightCategory::Constant),
    ("keyword.operator", HighlightCategory::Operator),
    ("keyword", HighlightCategory::Keyword),
    ("storage.type", HighlightCategory::Keyword),
    ("storage", HighlightCategory::Keyword),
    ("entity.name.function", HighlightCategory::Function),
    ("support.function", HighlightCategory::Function),
    ("variable.function", HighlightCategory::Function),
    ("entity.name", HighlightCategory::Type),
    ("support.type", HighlightCategory::Type),
    ("support.class", HighlightCategory::Type),
    ("entity.other.attribute-name", HighlightCategory::Attribute),
    ("meta.attribute", HighlightCategory::Attribute),
    ("variable.other.member", HighlightCategory::Property),
    ("variable", HighlightCategory::Variable),
];

fn category_for(stack: &ScopeStack) -> Option<HighlightCategory> {
    stack.as_slice().iter().rev().find_map(|scope| {
        let name = scope.build_string();
        SCOPE_CATEGORIES
            .iter()
            .find(|(prefix, _)| {
                name.strip_prefix(prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
            })
            .map(|(_, category)| *category)
    })
}

/// Append a span, merging it into the previous one when they touch
fn push_span(
    spans: &mut Vec<HighlightSpan>,
    category: Option<HighlightCategory>,
    start: usize,
    end: usize,
) {
    let Some(category) = category else {
        return;
    };
    if start >= end {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.end == start && last.category == category => last.end = end,
        _ => spans.push(HighlightSpan {
            start,
            end,
            category,
        }),
    }
}

/// Highlighter backed by a bundled syntect grammar
pub struct SyntectHighlighter {
    syntax_set: Arc<SyntaxSet>,
    syntax: SyntaxReference,
}

impl SyntectHighlighter {
    /// Find the grammar registered for a file extension
    pub fn for_extension(syntax_set: Arc<SyntaxSet>, extension: &str) -> Option<Self> {
        let syntax = syntax_set.find_syntax_by_extension(extension)?.clone();
        Some(Self { syntax_set, syntax })
    }
}

impl LanguageHighlighter for SyntectHighlighter {
    fn highlight_line(&self, line: &str) -> Vec<HighlightSpan> {
        if line.len() > MAX_LINE_BYTES {
            tracing::trace!("skipping highlight of {} byte line", line.len());
            return Vec::new();
        }

        // Grammars loaded with newlines expect the terminator
        let source = format!("{line}\n");
        let mut state = ParseState::new(&self.syntax);
        let ops = match state.parse_line(&source, &self.syntax_set) {
            Ok(ops) => ops,
            Err(e) => {
                tracing::warn!("Highlight error: {}", e);
                return Vec::new();
            }
        };

        let mut spans: Vec<HighlightSpan> = Vec::new();
        let mut stack = ScopeStack::new();
        let mut byte_pos = 0;
        let mut char_pos = 0;

        for (offset, op) in ops {
            let offset = offset.min(line.len());
            let next_char = char_pos + line[byte_pos..offset].chars().count();
            push_span(&mut spans, category_for(&stack), char_pos, next_char);
            byte_pos = offset;
            char_pos = next_char;

            if let Err(e) = stack.apply(&op) {
                tracing::warn!("Highlight scope error: {:?}", e);
                return spans;
            }
        }
        let line_end = char_pos + line[byte_pos..].chars().count();
        push_span(&mut spans, category_for(&stack), char_pos, line_end);

        spans
    }
}

/// Maps languages to their highlighters
pub struct HighlighterRegistry {
    highlighters: HashMap<Language, Box<dyn LanguageHighlighter>>,
    fallback: PlainTextHighlighter,
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlighterRegistry {
    /// An empty registry; every language renders as plain text
    pub fn new() -> Self {
        Self {
            highlighters: HashMap::new(),
            fallback: PlainTextHighlighter,
        }
    }

    /// A registry with every bundled syntect grammar registered
    pub fn with_defaults() -> Self {
        let syntax_set = Arc::new(SyntaxSet::load_defaults_newlines());
        let mut registry = Self::new();
        for language in Language::ALL {
            let Some(ext) = language.syntect_extension() else {
                continue;
            };
            match SyntectHighlighter::for_extension(syntax_set.clone(), ext) {
                Some(highlighter) => registry.register(*language, Box::new(highlighter)),
                None => tracing::debug!("no bundled grammar for {}", language.name()),
            }
        }
        registry
    }

    pub fn register(&mut self, language: Language, highlighter: Box<dyn LanguageHighlighter>) {
        self.highlighters.insert(language, highlighter);
    }

    pub fn is_registered(&self, language: Language) -> bool {
        self.highlighters.contains_key(&language)
    }

    pub fn get(&self, language: Language) -> &dyn LanguageHighlighter {
        self.highlighters
            .get(&language)
            .map_or(&self.fallback as &dyn LanguageHighlighter, |h| h.as_ref())
    }

    pub fn highlight(&self, line: &str, language: Language) -> Vec<HighlightSpan> {
        self.get(language).highlight_line(line)
    }
}

/// Spans for each buffer line, computed on demand
///
/// Entries line up with buffer lines; an edit replaces the entries for the
/// lines it touched with empty slots and shifts the rest.
#[derive(Debug, Clone, Default)]
pub struct LineHighlightCache {
    lines: Vec<Option<Vec<HighlightSpan>>>,
}

impl LineHighlightCache {
    pub fn new(line_count: usize) -> Self {
        Self {
            lines: vec![None; line_count],
        }
    }

    /// Drop everything, e.g. after loading a file or switching language
    pub fn reset(&mut self, line_count: usize) {
        self.lines.clear();
        self.lines.resize(line_count, None);
    }

    /// Forget the lines an edit touched and shift the lines after it
    pub fn invalidate(&mut self, change: &BufferChange) {
        let start = change.start.line;
        let old_end = (change.old_end.line + 1).min(self.lines.len());
        let new_len = change.new_end.line - start + 1;
        if start >= self.lines.len() {
            self.lines.resize(start + new_len, None);
            return;
        }
        self.lines.splice(start..old_end, std::iter::repeat(None).take(new_len));
    }

    /// Tokenize any uncached lines in `range`
    pub fn ensure(&mut self, buffer: &Buffer, range: Range<usize>, registry: &HighlighterRegistry, language: Language) {
        if self.lines.len() != buffer.line_count() {
            self.lines.resize(buffer.line_count(), None);
        }
        let end = range.end.min(buffer.line_count());
        for index in range.start.min(end)..end {
            if self.lines[index].is_none() {
                let text = buffer.line_text(index).unwrap_or_default();
                self.lines[index] = Some(registry.highlight(text, language));
            }
        }
    }

    /// Cached spans for a line, if it has been tokenized
    pub fn spans(&self, line: usize) -> Option<&[HighlightSpan]> {
        self.lines.get(line)?.as_deref()
    }

    /// Number of lines currently holding spans
    pub fn cached_line_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_some()).count()
    }
}
