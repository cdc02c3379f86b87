use ratatui::style::Color;

/// Built-in theme names, in the order they are offered
pub const THEME_NAMES: &[&str] = &["dark", "light", "high-contrast"];

/// Colors used by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    // Editor area
    pub editor_bg: Color,
    pub editor_fg: Color,
    pub cursor: Color,
    pub selection_bg: Color,
    pub current_line_bg: Color,
    pub line_number_fg: Color,
    pub current_line_number_fg: Color,

    // Search
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub current_match_bg: Color,

    // Status bar and prompt
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub prompt_fg: Color,
    pub prompt_bg: Color,
    pub message_fg: Color,

    // Syntax
    pub syntax_keyword: Color,
    pub syntax_string: Color,
    pub syntax_comment: Color,
    pub syntax_function: Color,
    pub syntax_type: Color,
    pub syntax_variable: Color,
    pub syntax_constant: Color,
    pub syntax_operator: Color,
}

impl Theme {
    /// Look up a built-in theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            editor_bg: Color::Rgb(30, 30, 30),
            editor_fg: Color::Rgb(212, 212, 212),
            cursor: Color::Rgb(255, 255, 255),
            selection_bg: Color::Rgb(38, 79, 120),
            current_line_bg: Color::Rgb(40, 40, 40),
            line_number_fg: Color::Rgb(100, 100, 100),
            current_line_number_fg: Color::Rgb(220, 220, 170),
            search_match_bg: Color::Rgb(98, 81, 0),
            search_match_fg: Color::Rgb(255, 255, 255),
            current_match_bg: Color::Rgb(190, 140, 0),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 122, 204),
            prompt_fg: Color::White,
            prompt_bg: Color::Rgb(20, 20, 20),
            message_fg: Color::Rgb(200, 200, 200),
            syntax_keyword: Color::Rgb(86, 156, 214),
            syntax_string: Color::Rgb(206, 145, 120),
            syntax_comment: Color::Rgb(106, 153, 85),
            syntax_function: Color::Rgb(220, 220, 170),
            syntax_type: Color::Rgb(78, 201, 176),
            syntax_variable: Color::Rgb(156, 220, 254),
            syntax_constant: Color::Rgb(181, 206, 168),
            syntax_operator: Color::Rgb(212, 212, 212),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            editor_bg: Color::Rgb(255, 255, 255),
            editor_fg: Color::Rgb(0, 0, 0),
            cursor: Color::Rgb(0, 0, 0),
            selection_bg: Color::Rgb(173, 214, 255),
            current_line_bg: Color::Rgb(245, 245, 245),
            line_number_fg: Color::Rgb(140, 140, 140),
            current_line_number_fg: Color::Rgb(11, 33, 107),
            search_match_bg: Color::Rgb(255, 235, 150),
            search_match_fg: Color::Rgb(0, 0, 0),
            current_match_bg: Color::Rgb(255, 200, 60),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Rgb(220, 220, 220),
            prompt_fg: Color::Black,
            prompt_bg: Color::Rgb(235, 235, 235),
            message_fg: Color::Rgb(60, 60, 60),
            syntax_keyword: Color::Rgb(0, 0, 255),
            syntax_string: Color::Rgb(163, 21, 21),
            syntax_comment: Color::Rgb(0, 128, 0),
            syntax_function: Color::Rgb(121, 94, 38),
            syntax_type: Color::Rgb(38, 127, 153),
            syntax_variable: Color::Rgb(0, 16, 128),
            syntax_constant: Color::Rgb(9, 134, 88),
            syntax_operator: Color::Rgb(0, 0, 0),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            editor_bg: Color::Black,
            editor_fg: Color::White,
            cursor: Color::Yellow,
            selection_bg: Color::Blue,
            current_line_bg: Color::Rgb(20, 20, 20),
            line_number_fg: Color::Gray,
            current_line_number_fg: Color::Yellow,
            search_match_bg: Color::Magenta,
            search_match_fg: Color::White,
            current_match_bg: Color::LightRed,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Yellow,
            prompt_fg: Color::White,
            prompt_bg: Color::Black,
            message_fg: Color::White,
            syntax_keyword: Color::Cyan,
            syntax_string: Color::Green,
            syntax_comment: Color::Gray,
            syntax_function: Color::Yellow,
            syntax_type: Color::LightCyan,
            syntax_variable: Color::White,
            syntax_constant: Color::LightMagenta,
            syntax_operator: Color::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
