use ratatui::style::Color;

#[derive(Clone)]
pub struct Theme {
    pub name: &'static str,
    pub fg: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub error: Color,
    pub user_color: Color,
    pub assistant_color: Color,
    pub system_color: Color,
    pub border: Color,
}

impl Theme {
    /// Light blue and orange, after the banner colors.
    pub fn soft() -> Self {
        Self {
            name: "soft",
            fg: Color::Rgb(225, 228, 235),
            accent: Color::Rgb(0, 123, 255),
            highlight: Color::Rgb(255, 165, 0),
            muted: Color::Rgb(120, 128, 140),
            error: Color::Rgb(239, 83, 80),
            user_color: Color::Rgb(100, 170, 255),
            assistant_color: Color::Rgb(220, 220, 220),
            system_color: Color::Rgb(255, 190, 90),
            border: Color::Rgb(70, 90, 120),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(122, 162, 247),
            highlight: Color::Rgb(224, 175, 104),
            muted: Color::Rgb(100, 100, 100),
            error: Color::Rgb(247, 118, 142),
            user_color: Color::Cyan,
            assistant_color: Color::Green,
            system_color: Color::Yellow,
            border: Color::Rgb(60, 60, 60),
        }
    }

    pub fn mixtral() -> Self {
        Self {
            name: "mixtral",
            fg: Color::Rgb(240, 236, 228),
            accent: Color::Rgb(255, 112, 0),
            highlight: Color::Rgb(255, 205, 0),
            muted: Color::Rgb(130, 120, 110),
            error: Color::Rgb(225, 5, 0),
            user_color: Color::Rgb(255, 175, 0),
            assistant_color: Color::Rgb(240, 236, 228),
            system_color: Color::Rgb(255, 130, 5),
            border: Color::Rgb(90, 70, 50),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "mixtral" => Self::mixtral(),
            _ => Self::soft(),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["soft", "dark", "mixtral"]
    }
}
