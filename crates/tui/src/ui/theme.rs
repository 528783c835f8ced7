use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
    /// Badge color for discounts.
    pub saving: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(99, 102, 241),
            border: Color::Rgb(70, 76, 90),
            positive: Color::Rgb(80, 180, 120),
            warning: Color::Rgb(220, 170, 60),
            error: Color::Rgb(200, 80, 80),
            saving: Color::Rgb(225, 90, 120),
        }
    }
}
