use console::Style;
use once_cell::sync::Lazy;
use outstanding::Theme;

pub mod names {
    pub const HEADER: &str = "header";
}

pub static LIST_THEME: Lazy<Theme> =
    Lazy::new(|| Theme::new().add(names::HEADER, Style::new().bold()));
