/// Container styles shared by the dashboard views
use iced::widget::container;
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::display::{hex, ColorScheme};

const CARD_RADIUS: f32 = 16.0;
const PILL_RADIUS: f32 = 999.0;

/// Rounded pill painted with a badge scheme
pub fn badge(scheme: ColorScheme) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        text_color: Some(scheme.text),
        background: Some(Background::Color(scheme.background)),
        border: Border {
            color: scheme.border,
            width: 1.0,
            radius: PILL_RADIUS.into(),
        },
        ..Default::default()
    }
}

/// White card with a soft shadow
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            color: hex(0xe5e7eb),
            width: 1.0,
            radius: CARD_RADIUS.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        ..Default::default()
    }
}

/// Red banner for user-visible errors
pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(hex(0xb91c1c)),
        background: Some(Background::Color(hex(0xfef2f2))),
        border: Border {
            color: hex(0xfecaca),
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

/// Soft indigo box for hints
pub fn hint(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(hex(0x4f46e5)),
        background: Some(Background::Color(hex(0xeef2ff))),
        border: Border {
            color: hex(0xe0e7ff),
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

/// Circle behind avatar letters and row IDs
pub fn avatar(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(hex(0x6366f1))),
        border: Border {
            radius: PILL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Light gray strip for the table header
pub fn table_header(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(hex(0x4b5563)),
        background: Some(Background::Color(hex(0xf9fafb))),
        ..Default::default()
    }
}

/// Dimmed backdrop behind the image overlay
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
        ..Default::default()
    }
}

/// Page background
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(hex(0xf8fafc))),
        ..Default::default()
    }
}

/// Muted gray for secondary text
pub fn muted() -> Color {
    hex(0x6b7280)
}
