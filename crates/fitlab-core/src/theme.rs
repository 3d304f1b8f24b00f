//! Visual theme registry.
//!
//! Each variant maps to a plain set of style tokens. The tokens are the
//! utility-class strings the mobile prototype used plus hex chart colours,
//! which the terminal renderer turns into ANSI colours.

use crate::error::FitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Material,
    Glassmorphism,
    Dark,
    Neo,
    Vibrant,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 5] = [
        Self::Material,
        Self::Glassmorphism,
        Self::Dark,
        Self::Neo,
        Self::Vibrant,
    ];

    /// Config key of the variant.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Glassmorphism => "glassmorphism",
            Self::Dark => "dark",
            Self::Neo => "neo",
            Self::Vibrant => "vibrant",
        }
    }

    /// Short label shown in the variant switcher.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Glassmorphism => "Glass",
            Self::Dark => "Dark",
            Self::Neo => "Neo",
            Self::Vibrant => "Vibrant",
        }
    }

    pub fn config(&self) -> ThemeConfig {
        ThemeConfig::for_variant(*self)
    }

    /// Cycle to the next variant in switcher order.
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ThemeVariant {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "material" => Ok(Self::Material),
            "glassmorphism" | "glass" => Ok(Self::Glassmorphism),
            "dark" => Ok(Self::Dark),
            "neo" => Ok(Self::Neo),
            "vibrant" => Ok(Self::Vibrant),
            other => Err(FitError::UnknownTheme(other.to_string())),
        }
    }
}

/// Style tokens for one theme variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    pub variant: ThemeVariant,
    pub bg: &'static str,
    pub header: &'static str,
    pub card_bg: &'static str,
    pub card_shadow: &'static str,
    pub title_text: &'static str,
    pub subtitle_text: &'static str,
    pub active_nav: &'static str,
    pub nav_border: &'static str,
    pub chart_grid: &'static str,
    pub chart_axis: &'static str,
    pub bar_color: &'static str,
    pub line_color: &'static str,
}

impl ThemeConfig {
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Material => Self {
                variant,
                bg: "bg-gradient-to-br from-purple-50 to-blue-50",
                header: "bg-gradient-to-br from-[#6750A4] to-[#4e3a8f] text-white",
                card_bg: "bg-white",
                card_shadow: "shadow-md",
                title_text: "text-[#1C1B1F]",
                subtitle_text: "text-gray-600",
                active_nav: "text-[#6750A4]",
                nav_border: "border-gray-300",
                chart_grid: "#e5e7eb",
                chart_axis: "#6b7280",
                bar_color: "#6750A4",
                line_color: "#6750A4",
            },
            ThemeVariant::Glassmorphism => Self {
                variant,
                bg: "bg-gradient-to-br from-blue-400 via-purple-400 to-pink-400",
                header: "bg-white/20 backdrop-blur-xl text-white border-b border-white/20",
                card_bg: "bg-white/30 backdrop-blur-lg border border-white/20",
                card_shadow: "shadow-xl",
                title_text: "text-white",
                subtitle_text: "text-white/80",
                active_nav: "text-white",
                nav_border: "border-white/30",
                chart_grid: "#ffffff40",
                chart_axis: "#ffffff90",
                bar_color: "#ffffff",
                line_color: "#ffffff",
            },
            ThemeVariant::Dark => Self {
                variant,
                bg: "bg-gradient-to-br from-gray-950 via-slate-900 to-gray-950",
                header: "bg-gradient-to-br from-slate-800 to-slate-900 text-white border-b border-slate-700",
                card_bg: "bg-slate-800 border border-slate-700",
                card_shadow: "shadow-lg",
                title_text: "text-white",
                subtitle_text: "text-slate-400",
                active_nav: "text-blue-400",
                nav_border: "border-slate-600",
                chart_grid: "#374151",
                chart_axis: "#9ca3af",
                bar_color: "#3b82f6",
                line_color: "#3b82f6",
            },
            ThemeVariant::Neo => Self {
                variant,
                bg: "bg-gradient-to-br from-emerald-50 to-cyan-50",
                header: "bg-gradient-to-br from-emerald-500 to-cyan-500 text-white",
                card_bg: "bg-white border-2 border-emerald-100",
                card_shadow: "shadow-lg",
                title_text: "text-gray-900",
                subtitle_text: "text-gray-600",
                active_nav: "text-emerald-600",
                nav_border: "border-emerald-200",
                chart_grid: "#d1fae5",
                chart_axis: "#6b7280",
                bar_color: "#10b981",
                line_color: "#06b6d4",
            },
            ThemeVariant::Vibrant => Self {
                variant,
                bg: "bg-gradient-to-br from-orange-100 via-pink-100 to-rose-100",
                header: "bg-gradient-to-br from-orange-500 via-pink-500 to-rose-500 text-white",
                card_bg: "bg-white/80 backdrop-blur-sm",
                card_shadow: "shadow-lg",
                title_text: "text-gray-900",
                subtitle_text: "text-gray-600",
                active_nav: "text-orange-600",
                nav_border: "border-orange-200",
                chart_grid: "#fed7aa",
                chart_axis: "#6b7280",
                bar_color: "#f97316",
                line_color: "#ec4899",
            },
        }
    }

    /// Style tokens as (key, value) pairs, in declaration order.
    pub fn tokens(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("bg", self.bg),
            ("header", self.header),
            ("card_bg", self.card_bg),
            ("card_shadow", self.card_shadow),
            ("title_text", self.title_text),
            ("subtitle_text", self.subtitle_text),
            ("active_nav", self.active_nav),
            ("nav_border", self.nav_border),
            ("chart_grid", self.chart_grid),
            ("chart_axis", self.chart_axis),
            ("bar_color", self.bar_color),
            ("line_color", self.line_color),
        ]
    }

    /// Whether the variant renders light text on a dark background.
    pub fn is_dark(&self) -> bool {
        matches!(self.variant, ThemeVariant::Dark | ThemeVariant::Glassmorphism)
    }

    /// 24-bit ANSI foreground escape for the bar colour.
    pub fn accent_ansi(&self) -> String {
        ansi_fg(self.bar_color)
    }

    /// 24-bit ANSI foreground escape for the line colour.
    pub fn secondary_ansi(&self) -> String {
        ansi_fg(self.line_color)
    }
}

/// Parse `#rrggbb` (an optional alpha suffix is ignored).
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// ANSI truecolor foreground sequence, or an empty string for bad input.
pub fn ansi_fg(hex: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m", r, g, b),
        None => String::new(),
    }
}
