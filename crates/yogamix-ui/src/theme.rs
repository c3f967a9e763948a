//! Theme configuration for `Yogamix`.
//!
//! Calm light palette: warm sand backgrounds, sage and terracotta accents,
//! Spotify green reserved for export controls.

/// Color palette.
pub mod colors {
    /// Background colors.
    pub mod background {
        /// Page background.
        pub const PRIMARY: &str = "#f7f3ee";
        /// Card background.
        pub const SURFACE: &str = "#fffdfa";
        /// Input and hover background.
        pub const MUTED: &str = "#ece5dc";
    }

    /// Text colors.
    pub mod text {
        /// Primary text.
        pub const PRIMARY: &str = "#2f2a25";
        /// Secondary text.
        pub const SECONDARY: &str = "#6f665c";
    }

    /// Accent colors.
    pub mod accent {
        /// Sage green.
        pub const PRIMARY: &str = "#6b8f71";
        /// Terracotta.
        pub const SECONDARY: &str = "#c4704f";
        /// Spotify brand green.
        pub const SPOTIFY: &str = "#1db954";
        /// Success.
        pub const SUCCESS: &str = "#3f9a5b";
        /// Error.
        pub const ERROR: &str = "#c0392b";
        /// Info.
        pub const INFO: &str = "#4a7ab7";
    }

    /// Default border.
    pub const BORDER: &str = "rgba(47, 42, 37, 0.12)";
    /// Card shadow.
    pub const SHADOW: &str = "0 4px 16px rgba(47, 42, 37, 0.08)";
}

/// Typography configuration.
pub mod typography {
    /// Body font stack.
    pub const FONT_FAMILY: &str =
        "'Nunito', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
    /// Heading font stack.
    pub const FONT_FAMILY_HEADING: &str = "'Lora', Georgia, serif";
}

/// Spacing values.
pub mod spacing {
    /// Small spacing.
    pub const SM: &str = "0.5rem";
    /// Medium spacing.
    pub const MD: &str = "1rem";
    /// Large spacing.
    pub const LG: &str = "1.5rem";
}

/// Border radius values.
pub mod radius {
    /// Controls.
    pub const SM: &str = "0.5rem";
    /// Cards.
    pub const LG: &str = "1rem";
    /// Pills.
    pub const FULL: &str = "9999px";
}

/// Normal transition for interactive elements.
pub const TRANSITION: &str = "0.2s cubic-bezier(0.4, 0, 0.2, 1)";

/// Generate CSS custom properties for the theme.
#[must_use]
pub fn generate_css_variables() -> String {
    format!(
        r":root {{
  --bg-primary: {bg_primary};
  --bg-surface: {bg_surface};
  --bg-muted: {bg_muted};
  --text-primary: {text_primary};
  --text-secondary: {text_secondary};
  --accent-primary: {accent_primary};
  --accent-secondary: {accent_secondary};
  --accent-spotify: {accent_spotify};
  --accent-success: {accent_success};
  --accent-error: {accent_error};
  --accent-info: {accent_info};
  --border: {border};
  --shadow: {shadow};
  --font-family: {font_family};
  --font-family-heading: {font_family_heading};
  --spacing-sm: {spacing_sm};
  --spacing-md: {spacing_md};
  --spacing-lg: {spacing_lg};
  --radius-sm: {radius_sm};
  --radius-lg: {radius_lg};
  --radius-full: {radius_full};
  --transition: {transition};
}}",
        bg_primary = colors::background::PRIMARY,
        bg_surface = colors::background::SURFACE,
        bg_muted = colors::background::MUTED,
        text_primary = colors::text::PRIMARY,
        text_secondary = colors::text::SECONDARY,
        accent_primary = colors::accent::PRIMARY,
        accent_secondary = colors::accent::SECONDARY,
        accent_spotify = colors::accent::SPOTIFY,
        accent_success = colors::accent::SUCCESS,
        accent_error = colors::accent::ERROR,
        accent_info = colors::accent::INFO,
        border = colors::BORDER,
        shadow = colors::SHADOW,
        font_family = typography::FONT_FAMILY,
        font_family_heading = typography::FONT_FAMILY_HEADING,
        spacing_sm = spacing::SM,
        spacing_md = spacing::MD,
        spacing_lg = spacing::LG,
        radius_sm = radius::SM,
        radius_lg = radius::LG,
        radius_full = radius::FULL,
        transition = TRANSITION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_css_variables() {
        let css = generate_css_variables();
        assert!(css.contains(":root"));
        assert!(css.contains("--accent-spotify: #1db954"));
        assert!(css.contains("--font-family"));
    }

    #[test]
    fn test_color_values() {
        assert!(colors::background::PRIMARY.starts_with('#'));
        assert!(colors::accent::SPOTIFY.starts_with('#'));
    }
}
