use crate::cli::IconMode;

/// Icon shown next to a link, looked up by its exact title.
#[must_use]
pub fn link_icon(title: &str, mode: IconMode) -> Option<&'static str> {
    let icon = match (mode, title) {
        (IconMode::Unicode, "GitHub") => "⑂",
        (IconMode::Unicode, "LinkedIn") => "ⓘ",
        (IconMode::Unicode, "Telegram") => "➤",
        (IconMode::Unicode, "Instagram") => "◎",
        (IconMode::Unicode, "X") => "𝕏",
        (IconMode::Nerd, "GitHub") => "\u{f09b}",
        (IconMode::Nerd, "LinkedIn") => "\u{f0e1}",
        (IconMode::Nerd, "Telegram") => "\u{f2c6}",
        (IconMode::Nerd, "Instagram") => "\u{f16d}",
        (IconMode::Nerd, "X") => "\u{f099}",
        (IconMode::Ascii, "GitHub") => "[gh]",
        (IconMode::Ascii, "LinkedIn") => "[in]",
        (IconMode::Ascii, "Telegram") => "[tg]",
        (IconMode::Ascii, "Instagram") => "[ig]",
        (IconMode::Ascii, "X") => "[x]",
        _ => return None,
    };
    Some(icon)
}

/// Button caption: title, then the icon when one exists.
#[must_use]
pub fn link_caption(title: &str, mode: IconMode) -> String {
    match link_icon(title, mode) {
        Some(icon) => format!("{title}  {icon}"),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_link_has_an_icon_in_every_mode() {
        for mode in [IconMode::Unicode, IconMode::Nerd, IconMode::Ascii] {
            for title in ["GitHub", "LinkedIn", "Telegram", "Instagram", "X"] {
                assert!(link_icon(title, mode).is_some(), "{title} in {mode:?}");
            }
        }
    }

    #[test]
    fn unknown_or_differently_cased_titles_have_no_icon() {
        assert_eq!(link_icon("Blog", IconMode::Unicode), None);
        assert_eq!(link_icon("github", IconMode::Ascii), None);
        assert_eq!(link_caption("Blog", IconMode::Nerd), "Blog");
    }

    #[test]
    fn caption_puts_the_icon_after_the_title() {
        assert_eq!(link_caption("GitHub", IconMode::Ascii), "GitHub  [gh]");
    }
}
