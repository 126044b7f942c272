use std::fmt::Write as _;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::{
    app::profile::Profile,
    cli::IconMode,
    ui::{
        color::{WHITE, blend, color_to_rgb, to_color},
        theme::CardPalette,
        widgets::links::{link_caption, link_icon},
    },
};

const MIN_INNER_WIDTH: u16 = 22;
const MAX_INNER_WIDTH: u16 = 44;
const PAD_X: u16 = 2;
/// Border plus horizontal padding on both sides.
const CHROME_X: u16 = 2 * (1 + PAD_X);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Three-row rounded buttons.
    Boxed,
    /// One row per link, for short terminals.
    Compact,
}

impl LinkStyle {
    fn rows(self) -> u16 {
        match self {
            Self::Boxed => 3,
            Self::Compact => 1,
        }
    }
}

/// Where every part of the card lands for a given screen. Shared by the
/// renderer and mouse hit-testing so both agree on link rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub panel: Rect,
    pub avatar: Rect,
    pub name: Rect,
    pub location: Rect,
    pub tagline: Rect,
    pub tagline_lines: Vec<String>,
    pub links: Vec<Rect>,
    pub link_style: LinkStyle,
}

impl CardLayout {
    /// `None` when the card cannot fit, even with compact links.
    pub fn compute(area: Rect, profile: &Profile, icons: IconMode) -> Option<Self> {
        let max_inner = area.width.saturating_sub(CHROME_X);
        let inner_width = content_width(profile, icons)
            .clamp(MIN_INNER_WIDTH, MAX_INNER_WIDTH)
            .min(max_inner);
        if inner_width < MIN_INNER_WIDTH {
            return None;
        }

        let tagline_lines = if profile.tagline.trim().is_empty() {
            Vec::new()
        } else {
            wrap_words(&quoted(&profile.tagline), inner_width)
        };
        let tagline_rows = u16::try_from(tagline_lines.len()).unwrap_or(u16::MAX);
        let header_rows = 6 + tagline_rows + u16::from(tagline_rows > 0);
        let link_count = u16::try_from(profile.links.len()).unwrap_or(u16::MAX);

        [LinkStyle::Boxed, LinkStyle::Compact]
            .into_iter()
            .find_map(|style| {
                let height = header_rows
                    .saturating_add(style.rows().saturating_mul(link_count))
                    .saturating_add(2);
                (height <= area.height).then(|| {
                    Self::place(area, inner_width, height, style, tagline_lines.clone(), profile)
                })
            })
    }

    fn place(
        area: Rect,
        inner_width: u16,
        height: u16,
        link_style: LinkStyle,
        tagline_lines: Vec<String>,
        profile: &Profile,
    ) -> Self {
        let width = inner_width + CHROME_X;
        let panel = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        let x = panel.x + 1 + PAD_X;
        let row = |y: u16| Rect::new(x, y, inner_width, 1);

        // Top border, then one row of padding.
        let mut y = panel.y + 2;
        let avatar = row(y);
        y += 2;
        let name = row(y);
        y += 1;
        let location = row(y);
        y += 2;
        let tagline_rows = u16::try_from(tagline_lines.len()).unwrap_or(0);
        let tagline = Rect::new(x, y, inner_width, tagline_rows);
        y += tagline_rows + u16::from(tagline_rows > 0);

        let links = profile
            .links
            .iter()
            .map(|_| {
                let rect = Rect::new(x, y, inner_width, link_style.rows());
                y += link_style.rows();
                rect
            })
            .collect();

        Self {
            panel,
            avatar,
            name,
            location,
            tagline,
            tagline_lines,
            links,
            link_style,
        }
    }

    #[must_use]
    pub fn link_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.links.iter().position(|rect| rect.contains(position))
    }
}

pub struct ProfileCard<'a> {
    pub profile: &'a Profile,
    pub layout: &'a CardLayout,
    pub selected: usize,
    pub palette: CardPalette,
    pub icons: IconMode,
}

impl Widget for ProfileCard<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let layout = self.layout;

        frost(buf, layout.panel, palette.frost_alpha, true);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .render(layout.panel, buf);

        let initials = self.profile.initials();
        let badge = format!(" {initials} ");
        let badge_width = text_width(&badge).min(layout.avatar.width);
        let badge_rect = Rect::new(
            layout.avatar.x + (layout.avatar.width - badge_width) / 2,
            layout.avatar.y,
            badge_width,
            1,
        );
        Paragraph::new(badge)
            .style(
                Style::default()
                    .fg(palette.avatar_text)
                    .bg(palette.avatar_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .render(badge_rect, buf);

        centered(
            &self.profile.name,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )
        .render(layout.name, buf);
        centered(
            &self.profile.location,
            Style::default().fg(palette.neon).add_modifier(Modifier::BOLD),
        )
        .render(layout.location, buf);

        let tagline: Vec<Line> = layout
            .tagline_lines
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();
        Paragraph::new(tagline)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted_text).add_modifier(Modifier::ITALIC))
            .render(layout.tagline, buf);

        for (index, (link, rect)) in self.profile.links.iter().zip(&layout.links).enumerate() {
            let button = LinkButton {
                title: &link.title,
                selected: index == self.selected,
                icons: self.icons,
                style: layout.link_style,
                palette,
            };
            button.render(*rect, buf);
        }
    }
}

struct LinkButton<'a> {
    title: &'a str,
    selected: bool,
    icons: IconMode,
    style: LinkStyle,
    palette: CardPalette,
}

impl Widget for LinkButton<'_> {
    fn render(self, rect: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let alpha = if self.selected {
            palette.link_hover_alpha
        } else {
            palette.link_alpha
        };
        frost(buf, rect, alpha, false);

        let caption = link_caption(self.title, self.icons);
        let caption = if self.selected {
            format!("› {caption} ‹")
        } else {
            caption
        };
        let mut text_style = Style::default().fg(palette.text);
        if self.selected {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let caption_row = match self.style {
            LinkStyle::Boxed => {
                let border = if self.selected {
                    palette.text
                } else {
                    palette.border
                };
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border))
                    .render(rect, buf);
                Rect::new(rect.x + 1, rect.y + 1, rect.width.saturating_sub(2), 1)
            }
            LinkStyle::Compact => rect,
        };
        centered(&caption, text_style).render(caption_row, buf);
    }
}

fn centered(text: &str, style: Style) -> Paragraph<'_> {
    Paragraph::new(text).alignment(Alignment::Center).style(style)
}

/// Lightens the cells' background towards white. The panel variant also wipes
/// the storm glyphs beneath it.
fn frost(buf: &mut Buffer, rect: Rect, alpha: f32, clear: bool) {
    let rect = rect.intersection(buf.area);
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let bg = to_color(blend(color_to_rgb(cell.bg), WHITE, alpha));
                if clear {
                    cell.set_char(' ');
                }
                cell.set_bg(bg);
            }
        }
    }
}

fn content_width(profile: &Profile, icons: IconMode) -> u16 {
    let widest_link = profile
        .links
        .iter()
        .map(|link| text_width(&link_caption(&link.title, icons)) + 6)
        .max()
        .unwrap_or(0);
    [
        text_width(&profile.name),
        text_width(&profile.location),
        text_width(&quoted(&profile.tagline)),
        widest_link,
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn quoted(text: &str) -> String {
    format!("“{}”", text.trim())
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX)
}

/// Greedy word wrap; a single over-long word keeps its own line.
pub(crate) fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if text_width(&current) + 1 + text_width(word) <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The card as plain text, for non-interactive output.
#[must_use]
pub fn plain_text(profile: &Profile, icons: IconMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.name);
    if !profile.location.is_empty() {
        let _ = writeln!(out, "{}", profile.location);
    }
    if !profile.tagline.trim().is_empty() {
        let _ = writeln!(out, "{}", quoted(&profile.tagline));
    }
    if !profile.links.is_empty() {
        out.push('\n');
    }
    let title_width = profile
        .links
        .iter()
        .map(|link| text_width(&link.title))
        .max()
        .unwrap_or(0);
    for link in &profile.links {
        let icon = link_icon(&link.title, icons).unwrap_or("");
        let pad = usize::from(title_width - text_width(&link.title));
        let _ = writeln!(
            out,
            "{icon:<4} {}{}  {}",
            link.title,
            " ".repeat(pad),
            link.url
        );
    }
    out
}

#[cfg(test)]
mod tests;
