use ratatui::style::Color;

use super::*;
use crate::{
    app::profile::LinkSpec,
    ui::theme::{ColorCapability, card_palette},
};

fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn tall_screens_get_boxed_buttons_short_ones_compact_rows() {
    let profile = Profile::default();
    let tall = CardLayout::compute(Rect::new(0, 0, 100, 40), &profile, IconMode::Unicode)
        .expect("fits");
    assert_eq!(tall.link_style, LinkStyle::Boxed);
    assert!(tall.links.iter().all(|rect| rect.height == 3));

    let short = CardLayout::compute(Rect::new(0, 0, 80, 24), &profile, IconMode::Unicode)
        .expect("fits");
    assert_eq!(short.link_style, LinkStyle::Compact);
    assert_eq!(short.links.len(), 5);
    for pair in short.links.windows(2) {
        assert_eq!(pair[1].y, pair[0].y + 1);
    }
}

#[test]
fn card_is_centered_and_contains_its_rows() {
    let area = Rect::new(0, 0, 100, 40);
    let layout = CardLayout::compute(area, &Profile::default(), IconMode::Unicode).expect("fits");
    let left = layout.panel.x;
    let right = area.width - layout.panel.right();
    assert!(left.abs_diff(right) <= 1);
    for rect in layout.links.iter().chain([&layout.name, &layout.avatar]) {
        assert!(layout.panel.contains(Position::new(rect.x, rect.y)));
        assert!(rect.bottom() < layout.panel.bottom());
    }
}

#[test]
fn tiny_screens_have_no_card() {
    let profile = Profile::default();
    assert!(CardLayout::compute(Rect::new(0, 0, 20, 30), &profile, IconMode::Unicode).is_none());
    assert!(CardLayout::compute(Rect::new(0, 0, 80, 12), &profile, IconMode::Unicode).is_none());
}

#[test]
fn hit_testing_matches_link_rows() {
    let layout = CardLayout::compute(Rect::new(0, 0, 80, 24), &Profile::default(), IconMode::Unicode)
        .expect("fits");
    let third = layout.links[2];
    assert_eq!(layout.link_at(third.x + 1, third.y), Some(2));
    assert_eq!(layout.link_at(layout.name.x, layout.name.y), None);
    assert_eq!(layout.link_at(0, 0), None);
}

#[test]
fn long_taglines_wrap_inside_the_card() {
    let profile = Profile {
        tagline: "Writes terminal software, maintains a rain simulator and collects \
                  far too many mechanical keyboards"
            .to_string(),
        ..Profile::default()
    };
    let layout =
        CardLayout::compute(Rect::new(0, 0, 100, 40), &profile, IconMode::Unicode).expect("fits");
    assert!(layout.tagline_lines.len() > 1);
    assert!(
        layout
            .tagline_lines
            .iter()
            .all(|line| text_width(line) <= layout.tagline.width)
    );
}

#[test]
fn wrap_keeps_overlong_words_whole() {
    assert_eq!(wrap_words("a bb ccc", 4), ["a bb", "ccc"]);
    assert_eq!(wrap_words("supercalifragilistic is long", 6), [
        "supercalifragilistic",
        "is",
        "long"
    ]);
    assert!(wrap_words("   ", 10).is_empty());
}

#[test]
fn rendered_card_shows_profile_and_marks_selection() {
    let area = Rect::new(0, 0, 80, 24);
    let profile = Profile::default();
    let layout = CardLayout::compute(area, &profile, IconMode::Ascii).expect("fits");
    let mut buf = Buffer::empty(area);
    ProfileCard {
        profile: &profile,
        layout: &layout,
        selected: 1,
        palette: card_palette(ColorCapability::TrueColor),
        icons: IconMode::Ascii,
    }
    .render(area, &mut buf);

    let text = buffer_text(&buf);
    assert!(text.contains("Diyorbek T."));
    assert!(text.contains("Tashkent, Uzbekistan"));
    assert!(text.contains("“Front-end developer at E-BIRJA”"));
    assert!(text.contains("› LinkedIn  [in] ‹"));
    assert!(text.contains("GitHub  [gh]"));
    assert!(text.contains(" DT "));
    assert!(text.contains('╭'));
}

#[test]
fn selected_link_is_brighter_than_the_rest() {
    let area = Rect::new(0, 0, 80, 24);
    let profile = Profile::default();
    let layout = CardLayout::compute(area, &profile, IconMode::Unicode).expect("fits");
    let mut buf = Buffer::empty(area);
    for cell in buf.content.iter_mut() {
        cell.set_bg(Color::Rgb(20, 20, 20));
    }
    ProfileCard {
        profile: &profile,
        layout: &layout,
        selected: 0,
        palette: card_palette(ColorCapability::TrueColor),
        icons: IconMode::Unicode,
    }
    .render(area, &mut buf);

    let luma = |rect: Rect| match buf[(rect.x, rect.y)].bg {
        Color::Rgb(r, _, _) => r,
        other => panic!("expected rgb background, got {other:?}"),
    };
    assert!(luma(layout.links[0]) > luma(layout.links[1]));
    assert!(luma(layout.links[1]) > 20);
}

#[test]
fn plain_text_lists_every_link_with_its_url() {
    let mut profile = Profile::default();
    profile.links.push(LinkSpec::new("Blog", "https://blog.example"));
    let text = plain_text(&profile, IconMode::Ascii);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Diyorbek T.");
    assert_eq!(lines[2], "“Front-end developer at E-BIRJA”");
    assert!(text.contains("[gh]"));
    assert!(text.contains("https://x.com/DiyorbekLatov"));
    let blog = lines.iter().find(|line| line.contains("Blog")).expect("blog row");
    assert!(blog.starts_with("     Blog"));
}
