//! Shared view helpers for the tool windows.
//!
//! These mirror the Qt group-box layout of the original tools: a titled
//! card per logical section, a labelled path row with a Browse button, and
//! a large drop target that highlights while a file hovers.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Background, Border, Element, Length, Theme};

use crate::theme::{colors, font, spacing};

/// A titled card wrapping a section of controls.
pub fn group_box<'a, Message: 'a>(
    title: &'a str,
    content: Element<'a, Message>,
) -> Element<'a, Message> {
    container(
        column![
            text(title).size(font::MD).color(colors::TEXT_SECONDARY),
            content,
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

/// A labelled path input with a Browse button.
pub fn path_input_row<'a, Message: Clone + 'a>(
    label: &'a str,
    value: &str,
    placeholder: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    on_browse: Message,
) -> Element<'a, Message> {
    row![
        text(label).size(font::NORMAL).width(70),
        text_input(placeholder, value)
            .on_input(on_input)
            .size(font::NORMAL)
            .width(Length::Fill),
        button(text("Browse...").size(font::NORMAL)).on_press(on_browse),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}

/// A short labelled text input for numeric values.
pub fn labeled_input<'a, Message: Clone + 'a>(
    label: &'a str,
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).size(font::NORMAL),
        text_input("", value)
            .on_input(on_input)
            .size(font::NORMAL)
            .width(70),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center)
    .into()
}

/// The drop target. Highlights while a file hovers over the window.
pub fn drop_zone<'a, Message: 'a>(hint: String, hovering: bool) -> Element<'a, Message> {
    let border_color = if hovering {
        colors::DROP_HIGHLIGHT
    } else {
        colors::BORDER
    };

    container(
        text(hint)
            .size(font::MD)
            .color(if hovering {
                colors::TEXT_PRIMARY
            } else {
                colors::TEXT_MUTED
            }),
    )
    .padding(spacing::XL)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(move |_theme: &Theme| container::Style {
        background: Some(Background::Color(if hovering {
            colors::SURFACE
        } else {
            colors::CARD
        })),
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// One-line status text at the bottom of a window.
pub fn status_line<'a, Message: 'a>(status: &'a str, is_error: bool) -> Element<'a, Message> {
    text(status)
        .size(font::NORMAL)
        .color(if is_error {
            iced::Color::from_rgb(0.9, 0.45, 0.45)
        } else {
            colors::TEXT_SECONDARY
        })
        .into()
}

fn card_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::CARD)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}
