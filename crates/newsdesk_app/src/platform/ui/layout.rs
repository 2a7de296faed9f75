use chrono::{Datelike, Local};
use iced::widget::{
    button, center, column, container, horizontal_rule, mouse_area, opaque, row, scrollable,
    stack, text, Space,
};
use iced::{Background, Border, Element, Length};
use newsdesk_core::{AppViewModel, Msg, Notice};

use super::constants::*;
use super::render;
use crate::platform::app::Message;

/// Sidebar, notice slot, current page and footer, plus any open dialog.
pub fn frame(view: &AppViewModel) -> Element<'_, Message> {
    let mut body = column![].spacing(SECTION_SPACING).padding(PAGE_PADDING);
    if let Some(notice) = &view.notice {
        body = body.push(notice_bar(notice));
    }
    body = body.push(render::page(view)).push(footer());

    let base: Element<'_, Message> = row![
        sidebar(view),
        container(scrollable(body).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .into();

    if view.results.bulk.open {
        modal(base, render::bulk_dialog(view), Msg::BulkDialogClosed)
    } else if view.results.preview_open {
        modal(base, render::preview_dialog(view), Msg::PreviewToggled(false))
    } else {
        base
    }
}

fn sidebar(view: &AppViewModel) -> Element<'_, Message> {
    let entries = view.nav.iter().map(|entry| {
        let style = if entry.active {
            button::primary
        } else {
            button::text
        };
        button(text(entry.title).size(BODY_SIZE).color(SIDEBAR_TEXT))
            .on_press(Message::Core(Msg::Navigate(entry.page)))
            .style(style)
            .width(Length::Fill)
            .padding([10, 14])
            .into()
    });

    container(
        column![
            text("Newsdesk").size(HEADING_SIZE + 4).color(SIDEBAR_TEXT),
            text("News collection dashboard")
                .size(CAPTION_SIZE)
                .color(TEXT_MUTED),
            Space::with_height(16),
            column(entries).spacing(4),
        ]
        .spacing(4)
        .padding(16),
    )
    .width(SIDEBAR_WIDTH)
    .height(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(SIDEBAR_BACKGROUND)),
        ..Default::default()
    })
    .into()
}

fn notice_bar(notice: &Notice) -> Element<'_, Message> {
    let accent = severity_color(notice.severity);
    let mut lines = column![].spacing(2);
    if let Some(title) = &notice.title {
        lines = lines.push(text(title).size(BODY_SIZE + 1).color(accent));
    }
    lines = lines.push(text(&notice.message).size(BODY_SIZE));

    container(
        row![
            lines,
            Space::with_width(Length::Fill),
            button(text("Dismiss").size(CAPTION_SIZE))
                .on_press(Message::Core(Msg::NoticeDismissed))
                .style(button::text),
        ]
        .align_y(iced::Alignment::Center)
        .spacing(ITEM_SPACING),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(move |_theme| container::Style {
        background: Some(Background::Color(SURFACE)),
        border: Border {
            color: accent,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn footer<'a>() -> Element<'a, Message> {
    column![
        horizontal_rule(1),
        text(format!(
            "© {} Newsdesk. Naver news collection and relevance review.",
            Local::now().year()
        ))
        .size(CAPTION_SIZE)
        .color(TEXT_MUTED),
    ]
    .spacing(ITEM_SPACING)
    .into()
}

fn modal<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Msg,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Background::Color(BACKDROP)),
                ..Default::default()
            }))
            .on_press(Message::Core(on_blur))
        )
    ]
    .into()
}
