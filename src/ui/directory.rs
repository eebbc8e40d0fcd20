/// User directory: header, stat cards, table and footer
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use super::style;
use crate::display;
use crate::state::app::{AppState, DirectoryPhase};
use crate::state::data::{DirectoryStats, UserRecord};
use crate::Message;

/// Column widths, shared by the header and every row
const ID_WIDTH: f32 = 80.0;
const ROLE_WIDTH: f32 = 140.0;
const VIOLATIONS_WIDTH: f32 = 160.0;
const MERIT_WIDTH: f32 = 150.0;
const ACTION_WIDTH: f32 = 100.0;

pub fn view(state: &AppState, phase: DirectoryPhase) -> Element<'_, Message> {
    let directory = state.directory();
    let users = directory.users();

    let header = row![
        column![
            text("User Management").size(22),
            text(format!("{} total users", users.len())).size(12).color(style::muted()),
        ]
        .spacing(2),
        horizontal_space(),
        button(text("Refresh"))
            .style(button::secondary)
            .padding([8, 16])
            .on_press_maybe((phase != DirectoryPhase::Loading).then_some(Message::Refresh)),
        button(text("Logout"))
            .style(button::danger)
            .padding([8, 16])
            .on_press(Message::Logout),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut content: Column<Message> = column![header].spacing(24);

    if let Some(error) = directory.error() {
        content = content.push(
            container(text(error))
                .padding(14)
                .width(Length::Fill)
                .style(style::error_banner),
        );
    }

    content = content.push(stat_cards(directory.stats()));

    let table_title = column![
        text("Users Directory").size(18),
        text(match phase {
            DirectoryPhase::Loading => "Loading users...",
            _ => "Manage and monitor user accounts",
        })
        .size(13)
        .color(style::muted()),
    ]
    .spacing(4);

    let can_request_images = directory.can_request_images();
    let pending = directory.pending_images();
    let rows = users.iter().enumerate().map(|(index, user)| {
        user_row(index, user, can_request_images, pending == Some(user.id))
    });

    let table = column![
        container(table_title).padding([16, 24]),
        container(table_header()).padding([12, 24]).width(Length::Fill).style(style::table_header),
        scrollable(Column::with_children(rows).spacing(4)).height(Length::Fill),
    ];

    content = content.push(
        container(table)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::card),
    );

    if let Some(updated) = directory.last_updated() {
        content = content.push(
            container(
                text(format!("Last updated: {}", updated.format("%Y-%m-%d at %H:%M:%S")))
                    .size(13)
                    .color(style::muted()),
            )
            .center_x(Length::Fill),
        );
    }

    container(content)
        .padding(32)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::page)
        .into()
}

fn stat_cards(stats: DirectoryStats) -> Element<'static, Message> {
    let cards: Vec<Element<'static, Message>> = [
        ("Total Users", stats.total),
        ("Admins", stats.admins),
        ("Gold Members", stats.gold),
        ("Clean Records", stats.clean),
    ]
    .into_iter()
    .map(|(label, value)| {
        let card = container(
            column![
                text(label).size(13).color(style::muted()),
                text(value.to_string()).size(26),
            ]
            .spacing(4),
        )
        .padding(20)
        .width(Length::Fixed(220.0))
        .style(style::card);

        // Wrap has no gutter of its own
        container(card).padding(8).into()
    })
    .collect();

    Wrap::with_elements(cards).into()
}

fn table_header() -> Element<'static, Message> {
    row![
        text("USER ID").size(12).width(Length::Fixed(ID_WIDTH)),
        text("EMAIL ADDRESS").size(12).width(Length::Fill),
        text("ROLE").size(12).width(Length::Fixed(ROLE_WIDTH)),
        text("VIOLATIONS").size(12).width(Length::Fixed(VIOLATIONS_WIDTH)),
        text("MERIT STATUS").size(12).width(Length::Fixed(MERIT_WIDTH)),
        text("").width(Length::Fixed(ACTION_WIDTH)),
    ]
    .spacing(12)
    .into()
}

fn pill<'a>(label: String, scheme: display::ColorScheme) -> Element<'a, Message> {
    container(text(label).size(12))
        .padding([4, 12])
        .style(style::badge(scheme))
        .into()
}

fn user_row(index: usize, user: &UserRecord, can_request_images: bool, loading: bool) -> Element<'_, Message> {
    let id_badge = container(text(user.id.to_string()).size(13))
        .padding([6, 10])
        .style(style::avatar);

    let identity = row![
        container(text(display::avatar_initial(&user.email)).size(14))
            .padding([8, 13])
            .style(style::avatar),
        column![
            text(&user.email).size(14),
            text(format!("Member {}", display::member_number(index)))
                .size(12)
                .color(style::muted()),
        ]
        .spacing(2),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let images = button(text(if loading { "Loading..." } else { "Images" }).size(13))
        .style(button::secondary)
        .on_press_maybe(can_request_images.then_some(Message::ShowImages(user.id)));

    container(
        row![
            container(id_badge).width(Length::Fixed(ID_WIDTH)),
            container(identity).width(Length::Fill),
            container(pill(user.role.clone(), display::role_scheme(&user.role)))
                .width(Length::Fixed(ROLE_WIDTH)),
            container(pill(
                display::violation_label(user.violation_count),
                user.severity().scheme(),
            ))
            .width(Length::Fixed(VIOLATIONS_WIDTH)),
            container(pill(
                display::merit_label(user.merit_score),
                user.merit_tier().scheme(),
            ))
            .width(Length::Fixed(MERIT_WIDTH)),
            container(images).width(Length::Fixed(ACTION_WIDTH)),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding([12, 24])
    .into()
}
