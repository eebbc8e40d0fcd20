/// Per-user image viewer, drawn over the directory
use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, horizontal_space, opaque, row, scrollable, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use super::style;
use crate::state::directory::ImageOverlay;
use crate::Message;

const THUMB_WIDTH: f32 = 240.0;

pub fn view(overlay: &ImageOverlay) -> Element<'_, Message> {
    let title = match overlay.user_id {
        Some(id) => format!("Images for user #{}", id),
        None => "Images".to_string(),
    };

    let header = row![
        column![
            text(title).size(20),
            text(format!("{} images", overlay.images.len())).size(12).color(style::muted()),
        ]
        .spacing(2),
        horizontal_space(),
        button(text("Close")).on_press(Message::DismissImages),
    ]
    .align_y(Alignment::Center);

    let body: Element<Message> = if overlay.images.is_empty() {
        container(text("No images for this user").color(style::muted()))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else {
        let tiles: Vec<Element<Message>> = overlay
            .images
            .iter()
            .enumerate()
            .map(|(index, source)| {
                column![
                    Image::<Handle>::new(source.handle.clone()).width(Length::Fixed(THUMB_WIDTH)),
                    row![
                        text(format!("{:?} · {} KB", source.format, source.byte_len.div_ceil(1024)))
                            .size(11)
                            .color(style::muted()),
                        horizontal_space(),
                        button(text("Copy URI").size(11))
                            .style(button::text)
                            .on_press(Message::CopyImageUri(index)),
                    ]
                    .width(Length::Fixed(THUMB_WIDTH))
                    .align_y(Alignment::Center),
                ]
                .spacing(6)
                .padding(8)
                .into()
            })
            .collect();

        scrollable(Wrap::with_elements(tiles))
            .height(Length::Fill)
            .into()
    };

    let panel = container(column![header, body].spacing(20))
        .padding(24)
        .max_width(1100.0)
        .max_height(800.0)
        .style(style::card);

    opaque(
        container(panel)
            .padding(40)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(style::backdrop),
    )
}
