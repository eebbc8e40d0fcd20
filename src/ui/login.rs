/// Login screen
use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length};

use super::style;
use crate::state::session::Session;
use crate::Message;

pub fn view(session: &Session) -> Element<'_, Message> {
    let submitting = session.is_submitting();

    let mut email = text_input("Enter your email", &session.email).padding(12);
    let mut password = text_input("Enter your password", &session.password)
        .secure(!session.show_password)
        .padding(12);

    // Inputs without handlers render disabled
    if !submitting {
        email = email
            .on_input(Message::EmailChanged)
            .on_submit(Message::SubmitLogin);
        password = password
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SubmitLogin);
    }

    let toggle = button(text(if session.show_password { "Hide" } else { "Show" }).size(14))
        .style(button::text)
        .on_press(Message::TogglePasswordVisibility);

    let sign_in = button(
        container(text(if submitting { "Signing in..." } else { "Sign In" }))
            .center_x(Length::Fill),
    )
    .width(Length::Fill)
    .padding(12)
    .on_press_maybe((!submitting).then_some(Message::SubmitLogin));

    let mut form: Column<Message> = column![].spacing(20);

    if let Some(error) = session.last_error() {
        form = form.push(
            container(text(error).size(14))
                .padding(14)
                .width(Length::Fill)
                .style(style::error_banner),
        );
    }

    form = form
        .push(column![text("Email Address").size(14), email].spacing(8))
        .push(
            column![
                text("Password").size(14),
                row![password, toggle].spacing(8).align_y(Alignment::Center),
            ]
            .spacing(8),
        )
        .push(sign_in)
        .push(
            container(
                column![
                    text("Demo Credentials:").size(12),
                    text("admin@example.com / password").size(12),
                ]
                .spacing(4),
            )
            .padding(14)
            .width(Length::Fill)
            .style(style::hint),
        );

    let content = column![
        text("Admin Portal").size(32),
        text("Sign in to manage your dashboard").color(style::muted()),
        container(form).padding(32).width(Length::Fill).style(style::card),
    ]
    .spacing(12)
    .max_width(440.0)
    .align_x(Alignment::Center);

    container(content)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(style::page)
        .into()
}
