// Banner di errore e di caricamento per la dashboard
use crate::client::gui::theme::Palette;
use crate::client::models::messages::Message;
use crate::client::services::response_parser::pretty_json;
use iced::widget::{Column, Container, Row, Text};
use iced::{Alignment, Color, Element, Font, Length};
use serde_json::Value;

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");

fn banner_style(bg: Color, border: Color) -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg)),
            text_color: None,
            border: iced::Border {
                width: 1.0,
                color: border,
                radius: 8.0.into(),
            },
            shadow: iced::Shadow::default(),
        }
    }))
}

/// Error banner. `body` is the JSON the server sent with an error status.
pub fn error_banner<'a>(message: &'a str, body: Option<&Value>, palette: &Palette) -> Element<'a, Message> {
    let mut content = Column::new().spacing(8).push(
        Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new("⚠️").font(EMOJI_FONT).size(16))
            .push(Text::new(message).size(15).style(palette.error_text)),
    );

    if let Some(body) = body {
        content = content
            .push(Text::new("Server response").size(12).style(palette.text_muted))
            .push(Text::new(pretty_json(body)).font(Font::MONOSPACE).size(12).style(palette.text));
    }

    Container::new(content)
        .padding([12, 16])
        .width(Length::Fill)
        .style(banner_style(palette.error_bg, palette.error_border))
        .into()
}

pub fn loading_banner<'a>(palette: &Palette) -> Element<'a, Message> {
    Container::new(
        Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new("⏳").font(EMOJI_FONT).size(16))
            .push(Text::new("Analyzing image...").size(15).style(palette.loading_text)),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(banner_style(palette.loading_bg, palette.loading_text))
    .into()
}
